//! Constants for the time-weighted farming engine
//!
//! This module contains the fixed-point scales, lock-duration bounds and
//! fee parameters used throughout the engine.

/// Fixed-point scale applied to `acc_reward_per_share`.
///
/// The accumulator tracks reward-per-unit-of-weight, which is usually a tiny
/// fraction; scaling by 1e9 keeps nine decimal digits of precision through
/// the integer floor divisions.
pub const ACC_MULTIPLIER: u128 = 1_000_000_000;

/// Baseline weight scale. A lot locked for zero duration weighs
/// `amount * WEIGHT_MULTIPLIER`; the duration bonus is added on top of this.
pub const WEIGHT_MULTIPLIER: u128 = 1_000_000_000;

/// Divisor of the duration bonus: a lock of one full year earns a bonus equal
/// to the baseline, doubling the lot's weight.
pub const SECONDS_PER_YEAR: u128 = 31_536_000;

/// Maximum lock duration accepted by any pool (one year in seconds).
///
/// Together with [`SECONDS_PER_YEAR`] this caps the weight multiplier at
/// 2x baseline.
pub const MAX_LOCKED_DURATION: u64 = 31_536_000;

/// Global floor for a pool's `min_locked_duration` (one day in seconds).
/// Pool creation rejects anything shorter.
pub const MIN_LOCKED_DURATION_FLOOR: u64 = 86_400;

/// Denominator for basis point calculations (1 basis point = 0.01%).
/// The per-pool dev reward share is expressed against this divisor.
pub const FEE_DIVISOR: u64 = 10_000;

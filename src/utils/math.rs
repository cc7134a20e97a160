//! Fixed-Point Math Utilities
//!
//! The multiply-then-divide primitive behind every accumulator scaling, plus
//! the lock-duration weight function. All arithmetic is integer; floating
//! point would break the conservation invariants.

use primitive_types::U256;

use crate::constants::{SECONDS_PER_YEAR, WEIGHT_MULTIPLIER};
use crate::error::FarmError;

/// Computes `floor(a * b / c)` exactly.
///
/// The product `a * b` of two 128-bit operands can reach 256 bits, so it is
/// carried in a `U256` intermediate and only the final quotient is checked
/// back down to `u128`. Division truncates toward zero.
///
/// A zero divisor is a caller error: every call site guards the divisor
/// (`total_weight` or a constant) before calling, so hitting it means the
/// accounting is already corrupt and the operation must abort.
pub fn mul_div(a: u128, b: u128, c: u128) -> Result<u128, FarmError> {
    if c == 0 {
        return Err(FarmError::ArithmeticInvariantViolation {
            context: "mul_div divisor is zero".to_string(),
        });
    }
    let wide = U256::from(a) * U256::from(b);
    let quotient = wide / U256::from(c);
    if quotient > U256::from(u128::MAX) {
        return Err(FarmError::ArithmeticOverflow);
    }
    Ok(quotient.as_u128())
}

/// Maps a stake amount and lock duration to the lot's weight.
///
/// `weight = amount * (floor(duration * WEIGHT_MULTIPLIER / SECONDS_PER_YEAR)
/// + WEIGHT_MULTIPLIER)`. A zero-duration lock yields the baseline
/// `amount * WEIGHT_MULTIPLIER`; a full-year lock doubles it. Strictly
/// increasing in both arguments (for nonzero amount) and fully deterministic:
/// lot weights are always recomputed through this function, never stored
/// independently of it.
pub fn lot_weight(amount: u64, lock_duration: u64) -> Result<u128, FarmError> {
    let bonus = (lock_duration as u128)
        .checked_mul(WEIGHT_MULTIPLIER)
        .ok_or(FarmError::ArithmeticOverflow)?
        / SECONDS_PER_YEAR;
    let multiplier = bonus
        .checked_add(WEIGHT_MULTIPLIER)
        .ok_or(FarmError::ArithmeticOverflow)?;
    (amount as u128)
        .checked_mul(multiplier)
        .ok_or(FarmError::ArithmeticOverflow)
}

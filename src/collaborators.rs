//! External Collaborator Interfaces
//!
//! The engine owns reward accounting only. Custody of value, the passage of
//! time and downstream notification are integration seams, expressed here as
//! object-safe traits so processors can work against `&dyn` references.
//! Hosts supply real implementations; tests inject deterministic doubles.

use crate::error::FarmError;
use crate::state::{AccountId, PoolId};

/// Custody primitive for moving value between named balances.
///
/// Each pool owns one stake-token balance and one reward-token balance on
/// the ledger; the engine mirrors both as counters and directs movements
/// through these calls. Every call is part of the caller's transaction: a
/// ledger failure aborts the operation before any engine state has changed.
pub trait Ledger {
    /// Moves `amount` of the stake token from `from` into the pool's custody.
    fn deposit_stake(&self, pool_id: PoolId, from: AccountId, amount: u64)
        -> Result<(), FarmError>;

    /// Releases `amount` of the stake token from the pool's custody to `to`.
    fn release_stake(&self, pool_id: PoolId, to: AccountId, amount: u64) -> Result<(), FarmError>;

    /// Moves `amount` of the reward token from `from` into the pool's
    /// reward custody.
    fn deposit_reward(
        &self,
        pool_id: PoolId,
        from: AccountId,
        amount: u64,
    ) -> Result<(), FarmError>;

    /// Pays `amount` of the reward token from the pool's reward custody to
    /// `to`.
    fn pay_reward(&self, pool_id: PoolId, to: AccountId, amount: u64) -> Result<(), FarmError>;
}

/// Source of the current block height and timestamp.
///
/// Both readings must be monotonic non-decreasing across calls within a
/// pool's history; the engine never sleeps or blocks on time, it only reads
/// it. Production hosts wire this to their chain or system clock; tests
/// drive a manual clock.
pub trait Clock {
    /// Current block height, the unit of the emission schedule.
    fn block_height(&self) -> u64;

    /// Current unix timestamp in seconds, the unit of lock durations.
    fn unix_timestamp(&self) -> u64;
}

/// Receiver for operation notifications.
///
/// Purely an observer hook for downstream indexers or UIs; correctness never
/// depends on a sink being attached.
pub trait EventSink {
    fn deposited(
        &self,
        pool_id: PoolId,
        staker: AccountId,
        amount: u64,
        weight: u128,
        lock_duration: u64,
    );

    fn withdrew(&self, pool_id: PoolId, staker: AccountId, amount: u64);

    fn emergency_withdrew(&self, pool_id: PoolId, staker: AccountId, amount: u64);
}

/// Event sink that drops every notification.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullEventSink;

impl EventSink for NullEventSink {
    fn deposited(
        &self,
        _pool_id: PoolId,
        _staker: AccountId,
        _amount: u64,
        _weight: u128,
        _lock_duration: u64,
    ) {
    }

    fn withdrew(&self, _pool_id: PoolId, _staker: AccountId, _amount: u64) {}

    fn emergency_withdrew(&self, _pool_id: PoolId, _staker: AccountId, _amount: u64) {}
}

//! Input Validation Utilities
//!
//! Precondition checks shared by the processors. Every mutating operation
//! runs its checks through these helpers before touching any state, which is
//! what makes failed operations rollback-free by construction.

use log::warn;

use crate::constants::MAX_LOCKED_DURATION;
use crate::error::FarmError;
use crate::state::{AccountId, PoolState};

/// Validates that the caller is the registered owner.
///
/// Admin-gated operations resolve authority by comparing the explicit caller
/// identity against the owner registered on the farm.
pub fn validate_owner(caller: AccountId, owner: AccountId) -> Result<(), FarmError> {
    if caller != owner {
        warn!("caller {} is not the registered owner {}", caller, owner);
        return Err(FarmError::InsufficientPermission { caller });
    }
    Ok(())
}

/// Validates that a lock duration falls inside the pool's accepted range.
pub fn validate_lock_duration(pool: &PoolState, duration: u64) -> Result<(), FarmError> {
    if duration < pool.min_locked_duration || duration > MAX_LOCKED_DURATION {
        return Err(FarmError::LockDurationInvalid {
            duration,
            min: pool.min_locked_duration,
            max: MAX_LOCKED_DURATION,
        });
    }
    Ok(())
}

/// Validates an emission window: the schedule must span at least one block.
pub fn validate_schedule(start_block: u64, end_block: u64) -> Result<(), FarmError> {
    if end_block <= start_block {
        return Err(FarmError::RewardScheduleInvalid {
            start_block,
            end_block,
        });
    }
    Ok(())
}

/// Validates that the pool completed its one-time reward funding.
pub fn validate_funded(pool: &PoolState) -> Result<(), FarmError> {
    if !pool.is_funded() {
        return Err(FarmError::PoolNotReady);
    }
    Ok(())
}

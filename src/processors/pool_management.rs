//! Pool Management Processors
//!
//! Owner-gated administrative operations: ownership and dev-address
//! handover, the emergency-withdraw escape hatch, and the per-pool minimum
//! lock duration.

use log::info;

use crate::constants::{MAX_LOCKED_DURATION, MIN_LOCKED_DURATION_FLOOR};
use crate::error::FarmError;
use crate::state::{AccountId, PoolId, PoolState, SystemState};
use crate::utils::validation::validate_owner;

/// Transfers farm ownership to `new_owner`.
pub fn process_change_owner(
    system: &mut SystemState,
    caller: AccountId,
    new_owner: AccountId,
) -> Result<(), FarmError> {
    validate_owner(caller, system.owner)?;
    info!("owner changed from {} to {}", system.owner, new_owner);
    system.owner = new_owner;
    Ok(())
}

/// Redirects future dev cuts to `new_dev`. Reward already paid out is
/// unaffected.
pub fn process_change_dev(
    system: &mut SystemState,
    caller: AccountId,
    new_dev: AccountId,
) -> Result<(), FarmError> {
    validate_owner(caller, system.owner)?;
    info!("dev address changed from {} to {}", system.dev, new_dev);
    system.dev = new_dev;
    Ok(())
}

/// Toggles the pool's emergency-withdraw escape hatch.
pub fn process_set_allow_emergency_withdraw(
    pool: &mut PoolState,
    pool_id: PoolId,
    caller: AccountId,
    owner: AccountId,
    allow: bool,
) -> Result<(), FarmError> {
    validate_owner(caller, owner)?;
    pool.allow_emergency_withdraw = allow;
    info!("pool {}: emergency withdraw set to {}", pool_id, allow);
    Ok(())
}

/// Adjusts the pool's minimum lock duration. The new value must stay inside
/// the global floor/cap; open lots keep the duration they were created with.
pub fn process_set_min_locked_duration(
    pool: &mut PoolState,
    pool_id: PoolId,
    caller: AccountId,
    owner: AccountId,
    duration: u64,
) -> Result<(), FarmError> {
    validate_owner(caller, owner)?;
    if duration < MIN_LOCKED_DURATION_FLOOR || duration > MAX_LOCKED_DURATION {
        return Err(FarmError::LockDurationInvalid {
            duration,
            min: MIN_LOCKED_DURATION_FLOOR,
            max: MAX_LOCKED_DURATION,
        });
    }
    pool.min_locked_duration = duration;
    info!("pool {}: min locked duration set to {}s", pool_id, duration);
    Ok(())
}

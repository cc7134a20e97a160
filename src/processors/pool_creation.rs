//! Pool Creation Processors
//!
//! Creation of a pool with its fixed emission schedule, and the one-time
//! reward funding that arms it for deposits.

use log::info;

use crate::collaborators::Ledger;
use crate::constants::{FEE_DIVISOR, MAX_LOCKED_DURATION, MIN_LOCKED_DURATION_FLOOR};
use crate::error::FarmError;
use crate::state::{AccountId, PoolId, PoolState};
use crate::utils::validation::validate_schedule;

/// Configuration for a new pool.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PoolParams {
    /// Total reward the pool will emit over its block range.
    pub reward_total: u64,
    /// First block of the emission window.
    pub start_block: u64,
    /// Last block of the emission window; must exceed `start_block`.
    pub end_block: u64,
    /// Shortest lock the pool accepts, in seconds.
    pub min_locked_duration: u64,
    /// Basis points of emission routed to the dev address.
    pub dev_reward_share_bps: u64,
}

/// Validates `params` and builds the pool's initial state.
///
/// The per-block rate is fixed here by integer division; the division
/// remainder is permanently unemitted, an accepted rounding loss. The pool
/// starts unfunded and rejects deposits until [`process_deposit_pool_reward`]
/// completes.
pub fn process_add_pool(params: &PoolParams) -> Result<PoolState, FarmError> {
    validate_schedule(params.start_block, params.end_block)?;
    if params.min_locked_duration < MIN_LOCKED_DURATION_FLOOR
        || params.min_locked_duration > MAX_LOCKED_DURATION
    {
        return Err(FarmError::LockDurationInvalid {
            duration: params.min_locked_duration,
            min: MIN_LOCKED_DURATION_FLOOR,
            max: MAX_LOCKED_DURATION,
        });
    }
    if params.dev_reward_share_bps > FEE_DIVISOR {
        return Err(FarmError::DevShareInvalid {
            share_bps: params.dev_reward_share_bps,
            max_bps: FEE_DIVISOR,
        });
    }

    let reward_per_block = params.reward_total / (params.end_block - params.start_block);

    Ok(PoolState {
        reward_total: params.reward_total,
        start_block: params.start_block,
        end_block: params.end_block,
        reward_per_block,
        last_reward_block: params.start_block,
        min_locked_duration: params.min_locked_duration,
        dev_reward_share: params.dev_reward_share_bps,
        ..Default::default()
    })
}

/// Funds the pool's full reward amount, exactly once.
///
/// On success the emission window is re-anchored to begin at the current
/// block, preserving its original length in blocks, so no emission is lost
/// to the gap between creation and funding.
pub fn process_deposit_pool_reward(
    pool: &mut PoolState,
    pool_id: PoolId,
    funder: AccountId,
    amount: u64,
    now_block: u64,
    ledger: &dyn Ledger,
) -> Result<(), FarmError> {
    if pool.is_funded() {
        return Err(FarmError::RewardAlreadyDeposited);
    }
    if amount != pool.reward_total {
        return Err(FarmError::RewardAmountMismatch {
            expected: pool.reward_total,
            provided: amount,
        });
    }

    ledger.deposit_reward(pool_id, funder, amount)?;
    pool.reward_deposited = pool
        .reward_deposited
        .checked_add(amount)
        .ok_or(FarmError::ArithmeticOverflow)?;
    pool.reward_balance = pool
        .reward_balance
        .checked_add(amount)
        .ok_or(FarmError::ArithmeticOverflow)?;

    let window = pool.end_block - pool.start_block;
    pool.start_block = now_block;
    pool.end_block = now_block
        .checked_add(window)
        .ok_or(FarmError::ArithmeticOverflow)?;
    pool.last_reward_block = now_block;

    info!(
        "pool {}: funded {} by {}, emission re-anchored to blocks {}..{}",
        pool_id, amount, funder, pool.start_block, pool.end_block
    );
    Ok(())
}

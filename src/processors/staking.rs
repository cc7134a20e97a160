//! Staking Processors
//!
//! The transactional operations that move principal: deposit, withdraw and
//! emergency withdraw. Each one validates every precondition before the
//! first mutation, brings the accumulator current, settles pending reward,
//! and only then touches user and pool state, so a failed call never leaves
//! a partially applied transaction behind.

use log::info;

use crate::collaborators::{Clock, EventSink, Ledger};
use crate::constants::ACC_MULTIPLIER;
use crate::error::FarmError;
use crate::processors::rewards::{settle_pending, update_pool};
use crate::state::{AccountId, PoolId, PoolState, StakeLot};
use crate::utils::validation::{validate_funded, validate_lock_duration};
use crate::utils::{lot_weight, mul_div};

/// Locks `amount` of the stake token for `lock_duration` seconds.
///
/// Requires a funded pool and a duration inside the pool's accepted range.
/// Any reward pending on the user's existing weight is settled first, then a
/// new lot is appended with its weight derived from the amount and duration,
/// and the user's reward debt is re-baselined against the post-deposit
/// weight.
#[allow(clippy::too_many_arguments)]
pub fn process_deposit(
    pool: &mut PoolState,
    pool_id: PoolId,
    staker: AccountId,
    amount: u64,
    lock_duration: u64,
    dev: AccountId,
    ledger: &dyn Ledger,
    clock: &dyn Clock,
    events: &dyn EventSink,
) -> Result<(), FarmError> {
    if amount == 0 {
        return Err(FarmError::InvalidDepositAmount);
    }
    validate_funded(pool)?;
    validate_lock_duration(pool, lock_duration)?;

    // Stake intake precedes settlement: a wallet shortfall aborts before
    // any reward has been paid out.
    ledger.deposit_stake(pool_id, staker, amount)?;
    pool.staked_balance = pool
        .staked_balance
        .checked_add(amount)
        .ok_or(FarmError::ArithmeticOverflow)?;

    update_pool(pool, pool_id, clock.block_height(), dev, ledger)?;
    settle_pending(pool, pool_id, staker, ledger)?;

    let weight = lot_weight(amount, lock_duration)?;
    let locked_from = clock.unix_timestamp();
    let locked_till = locked_from
        .checked_add(lock_duration)
        .ok_or(FarmError::ArithmeticOverflow)?;
    let acc = pool.acc_reward_per_share;

    let user = pool.user_accounts.entry(staker).or_default();
    if weight > 0 {
        user.deposits.push(StakeLot {
            token_amount: amount,
            weight,
            locked_from,
            locked_till,
        });
    }
    user.staked_amount = user
        .staked_amount
        .checked_add(amount)
        .ok_or(FarmError::ArithmeticOverflow)?;
    user.staked_weight = user
        .staked_weight
        .checked_add(weight)
        .ok_or(FarmError::ArithmeticOverflow)?;
    user.reward_debt = mul_div(user.staked_weight, acc, ACC_MULTIPLIER)?;

    pool.total_weight = pool
        .total_weight
        .checked_add(weight)
        .ok_or(FarmError::ArithmeticOverflow)?;

    info!(
        "pool {}: {} deposited {} locked for {}s (weight {})",
        pool_id, staker, amount, lock_duration, weight
    );
    events.deposited(pool_id, staker, amount, weight, lock_duration);
    Ok(())
}

/// Withdraws `amount` from the lot at `lot_index` once it has unlocked.
///
/// The lot's weight is recomputed at the same lock duration for the reduced
/// amount; a fully drained lot is removed, shifting the indices of the lots
/// after it, so callers must not cache indices across calls. `amount == 0`
/// is a pure harvest: pending reward is settled and the debt re-baselined
/// without moving principal.
#[allow(clippy::too_many_arguments)]
pub fn process_withdraw(
    pool: &mut PoolState,
    pool_id: PoolId,
    staker: AccountId,
    lot_index: usize,
    amount: u64,
    dev: AccountId,
    ledger: &dyn Ledger,
    clock: &dyn Clock,
    events: &dyn EventSink,
) -> Result<(), FarmError> {
    let (prev_weight, duration, remaining) = {
        let lots = pool
            .user_accounts
            .get(&staker)
            .map(|user| user.deposits.as_slice())
            .unwrap_or_default();
        let lot = lots.get(lot_index).ok_or(FarmError::DepositIndexOutOfRange {
            index: lot_index,
            len: lots.len(),
        })?;
        if amount > lot.token_amount {
            return Err(FarmError::WithdrawExceedsLot {
                requested: amount,
                available: lot.token_amount,
            });
        }
        let now = clock.unix_timestamp();
        if now < lot.locked_till {
            return Err(FarmError::WithdrawNotUnlocked {
                now,
                locked_till: lot.locked_till,
            });
        }
        (lot.weight, lot.lock_duration(), lot.token_amount - amount)
    };

    update_pool(pool, pool_id, clock.block_height(), dev, ledger)?;
    settle_pending(pool, pool_id, staker, ledger)?;

    if amount > 0 {
        ledger.release_stake(pool_id, staker, amount)?;
    }

    let new_weight = if remaining == 0 {
        0
    } else {
        lot_weight(remaining, duration)?
    };
    let acc = pool.acc_reward_per_share;

    let user = pool
        .user_accounts
        .get_mut(&staker)
        .ok_or_else(|| FarmError::ArithmeticInvariantViolation {
            context: "user account vanished mid-withdraw".to_string(),
        })?;
    if remaining == 0 {
        user.deposits.remove(lot_index);
    } else {
        let lot = &mut user.deposits[lot_index];
        lot.token_amount = remaining;
        lot.weight = new_weight;
    }
    user.staked_amount = user.staked_amount.checked_sub(amount).ok_or_else(|| {
        FarmError::ArithmeticInvariantViolation {
            context: "withdraw exceeds user staked amount".to_string(),
        }
    })?;
    user.staked_weight = user
        .staked_weight
        .checked_sub(prev_weight)
        .and_then(|w| w.checked_add(new_weight))
        .ok_or_else(|| FarmError::ArithmeticInvariantViolation {
            context: "user weight underflow on withdraw".to_string(),
        })?;
    user.reward_debt = mul_div(user.staked_weight, acc, ACC_MULTIPLIER)?;

    pool.total_weight = pool
        .total_weight
        .checked_sub(prev_weight)
        .and_then(|w| w.checked_add(new_weight))
        .ok_or_else(|| FarmError::ArithmeticInvariantViolation {
            context: "pool weight underflow on withdraw".to_string(),
        })?;
    pool.staked_balance = pool.staked_balance.checked_sub(amount).ok_or_else(|| {
        FarmError::ArithmeticInvariantViolation {
            context: "withdraw exceeds pool staked balance".to_string(),
        }
    })?;

    info!(
        "pool {}: {} withdrew {} from lot {} (weight {} -> {})",
        pool_id, staker, amount, lot_index, prev_weight, new_weight
    );
    events.withdrew(pool_id, staker, amount);
    Ok(())
}

/// Returns the user's entire principal, forfeiting all unclaimed reward.
///
/// Gated on the pool's admin-controlled `allow_emergency_withdraw` flag.
/// Deliberately performs no accrual update and no settlement: the path must
/// stay usable even if the reward accounting is the thing that is broken.
pub fn process_emergency_withdraw(
    pool: &mut PoolState,
    pool_id: PoolId,
    staker: AccountId,
    ledger: &dyn Ledger,
    events: &dyn EventSink,
) -> Result<(), FarmError> {
    if !pool.allow_emergency_withdraw {
        return Err(FarmError::EmergencyNotAllowed);
    }

    let (amount, weight) = match pool.user_accounts.get(&staker) {
        Some(user) => (user.staked_amount, user.staked_weight),
        None => return Ok(()),
    };

    if amount > 0 {
        ledger.release_stake(pool_id, staker, amount)?;
    }

    let user = pool
        .user_accounts
        .get_mut(&staker)
        .ok_or_else(|| FarmError::ArithmeticInvariantViolation {
            context: "user account vanished mid-emergency-withdraw".to_string(),
        })?;
    user.staked_amount = 0;
    user.staked_weight = 0;
    user.reward_debt = 0;
    user.deposits.clear();

    pool.total_weight = pool.total_weight.checked_sub(weight).ok_or_else(|| {
        FarmError::ArithmeticInvariantViolation {
            context: "user weight exceeds pool weight on emergency withdraw".to_string(),
        }
    })?;
    pool.staked_balance = pool.staked_balance.checked_sub(amount).ok_or_else(|| {
        FarmError::ArithmeticInvariantViolation {
            context: "user stake exceeds pool staked balance on emergency withdraw".to_string(),
        }
    })?;

    info!(
        "pool {}: {} emergency-withdrew {} forfeiting pending reward",
        pool_id, staker, amount
    );
    events.emergency_withdrew(pool_id, staker, amount);
    Ok(())
}

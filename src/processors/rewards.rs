//! Reward Accrual Engine
//!
//! Advances a pool's reward accumulator to the current block. This is the
//! only place `acc_reward_per_share` moves, and every processor that reads
//! the accumulator or mutates weight calls in here first so all weight-change
//! events observe a consistent accrual boundary.

use log::debug;

use crate::collaborators::Ledger;
use crate::constants::{ACC_MULTIPLIER, FEE_DIVISOR};
use crate::error::FarmError;
use crate::state::{AccountId, PoolId, PoolState};
use crate::utils::mul_div;

/// Brings `acc_reward_per_share` current to `now_block`.
///
/// Emission since `last_reward_block` is computed against the pool's fixed
/// per-block rate, clamped to the end of the schedule. The dev cut is paid
/// out immediately through the ledger; the remainder is folded into the
/// accumulator pro-rata to `total_weight`.
///
/// Terminal state: once `last_reward_block` reaches `end_block` the schedule
/// is fully emitted and every further call is a no-op. While `total_weight`
/// is zero the interval's emission accrues to nobody: `last_reward_block`
/// advances without touching the accumulator, and that emission is not
/// retroactively distributable once weight later appears.
pub fn update_pool(
    pool: &mut PoolState,
    pool_id: PoolId,
    now_block: u64,
    dev: AccountId,
    ledger: &dyn Ledger,
) -> Result<(), FarmError> {
    if now_block <= pool.last_reward_block || pool.is_fully_emitted() {
        return Ok(());
    }

    // last_reward_block < end_block here, so the clamped end is strictly
    // ahead of it.
    let effective_end = now_block.min(pool.end_block);

    if pool.total_weight == 0 {
        pool.last_reward_block = effective_end;
        return Ok(());
    }

    let blocks = effective_end - pool.last_reward_block;
    let emitted = pool
        .reward_per_block
        .checked_mul(blocks)
        .ok_or(FarmError::ArithmeticOverflow)?;
    pool.last_reward_block = effective_end;

    let dev_cut_wide = mul_div(
        emitted as u128,
        pool.dev_reward_share as u128,
        FEE_DIVISOR as u128,
    )?;
    // share <= FEE_DIVISOR keeps the cut within the emitted amount.
    let dev_cut =
        u64::try_from(dev_cut_wide).map_err(|_| FarmError::ArithmeticInvariantViolation {
            context: "dev cut exceeds emitted reward".to_string(),
        })?;
    let to_pool = emitted - dev_cut;

    if dev_cut > 0 {
        ledger.pay_reward(pool_id, dev, dev_cut)?;
        pool.reward_balance = pool.reward_balance.checked_sub(dev_cut).ok_or_else(|| {
            FarmError::ArithmeticInvariantViolation {
                context: "dev cut exceeds pool reward balance".to_string(),
            }
        })?;
        pool.reward_distributed = pool
            .reward_distributed
            .checked_add(dev_cut)
            .ok_or(FarmError::ArithmeticOverflow)?;
    }

    let delta = mul_div(to_pool as u128, ACC_MULTIPLIER, pool.total_weight)?;
    pool.acc_reward_per_share = pool
        .acc_reward_per_share
        .checked_add(delta)
        .ok_or(FarmError::ArithmeticOverflow)?;

    debug!(
        "pool {}: accrued {} blocks, emitted {}, dev cut {}, acc now {}",
        pool_id, blocks, emitted, dev_cut, pool.acc_reward_per_share
    );
    Ok(())
}

/// Settles a user's pending reward against the current accumulator.
///
/// `pending = floor(staked_weight * acc / ACC_MULTIPLIER) - reward_debt`.
/// A negative pending means the accumulator or the debt is corrupt; that is
/// surfaced as a fatal invariant violation, never clamped to zero.
///
/// `reward_debt` is re-baselined to the settled entitlement in the same step
/// as the payout, so settling again at the same accumulator pays nothing.
/// Callers that go on to mutate weight re-baseline once more against the new
/// weight.
pub fn settle_pending(
    pool: &mut PoolState,
    pool_id: PoolId,
    staker: AccountId,
    ledger: &dyn Ledger,
) -> Result<u64, FarmError> {
    let (staked_weight, reward_debt) = match pool.user_accounts.get(&staker) {
        Some(user) => (user.staked_weight, user.reward_debt),
        None => return Ok(0),
    };
    if staked_weight == 0 {
        return Ok(0);
    }

    let entitled = mul_div(staked_weight, pool.acc_reward_per_share, ACC_MULTIPLIER)?;
    let pending_wide = entitled.checked_sub(reward_debt).ok_or_else(|| {
        FarmError::ArithmeticInvariantViolation {
            context: format!(
                "reward debt {} exceeds entitlement {} for {}",
                reward_debt, entitled, staker
            ),
        }
    })?;
    if pending_wide == 0 {
        return Ok(0);
    }
    // Pending can never exceed the pool's u64 reward total.
    let pending =
        u64::try_from(pending_wide).map_err(|_| FarmError::ArithmeticInvariantViolation {
            context: "pending reward exceeds reward total range".to_string(),
        })?;

    ledger.pay_reward(pool_id, staker, pending)?;
    pool.reward_balance = pool.reward_balance.checked_sub(pending).ok_or_else(|| {
        FarmError::ArithmeticInvariantViolation {
            context: "pending reward exceeds pool reward balance".to_string(),
        }
    })?;
    pool.reward_distributed = pool
        .reward_distributed
        .checked_add(pending)
        .ok_or(FarmError::ArithmeticOverflow)?;

    // The paid pending is priced in immediately; a failed ledger call later
    // in the caller's transaction leaves nothing harvestable twice.
    if let Some(user) = pool.user_accounts.get_mut(&staker) {
        user.reward_debt = entitled;
    }

    debug!("pool {}: paid {} pending reward to {}", pool_id, pending, staker);
    Ok(pending)
}

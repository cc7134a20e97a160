//! Farm Operation Surface
//!
//! [`Farm`] owns the pool table and the registered authorities, wires the
//! collaborator seams into the processors, and serializes every mutating
//! operation through a per-pool single-writer lock so concurrent requests
//! against the same pool can never interleave mid-transaction.

use std::sync::{Arc, Mutex, RwLock};

use crate::collaborators::{Clock, EventSink, Ledger};
use crate::constants::ACC_MULTIPLIER;
use crate::error::FarmError;
use crate::processors::{
    process_add_pool, process_change_dev, process_change_owner, process_deposit,
    process_deposit_pool_reward, process_emergency_withdraw,
    process_set_allow_emergency_withdraw, process_set_min_locked_duration, process_withdraw,
    update_pool, PoolParams,
};
use crate::state::{AccountId, PoolId, PoolState, StakeLot, SystemState};
use crate::utils::{mul_div, validation::validate_owner};

/// Read-only snapshot of a participant's position in one pool.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserInfo {
    pub staked_amount: u64,
    pub reward_debt: u128,
    pub staked_weight: u128,
    pub lots: Vec<StakeLot>,
}

/// Read-only snapshot of a single lot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DepositInfo {
    pub amount: u64,
    pub weight: u128,
    pub locked_from: u64,
    pub locked_till: u64,
}

/// Read-only snapshot of a pool's counters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PoolInfo {
    pub staked_balance: u64,
    pub reward_balance: u64,
    pub reward_total: u64,
    pub reward_deposited: u64,
    pub reward_distributed: u64,
    pub start_block: u64,
    pub end_block: u64,
    pub reward_per_block: u64,
    pub acc_reward_per_share: u128,
    pub last_reward_block: u64,
    pub total_weight: u128,
    pub min_locked_duration: u64,
    pub allow_emergency_withdraw: bool,
    pub dev_reward_share: u64,
}

/// The reward-accounting engine, generic over its collaborators.
///
/// All mutating operations run to completion or fail atomically under the
/// owning pool's lock: the accrual update, weight and balance mutations and
/// the custody movement form one indivisible unit. Read-only views take the
/// same lock briefly for a consistent snapshot but never authorize payouts.
pub struct Farm<L: Ledger, C: Clock, E: EventSink> {
    ledger: L,
    clock: C,
    events: E,
    system: RwLock<SystemState>,
    pools: RwLock<Vec<Arc<Mutex<PoolState>>>>,
}

impl<L: Ledger, C: Clock, E: EventSink> Farm<L, C, E> {
    pub fn new(owner: AccountId, dev: AccountId, ledger: L, clock: C, events: E) -> Self {
        Farm {
            ledger,
            clock,
            events,
            system: RwLock::new(SystemState::new(owner, dev)),
            pools: RwLock::new(Vec::new()),
        }
    }

    fn system(&self) -> SystemState {
        *self.system.read().expect("system state lock poisoned")
    }

    /// Runs `op` under the pool's single-writer lock.
    fn with_pool<R>(
        &self,
        pool_id: PoolId,
        op: impl FnOnce(&mut PoolState) -> Result<R, FarmError>,
    ) -> Result<R, FarmError> {
        let pool = {
            let pools = self.pools.read().expect("pool table lock poisoned");
            pools
                .get(pool_id as usize)
                .cloned()
                .ok_or(FarmError::PoolNotFound { pool_id })?
        };
        let mut guard = pool.lock().expect("pool lock poisoned");
        op(&mut guard)
    }

    /// Creates a pool with a fixed emission schedule. Owner only.
    pub fn add_pool(&self, caller: AccountId, params: PoolParams) -> Result<PoolId, FarmError> {
        validate_owner(caller, self.system().owner)?;
        let pool = process_add_pool(&params)?;
        let mut pools = self.pools.write().expect("pool table lock poisoned");
        let pool_id = pools.len() as PoolId;
        pools.push(Arc::new(Mutex::new(pool)));
        Ok(pool_id)
    }

    /// Funds the pool's full reward, exactly once, and re-anchors its
    /// emission window to the current block. Any funder may pay.
    pub fn deposit_pool_reward(
        &self,
        pool_id: PoolId,
        funder: AccountId,
        amount: u64,
    ) -> Result<(), FarmError> {
        let now_block = self.clock.block_height();
        self.with_pool(pool_id, |pool| {
            process_deposit_pool_reward(pool, pool_id, funder, amount, now_block, &self.ledger)
        })
    }

    /// Locks `amount` of the stake token for `lock_duration` seconds.
    pub fn deposit(
        &self,
        pool_id: PoolId,
        staker: AccountId,
        amount: u64,
        lock_duration: u64,
    ) -> Result<(), FarmError> {
        let dev = self.system().dev;
        self.with_pool(pool_id, |pool| {
            process_deposit(
                pool,
                pool_id,
                staker,
                amount,
                lock_duration,
                dev,
                &self.ledger,
                &self.clock,
                &self.events,
            )
        })
    }

    /// Withdraws `amount` from the staker's lot at `lot_index` once it has
    /// unlocked. `amount == 0` harvests pending reward without moving
    /// principal.
    pub fn withdraw(
        &self,
        pool_id: PoolId,
        staker: AccountId,
        lot_index: usize,
        amount: u64,
    ) -> Result<(), FarmError> {
        let dev = self.system().dev;
        self.with_pool(pool_id, |pool| {
            process_withdraw(
                pool,
                pool_id,
                staker,
                lot_index,
                amount,
                dev,
                &self.ledger,
                &self.clock,
                &self.events,
            )
        })
    }

    /// Returns the staker's entire principal, forfeiting unclaimed reward.
    /// Available only while the pool's escape hatch is enabled.
    pub fn emergency_withdraw(&self, pool_id: PoolId, staker: AccountId) -> Result<(), FarmError> {
        self.with_pool(pool_id, |pool| {
            process_emergency_withdraw(pool, pool_id, staker, &self.ledger, &self.events)
        })
    }

    /// Transfers farm ownership. Owner only.
    pub fn change_owner(&self, caller: AccountId, new_owner: AccountId) -> Result<(), FarmError> {
        let mut system = self.system.write().expect("system state lock poisoned");
        process_change_owner(&mut system, caller, new_owner)
    }

    /// Redirects future dev cuts. Owner only.
    pub fn change_dev(&self, caller: AccountId, new_dev: AccountId) -> Result<(), FarmError> {
        let mut system = self.system.write().expect("system state lock poisoned");
        process_change_dev(&mut system, caller, new_dev)
    }

    /// Toggles a pool's emergency-withdraw escape hatch. Owner only.
    pub fn set_allow_emergency_withdraw(
        &self,
        caller: AccountId,
        pool_id: PoolId,
        allow: bool,
    ) -> Result<(), FarmError> {
        let owner = self.system().owner;
        self.with_pool(pool_id, |pool| {
            process_set_allow_emergency_withdraw(pool, pool_id, caller, owner, allow)
        })
    }

    /// Adjusts a pool's minimum lock duration. Owner only.
    pub fn set_min_locked_duration(
        &self,
        caller: AccountId,
        pool_id: PoolId,
        duration: u64,
    ) -> Result<(), FarmError> {
        let owner = self.system().owner;
        self.with_pool(pool_id, |pool| {
            process_set_min_locked_duration(pool, pool_id, caller, owner, duration)
        })
    }

    /// Brings the pool's accumulator current to the clock. Useful for hosts
    /// that want accrual (and the dev cut) to advance between user
    /// operations.
    pub fn update_pool(&self, pool_id: PoolId) -> Result<(), FarmError> {
        let dev = self.system().dev;
        let now_block = self.clock.block_height();
        self.with_pool(pool_id, |pool| {
            update_pool(pool, pool_id, now_block, dev, &self.ledger)
        })
    }

    /// Snapshot of a participant's position.
    pub fn user_info(&self, pool_id: PoolId, account: AccountId) -> Result<UserInfo, FarmError> {
        self.with_pool(pool_id, |pool| {
            let user = pool.user(&account).cloned().unwrap_or_default();
            Ok(UserInfo {
                staked_amount: user.staked_amount,
                reward_debt: user.reward_debt,
                staked_weight: user.staked_weight,
                lots: user.deposits,
            })
        })
    }

    /// Snapshot of one lot.
    pub fn deposit_info(
        &self,
        pool_id: PoolId,
        account: AccountId,
        lot_index: usize,
    ) -> Result<DepositInfo, FarmError> {
        self.with_pool(pool_id, |pool| {
            let lots = pool
                .user(&account)
                .map(|user| user.deposits.as_slice())
                .unwrap_or_default();
            let lot = lots.get(lot_index).ok_or(FarmError::DepositIndexOutOfRange {
                index: lot_index,
                len: lots.len(),
            })?;
            Ok(DepositInfo {
                amount: lot.token_amount,
                weight: lot.weight,
                locked_from: lot.locked_from,
                locked_till: lot.locked_till,
            })
        })
    }

    /// Snapshot of the pool's counters.
    pub fn pool_info(&self, pool_id: PoolId) -> Result<PoolInfo, FarmError> {
        self.with_pool(pool_id, |pool| {
            Ok(PoolInfo {
                staked_balance: pool.staked_balance,
                reward_balance: pool.reward_balance,
                reward_total: pool.reward_total,
                reward_deposited: pool.reward_deposited,
                reward_distributed: pool.reward_distributed,
                start_block: pool.start_block,
                end_block: pool.end_block,
                reward_per_block: pool.reward_per_block,
                acc_reward_per_share: pool.acc_reward_per_share,
                last_reward_block: pool.last_reward_block,
                total_weight: pool.total_weight,
                min_locked_duration: pool.min_locked_duration,
                allow_emergency_withdraw: pool.allow_emergency_withdraw,
                dev_reward_share: pool.dev_reward_share,
            })
        })
    }

    /// Reward the account would receive if it settled at the current clock.
    ///
    /// Display only: the figure is computed on a snapshot with a simulated
    /// accrual and must never be used to authorize a payout; the mutating
    /// paths recompute pending under the pool lock.
    pub fn pending_reward(&self, pool_id: PoolId, account: AccountId) -> Result<u64, FarmError> {
        let now_block = self.clock.block_height();
        self.with_pool(pool_id, |pool| {
            let user = match pool.user(&account) {
                Some(user) if user.staked_weight > 0 => user,
                _ => return Ok(0),
            };

            let mut acc = pool.acc_reward_per_share;
            if now_block > pool.last_reward_block
                && !pool.is_fully_emitted()
                && pool.total_weight > 0
            {
                let effective_end = now_block.min(pool.end_block);
                let blocks = effective_end - pool.last_reward_block;
                let emitted = pool
                    .reward_per_block
                    .checked_mul(blocks)
                    .ok_or(FarmError::ArithmeticOverflow)?;
                let dev_cut = mul_div(
                    emitted as u128,
                    pool.dev_reward_share as u128,
                    crate::constants::FEE_DIVISOR as u128,
                )?;
                let to_pool = emitted as u128 - dev_cut;
                acc = acc
                    .checked_add(mul_div(to_pool, ACC_MULTIPLIER, pool.total_weight)?)
                    .ok_or(FarmError::ArithmeticOverflow)?;
            }

            let entitled = mul_div(user.staked_weight, acc, ACC_MULTIPLIER)?;
            let pending = entitled.checked_sub(user.reward_debt).ok_or_else(|| {
                FarmError::ArithmeticInvariantViolation {
                    context: "reward debt exceeds entitlement".to_string(),
                }
            })?;
            u64::try_from(pending).map_err(|_| FarmError::ArithmeticInvariantViolation {
                context: "pending reward exceeds reward total range".to_string(),
            })
        })
    }
}

//! Test Fixtures
//!
//! Deterministic collaborator doubles (in-memory ledger, manual clock,
//! recording event sink) plus the builders and invariant checks the
//! numbered test files share.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use time_weighted_farming::*;

pub type TestResult = Result<(), Box<dyn std::error::Error>>;

/// Two weeks in seconds, the usual minimum lock in these tests.
pub const TWO_WEEKS: u64 = 1_209_600;
/// One day in seconds, the global minimum-lock floor.
pub const DAY: u64 = 86_400;

pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

pub fn account(tag: u8) -> AccountId {
    AccountId::new([tag; 32])
}

pub fn owner() -> AccountId {
    account(0xA0)
}

pub fn dev() -> AccountId {
    account(0xD0)
}

// ---------------------------------------------------------------------------
// Clock double

/// Manually driven clock shared between the test body and the farm.
#[derive(Clone, Default)]
pub struct ManualClock {
    block: Arc<AtomicU64>,
    timestamp: Arc<AtomicU64>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_block(&self, block: u64) {
        self.block.store(block, Ordering::SeqCst);
    }

    pub fn advance_blocks(&self, blocks: u64) {
        self.block.fetch_add(blocks, Ordering::SeqCst);
    }

    pub fn set_timestamp(&self, timestamp: u64) {
        self.timestamp.store(timestamp, Ordering::SeqCst);
    }

    pub fn advance_time(&self, seconds: u64) {
        self.timestamp.fetch_add(seconds, Ordering::SeqCst);
    }
}

impl Clock for ManualClock {
    fn block_height(&self) -> u64 {
        self.block.load(Ordering::SeqCst)
    }

    fn unix_timestamp(&self) -> u64 {
        self.timestamp.load(Ordering::SeqCst)
    }
}

// ---------------------------------------------------------------------------
// Ledger double

#[derive(Default)]
struct Balances {
    wallet_stake: HashMap<AccountId, u64>,
    wallet_reward: HashMap<AccountId, u64>,
    pool_stake: HashMap<PoolId, u64>,
    pool_reward: HashMap<PoolId, u64>,
}

fn debit(map: &mut HashMap<AccountId, u64>, key: AccountId, amount: u64) -> Result<(), FarmError> {
    let balance = map.entry(key).or_default();
    if *balance < amount {
        return Err(FarmError::InsufficientFunds {
            required: amount,
            available: *balance,
        });
    }
    *balance -= amount;
    Ok(())
}

/// In-memory custody keeping stake and reward balances per wallet and per
/// pool. Balance checks make a custody shortfall abort the transaction the
/// way a real vault would.
#[derive(Clone, Default)]
pub struct MemoryLedger {
    inner: Arc<Mutex<Balances>>,
}

impl MemoryLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mint_stake(&self, account: AccountId, amount: u64) {
        *self
            .inner
            .lock()
            .unwrap()
            .wallet_stake
            .entry(account)
            .or_default() += amount;
    }

    pub fn mint_reward(&self, account: AccountId, amount: u64) {
        *self
            .inner
            .lock()
            .unwrap()
            .wallet_reward
            .entry(account)
            .or_default() += amount;
    }

    pub fn stake_balance(&self, account: AccountId) -> u64 {
        *self
            .inner
            .lock()
            .unwrap()
            .wallet_stake
            .get(&account)
            .unwrap_or(&0)
    }

    pub fn reward_balance(&self, account: AccountId) -> u64 {
        *self
            .inner
            .lock()
            .unwrap()
            .wallet_reward
            .get(&account)
            .unwrap_or(&0)
    }

    pub fn pool_stake_balance(&self, pool_id: PoolId) -> u64 {
        *self
            .inner
            .lock()
            .unwrap()
            .pool_stake
            .get(&pool_id)
            .unwrap_or(&0)
    }

    pub fn pool_reward_balance(&self, pool_id: PoolId) -> u64 {
        *self
            .inner
            .lock()
            .unwrap()
            .pool_reward
            .get(&pool_id)
            .unwrap_or(&0)
    }
}

impl Ledger for MemoryLedger {
    fn deposit_stake(
        &self,
        pool_id: PoolId,
        from: AccountId,
        amount: u64,
    ) -> Result<(), FarmError> {
        let mut inner = self.inner.lock().unwrap();
        debit(&mut inner.wallet_stake, from, amount)?;
        *inner.pool_stake.entry(pool_id).or_default() += amount;
        Ok(())
    }

    fn release_stake(&self, pool_id: PoolId, to: AccountId, amount: u64) -> Result<(), FarmError> {
        let mut inner = self.inner.lock().unwrap();
        let custody = inner.pool_stake.entry(pool_id).or_default();
        if *custody < amount {
            return Err(FarmError::InsufficientFunds {
                required: amount,
                available: *custody,
            });
        }
        *custody -= amount;
        *inner.wallet_stake.entry(to).or_default() += amount;
        Ok(())
    }

    fn deposit_reward(
        &self,
        pool_id: PoolId,
        from: AccountId,
        amount: u64,
    ) -> Result<(), FarmError> {
        let mut inner = self.inner.lock().unwrap();
        debit(&mut inner.wallet_reward, from, amount)?;
        *inner.pool_reward.entry(pool_id).or_default() += amount;
        Ok(())
    }

    fn pay_reward(&self, pool_id: PoolId, to: AccountId, amount: u64) -> Result<(), FarmError> {
        let mut inner = self.inner.lock().unwrap();
        let custody = inner.pool_reward.entry(pool_id).or_default();
        if *custody < amount {
            return Err(FarmError::InsufficientFunds {
                required: amount,
                available: *custody,
            });
        }
        *custody -= amount;
        *inner.wallet_reward.entry(to).or_default() += amount;
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Event sink double

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FarmEvent {
    Deposited {
        pool_id: PoolId,
        staker: AccountId,
        amount: u64,
        weight: u128,
        lock_duration: u64,
    },
    Withdrew {
        pool_id: PoolId,
        staker: AccountId,
        amount: u64,
    },
    EmergencyWithdrew {
        pool_id: PoolId,
        staker: AccountId,
        amount: u64,
    },
}

/// Event sink that records every notification for later assertions.
#[derive(Clone, Default)]
pub struct RecordingEvents {
    events: Arc<Mutex<Vec<FarmEvent>>>,
}

impl RecordingEvents {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn take(&self) -> Vec<FarmEvent> {
        std::mem::take(&mut self.events.lock().unwrap())
    }

    pub fn last(&self) -> Option<FarmEvent> {
        self.events.lock().unwrap().last().cloned()
    }
}

impl EventSink for RecordingEvents {
    fn deposited(
        &self,
        pool_id: PoolId,
        staker: AccountId,
        amount: u64,
        weight: u128,
        lock_duration: u64,
    ) {
        self.events.lock().unwrap().push(FarmEvent::Deposited {
            pool_id,
            staker,
            amount,
            weight,
            lock_duration,
        });
    }

    fn withdrew(&self, pool_id: PoolId, staker: AccountId, amount: u64) {
        self.events.lock().unwrap().push(FarmEvent::Withdrew {
            pool_id,
            staker,
            amount,
        });
    }

    fn emergency_withdrew(&self, pool_id: PoolId, staker: AccountId, amount: u64) {
        self.events
            .lock()
            .unwrap()
            .push(FarmEvent::EmergencyWithdrew {
                pool_id,
                staker,
                amount,
            });
    }
}

// ---------------------------------------------------------------------------
// Farm builders

pub struct TestFarm {
    pub farm: Farm<MemoryLedger, ManualClock, RecordingEvents>,
    pub ledger: MemoryLedger,
    pub clock: ManualClock,
    pub events: RecordingEvents,
}

pub fn setup_farm() -> TestFarm {
    init_logging();
    let ledger = MemoryLedger::new();
    let clock = ManualClock::new();
    let events = RecordingEvents::new();
    let farm = Farm::new(
        owner(),
        dev(),
        ledger.clone(),
        clock.clone(),
        events.clone(),
    );
    TestFarm {
        farm,
        ledger,
        clock,
        events,
    }
}

pub fn default_params() -> PoolParams {
    PoolParams {
        reward_total: 1_000_000,
        start_block: 0,
        end_block: 1000,
        min_locked_duration: TWO_WEEKS,
        dev_reward_share_bps: 3000,
    }
}

/// Creates and fully funds a pool with `params`, minting the reward to the
/// owner first.
pub fn funded_pool(t: &TestFarm, params: PoolParams) -> PoolId {
    let pool_id = t.farm.add_pool(owner(), params).expect("add_pool");
    t.ledger.mint_reward(owner(), params.reward_total);
    t.farm
        .deposit_pool_reward(pool_id, owner(), params.reward_total)
        .expect("deposit_pool_reward");
    pool_id
}

/// The weight the engine assigns to `(amount, lock_duration)`, spelled out
/// so tests do not depend on the crate's own math helper.
pub fn expected_weight(amount: u64, lock_duration: u64) -> u128 {
    let bonus = lock_duration as u128 * 1_000_000_000 / 31_536_000;
    amount as u128 * (bonus + 1_000_000_000)
}

/// Asserts the accounting invariants over the listed accounts, which must
/// cover every account that ever touched the pool.
pub fn assert_invariants(t: &TestFarm, pool_id: PoolId, accounts: &[AccountId]) {
    let pool = t.farm.pool_info(pool_id).expect("pool_info");

    // Conservation: reward value neither vanishes nor is created.
    assert_eq!(
        pool.reward_distributed + pool.reward_balance,
        pool.reward_deposited,
        "reward conservation violated"
    );
    assert_eq!(
        t.ledger.pool_reward_balance(pool_id),
        pool.reward_balance,
        "reward custody mirror out of sync"
    );
    assert_eq!(
        t.ledger.pool_stake_balance(pool_id),
        pool.staked_balance,
        "stake custody mirror out of sync"
    );

    let mut staked_sum: u64 = 0;
    let mut weight_sum: u128 = 0;
    for &acct in accounts {
        let user = t.farm.user_info(pool_id, acct).expect("user_info");
        let lot_weight_sum: u128 = user.lots.iter().map(|lot| lot.weight).sum();
        assert_eq!(
            user.staked_weight, lot_weight_sum,
            "user weight out of sync with lots"
        );
        let lot_amount_sum: u64 = user.lots.iter().map(|lot| lot.token_amount).sum();
        assert_eq!(
            user.staked_amount, lot_amount_sum,
            "user amount out of sync with lots"
        );
        staked_sum += user.staked_amount;
        weight_sum += user.staked_weight;
    }
    assert_eq!(staked_sum, pool.staked_balance, "staked amounts out of sync");
    assert_eq!(weight_sum, pool.total_weight, "total weight out of sync");
}

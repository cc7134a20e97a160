//! Pool State Types and Structures
//!
//! This module contains the core state structures for a farming pool: the
//! main [`PoolState`] aggregate plus the per-participant [`UserAccount`] and
//! [`StakeLot`] records it owns.

use std::collections::HashMap;

use borsh::{BorshDeserialize, BorshSerialize};

use crate::state::AccountId;

/// Main pool state containing all configuration and runtime accounting.
///
/// One `PoolState` exists per (stake-token, reward-token) pair. The struct
/// holds configuration fixed at creation, running custody mirrors, and the
/// reward accumulator; the transactional logic that mutates it lives in the
/// processor functions.
///
/// **Accounting invariants** (hold after every completed operation):
/// 1. `total_weight` equals the sum of every user's `staked_weight`, which in
///    turn equals the sum of that user's lot weights.
/// 2. The sum of every user's `staked_amount` equals `staked_balance`.
/// 3. `acc_reward_per_share` never decreases.
/// 4. `reward_distributed + reward_balance == reward_deposited`: reward
///    value is conserved, nothing vanishes or is created.
/// 5. A lot's weight is fully determined by its amount and lock duration via
///    the weight function; it is never set independently.
#[derive(BorshSerialize, BorshDeserialize, Debug, Default)]
pub struct PoolState {
    /// Stake tokens currently in custody, mirrored from the ledger.
    pub staked_balance: u64,

    /// Reward tokens currently in custody, mirrored from the ledger.
    pub reward_balance: u64,

    /// Total reward the pool will ever emit, fixed at creation.
    pub reward_total: u64,

    /// Reward funded so far. Transitions from 0 to `reward_total` exactly
    /// once; deposits are rejected until the transition completes.
    pub reward_deposited: u64,

    /// Reward paid out so far (stakers plus dev cut).
    pub reward_distributed: u64,

    /// First block of the emission window.
    pub start_block: u64,

    /// Last block of the emission window (exclusive of further emission).
    pub end_block: u64,

    /// Emission rate, `reward_total / (end_block - start_block)` by integer
    /// division at creation. The division remainder is permanently unemitted.
    pub reward_per_block: u64,

    /// Reward-per-unit-of-weight accumulator, scaled by
    /// [`ACC_MULTIPLIER`](crate::constants::ACC_MULTIPLIER).
    /// Monotonically non-decreasing; advanced only by the accrual engine.
    pub acc_reward_per_share: u128,

    /// Last block the accumulator was brought current to.
    pub last_reward_block: u64,

    /// Sum of all users' staked weight.
    pub total_weight: u128,

    /// Minimum lock duration this pool accepts, in seconds. Admin-adjustable
    /// but never below the global floor.
    pub min_locked_duration: u64,

    /// Admin-controlled escape hatch for principal recovery. Default false.
    pub allow_emergency_withdraw: bool,

    /// Basis points of each emission interval routed to the dev address
    /// before pool-wide distribution.
    pub dev_reward_share: u64,

    /// Per-participant accounts, created lazily on first deposit and never
    /// explicitly destroyed (an account may reach an all-zero state).
    pub user_accounts: HashMap<AccountId, UserAccount>,
}

impl PoolState {
    /// True once reward funding has completed and staking may begin.
    pub fn is_funded(&self) -> bool {
        self.reward_deposited == self.reward_total
    }

    /// True once the schedule has fully emitted; further accrual updates are
    /// no-ops.
    pub fn is_fully_emitted(&self) -> bool {
        self.last_reward_block == self.end_block
    }

    /// Read-only lookup of a participant's account.
    pub fn user(&self, account: &AccountId) -> Option<&UserAccount> {
        self.user_accounts.get(account)
    }
}

/// Per-participant state, owned by a [`PoolState`] and keyed by account
/// identity.
#[derive(BorshSerialize, BorshDeserialize, Debug, Default, Clone)]
pub struct UserAccount {
    /// Sum of token amounts across open lots.
    pub staked_amount: u64,

    /// Sum of weights across open lots. Always equals the sum of
    /// `deposits[i].weight`.
    pub staked_weight: u128,

    /// Reward already priced in at the last settlement, in accumulator
    /// units. Subtracting it from the accumulator-implied entitlement keeps
    /// reward accrued before the current weight existed from being paid
    /// twice.
    pub reward_debt: u128,

    /// Open lots in insertion order. Lot indices are stable until a full
    /// withdrawal removes an entry and shifts the ones after it.
    pub deposits: Vec<StakeLot>,
}

/// An individual locked-stake commitment. A user may hold several
/// concurrently, each with its own amount, weight and unlock time.
#[derive(BorshSerialize, BorshDeserialize, Debug, Default, Clone, PartialEq, Eq)]
pub struct StakeLot {
    pub token_amount: u64,
    pub weight: u128,
    pub locked_from: u64,
    pub locked_till: u64,
}

impl StakeLot {
    /// Lock duration the lot was committed for. Partial withdrawals reduce
    /// the amount but keep this duration, so the weight bonus is recomputed
    /// against it.
    pub fn lock_duration(&self) -> u64 {
        self.locked_till - self.locked_from
    }
}

//! # Time-Weighted Farming
//!
//! A reward-accounting engine for time-weighted yield farming: participants
//! lock a stake token for a chosen duration in exchange for a weight bonus,
//! and each pool emits a fixed total reward linearly over a configured block
//! range, distributed pro-rata to accumulated weight.
//!
//! The crate owns the accrual algorithm and the weighted stake/withdraw
//! state machine, including the fixed-point arithmetic that keeps per-share
//! accounting exact. Custody of value, the clock and downstream
//! notifications are integration seams (see [`collaborators`]); hosts plug
//! in real implementations, tests inject deterministic doubles.
//!
//! ```no_run
//! # use time_weighted_farming::*;
//! # fn demo<L: Ledger, C: Clock>(ledger: L, clock: C) -> Result<(), FarmError> {
//! let owner = AccountId::new([1; 32]);
//! let dev = AccountId::new([2; 32]);
//! let farm = Farm::new(owner, dev, ledger, clock, NullEventSink);
//!
//! let pool = farm.add_pool(
//!     owner,
//!     PoolParams {
//!         reward_total: 1_000_000,
//!         start_block: 0,
//!         end_block: 1000,
//!         min_locked_duration: 1_209_600,
//!         dev_reward_share_bps: 3000,
//!     },
//! )?;
//! farm.deposit_pool_reward(pool, owner, 1_000_000)?;
//!
//! let staker = AccountId::new([3; 32]);
//! farm.deposit(pool, staker, 1000, 1_209_600)?;
//! # Ok(()) }
//! ```

pub mod collaborators;
pub mod constants;
pub mod error;
pub mod farm;
pub mod processors;
pub mod state;
pub mod utils;

pub use collaborators::{Clock, EventSink, Ledger, NullEventSink};
pub use error::FarmError;
pub use farm::{DepositInfo, Farm, PoolInfo, UserInfo};
pub use processors::PoolParams;
pub use state::{AccountId, PoolId, PoolState, StakeLot, SystemState, UserAccount};

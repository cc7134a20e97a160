//! Processor Functions Module
//!
//! The transactional logic of the engine, grouped by concern. Processors
//! operate on a `&mut PoolState` the caller has already locked; the `Farm`
//! front end owns the locking and dispatch.

pub mod pool_creation;
pub mod pool_management;
pub mod rewards;
pub mod staking;

pub use pool_creation::{process_add_pool, process_deposit_pool_reward, PoolParams};
pub use pool_management::{
    process_change_dev, process_change_owner, process_set_allow_emergency_withdraw,
    process_set_min_locked_duration,
};
pub use rewards::{settle_pending, update_pool};
pub use staking::{process_deposit, process_emergency_withdraw, process_withdraw};

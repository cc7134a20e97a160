use thiserror::Error;

use crate::state::{AccountId, PoolId};

/// Error types for the time-weighted farming engine.
///
/// Every failure is detected before any state mutation, so an error return
/// always leaves the pool exactly as the caller found it. Variants carry the
/// offending values so callers can report the violated precondition without
/// re-reading pool state.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FarmError {
    /// Caller is not the registered owner for an admin-gated operation
    #[error("Insufficient permission: caller {caller} is not the registered owner")]
    InsufficientPermission { caller: AccountId },

    /// Emission schedule is empty or inverted at pool creation
    #[error("Invalid reward schedule: start block {start_block} must precede end block {end_block}")]
    RewardScheduleInvalid { start_block: u64, end_block: u64 },

    /// Lock duration outside the accepted range
    #[error("Invalid lock duration: {duration} is not between {min} and {max}")]
    LockDurationInvalid { duration: u64, min: u64, max: u64 },

    /// Dev reward share exceeds the basis-point divisor
    #[error("Invalid dev reward share: {share_bps} basis points exceeds {max_bps}")]
    DevShareInvalid { share_bps: u64, max_bps: u64 },

    /// Deposit attempted before the pool's reward funding completed
    #[error("Pool is not ready: reward funding has not completed")]
    PoolNotReady,

    /// Reward funding attempted on an already funded pool
    #[error("Pool reward has already been deposited")]
    RewardAlreadyDeposited,

    /// Reward funding amount does not match the pool's configured total
    #[error("Reward amount mismatch: expected {expected}, provided {provided}")]
    RewardAmountMismatch { expected: u64, provided: u64 },

    /// Lot index past the end of the user's deposit sequence
    #[error("Deposit index out of range: index {index}, {len} lots recorded")]
    DepositIndexOutOfRange { index: usize, len: usize },

    /// Withdrawal larger than the targeted lot
    #[error("Withdraw exceeds lot balance: requested {requested}, available {available}")]
    WithdrawExceedsLot { requested: u64, available: u64 },

    /// Lot is still locked
    #[error("Withdraw not unlocked: current time {now} is before unlock time {locked_till}")]
    WithdrawNotUnlocked { now: u64, locked_till: u64 },

    /// Emergency withdraw attempted while the pool flag is disabled
    #[error("Emergency withdraw is not allowed for this pool")]
    EmergencyNotAllowed,

    /// Zero-amount deposit
    #[error("Deposit amount must be greater than zero")]
    InvalidDepositAmount,

    /// Unknown pool id
    #[error("Pool {pool_id} does not exist")]
    PoolNotFound { pool_id: PoolId },

    /// Custody balance too small for the requested movement
    #[error("Insufficient funds: required {required}, available {available}")]
    InsufficientFunds { required: u64, available: u64 },

    /// Arithmetic overflow in checked math
    #[error("Arithmetic overflow")]
    ArithmeticOverflow,

    /// Accounting reached a state the invariants forbid. Fatal: the engine
    /// aborts the operation rather than clamping the bad value.
    #[error("Arithmetic invariant violation: {context}")]
    ArithmeticInvariantViolation { context: String },
}

impl FarmError {
    /// Returns a unique error code for each error variant.
    ///
    /// Error codes are used for programmatic error handling and provide a
    /// stable interface for client applications.
    pub fn error_code(&self) -> u32 {
        match self {
            FarmError::InsufficientPermission { .. } => 2001,
            FarmError::RewardScheduleInvalid { .. } => 2002,
            FarmError::LockDurationInvalid { .. } => 2003,
            FarmError::DevShareInvalid { .. } => 2004,
            FarmError::PoolNotReady => 2005,
            FarmError::RewardAlreadyDeposited => 2006,
            FarmError::RewardAmountMismatch { .. } => 2007,
            FarmError::DepositIndexOutOfRange { .. } => 2008,
            FarmError::WithdrawExceedsLot { .. } => 2009,
            FarmError::WithdrawNotUnlocked { .. } => 2010,
            FarmError::EmergencyNotAllowed => 2011,
            FarmError::InvalidDepositAmount => 2012,
            FarmError::PoolNotFound { .. } => 2013,
            FarmError::InsufficientFunds { .. } => 2014,
            FarmError::ArithmeticOverflow => 2019,
            FarmError::ArithmeticInvariantViolation { .. } => 2020,
        }
    }
}

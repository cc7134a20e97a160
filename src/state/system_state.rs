//! Farm-Level System State
//!
//! Authority registration shared by every pool: the owner who may run
//! admin-gated operations and the dev address that receives emission cuts.

use borsh::{BorshDeserialize, BorshSerialize};

use crate::state::AccountId;

/// Registered authorities for the farm.
#[derive(BorshSerialize, BorshDeserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct SystemState {
    /// Identity allowed to create pools and run admin operations.
    pub owner: AccountId,

    /// Destination of the per-pool dev reward cut.
    pub dev: AccountId,
}

impl SystemState {
    pub fn new(owner: AccountId, dev: AccountId) -> Self {
        SystemState { owner, dev }
    }
}

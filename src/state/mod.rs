//! State Management Module
//!
//! Identity types plus the pool aggregate that every operation reads and
//! mutates. All persistent structures are borsh-serializable so a host can
//! snapshot or ship pool state across a process boundary.

pub mod pool_state;
pub mod system_state;

pub use pool_state::{PoolState, StakeLot, UserAccount};
pub use system_state::SystemState;

use std::fmt;

use borsh::{BorshDeserialize, BorshSerialize};

/// Index of a pool inside the farm's pool table.
pub type PoolId = u64;

/// Opaque 32-byte account identity.
///
/// Keys the per-pool user map and names custody balances on the ledger
/// collaborator. The engine never interprets the bytes.
#[derive(
    BorshSerialize,
    BorshDeserialize,
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Default,
)]
pub struct AccountId(pub [u8; 32]);

impl AccountId {
    pub fn new(bytes: [u8; 32]) -> Self {
        AccountId(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }
}

impl From<[u8; 32]> for AccountId {
    fn from(bytes: [u8; 32]) -> Self {
        AccountId(bytes)
    }
}

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // First eight bytes are enough to tell accounts apart in logs.
        for byte in &self.0[..8] {
            write!(f, "{:02x}", byte)?;
        }
        Ok(())
    }
}

//! Utility Functions Module
//!
//! Shared math and validation helpers used by the processors.

pub mod math;
pub mod validation;

pub use math::{lot_weight, mul_div};

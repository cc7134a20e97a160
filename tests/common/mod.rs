//! Shared test infrastructure for the integration suite.

pub mod setup;

pub use setup::*;

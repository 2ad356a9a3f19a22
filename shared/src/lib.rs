//! Shared types for the POS workspace
//!
//! Domain models and order types used across crates, plus small
//! time utilities.

pub mod models;
pub mod order;
pub mod util;

// Re-exports
pub use serde::{Deserialize, Serialize};

//! Waiter Model

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Waiter entity
///
/// The PIN is stored as an argon2 hash; the clear PIN exists only in the
/// create payload and during login verification.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Waiter {
    pub id: Uuid,
    pub full_name: String,
    #[serde(skip_serializing)]
    pub pin_hash: String,
    pub is_active: bool,
    pub is_manager: bool,
}

/// Create waiter payload
#[derive(Debug, Clone, Deserialize)]
pub struct WaiterCreate {
    pub full_name: String,
    pub pin: String,
    pub is_manager: bool,
}

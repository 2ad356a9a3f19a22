//! Restaurant Table Model

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Table occupancy status
///
/// `Occupied` is derived state: it holds exactly while the table has one
/// open order. `Reserved` is set by managers/seed data, never by order
/// transitions.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TableStatus {
    #[default]
    Free,
    Occupied,
    Reserved,
}

/// Dining table entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RestaurantTable {
    pub id: Uuid,
    /// Unique positive table number shown to staff
    pub table_number: u32,
    pub status: TableStatus,
}

impl RestaurantTable {
    pub fn new(table_number: u32) -> Self {
        Self {
            id: Uuid::new_v4(),
            table_number,
            status: TableStatus::Free,
        }
    }

    pub fn is_free(&self) -> bool {
        self.status == TableStatus::Free
    }

    pub fn is_occupied(&self) -> bool {
        self.status == TableStatus::Occupied
    }
}

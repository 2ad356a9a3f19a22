//! Product Category Model

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Product category entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductCategory {
    pub id: Uuid,
    pub name: String,
    /// Sort key for menu screens, ascending
    pub display_order: i32,
}

/// Create category payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductCategoryCreate {
    pub name: String,
    pub display_order: Option<i32>,
}

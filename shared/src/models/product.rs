//! Product Model

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Product entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    /// Category reference
    pub category_id: Uuid,
    /// Price in minor currency units
    pub price: i64,
    pub is_available: bool,
    /// Id in the external recipe API this product was imported from
    pub external_source_id: Option<String>,
}

/// Create product payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductCreate {
    pub name: String,
    pub description: Option<String>,
    pub category_id: Uuid,
    pub price: i64,
    pub is_available: Option<bool>,
    pub external_source_id: Option<String>,
}

/// Update product payload
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProductUpdate {
    pub name: Option<String>,
    pub description: Option<String>,
    pub category_id: Option<Uuid>,
    pub price: Option<i64>,
    pub is_available: Option<bool>,
}

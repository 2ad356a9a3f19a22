//! Expense Model

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Expense entity (manager bookkeeping)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Expense {
    pub id: Uuid,
    pub description: String,
    /// Amount in minor currency units
    pub amount: i64,
    /// When the expense was incurred, unix millis
    pub date: i64,
}

/// Create expense payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExpenseCreate {
    pub description: String,
    pub amount: i64,
    pub date: Option<i64>,
}

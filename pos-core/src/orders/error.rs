use thiserror::Error;
use uuid::Uuid;

/// Ledger errors
///
/// All variants are recoverable at the calling layer; a failed operation
/// never leaves a partial update behind.
#[derive(Debug, Error)]
pub enum LedgerError {
    #[error("Table not found: {0}")]
    TableNotFound(Uuid),

    #[error("Order not found: {0}")]
    OrderNotFound(Uuid),

    #[error("Order item not found: {0}")]
    ItemNotFound(Uuid),

    #[error("Product not found: {0}")]
    ProductNotFound(Uuid),

    #[error("Product is not available: {0}")]
    ProductUnavailable(String),

    #[error("Order has no items: {0}")]
    EmptyOrder(Uuid),

    #[error("Invalid operation: {0}")]
    InvalidOperation(String),

    #[error("Invalid table state: {0}")]
    InvalidState(String),
}

pub type LedgerResult<T> = Result<T, LedgerError>;

//! Restaurant point-of-sale core
//!
//! Table/order lifecycle and line-item management, receipt rendering, and
//! the surrounding services (catalog, waiter sessions, expenses, recipe
//! import). Presentation and persistence layers live elsewhere; this crate
//! owns the invariants: table occupancy mirrors order state, totals are
//! always derived from the lines, and a line never survives at zero
//! quantity.

pub mod catalog;
pub mod config;
pub mod expenses;
pub mod orders;
pub mod projections;
pub mod receipt;
pub mod recipes;
pub mod seed;
pub mod session;
pub mod tables;
pub mod utils;

// Re-exports
pub use catalog::{Catalog, CatalogProvider, ProductInfo};
pub use config::PosConfig;
pub use orders::OrderLedger;
pub use orders::error::{LedgerError, LedgerResult};
pub use receipt::ReceiptRenderer;
pub use tables::TableRegistry;
pub use utils::error::{AppError, AppResult};

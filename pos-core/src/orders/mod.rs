//! OrderLedger - order state machine and line-item arithmetic
//!
//! Every waiter action is one short, independently committed unit of work:
//!
//! ```text
//! open_order_for_table / add_item / remove_item / cancel_order / close_order
//!     ├─ 1. Validate inputs (quantity, product availability)
//!     ├─ 2. Take the single write guard over (tables, orders, lines)
//!     ├─ 3. Validate order state (Open only for mutations)
//!     ├─ 4. Apply the pure line decision where one exists
//!     └─ 5. Update the (table status, order status) pair together
//! ```
//!
//! The write guard is the serialization boundary: concurrent terminals
//! racing on one table converge on the existing open order, and concurrent
//! adds of one product converge on one merged line.

pub mod error;
pub mod lines;


use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::RwLock;
use shared::models::RestaurantTable;
use shared::order::{Order, OrderItem, OrderStatus, PaymentMethod};
use shared::util::now_millis;
use tracing::{debug, info};
use uuid::Uuid;

use crate::catalog::CatalogProvider;
use crate::tables::TableRegistry;
use error::{LedgerError, LedgerResult};
use lines::RemovalOutcome;

/// Order ledger
///
/// Owns orders and their lines together with the table registry, so the
/// occupancy invariant (a table is Occupied iff it has exactly one open
/// order) can never be updated half-way.
pub struct OrderLedger {
    state: RwLock<LedgerState>,
    catalog: Arc<dyn CatalogProvider>,
}

struct LedgerState {
    registry: TableRegistry,
    orders: HashMap<Uuid, Order>,
    /// Lines per order; cancelled orders lose theirs, closed orders keep
    /// them as history
    items: HashMap<Uuid, Vec<OrderItem>>,
    /// Line id -> owning order id
    item_index: HashMap<Uuid, Uuid>,
}

impl std::fmt::Debug for OrderLedger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.state.read();
        f.debug_struct("OrderLedger")
            .field("tables", &state.registry.len())
            .field("orders", &state.orders.len())
            .field("catalog", &"<CatalogProvider>")
            .finish()
    }
}

impl OrderLedger {
    pub fn new(registry: TableRegistry, catalog: Arc<dyn CatalogProvider>) -> Self {
        Self {
            state: RwLock::new(LedgerState {
                registry,
                orders: HashMap::new(),
                items: HashMap::new(),
                item_index: HashMap::new(),
            }),
            catalog,
        }
    }

    // ========== Commands ==========

    /// Open an order for a table.
    ///
    /// Idempotent: when the table already has an open order it is returned
    /// as-is, which absorbs double-submission races from rapid UI clicks.
    /// Side effect: the table transitions to Occupied.
    pub fn open_order_for_table(&self, table_id: Uuid, waiter_id: Uuid) -> LedgerResult<Order> {
        let mut state = self.state.write();

        let table = state
            .registry
            .get(table_id)
            .ok_or(LedgerError::TableNotFound(table_id))?;
        let table_number = table.table_number;

        if let Some(existing) = state.find_open_order_for_table(table_id) {
            debug!(
                order_id = %existing.id,
                table = table_number,
                "Table already has an open order, returning it"
            );
            return Ok(existing.clone());
        }

        state.registry.mark_occupied(table_id)?;
        let order = Order::open(table_id, waiter_id, now_millis());
        state.items.insert(order.id, Vec::new());
        state.orders.insert(order.id, order.clone());

        info!(
            order_id = %order.id,
            table = table_number,
            waiter_id = %waiter_id,
            "Order opened"
        );
        Ok(order)
    }

    /// Add `quantity` units of a product to an open order.
    ///
    /// The unit price is read from the catalog exactly once, at the moment
    /// of this call, and snapshotted onto the line. An existing line for
    /// the same product absorbs the quantity instead of a second line
    /// appearing.
    pub fn add_item(
        &self,
        order_id: Uuid,
        product_id: Uuid,
        quantity: i32,
    ) -> LedgerResult<OrderItem> {
        if quantity <= 0 {
            return Err(LedgerError::InvalidOperation(
                "quantity must be positive".to_string(),
            ));
        }

        let product = self
            .catalog
            .product_info(product_id)
            .ok_or(LedgerError::ProductNotFound(product_id))?;
        if !product.is_available {
            return Err(LedgerError::ProductUnavailable(product.name));
        }

        let mut state = self.state.write();

        let order = state
            .orders
            .get(&order_id)
            .ok_or(LedgerError::OrderNotFound(order_id))?;
        Self::ensure_open(order, "add items to")?;

        let order_lines = state.items.entry(order_id).or_default();
        let line = lines::merge_or_create(order_lines, order_id, product_id, quantity, product.price);
        state.item_index.insert(line.id, order_id);

        debug!(
            order_id = %order_id,
            product = %product.name,
            added = quantity,
            line_quantity = line.quantity,
            "Item added"
        );
        Ok(line)
    }

    /// Remove one unit from a line; the line is deleted when its last unit
    /// goes. The order must still be open.
    pub fn remove_item(&self, order_item_id: Uuid) -> LedgerResult<RemovalOutcome> {
        let mut state = self.state.write();

        let order_id = *state
            .item_index
            .get(&order_item_id)
            .ok_or(LedgerError::ItemNotFound(order_item_id))?;
        let order = state
            .orders
            .get(&order_id)
            .ok_or(LedgerError::OrderNotFound(order_id))?;
        Self::ensure_open(order, "remove items from")?;

        let order_lines = state
            .items
            .get_mut(&order_id)
            .ok_or(LedgerError::ItemNotFound(order_item_id))?;
        let outcome = lines::decrement(order_lines, order_item_id, 1)
            .ok_or(LedgerError::ItemNotFound(order_item_id))?;

        if let RemovalOutcome::Deleted(id) = &outcome {
            state.item_index.remove(id);
            debug!(order_id = %order_id, item_id = %id, "Line deleted");
        }
        Ok(outcome)
    }

    /// Cancel an open order: discard all lines, free the table.
    /// Irreversible; nothing is priced or billed.
    pub fn cancel_order(&self, order_id: Uuid) -> LedgerResult<()> {
        let mut state = self.state.write();

        let order = state
            .orders
            .get(&order_id)
            .ok_or(LedgerError::OrderNotFound(order_id))?;
        Self::ensure_open(order, "cancel")?;
        let table_id = order.table_id;

        state.registry.mark_free(table_id)?;
        if let Some(discarded) = state.items.remove(&order_id) {
            for line in &discarded {
                state.item_index.remove(&line.id);
            }
        }
        let order = state
            .orders
            .get_mut(&order_id)
            .ok_or(LedgerError::OrderNotFound(order_id))?;
        order.status = OrderStatus::Cancelled;

        info!(order_id = %order_id, "Order cancelled, table freed");
        Ok(())
    }

    /// Close an open order with a payment method and free its table.
    ///
    /// Closing an empty order is rejected: the order stays Open and the
    /// table stays Occupied. Closed orders keep their lines as history.
    pub fn close_order(
        &self,
        order_id: Uuid,
        payment_method: PaymentMethod,
    ) -> LedgerResult<Order> {
        let mut state = self.state.write();

        let order = state
            .orders
            .get(&order_id)
            .ok_or(LedgerError::OrderNotFound(order_id))?;
        Self::ensure_open(order, "close")?;
        let table_id = order.table_id;

        let has_items = state.items.get(&order_id).is_some_and(|v| !v.is_empty());
        if !has_items {
            return Err(LedgerError::EmptyOrder(order_id));
        }

        state.registry.mark_free(table_id)?;
        let order = state
            .orders
            .get_mut(&order_id)
            .ok_or(LedgerError::OrderNotFound(order_id))?;
        order.status = OrderStatus::Closed;
        order.closed_at = Some(now_millis());
        order.payment_method = Some(payment_method);
        let closed = order.clone();

        let total: i64 = state
            .items
            .get(&order_id)
            .map(|v| v.iter().map(OrderItem::line_total).sum())
            .unwrap_or(0);
        info!(
            order_id = %order_id,
            payment = payment_method.as_str(),
            total,
            "Order closed, table freed"
        );
        Ok(closed)
    }

    // ========== Queries ==========

    /// The open order for a table, if any. Every read path uses this to
    /// decide between the "start order" and "view order" affordances.
    pub fn get_open_order_for_table(&self, table_id: Uuid) -> Option<Order> {
        let state = self.state.read();
        state.find_open_order_for_table(table_id).cloned()
    }

    pub fn get_order(&self, order_id: Uuid) -> LedgerResult<Order> {
        let state = self.state.read();
        state
            .orders
            .get(&order_id)
            .cloned()
            .ok_or(LedgerError::OrderNotFound(order_id))
    }

    pub fn items_for_order(&self, order_id: Uuid) -> Vec<OrderItem> {
        let state = self.state.read();
        state.items.get(&order_id).cloned().unwrap_or_default()
    }

    /// Sum of line totals, in minor currency units. Always derived, never
    /// stored.
    pub fn order_total(&self, order_id: Uuid) -> i64 {
        let state = self.state.read();
        state
            .items
            .get(&order_id)
            .map(|v| v.iter().map(OrderItem::line_total).sum())
            .unwrap_or(0)
    }

    /// All tables ordered by table number
    pub fn list_tables(&self) -> Vec<RestaurantTable> {
        self.state.read().registry.list()
    }

    pub fn get_table(&self, table_id: Uuid) -> LedgerResult<RestaurantTable> {
        let state = self.state.read();
        state
            .registry
            .get(table_id)
            .cloned()
            .ok_or(LedgerError::TableNotFound(table_id))
    }

    // ========== Internal ==========

    fn ensure_open(order: &Order, action: &str) -> LedgerResult<()> {
        match order.status {
            OrderStatus::Open => Ok(()),
            OrderStatus::Closed => Err(LedgerError::InvalidOperation(format!(
                "cannot {} order {}: order is closed",
                action, order.id
            ))),
            OrderStatus::Cancelled => Err(LedgerError::InvalidOperation(format!(
                "cannot {} order {}: order is cancelled",
                action, order.id
            ))),
        }
    }
}

impl LedgerState {
    fn find_open_order_for_table(&self, table_id: Uuid) -> Option<&Order> {
        self.orders
            .values()
            .find(|o| o.table_id == table_id && o.is_open())
    }
}

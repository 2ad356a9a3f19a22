//! Pure line-item decisions
//!
//! The merge-or-create and decrement rules are kept free of locking and
//! storage so they can be tested on plain vectors. The ledger applies them
//! inside its write guard.

use shared::order::OrderItem;
use uuid::Uuid;

/// Outcome of removing one unit from a line
#[derive(Debug, Clone, PartialEq)]
pub enum RemovalOutcome {
    /// Quantity went down; the updated line
    Reduced(OrderItem),
    /// The last unit was removed and the line was deleted
    Deleted(Uuid),
}

/// Add `quantity` of a product to an order's lines.
///
/// An order never holds two lines for the same product: an existing line
/// absorbs the quantity and keeps its original `unit_price` snapshot.
/// Otherwise a new line is created at `unit_price`. Returns the affected
/// line.
pub fn merge_or_create(
    lines: &mut Vec<OrderItem>,
    order_id: Uuid,
    product_id: Uuid,
    quantity: i32,
    unit_price: i64,
) -> OrderItem {
    debug_assert!(quantity > 0, "callers validate quantity before merging");

    if let Some(existing) = lines.iter_mut().find(|l| l.product_id == product_id) {
        existing.quantity += quantity;
        existing.clone()
    } else {
        let line = OrderItem::new(order_id, product_id, quantity, unit_price);
        lines.push(line.clone());
        line
    }
}

/// Remove `by` units from a line, deleting it when nothing remains.
///
/// `by` is clamped to at least one unit. Returns `None` when the line is
/// not present.
pub fn decrement(lines: &mut Vec<OrderItem>, item_id: Uuid, by: i32) -> Option<RemovalOutcome> {
    let idx = lines.iter().position(|l| l.id == item_id)?;

    lines[idx].quantity -= by.max(1);
    if lines[idx].quantity <= 0 {
        let removed = lines.remove(idx);
        Some(RemovalOutcome::Deleted(removed.id))
    } else {
        Some(RemovalOutcome::Reduced(lines[idx].clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids() -> (Uuid, Uuid) {
        (Uuid::new_v4(), Uuid::new_v4())
    }

    #[test]
    fn create_then_merge_same_product() {
        let (order_id, product_id) = ids();
        let mut lines = Vec::new();

        let first = merge_or_create(&mut lines, order_id, product_id, 2, 80);
        let merged = merge_or_create(&mut lines, order_id, product_id, 1, 80);

        assert_eq!(lines.len(), 1);
        assert_eq!(merged.id, first.id);
        assert_eq!(merged.quantity, 3);
        assert_eq!(merged.line_total(), 240);
    }

    #[test]
    fn different_products_get_separate_lines() {
        let (order_id, product_a) = ids();
        let product_b = Uuid::new_v4();
        let mut lines = Vec::new();

        merge_or_create(&mut lines, order_id, product_a, 1, 80);
        merge_or_create(&mut lines, order_id, product_b, 1, 220);

        assert_eq!(lines.len(), 2);
    }

    #[test]
    fn merge_keeps_original_price_snapshot() {
        let (order_id, product_id) = ids();
        let mut lines = Vec::new();

        merge_or_create(&mut lines, order_id, product_id, 1, 80);
        // Catalog price changed between adds; the line must not follow it.
        let merged = merge_or_create(&mut lines, order_id, product_id, 1, 95);

        assert_eq!(merged.unit_price, 80);
        assert_eq!(merged.line_total(), 160);
    }

    #[test]
    fn decrement_reduces_then_deletes() {
        let (order_id, product_id) = ids();
        let mut lines = Vec::new();
        let line = merge_or_create(&mut lines, order_id, product_id, 2, 50);

        match decrement(&mut lines, line.id, 1) {
            Some(RemovalOutcome::Reduced(item)) => assert_eq!(item.quantity, 1),
            other => panic!("expected Reduced, got {:?}", other),
        }
        match decrement(&mut lines, line.id, 1) {
            Some(RemovalOutcome::Deleted(id)) => assert_eq!(id, line.id),
            other => panic!("expected Deleted, got {:?}", other),
        }
        assert!(lines.is_empty());
    }

    #[test]
    fn decrement_clamps_to_one_unit() {
        let (order_id, product_id) = ids();
        let mut lines = Vec::new();
        let line = merge_or_create(&mut lines, order_id, product_id, 3, 50);

        // Zero and negative requests still remove exactly one unit.
        decrement(&mut lines, line.id, 0);
        decrement(&mut lines, line.id, -5);

        assert_eq!(lines[0].quantity, 1);
    }

    #[test]
    fn decrement_unknown_line_is_none() {
        let mut lines = Vec::new();
        assert_eq!(decrement(&mut lines, Uuid::new_v4(), 1), None);
    }
}

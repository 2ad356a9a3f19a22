//! Read models for the presentation boundary
//!
//! Pure projections of ledger and catalog queries; no logic lives here.

use serde::Serialize;
use shared::models::TableStatus;
use shared::order::OrderItem;
use uuid::Uuid;

use crate::catalog::Catalog;
use crate::orders::OrderLedger;
use crate::orders::error::LedgerResult;

/// One card in the tables grid
#[derive(Debug, Clone, Serialize)]
pub struct TableCard {
    pub table_id: Uuid,
    pub table_number: u32,
    pub status: TableStatus,
    pub has_open_order: bool,
    pub open_order_id: Option<Uuid>,
    /// Sum of line quantities on the open order
    pub items_count: i32,
    /// Sum of line totals on the open order, minor units
    pub running_total: i64,
}

/// One line in the order detail screen, with the product name resolved
#[derive(Debug, Clone, Serialize)]
pub struct OrderItemDisplay {
    pub order_item_id: Uuid,
    pub product_id: Uuid,
    pub product_name: String,
    pub quantity: i32,
    pub unit_price: i64,
    pub line_total: i64,
}

/// Order detail screen for one table
#[derive(Debug, Clone, Serialize)]
pub struct OrderDetails {
    pub table_id: Uuid,
    pub table_number: u32,
    /// None while the table shows the "start order" affordance
    pub order_id: Option<Uuid>,
    pub items: Vec<OrderItemDisplay>,
    pub total: i64,
}

/// Tables grid: one card per table, ordered by table number
pub fn table_cards(ledger: &OrderLedger) -> Vec<TableCard> {
    ledger
        .list_tables()
        .into_iter()
        .map(|table| {
            let open = ledger.get_open_order_for_table(table.id);
            let (items_count, running_total) = match &open {
                Some(order) => {
                    let items = ledger.items_for_order(order.id);
                    (
                        items.iter().map(|i| i.quantity).sum(),
                        items.iter().map(OrderItem::line_total).sum(),
                    )
                }
                None => (0, 0),
            };
            TableCard {
                table_id: table.id,
                table_number: table.table_number,
                status: table.status,
                has_open_order: open.is_some(),
                open_order_id: open.map(|o| o.id),
                items_count,
                running_total,
            }
        })
        .collect()
}

/// Order detail for a table, with product names resolved from the catalog
pub fn order_details(
    ledger: &OrderLedger,
    catalog: &Catalog,
    table_id: Uuid,
) -> LedgerResult<OrderDetails> {
    let table = ledger.get_table(table_id)?;
    let open = ledger.get_open_order_for_table(table_id);

    let mut details = OrderDetails {
        table_id: table.id,
        table_number: table.table_number,
        order_id: None,
        items: Vec::new(),
        total: 0,
    };

    if let Some(order) = open {
        details.order_id = Some(order.id);
        details.items = ledger
            .items_for_order(order.id)
            .into_iter()
            .map(|item| OrderItemDisplay {
                order_item_id: item.id,
                product_id: item.product_id,
                product_name: catalog
                    .get_product(item.product_id)
                    .map(|p| p.name)
                    .unwrap_or_else(|| "Unknown".to_string()),
                quantity: item.quantity,
                unit_price: item.unit_price,
                line_total: item.line_total(),
            })
            .collect();
        details.total = details.items.iter().map(|i| i.line_total).sum();
    }

    Ok(details)
}

//! Receipt renderer
//!
//! Renders a closed order into the fixed-width plain-text receipt that is
//! offered to the waiter as a downloadable file. The renderer does not
//! check order state itself; callers close the order first and hand the
//! result here.

use std::io;
use std::path::{Path, PathBuf};

use chrono_tz::Tz;
use shared::models::{RestaurantTable, Waiter};
use shared::order::{Order, OrderItem};
use uuid::Uuid;

/// Receipt renderer
///
/// Common widths: 32 characters for 58mm paper, 48 for 80mm.
pub struct ReceiptRenderer {
    width: usize,
    timezone: Tz,
    store_name: String,
    currency: String,
}

impl ReceiptRenderer {
    pub fn new(width: usize, timezone: Tz) -> Self {
        Self {
            width,
            timezone,
            store_name: "RestaurantPOS".to_string(),
            currency: "MKD".to_string(),
        }
    }

    pub fn with_store(mut self, store_name: impl Into<String>, currency: impl Into<String>) -> Self {
        self.store_name = store_name.into();
        self.currency = currency.into();
        self
    }

    /// Render a receipt to bytes.
    ///
    /// `product_name` resolves line product ids; unknown products print as
    /// "Unknown" rather than failing a finalized sale.
    pub fn render<F>(
        &self,
        order: &Order,
        table: &RestaurantTable,
        waiter: Option<&Waiter>,
        items: &[OrderItem],
        product_name: F,
    ) -> Vec<u8>
    where
        F: Fn(Uuid) -> Option<String>,
    {
        let mut out = String::new();

        self.render_header(&mut out, order, table, waiter);
        self.render_items(&mut out, items, &product_name);
        self.render_total(&mut out, items);

        out.into_bytes()
    }

    fn render_header(
        &self,
        out: &mut String,
        order: &Order,
        table: &RestaurantTable,
        waiter: Option<&Waiter>,
    ) {
        out.push_str(&format!("{} Receipt\n", self.store_name));
        self.divider(out);

        out.push_str(&format!("Table: {}\n", table.table_number));
        let waiter_name = waiter.map(|w| w.full_name.as_str()).unwrap_or("N/A");
        out.push_str(&format!("Waiter: {}\n", waiter_name));

        out.push_str(&format!(
            "Opened: {}\n",
            format_timestamp(order.opened_at, self.timezone)
        ));
        if let Some(closed_at) = order.closed_at {
            out.push_str(&format!(
                "Closed: {}\n",
                format_timestamp(closed_at, self.timezone)
            ));
        }
        out.push_str(&format!("Status: {:?}\n", order.status));
        let payment = order
            .payment_method
            .map(|m| m.as_str())
            .unwrap_or("N/A");
        out.push_str(&format!("Payment: {}\n", payment));

        self.divider(out);
    }

    fn render_items<F>(&self, out: &mut String, items: &[OrderItem], product_name: &F)
    where
        F: Fn(Uuid) -> Option<String>,
    {
        for item in items {
            let name = product_name(item.product_id).unwrap_or_else(|| "Unknown".to_string());
            out.push_str(&format!("{}\n", name));
            out.push_str(&format!(
                "  {} x {} {} = {} {}\n",
                item.quantity,
                item.unit_price,
                self.currency,
                item.line_total(),
                self.currency
            ));
        }
        self.divider(out);
    }

    fn render_total(&self, out: &mut String, items: &[OrderItem]) {
        let total: i64 = items.iter().map(OrderItem::line_total).sum();
        out.push_str(&format!("TOTAL: {} {}\n", total, self.currency));
        self.divider(out);
    }

    fn divider(&self, out: &mut String) {
        out.push_str(&"-".repeat(self.width));
        out.push('\n');
    }
}

impl Default for ReceiptRenderer {
    fn default() -> Self {
        Self::new(32, chrono_tz::Europe::Skopje)
    }
}

/// Download file name for a receipt: `receipt_table_<number>_<timestamp>.txt`
///
/// This naming is an external contract; presentation layers serve the bytes
/// under exactly this name.
pub fn receipt_filename(table_number: u32, closed_at: i64, timezone: Tz) -> String {
    let stamp = chrono::DateTime::from_timestamp_millis(closed_at)
        .map(|dt| dt.with_timezone(&timezone).format("%Y%m%d_%H%M").to_string())
        .unwrap_or_else(|| "00000000_0000".to_string());
    format!("receipt_table_{}_{}.txt", table_number, stamp)
}

/// Persist receipt bytes under `dir`, creating the directory if needed
pub fn write_receipt(dir: &Path, filename: &str, bytes: &[u8]) -> io::Result<PathBuf> {
    std::fs::create_dir_all(dir)?;
    let path = dir.join(filename);
    std::fs::write(&path, bytes)?;
    Ok(path)
}

/// Format unix millis as `YYYY-MM-DD HH:MM` in the given timezone
fn format_timestamp(ts: i64, tz: Tz) -> String {
    if let Some(dt) = chrono::DateTime::from_timestamp_millis(ts) {
        dt.with_timezone(&tz).format("%Y-%m-%d %H:%M").to_string()
    } else {
        "N/A".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::order::{OrderStatus, PaymentMethod};

    // 2023-11-14 22:13:20 UTC, 23:13 in Skopje (CET)
    const CLOSED_AT: i64 = 1_700_000_000_000;

    fn closed_order_fixture() -> (Order, RestaurantTable, Waiter, Vec<OrderItem>) {
        let table = RestaurantTable::new(5);

        let waiter = Waiter {
            id: Uuid::new_v4(),
            full_name: "Main Waiter".to_string(),
            pin_hash: String::new(),
            is_active: true,
            is_manager: false,
        };

        let mut order = Order::open(table.id, waiter.id, CLOSED_AT - 3_600_000);
        order.status = OrderStatus::Closed;
        order.closed_at = Some(CLOSED_AT);
        order.payment_method = Some(PaymentMethod::Cash);

        let cola = OrderItem::new(order.id, Uuid::new_v4(), 3, 80);
        (order, table, waiter, vec![cola])
    }

    #[test]
    fn renders_full_receipt() {
        let (order, table, waiter, items) = closed_order_fixture();
        let cola_id = items[0].product_id;

        let renderer = ReceiptRenderer::default();
        let bytes = renderer.render(&order, &table, Some(&waiter), &items, |id| {
            (id == cola_id).then(|| "Coca-Cola".to_string())
        });
        let text = String::from_utf8(bytes).unwrap();

        assert!(text.starts_with("RestaurantPOS Receipt\n"));
        assert!(text.contains("Table: 5\n"));
        assert!(text.contains("Waiter: Main Waiter\n"));
        assert!(text.contains("Closed: 2023-11-14 23:13\n"));
        assert!(text.contains("Status: Closed\n"));
        assert!(text.contains("Payment: Cash\n"));
        assert!(text.contains("Coca-Cola\n  3 x 80 MKD = 240 MKD\n"));
        assert!(text.contains("TOTAL: 240 MKD\n"));
        assert_eq!(text.matches(&"-".repeat(32)).count(), 4);
    }

    #[test]
    fn unknown_product_renders_as_unknown() {
        let (order, table, _, items) = closed_order_fixture();
        let renderer = ReceiptRenderer::default();
        let bytes = renderer.render(&order, &table, None, &items, |_| None);
        let text = String::from_utf8(bytes).unwrap();

        assert!(text.contains("Unknown\n"));
        assert!(text.contains("Waiter: N/A\n"));
    }

    #[test]
    fn filename_contract() {
        let name = receipt_filename(5, CLOSED_AT, chrono_tz::Europe::Skopje);
        assert_eq!(name, "receipt_table_5_20231114_2313.txt");
    }
}

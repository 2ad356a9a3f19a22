//! End-to-end POS flow against seeded data: PIN login, table service,
//! close with receipt artifact on disk.

use std::sync::Arc;

use pos_core::catalog::{Catalog, CatalogProvider};
use pos_core::orders::OrderLedger;
use pos_core::projections;
use pos_core::receipt::{self, ReceiptRenderer};
use pos_core::seed;
use pos_core::session::{LoginMode, Session, WaiterDirectory};
use pos_core::session::PosSession;
use shared::models::TableStatus;
use shared::order::PaymentMethod;
use uuid::Uuid;

struct Pos {
    ledger: OrderLedger,
    catalog: Arc<Catalog>,
    directory: WaiterDirectory,
}

fn seeded_pos() -> Pos {
    let catalog = Arc::new(Catalog::new());
    seed::seed_catalog(&catalog).unwrap();

    let directory = WaiterDirectory::new();
    seed::seed_waiters(&directory).unwrap();

    let provider: Arc<dyn CatalogProvider> = catalog.clone();
    Pos {
        ledger: OrderLedger::new(seed::seed_tables(), provider),
        catalog,
        directory,
    }
}

fn table_by_number(pos: &Pos, number: u32) -> Uuid {
    pos.ledger
        .list_tables()
        .into_iter()
        .find(|t| t.table_number == number)
        .map(|t| t.id)
        .unwrap()
}

fn product_by_name(pos: &Pos, name: &str) -> Uuid {
    pos.catalog
        .list_products()
        .into_iter()
        .find(|p| p.name == name)
        .map(|p| p.id)
        .unwrap()
}

#[test]
fn full_table_service_flow() {
    let pos = seeded_pos();

    // Waiter logs in with the seeded PIN.
    let session = Session::login(&pos.directory, seed::MAIN_WAITER_PIN, LoginMode::Waiter).unwrap();
    let waiter_id = session.require_waiter().unwrap();

    // Open table 5 and ring up three colas as 2 + 1.
    let table_id = table_by_number(&pos, 5);
    let order = pos.ledger.open_order_for_table(table_id, waiter_id).unwrap();
    let cola = product_by_name(&pos, "Coca-Cola");
    pos.ledger.add_item(order.id, cola, 2).unwrap();
    pos.ledger.add_item(order.id, cola, 1).unwrap();

    // The grid shows table 5 occupied with a running total.
    let cards = projections::table_cards(&pos.ledger);
    let card = cards.iter().find(|c| c.table_number == 5).unwrap();
    assert_eq!(card.status, TableStatus::Occupied);
    assert_eq!(card.items_count, 3);
    assert_eq!(card.running_total, 240);

    // The detail screen shows one merged line.
    let details = projections::order_details(&pos.ledger, &pos.catalog, table_id).unwrap();
    assert_eq!(details.items.len(), 1);
    assert_eq!(details.items[0].product_name, "Coca-Cola");
    assert_eq!(details.total, 240);

    // Close with cash and render the receipt.
    let closed = pos.ledger.close_order(order.id, PaymentMethod::Cash).unwrap();
    let table = pos.ledger.get_table(table_id).unwrap();
    assert_eq!(table.status, TableStatus::Free);

    let waiter = pos.directory.get(waiter_id);
    let items = pos.ledger.items_for_order(order.id);
    let renderer = ReceiptRenderer::default();
    let bytes = renderer.render(&closed, &table, waiter.as_ref(), &items, |id| {
        pos.catalog.get_product(id).map(|p| p.name)
    });
    let text = String::from_utf8(bytes.clone()).unwrap();
    assert!(text.contains("Table: 5"));
    assert!(text.contains("Waiter: Main Waiter"));
    assert!(text.contains("TOTAL: 240 MKD"));

    // The artifact lands on disk under the contract file name.
    let filename = receipt::receipt_filename(
        table.table_number,
        closed.closed_at.unwrap(),
        chrono_tz::Europe::Skopje,
    );
    assert!(filename.starts_with("receipt_table_5_"));
    assert!(filename.ends_with(".txt"));

    let dir = tempfile::tempdir().unwrap();
    let path = receipt::write_receipt(dir.path(), &filename, &bytes).unwrap();
    let on_disk = std::fs::read_to_string(path).unwrap();
    assert_eq!(on_disk, text);
}

#[test]
fn abandoned_order_frees_the_table() {
    let pos = seeded_pos();
    let session = Session::login(&pos.directory, seed::MAIN_WAITER_PIN, LoginMode::Waiter).unwrap();
    let waiter_id = session.current_waiter().unwrap();

    let table_id = table_by_number(&pos, 7);
    let order = pos.ledger.open_order_for_table(table_id, waiter_id).unwrap();
    let burger = product_by_name(&pos, "Cheeseburger");
    pos.ledger.add_item(order.id, burger, 2).unwrap();

    pos.ledger.cancel_order(order.id).unwrap();

    assert!(pos.ledger.get_open_order_for_table(table_id).is_none());
    let card = projections::table_cards(&pos.ledger)
        .into_iter()
        .find(|c| c.table_number == 7)
        .unwrap();
    assert_eq!(card.status, TableStatus::Free);
    assert!(!card.has_open_order);
    assert_eq!(card.running_total, 0);
}

#[test]
fn anonymous_terminal_cannot_open_orders() {
    let pos = seeded_pos();
    let session = Session::anonymous();

    // The boundary rejects before the ledger is ever involved.
    assert!(session.require_waiter().is_err());

    // All tables stay free.
    assert!(pos.ledger.list_tables().iter().all(|t| t.is_free()));
}

//! Scripted service demo: seeds the demo data, serves a table end to end,
//! and writes the receipt file.
//!
//! ```bash
//! cargo run --example pos_demo
//! # pull live meal suggestions from TheMealDB into the catalog first:
//! POS_DEMO_FETCH_MEALS=1 cargo run --example pos_demo
//! ```

use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use pos_core::catalog::{Catalog, CatalogProvider};
use pos_core::orders::OrderLedger;
use pos_core::projections;
use pos_core::receipt::{self, ReceiptRenderer};
use pos_core::recipes::RecipeClient;
use pos_core::seed;
use pos_core::session::{LoginMode, PosSession, Session, WaiterDirectory};
use pos_core::utils::logger;
use pos_core::PosConfig;
use shared::order::PaymentMethod;
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();
    let config = PosConfig::from_env();
    logger::init_logger_with_file(Some(&config.log_level), None);

    // Seed catalog, staff and floor.
    let catalog = Arc::new(Catalog::new());
    seed::seed_catalog(&catalog)?;
    let directory = WaiterDirectory::new();
    seed::seed_waiters(&directory)?;
    let provider: Arc<dyn CatalogProvider> = catalog.clone();
    let ledger = OrderLedger::new(seed::seed_tables(), provider);

    // Optionally enrich the menu from the recipe API.
    if std::env::var("POS_DEMO_FETCH_MEALS").is_ok() {
        let client = RecipeClient::with_base_url(config.meal_api_base_url.as_str());
        match client.random_meals(3).await {
            Ok(meals) => {
                for meal in &meals {
                    match catalog.import_meal(meal) {
                        Ok(product) => info!(product = %product.name, "Imported meal"),
                        Err(e) => info!(error = %e, "Skipped meal import"),
                    }
                }
            }
            Err(e) => info!(error = %e, "Recipe API unavailable, continuing with seed menu"),
        }
    }

    // Waiter signs in and serves table 5.
    let session = Session::login(&directory, seed::MAIN_WAITER_PIN, LoginMode::Waiter)?;
    let waiter_id = session
        .current_waiter()
        .context("session has no waiter after login")?;

    let table = ledger
        .list_tables()
        .into_iter()
        .find(|t| t.table_number == 5)
        .context("seeded table 5 missing")?;
    let order = ledger.open_order_for_table(table.id, waiter_id)?;

    let cola = catalog
        .list_products()
        .into_iter()
        .find(|p| p.name == "Coca-Cola")
        .context("seeded product missing")?;
    ledger.add_item(order.id, cola.id, 2)?;
    ledger.add_item(order.id, cola.id, 1)?;

    let details = projections::order_details(&ledger, &catalog, table.id)?;
    info!(
        table = details.table_number,
        lines = details.items.len(),
        total = details.total,
        "Order in progress"
    );

    // Pay cash, print the receipt.
    let closed = ledger.close_order(order.id, PaymentMethod::Cash)?;
    let items = ledger.items_for_order(order.id);
    let renderer =
        ReceiptRenderer::new(32, config.timezone).with_store(&config.store_name, &config.currency);
    let bytes = renderer.render(
        &closed,
        &ledger.get_table(table.id)?,
        directory.get(waiter_id).as_ref(),
        &items,
        |id| catalog.get_product(id).map(|p| p.name),
    );

    let closed_at = closed.closed_at.context("closed order missing timestamp")?;
    let filename = receipt::receipt_filename(table.table_number, closed_at, config.timezone);
    let path = receipt::write_receipt(Path::new(&config.receipt_dir), &filename, &bytes)?;

    println!("{}", String::from_utf8_lossy(&bytes));
    info!(path = %path.display(), "Receipt written");
    Ok(())
}

//! Demo/boot data
//!
//! Deterministic starter data for fresh installs: one waiter and one
//! manager, fifteen free tables, and a small menu with MKD prices.

use shared::models::{ProductCategoryCreate, ProductCreate, RestaurantTable, WaiterCreate};
use tracing::info;

use crate::catalog::Catalog;
use crate::session::WaiterDirectory;
use crate::tables::TableRegistry;
use crate::utils::error::AppResult;

pub const MAIN_WAITER_NAME: &str = "Main Waiter";
pub const MAIN_WAITER_PIN: &str = "1111";
pub const MANAGER_NAME: &str = "Manager";
pub const MANAGER_PIN: &str = "9999";

const TABLE_COUNT: u32 = 15;

/// Fifteen free tables numbered 1..=15
pub fn seed_tables() -> TableRegistry {
    let mut registry = TableRegistry::new();
    for number in 1..=TABLE_COUNT {
        registry.insert(RestaurantTable::new(number));
    }
    registry
}

/// One waiter (PIN 1111) and one manager (PIN 9999)
pub fn seed_waiters(directory: &WaiterDirectory) -> AppResult<()> {
    directory.create(WaiterCreate {
        full_name: MAIN_WAITER_NAME.to_string(),
        pin: MAIN_WAITER_PIN.to_string(),
        is_manager: false,
    })?;
    directory.create(WaiterCreate {
        full_name: MANAGER_NAME.to_string(),
        pin: MANAGER_PIN.to_string(),
        is_manager: true,
    })?;
    Ok(())
}

/// Starter categories and products
pub fn seed_catalog(catalog: &Catalog) -> AppResult<()> {
    let categories = [
        ("Drinks", 1),
        ("Food", 2),
        ("Desserts", 3),
        ("Coffee", 4),
    ];
    for (name, display_order) in categories {
        catalog.create_category(ProductCategoryCreate {
            name: name.to_string(),
            display_order: Some(display_order),
        })?;
    }

    let seeded = catalog.list_categories();
    let category_id = |name: &str| {
        seeded
            .iter()
            .find(|c| c.name == name)
            .map(|c| c.id)
            .ok_or_else(|| crate::utils::error::AppError::internal(format!("missing seeded category '{name}'")))
    };

    let products = [
        // Drinks
        ("Coca-Cola", "Drinks", 80),
        ("Fanta", "Drinks", 80),
        ("Water", "Drinks", 50),
        // Coffee
        ("Espresso", "Coffee", 70),
        ("Cappuccino", "Coffee", 90),
        // Food
        ("Chicken Burger", "Food", 220),
        ("Cheeseburger", "Food", 240),
        ("Greek Salad", "Food", 180),
        // Desserts
        ("Cheesecake", "Desserts", 150),
        ("Chocolate Cake", "Desserts", 160),
    ];
    for (name, category, price) in products {
        catalog.create_product(ProductCreate {
            name: name.to_string(),
            description: None,
            category_id: category_id(category)?,
            price,
            is_available: Some(true),
            external_source_id: None,
        })?;
    }

    info!(
        categories = categories.len(),
        products = products.len(),
        "Catalog seeded"
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tables_are_numbered_and_free() {
        let registry = seed_tables();
        let tables = registry.list();
        assert_eq!(tables.len(), 15);
        assert_eq!(tables[0].table_number, 1);
        assert_eq!(tables[14].table_number, 15);
        assert!(tables.iter().all(|t| t.is_free()));
    }

    #[test]
    fn seeded_menu_has_original_prices() {
        let catalog = Catalog::new();
        seed_catalog(&catalog).unwrap();

        let products = catalog.list_products();
        assert_eq!(products.len(), 10);
        let cola = products.iter().find(|p| p.name == "Coca-Cola").unwrap();
        assert_eq!(cola.price, 80);
        let cheesecake = products.iter().find(|p| p.name == "Cheesecake").unwrap();
        assert_eq!(cheesecake.price, 150);
    }

    #[test]
    fn seeded_pins_log_in() {
        let directory = WaiterDirectory::new();
        seed_waiters(&directory).unwrap();

        assert!(directory.login_with_pin(MAIN_WAITER_PIN).is_some());
        let manager = directory.login_manager_with_pin(MANAGER_PIN).unwrap();
        assert!(manager.is_manager);
    }
}

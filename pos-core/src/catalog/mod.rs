//! Catalog - product and category management
//!
//! In-memory service behind one lock; implements the [`CatalogProvider`]
//! seam the order ledger prices items through. Also the landing point for
//! recipe-API imports.

use std::collections::HashMap;

use parking_lot::RwLock;
use shared::models::{Product, ProductCategory, ProductCategoryCreate, ProductCreate, ProductUpdate};
use tracing::info;
use uuid::Uuid;

use crate::recipes::ExternalMeal;
use crate::utils::error::{AppError, AppResult};

/// Price assigned to imported meals; managers edit it afterwards
pub const DEFAULT_IMPORT_PRICE: i64 = 250;

/// Name/price/availability snapshot for one product
#[derive(Debug, Clone)]
pub struct ProductInfo {
    pub name: String,
    /// Minor currency units
    pub price: i64,
    pub is_available: bool,
}

/// Price and availability lookups consumed by the order ledger.
///
/// Called exactly once per add-item so the returned price is a snapshot of
/// the moment of the call.
pub trait CatalogProvider: Send + Sync {
    fn product_info(&self, product_id: Uuid) -> Option<ProductInfo>;
}

/// Product and category store
#[derive(Debug, Default)]
pub struct Catalog {
    inner: RwLock<CatalogInner>,
}

#[derive(Debug, Default)]
struct CatalogInner {
    products: HashMap<Uuid, Product>,
    categories: HashMap<Uuid, ProductCategory>,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    // ========== Categories ==========

    pub fn create_category(&self, payload: ProductCategoryCreate) -> AppResult<ProductCategory> {
        let name = payload.name.trim().to_string();
        if name.is_empty() {
            return Err(AppError::validation("category name must not be empty"));
        }

        let mut inner = self.inner.write();
        if inner
            .categories
            .values()
            .any(|c| c.name.eq_ignore_ascii_case(&name))
        {
            return Err(AppError::conflict(format!("category '{}' already exists", name)));
        }

        let category = ProductCategory {
            id: Uuid::new_v4(),
            name,
            display_order: payload.display_order.unwrap_or(999),
        };
        inner.categories.insert(category.id, category.clone());
        Ok(category)
    }

    /// Find a category by name (case-insensitive) or create it at the end
    /// of the menu. Used by the recipe import flow.
    pub fn ensure_category(&self, name: &str) -> ProductCategory {
        let name = name.trim();
        let name = if name.is_empty() { "Food" } else { name };

        {
            let inner = self.inner.read();
            if let Some(existing) = inner
                .categories
                .values()
                .find(|c| c.name.eq_ignore_ascii_case(name))
            {
                return existing.clone();
            }
        }

        let mut inner = self.inner.write();
        // Re-check under the write lock; another caller may have won.
        if let Some(existing) = inner
            .categories
            .values()
            .find(|c| c.name.eq_ignore_ascii_case(name))
        {
            return existing.clone();
        }
        let category = ProductCategory {
            id: Uuid::new_v4(),
            name: name.to_string(),
            display_order: 999,
        };
        inner.categories.insert(category.id, category.clone());
        category
    }

    /// Categories ordered for menu screens
    pub fn list_categories(&self) -> Vec<ProductCategory> {
        let inner = self.inner.read();
        let mut categories: Vec<_> = inner.categories.values().cloned().collect();
        categories.sort_by(|a, b| {
            a.display_order
                .cmp(&b.display_order)
                .then_with(|| a.name.cmp(&b.name))
        });
        categories
    }

    // ========== Products ==========

    pub fn create_product(&self, payload: ProductCreate) -> AppResult<Product> {
        let name = payload.name.trim().to_string();
        if name.is_empty() {
            return Err(AppError::validation("product name must not be empty"));
        }
        if payload.price < 0 {
            return Err(AppError::validation("product price must not be negative"));
        }

        let mut inner = self.inner.write();
        if !inner.categories.contains_key(&payload.category_id) {
            return Err(AppError::not_found(format!(
                "category {}",
                payload.category_id
            )));
        }

        let product = Product {
            id: Uuid::new_v4(),
            name,
            description: payload.description,
            category_id: payload.category_id,
            price: payload.price,
            is_available: payload.is_available.unwrap_or(true),
            external_source_id: payload.external_source_id,
        };
        inner.products.insert(product.id, product.clone());
        Ok(product)
    }

    pub fn update_product(&self, id: Uuid, update: ProductUpdate) -> AppResult<Product> {
        let mut inner = self.inner.write();
        if let Some(category_id) = update.category_id
            && !inner.categories.contains_key(&category_id)
        {
            return Err(AppError::not_found(format!("category {}", category_id)));
        }

        let product = inner
            .products
            .get_mut(&id)
            .ok_or_else(|| AppError::not_found(format!("product {}", id)))?;

        if let Some(name) = update.name {
            let name = name.trim().to_string();
            if name.is_empty() {
                return Err(AppError::validation("product name must not be empty"));
            }
            product.name = name;
        }
        if let Some(description) = update.description {
            product.description = Some(description);
        }
        if let Some(category_id) = update.category_id {
            product.category_id = category_id;
        }
        if let Some(price) = update.price {
            if price < 0 {
                return Err(AppError::validation("product price must not be negative"));
            }
            product.price = price;
        }
        if let Some(is_available) = update.is_available {
            product.is_available = is_available;
        }
        Ok(product.clone())
    }

    pub fn get_product(&self, id: Uuid) -> Option<Product> {
        self.inner.read().products.get(&id).cloned()
    }

    pub fn list_products(&self) -> Vec<Product> {
        let inner = self.inner.read();
        let mut products: Vec<_> = inner.products.values().cloned().collect();
        products.sort_by(|a, b| a.name.cmp(&b.name));
        products
    }

    /// Products offered on POS screens
    pub fn list_available(&self) -> Vec<Product> {
        self.list_products()
            .into_iter()
            .filter(|p| p.is_available)
            .collect()
    }

    // ========== Recipe import ==========

    pub fn is_imported(&self, external_id: &str) -> bool {
        let inner = self.inner.read();
        inner
            .products
            .values()
            .any(|p| p.external_source_id.as_deref() == Some(external_id))
    }

    /// Import an external meal as a product.
    ///
    /// The meal's category is ensured by name; the price defaults to
    /// [`DEFAULT_IMPORT_PRICE`]. Importing the same meal twice is a
    /// conflict.
    pub fn import_meal(&self, meal: &ExternalMeal) -> AppResult<Product> {
        if self.is_imported(&meal.external_id) {
            return Err(AppError::conflict(format!(
                "meal '{}' is already imported",
                meal.name
            )));
        }

        let category = self.ensure_category(meal.category.as_deref().unwrap_or("Food"));
        let product = self.create_product(ProductCreate {
            name: meal.name.clone(),
            description: meal.description.clone(),
            category_id: category.id,
            price: DEFAULT_IMPORT_PRICE,
            is_available: Some(true),
            external_source_id: Some(meal.external_id.clone()),
        })?;

        info!(product = %product.name, category = %category.name, "Imported meal from recipe API");
        Ok(product)
    }
}

impl CatalogProvider for Catalog {
    fn product_info(&self, product_id: Uuid) -> Option<ProductInfo> {
        let inner = self.inner.read();
        inner.products.get(&product_id).map(|p| ProductInfo {
            name: p.name.clone(),
            price: p.price,
            is_available: p.is_available,
        })
    }
}

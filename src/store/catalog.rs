//! The locked product collection.
//!
//! # Responsibilities
//! - Own the ordered product sequence for the lifetime of the process
//! - Assign ids on create
//! - Run every read-modify-write under a single lock acquisition
//!
//! # Design Decisions
//! - `std::sync::Mutex`: critical sections are short and never await
//! - New ids exceed both the current maximum and every id ever assigned, so
//!   deleting the newest product does not free its id for reuse

use std::sync::{Mutex, MutexGuard, PoisonError};

use crate::observability::metrics;
use crate::store::error::StoreError;
use crate::store::product::{NewProduct, Product, ProductId, ProductPatch};

/// Products loaded at startup.
pub fn seed_products() -> Vec<Product> {
    vec![
        Product::new(1, "Laptop", 50000.0),
        Product::new(2, "Phone", 30000.0),
        Product::new(3, "Headphones", 5000.0),
    ]
}

struct Catalog {
    products: Vec<Product>,
    /// Highest id ever handed out (or seeded).
    high_water: ProductId,
}

/// Thread-safe in-memory product collection.
pub struct ProductStore {
    inner: Mutex<Catalog>,
}

impl ProductStore {
    /// Create a store holding `products` in the given order.
    pub fn new(products: Vec<Product>) -> Self {
        let high_water = products.iter().map(|p| p.id).max().unwrap_or(0);
        metrics::record_product_count(products.len());
        Self {
            inner: Mutex::new(Catalog {
                products,
                high_water,
            }),
        }
    }

    /// Create a store holding the three seed products.
    pub fn seeded() -> Self {
        Self::new(seed_products())
    }

    /// Create an empty store.
    pub fn empty() -> Self {
        Self::new(Vec::new())
    }

    // Every critical section leaves the catalog consistent, so a panic
    // elsewhere while holding the lock does not invalidate it.
    fn lock(&self) -> MutexGuard<'_, Catalog> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Snapshot of the full collection in insertion order.
    pub fn list(&self) -> Vec<Product> {
        self.lock().products.clone()
    }

    /// Find a product by id.
    pub fn get(&self, id: ProductId) -> Result<Product, StoreError> {
        self.lock()
            .products
            .iter()
            .find(|p| p.id == id)
            .cloned()
            .ok_or(StoreError::NotFound)
    }

    /// Validate `new`, assign the next id and append the product.
    pub fn create(&self, new: &NewProduct) -> Result<Product, StoreError> {
        let (name, price) = new.validate()?;

        let mut catalog = self.lock();
        let current_max = catalog.products.iter().map(|p| p.id).max().unwrap_or(0);
        let id = current_max.max(catalog.high_water) + 1;
        catalog.high_water = id;

        let product = Product::new(id, name, price);
        catalog.products.push(product.clone());
        let count = catalog.products.len();
        drop(catalog);

        metrics::record_mutation("create");
        metrics::record_product_count(count);
        tracing::info!(product_id = id, name = %product.name, price = product.price, "Product created");
        Ok(product)
    }

    /// Apply the fields present in `patch` to the product with `id`.
    ///
    /// Update never rejects a payload; values are coerced, not validated.
    pub fn update(&self, id: ProductId, patch: &ProductPatch) -> Result<Product, StoreError> {
        let mut catalog = self.lock();
        let product = catalog
            .products
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or(StoreError::NotFound)?;

        patch.apply_to(product);
        let updated = product.clone();
        drop(catalog);

        metrics::record_mutation("update");
        tracing::info!(
            product_id = id,
            name_changed = patch.name.is_some(),
            price_changed = patch.price.is_some(),
            "Product updated"
        );
        Ok(updated)
    }

    /// Remove every product with `id`.
    pub fn delete(&self, id: ProductId) -> Result<(), StoreError> {
        let mut catalog = self.lock();
        let before = catalog.products.len();
        catalog.products.retain(|p| p.id != id);
        let after = catalog.products.len();
        drop(catalog);

        if after == before {
            return Err(StoreError::NotFound);
        }

        metrics::record_mutation("delete");
        metrics::record_product_count(after);
        tracing::info!(product_id = id, "Product deleted");
        Ok(())
    }

    /// Number of products currently held.
    pub fn len(&self) -> usize {
        self.lock().products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for ProductStore {
    fn default() -> Self {
        Self::seeded()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::sync::Arc;

    fn new_product(name: &str, price: f64) -> NewProduct {
        NewProduct::new(name, price)
    }

    #[test]
    fn test_seeded_listing_order() {
        let store = ProductStore::seeded();
        let names: Vec<_> = store.list().into_iter().map(|p| p.name).collect();
        assert_eq!(names, ["Laptop", "Phone", "Headphones"]);
    }

    #[test]
    fn test_create_assigns_next_id_and_appends() {
        let store = ProductStore::seeded();
        let created = store.create(&new_product("Mouse", 1500.0)).unwrap();
        assert_eq!(created, Product::new(4, "Mouse", 1500.0));
        assert_eq!(store.list().last(), Some(&created));
    }

    #[test]
    fn test_create_on_empty_store_starts_at_one() {
        let store = ProductStore::empty();
        let created = store.create(&new_product("Pen", 3.0)).unwrap();
        assert_eq!(created.id, 1);
    }

    #[test]
    fn test_ids_not_reused_after_deleting_newest() {
        let store = ProductStore::seeded();
        let created = store.create(&new_product("Mouse", 1500.0)).unwrap();
        store.delete(created.id).unwrap();

        let next = store.create(&new_product("Keyboard", 2500.0)).unwrap();
        assert_eq!(next.id, 5);
    }

    #[test]
    fn test_create_rejects_missing_fields_without_mutation() {
        let store = ProductStore::seeded();
        let body: NewProduct = serde_json::from_value(json!({"name": ""})).unwrap();
        assert_eq!(store.create(&body), Err(StoreError::MissingFields));
        assert_eq!(store.len(), 3);
    }

    #[test]
    fn test_update_price_only_keeps_name() {
        let store = ProductStore::seeded();
        let updated = store.update(2, &ProductPatch::price(28000.0)).unwrap();
        assert_eq!(updated, Product::new(2, "Phone", 28000.0));
        assert_eq!(store.get(2).unwrap(), updated);
    }

    #[test]
    fn test_update_name_only_keeps_price() {
        let store = ProductStore::seeded();
        let updated = store.update(3, &ProductPatch::name("Earbuds")).unwrap();
        assert_eq!(updated, Product::new(3, "Earbuds", 5000.0));
    }

    #[test]
    fn test_update_coerces_instead_of_rejecting() {
        let store = ProductStore::seeded();
        let patch: ProductPatch = serde_json::from_value(json!({"price": "abc"})).unwrap();
        assert_eq!(store.update(99, &patch), Err(StoreError::NotFound));
        assert!(store.update(1, &patch).unwrap().price.is_nan());

        let patch: ProductPatch =
            serde_json::from_value(json!({"name": 5, "price": null})).unwrap();
        let updated = store.update(2, &patch).unwrap();
        assert_eq!(updated, Product::new(2, "5", 0.0));
        assert_eq!(store.get(2).unwrap(), updated);
    }

    #[test]
    fn test_delete_missing_leaves_collection_unchanged() {
        let store = ProductStore::seeded();
        let before = store.list();
        assert_eq!(store.delete(42), Err(StoreError::NotFound));
        assert_eq!(store.list(), before);
    }

    #[test]
    fn test_delete_then_get_is_not_found() {
        let store = ProductStore::seeded();
        store.delete(1).unwrap();
        assert_eq!(store.get(1), Err(StoreError::NotFound));
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn test_concurrent_creates_get_unique_ids() {
        let store = Arc::new(ProductStore::empty());
        let handles: Vec<_> = (0..8)
            .map(|t| {
                let store = Arc::clone(&store);
                std::thread::spawn(move || {
                    (0..25)
                        .map(|i| {
                            store
                                .create(&NewProduct::new(format!("item-{t}-{i}"), 1.0))
                                .unwrap()
                                .id
                        })
                        .collect::<Vec<_>>()
                })
            })
            .collect();

        let mut ids: Vec<_> = handles
            .into_iter()
            .flat_map(|h| h.join().unwrap())
            .collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), 200);
        assert_eq!(ids.first(), Some(&1));
        assert_eq!(ids.last(), Some(&200));
    }
}

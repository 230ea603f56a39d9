//! Wishlist Store - saved products, persisted like the cart

use std::sync::Arc;

use crate::model::Product;
use crate::storage::{self, Storage};

pub struct WishlistStore {
    storage: Arc<dyn Storage>,
    key: String,
}

impl WishlistStore {
    pub fn new(storage: Arc<dyn Storage>, key: impl Into<String>) -> Self {
        Self {
            storage,
            key: key.into(),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    /// Saved products; corrupt data is dropped from storage
    pub fn load(&self) -> Vec<Product> {
        match storage::load_json(self.storage.as_ref(), &self.key) {
            Ok(products) => products.unwrap_or_default(),
            Err(e) => {
                tracing::warn!("[WishlistStore] Error parsing wishlist: {}", e);
                if let Err(e) = self.storage.remove_item(&self.key) {
                    tracing::error!("[WishlistStore] Failed to drop corrupt wishlist: {}", e);
                }
                Vec::new()
            }
        }
    }

    fn persist(&self, products: &[Product]) {
        if let Err(e) = storage::save_json(self.storage.as_ref(), &self.key, products) {
            tracing::error!("[WishlistStore] Failed to write wishlist: {}", e);
        }
    }

    pub fn contains(&self, product_id: &str) -> bool {
        self.load().iter().any(|p| p.id == product_id)
    }

    /// Save a product; false if it was already saved
    pub fn add(&self, product: Product) -> bool {
        let mut products = self.load();
        if products.iter().any(|p| p.id == product.id) {
            return false;
        }
        products.push(product);
        self.persist(&products);
        true
    }

    /// Remove a product, returning it if it was saved
    pub fn remove(&self, product_id: &str) -> Option<Product> {
        let mut products = self.load();
        let index = products.iter().position(|p| p.id == product_id)?;
        let removed = products.remove(index);
        self.persist(&products);
        Some(removed)
    }

    pub fn clear(&self) -> usize {
        let count = self.load().len();
        self.persist(&[]);
        count
    }
}

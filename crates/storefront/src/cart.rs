//! Cart Store - sole authority over the persisted cart
//!
//! Every read goes to storage; nothing is cached. Reads never fail (a
//! missing, corrupt or unreachable blob is an empty cart) and writes never
//! fail the caller (they are logged). Publishing change notifications is
//! the session's job, after the write has landed.

use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::error::{Result, StorefrontError};
use crate::model::{CartEntry, ProductRef};
use crate::storage::{self, Storage};

/// What `add` does when the product is already in the cart
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MergePolicy {
    /// Always append a new line (long-standing storefront behaviour)
    #[default]
    Append,
    /// Increment the existing line for the same product id
    MergeById,
}

pub struct CartStore {
    storage: Arc<dyn Storage>,
    key: String,
    merge_policy: MergePolicy,
}

impl CartStore {
    pub fn new(storage: Arc<dyn Storage>, key: impl Into<String>, merge_policy: MergePolicy) -> Self {
        Self {
            storage,
            key: key.into(),
            merge_policy,
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn merge_policy(&self) -> MergePolicy {
        self.merge_policy
    }

    /// Current cart contents, empty on any failure
    pub fn load(&self) -> Vec<CartEntry> {
        match self.try_load() {
            Ok(entries) => entries,
            Err(e) => {
                tracing::warn!("[CartStore] Unreadable cart under {:?}, using empty cart: {}", self.key, e);
                Vec::new()
            }
        }
    }

    /// Current cart contents, surfacing storage and parse errors
    pub fn try_load(&self) -> Result<Vec<CartEntry>> {
        Ok(storage::load_json(self.storage.as_ref(), &self.key)?.unwrap_or_default())
    }

    /// Overwrite the persisted cart
    pub fn save(&self, entries: &[CartEntry]) -> Result<()> {
        storage::save_json(self.storage.as_ref(), &self.key, entries)
    }

    fn persist(&self, entries: &[CartEntry]) {
        if let Err(e) = self.save(entries) {
            tracing::error!("[CartStore] Failed to write cart: {}", e);
        }
    }

    /// Add `quantity` of a product, returning the new contents
    pub fn add(&self, product: ProductRef, quantity: u32) -> Result<Vec<CartEntry>> {
        if quantity == 0 {
            return Err(StorefrontError::InvalidQuantity);
        }

        let mut entries = self.load();
        let existing = match self.merge_policy {
            MergePolicy::Append => None,
            MergePolicy::MergeById => entries.iter_mut().find(|e| e.product_id() == product.id()),
        };

        match existing {
            Some(entry) => entry.quantity = entry.quantity.saturating_add(quantity),
            None => entries.push(CartEntry::new(product, quantity)),
        }

        self.persist(&entries);
        tracing::debug!("[CartStore] Cart now has {} line(s)", entries.len());
        Ok(entries)
    }

    /// Drop every line for `product_id`, returning how many were removed
    pub fn remove(&self, product_id: &str) -> usize {
        let mut entries = self.load();
        let before = entries.len();
        entries.retain(|e| e.product_id() != product_id);
        let removed = before - entries.len();
        if removed > 0 {
            self.persist(&entries);
        }
        removed
    }

    /// Set the quantity of every line for `product_id`
    ///
    /// Clamped to known stock. Returns the stored quantity, or `None` when
    /// the request was below 1 or nothing matched.
    pub fn update_quantity(&self, product_id: &str, quantity: u32) -> Option<u32> {
        if quantity == 0 {
            return None;
        }

        let mut entries = self.load();
        let mut updated = None;
        for entry in entries.iter_mut().filter(|e| e.product_id() == product_id) {
            let clamped = entry.product.stock().map_or(quantity, |s| quantity.min(s));
            entry.quantity = clamped.max(1);
            updated = Some(entry.quantity);
        }

        if updated.is_some() {
            self.persist(&entries);
        }
        updated
    }

    /// Empty the cart, returning how many lines it held
    pub fn clear(&self) -> usize {
        let count = self.load().len();
        self.persist(&[]);
        count
    }

    /// Forget the cart entirely (checkout completed)
    pub fn discard(&self) {
        if let Err(e) = self.storage.remove_item(&self.key) {
            tracing::error!("[CartStore] Failed to remove cart: {}", e);
        }
    }
}

/// Σ unit price × quantity
pub fn subtotal(entries: &[CartEntry]) -> u64 {
    entries
        .iter()
        .map(CartEntry::line_total)
        .fold(0, u64::saturating_add)
}

/// Total number of units, as shown on the header badge
pub fn item_count(entries: &[CartEntry]) -> u32 {
    entries.iter().map(|e| e.quantity).fold(0, u32::saturating_add)
}

/// Confirmation step in front of `clear`
#[derive(Debug, Default)]
pub struct ClearCartPrompt {
    pending: Option<usize>,
}

impl ClearCartPrompt {
    pub fn new() -> Self {
        Self::default()
    }

    /// Ask for confirmation; nothing to confirm on an empty cart
    pub fn request(&mut self, item_count: usize) -> bool {
        if item_count == 0 {
            self.pending = None;
            return false;
        }
        self.pending = Some(item_count);
        true
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Item count shown in the prompt
    pub fn pending_count(&self) -> Option<usize> {
        self.pending
    }

    /// Resolve the prompt; true if a clear was actually requested
    pub fn confirm(&mut self) -> bool {
        self.pending.take().is_some()
    }

    pub fn cancel(&mut self) {
        self.pending = None;
    }
}

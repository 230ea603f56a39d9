//! Storefront Session
//!
//! The entry point page code talks to. Owns the stores, the page document
//! and the observers; every mutation writes storage first, then publishes
//! one event to the bus and to the observers (drawer → badge → toasts).

use std::sync::Arc;
use tokio::sync::{Mutex, RwLock};

use dom::SharedDocument;

use crate::cart::{self, CartStore, ClearCartPrompt};
use crate::config::StorefrontConfig;
use crate::error::{Result, StorefrontError};
use crate::events::{CartChange, CartEvent, EventBus, WishlistChange};
use crate::model::{CartEntry, ItemPreview, Product, ProductRef};
use crate::observer::{CartObserver, ObserverManager};
use crate::observers::drawer::{self, CloseReason, Key, KeyOutcome};
use crate::observers::{CartDrawer, HeaderBadge, ToastNotifier};
use crate::pricing::OrderSummary;
use crate::storage::Storage;
use crate::wishlist::WishlistStore;

fn preview_of(product: &Product) -> ItemPreview {
    ItemPreview {
        name: product.name.clone(),
        image: product.primary_image().map(str::to_string),
    }
}

pub struct StorefrontSession {
    pub config: StorefrontConfig,
    pub event_bus: EventBus,

    cart: Arc<CartStore>,
    wishlist: Arc<WishlistStore>,
    document: SharedDocument,

    drawer: Arc<CartDrawer>,
    badge: Arc<HeaderBadge>,
    toasts: Arc<ToastNotifier>,
    observers: Arc<RwLock<ObserverManager>>,

    clear_prompt: Mutex<ClearCartPrompt>,
}

impl StorefrontSession {
    pub fn new(
        config: StorefrontConfig,
        storage: Arc<dyn Storage>,
        document: SharedDocument,
    ) -> Result<Self> {
        config.validate()?;

        let cart = Arc::new(CartStore::new(
            storage.clone(),
            config.cart_key.clone(),
            config.merge_policy,
        ));
        let wishlist = Arc::new(WishlistStore::new(storage, config.wishlist_key.clone()));

        let drawer = Arc::new(CartDrawer::new(
            config.drawer.clone(),
            config.pricing.clone(),
            cart.clone(),
            document.clone(),
            config.viewport_width,
        ));
        let badge = Arc::new(HeaderBadge::new(cart.clone(), wishlist.clone()));
        let toasts = Arc::new(ToastNotifier::new(config.toast.clone()));

        // Order matters: the drawer may arm suppression for the toasts
        let mut observers = ObserverManager::new();
        observers.register(drawer.clone());
        observers.register(badge.clone());
        observers.register(toasts.clone());

        tracing::debug!("[StorefrontSession] Session {} ready", config.id);

        Ok(Self {
            config,
            event_bus: EventBus::new(),
            cart,
            wishlist,
            document,
            drawer,
            badge,
            toasts,
            observers: Arc::new(RwLock::new(observers)),
            clear_prompt: Mutex::new(ClearCartPrompt::new()),
        })
    }

    /// Session over the built-in page layout
    pub fn with_default_page(config: StorefrontConfig, storage: Arc<dyn Storage>) -> Result<Self> {
        let document = drawer::default_page(&config.drawer)?.into_shared();
        Self::new(config, storage, document)
    }

    pub fn cart(&self) -> &Arc<CartStore> {
        &self.cart
    }

    pub fn wishlist(&self) -> &Arc<WishlistStore> {
        &self.wishlist
    }

    pub fn document(&self) -> &SharedDocument {
        &self.document
    }

    pub fn drawer(&self) -> &Arc<CartDrawer> {
        &self.drawer
    }

    pub fn badge(&self) -> &Arc<HeaderBadge> {
        &self.badge
    }

    pub fn toasts(&self) -> &Arc<ToastNotifier> {
        &self.toasts
    }

    /// Add an observer after the built-in ones
    pub async fn register_observer(&self, observer: Arc<dyn CartObserver>) {
        self.observers.write().await.register(observer);
    }

    async fn publish(&self, event: CartEvent) {
        self.event_bus.publish(event.clone());
        self.observers.read().await.dispatch(&event).await;
    }

    // ---- cart ----

    pub async fn add_to_cart(
        &self,
        product: impl Into<ProductRef>,
        quantity: u32,
        force_open: bool,
    ) -> Result<Vec<CartEntry>> {
        let product = product.into();
        let preview = product.preview();
        let entries = self.cart.add(product, quantity)?;

        self.publish(CartEvent::CartChanged {
            change: CartChange::Added(preview),
            force_open,
        })
        .await;
        Ok(entries)
    }

    /// Add several products with a single notification
    pub async fn add_bundle(
        &self,
        items: Vec<(ProductRef, u32)>,
        force_open: bool,
    ) -> Result<Vec<CartEntry>> {
        if items.iter().any(|(_, quantity)| *quantity == 0) {
            return Err(StorefrontError::InvalidQuantity);
        }

        let mut previews = Vec::with_capacity(items.len());
        for (product, quantity) in items {
            previews.push(product.preview());
            self.cart.add(product, quantity)?;
        }

        self.publish(CartEvent::BundleAdded {
            items: previews,
            force_open,
        })
        .await;
        Ok(self.cart.load())
    }

    /// Remove every line for a product; returns how many were removed
    pub async fn remove_from_cart(&self, product_id: &str) -> usize {
        let removed = self.cart.remove(product_id);
        if removed > 0 {
            self.publish(CartEvent::changed(CartChange::Removed {
                product_id: product_id.to_string(),
            }))
            .await;
        }
        removed
    }

    pub async fn update_quantity(&self, product_id: &str, quantity: u32) -> Option<u32> {
        let stored = self.cart.update_quantity(product_id, quantity)?;
        self.publish(CartEvent::changed(CartChange::QuantityUpdated {
            product_id: product_id.to_string(),
            quantity: stored,
        }))
        .await;
        Some(stored)
    }

    /// Ask before clearing; false when the cart is already empty
    pub async fn request_clear_cart(&self) -> bool {
        let count = self.cart.load().len();
        self.clear_prompt.lock().await.request(count)
    }

    pub async fn pending_clear(&self) -> Option<usize> {
        self.clear_prompt.lock().await.pending_count()
    }

    /// Clear after a confirmed request; returns the number of lines cleared
    pub async fn confirm_clear_cart(&self) -> usize {
        if !self.clear_prompt.lock().await.confirm() {
            return 0;
        }

        let count = self.cart.clear();
        self.publish(CartEvent::changed(CartChange::Cleared { count }))
            .await;
        count
    }

    pub async fn cancel_clear_cart(&self) {
        self.clear_prompt.lock().await.cancel();
    }

    pub fn cart_entries(&self) -> Vec<CartEntry> {
        self.cart.load()
    }

    pub fn subtotal(&self) -> u64 {
        cart::subtotal(&self.cart.load())
    }

    pub fn order_summary(&self) -> OrderSummary {
        OrderSummary::compute(&self.cart.load(), &self.config.pricing)
    }

    /// Summary for the checkout page; `None` sends the shopper back to the cart
    pub fn checkout_summary(&self) -> Option<OrderSummary> {
        let entries = self.cart.load();
        if entries.is_empty() {
            return None;
        }
        Some(OrderSummary::compute(&entries, &self.config.pricing))
    }

    /// Place the order: the cart is forgotten and surfaces resync quietly
    pub async fn complete_checkout(&self) -> Result<OrderSummary> {
        let summary = self.checkout_summary().ok_or(StorefrontError::EmptyCart)?;
        self.cart.discard();
        tracing::info!(
            "[StorefrontSession] Order placed, total {}",
            summary.total
        );
        self.publish(CartEvent::changed(CartChange::Synced)).await;
        Ok(summary)
    }

    // ---- wishlist ----

    pub async fn add_to_wishlist(&self, product: Product) -> bool {
        let preview = preview_of(&product);
        if !self.wishlist.add(product) {
            return false;
        }
        self.publish(CartEvent::WishlistChanged(WishlistChange::Added(preview)))
            .await;
        true
    }

    pub async fn remove_from_wishlist(&self, product_id: &str) -> bool {
        let Some(product) = self.wishlist.remove(product_id) else {
            return false;
        };
        self.publish(CartEvent::WishlistChanged(WishlistChange::Removed(
            preview_of(&product),
        )))
        .await;
        true
    }

    pub async fn clear_wishlist(&self) -> usize {
        let count = self.wishlist.clear();
        self.publish(CartEvent::WishlistChanged(WishlistChange::Cleared { count }))
            .await;
        count
    }

    /// Move a cart line into the wishlist
    ///
    /// Only lines holding a full product snapshot can move; returns false
    /// otherwise.
    pub async fn move_to_wishlist(&self, product_id: &str) -> bool {
        let product = self
            .cart
            .load()
            .into_iter()
            .find_map(|entry| match entry.product {
                ProductRef::Snapshot(product) if product.id == product_id => Some(product),
                _ => None,
            });
        let Some(product) = product else {
            return false;
        };

        let preview = preview_of(&product);
        let added = self.wishlist.add(product);
        self.cart.remove(product_id);

        self.publish(CartEvent::changed(CartChange::Removed {
            product_id: product_id.to_string(),
        }))
        .await;
        if added {
            self.publish(CartEvent::WishlistChanged(WishlistChange::Added(preview)))
                .await;
        }
        true
    }

    // ---- page ----

    /// Storage changed outside this session (another tab)
    pub async fn storage_changed(&self, key: &str) {
        if key == self.cart.key() {
            self.publish(CartEvent::changed(CartChange::Synced)).await;
        } else if key == self.wishlist.key() {
            self.publish(CartEvent::WishlistChanged(WishlistChange::Synced))
                .await;
        } else {
            tracing::trace!("[StorefrontSession] Ignoring change to {:?}", key);
        }
    }

    pub async fn open_drawer(&self) -> Result<()> {
        self.drawer.open().await
    }

    pub async fn close_drawer(&self, reason: CloseReason) -> bool {
        self.drawer.close(reason).await
    }

    pub async fn handle_key(&self, key: Key) -> Result<KeyOutcome> {
        self.drawer.handle_key(key).await
    }

    pub async fn viewport_resized(&self, width: u32) {
        self.drawer.viewport_resized(width).await;
    }

    /// Cancel timers and release the page
    pub async fn shutdown(&self) {
        self.observers.read().await.detach_all().await;
        tracing::debug!("[StorefrontSession] Session {} shut down", self.config.id);
    }
}

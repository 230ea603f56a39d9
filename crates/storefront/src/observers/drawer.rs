//! Cart Drawer - slide-out cart panel
//!
//! The drawer has two personalities picked by viewport width. Wide screens
//! get a modal drawer: it opens on every cart change, hides the page behind it from
//! assistive technology and keeps Tab inside the panel. Narrow screens get a
//! non-modal drawer that only opens when asked to, and never grabs focus.
//!
//! ```text
//!        cart change / bundle (modal or force_open)
//!   Closed ─────────────────────────────────────▶ Open(mode)
//!     ▲                                             │  resize: Open(new mode)
//!     └──── close button / continue / backdrop* ────┘
//!           Escape* (* modal only)
//! ```

use async_trait::async_trait;
use dom::{Document, ModalScope, NodeId, SharedDocument, TabOutcome};
use serde::{Deserialize, Serialize};
use std::sync::{Arc, MutexGuard, PoisonError};
use std::time::Duration;
use tokio::sync::RwLock;
use tokio::task::JoinHandle;
use url::Url;

use crate::cart::{self, CartStore};
use crate::config::{DrawerConfig, PricingConfig};
use crate::error::Result;
use crate::events::{CartChange, CartEvent};
use crate::model::{CartEntry, ItemPreview};
use crate::observer::{CartObserver, DispatchContext};
use crate::pricing::format_price;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DrawerMode {
    Modal,
    NonModal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DrawerState {
    Closed,
    Open(DrawerMode),
}

/// Short-lived "added" banner inside the drawer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InlineConfirmation {
    pub message: String,
    pub image: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CloseReason {
    CloseButton,
    Backdrop,
    ContinueExploring,
    Escape,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Escape,
    Tab { shift: bool },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyOutcome {
    Closed,
    FocusMoved(NodeId),
    Ignored,
}

/// One rendered cart line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DrawerLine {
    pub product_id: String,
    pub name: String,
    pub image: String,
    pub quantity: u32,
    pub unit_price: String,
    pub line_total: String,
}

/// Render snapshot of the drawer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DrawerView {
    pub state: DrawerState,
    pub mode: DrawerMode,
    /// Backdrop intercepts pointer input (modal only)
    pub blocks_pointer: bool,
    pub lines: Vec<DrawerLine>,
    pub item_count: u32,
    pub subtotal: String,
    pub confirmation: Option<InlineConfirmation>,
}

struct DrawerInner {
    state: DrawerState,
    mode: DrawerMode,
    entries: Vec<CartEntry>,
    confirmation: Option<InlineConfirmation>,
    scope: Option<ModalScope>,
    confirmation_task: Option<JoinHandle<()>>,
    focus_task: Option<JoinHandle<()>>,
    resize_task: Option<JoinHandle<()>>,
}

fn abort(task: &mut Option<JoinHandle<()>>) {
    if let Some(handle) = task.take() {
        handle.abort();
    }
}

fn lock_document(document: &SharedDocument) -> MutexGuard<'_, Document> {
    document.lock().unwrap_or_else(PoisonError::into_inner)
}

struct DrawerShared {
    config: DrawerConfig,
    pricing: PricingConfig,
    store: Arc<CartStore>,
    document: SharedDocument,
    inner: RwLock<DrawerInner>,
}

impl DrawerShared {
    /// Acquire the modal scope and schedule focus onto the close control
    fn enter_modal(self: &Arc<Self>, inner: &mut DrawerInner) -> Result<()> {
        if inner.scope.is_some() {
            return Ok(());
        }

        let (panel, region) = {
            let doc = lock_document(&self.document);
            (
                doc.element_by_id(&self.config.panel_id)?,
                doc.first_by_tag(&self.config.inert_region_tag),
            )
        };
        inner.scope = Some(ModalScope::acquire(self.document.clone(), panel, region)?);

        let shared = Arc::clone(self);
        let delay = self.config.focus_delay();
        abort(&mut inner.focus_task);
        inner.focus_task = Some(tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            let inner = shared.inner.read().await;
            let Some(scope) = inner.scope.as_ref() else {
                return;
            };
            let close = lock_document(&shared.document).element_by_id(&shared.config.close_control_id);
            if let Err(e) = close.and_then(|id| scope.focus(id)) {
                tracing::warn!("[CartDrawer] Could not focus close control: {}", e);
            }
        }));
        Ok(())
    }

    /// Drop the modal scope: inert marking removed, focus handed back
    fn leave_modal(inner: &mut DrawerInner) {
        abort(&mut inner.focus_task);
        if let Some(scope) = inner.scope.take() {
            scope.release();
        }
    }

    async fn apply_viewport_width(self: &Arc<Self>, width: u32) {
        let mode = self.config.mode_for_width(width);
        let mut inner = self.inner.write().await;
        if inner.mode == mode {
            return;
        }

        tracing::debug!("[CartDrawer] Viewport {}px, switching to {:?}", width, mode);
        inner.mode = mode;
        if let DrawerState::Open(_) = inner.state {
            inner.state = DrawerState::Open(mode);
            match mode {
                DrawerMode::Modal => {
                    if let Err(e) = self.enter_modal(&mut inner) {
                        tracing::warn!("[CartDrawer] Modal scope unavailable: {}", e);
                    }
                }
                DrawerMode::NonModal => Self::leave_modal(&mut inner),
            }
        }
    }
}

pub struct CartDrawer {
    shared: Arc<DrawerShared>,
}

impl CartDrawer {
    pub fn new(
        config: DrawerConfig,
        pricing: PricingConfig,
        store: Arc<CartStore>,
        document: SharedDocument,
        viewport_width: u32,
    ) -> Self {
        let mode = config.mode_for_width(viewport_width);
        let entries = store.load();
        Self {
            shared: Arc::new(DrawerShared {
                config,
                pricing,
                store,
                document,
                inner: RwLock::new(DrawerInner {
                    state: DrawerState::Closed,
                    mode,
                    entries,
                    confirmation: None,
                    scope: None,
                    confirmation_task: None,
                    focus_task: None,
                    resize_task: None,
                }),
            }),
        }
    }

    pub async fn state(&self) -> DrawerState {
        self.shared.inner.read().await.state
    }

    pub async fn mode(&self) -> DrawerMode {
        self.shared.inner.read().await.mode
    }

    pub async fn is_open(&self) -> bool {
        matches!(self.state().await, DrawerState::Open(_))
    }

    pub async fn entries(&self) -> Vec<CartEntry> {
        self.shared.inner.read().await.entries.clone()
    }

    pub async fn confirmation(&self) -> Option<InlineConfirmation> {
        self.shared.inner.read().await.confirmation.clone()
    }

    /// Re-read the cart from the store
    pub async fn reload(&self) {
        let entries = self.shared.store.load();
        self.shared.inner.write().await.entries = entries;
    }

    /// Open in the current mode
    pub async fn open(&self) -> Result<()> {
        let mut inner = self.shared.inner.write().await;
        let mode = inner.mode;
        if inner.state == DrawerState::Open(mode) {
            return Ok(());
        }

        if mode == DrawerMode::Modal {
            self.shared.enter_modal(&mut inner)?;
        }
        inner.state = DrawerState::Open(mode);
        tracing::debug!("[CartDrawer] Opened ({:?})", mode);
        Ok(())
    }

    /// Close the drawer; false if it was closed or the gesture does not
    /// apply in the current mode
    pub async fn close(&self, reason: CloseReason) -> bool {
        let mut inner = self.shared.inner.write().await;
        let mode = match inner.state {
            DrawerState::Closed => return false,
            DrawerState::Open(mode) => mode,
        };

        let modal_only = matches!(reason, CloseReason::Backdrop | CloseReason::Escape);
        if modal_only && mode == DrawerMode::NonModal {
            return false;
        }

        DrawerShared::leave_modal(&mut inner);
        inner.state = DrawerState::Closed;
        tracing::debug!("[CartDrawer] Closed ({:?})", reason);
        true
    }

    pub async fn handle_key(&self, key: Key) -> Result<KeyOutcome> {
        match key {
            Key::Escape => Ok(if self.close(CloseReason::Escape).await {
                KeyOutcome::Closed
            } else {
                KeyOutcome::Ignored
            }),

            Key::Tab { shift } => {
                let inner = self.shared.inner.read().await;
                if let Some(scope) = inner.scope.as_ref() {
                    if let TabOutcome::Wrapped(id) = scope.handle_tab(shift)? {
                        return Ok(KeyOutcome::FocusMoved(id));
                    }
                }
                let next = lock_document(&self.shared.document).focus_next(shift)?;
                Ok(next.map_or(KeyOutcome::Ignored, KeyOutcome::FocusMoved))
            }
        }
    }

    /// Debounced resize; the last width within the window wins
    pub async fn viewport_resized(&self, width: u32) {
        let shared = Arc::clone(&self.shared);
        let delay = self.shared.config.resize_debounce();

        let mut inner = self.shared.inner.write().await;
        abort(&mut inner.resize_task);
        inner.resize_task = Some(tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            shared.apply_viewport_width(width).await;
        }));
    }

    /// Re-evaluate the mode for `width` immediately
    pub async fn apply_viewport_width(&self, width: u32) {
        self.shared.apply_viewport_width(width).await;
    }

    async fn show_confirmation(&self, confirmation: InlineConfirmation, duration: Duration) {
        let shared = Arc::clone(&self.shared);
        let mut inner = self.shared.inner.write().await;
        inner.confirmation = Some(confirmation);
        abort(&mut inner.confirmation_task);
        inner.confirmation_task = Some(tokio::spawn(async move {
            tokio::time::sleep(duration).await;
            let mut inner = shared.inner.write().await;
            inner.confirmation = None;
            inner.confirmation_task = None;
        }));
    }

    pub async fn view(&self) -> DrawerView {
        let inner = self.shared.inner.read().await;
        let symbol = &self.shared.pricing.currency_symbol;
        let placeholder = &self.shared.config.placeholder_image;

        let lines = inner
            .entries
            .iter()
            .map(|entry| DrawerLine {
                product_id: entry.product_id().to_string(),
                name: entry.product.name().to_string(),
                image: display_image(entry.product.image(), placeholder),
                quantity: entry.quantity,
                unit_price: format_price(entry.product.unit_price(), symbol),
                line_total: format_price(entry.line_total(), symbol),
            })
            .collect();

        DrawerView {
            state: inner.state,
            mode: inner.mode,
            blocks_pointer: inner.state == DrawerState::Open(DrawerMode::Modal),
            lines,
            item_count: cart::item_count(&inner.entries),
            subtotal: format_price(cart::subtotal(&inner.entries), symbol),
            confirmation: inner.confirmation.clone(),
        }
    }

    /// Cancel every timer and release the page
    pub async fn teardown(&self) {
        let mut inner = self.shared.inner.write().await;
        abort(&mut inner.confirmation_task);
        abort(&mut inner.resize_task);
        DrawerShared::leave_modal(&mut inner);
        inner.state = DrawerState::Closed;
        inner.confirmation = None;
    }
}

fn single_confirmation(item: &ItemPreview) -> InlineConfirmation {
    let message = if item.name.is_empty() {
        "Added to cart".to_string()
    } else {
        item.name.clone()
    };
    InlineConfirmation {
        message,
        image: item.image.clone(),
    }
}

fn bundle_confirmation(items: &[ItemPreview], config: &DrawerConfig) -> (InlineConfirmation, Duration) {
    match items.first() {
        Some(first) => (
            InlineConfirmation {
                message: format!("{} items added", items.len()),
                image: first.image.clone(),
            },
            config.bundle_confirmation(),
        ),
        None => (
            InlineConfirmation {
                message: "Bundle added".to_string(),
                image: None,
            },
            config.confirmation(),
        ),
    }
}

/// Image to render, falling back to the placeholder for missing or
/// unusable sources
fn display_image(src: Option<&str>, placeholder: &str) -> String {
    let usable = match src {
        Some(src) if src.starts_with('/') => true,
        Some(src) => Url::parse(src).is_ok_and(|url| matches!(url.scheme(), "http" | "https")),
        None => false,
    };
    match src {
        Some(src) if usable => src.to_string(),
        _ => placeholder.to_string(),
    }
}

#[async_trait]
impl CartObserver for CartDrawer {
    fn name(&self) -> &str {
        "CartDrawer"
    }

    async fn on_event(&self, event: &CartEvent, ctx: &mut DispatchContext) {
        if !event.touches_cart() {
            return;
        }
        self.reload().await;

        let (confirmation, duration) = match event {
            CartEvent::CartChanged {
                change: CartChange::Added(item),
                ..
            } => (single_confirmation(item), self.shared.config.confirmation()),

            CartEvent::BundleAdded { items, .. } => bundle_confirmation(items, &self.shared.config),

            CartEvent::CartChanged {
                change: CartChange::Synced,
                ..
            } => return,

            CartEvent::CartChanged { .. } => (
                single_confirmation(&ItemPreview::new("")),
                self.shared.config.confirmation(),
            ),

            CartEvent::WishlistChanged(_) => return,
        };

        if self.mode().await != DrawerMode::Modal && !event.force_open() {
            return;
        }

        if let Err(e) = self.open().await {
            tracing::error!("[CartDrawer] Failed to open: {}", e);
            return;
        }
        ctx.suppress_next_toast();
        self.show_confirmation(confirmation, duration).await;
    }

    async fn on_detach(&self) {
        self.teardown().await;
        tracing::debug!("[CartDrawer] Detached");
    }
}

/// Minimal storefront page: header, main content and the drawer panel
pub fn default_page(config: &DrawerConfig) -> dom::Result<Document> {
    Document::from_json(&serde_json::json!({
        "tag": "body",
        "children": [
            { "tag": "header", "children": [
                { "tag": "a", "attributes": { "href": "/" }, "text": "Home" },
                { "tag": "button", "attributes": { "id": "cart-toggle" }, "text": "Cart" }
            ]},
            { "tag": config.inert_region_tag, "children": [
                { "tag": "a", "attributes": { "id": "product-link", "href": "/products/bench" }, "text": "Oak Bench" },
                { "tag": "button", "attributes": { "id": "add-to-cart" }, "text": "Add to cart" }
            ]},
            { "tag": "aside", "attributes": { "id": config.panel_id, "role": "dialog" }, "children": [
                { "tag": "button", "attributes": { "id": config.close_control_id }, "text": "Close" },
                { "tag": "a", "attributes": { "id": "view-cart", "href": "/cart" }, "text": "View cart" },
                { "tag": "a", "attributes": { "id": "checkout", "href": "/checkout" }, "text": "Checkout" },
                { "tag": "button", "attributes": { "id": "continue-exploring" }, "text": "Continue exploring" }
            ]}
        ]
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cart::MergePolicy;
    use crate::model::Product;
    use crate::storage::MemoryStorage;

    struct Fixture {
        drawer: CartDrawer,
        store: Arc<CartStore>,
        document: SharedDocument,
    }

    fn fixture(width: u32) -> Fixture {
        let config = DrawerConfig::default();
        let document = default_page(&config).unwrap().into_shared();
        let store = Arc::new(CartStore::new(
            Arc::new(MemoryStorage::new()),
            "cart",
            MergePolicy::Append,
        ));
        let drawer = CartDrawer::new(
            config,
            PricingConfig::default(),
            store.clone(),
            document.clone(),
            width,
        );
        Fixture {
            drawer,
            store,
            document,
        }
    }

    fn node(document: &SharedDocument, id: &str) -> NodeId {
        lock_document(document).element_by_id(id).unwrap()
    }

    fn added(name: &str, force_open: bool) -> CartEvent {
        CartEvent::CartChanged {
            change: CartChange::Added(ItemPreview::new(name)),
            force_open,
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_modal_add_opens_and_suppresses() {
        let f = fixture(1280);
        f.store.add(Product::new("bench", "Oak Bench", 25000).into(), 1).unwrap();

        let mut ctx = DispatchContext::new();
        f.drawer.on_event(&added("Oak Bench", false), &mut ctx).await;

        assert_eq!(f.drawer.state().await, DrawerState::Open(DrawerMode::Modal));
        assert!(ctx.suppression().is_set());
        assert_eq!(f.drawer.entries().await.len(), 1);
        assert_eq!(f.drawer.confirmation().await.unwrap().message, "Oak Bench");

        tokio::time::sleep(Duration::from_millis(3100)).await;
        assert!(f.drawer.confirmation().await.is_none());
        assert!(f.drawer.is_open().await);
    }

    #[tokio::test(start_paused = true)]
    async fn test_non_modal_add_stays_closed() {
        let f = fixture(375);
        let mut ctx = DispatchContext::new();
        f.drawer.on_event(&added("Mug", false), &mut ctx).await;

        assert_eq!(f.drawer.state().await, DrawerState::Closed);
        assert!(!ctx.suppression().is_set());
        assert!(f.drawer.confirmation().await.is_none());

        f.drawer.on_event(&added("Mug", true), &mut ctx).await;
        assert_eq!(f.drawer.state().await, DrawerState::Open(DrawerMode::NonModal));
        assert!(ctx.suppression().is_set());
    }

    #[tokio::test(start_paused = true)]
    async fn test_other_cart_changes_open_with_generic_confirmation() {
        let f = fixture(1280);
        f.store.add(Product::new("mug", "Mug", 4000).into(), 1).unwrap();

        let mut ctx = DispatchContext::new();
        let event = CartEvent::changed(CartChange::Removed {
            product_id: "plate".into(),
        });
        f.drawer.on_event(&event, &mut ctx).await;

        assert_eq!(f.drawer.state().await, DrawerState::Open(DrawerMode::Modal));
        assert_eq!(f.drawer.entries().await.len(), 1);
        assert!(ctx.suppression().is_set());
        assert_eq!(f.drawer.confirmation().await.unwrap().message, "Added to cart");

        tokio::time::sleep(Duration::from_millis(3100)).await;
        assert!(f.drawer.confirmation().await.is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn test_non_modal_quantity_change_stays_closed() {
        let f = fixture(375);
        let mut ctx = DispatchContext::new();
        let event = CartEvent::changed(CartChange::QuantityUpdated {
            product_id: "mug".into(),
            quantity: 2,
        });
        f.drawer.on_event(&event, &mut ctx).await;

        assert_eq!(f.drawer.state().await, DrawerState::Closed);
        assert!(!ctx.suppression().is_set());
    }

    #[tokio::test(start_paused = true)]
    async fn test_sync_only_reloads() {
        let f = fixture(1280);
        f.store.add(Product::new("mug", "Mug", 4000).into(), 1).unwrap();

        let mut ctx = DispatchContext::new();
        f.drawer
            .on_event(&CartEvent::changed(CartChange::Synced), &mut ctx)
            .await;

        assert_eq!(f.drawer.state().await, DrawerState::Closed);
        assert_eq!(f.drawer.entries().await.len(), 1);
        assert!(!ctx.suppression().is_set());
        assert!(f.drawer.confirmation().await.is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn test_bundle_confirmation() {
        let f = fixture(1280);
        let mut ctx = DispatchContext::new();
        let event = CartEvent::BundleAdded {
            items: vec![
                ItemPreview::new("Mug").with_image("/mug.jpg"),
                ItemPreview::new("Plate"),
            ],
            force_open: false,
        };
        f.drawer.on_event(&event, &mut ctx).await;

        let confirmation = f.drawer.confirmation().await.unwrap();
        assert_eq!(confirmation.message, "2 items added");
        assert_eq!(confirmation.image.as_deref(), Some("/mug.jpg"));

        tokio::time::sleep(Duration::from_millis(3200)).await;
        assert!(f.drawer.confirmation().await.is_some());
        tokio::time::sleep(Duration::from_millis(400)).await;
        assert!(f.drawer.confirmation().await.is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn test_modal_focus_round_trip() {
        let f = fixture(1280);
        let add_button = node(&f.document, "add-to-cart");
        let close = node(&f.document, "cart-drawer-close");
        lock_document(&f.document).focus(add_button).unwrap();

        f.drawer.open().await.unwrap();
        assert!(lock_document(&f.document).is_inert(add_button).unwrap());

        tokio::time::sleep(Duration::from_millis(60)).await;
        assert_eq!(lock_document(&f.document).active_element(), Some(close));

        assert!(f.drawer.close(CloseReason::CloseButton).await);
        let doc = lock_document(&f.document);
        assert_eq!(doc.active_element(), Some(add_button));
        assert!(!doc.is_inert(add_button).unwrap());
    }

    #[tokio::test(start_paused = true)]
    async fn test_close_before_focus_delay_cancels_focus() {
        let f = fixture(1280);
        let add_button = node(&f.document, "add-to-cart");
        lock_document(&f.document).focus(add_button).unwrap();

        f.drawer.open().await.unwrap();
        f.drawer.close(CloseReason::ContinueExploring).await;
        tokio::time::sleep(Duration::from_millis(100)).await;

        assert_eq!(lock_document(&f.document).active_element(), Some(add_button));
    }

    #[tokio::test(start_paused = true)]
    async fn test_tab_is_trapped_in_modal() {
        let f = fixture(1280);
        let close = node(&f.document, "cart-drawer-close");
        let continue_button = node(&f.document, "continue-exploring");

        f.drawer.open().await.unwrap();
        tokio::time::sleep(Duration::from_millis(60)).await;

        assert_eq!(
            f.drawer.handle_key(Key::Tab { shift: true }).await.unwrap(),
            KeyOutcome::FocusMoved(continue_button)
        );
        assert_eq!(
            f.drawer.handle_key(Key::Tab { shift: false }).await.unwrap(),
            KeyOutcome::FocusMoved(close)
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_escape_and_backdrop_modal_only() {
        let f = fixture(375);
        f.drawer.open().await.unwrap();

        assert_eq!(f.drawer.handle_key(Key::Escape).await.unwrap(), KeyOutcome::Ignored);
        assert!(!f.drawer.close(CloseReason::Backdrop).await);
        assert!(f.drawer.is_open().await);
        assert!(!f.drawer.view().await.blocks_pointer);

        let f = fixture(1280);
        f.drawer.open().await.unwrap();
        assert!(f.drawer.view().await.blocks_pointer);
        assert_eq!(f.drawer.handle_key(Key::Escape).await.unwrap(), KeyOutcome::Closed);
        assert_eq!(f.drawer.state().await, DrawerState::Closed);
    }

    #[tokio::test(start_paused = true)]
    async fn test_resize_changes_mode_without_closing() {
        let f = fixture(1280);
        f.store.add(Product::new("bench", "Oak Bench", 25000).into(), 1).unwrap();
        f.drawer.reload().await;
        f.drawer.open().await.unwrap();
        let add_button = node(&f.document, "add-to-cart");

        f.drawer.viewport_resized(900).await;
        f.drawer.viewport_resized(600).await;
        assert_eq!(f.drawer.mode().await, DrawerMode::Modal);

        tokio::time::sleep(Duration::from_millis(200)).await;
        assert_eq!(f.drawer.state().await, DrawerState::Open(DrawerMode::NonModal));
        assert!(!lock_document(&f.document).is_inert(add_button).unwrap());
        assert_eq!(f.drawer.entries().await.len(), 1);

        f.drawer.viewport_resized(1024).await;
        tokio::time::sleep(Duration::from_millis(200)).await;
        assert_eq!(f.drawer.state().await, DrawerState::Open(DrawerMode::Modal));
        assert!(lock_document(&f.document).is_inert(add_button).unwrap());
    }

    #[tokio::test(start_paused = true)]
    async fn test_view_formats_lines() {
        let f = fixture(1280);
        f.store
            .add(Product::new("bench", "Oak Bench", 30000).with_sale_price(25000).into(), 2)
            .unwrap();
        f.store
            .add(
                Product::new("mug", "Mug", 4000)
                    .with_image("javascript:alert(1)")
                    .into(),
                1,
            )
            .unwrap();
        f.drawer.reload().await;

        let view = f.drawer.view().await;
        assert_eq!(view.item_count, 3);
        assert_eq!(view.subtotal, "₦54,000");
        assert_eq!(view.lines[0].unit_price, "₦25,000");
        assert_eq!(view.lines[0].line_total, "₦50,000");
        assert_eq!(view.lines[0].image, "/placeholder-product.jpg");
        assert_eq!(view.lines[1].image, "/placeholder-product.jpg");
    }

    #[test]
    fn test_display_image() {
        assert_eq!(display_image(Some("/b.jpg"), "/p.jpg"), "/b.jpg");
        assert_eq!(
            display_image(Some("https://cdn.example.com/b.jpg"), "/p.jpg"),
            "https://cdn.example.com/b.jpg"
        );
        assert_eq!(display_image(Some("data:xyz"), "/p.jpg"), "/p.jpg");
        assert_eq!(display_image(None, "/p.jpg"), "/p.jpg");
    }
}

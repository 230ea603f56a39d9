//! Toast Notifier - stacked, auto-dismissing messages
//!
//! Each toast runs its own timer task:
//! fade in → visible → countdown → leaving → removed.
//! Dismissal cuts straight to leaving. Toasts are independent; two
//! identical messages are two toasts.

use async_trait::async_trait;
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;
use tokio::task::JoinHandle;
use uuid::Uuid;

use crate::config::ToastConfig;
use crate::events::{CartChange, CartEvent, WishlistChange};
use crate::model::ItemPreview;
use crate::observer::{CartObserver, DispatchContext, SuppressionFlag};

/// Time-ordered toast identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ToastId(Uuid);

impl ToastId {
    fn new() -> Self {
        Self(Uuid::now_v7())
    }
}

impl fmt::Display for ToastId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ToastSeverity {
    Success,
    Error,
    Info,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastPhase {
    Entering,
    Visible,
    Leaving,
}

/// A toast as requested by a caller
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToastRequest {
    pub message: String,
    pub severity: ToastSeverity,
    pub product_name: Option<String>,
    pub product_image: Option<String>,
    /// Falls back to the configured default
    pub duration: Option<Duration>,
}

impl ToastRequest {
    pub fn new(message: impl Into<String>, severity: ToastSeverity) -> Self {
        Self {
            message: message.into(),
            severity,
            product_name: None,
            product_image: None,
            duration: None,
        }
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self::new(message, ToastSeverity::Success)
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self::new(message, ToastSeverity::Info)
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::new(message, ToastSeverity::Error)
    }

    pub fn with_product(mut self, preview: &ItemPreview) -> Self {
        self.product_name = Some(preview.name.clone());
        self.product_image = preview.image.clone();
        self
    }

    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.duration = Some(duration);
        self
    }
}

/// A toast on screen
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToastMessage {
    pub id: ToastId,
    pub message: String,
    pub severity: ToastSeverity,
    pub product_name: Option<String>,
    pub product_image: Option<String>,
    pub duration: Duration,
    pub phase: ToastPhase,
}

fn plural(count: usize) -> &'static str {
    if count == 1 {
        ""
    } else {
        "s"
    }
}

type ToastList = Arc<RwLock<Vec<ToastMessage>>>;
type TimerMap = Arc<DashMap<ToastId, JoinHandle<()>>>;

pub struct ToastNotifier {
    config: ToastConfig,
    toasts: ToastList,
    timers: TimerMap,
}

impl ToastNotifier {
    pub fn new(config: ToastConfig) -> Self {
        Self {
            config,
            toasts: Arc::new(RwLock::new(Vec::new())),
            timers: Arc::new(DashMap::new()),
        }
    }

    /// Show a toast unless `suppression` is armed
    ///
    /// An armed flag is consumed and the toast dropped.
    pub async fn show(
        &self,
        request: ToastRequest,
        suppression: &mut SuppressionFlag,
    ) -> Option<ToastId> {
        if suppression.take() {
            tracing::debug!(
                "[ToastNotifier] Skipping toast due to suppression: {}",
                request.message
            );
            return None;
        }
        Some(self.enqueue(request).await)
    }

    /// Show a toast outside of any event dispatch
    pub async fn notify(&self, request: ToastRequest) -> ToastId {
        self.enqueue(request).await
    }

    async fn enqueue(&self, request: ToastRequest) -> ToastId {
        let id = ToastId::new();
        let duration = request
            .duration
            .unwrap_or_else(|| self.config.default_duration());

        tracing::debug!("[ToastNotifier] Adding toast {}: {}", id, request.message);
        self.toasts.write().await.push(ToastMessage {
            id,
            message: request.message,
            severity: request.severity,
            product_name: request.product_name,
            product_image: request.product_image,
            duration,
            phase: ToastPhase::Entering,
        });

        // Spawned under the entry lock so the task's own cleanup runs after the insert
        self.timers
            .entry(id)
            .or_insert_with(|| self.spawn_lifecycle(id, duration));
        id
    }

    fn spawn_lifecycle(&self, id: ToastId, duration: Duration) -> JoinHandle<()> {
        let toasts = self.toasts.clone();
        let timers = self.timers.clone();
        let fade_in = self.config.fade_in();
        let fade_out = self.config.fade_out();

        tokio::spawn(async move {
            tokio::time::sleep(fade_in).await;
            set_phase(&toasts, id, ToastPhase::Visible).await;

            tokio::time::sleep(duration.saturating_sub(fade_in)).await;
            set_phase(&toasts, id, ToastPhase::Leaving).await;

            tokio::time::sleep(fade_out).await;
            toasts.write().await.retain(|t| t.id != id);
            timers.remove(&id);
        })
    }

    /// Start the exit animation now; false if the toast is gone or leaving
    pub async fn dismiss(&self, id: ToastId) -> bool {
        {
            let mut toasts = self.toasts.write().await;
            match toasts.iter_mut().find(|t| t.id == id) {
                Some(toast) if toast.phase != ToastPhase::Leaving => {
                    toast.phase = ToastPhase::Leaving
                }
                _ => return false,
            }
        }

        match self.timers.entry(id) {
            Entry::Occupied(mut slot) => slot.insert(self.spawn_removal(id)).abort(),
            Entry::Vacant(slot) => {
                slot.insert(self.spawn_removal(id));
            }
        }
        true
    }

    fn spawn_removal(&self, id: ToastId) -> JoinHandle<()> {
        let toasts = self.toasts.clone();
        let timers = self.timers.clone();
        let fade_out = self.config.fade_out();
        tokio::spawn(async move {
            tokio::time::sleep(fade_out).await;
            toasts.write().await.retain(|t| t.id != id);
            timers.remove(&id);
        })
    }

    /// Snapshot of the toasts currently on screen, oldest first
    pub async fn active(&self) -> Vec<ToastMessage> {
        self.toasts.read().await.clone()
    }

    pub async fn len(&self) -> usize {
        self.toasts.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.toasts.read().await.is_empty()
    }

    /// Cancel every timer and drop every toast
    pub async fn shutdown(&self) {
        self.timers.retain(|_, handle| {
            handle.abort();
            false
        });
        self.toasts.write().await.clear();
    }

    // ---- canned toasts ----

    pub async fn show_cart_toast(
        &self,
        item: &ItemPreview,
        suppression: &mut SuppressionFlag,
    ) -> Option<ToastId> {
        let request = ToastRequest::success("Added to cart!")
            .with_product(item)
            .with_duration(Duration::from_millis(self.config.cart_duration_ms));
        self.show(request, suppression).await
    }

    pub async fn show_bundle_toast(
        &self,
        items: &[ItemPreview],
        suppression: &mut SuppressionFlag,
    ) -> Option<ToastId> {
        let request = match items.first() {
            Some(first) => {
                let mut request = ToastRequest::success(format!("{} items added", items.len()));
                request.product_image = first.image.clone();
                request
            }
            None => ToastRequest::success("Bundle added"),
        }
        .with_duration(Duration::from_millis(self.config.cart_duration_ms));
        self.show(request, suppression).await
    }

    pub async fn show_clear_cart_toast(
        &self,
        count: usize,
        suppression: &mut SuppressionFlag,
    ) -> Option<ToastId> {
        let request = ToastRequest::info(format!("Cleared {} item{} from cart", count, plural(count)))
            .with_duration(Duration::from_millis(self.config.clear_cart_duration_ms));
        self.show(request, suppression).await
    }

    async fn show_wishlist_toast(
        &self,
        change: &WishlistChange,
        suppression: &mut SuppressionFlag,
    ) -> Option<ToastId> {
        let request = match change {
            WishlistChange::Added(item) => {
                ToastRequest::success("Added to wishlist!").with_product(item)
            }
            WishlistChange::Removed(item) => {
                let mut request = ToastRequest::info("Removed from wishlist");
                request.product_name = Some(item.name.clone());
                request
            }
            WishlistChange::Cleared { count } => ToastRequest::info(format!(
                "Cleared {} item{} from wishlist",
                count,
                plural(*count)
            )),
            WishlistChange::Synced => return None,
        }
        .with_duration(Duration::from_millis(self.config.wishlist_duration_ms));
        self.show(request, suppression).await
    }
}

async fn set_phase(toasts: &ToastList, id: ToastId, phase: ToastPhase) {
    if let Some(toast) = toasts.write().await.iter_mut().find(|t| t.id == id) {
        toast.phase = phase;
    }
}

#[async_trait]
impl CartObserver for ToastNotifier {
    fn name(&self) -> &str {
        "ToastNotifier"
    }

    async fn on_event(&self, event: &CartEvent, ctx: &mut DispatchContext) {
        let flag = ctx.suppression_mut();
        match event {
            CartEvent::CartChanged {
                change: CartChange::Added(item),
                ..
            } => {
                self.show_cart_toast(item, flag).await;
            }

            CartEvent::CartChanged {
                change: CartChange::Cleared { count },
                ..
            } => {
                self.show_clear_cart_toast(*count, flag).await;
            }

            CartEvent::BundleAdded { items, .. } => {
                self.show_bundle_toast(items, flag).await;
            }

            CartEvent::WishlistChanged(change) => {
                self.show_wishlist_toast(change, flag).await;
            }

            _ => {
                // Removals and syncs are silent
            }
        }
    }

    async fn on_detach(&self) {
        self.shutdown().await;
        tracing::debug!("[ToastNotifier] Detached");
    }
}

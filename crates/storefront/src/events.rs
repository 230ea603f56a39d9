//! Event Bus - typed cart and wishlist notifications
//!
//! Design: one enum per event kind, payloads carry notification copy only.
//! Observers always re-read the stores; nothing here is state.

use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

use crate::model::ItemPreview;

/// Broadcast channel capacity. Lagging receivers skip old events.
pub const CHANNEL_CAPACITY: usize = 256;

/// What happened to the cart
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum CartChange {
    Added(ItemPreview),
    Removed { product_id: String },
    QuantityUpdated { product_id: String, quantity: u32 },
    Cleared { count: usize },
    /// Storage changed underneath us (another tab, checkout)
    Synced,
}

/// What happened to the wishlist
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum WishlistChange {
    Added(ItemPreview),
    Removed(ItemPreview),
    Cleared { count: usize },
    Synced,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum CartEvent {
    CartChanged { change: CartChange, force_open: bool },
    BundleAdded { items: Vec<ItemPreview>, force_open: bool },
    WishlistChanged(WishlistChange),
}

impl CartEvent {
    pub fn changed(change: CartChange) -> Self {
        CartEvent::CartChanged {
            change,
            force_open: false,
        }
    }

    /// Whether the emitter asked for the drawer regardless of mode
    pub fn force_open(&self) -> bool {
        match self {
            CartEvent::CartChanged { force_open, .. } | CartEvent::BundleAdded { force_open, .. } => {
                *force_open
            }
            CartEvent::WishlistChanged(_) => false,
        }
    }

    /// Whether cart contents may differ after this event
    pub fn touches_cart(&self) -> bool {
        !matches!(self, CartEvent::WishlistChanged(_))
    }
}

/// Simple event bus using tokio broadcast channel
///
/// No replay: a subscriber only sees events published after it subscribed.
pub struct EventBus {
    tx: broadcast::Sender<CartEvent>,
}

impl EventBus {
    pub fn new() -> Self {
        let (tx, _) = broadcast::channel(CHANNEL_CAPACITY);
        Self { tx }
    }

    pub fn publish(&self, event: CartEvent) {
        let _ = self.tx.send(event); // Ignore error if no subscribers
    }

    pub fn subscribe(&self) -> broadcast::Receiver<CartEvent> {
        self.tx.subscribe()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_event_bus() {
        let bus = EventBus::new();
        let mut rx = bus.subscribe();

        bus.publish(CartEvent::changed(CartChange::Cleared { count: 2 }));

        match rx.recv().await {
            Ok(CartEvent::CartChanged {
                change: CartChange::Cleared { count: 2 },
                force_open: false,
            }) => {}
            other => panic!("Expected Cleared event, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_late_subscriber_misses_earlier_events() {
        let bus = EventBus::new();
        bus.publish(CartEvent::changed(CartChange::Synced));

        let mut rx = bus.subscribe();
        assert!(matches!(
            rx.try_recv(),
            Err(broadcast::error::TryRecvError::Empty)
        ));
    }

    #[test]
    fn test_force_open() {
        let bundle = CartEvent::BundleAdded {
            items: vec![ItemPreview::new("Mug")],
            force_open: true,
        };
        assert!(bundle.force_open());
        assert!(bundle.touches_cart());

        let wish = CartEvent::WishlistChanged(WishlistChange::Synced);
        assert!(!wish.force_open());
        assert!(!wish.touches_cart());
    }
}

//! Header Badge - cart and wishlist counters in the site header

use async_trait::async_trait;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;

use crate::cart::{self, CartStore};
use crate::events::CartEvent;
use crate::observer::{CartObserver, DispatchContext};
use crate::wishlist::WishlistStore;

pub struct HeaderBadge {
    cart: Arc<CartStore>,
    wishlist: Arc<WishlistStore>,
    cart_count: AtomicU32,
    wishlist_count: AtomicU32,
}

impl HeaderBadge {
    pub fn new(cart: Arc<CartStore>, wishlist: Arc<WishlistStore>) -> Self {
        let badge = Self {
            cart,
            wishlist,
            cart_count: AtomicU32::new(0),
            wishlist_count: AtomicU32::new(0),
        };
        badge.refresh_cart();
        badge.refresh_wishlist();
        badge
    }

    /// Units in the cart (sum of quantities)
    pub fn cart_count(&self) -> u32 {
        self.cart_count.load(Ordering::Relaxed)
    }

    pub fn wishlist_count(&self) -> u32 {
        self.wishlist_count.load(Ordering::Relaxed)
    }

    fn refresh_cart(&self) {
        let count = cart::item_count(&self.cart.load());
        self.cart_count.store(count, Ordering::Relaxed);
    }

    fn refresh_wishlist(&self) {
        let count = u32::try_from(self.wishlist.load().len()).unwrap_or(u32::MAX);
        self.wishlist_count.store(count, Ordering::Relaxed);
    }
}

#[async_trait]
impl CartObserver for HeaderBadge {
    fn name(&self) -> &str {
        "HeaderBadge"
    }

    async fn on_event(&self, event: &CartEvent, _ctx: &mut DispatchContext) {
        if event.touches_cart() {
            self.refresh_cart();
        } else {
            self.refresh_wishlist();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cart::MergePolicy;
    use crate::events::{CartChange, WishlistChange};
    use crate::model::Product;
    use crate::storage::MemoryStorage;

    #[tokio::test]
    async fn test_counts_follow_events() {
        let storage = Arc::new(MemoryStorage::new());
        let cart = Arc::new(CartStore::new(storage.clone(), "cart", MergePolicy::Append));
        let wishlist = Arc::new(WishlistStore::new(storage, "wishlist"));
        let badge = HeaderBadge::new(cart.clone(), wishlist.clone());
        let mut ctx = DispatchContext::new();

        cart.add(Product::new("mug", "Mug", 4000).into(), 3).unwrap();
        cart.add(Product::new("plate", "Plate", 6000).into(), 1).unwrap();
        assert_eq!(badge.cart_count(), 0);

        badge
            .on_event(&CartEvent::changed(CartChange::Synced), &mut ctx)
            .await;
        assert_eq!(badge.cart_count(), 4);

        wishlist.add(Product::new("rug", "Rug", 40000));
        badge
            .on_event(&CartEvent::WishlistChanged(WishlistChange::Synced), &mut ctx)
            .await;
        assert_eq!(badge.wishlist_count(), 1);
        assert_eq!(badge.cart_count(), 4);
    }
}

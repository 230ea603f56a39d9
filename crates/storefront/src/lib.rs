//! Storefront cart core
//!
//! Persisted cart and wishlist, a typed event bus, and the page surfaces
//! that react to it: the cart drawer, the header badge and toasts.
//!
//! ```text
//! StorefrontSession ── write ──▶ CartStore / WishlistStore ──▶ Storage
//!        │
//!        └─ publish ─▶ EventBus (external listeners)
//!                  └─▶ ObserverManager: CartDrawer → HeaderBadge → ToastNotifier
//! ```

pub mod cart;
pub mod config;
pub mod error;
pub mod events;
pub mod model;
pub mod observer;
pub mod observers;
pub mod pricing;
pub mod session;
pub mod storage;
pub mod wishlist;

pub use cart::{CartStore, ClearCartPrompt, MergePolicy};
pub use config::{DrawerConfig, PricingConfig, StorefrontConfig, ToastConfig};
pub use error::{Result, StorageError, StorefrontError};
pub use events::{CartChange, CartEvent, EventBus, WishlistChange};
pub use model::{BareProduct, CartEntry, ItemPreview, Product, ProductRef};
pub use observer::{CartObserver, DispatchContext, ObserverManager, SuppressionFlag};
pub use pricing::{format_price, OrderSummary};
pub use session::StorefrontSession;
pub use storage::{FileStorage, MemoryStorage, Storage};
pub use wishlist::WishlistStore;

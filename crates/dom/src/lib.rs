//! Storefront page model
//!
//! A small, headless DOM: enough structure to answer "what is focusable",
//! "what has focus" and "what is hidden from assistive technology". The
//! storefront crate uses it to drive the cart drawer's modal behaviour.
//!
//! ```text
//! page JSON → Document (DomArena + active element) → FocusTrap / ModalScope
//!                     ↓
//!               NodeId (u32)
//! ```

pub mod arena;
pub mod document;
pub mod error;
pub mod focus;
pub mod types;
pub mod utils;

pub use arena::DomArena;
pub use document::{Document, SharedDocument};
pub use error::{DomError, Result};
pub use focus::{FocusTrap, ModalScope, TabOutcome};
pub use types::*;

//! Concrete observers, one per page surface

pub mod badge;
pub mod drawer;
pub mod toast;

pub use badge::HeaderBadge;
pub use drawer::{
    CartDrawer, CloseReason, DrawerLine, DrawerMode, DrawerState, DrawerView, InlineConfirmation,
    Key, KeyOutcome,
};
pub use toast::{ToastId, ToastMessage, ToastNotifier, ToastPhase, ToastRequest, ToastSeverity};

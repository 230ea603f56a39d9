//! Focus trap and modal scope
//!
//! A modal surface needs three things while it is up: the rest of the page
//! hidden from assistive technology, Tab cycling inside the surface, and
//! focus handed back to whatever had it before. `ModalScope` acquires all
//! three at once and gives them back on drop, so an early return or a
//! panic in the owner cannot leave the page inert.

use crate::document::{Document, SharedDocument};
use crate::error::Result;
use crate::types::NodeId;
use std::sync::{MutexGuard, PoisonError};

/// Result of offering a Tab key press to a trap
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TabOutcome {
    /// The trap moved focus itself (the key press is consumed)
    Wrapped(NodeId),
    /// Default handling applies
    Default,
}

/// Keeps Tab / Shift+Tab inside a container
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FocusTrap {
    container: NodeId,
}

impl FocusTrap {
    pub fn new(container: NodeId) -> Self {
        Self { container }
    }

    pub fn container(&self) -> NodeId {
        self.container
    }

    /// Intercept a Tab press
    ///
    /// Wraps from last to first (or first to last with Shift). Focus that
    /// has escaped the container is pulled back to the nearest end.
    pub fn handle_tab(&self, document: &mut Document, backwards: bool) -> Result<TabOutcome> {
        let focusable = document.focusable_within(self.container)?;
        let (Some(&first), Some(&last)) = (focusable.first(), focusable.last()) else {
            return Ok(TabOutcome::Default);
        };

        let active = document.active_element();
        let inside = match active {
            Some(id) => document.arena().contains(self.container, id)?,
            None => false,
        };

        let target = if !inside {
            Some(if backwards { last } else { first })
        } else if backwards && active == Some(first) {
            Some(last)
        } else if !backwards && active == Some(last) {
            Some(first)
        } else {
            None
        };

        match target {
            Some(id) => {
                document.focus(id)?;
                Ok(TabOutcome::Wrapped(id))
            }
            None => Ok(TabOutcome::Default),
        }
    }
}

/// RAII guard for a modal surface
///
/// Acquire captures the focused element, marks the inert region with
/// `aria-hidden="true"` and installs a focus trap on the panel. Dropping
/// the guard reverses all of it.
#[derive(Debug)]
pub struct ModalScope {
    document: SharedDocument,
    trap: FocusTrap,
    opener: Option<NodeId>,
    inert_region: Option<NodeId>,
}

fn lock(document: &SharedDocument) -> MutexGuard<'_, Document> {
    document.lock().unwrap_or_else(PoisonError::into_inner)
}

impl ModalScope {
    pub fn acquire(
        document: SharedDocument,
        panel: NodeId,
        inert_region: Option<NodeId>,
    ) -> Result<Self> {
        let opener = {
            let mut doc = lock(&document);
            doc.get(panel)?;
            if let Some(region) = inert_region {
                doc.set_inert(region, true)?;
            }
            doc.active_element()
        };

        Ok(Self {
            document,
            trap: FocusTrap::new(panel),
            opener,
            inert_region,
        })
    }

    /// Element that had focus when the scope was acquired
    pub fn opener(&self) -> Option<NodeId> {
        self.opener
    }

    pub fn trap(&self) -> FocusTrap {
        self.trap
    }

    /// Move focus to an element inside the scope (e.g. its close control)
    pub fn focus(&self, node_id: NodeId) -> Result<()> {
        lock(&self.document).focus(node_id)
    }

    pub fn handle_tab(&self, backwards: bool) -> Result<TabOutcome> {
        self.trap.handle_tab(&mut lock(&self.document), backwards)
    }

    /// Explicit release, same as dropping
    pub fn release(self) {}
}

impl Drop for ModalScope {
    fn drop(&mut self) {
        let mut doc = lock(&self.document);
        if let Some(region) = self.inert_region {
            let _ = doc.set_inert(region, false);
        }
        match self.opener {
            Some(opener) if doc.focus(opener).is_ok() => {}
            _ => doc.blur(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn shared_page() -> SharedDocument {
        Document::from_json(&serde_json::json!({
            "tag": "body",
            "children": [
                { "tag": "main", "children": [
                    { "tag": "button", "attributes": { "id": "add" } }
                ]},
                { "tag": "aside", "attributes": { "id": "panel" }, "children": [
                    { "tag": "button", "attributes": { "id": "close" } },
                    { "tag": "a", "attributes": { "id": "view", "href": "/cart" } },
                    { "tag": "button", "attributes": { "id": "checkout" } }
                ]}
            ]
        }))
        .unwrap()
        .into_shared()
    }

    fn id(document: &SharedDocument, name: &str) -> NodeId {
        lock(document).element_by_id(name).unwrap()
    }

    #[test]
    fn test_trap_cycles_both_ways() {
        let document = shared_page();
        let panel = id(&document, "panel");
        let close = id(&document, "close");
        let checkout = id(&document, "checkout");
        let trap = FocusTrap::new(panel);

        let mut doc = lock(&document);
        doc.focus(checkout).unwrap();
        assert_eq!(
            trap.handle_tab(&mut doc, false).unwrap(),
            TabOutcome::Wrapped(close)
        );
        assert_eq!(
            trap.handle_tab(&mut doc, true).unwrap(),
            TabOutcome::Wrapped(checkout)
        );

        // middle of the list: default handling
        let view = doc.element_by_id("view").unwrap();
        doc.focus(view).unwrap();
        assert_eq!(trap.handle_tab(&mut doc, false).unwrap(), TabOutcome::Default);
    }

    #[test]
    fn test_trap_pulls_escaped_focus_back() {
        let document = shared_page();
        let panel = id(&document, "panel");
        let add = id(&document, "add");
        let close = id(&document, "close");
        let trap = FocusTrap::new(panel);

        let mut doc = lock(&document);
        doc.focus(add).unwrap();
        assert_eq!(
            trap.handle_tab(&mut doc, false).unwrap(),
            TabOutcome::Wrapped(close)
        );
    }

    #[test]
    fn test_scope_restores_page_on_drop() {
        let document = shared_page();
        let panel = id(&document, "panel");
        let add = id(&document, "add");
        let close = id(&document, "close");
        let main = lock(&document).first_by_tag("main").unwrap();

        lock(&document).focus(add).unwrap();

        let scope = ModalScope::acquire(document.clone(), panel, Some(main)).unwrap();
        assert_eq!(scope.opener(), Some(add));
        assert!(lock(&document).is_inert(add).unwrap());

        scope.focus(close).unwrap();
        assert_eq!(lock(&document).active_element(), Some(close));

        drop(scope);
        let doc = lock(&document);
        assert!(!doc.is_inert(add).unwrap());
        assert_eq!(doc.active_element(), Some(add));
    }

    #[test]
    fn test_scope_without_opener_blurs() {
        let document = shared_page();
        let panel = id(&document, "panel");
        let close = id(&document, "close");

        let scope = ModalScope::acquire(document.clone(), panel, None).unwrap();
        scope.focus(close).unwrap();
        scope.release();

        assert_eq!(lock(&document).active_element(), None);
    }
}

//! Document - the page a storefront session renders into
//!
//! Owns the node arena plus the single piece of interaction state the
//! storefront cares about: which element has keyboard focus.
//!
//! Pages are described as JSON:
//! ```json
//! {
//!   "tag": "body",
//!   "children": [
//!     { "tag": "main", "children": [{ "tag": "a", "attributes": { "href": "/" } }] },
//!     { "tag": "aside", "attributes": { "id": "cart-drawer" }, "children": ["Your Cart"] }
//!   ]
//! }
//! ```
//! A bare string in `children` becomes a text node.

use crate::arena::DomArena;
use crate::error::{DomError, Result};
use crate::types::*;
use crate::utils;
use serde_json::Value;
use std::sync::{Arc, Mutex};

/// Document shared between the session and any scope guarding it
pub type SharedDocument = Arc<Mutex<Document>>;

#[derive(Debug)]
pub struct Document {
    arena: DomArena,
    active_element: Option<NodeId>,
}

impl Document {
    /// Empty document containing only the `#document` node
    pub fn new() -> Self {
        let mut arena = DomArena::new();
        let root = arena.add_node(DomNode::new(0, NodeType::Document, "#document"));
        // slot was just allocated
        let _ = arena.set_root(root);
        Self {
            arena,
            active_element: None,
        }
    }

    /// Build a document from a JSON page description
    pub fn from_json(page: &Value) -> Result<Self> {
        let mut document = Self::new();
        let root = document.root_id()?;
        let top = document.parse_node(page)?;
        document.arena.append_child(root, top)?;
        Ok(document)
    }

    pub fn parse(page: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(page)?;
        Self::from_json(&value)
    }

    /// Wrap into the shared handle used by sessions
    pub fn into_shared(self) -> SharedDocument {
        Arc::new(Mutex::new(self))
    }

    fn parse_node(&mut self, value: &Value) -> Result<NodeId> {
        if let Some(text) = value.as_str() {
            return Ok(self.arena.add_node(DomNode::text(0, text)));
        }

        let tag = value
            .get("tag")
            .and_then(Value::as_str)
            .ok_or_else(|| DomError::InvalidPage(format!("node without 'tag': {}", value)))?;

        let mut node = DomNode::element(0, tag);
        if let Some(attrs) = value.get("attributes") {
            let attrs = attrs.as_object().ok_or_else(|| DomError::InvalidNodeType {
                expected: "attribute object".to_string(),
                actual: attrs.to_string(),
            })?;
            for (key, attr) in attrs {
                let attr = match attr {
                    Value::String(s) => s.clone(),
                    Value::Bool(true) => String::new(),
                    other => other.to_string(),
                };
                node.set_attr(key.clone(), attr);
            }
        }

        let node_id = self.arena.add_node(node);

        if let Some(text) = value.get("text").and_then(Value::as_str) {
            let text_id = self.arena.add_node(DomNode::text(0, text));
            self.arena.append_child(node_id, text_id)?;
        }

        if let Some(children) = value.get("children").and_then(Value::as_array) {
            for child in children {
                let child_id = self.parse_node(child)?;
                self.arena.append_child(node_id, child_id)?;
            }
        }

        Ok(node_id)
    }

    pub fn arena(&self) -> &DomArena {
        &self.arena
    }

    pub fn root_id(&self) -> Result<NodeId> {
        self.arena
            .root_id()
            .ok_or_else(|| DomError::InvalidPage("No root node set".to_string()))
    }

    pub fn get(&self, node_id: NodeId) -> Result<&DomNode> {
        self.arena.get(node_id)
    }

    pub fn element_by_id(&self, id: &str) -> Result<NodeId> {
        self.arena
            .find_by_id(id)
            .ok_or_else(|| DomError::ElementNotFound(id.to_string()))
    }

    /// First element with the given tag, in document order
    pub fn first_by_tag(&self, tag: &str) -> Option<NodeId> {
        let root = self.arena.root_id()?;
        let mut found = None;
        let _ = self.arena.traverse_df(root, |node| {
            if found.is_none() && node.tag_name().is_some_and(|t| t.eq_ignore_ascii_case(tag)) {
                found = Some(node.node_id);
            }
            Ok(())
        });
        found
    }

    pub fn text_of(&self, node_id: NodeId) -> Result<String> {
        utils::get_text_content(&self.arena, node_id)
    }

    // ---- focus ----

    pub fn active_element(&self) -> Option<NodeId> {
        self.active_element
    }

    /// Move focus to a focusable element
    pub fn focus(&mut self, node_id: NodeId) -> Result<()> {
        let node = self.arena.get(node_id)?;
        if !utils::is_focusable(node) {
            return Err(DomError::NotFocusable(node_id));
        }
        self.active_element = Some(node_id);
        Ok(())
    }

    pub fn blur(&mut self) {
        self.active_element = None;
    }

    /// Focusable descendants of `container`, in document order
    pub fn focusable_within(&self, container: NodeId) -> Result<Vec<NodeId>> {
        let mut focusable = Vec::new();
        self.arena.traverse_df(container, |node| {
            if node.node_id != container && utils::is_focusable(node) {
                focusable.push(node.node_id);
            }
            Ok(())
        })?;
        Ok(focusable)
    }

    /// Sequential focus order for the whole page
    pub fn tab_order(&self) -> Result<Vec<NodeId>> {
        self.focusable_within(self.root_id()?)
    }

    /// Default Tab / Shift+Tab behaviour: step through the page order,
    /// wrapping at either end
    pub fn focus_next(&mut self, backwards: bool) -> Result<Option<NodeId>> {
        let order = self.tab_order()?;
        if order.is_empty() {
            return Ok(None);
        }

        let position = self
            .active_element
            .and_then(|active| order.iter().position(|&id| id == active));

        let next = match (position, backwards) {
            (None, false) => order[0],
            (None, true) => order[order.len() - 1],
            (Some(i), false) => order[(i + 1) % order.len()],
            (Some(i), true) => order[(i + order.len() - 1) % order.len()],
        };

        self.active_element = Some(next);
        Ok(Some(next))
    }

    // ---- inert marking ----

    /// Hide or re-expose a region to assistive technology
    pub fn set_inert(&mut self, node_id: NodeId, inert: bool) -> Result<()> {
        let node = self.arena.get_mut(node_id)?;
        if inert {
            node.set_attr(INERT_ATTRIBUTE, "true");
        } else {
            node.remove_attr(INERT_ATTRIBUTE);
        }
        Ok(())
    }

    /// Whether the node or any ancestor is hidden from assistive technology
    pub fn is_inert(&self, node_id: NodeId) -> Result<bool> {
        for id in self.arena.ancestors(node_id)? {
            if self.arena.get(id)?.is_marked_inert() {
                return Ok(true);
            }
        }
        Ok(false)
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page() -> Document {
        Document::from_json(&serde_json::json!({
            "tag": "body",
            "children": [
                { "tag": "main", "children": [
                    { "tag": "a", "attributes": { "id": "home", "href": "/" }, "text": "Home" },
                    { "tag": "button", "attributes": { "id": "buy" } }
                ]},
                { "tag": "aside", "attributes": { "id": "panel" }, "children": [
                    "Your Cart",
                    { "tag": "button", "attributes": { "id": "close", "aria-label": "Close cart" } },
                    { "tag": "button", "attributes": { "id": "off", "disabled": true } }
                ]}
            ]
        }))
        .unwrap()
    }

    #[test]
    fn test_parse_page() {
        let doc = page();
        let panel = doc.element_by_id("panel").unwrap();
        assert_eq!(doc.get(panel).unwrap().tag_name(), Some("aside"));
        assert_eq!(doc.text_of(panel).unwrap(), "Your Cart");
        assert!(doc.first_by_tag("main").is_some());
        assert!(matches!(
            doc.element_by_id("nope"),
            Err(DomError::ElementNotFound(_))
        ));
    }

    #[test]
    fn test_parse_rejects_untagged_nodes() {
        let err = Document::from_json(&serde_json::json!({ "children": [] })).unwrap_err();
        assert!(matches!(err, DomError::InvalidPage(_)));
    }

    #[test]
    fn test_focus_rules() {
        let mut doc = page();
        let panel = doc.element_by_id("panel").unwrap();
        let close = doc.element_by_id("close").unwrap();

        assert!(matches!(doc.focus(panel), Err(DomError::NotFocusable(_))));
        doc.focus(close).unwrap();
        assert_eq!(doc.active_element(), Some(close));

        // disabled button is skipped
        assert_eq!(doc.focusable_within(panel).unwrap(), vec![close]);
    }

    #[test]
    fn test_default_tab_order_wraps() {
        let mut doc = page();
        let home = doc.element_by_id("home").unwrap();
        let buy = doc.element_by_id("buy").unwrap();
        let close = doc.element_by_id("close").unwrap();

        assert_eq!(doc.focus_next(false).unwrap(), Some(home));
        assert_eq!(doc.focus_next(false).unwrap(), Some(buy));
        assert_eq!(doc.focus_next(false).unwrap(), Some(close));
        assert_eq!(doc.focus_next(false).unwrap(), Some(home));
        assert_eq!(doc.focus_next(true).unwrap(), Some(close));
    }

    #[test]
    fn test_inert_marking_inherits() {
        let mut doc = page();
        let main = doc.first_by_tag("main").unwrap();
        let buy = doc.element_by_id("buy").unwrap();

        doc.set_inert(main, true).unwrap();
        assert!(doc.is_inert(buy).unwrap());

        doc.set_inert(main, false).unwrap();
        assert!(!doc.is_inert(buy).unwrap());
        assert!(!doc.get(main).unwrap().has_attr(INERT_ATTRIBUTE));
    }
}

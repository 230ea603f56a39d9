//! Page node definitions

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use std::collections::HashMap;

/// Node identifier (index into arena)
pub type NodeId = u32;

/// Attribute used to hide a region from assistive technology
pub const INERT_ATTRIBUTE: &str = "aria-hidden";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NodeType {
    Document,
    Element,
    Text,
}

/// A page node
///
/// Tag names are stored lowercase so lookups never need case folding.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DomNode {
    pub node_id: NodeId,
    pub node_type: NodeType,

    pub parent_id: Option<NodeId>,
    pub children_ids: SmallVec<[NodeId; 4]>,

    pub node_name: String,
    pub node_value: String,
    pub attributes: HashMap<String, String>,
}

impl DomNode {
    pub fn new(node_id: NodeId, node_type: NodeType, node_name: impl Into<String>) -> Self {
        Self {
            node_id,
            node_type,
            parent_id: None,
            children_ids: SmallVec::new(),
            node_name: node_name.into().to_ascii_lowercase(),
            node_value: String::new(),
            attributes: HashMap::new(),
        }
    }

    /// Shorthand for an element node
    pub fn element(node_id: NodeId, tag: impl Into<String>) -> Self {
        Self::new(node_id, NodeType::Element, tag)
    }

    /// Shorthand for a text node
    pub fn text(node_id: NodeId, value: impl Into<String>) -> Self {
        let mut node = Self::new(node_id, NodeType::Text, "#text");
        node.node_value = value.into();
        node
    }

    pub fn tag_name(&self) -> Option<&str> {
        if self.node_type == NodeType::Element {
            Some(&self.node_name)
        } else {
            None
        }
    }

    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(|s| s.as_str())
    }

    pub fn has_attr(&self, name: &str) -> bool {
        self.attributes.contains_key(name)
    }

    pub fn set_attr(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.attributes.insert(name.into(), value.into());
    }

    pub fn remove_attr(&mut self, name: &str) -> Option<String> {
        self.attributes.remove(name)
    }

    /// `id` attribute, if any
    pub fn element_id(&self) -> Option<&str> {
        self.attr("id")
    }

    /// Whether this node itself carries `aria-hidden="true"`
    pub fn is_marked_inert(&self) -> bool {
        self.attr(INERT_ATTRIBUTE) == Some("true")
    }
}

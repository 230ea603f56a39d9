//! Utility functions for page processing

use crate::arena::DomArena;
use crate::error::Result;
use crate::types::{DomNode, NodeId, NodeType};

/// Tags that take keyboard focus without any extra attribute
const ALWAYS_FOCUSABLE: &[&str] = &["textarea", "input", "select"];

/// Check if element matches the focusable selector
///
/// `a[href], button:not([disabled]), textarea, input, select,
/// [tabindex]:not([tabindex="-1"])`
pub fn is_focusable(node: &DomNode) -> bool {
    let Some(tag) = node.tag_name() else {
        return false;
    };

    if let Some(tabindex) = node.attr("tabindex") {
        if tabindex.trim() != "-1" {
            return true;
        }
    }

    match tag {
        "a" => node.has_attr("href"),
        "button" => !node.has_attr("disabled"),
        _ => ALWAYS_FOCUSABLE.contains(&tag),
    }
}

/// All text content beneath a node, trimmed
pub fn get_text_content(arena: &DomArena, node_id: NodeId) -> Result<String> {
    let mut text = String::new();

    arena.traverse_df(node_id, |node| {
        if node.node_type == NodeType::Text {
            text.push_str(&node.node_value);
        }
        Ok(())
    })?;

    Ok(text.trim().to_string())
}

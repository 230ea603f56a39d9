//! Page tree storage
//!
//! Nodes sit in one `Vec` and point at each other by `NodeId`, so parent
//! links need no reference counting and walks never recurse.

use crate::error::{DomError, Result};
use crate::types::{DomNode, NodeId};
use ahash::AHashMap;

/// Flat node storage with an `id` attribute index
#[derive(Debug)]
pub struct DomArena {
    nodes: Vec<DomNode>,

    /// `id` attribute → NodeId lookup (first node wins on duplicates)
    id_map: AHashMap<String, NodeId>,

    root_id: Option<NodeId>,
}

impl DomArena {
    pub fn new() -> Self {
        Self {
            nodes: Vec::with_capacity(64),
            id_map: AHashMap::new(),
            root_id: None,
        }
    }

    /// Store a node in the next free slot
    ///
    /// The node's `node_id` is overwritten with its slot; an `id`
    /// attribute is indexed unless an earlier node already claimed it.
    pub fn add_node(&mut self, mut node: DomNode) -> NodeId {
        let node_id = self.nodes.len() as NodeId;
        node.node_id = node_id;
        if let Some(id) = node.element_id() {
            self.id_map.entry(id.to_string()).or_insert(node_id);
        }
        self.nodes.push(node);
        node_id
    }

    pub fn append_child(&mut self, parent_id: NodeId, child_id: NodeId) -> Result<()> {
        self.get(child_id)?;
        self.get_mut(parent_id)?.children_ids.push(child_id);
        self.get_mut(child_id)?.parent_id = Some(parent_id);
        Ok(())
    }

    pub fn get(&self, node_id: NodeId) -> Result<&DomNode> {
        self.nodes
            .get(node_id as usize)
            .ok_or(DomError::NodeNotFound(node_id))
    }

    pub fn get_mut(&mut self, node_id: NodeId) -> Result<&mut DomNode> {
        self.nodes
            .get_mut(node_id as usize)
            .ok_or(DomError::NodeNotFound(node_id))
    }

    pub fn set_root(&mut self, node_id: NodeId) -> Result<()> {
        self.get(node_id)?;
        self.root_id = Some(node_id);
        Ok(())
    }

    pub fn root_id(&self) -> Option<NodeId> {
        self.root_id
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// `node_id` followed by each ancestor up to the root
    pub fn ancestors(&self, node_id: NodeId) -> Result<Vec<NodeId>> {
        let mut chain = Vec::new();
        let mut current = Some(node_id);
        while let Some(id) = current {
            chain.push(id);
            current = self.get(id)?.parent_id;
        }
        Ok(chain)
    }

    /// Whether `node_id` is `ancestor_id` or lives somewhere beneath it
    pub fn contains(&self, ancestor_id: NodeId, node_id: NodeId) -> Result<bool> {
        Ok(self.ancestors(node_id)?.contains(&ancestor_id))
    }

    /// Pre-order walk from `start_id`, in document order
    pub fn traverse_df<F>(&self, start_id: NodeId, mut visit: F) -> Result<()>
    where
        F: FnMut(&DomNode) -> Result<()>,
    {
        let mut pending = vec![start_id];
        while let Some(node_id) = pending.pop() {
            let node = self.get(node_id)?;
            visit(node)?;
            pending.extend(node.children_ids.iter().rev().copied());
        }
        Ok(())
    }

    pub fn find_by_id(&self, id: &str) -> Option<NodeId> {
        self.id_map.get(id).copied()
    }
}

impl Default for DomArena {
    fn default() -> Self {
        Self::new()
    }
}

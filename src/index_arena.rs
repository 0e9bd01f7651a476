//! Strategy 1: one contiguous node arena addressed by integer index.
//!
//! All nodes live in a single growable `Vec`; children are `u32` indices
//! into it. Growth may relocate the backing buffer, but indices keep
//! pointing at the same logical node, so references are stable without any
//! pinning tricks. The extra cost is one indirection per child step
//! (index → slot) and a linear label scan per byte.
//!
//! A side list records every node whose value slot has been populated, in
//! first-write order, so populated entries can be enumerated without a full
//! tree walk.

use smallvec::SmallVec;

use crate::store::NodeStore;

/// Index of a node inside an [`IndexStore`].
///
/// The root is always id 0. Ids are never reused or invalidated.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
#[repr(transparent)]
pub struct NodeId(u32);

impl NodeId {
    /// The root node's id.
    pub const ROOT: NodeId = NodeId(0);

    #[inline]
    fn index(self) -> usize {
        self.0 as usize
    }
}

struct IndexNode<V> {
    label: u8,
    value: Option<V>,
    // Most trie nodes have very few children; keep them inline.
    children: SmallVec<[NodeId; 4]>,
}

impl<V> IndexNode<V> {
    fn new(label: u8) -> Self {
        Self {
            label,
            value: None,
            children: SmallVec::new(),
        }
    }
}

/// Index-arena node store.
pub struct IndexStore<V> {
    nodes: Vec<IndexNode<V>>,
    populated: Vec<NodeId>,
}

impl<V> IndexStore<V> {
    /// Create a store containing only the root node.
    pub fn new() -> Self {
        Self {
            nodes: vec![IndexNode::new(0)],
            populated: Vec::new(),
        }
    }

    /// Ids of populated nodes, in the order their values were first written.
    ///
    /// Enumeration only; lookups always go through the tree structure.
    pub fn populated_ids(&self) -> &[NodeId] {
        &self.populated
    }

    /// Values in first-write order, driven by the side list.
    pub fn populated_values(&self) -> impl Iterator<Item = &V> {
        self.populated
            .iter()
            .filter_map(|id| self.nodes[id.index()].value.as_ref())
    }

    /// Longest prefix of `key` that already exists; returns the node where
    /// the walk stopped and the unconsumed suffix.
    fn prefix_node<'k>(&self, key: &'k [u8]) -> (NodeId, &'k [u8]) {
        let mut node = NodeId::ROOT;
        for (i, &b) in key.iter().enumerate() {
            match self.child_of(node, b) {
                Some(next) => node = next,
                None => return (node, &key[i..]),
            }
        }
        (node, &[])
    }

    fn child_of(&self, node: NodeId, label: u8) -> Option<NodeId> {
        self.nodes[node.index()]
            .children
            .iter()
            .copied()
            .find(|&c| self.nodes[c.index()].label == label)
    }
}

impl<V> Default for IndexStore<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V> NodeStore<V> for IndexStore<V> {
    type Ref = NodeId;

    #[inline]
    fn root(&self) -> NodeId {
        NodeId::ROOT
    }

    fn find_or_create_path(&mut self, key: &[u8]) -> NodeId {
        let (mut node, suffix) = self.prefix_node(key);
        for &b in suffix {
            let id = NodeId(self.nodes.len() as u32);
            self.nodes.push(IndexNode::new(b));
            self.nodes[node.index()].children.push(id);
            node = id;
        }
        node
    }

    #[inline]
    fn child(&self, node: NodeId, label: u8) -> Option<NodeId> {
        self.child_of(node, label)
    }

    #[inline]
    fn value(&self, node: NodeId) -> &Option<V> {
        &self.nodes[node.index()].value
    }

    #[inline]
    fn value_mut(&mut self, node: NodeId) -> &mut Option<V> {
        &mut self.nodes[node.index()].value
    }

    #[inline]
    fn has_children(&self, node: NodeId) -> bool {
        !self.nodes[node.index()].children.is_empty()
    }

    fn reserve(&mut self, additional: usize) {
        // Interior nodes roughly double the slot count on prefix-heavy data.
        self.nodes.reserve(additional * 2);
        self.populated.reserve(additional);
    }

    fn record_populated(&mut self, node: NodeId) {
        debug_assert!(self.nodes[node.index()].value.is_none());
        self.populated.push(node);
    }

    #[inline]
    fn node_count(&self) -> usize {
        self.nodes.len()
    }
}

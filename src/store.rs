//! The storage contract shared by all four backends.
//!
//! Every strategy answers the same three questions — where does a node live,
//! how is a child addressed, and how is a new node linked in — but the
//! answers (integer index, owning pointer, stable arena reference, fixed
//! array slot) are incompatible, so each backend implements this trait from
//! scratch rather than sharing a representation.

/// Node storage for a byte-keyed trie.
///
/// A store owns every node it ever creates; nodes are allocated lazily while
/// materializing key paths and are never deleted. `Ref` is the strategy's
/// node handle. A `Ref` is only meaningful for the store that produced it,
/// and stays valid for the store's whole lifetime — each strategy guarantees
/// this its own way (indices survive reallocation, boxed and chunked nodes
/// never move).
pub trait NodeStore<V>: Default {
    /// Handle to a node inside this store.
    type Ref: Copy + Eq;

    /// The root node, reached by the empty key.
    fn root(&self) -> Self::Ref;

    /// Walk `key` from the root, creating any missing nodes, and return the
    /// node at the end of the full key. The empty key returns the root.
    ///
    /// Implementations split this into two phases: follow existing edges as
    /// far as possible, then append one fresh node per remaining byte. The
    /// extend phase never has to check for duplicate edges — the prefix walk
    /// already proved each remaining byte has no matching child.
    fn find_or_create_path(&mut self, key: &[u8]) -> Self::Ref;

    /// Step from `node` along the edge labeled `label`, if it exists.
    fn child(&self, node: Self::Ref, label: u8) -> Option<Self::Ref>;

    /// Walk `key` from the root without creating anything. `None` if some
    /// byte of `key` has no matching edge.
    fn find_existing_path(&self, key: &[u8]) -> Option<Self::Ref> {
        let mut node = self.root();
        for &b in key {
            node = self.child(node, b)?;
        }
        Some(node)
    }

    /// The node's value slot.
    fn value(&self, node: Self::Ref) -> &Option<V>;

    /// The node's value slot, for writing or first initialization.
    fn value_mut(&mut self, node: Self::Ref) -> &mut Option<V>;

    /// Whether any edge leaves `node`.
    fn has_children(&self, node: Self::Ref) -> bool;

    /// Hint that roughly `additional` more keys are coming. Strategies that
    /// never relocate placed nodes ignore this.
    fn reserve(&mut self, additional: usize) {
        let _ = additional;
    }

    /// Called exactly once per node, just before its value slot goes from
    /// absent to present. The index arena overrides this to maintain its
    /// side list of populated nodes; everyone else ignores it.
    fn record_populated(&mut self, node: Self::Ref) {
        let _ = node;
    }

    /// Total nodes allocated, root included.
    fn node_count(&self) -> usize;
}

//! Strategy 3: a chunked arena with address-stable slots.
//!
//! Nodes are bulk-allocated like strategy 1, but instead of integer indices
//! the children hold direct references. That only works if growing the arena
//! never moves an already-placed node, so the arena is a sequence of
//! fixed-capacity chunks: each chunk is a `Vec` that is never pushed past
//! the capacity it was created with, which means its heap buffer — and every
//! node in it — never relocates. Growing allocates a fresh chunk and leaves
//! the old ones alone.
//!
//! Compared to the index arena this skips one indirection per child step
//! (no index → slot translation); compared to the owned tree it still gets
//! chunk-granular allocation instead of one allocation per node. Like the
//! index arena, a side list records populated nodes in first-write order
//! for enumeration without a tree walk.

use std::ptr::NonNull;

use smallvec::SmallVec;

use crate::store::NodeStore;

/// Nodes per chunk. Node addresses within a chunk are fixed for the
/// arena's lifetime.
const CHUNK_CAPACITY: usize = 256;

/// Handle to a node inside a [`StableStore`]: the node's stable address.
pub struct StableRef<V>(NonNull<StableNode<V>>);

impl<V> Clone for StableRef<V> {
    fn clone(&self) -> Self {
        *self
    }
}
impl<V> Copy for StableRef<V> {}
impl<V> PartialEq for StableRef<V> {
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0
    }
}
impl<V> Eq for StableRef<V> {}

struct StableNode<V> {
    label: u8,
    value: Option<V>,
    children: SmallVec<[NonNull<StableNode<V>>; 4]>,
}

impl<V> StableNode<V> {
    fn new(label: u8) -> Self {
        Self {
            label,
            value: None,
            children: SmallVec::new(),
        }
    }
}

/// Chunked-arena node store with stable node references.
pub struct StableStore<V> {
    // Invariant: every chunk was created with `CHUNK_CAPACITY` capacity and
    // is never pushed beyond it, so chunk buffers never reallocate.
    chunks: Vec<Vec<StableNode<V>>>,
    root: NonNull<StableNode<V>>,
    populated: Vec<StableRef<V>>,
    node_count: usize,
}

// SAFETY: the arena exclusively owns every node; `StableRef`s never outlive
// it and are only dereferenced through the store's own methods.
unsafe impl<V: Send> Send for StableStore<V> {}

impl<V> StableStore<V> {
    /// Create a store containing only the root node.
    pub fn new() -> Self {
        let mut first = Vec::with_capacity(CHUNK_CAPACITY);
        first.push(StableNode::new(0));
        let root = NonNull::from(&mut first[0]);
        Self {
            chunks: vec![first],
            root,
            populated: Vec::new(),
            node_count: 1,
        }
    }

    /// Handles of populated nodes, in the order their values were first
    /// written. Enumeration only; lookups always go through the tree
    /// structure.
    pub fn populated_refs(&self) -> &[StableRef<V>] {
        &self.populated
    }

    /// Values in first-write order, driven by the side list.
    pub fn populated_values(&self) -> impl Iterator<Item = &V> {
        self.populated
            .iter()
            // SAFETY: side-list entries are live arena slots of this store.
            .filter_map(|r| unsafe { r.0.as_ref() }.value.as_ref())
    }

    fn alloc(&mut self, label: u8) -> NonNull<StableNode<V>> {
        if self
            .chunks
            .last()
            .map_or(true, |c| c.len() == CHUNK_CAPACITY)
        {
            self.chunks.push(Vec::with_capacity(CHUNK_CAPACITY));
        }
        let chunk = self
            .chunks
            .last_mut()
            .expect("arena always holds at least one chunk");
        chunk.push(StableNode::new(label));
        self.node_count += 1;
        let slot = chunk.len() - 1;
        NonNull::from(&mut chunk[slot])
    }

    fn prefix_node<'k>(&self, key: &'k [u8]) -> (StableRef<V>, &'k [u8]) {
        let mut node = StableRef(self.root);
        for (i, &b) in key.iter().enumerate() {
            match self.child(node, b) {
                Some(next) => node = next,
                None => return (node, &key[i..]),
            }
        }
        (node, &[])
    }
}

impl<V> Default for StableStore<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V> NodeStore<V> for StableStore<V> {
    type Ref = StableRef<V>;

    #[inline]
    fn root(&self) -> StableRef<V> {
        StableRef(self.root)
    }

    fn find_or_create_path(&mut self, key: &[u8]) -> StableRef<V> {
        let (mut node, suffix) = self.prefix_node(key);
        for &b in suffix {
            let child = self.alloc(b);
            // SAFETY: `node` points at a live arena slot; `alloc` never
            // moves existing slots.
            unsafe { node.0.as_mut() }.children.push(child);
            node = StableRef(child);
        }
        node
    }

    fn child(&self, node: StableRef<V>, label: u8) -> Option<StableRef<V>> {
        // SAFETY: `node` points at a live arena slot.
        let n = unsafe { node.0.as_ref() };
        n.children
            .iter()
            .copied()
            // SAFETY: children are live arena slots of the same store.
            .find(|c| unsafe { c.as_ref() }.label == label)
            .map(StableRef)
    }

    #[inline]
    fn value(&self, node: StableRef<V>) -> &Option<V> {
        // SAFETY: see `child`.
        &unsafe { node.0.as_ref() }.value
    }

    #[inline]
    fn value_mut(&mut self, mut node: StableRef<V>) -> &mut Option<V> {
        // SAFETY: `&mut self` guarantees no other live access into the arena.
        &mut unsafe { node.0.as_mut() }.value
    }

    #[inline]
    fn has_children(&self, node: StableRef<V>) -> bool {
        // SAFETY: see `child`.
        !unsafe { node.0.as_ref() }.children.is_empty()
    }

    fn reserve(&mut self, additional: usize) {
        // Node storage is left to the chunked arena's own growth; only the
        // side bookkeeping benefits from a hint.
        self.populated.reserve(additional);
    }

    fn record_populated(&mut self, node: StableRef<V>) {
        debug_assert!(self.value(node).is_none());
        self.populated.push(node);
    }

    #[inline]
    fn node_count(&self) -> usize {
        self.node_count
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::NodeStore;

    #[test]
    fn shared_prefixes_share_nodes() {
        let mut store: StableStore<u32> = StableStore::new();
        store.find_or_create_path(b"cat");
        store.find_or_create_path(b"car");
        assert_eq!(store.node_count(), 5);
    }

    #[test]
    fn refs_survive_chunk_growth() {
        let mut store: StableStore<u32> = StableStore::new();
        let pin = store.find_or_create_path(b"pin");
        *store.value_mut(pin) = Some(17);

        // Well past several chunk boundaries.
        for i in 0..(CHUNK_CAPACITY as u32 * 8) {
            let key = format!("grow{i}");
            store.find_or_create_path(key.as_bytes());
        }
        assert!(store.chunks.len() > 4);

        assert_eq!(*store.value(pin), Some(17));
        assert!(store.find_existing_path(b"pin").unwrap() == pin);
    }

    #[test]
    fn chunks_never_outgrow_their_capacity() {
        let mut store: StableStore<u8> = StableStore::new();
        for i in 0..10_000u32 {
            let key = format!("k{i}");
            store.find_or_create_path(key.as_bytes());
        }
        for chunk in &store.chunks {
            assert!(chunk.len() <= CHUNK_CAPACITY);
            assert!(chunk.capacity() >= CHUNK_CAPACITY);
        }
    }

    #[test]
    fn side_list_tracks_first_write_order() {
        let mut store: StableStore<u32> = StableStore::new();
        for (i, key) in [&b"beta"[..], b"alpha", b"al"].into_iter().enumerate() {
            let node = store.find_or_create_path(key);
            store.record_populated(node);
            *store.value_mut(node) = Some(i as u32);
        }
        assert_eq!(store.populated_refs().len(), 3);
        let values: Vec<u32> = store.populated_values().copied().collect();
        assert_eq!(values, vec![0, 1, 2]);
    }

    #[test]
    fn find_existing_never_creates() {
        let mut store: StableStore<u32> = StableStore::new();
        store.find_or_create_path(b"cat");
        assert!(store.find_existing_path(b"ca").is_some());
        assert!(store.find_existing_path(b"cab").is_none());
        assert_eq!(store.node_count(), 4);
    }
}

//! Strategy 2: a classic pointer tree with single-owner links.
//!
//! Every node is a separate heap allocation exclusively owned by its parent
//! (the root by the store itself). There is no arena: a node's address is
//! fixed the moment it is created, because nodes are never deleted before
//! the store drops. The trade-off is one allocation per node and no way to
//! enumerate populated nodes short of walking the whole tree.
//!
//! Ownership is held as raw `NonNull` links rather than `Box` fields: every
//! pointer is minted once, from the leaked `Box` at creation time, and every
//! later handle is a copy of it. Traversal never re-derives a pointer from a
//! shared reference, so writing through a handle keeps the original
//! (mutable) provenance. The store's `Drop` walks the tree iteratively and
//! reboxes each node exactly once.

use std::ptr::NonNull;

use crate::store::NodeStore;

/// Handle to a node inside an [`OwnedStore`]: the node's stable address.
pub struct OwnedRef<V>(NonNull<OwnedNode<V>>);

impl<V> Clone for OwnedRef<V> {
    fn clone(&self) -> Self {
        *self
    }
}
impl<V> Copy for OwnedRef<V> {}
impl<V> PartialEq for OwnedRef<V> {
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0
    }
}
impl<V> Eq for OwnedRef<V> {}

struct OwnedNode<V> {
    label: u8,
    value: Option<V>,
    children: Vec<NonNull<OwnedNode<V>>>,
}

impl<V> OwnedNode<V> {
    /// Heap-allocate a node and hand back its one true pointer.
    fn alloc(label: u8) -> NonNull<OwnedNode<V>> {
        NonNull::from(Box::leak(Box::new(OwnedNode {
            label,
            value: None,
            children: Vec::new(),
        })))
    }
}

/// Owned-tree node store.
pub struct OwnedStore<V> {
    root: NonNull<OwnedNode<V>>,
    node_count: usize,
}

// SAFETY: the store exclusively owns every node; `OwnedRef`s never outlive
// it and are only dereferenced through the store's own methods.
unsafe impl<V: Send> Send for OwnedStore<V> {}

impl<V> OwnedStore<V> {
    /// Create a store containing only the root node.
    pub fn new() -> Self {
        Self {
            root: OwnedNode::alloc(0),
            node_count: 1,
        }
    }

    fn prefix_node<'k>(&self, key: &'k [u8]) -> (OwnedRef<V>, &'k [u8]) {
        let mut node = OwnedRef(self.root);
        for (i, &b) in key.iter().enumerate() {
            match self.child(node, b) {
                Some(next) => node = next,
                None => return (node, &key[i..]),
            }
        }
        (node, &[])
    }
}

impl<V> Default for OwnedStore<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V> Drop for OwnedStore<V> {
    fn drop(&mut self) {
        // Iterative so that arbitrarily deep paths cannot overflow the
        // stack the way a recursive `Box` chain drop would.
        let mut pending = vec![self.root];
        while let Some(ptr) = pending.pop() {
            // SAFETY: every node was leaked out of a `Box` in `alloc` and
            // is reachable exactly once; this reboxes and frees it once.
            let node = unsafe { Box::from_raw(ptr.as_ptr()) };
            pending.extend(node.children.iter().copied());
        }
    }
}

impl<V> NodeStore<V> for OwnedStore<V> {
    type Ref = OwnedRef<V>;

    #[inline]
    fn root(&self) -> OwnedRef<V> {
        OwnedRef(self.root)
    }

    fn find_or_create_path(&mut self, key: &[u8]) -> OwnedRef<V> {
        let (mut node, suffix) = self.prefix_node(key);
        for &b in suffix {
            let child = OwnedNode::alloc(b);
            // SAFETY: `node` points at a live node owned by this store.
            unsafe { node.0.as_mut() }.children.push(child);
            self.node_count += 1;
            node = OwnedRef(child);
        }
        node
    }

    fn child(&self, node: OwnedRef<V>, label: u8) -> Option<OwnedRef<V>> {
        // SAFETY: `node` points at a live node owned by this store.
        let n = unsafe { node.0.as_ref() };
        n.children
            .iter()
            .copied()
            // SAFETY: children are live nodes of the same store.
            .find(|c| unsafe { c.as_ref() }.label == label)
            .map(OwnedRef)
    }

    #[inline]
    fn value(&self, node: OwnedRef<V>) -> &Option<V> {
        // SAFETY: see `child`.
        &unsafe { node.0.as_ref() }.value
    }

    #[inline]
    fn value_mut(&mut self, mut node: OwnedRef<V>) -> &mut Option<V> {
        // SAFETY: `&mut self` guarantees no other live access into the
        // tree; the pointer carries the creation-time provenance.
        &mut unsafe { node.0.as_mut() }.value
    }

    #[inline]
    fn has_children(&self, node: OwnedRef<V>) -> bool {
        // SAFETY: see `child`.
        !unsafe { node.0.as_ref() }.children.is_empty()
    }

    // reserve: default no-op; placed nodes never move, there is nothing to
    // pre-allocate.

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
        let mut store: OwnedStore<u32> = OwnedStore::new();
        store.find_or_create_path(b"cat");
        store.find_or_create_path(b"car");
        assert_eq!(store.node_count(), 5);
    }

    #[test]
    fn refs_stay_valid_across_later_insertions() {
        let mut store: OwnedStore<u32> = OwnedStore::new();
        let pin = store.find_or_create_path(b"pin");
        *store.value_mut(pin) = Some(41);

        for i in 0..1_000u32 {
            let key = format!("later{i}");
            store.find_or_create_path(key.as_bytes());
        }

        assert_eq!(*store.value(pin), Some(41));
        let again = store.find_existing_path(b"pin").unwrap();
        assert!(again == pin);
    }

    #[test]
    fn writes_through_rediscovered_handles() {
        // A handle found by walking existing edges must be every bit as
        // writable as the one returned at creation time.
        let mut store: OwnedStore<u32> = OwnedStore::new();
        let created = store.find_or_create_path(b"cat");
        *store.value_mut(created) = Some(1);

        let walked = store.find_or_create_path(b"cat");
        assert!(walked == created);
        *store.value_mut(walked) = Some(2);

        let stepped = store.find_existing_path(b"cat").unwrap();
        *store.value_mut(stepped) = Some(3);

        assert_eq!(*store.value(created), Some(3));
    }

    #[test]
    fn lookup_walks_only_existing_edges() {
        let mut store: OwnedStore<u32> = OwnedStore::new();
        store.find_or_create_path(b"cat");
        assert!(store.find_existing_path(b"c").is_some());
        assert!(store.find_existing_path(b"ct").is_none());
        assert_eq!(store.node_count(), 4);
    }

    #[test]
    fn deep_tree_drops_without_recursion() {
        let mut store: OwnedStore<u8> = OwnedStore::new();
        let key = vec![b'x'; 100_000];
        let tip = store.find_or_create_path(&key);
        *store.value_mut(tip) = Some(1);
        assert_eq!(store.node_count(), 100_001);
        drop(store);
    }
}

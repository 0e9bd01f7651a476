//! Strategy 4: fixed-alphabet nodes with O(1) child lookup.
//!
//! Keys are restricted to a closed alphabet of 52 symbols: `A`–`Z` map to
//! dense indices 0–25 and `a`–`z` to 26–51 through a precomputed 256-entry
//! table. Every node carries one owned child slot per symbol, so stepping to
//! a child is a single array index — no label scan at all. The price is
//! fixed per-node memory (52 slots) no matter how few children exist, and
//! the closed alphabet itself.
//!
//! Bytes outside the alphabet map to an explicit sentinel and are rejected
//! with a panic before ever being used as an index; [`alpha_index`] lets
//! callers validate input up front instead.
//!
//! Like the owned tree, nodes are held through raw `NonNull` links minted
//! once at creation, so traversal handles keep the original (mutable)
//! provenance; the store's `Drop` walks the tree iteratively and reboxes
//! each node exactly once.

use std::ptr::NonNull;

use crate::store::NodeStore;

/// Number of symbols in the closed alphabet.
pub const ALPHABET_LEN: usize = 52;

/// Table marker for bytes with no dense index.
const INVALID: u8 = 0xFF;

/// Byte value → dense alphabet index, or `INVALID`.
const DENSE: [u8; 256] = {
    let mut t = [INVALID; 256];
    let mut b = b'A';
    while b <= b'Z' {
        t[b as usize] = b - b'A';
        b += 1;
    }
    let mut b = b'a';
    while b <= b'z' {
        t[b as usize] = b - b'a' + 26;
        b += 1;
    }
    t
};

/// Dense index of `byte` in the 52-symbol alphabet, or `None` for any byte
/// outside `A`–`Z` / `a`–`z`.
#[inline]
pub const fn alpha_index(byte: u8) -> Option<u8> {
    let i = DENSE[byte as usize];
    if i == INVALID {
        None
    } else {
        Some(i)
    }
}

/// `alpha_index`, but inadmissible bytes are a caller bug.
#[inline]
fn dense_index(byte: u8) -> usize {
    match alpha_index(byte) {
        Some(i) => i as usize,
        None => panic!("byte {byte:#04x} is outside the A-Z/a-z alphabet"),
    }
}

/// Handle to a node inside an [`AlphaStore`]: the node's stable address.
pub struct AlphaRef<V>(NonNull<AlphaNode<V>>);

impl<V> Clone for AlphaRef<V> {
    fn clone(&self) -> Self {
        *self
    }
}
impl<V> Copy for AlphaRef<V> {}
impl<V> PartialEq for AlphaRef<V> {
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0
    }
}
impl<V> Eq for AlphaRef<V> {}

struct AlphaNode<V> {
    value: Option<V>,
    // Slot position encodes the label; no per-node label byte needed.
    children: [Option<NonNull<AlphaNode<V>>>; ALPHABET_LEN],
}

impl<V> AlphaNode<V> {
    /// Heap-allocate a node and hand back its one true pointer.
    fn alloc() -> NonNull<AlphaNode<V>> {
        NonNull::from(Box::leak(Box::new(AlphaNode {
            value: None,
            children: [None; ALPHABET_LEN],
        })))
    }
}

/// Fixed-alphabet node store.
pub struct AlphaStore<V> {
    root: NonNull<AlphaNode<V>>,
    node_count: usize,
}

// SAFETY: the store exclusively owns every node; `AlphaRef`s never outlive
// it and are only dereferenced through the store's own methods.
unsafe impl<V: Send> Send for AlphaStore<V> {}

impl<V> AlphaStore<V> {
    /// Create a store containing only the root node.
    pub fn new() -> Self {
        Self {
            root: AlphaNode::alloc(),
            node_count: 1,
        }
    }

    fn prefix_node<'k>(&self, key: &'k [u8]) -> (AlphaRef<V>, &'k [u8]) {
        let mut node = AlphaRef(self.root);
        for (i, &b) in key.iter().enumerate() {
            match self.child(node, b) {
                Some(next) => node = next,
                None => return (node, &key[i..]),
            }
        }
        (node, &[])
    }
}

impl<V> Default for AlphaStore<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V> Drop for AlphaStore<V> {
    fn drop(&mut self) {
        // Iterative; see the module docs.
        let mut pending = vec![self.root];
        while let Some(ptr) = pending.pop() {
            // SAFETY: every node was leaked out of a `Box` in `alloc` and
            // is reachable exactly once; this reboxes and frees it once.
            let node = unsafe { Box::from_raw(ptr.as_ptr()) };
            pending.extend(node.children.iter().flatten().copied());
        }
    }
}

impl<V> NodeStore<V> for AlphaStore<V> {
    type Ref = AlphaRef<V>;

    #[inline]
    fn root(&self) -> AlphaRef<V> {
        AlphaRef(self.root)
    }

    fn find_or_create_path(&mut self, key: &[u8]) -> AlphaRef<V> {
        let (mut node, suffix) = self.prefix_node(key);
        for &b in suffix {
            let slot = dense_index(b);
            let child = AlphaNode::alloc();
            // SAFETY: `node` points at a live node owned by this store.
            unsafe { node.0.as_mut() }.children[slot] = Some(child);
            self.node_count += 1;
            node = AlphaRef(child);
        }
        node
    }

    fn child(&self, node: AlphaRef<V>, label: u8) -> Option<AlphaRef<V>> {
        let slot = dense_index(label);
        // SAFETY: `node` points at a live node owned by this store.
        let n = unsafe { node.0.as_ref() };
        n.children[slot].map(AlphaRef)
    }

    #[inline]
    fn value(&self, node: AlphaRef<V>) -> &Option<V> {
        // SAFETY: see `child`.
        &unsafe { node.0.as_ref() }.value
    }

    #[inline]
    fn value_mut(&mut self, mut node: AlphaRef<V>) -> &mut Option<V> {
        // SAFETY: `&mut self` guarantees no other live access into the
        // tree; the pointer carries the creation-time provenance.
        &mut unsafe { node.0.as_mut() }.value
    }

    fn has_children(&self, node: AlphaRef<V>) -> bool {
        // SAFETY: see `child`.
        let n = unsafe { node.0.as_ref() };
        n.children.iter().any(|c| c.is_some())
    }

    // reserve: default no-op; nodes never relocate.

    #[inline]
    fn node_count(&self) -> usize {
        self.node_count
    }
}

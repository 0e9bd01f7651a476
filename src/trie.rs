//! The trie wrapper: one keyed-container API over any [`NodeStore`].

use std::marker::PhantomData;

use crate::alpha::AlphaStore;
use crate::cursor::Cursor;
use crate::index_arena::IndexStore;
use crate::key::Key;
use crate::owned::OwnedStore;
use crate::stable_arena::StableStore;
use crate::store::NodeStore;

/// A byte-keyed trie over storage strategy `S`.
///
/// The trie itself holds no tree state beyond its store; it layers the map
/// semantics on top: materializing access ([`get_or_default`], [`insert`])
/// creates the key's whole path, read-only access ([`get`], cursors) never
/// creates anything.
///
/// [`get_or_default`]: Trie::get_or_default
/// [`insert`]: Trie::insert
/// [`get`]: Trie::get
pub struct Trie<V, S: NodeStore<V> = IndexStore<V>> {
    store: S,
    len: usize,
    _value: PhantomData<V>,
}

/// Trie over the index arena (strategy 1).
pub type IndexTrie<V> = Trie<V, IndexStore<V>>;
/// Trie over the owned pointer tree (strategy 2).
pub type OwnedTrie<V> = Trie<V, OwnedStore<V>>;
/// Trie over the chunked stable arena (strategy 3).
pub type StableTrie<V> = Trie<V, StableStore<V>>;
/// Trie over fixed-alphabet nodes (strategy 4); keys are `A`–`Z` / `a`–`z`
/// only.
pub type AlphaTrie<V> = Trie<V, AlphaStore<V>>;

impl<V, S: NodeStore<V>> Trie<V, S> {
    /// Create an empty trie.
    pub fn new() -> Self {
        Self {
            store: S::default(),
            len: 0,
            _value: PhantomData,
        }
    }

    /// Hint that roughly `additional` more keys are coming.
    pub fn reserve(&mut self, additional: usize) {
        self.store.reserve(additional);
    }

    /// The value slot for `key`, default-initialized on first access.
    ///
    /// This is indexing in the associative-array sense: the path for `key`
    /// is materialized even if the caller only intends to read, and the
    /// default is written exactly once — later calls return the same live
    /// slot.
    pub fn get_or_default(&mut self, key: impl Key) -> &mut V
    where
        V: Default,
    {
        let node = self.store.find_or_create_path(key.as_key_bytes());
        if self.store.value(node).is_none() {
            self.store.record_populated(node);
            self.len += 1;
        }
        self.store.value_mut(node).get_or_insert_with(V::default)
    }

    /// Set `key` to `value`, returning the previous value if any.
    pub fn insert(&mut self, key: impl Key, value: V) -> Option<V> {
        let node = self.store.find_or_create_path(key.as_key_bytes());
        if self.store.value(node).is_none() {
            self.store.record_populated(node);
            self.len += 1;
        }
        self.store.value_mut(node).replace(value)
    }

    /// The value for `key`, without materializing anything.
    pub fn get(&self, key: impl Key) -> Option<&V> {
        self.store
            .find_existing_path(key.as_key_bytes())
            .and_then(|node| self.store.value(node).as_ref())
    }

    /// Mutable access to the value for `key`, without materializing anything.
    pub fn get_mut(&mut self, key: impl Key) -> Option<&mut V> {
        let node = self.store.find_existing_path(key.as_key_bytes())?;
        self.store.value_mut(node).as_mut()
    }

    /// Whether `key` has been written.
    pub fn contains_key(&self, key: impl Key) -> bool {
        self.get(key).is_some()
    }

    /// Number of keys with a value.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether no key has a value.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// A cursor positioned at the root, for streaming byte-at-a-time
    /// traversal.
    pub fn cursor(&self) -> Cursor<'_, V, S> {
        Cursor::at_root_of(self)
    }

    /// Total nodes allocated by the store, root included.
    pub fn node_count(&self) -> usize {
        self.store.node_count()
    }

    pub(crate) fn store(&self) -> &S {
        &self.store
    }
}

impl<V> Trie<V, IndexStore<V>> {
    /// Values in the order their keys were first written.
    ///
    /// Driven by the arena's side list of populated nodes; the owned and
    /// fixed-alphabet strategies keep no such list and would have to walk
    /// the whole tree.
    pub fn values(&self) -> impl Iterator<Item = &V> {
        self.store.populated_values()
    }
}

impl<V> Trie<V, StableStore<V>> {
    /// Values in the order their keys were first written.
    ///
    /// Driven by the arena's side list of populated nodes; the owned and
    /// fixed-alphabet strategies keep no such list and would have to walk
    /// the whole tree.
    pub fn values(&self) -> impl Iterator<Item = &V> {
        self.store.populated_values()
    }
}

impl<V, S: NodeStore<V>> Default for Trie<V, S> {
    fn default() -> Self {
        Self::new()
    }
}

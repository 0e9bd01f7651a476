//! Byte-at-a-time traversal without re-walking from the root.

use crate::store::NodeStore;
use crate::trie::Trie;

/// A cheap, copyable handle tracking one position in a [`Trie`].
///
/// Cursors never create nodes. Feeding a byte either follows an existing
/// edge or reports failure; [`advance_or_reset`] additionally snaps back to
/// the root on failure, which is exactly what a streaming matcher wants —
/// the caller keeps pushing bytes and never manages its own root handle.
///
/// [`advance_or_reset`]: Cursor::advance_or_reset
pub struct Cursor<'t, V, S: NodeStore<V>> {
    trie: &'t Trie<V, S>,
    node: S::Ref,
}

impl<V, S: NodeStore<V>> Clone for Cursor<'_, V, S> {
    fn clone(&self) -> Self {
        *self
    }
}
impl<V, S: NodeStore<V>> Copy for Cursor<'_, V, S> {}

impl<'t, V, S: NodeStore<V>> Cursor<'t, V, S> {
    pub(crate) fn at_root_of(trie: &'t Trie<V, S>) -> Self {
        Self {
            trie,
            node: trie.store().root(),
        }
    }

    /// The cursor one `label` edge further along, if that edge exists.
    /// Leaves `self` untouched.
    pub fn try_advance(&self, label: u8) -> Option<Self> {
        self.trie
            .store()
            .child(self.node, label)
            .map(|node| Self {
                trie: self.trie,
                node,
            })
    }

    /// Follow the `label` edge in place. On a missing edge the cursor
    /// resets to the root and this returns `false`.
    pub fn advance_or_reset(&mut self, label: u8) -> bool {
        match self.try_advance(label) {
            Some(next) => {
                self.node = next.node;
                true
            }
            None => {
                self.reset();
                false
            }
        }
    }

    /// Snap back to the root.
    pub fn reset(&mut self) {
        self.node = self.trie.store().root();
    }

    /// Whether the cursor currently sits at the root.
    pub fn at_root(&self) -> bool {
        self.node == self.trie.store().root()
    }

    /// Whether a key terminates exactly at the current position.
    pub fn has_value(&self) -> bool {
        self.trie.store().value(self.node).is_some()
    }

    /// Whether no edge leaves the current position. This is not terminal:
    /// further [`advance_or_reset`](Cursor::advance_or_reset) calls simply
    /// fail and reset.
    pub fn has_no_children(&self) -> bool {
        !self.trie.store().has_children(self.node)
    }

    /// The value at the current position, if any.
    pub fn get(&self) -> Option<&'t V> {
        self.trie.store().value(self.node).as_ref()
    }

    /// The value at the current position.
    ///
    /// # Panics
    ///
    /// Panics if no key terminates here; check [`has_value`](Cursor::has_value)
    /// first, or use [`get`](Cursor::get).
    pub fn value(&self) -> &'t V {
        match self.get() {
            Some(v) => v,
            None => panic!("cursor is not positioned at a value-bearing node"),
        }
    }
}

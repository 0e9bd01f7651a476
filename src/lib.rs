//! # bytetrie
//!
//! Byte-keyed tries (prefix trees) with four interchangeable node storage
//! strategies behind one contract.
//!
//! The interesting problem here is not the trie algorithm — it is node
//! *storage*: how nodes are allocated, how children are addressed, and what
//! that implies for reference stability and lookup cost. This crate keeps the
//! trie logic in one generic wrapper and swaps the storage discipline:
//!
//! 1. [`IndexStore`](index_arena::IndexStore) — one contiguous arena,
//!    children are `u32` indices; indices survive arena growth. Keeps a side
//!    list of populated nodes for cheap enumeration.
//! 2. [`OwnedStore`](owned::OwnedStore) — classic pointer tree, every node
//!    exclusively owns its boxed children; node addresses never move.
//! 3. [`StableStore`](stable_arena::StableStore) — chunked arena with
//!    address-stable slots; children hold direct references, skipping the
//!    index indirection of strategy 1.
//! 4. [`AlphaStore`](alpha::AlphaStore) — closed 52-letter alphabet, one
//!    fixed child slot per letter, O(1) child lookup.
//!
//! ## Example
//!
//! ```rust
//! use bytetrie::IndexTrie;
//!
//! let mut trie: IndexTrie<&str> = IndexTrie::new();
//! trie.insert("cat", "feline");
//! trie.insert("car", "vehicle");
//!
//! assert_eq!(trie.get("cat"), Some(&"feline"));
//!
//! // Stream bytes without re-walking from the root.
//! let mut cur = trie.cursor();
//! assert!(cur.advance_or_reset(b'c'));
//! assert!(cur.advance_or_reset(b'a'));
//! assert!(cur.advance_or_reset(b't'));
//! assert_eq!(cur.value(), &"feline");
//! ```

#![deny(unsafe_op_in_unsafe_fn)]
#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod alpha;
pub mod cursor;
pub mod index_arena;
pub mod key;
pub mod owned;
pub mod stable_arena;
pub mod store;
pub mod trie;

pub use alpha::AlphaStore;
pub use cursor::Cursor;
pub use index_arena::IndexStore;
pub use key::Key;
pub use owned::OwnedStore;
pub use stable_arena::StableStore;
pub use store::NodeStore;
pub use trie::{AlphaTrie, IndexTrie, OwnedTrie, StableTrie, Trie};

#[cfg(test)]
mod proptests;

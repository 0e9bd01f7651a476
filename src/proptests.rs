use std::collections::BTreeMap;

use proptest::prelude::*;

use crate::alpha::AlphaStore;
use crate::index_arena::IndexStore;
use crate::owned::OwnedStore;
use crate::stable_arena::StableStore;
use crate::store::NodeStore;
use crate::trie::Trie;

#[derive(Clone, Debug)]
enum Op {
    Insert(Vec<u8>, u32),
    GetOrDefault(Vec<u8>),
    Bump(Vec<u8>),
    Get(Vec<u8>),
}

fn byte_key() -> impl Strategy<Value = Vec<u8>> + Clone {
    prop::collection::vec(any::<u8>(), 0..=10)
}

fn alpha_key() -> impl Strategy<Value = Vec<u8>> + Clone {
    let letters: Vec<u8> = (b'A'..=b'Z').chain(b'a'..=b'z').collect();
    prop::collection::vec(prop::sample::select(letters), 0..=10)
}

fn op_sequence(
    key: impl Strategy<Value = Vec<u8>> + Clone + 'static,
) -> impl Strategy<Value = Vec<Op>> {
    prop::collection::vec(
        prop_oneof![
            (key.clone(), any::<u32>()).prop_map(|(k, v)| Op::Insert(k, v)),
            key.clone().prop_map(Op::GetOrDefault),
            key.clone().prop_map(Op::Bump),
            key.prop_map(Op::Get),
        ],
        1..64,
    )
}

/// Run `ops` against both the trie and a `BTreeMap` model, then verify the
/// two agree — through plain lookups and through cursor walks.
fn check_against_model<S: NodeStore<u32>>(ops: &[Op]) {
    let mut trie: Trie<u32, S> = Trie::new();
    let mut model: BTreeMap<Vec<u8>, u32> = BTreeMap::new();

    for op in ops {
        match op {
            Op::Insert(k, v) => {
                let expected = model.insert(k.clone(), *v);
                assert_eq!(trie.insert(k.as_slice(), *v), expected);
            }
            Op::GetOrDefault(k) => {
                let expected = *model.entry(k.clone()).or_insert(0);
                assert_eq!(*trie.get_or_default(k.as_slice()), expected);
            }
            Op::Bump(k) => {
                let slot = model.entry(k.clone()).or_insert(0);
                *slot += 1;
                *trie.get_or_default(k.as_slice()) += 1;
            }
            Op::Get(k) => {
                assert_eq!(trie.get(k.as_slice()), model.get(k));
            }
        }
        assert_eq!(trie.len(), model.len());
    }

    for (k, v) in &model {
        assert_eq!(trie.get(k.as_slice()), Some(v));
    }

    // Cursor/trie equivalence: whenever every byte of a probed key follows
    // an existing edge, the cursor's final has_value must match the model.
    // (A failed step resets to the root, after which the remaining bytes
    // match against the whole trie again, so only clean walks compare.)
    for op in ops {
        let k = match op {
            Op::Insert(k, _) | Op::GetOrDefault(k) | Op::Bump(k) | Op::Get(k) => k,
        };
        let mut cur = trie.cursor();
        let clean = k.iter().all(|&b| cur.advance_or_reset(b));
        if clean {
            assert_eq!(cur.has_value(), model.contains_key(k));
            if cur.has_value() {
                assert_eq!(cur.value(), &model[k]);
            }
        } else {
            assert!(!model.contains_key(k));
        }
    }
}

proptest! {
    #[test]
    fn index_arena_matches_model(ops in op_sequence(byte_key())) {
        check_against_model::<IndexStore<u32>>(&ops);
    }

    #[test]
    fn owned_tree_matches_model(ops in op_sequence(byte_key())) {
        check_against_model::<OwnedStore<u32>>(&ops);
    }

    #[test]
    fn stable_arena_matches_model(ops in op_sequence(byte_key())) {
        check_against_model::<StableStore<u32>>(&ops);
    }

    #[test]
    fn fixed_alphabet_matches_model(ops in op_sequence(alpha_key())) {
        check_against_model::<AlphaStore<u32>>(&ops);
    }
}

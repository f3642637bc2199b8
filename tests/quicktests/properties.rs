use std::collections::BTreeMap;

use roster::{document, AvlTree, Key, Record};

use crate::{ArbRecord, Op};

/// Applies a set of operations to a tree and a map.
/// This way we can ensure that after a random smattering of inserts
/// and deletes we have the same set of keys in the map.
fn do_ops(ops: &[Op], bst: &mut AvlTree, map: &mut BTreeMap<Key, Record>) {
    for op in ops {
        match op {
            Op::Insert(k, v) => {
                bst.insert(*k, v.clone());
                map.entry(*k).or_insert_with(|| v.clone());
            }
            Op::Remove(k) => {
                bst.delete(*k);
                map.remove(k);
            }
        }
    }
}

fn build(ops: &[Op]) -> (AvlTree, BTreeMap<Key, Record>) {
    let mut tree = AvlTree::new();
    let mut map = BTreeMap::new();
    do_ops(ops, &mut tree, &mut map);
    (tree, map)
}

fn is_sorted(tree: &AvlTree) -> bool {
    let keys: Vec<_> = tree.iter().map(|(k, _)| k).collect();
    keys.windows(2).all(|w| w[0] < w[1])
}

quickcheck::quickcheck! {
    fn invariants_hold(ops: Vec<Op>) -> bool {
        let (tree, map) = build(&ops);

        tree.nodes().all(|n| n.balance_factor.abs() <= 1)
            && is_sorted(&tree)
            && tree.len() == map.len()
            && tree.nodes().count() == map.len()
    }
}

quickcheck::quickcheck! {
    fn height_is_logarithmic(ops: Vec<Op>) -> bool {
        let (tree, _) = build(&ops);
        let bound = 1.44 * ((tree.len() + 2) as f64).log2();

        (tree.height() as f64) <= bound
    }
}

quickcheck::quickcheck! {
    fn heights_are_consistent(ops: Vec<Op>) -> bool {
        let (tree, _) = build(&ops);
        let max_depth = tree.nodes().map(|n| n.depth + 1).max().unwrap_or(0);

        max_depth == tree.height() && tree.nodes().all(|n| n.depth + n.height <= tree.height())
    }
}

quickcheck::quickcheck! {
    fn matches_model(ops: Vec<Op>, probes: Vec<u8>) -> bool {
        let (tree, map) = build(&ops);

        map.iter().all(|(k, v)| tree.get(*k) == Some(v))
            && probes
                .into_iter()
                .map(Key::from)
                .all(|k| tree.search(k).record == map.get(&k))
            && tree.iter().map(|(k, v)| (k, v.clone())).eq(map.into_iter())
    }
}

quickcheck::quickcheck! {
    fn rebuild_round_trips(ops: Vec<Op>) -> bool {
        let (tree, _) = build(&ops);
        let rebuilt = AvlTree::rebuild_from_records(tree.iter().map(|(k, v)| (k, v.clone())));

        rebuilt.entries().eq(tree.entries())
    }
}

quickcheck::quickcheck! {
    fn json_round_trips(ops: Vec<Op>) -> bool {
        let (tree, _) = build(&ops);
        let json = document::to_json(&tree, false).unwrap();
        let restored = document::from_json(&json).unwrap();

        restored.entries().eq(tree.entries())
            && restored.nodes().all(|n| n.balance_factor.abs() <= 1)
    }
}

quickcheck::quickcheck! {
    fn duplicate_insert_is_idempotent(ops: Vec<Op>, record: ArbRecord) -> bool {
        let (mut tree, _) = build(&ops);
        let Some(key) = tree.iter().map(|(k, _)| k).nth(ops.len() % (tree.len() + 1)) else {
            return true;
        };
        let before: Vec<_> = tree.entries().collect();
        let shape: Vec<_> = tree.nodes().collect();

        !tree.insert(key, record.0) && tree.entries().eq(before) && tree.nodes().eq(shape)
    }
}

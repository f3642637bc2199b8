use roster::{AvlTree, Key, NodeInfo, Record, Score};

fn tree_of(keys: impl IntoIterator<Item = Key>) -> AvlTree {
    keys.into_iter()
        .map(|key| (key, Record::new(format!("#{key}"), Score::new(5.0).unwrap())))
        .collect()
}

fn balanced_three() -> Vec<NodeInfo> {
    vec![
        NodeInfo { key: 20, depth: 0, height: 2, balance_factor: 0 },
        NodeInfo { key: 10, depth: 1, height: 1, balance_factor: 0 },
        NodeInfo { key: 30, depth: 1, height: 1, balance_factor: 0 },
    ]
}

#[test]
fn ascending_three_rotates_left() {
    let tree = tree_of([10, 20, 30]);
    assert_eq!(tree.nodes().collect::<Vec<_>>(), balanced_three());
}

#[test]
fn zigzag_three_rotates_twice() {
    let tree = tree_of([30, 10, 20]);
    assert_eq!(tree.nodes().collect::<Vec<_>>(), balanced_three());
}

#[test]
fn delete_from_full_tree_stays_balanced() {
    let mut tree = tree_of(1..=7);
    tree.delete(1);

    assert!(tree.nodes().all(|n| n.balance_factor.abs() <= 1));
    assert_eq!(tree.iter().map(|(k, _)| k).collect::<Vec<_>>(), vec![2, 3, 4, 5, 6, 7]);
}

#[test]
fn search_finds_exact_payload() {
    let mut tree = tree_of(1..=31);
    tree.get_mut(17).unwrap().name = "Linh".to_string();

    let search = tree.search(17);
    assert_eq!(search.record.map(|r| r.name.as_str()), Some("Linh"));
    assert_eq!(search.path.first(), Some(&16));
    assert_eq!(search.path.last(), Some(&17));

    let missing = tree.search(32);
    assert!(missing.record.is_none());
    assert_eq!(missing.path.len(), tree.height());
}

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use roster::{document, AvlTree, Key, Record, Score};

/// Ascending inserts: the worst case for an unbalanced BST, so every insert rotates.
fn ascending_tree(num_nodes: Key) -> AvlTree {
    let score = Score::new(5.0).unwrap();
    (0..num_nodes)
        .map(|x| (x, Record::new(x.to_string(), score)))
        .collect()
}

/// Helper to bench a function on a tree.
/// It creates a group for the given name and closure and runs it for various tree sizes before
/// finishing the group.
fn bench_helper(c: &mut Criterion, name: &str, f: impl Fn(&mut AvlTree, Key)) {
    let mut group = c.benchmark_group(name);

    for num_levels in [3, 7, 11, 15] {
        let num_nodes = 2u64.pow(num_levels) - 1;
        let largest_key_in_tree = num_nodes - 1;
        let tree = ascending_tree(num_nodes);

        let id = BenchmarkId::new("avl", largest_key_in_tree);
        group.bench_function(id, |b| {
            b.iter_custom(|iters| {
                let mut time = std::time::Duration::ZERO;
                for _ in 0..iters {
                    let mut tree = black_box(tree.clone());
                    let instant = std::time::Instant::now();
                    f(&mut tree, black_box(largest_key_in_tree));
                    time += instant.elapsed();
                }
                time
            })
        });
    }

    group.finish();
}

pub fn criterion_benchmark(c: &mut Criterion) {
    bench_helper(c, "find", |tree, key| {
        let _record = black_box(tree.get(key));
    });
    bench_helper(c, "search-path", |tree, key| {
        let _search = black_box(tree.search(key));
    });
    bench_helper(c, "delete", |tree, key| {
        tree.delete(key);
    });
    bench_helper(c, "insert", |tree, key| {
        tree.insert(key + 1, Record::new("new", Score::new(1.0).unwrap()));
    });

    bench_helper(c, "find-miss", |tree, key| {
        let _record = black_box(tree.get(key + 1));
    });
    bench_helper(c, "delete-miss", |tree, key| {
        tree.delete(key + 1);
    });

    bench_helper(c, "json-round-trip", |tree, _| {
        let json = document::to_json(tree, false).unwrap();
        let _tree = black_box(document::from_json(&json).unwrap());
    });
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);

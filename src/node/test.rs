use compare::Natural;
use quickcheck::{quickcheck, Arbitrary, Gen, TestResult};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use std::collections::BTreeSet;
use std::fmt::Debug;
use super::super::balance::Color;
use super::super::key::Identity;
use super::{next, prev, Node, Tree, NIL};

type IntTree = Tree<i32, Identity, Natural<i32>>;

fn new_tree() -> IntTree { Tree::with_cmp(compare::natural()) }

/// An operation on a `Tree`.
#[derive(Clone, Debug)]
enum Op<K> where K: Clone + Ord {
    /// Insert a key into the tree.
    Insert(K),
    /// Remove the key at index `n % tree.len()` from the tree.
    Remove(usize),
    /// Remove a key that may or may not be present.
    Erase(K),
}

impl<K> Arbitrary for Op<K> where K: Arbitrary + Ord {
    fn arbitrary(gen: &mut Gen) -> Op<K> {
        match u8::arbitrary(gen) % 3 {
            0 => Op::Insert(K::arbitrary(gen)),
            1 => Op::Remove(usize::arbitrary(gen)),
            _ => Op::Erase(K::arbitrary(gen)),
        }
    }
}

impl Op<i32> {
    /// Perform the operation on the given tree.
    fn exec(self, tree: &mut IntTree) {
        match self {
            Op::Insert(key) => { tree.insert(key); }
            Op::Remove(index) => if !tree.is_empty() {
                let key = *tree.iter().nth(index % tree.len()).unwrap();
                assert_eq!(tree.erase(&key), Some(key));
            },
            Op::Erase(key) => { tree.erase(&key); }
        }
    }
}

/// Checks every structural and red-black invariant of `tree` independently of the engine,
/// returning the keys in order.
fn assert_red_black_tree<T, X, C>(tree: &Tree<T, X, C>) -> Vec<T> where T: Clone + Debug + Ord {
    fn check<T>(nodes: &[Node<T>], node: usize, parent: usize, out: &mut Vec<T>) -> usize
        where T: Clone + Ord {

        if node == NIL { return 1; }

        let n = &nodes[node];
        assert_eq!(n.parent, parent, "broken parent link at {}", node);

        if n.color == Color::Red {
            assert_eq!(nodes[n.left].color, Color::Black, "red node with red left child");
            assert_eq!(nodes[n.right].color, Color::Black, "red node with red right child");
        }

        let left_height = check(nodes, n.left, node, out);
        out.push(n.value.clone().expect("data node without an element"));
        let right_height = check(nodes, n.right, node, out);

        assert_eq!(left_height, right_height, "unequal black heights below {}", node);
        left_height + if n.color == Color::Black { 1 } else { 0 }
    }

    let nodes = &tree.nodes[..];
    let sentinel = &nodes[NIL];

    assert_eq!(sentinel.color, Color::Black);
    assert!(sentinel.value.is_none());
    assert_eq!(sentinel.parent, tree.root);
    assert_eq!(nodes[tree.root].color, Color::Black);

    let mut keys = vec![];
    check(nodes, tree.root, NIL, &mut keys);

    assert!(keys.windows(2).all(|w| w[0] < w[1]), "keys out of order");
    assert_eq!(keys.len(), tree.len());

    if tree.is_empty() {
        assert_eq!(tree.root, NIL);
        assert_eq!(sentinel.left, NIL);
        assert_eq!(sentinel.right, NIL);
    } else {
        assert_eq!(nodes[sentinel.left].value.as_ref(), keys.first());
        assert_eq!(nodes[sentinel.right].value.as_ref(), keys.last());
    }

    keys
}

#[test]
fn test_red_black() {
    fn check(ops: Vec<Op<i32>>) -> TestResult {
        let mut tree = new_tree();
        for op in ops { op.exec(&mut tree); }
        assert_red_black_tree(&tree);
        TestResult::passed()
    }

    quickcheck(check as fn(_) -> _);
}

#[test]
fn test_red_black_after_every_op() {
    fn check(ops: Vec<Op<i32>>) -> bool {
        let mut tree = new_tree();

        ops.into_iter().all(|op| {
            op.exec(&mut tree);
            assert_red_black_tree(&tree);
            true
        })
    }

    quickcheck(check as fn(_) -> _);
}

#[test]
fn test_random_workload() {
    let mut rng = StdRng::seed_from_u64(0x5eed);

    for round in 0..20 {
        let mut keys: Vec<i32> = (0..500).map(|i| i * 7 % 1009 - round).collect();
        keys.shuffle(&mut rng);

        let mut tree = new_tree();
        for &key in &keys { tree.insert(key); }

        let mut sorted = keys.clone();
        sorted.sort();
        assert_eq!(assert_red_black_tree(&tree), sorted);

        keys.shuffle(&mut rng);
        for (i, key) in keys.iter().enumerate() {
            assert_eq!(tree.erase(key), Some(*key));
            if i % 50 == 0 { assert_red_black_tree(&tree); }
        }

        assert!(tree.is_empty());
        assert_red_black_tree(&tree);
    }
}

#[test]
fn test_mixed_workload_matches_model() {
    let mut rng = StdRng::seed_from_u64(0xb1ac);

    for _ in 0..50 {
        let mut tree = new_tree();
        let mut model = BTreeSet::new();

        for _ in 0..400 {
            let key = rng.gen_range(-200..200);

            match rng.gen_range(0..5) {
                0 => assert_eq!(tree.insert(key).1, model.insert(key)),
                1 => assert_eq!(tree.erase(&key), model.take(&key)),
                2 => if !model.is_empty() {
                    let victim = *model.iter().nth(rng.gen_range(0..model.len())).unwrap();
                    let following = model.range(victim + 1..).next().cloned();

                    let (value, next_node) = tree.erase_at(tree.find(&victim));
                    assert_eq!(value, victim);
                    assert_eq!(tree.value(next_node).cloned(), following);
                    model.remove(&victim);
                },
                3 => {
                    let hint = match model.iter().nth(rng.gen_range(0..model.len() + 1)) {
                        Some(near) => tree.find(near),
                        None => NIL,
                    };

                    let node = tree.insert_hint(hint, key);
                    assert_eq!(tree.value(node), Some(&key));
                    model.insert(key);
                },
                _ => assert_eq!(tree.pop_first(), model.pop_first()),
            }

            assert_eq!(assert_red_black_tree(&tree), model.iter().cloned().collect::<Vec<_>>());
        }
    }
}

#[test]
fn test_insert_erase_sequence() {
    let mut tree = new_tree();

    for &key in &[4, 13, 0, -9, 2, -12, -4, 1, 3, 11, 60, 5, 12, 40, 80] {
        assert!(tree.insert(key).1);
        assert_red_black_tree(&tree);
    }

    assert_eq!(assert_red_black_tree(&tree),
               [-12, -9, -4, 0, 1, 2, 3, 4, 5, 11, 12, 13, 40, 60, 80]);

    for &key in &[0, -4, -9, 13, 1, 11, 60, 40, 5, 2] {
        assert_eq!(tree.erase(&key), Some(key));
        assert_red_black_tree(&tree);
    }

    assert_eq!(assert_red_black_tree(&tree), [-12, 3, 4, 12, 80]);
}

#[test]
fn test_duplicate_insert_is_noop() {
    let mut tree = new_tree();
    for key in 0..10 { tree.insert(key); }

    let (node, inserted) = tree.insert(5);
    assert!(!inserted);
    assert_eq!(tree.value(node), Some(&5));
    assert_eq!(tree.len(), 10);
}

#[test]
fn test_erase_absent_leaves_shape() {
    let mut tree = new_tree();
    for key in (0..64).map(|k| k * 2) { tree.insert(key); }

    let shape = |tree: &IntTree| -> Vec<_> {
        tree.nodes.iter().map(|n| (n.parent, n.left, n.right, n.color, n.value)).collect()
    };

    let before = shape(&tree);
    assert_eq!(tree.erase(&7), None);
    assert_eq!(tree.erase(&-1), None);
    assert_eq!(tree.erase(&1000), None);
    assert_eq!(shape(&tree), before);
}

#[test]
fn test_erase_on_empty() {
    let mut tree = new_tree();
    assert_eq!(tree.erase(&1), None);
    assert_eq!(tree.lower_bound(&1), NIL);
    assert_eq!(tree.upper_bound(&1), NIL);
    assert_eq!(tree.first(), NIL);
    assert_eq!(next(&tree.nodes[..], NIL), NIL);
}

#[test]
fn test_erase_two_children_moves_predecessor() {
    let mut tree = new_tree();
    for key in 1..16 { tree.insert(key); }

    let node = tree.iter().map(|k| tree.find(k))
        .find(|&n| tree.nodes[n].left != NIL && tree.nodes[n].right != NIL).unwrap();
    let key = *tree.value(node).unwrap();

    let (value, following) = tree.erase_at(node);
    assert_eq!(value, key);
    assert_eq!(tree.value(following), Some(&(key + 1)));

    // the predecessor's element now lives in the erased node
    assert_eq!(tree.value(node), Some(&(key - 1)));
    assert_eq!(tree.find(&(key - 1)), node);
    assert_red_black_tree(&tree);
}

#[test]
fn test_positions_survive_unrelated_mutation() {
    let mut tree = new_tree();
    for key in 0..100 { tree.insert(key); }

    let positions: Vec<_> = (0..100).map(|k| tree.find(&k)).collect();

    for key in 100..200 { tree.insert(key); }
    for (key, &node) in positions.iter().enumerate() {
        assert_eq!(tree.value(node), Some(&(key as i32)));
    }

    // leaves only, so no element changes nodes
    let leaf = positions.iter().cloned()
        .find(|&n| tree.nodes[n].left == NIL && tree.nodes[n].right == NIL).unwrap();
    let key = *tree.value(leaf).unwrap();
    tree.erase(&key);

    for (k, &node) in positions.iter().enumerate() {
        if k as i32 != key { assert_eq!(tree.value(node), Some(&(k as i32))); }
    }
}

#[test]
fn test_bounds() {
    let mut tree = new_tree();
    for key in (0..10).map(|k| k * 10) { tree.insert(key); }

    let value = |node| tree.value(node).cloned();

    assert_eq!(value(tree.lower_bound(&-5)), Some(0));
    assert_eq!(value(tree.lower_bound(&0)), Some(0));
    assert_eq!(value(tree.lower_bound(&15)), Some(20));
    assert_eq!(value(tree.lower_bound(&90)), Some(90));
    assert_eq!(tree.lower_bound(&91), NIL);

    assert_eq!(value(tree.upper_bound(&-5)), Some(0));
    assert_eq!(value(tree.upper_bound(&0)), Some(10));
    assert_eq!(value(tree.upper_bound(&15)), Some(20));
    assert_eq!(tree.upper_bound(&90), NIL);

    assert_eq!(value(tree.pred(&0, false)), None);
    assert_eq!(value(tree.pred(&0, true)), Some(0));
    assert_eq!(value(tree.pred(&55, false)), Some(50));
    assert_eq!(value(tree.pred(&1000, false)), Some(90));
    assert_eq!(value(tree.succ(&90, false)), None);
    assert_eq!(value(tree.succ(&90, true)), Some(90));
}

#[test]
fn test_bounds_match_linear_scan() {
    fn check(keys: Vec<i8>, key: i8) -> bool {
        let mut tree = Tree::<i8, Identity, Natural<i8>>::with_cmp(compare::natural());
        for k in keys { tree.insert(k); }

        let lower = tree.iter().find(|&&k| k >= key).cloned();
        let upper = tree.iter().find(|&&k| k > key).cloned();

        tree.value(tree.lower_bound(&key)).cloned() == lower &&
            tree.value(tree.upper_bound(&key)).cloned() == upper
    }

    quickcheck(check as fn(Vec<i8>, i8) -> bool);
}

#[test]
fn test_step_symmetry() {
    fn check(keys: Vec<i32>) -> bool {
        let mut tree = new_tree();
        for key in keys { tree.insert(key); }

        let nodes = &tree.nodes[..];
        let mut node = tree.first();

        while node != NIL {
            if prev(nodes, next(nodes, node)) != node { return false; }
            if next(nodes, prev(nodes, node)) != node { return false; }
            node = next(nodes, node);
        }

        true
    }

    quickcheck(check as fn(Vec<i32>) -> bool);
}

#[test]
fn test_insert_hint() {
    fn check(keys: Vec<i16>, hints: Vec<usize>) -> bool {
        let mut hinted = Tree::<i16, Identity, Natural<i16>>::with_cmp(compare::natural());
        let mut plain = Tree::<i16, Identity, Natural<i16>>::with_cmp(compare::natural());

        for (i, key) in keys.into_iter().enumerate() {
            let hint = match hints.get(i) {
                Some(&h) if !hinted.is_empty() => h % (hinted.nodes.len() + 1),
                _ => NIL,
            };

            let node = hinted.insert_hint(hint, key);
            assert_eq!(hinted.value(node), Some(&key));
            plain.insert(key);
        }

        assert_red_black_tree(&hinted) == assert_red_black_tree(&plain)
    }

    quickcheck(check as fn(Vec<i16>, Vec<usize>) -> bool);
}

#[test]
fn test_insert_hint_ascending() {
    let mut tree = new_tree();
    let mut hint = NIL;

    for key in 0..1000 {
        let node = tree.insert_hint(hint, key);
        hint = next(&tree.nodes[..], node);
    }

    assert_eq!(assert_red_black_tree(&tree), (0..1000).collect::<Vec<_>>());
}

#[test]
fn test_clear_large_tree() {
    let mut tree = new_tree();
    for key in 0..100_000 { tree.insert(key); }

    tree.clear();
    assert!(tree.is_empty());
    assert_eq!(tree.nodes.len(), 1);
    assert_red_black_tree(&tree);

    tree.insert(3);
    assert_eq!(assert_red_black_tree(&tree), [3]);
}

#[test]
fn test_swap() {
    let mut a = new_tree();
    let mut b = new_tree();
    for key in 0..5 { a.insert(key); }
    b.insert(42);

    a.swap(&mut b);

    assert_eq!(assert_red_black_tree(&a), [42]);
    assert_eq!(assert_red_black_tree(&b), [0, 1, 2, 3, 4]);
}

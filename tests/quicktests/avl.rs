use balanced_bst::avl::Tree;

use std::collections::HashSet;

use quickcheck_macros::quickcheck;

use crate::Op;

/// Applies a set of operations to a tree and a hashset.
/// This way we can ensure that after a random smattering of inserts
/// and deletes we have the same set of keys in both.
fn do_ops<K>(ops: &[Op<K>], tree: &mut Tree<K>, set: &mut HashSet<K>)
where
    K: std::hash::Hash + Eq + Clone + Ord,
{
    for op in ops {
        match op {
            Op::Insert(k) => {
                assert_eq!(tree.insert(k.clone()), set.insert(k.clone()));
            }
            Op::Remove(k) => {
                assert_eq!(tree.remove(k), set.remove(k));
            }
        }
    }
}

#[quickcheck]
fn fuzz_multiple_operations_i8(ops: Vec<Op<i8>>) -> bool {
    let mut tree = Tree::new();
    let mut set = HashSet::new();

    do_ops(&ops, &mut tree, &mut set);
    tree.size() == set.len() && set.iter().all(|key| tree.contains(key))
}

#[quickcheck]
fn contains(xs: Vec<i8>) -> bool {
    let mut tree = Tree::new();
    for x in &xs {
        tree.insert(*x);
    }

    xs.iter().all(|x| tree.contains(x))
}

#[quickcheck]
fn contains_not(xs: Vec<i8>, nots: Vec<i8>) -> bool {
    let mut tree = Tree::new();
    for x in &xs {
        tree.insert(*x);
    }
    let added: HashSet<_> = xs.into_iter().collect();
    let nots: HashSet<_> = nots.into_iter().collect();
    let mut nots = nots.difference(&added);

    nots.all(|x| !tree.contains(x))
}

#[quickcheck]
fn with_deletions(xs: Vec<i8>, deletes: Vec<i8>) -> bool {
    let mut tree = Tree::new();
    for x in &xs {
        tree.insert(*x);
    }
    for delete in &deletes {
        tree.remove(delete);
    }

    let added: HashSet<_> = xs.into_iter().collect();
    let deleted: HashSet<_> = deletes.into_iter().collect();

    deleted.iter().all(|x| !tree.contains(x))
        && added.difference(&deleted).all(|x| tree.contains(x))
}

#[quickcheck]
fn in_order_is_sorted_and_complete(ops: Vec<Op<i8>>) -> bool {
    let mut tree = Tree::new();
    let mut set = HashSet::new();

    do_ops(&ops, &mut tree, &mut set);

    let mut expected: Vec<i8> = set.into_iter().collect();
    expected.sort_unstable();
    let keys: Vec<i8> = tree.in_order().into_iter().copied().collect();
    keys == expected
}

#[quickcheck]
fn validates_after_every_operation(ops: Vec<Op<i8>>) -> bool {
    let mut tree = Tree::new();
    let mut set = HashSet::new();

    for op in &ops {
        do_ops(std::slice::from_ref(op), &mut tree, &mut set);
        if !tree.validate() {
            return false;
        }
    }
    true
}

#[quickcheck]
fn height_stays_logarithmic(ops: Vec<Op<i8>>) -> bool {
    let mut tree = Tree::new();
    let mut set = HashSet::new();

    do_ops(&ops, &mut tree, &mut set);

    let bound = (1.45 * ((set.len() + 2) as f64).log2()) as isize;
    tree.height() <= bound
}

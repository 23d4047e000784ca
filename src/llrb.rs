//! A left-leaning red-black (LLRB) tree. Every link is colored red or
//! black, red links are only ever left children, and every path from the
//! root to an absent child crosses the same number of black nodes. Those
//! rules make the tree an encoding of a 2-3 tree, so its height stays
//! `O(lg N)`.
//!
//! Balance is repaired while unwinding from a mutation with three local
//! primitives: rotations that also transfer colors, a color flip that
//! splits a temporary 4-node, and (during deletion) `move_red_left` /
//! `move_red_right` passes that push a red link down ahead of the search
//! so that the node being removed is never a 2-node.
//!
//! # Examples
//!
//! ```
//! use balanced_bst::llrb::Tree;
//!
//! let mut tree = Tree::new();
//!
//! assert!(tree.insert(2));
//! assert!(tree.insert(1));
//! assert!(tree.insert(3));
//!
//! assert_eq!(tree.in_order(), vec![&1, &2, &3]);
//!
//! assert!(tree.remove(&1));
//! assert_eq!(tree.min(), Some(&2));
//! ```

use std::cmp::Ordering;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Color {
    Red,
    Black,
}

impl Color {
    fn flipped(self) -> Self {
        match self {
            Color::Red => Color::Black,
            Color::Black => Color::Red,
        }
    }
}

/// A self-balancing Binary Search Tree (specifically, a left-leaning
/// red-black tree). This can be used for inserting, finding, and deleting
/// keys. Duplicate keys are rejected rather than merged.
#[derive(Clone, Debug)]
pub struct Tree<K> {
    root: Option<Box<Node<K>>>,
}

#[derive(Clone, Debug)]
struct Node<K> {
    key: K,
    left: Option<Box<Node<K>>>,
    right: Option<Box<Node<K>>>,
    color: Color,
}

impl<K> Node<K> {
    /// New nodes always join the tree on a red link.
    fn new(key: K) -> Self {
        Node {
            key,
            left: None,
            right: None,
            color: Color::Red,
        }
    }
}

impl<K> Default for Tree<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K> Tree<K> {
    /// Generates a new, empty `Tree`.
    pub fn new() -> Self {
        Tree { root: None }
    }

    /// Returns `true` if the tree holds no keys.
    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Drops every key in the tree, leaving it empty.
    pub fn clear(&mut self) {
        self.root = None;
    }

    /// Counts the keys in the tree by walking it, in `O(N)`.
    pub fn size(&self) -> usize {
        Self::count(self.root.as_deref())
    }

    /// The number of edges on the longest path from the root to a leaf:
    /// `-1` for an empty tree and `0` for a single node. Nodes cache their
    /// color rather than their height, so this recomputes in `O(N)`.
    pub fn height(&self) -> isize {
        Self::subtree_height(self.root.as_deref()) as isize - 1
    }

    /// Collects references to every key in ascending order.
    pub fn in_order(&self) -> Vec<&K> {
        let mut keys = Vec::new();
        Self::collect_in_order(self.root.as_deref(), &mut keys);
        keys
    }

    fn count(node: Option<&Node<K>>) -> usize {
        node.map_or(0, |n| {
            1 + Self::count(n.left.as_deref()) + Self::count(n.right.as_deref())
        })
    }

    fn subtree_height(node: Option<&Node<K>>) -> usize {
        node.map_or(0, |n| {
            1 + Self::subtree_height(n.left.as_deref()).max(Self::subtree_height(n.right.as_deref()))
        })
    }

    fn collect_in_order<'a>(node: Option<&'a Node<K>>, keys: &mut Vec<&'a K>) {
        if let Some(n) = node {
            Self::collect_in_order(n.left.as_deref(), keys);
            keys.push(&n.key);
            Self::collect_in_order(n.right.as_deref(), keys);
        }
    }
}

impl<K: Ord> Tree<K> {
    /// Returns whether the given key is in the tree. Colors play no part in
    /// searching, this is a standard BST descent.
    pub fn contains(&self, key: &K) -> bool {
        let mut current = self.root.as_deref();
        while let Some(n) = current {
            current = match key.cmp(&n.key) {
                Ordering::Less => n.left.as_deref(),
                Ordering::Equal => return true,
                Ordering::Greater => n.right.as_deref(),
            };
        }
        false
    }

    /// Inserts the given key into the tree, fixing up colors on the path
    /// back to the root. Returns `false` without modifying the tree if the
    /// key was already present.
    ///
    /// # Examples
    ///
    /// ```
    /// use balanced_bst::llrb::Tree;
    ///
    /// let mut tree = Tree::new();
    ///
    /// assert!(tree.insert(1));
    /// assert!(!tree.insert(1));
    /// assert_eq!(tree.size(), 1);
    /// ```
    pub fn insert(&mut self, key: K) -> bool {
        let (mut root, inserted) = Self::insert_node(self.root.take(), key);
        // The root link is always black.
        root.color = Color::Black;
        self.root = Some(root);
        inserted
    }

    /// Removes the given key from the tree, fixing up colors on the path
    /// back to the root. Returns `false` without modifying the tree if the
    /// key was not present.
    ///
    /// # Examples
    ///
    /// ```
    /// use balanced_bst::llrb::Tree;
    ///
    /// let mut tree = Tree::new();
    /// tree.insert(1);
    ///
    /// assert!(tree.remove(&1));
    /// assert!(!tree.remove(&1));
    /// assert!(tree.is_empty());
    /// ```
    pub fn remove(&mut self, key: &K) -> bool {
        // The deletion descent assumes the key exists and is unsafe to run
        // otherwise.
        if !self.contains(key) {
            return false;
        }
        let mut root = self.root.take().expect("a contained key implies a root");
        if !is_red(root.left.as_deref()) && !is_red(root.right.as_deref()) {
            // Guarantee a red link is available to push down the search
            // path.
            root.color = Color::Red;
        }
        let mut root = Self::delete_node(root, key);
        if let Some(root) = root.as_mut() {
            root.color = Color::Black;
        }
        self.root = root;
        true
    }

    /// Returns the smallest key in the tree, or `None` if the tree is
    /// empty.
    pub fn min(&self) -> Option<&K> {
        let mut current = self.root.as_deref()?;
        while let Some(left) = current.left.as_deref() {
            current = left;
        }
        Some(&current.key)
    }

    /// Returns the largest key in the tree, or `None` if the tree is empty.
    pub fn max(&self) -> Option<&K> {
        let mut current = self.root.as_deref()?;
        while let Some(right) = current.right.as_deref() {
            current = right;
        }
        Some(&current.key)
    }

    /// Re-checks the invariants `insert` and `remove` are supposed to
    /// maintain, bottom-up and independently of the mutators: keys strictly
    /// ordered, a black root, no right-leaning red link, no red node with a
    /// red left child, and the same number of black nodes on every
    /// root-to-leaf path.
    ///
    /// Intended as a testing and debugging oracle rather than a hot-path
    /// operation.
    pub fn validate(&self) -> bool {
        if is_red(self.root.as_deref()) {
            return false;
        }
        Self::check_node(self.root.as_deref(), None, None).is_some()
    }

    fn insert_node(node: Option<Box<Node<K>>>, key: K) -> (Box<Node<K>>, bool) {
        let mut n = match node {
            None => return (Box::new(Node::new(key)), true),
            Some(n) => n,
        };
        let inserted = match key.cmp(&n.key) {
            Ordering::Less => {
                let (left, inserted) = Self::insert_node(n.left.take(), key);
                n.left = Some(left);
                inserted
            }
            // The subtree is untouched, so there is nothing to fix up.
            Ordering::Equal => return (n, false),
            Ordering::Greater => {
                let (right, inserted) = Self::insert_node(n.right.take(), key);
                n.right = Some(right);
                inserted
            }
        };
        (Self::fix_up(n), inserted)
    }

    /// Removes `key` from the subtree. The caller must have checked that
    /// the key is present, which is what makes the `expect`s below
    /// structural facts rather than guesses.
    fn delete_node(mut node: Box<Node<K>>, key: &K) -> Option<Box<Node<K>>> {
        if *key < node.key {
            if !is_red(node.left.as_deref())
                && !is_red(node.left.as_ref().and_then(|left| left.left.as_deref()))
            {
                node = Self::move_red_left(node);
            }
            let left = node.left.take().expect("the key is in the left subtree");
            node.left = Self::delete_node(left, key);
        } else {
            if is_red(node.left.as_deref()) {
                // Canonicalize a red left child so the matching and
                // right-side logic below is uniform.
                node = Self::rotate_right(node);
            }
            if *key == node.key && node.right.is_none() {
                return None;
            }
            if !is_red(node.right.as_deref())
                && !is_red(node.right.as_ref().and_then(|right| right.left.as_deref()))
            {
                node = Self::move_red_right(node);
            }
            // The rotations above may have moved a different key into
            // `node`, so the match is re-tested rather than carried down.
            if *key == node.key {
                let right = node
                    .right
                    .take()
                    .expect("a matched node with no right subtree was handled above");
                let (right, successor) = Self::delete_min(right);
                node.key = successor;
                node.right = right;
            } else {
                let right = node.right.take().expect("the key is in the right subtree");
                node.right = Self::delete_node(right, key);
            }
        }
        Some(Self::fix_up(node))
    }

    /// Strips the leftmost node from the subtree and returns the new
    /// subtree along with the removed key. In an LLRB tree the minimum
    /// cannot have a right child, so dropping it needs no replacement.
    fn delete_min(mut node: Box<Node<K>>) -> (Option<Box<Node<K>>>, K) {
        if node.left.is_none() {
            let n = *node;
            return (None, n.key);
        }
        if !is_red(node.left.as_deref())
            && !is_red(node.left.as_ref().and_then(|left| left.left.as_deref()))
        {
            node = Self::move_red_left(node);
        }
        let left = node.left.take().expect("delete_min descends into a left subtree");
        let (left, min) = Self::delete_min(left);
        node.left = left;
        (Some(Self::fix_up(node)), min)
    }

    /// Restores the local color invariants while unwinding: undo a
    /// right-leaning red, flatten two reds in a row on the left, and split
    /// a 4-node. Applied in that order at every level, these three checks
    /// are enough to repair any single local change.
    fn fix_up(mut node: Box<Node<K>>) -> Box<Node<K>> {
        if is_red(node.right.as_deref()) && !is_red(node.left.as_deref()) {
            node = Self::rotate_left(node);
        }
        if is_red(node.left.as_deref())
            && is_red(node.left.as_ref().and_then(|left| left.left.as_deref()))
        {
            node = Self::rotate_right(node);
        }
        if is_red(node.left.as_deref()) && is_red(node.right.as_deref()) {
            Self::flip_colors(&mut node);
        }
        node
    }

    /// Same pointer surgery as an AVL rotation, plus color transfer: the
    /// lifted child takes over the old root's color and the demoted node
    /// turns red.
    fn rotate_left(mut node: Box<Node<K>>) -> Box<Node<K>> {
        let mut x = node.right.take().expect("rotate_left requires a right child");
        node.right = x.left.take();
        x.color = node.color;
        node.color = Color::Red;
        x.left = Some(node);
        x
    }

    /// Mirror image of [`Self::rotate_left`].
    fn rotate_right(mut node: Box<Node<K>>) -> Box<Node<K>> {
        let mut x = node.left.take().expect("rotate_right requires a left child");
        node.left = x.right.take();
        x.color = node.color;
        node.color = Color::Red;
        x.right = Some(node);
        x
    }

    /// Toggles the color of the node and of both its children. Splits a
    /// 4-node on the way up, or merges one on the way down during deletion.
    fn flip_colors(node: &mut Node<K>) {
        node.color = node.color.flipped();
        let left = node.left.as_mut().expect("flip_colors requires two children");
        left.color = left.color.flipped();
        let right = node.right.as_mut().expect("flip_colors requires two children");
        right.color = right.color.flipped();
    }

    /// Called when about to descend left into a 2-node. Flips colors to
    /// push a red link down; when the right sibling has a red left
    /// grandchild, borrows it with a double rotation instead and re-flips.
    fn move_red_left(mut node: Box<Node<K>>) -> Box<Node<K>> {
        Self::flip_colors(&mut node);
        if is_red(node.right.as_ref().and_then(|right| right.left.as_deref())) {
            let right = node.right.take().expect("move_red_left requires a right child");
            node.right = Some(Self::rotate_right(right));
            node = Self::rotate_left(node);
            Self::flip_colors(&mut node);
        }
        node
    }

    /// Mirror image of [`Self::move_red_left`], for descending right.
    fn move_red_right(mut node: Box<Node<K>>) -> Box<Node<K>> {
        Self::flip_colors(&mut node);
        if is_red(node.left.as_ref().and_then(|left| left.left.as_deref())) {
            node = Self::rotate_right(node);
            Self::flip_colors(&mut node);
        }
        node
    }

    /// Returns the subtree's black-height when every invariant holds below
    /// `node`, with `low`/`high` carrying the exclusive key bounds
    /// inherited from the ancestors.
    fn check_node(node: Option<&Node<K>>, low: Option<&K>, high: Option<&K>) -> Option<usize> {
        let n = match node {
            // Absent children count as black.
            None => return Some(1),
            Some(n) => n,
        };
        if low.map_or(false, |low| n.key <= *low) || high.map_or(false, |high| n.key >= *high) {
            return None;
        }
        // A red link never leans right, and red links never chain.
        if is_red(n.right.as_deref()) {
            return None;
        }
        if n.color == Color::Red && is_red(n.left.as_deref()) {
            return None;
        }
        let left = Self::check_node(n.left.as_deref(), low, Some(&n.key))?;
        let right = Self::check_node(n.right.as_deref(), Some(&n.key), high)?;
        if left != right {
            return None;
        }
        Some(left + (n.color == Color::Black) as usize)
    }
}

fn is_red<K>(node: Option<&Node<K>>) -> bool {
    node.map_or(false, |n| n.color == Color::Red)
}

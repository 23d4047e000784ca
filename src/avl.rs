//! An AVL tree. Every `Node` caches the height of the subtree below it and
//! rebalancing keeps the heights of sibling subtrees within one of each
//! other, so the tree as a whole stays `O(lg N)` tall.
//!
//! Operations that modify the tree recurse down to the point of change and
//! repair the balance invariant on every node they unwind through. The
//! repair is a single or double rotation chosen from the node's balance
//! factor (left height minus right height).
//!
//! # Examples
//!
//! ```
//! use balanced_bst::avl::Tree;
//!
//! let mut tree = Tree::new();
//!
//! // Nothing in here yet.
//! assert!(!tree.contains(&1));
//!
//! assert!(tree.insert(1));
//! assert!(tree.insert(2));
//! assert!(tree.insert(3));
//!
//! // Inserting an existing key reports `false` and changes nothing.
//! assert!(!tree.insert(2));
//!
//! // The keys come back sorted no matter the insertion order.
//! assert_eq!(tree.in_order(), vec![&1, &2, &3]);
//!
//! assert!(tree.remove(&2));
//! assert!(!tree.contains(&2));
//! ```

use std::cmp::Ordering;

/// A self-balancing Binary Search Tree (specifically, an AVL tree). This
/// can be used for inserting, finding, and deleting keys. Duplicate keys
/// are rejected rather than merged.
#[derive(Clone, Debug)]
pub struct Tree<K> {
    root: Option<Box<Node<K>>>,
}

#[derive(Clone, Debug)]
struct Node<K> {
    key: K,
    left: Option<Box<Node<K>>>,
    right: Option<Box<Node<K>>>,

    /// Nodes on the longest path from this node down to a leaf, this node
    /// included. A node with no children has a height of 1.
    height: usize,
}

impl<K> Node<K> {
    fn new(key: K) -> Self {
        Node {
            key,
            left: None,
            right: None,
            height: 1,
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
    /// `-1` for an empty tree and `0` for a single node. Reads the height
    /// cached at the root, in `O(1)`.
    ///
    /// # Examples
    ///
    /// ```
    /// use balanced_bst::avl::Tree;
    ///
    /// let mut tree = Tree::new();
    /// assert_eq!(tree.height(), -1);
    ///
    /// tree.insert(1);
    /// assert_eq!(tree.height(), 0);
    ///
    /// tree.insert(2);
    /// assert_eq!(tree.height(), 1);
    /// ```
    pub fn height(&self) -> isize {
        Self::node_height(&self.root) as isize - 1
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

    fn collect_in_order<'a>(node: Option<&'a Node<K>>, keys: &mut Vec<&'a K>) {
        if let Some(n) = node {
            Self::collect_in_order(n.left.as_deref(), keys);
            keys.push(&n.key);
            Self::collect_in_order(n.right.as_deref(), keys);
        }
    }

    fn node_height(node: &Option<Box<Node<K>>>) -> usize {
        node.as_ref().map_or(0, |n| n.height)
    }
}

impl<K: Ord> Tree<K> {
    /// Returns whether the given key is in the tree.
    ///
    /// # Examples
    ///
    /// ```
    /// use balanced_bst::avl::Tree;
    ///
    /// let mut tree = Tree::new();
    /// tree.insert(1);
    ///
    /// assert!(tree.contains(&1));
    /// assert!(!tree.contains(&42));
    /// ```
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

    /// Inserts the given key into the tree and rebalances every node on the
    /// path back to the root. Returns `false` without modifying the tree if
    /// the key was already present.
    ///
    /// # Examples
    ///
    /// ```
    /// use balanced_bst::avl::Tree;
    ///
    /// let mut tree = Tree::new();
    ///
    /// assert!(tree.insert(1));
    /// assert!(!tree.insert(1));
    /// assert_eq!(tree.size(), 1);
    /// ```
    pub fn insert(&mut self, key: K) -> bool {
        let (root, inserted) = Self::insert_node(self.root.take(), key);
        self.root = Some(root);
        inserted
    }

    /// Removes the given key from the tree and rebalances every node on the
    /// path back to the root. Returns `false` without modifying the tree if
    /// the key was not present.
    ///
    /// # Examples
    ///
    /// ```
    /// use balanced_bst::avl::Tree;
    ///
    /// let mut tree = Tree::new();
    /// tree.insert(1);
    ///
    /// assert!(tree.remove(&1));
    /// assert!(!tree.remove(&1));
    /// assert!(tree.is_empty());
    /// ```
    pub fn remove(&mut self, key: &K) -> bool {
        let (root, removed) = Self::remove_node(self.root.take(), key);
        self.root = root;
        removed
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
    /// maintain, bottom-up and independently of the cached metadata: keys
    /// strictly ordered, every cached height equal to one more than the
    /// taller child, and every balance factor in `[-1, 1]`.
    ///
    /// Intended as a testing and debugging oracle rather than a hot-path
    /// operation.
    pub fn validate(&self) -> bool {
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
            // The subtree is untouched, so there is nothing to rebalance.
            Ordering::Equal => return (n, false),
            Ordering::Greater => {
                let (right, inserted) = Self::insert_node(n.right.take(), key);
                n.right = Some(right);
                inserted
            }
        };
        (Self::rebalance(n), inserted)
    }

    fn remove_node(node: Option<Box<Node<K>>>, key: &K) -> (Option<Box<Node<K>>>, bool) {
        let mut n = match node {
            None => return (None, false),
            Some(n) => n,
        };
        match key.cmp(&n.key) {
            Ordering::Less => {
                let (left, removed) = Self::remove_node(n.left.take(), key);
                n.left = left;
                (Some(Self::rebalance(n)), removed)
            }
            Ordering::Greater => {
                let (right, removed) = Self::remove_node(n.right.take(), key);
                n.right = right;
                (Some(Self::rebalance(n)), removed)
            }
            Ordering::Equal => {
                let replacement = match (n.left.take(), n.right.take()) {
                    (None, None) => None,
                    (Some(child), None) | (None, Some(child)) => Some(child),

                    // With two children we overwrite this node's key with
                    // its in-order successor (the smallest key of the right
                    // subtree) and structurally remove the successor's old
                    // node instead.
                    (Some(left), Some(right)) => {
                        let (right, successor) = Self::remove_min(right);
                        n.key = successor;
                        n.left = Some(left);
                        n.right = right;
                        Some(Self::rebalance(n))
                    }
                };
                (replacement, true)
            }
        }
    }

    /// Strips the smallest node from the subtree, rebalancing the unwind
    /// path, and returns the new subtree along with the removed key.
    fn remove_min(mut node: Box<Node<K>>) -> (Option<Box<Node<K>>>, K) {
        match node.left.take() {
            None => {
                let n = *node;
                (n.right, n.key)
            }
            Some(left) => {
                let (left, min) = Self::remove_min(left);
                node.left = left;
                (Some(Self::rebalance(node)), min)
            }
        }
    }

    fn balance_factor(node: &Node<K>) -> isize {
        Self::node_height(&node.left) as isize - Self::node_height(&node.right) as isize
    }

    fn update_height(node: &mut Node<K>) {
        node.height = 1 + Self::node_height(&node.left).max(Self::node_height(&node.right));
    }

    /// Recomputes the node's height and repairs its balance factor with at
    /// most two rotations. A left-heavy node whose left child leans right
    /// (or the mirror image) needs the child pre-rotated first, otherwise a
    /// single rotation suffices.
    fn rebalance(mut node: Box<Node<K>>) -> Box<Node<K>> {
        Self::update_height(&mut node);
        let balance = Self::balance_factor(&node);

        if balance > 1 {
            let left = node.left.as_ref().expect("left-heavy node has a left child");
            if Self::balance_factor(left) < 0 {
                let left = node.left.take().expect("left-heavy node has a left child");
                node.left = Some(Self::rotate_left(left));
            }
            return Self::rotate_right(node);
        }

        if balance < -1 {
            let right = node
                .right
                .as_ref()
                .expect("right-heavy node has a right child");
            if Self::balance_factor(right) > 0 {
                let right = node
                    .right
                    .take()
                    .expect("right-heavy node has a right child");
                node.right = Some(Self::rotate_right(right));
            }
            return Self::rotate_left(node);
        }

        node
    }

    /// Lifts the left child up to be the new subtree root. Its old right
    /// subtree is reparented as the demoted node's left subtree, preserving
    /// BST order. Heights are fixed child first, then the new root.
    fn rotate_right(mut y: Box<Node<K>>) -> Box<Node<K>> {
        let mut x = y.left.take().expect("rotate_right requires a left child");
        y.left = x.right.take();
        Self::update_height(&mut y);
        x.right = Some(y);
        Self::update_height(&mut x);
        x
    }

    /// Mirror image of [`Self::rotate_right`].
    fn rotate_left(mut x: Box<Node<K>>) -> Box<Node<K>> {
        let mut y = x.right.take().expect("rotate_left requires a right child");
        x.right = y.left.take();
        Self::update_height(&mut x);
        y.left = Some(x);
        Self::update_height(&mut y);
        y
    }

    /// Returns the subtree's height if every invariant holds below `node`,
    /// with `low`/`high` carrying the exclusive key bounds inherited from
    /// the ancestors.
    fn check_node(node: Option<&Node<K>>, low: Option<&K>, high: Option<&K>) -> Option<usize> {
        let n = match node {
            None => return Some(0),
            Some(n) => n,
        };
        if low.map_or(false, |low| n.key <= *low) || high.map_or(false, |high| n.key >= *high) {
            return None;
        }
        let left = Self::check_node(n.left.as_deref(), low, Some(&n.key))?;
        let right = Self::check_node(n.right.as_deref(), Some(&n.key), high)?;
        if n.height != 1 + left.max(right) || left.abs_diff(right) > 1 {
            return None;
        }
        Some(n.height)
    }
}

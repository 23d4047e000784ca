//! This crate exposes two choices for self-balancing Binary Search Trees
//! (BSTs) mostly for educational purposes.
//!
//! ## Binary Search Tree
//!
//! A Binary Search Tree is a data structure supporting operations to
//! insert, find, and delete stored keys. BSTs are typically defined
//! recursively using the notion of a `Node`. A `Node` stores a key and
//! sometimes has child `Node`s. The most important invariants of a BST are:
//!
//! 1. For every `Node` in a BST, all the `Node`s in its left subtree have a
//!    key less than its own key.
//! 2. For every `Node` in a BST, all the `Node`s in its right subtree have a
//!    key greater than its own key.
//!
//! These invariants mean searching the tree takes `O(height)` (where
//! `height` is the longest path from the root `Node` to a leaf `Node`), and
//! an in-order walk always yields the keys in sorted order. What they do
//! *not* guarantee is that `height` stays small - inserting keys in sorted
//! order degrades a plain BST into a linked list.
//!
//! ## Self-balancing trees
//!
//! Both trees in this crate restructure themselves while unwinding from an
//! insert or delete so that their height stays `O(lg N)` no matter the
//! order of operations. They differ in the metadata each `Node` carries and
//! in the repair work done on the way back up:
//!
//! * [`avl::Tree`] caches the height of every subtree and applies single or
//!   double rotations wherever sibling heights drift more than one apart.
//! * [`llrb::Tree`] colors every link red or black (a left-leaning
//!   red-black tree) and restores its color invariants with rotations and
//!   color flips.
//!
//! The two modules expose the same operations, so they are interchangeable;
//! pick whichever rebalancing strategy you want to study. Each also exposes
//! a `validate` method that independently re-checks every invariant its
//! mutators are supposed to maintain, which the test suites lean on
//! heavily.

#![deny(missing_docs, clippy::clone_on_ref_ptr)]

pub mod avl;
pub mod llrb;

#[cfg(test)]
pub(crate) mod test;

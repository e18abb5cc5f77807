use generational_arena::{Arena, Index};
use std::{fmt, mem};
use tracing::instrument;

use crate::domain::error::{DomainError, DomainResult};

/// Node of a Huffman tree.
///
/// A leaf carries a symbol and no children; an internal node carries exactly
/// two children and no symbol.
#[derive(Debug, Clone)]
pub struct TreeNode<S> {
    /// Input symbol, present only on leaves
    pub symbol: Option<S>,
    /// Weight of this subtree (sum of its leaf frequencies)
    pub frequency: u64,
    /// Index of the left child in the arena
    pub left: Option<Index>,
    /// Index of the right child in the arena
    pub right: Option<Index>,
}

impl<S> TreeNode<S> {
    pub fn is_leaf(&self) -> bool {
        self.left.is_none() && self.right.is_none()
    }

    /// Both children of an internal node, `None` for leaves.
    pub fn children(&self) -> Option<(Index, Index)> {
        self.left.zip(self.right)
    }
}

impl<S: fmt::Debug> fmt::Display for TreeNode<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.symbol {
            Some(symbol) => write!(f, "{:?} ({})", symbol, self.frequency),
            None => write!(f, "* ({})", self.frequency),
        }
    }
}

/// Arena-backed Huffman tree.
///
/// Nodes are only ever added while the tree is being built; once
/// [`TreeArena::set_root`] has been called by the builder the tree is exposed
/// read-only. Each internal node owns its two children, so dropping the arena
/// drops the whole tree.
#[derive(Debug)]
pub struct TreeArena<S> {
    arena: Arena<TreeNode<S>>,
    root: Option<Index>,
    leaves: usize,
}

/// The tree produced by the builder.
pub type HuffmanTree<S> = TreeArena<S>;

impl<S> TreeArena<S> {
    /// Reserve room for a full binary tree over `leaves` symbols (`2n - 1` nodes).
    pub(crate) fn with_leaf_capacity(leaves: usize) -> DomainResult<Self> {
        let nodes = leaves.saturating_mul(2).saturating_sub(1);
        // arena entries carry a generation tag on top of the node itself
        let entry_size = mem::size_of::<TreeNode<S>>() + 2 * mem::size_of::<u64>();
        match nodes.checked_mul(entry_size) {
            Some(bytes) if bytes <= isize::MAX as usize => {}
            _ => {
                return Err(DomainError::ResourceExhausted {
                    what: "tree nodes",
                    requested: nodes,
                })
            }
        }
        Ok(Self {
            arena: Arena::with_capacity(nodes),
            root: None,
            leaves: 0,
        })
    }

    pub(crate) fn insert_leaf(&mut self, symbol: S, frequency: u64) -> Index {
        self.leaves += 1;
        self.arena.insert(TreeNode {
            symbol: Some(symbol),
            frequency,
            left: None,
            right: None,
        })
    }

    pub(crate) fn insert_internal(&mut self, frequency: u64, left: Index, right: Index) -> Index {
        self.arena.insert(TreeNode {
            symbol: None,
            frequency,
            left: Some(left),
            right: Some(right),
        })
    }

    pub(crate) fn set_root(&mut self, root: Index) {
        self.root = Some(root);
    }

    pub fn get_node(&self, idx: Index) -> Option<&TreeNode<S>> {
        self.arena.get(idx)
    }

    pub fn root(&self) -> Option<Index> {
        self.root
    }

    pub fn root_node(&self) -> Option<&TreeNode<S>> {
        self.root.and_then(|idx| self.get_node(idx))
    }

    /// Frequency of the root, i.e. the sum of all input frequencies.
    pub fn total_frequency(&self) -> u64 {
        self.root_node().map(|node| node.frequency).unwrap_or(0)
    }

    pub fn leaf_count(&self) -> usize {
        self.leaves
    }

    pub fn node_count(&self) -> usize {
        self.arena.len()
    }

    pub fn iter(&self) -> TreeIterator<'_, S> {
        TreeIterator::new(self)
    }

    /// Number of edges on the longest root-to-leaf path.
    #[instrument(level = "debug", skip(self))]
    pub fn depth(&self) -> usize {
        let mut max_depth = 0;
        let mut stack: Vec<(Index, usize)> = self.root.into_iter().map(|idx| (idx, 0)).collect();

        while let Some((idx, depth)) = stack.pop() {
            max_depth = max_depth.max(depth);
            if let Some((left, right)) = self.get_node(idx).and_then(TreeNode::children) {
                stack.push((right, depth + 1));
                stack.push((left, depth + 1));
            }
        }
        max_depth
    }

    /// Collects all leaf nodes in left-to-right order.
    pub fn leaf_nodes(&self) -> Vec<&TreeNode<S>> {
        self.iter().map(|(_, node)| node).filter(|node| node.is_leaf()).collect()
    }
}

/// Pre-order iterator, left subtree before right.
pub struct TreeIterator<'a, S> {
    tree: &'a TreeArena<S>,
    stack: Vec<Index>,
}

impl<'a, S> TreeIterator<'a, S> {
    fn new(tree: &'a TreeArena<S>) -> Self {
        Self {
            tree,
            stack: tree.root().into_iter().collect(),
        }
    }
}

impl<'a, S> Iterator for TreeIterator<'a, S> {
    type Item = (Index, &'a TreeNode<S>);

    fn next(&mut self) -> Option<Self::Item> {
        let current_idx = self.stack.pop()?;
        let node = self.tree.get_node(current_idx)?;
        // Push right first so left is visited first
        if let Some((left, right)) = node.children() {
            self.stack.push(right);
            self.stack.push(left);
        }
        Some((current_idx, node))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small_tree() -> TreeArena<char> {
        // (a:1, (b:2, c:3)) built by hand
        let mut tree = TreeArena::with_leaf_capacity(3).unwrap();
        let a = tree.insert_leaf('a', 1);
        let b = tree.insert_leaf('b', 2);
        let c = tree.insert_leaf('c', 3);
        let bc = tree.insert_internal(5, b, c);
        let root = tree.insert_internal(6, a, bc);
        tree.set_root(root);
        tree
    }

    #[test]
    fn test_iter_visits_preorder_left_first() {
        let tree = small_tree();
        let freqs: Vec<u64> = tree.iter().map(|(_, n)| n.frequency).collect();
        assert_eq!(freqs, vec![6, 1, 5, 2, 3]);
    }

    #[test]
    fn test_depth_and_counts() {
        let tree = small_tree();
        assert_eq!(tree.depth(), 2);
        assert_eq!(tree.leaf_count(), 3);
        assert_eq!(tree.node_count(), 5);
        assert_eq!(tree.total_frequency(), 6);
    }

    #[test]
    fn test_leaf_nodes_in_order() {
        let tree = small_tree();
        let symbols: Vec<char> = tree.leaf_nodes().iter().filter_map(|n| n.symbol).collect();
        assert_eq!(symbols, vec!['a', 'b', 'c']);
    }

    #[test]
    fn test_empty_tree() {
        let tree: TreeArena<char> = TreeArena::with_leaf_capacity(0).unwrap();
        assert_eq!(tree.depth(), 0);
        assert_eq!(tree.total_frequency(), 0);
        assert_eq!(tree.iter().count(), 0);
    }

    #[test]
    fn test_oversized_alphabet_is_resource_exhausted() {
        let err = TreeArena::<char>::with_leaf_capacity(usize::MAX / 2).unwrap_err();
        assert!(matches!(err, DomainError::ResourceExhausted { .. }));
    }

    #[test]
    fn test_display_node() {
        let tree = small_tree();
        let root = tree.root_node().unwrap();
        assert_eq!(root.to_string(), "* (6)");
        let leaf = tree.leaf_nodes()[0];
        assert_eq!(leaf.to_string(), "'a' (1)");
    }
}

//! Tree rendering via termtree.

use std::fmt;

use generational_arena::Index;
use termtree::Tree;
use tracing::instrument;

use crate::domain::{DomainError, DomainResult, HuffmanTree};

/// Deepest tree that will be rendered. `termtree::Tree` is a nested value whose
/// drop recurses once per level, so skewed trees (e.g. many zero frequencies)
/// are refused instead.
pub const MAX_RENDER_DEPTH: usize = 1024;

pub trait ToTermTree {
    fn to_term_tree(&self) -> DomainResult<Tree<String>>;
}

enum Frame {
    /// Visit a node at `depth`, reached over the edge labelled `bit`.
    Enter(Index, usize, Option<char>),
    /// Both children of an internal node with this weight are rendered.
    Join(u64),
}

// Leaves are labelled `'a' (5) = 0101`, internal nodes with their weight.
impl<S: fmt::Debug> ToTermTree for HuffmanTree<S> {
    #[instrument(level = "debug", skip_all)]
    fn to_term_tree(&self) -> DomainResult<Tree<String>> {
        let Some(root) = self.root() else {
            return Ok(Tree::new("Empty tree".to_string()));
        };
        let depth = self.depth();
        if depth > MAX_RENDER_DEPTH {
            return Err(DomainError::invalid_input(format!(
                "tree depth {depth} exceeds render limit {MAX_RENDER_DEPTH}"
            )));
        }

        let mut path = String::with_capacity(depth);
        let mut done: Vec<Tree<String>> = Vec::new();
        let mut stack = vec![Frame::Enter(root, 0, None)];

        while let Some(frame) = stack.pop() {
            match frame {
                Frame::Enter(idx, depth, bit) => {
                    path.truncate(depth.saturating_sub(1));
                    if let Some(bit) = bit {
                        path.push(bit);
                    }
                    let Some(node) = self.get_node(idx) else {
                        done.push(Tree::new("?".to_string()));
                        continue;
                    };
                    match node.children() {
                        Some((left, right)) => {
                            stack.push(Frame::Join(node.frequency));
                            stack.push(Frame::Enter(right, depth + 1, Some('1')));
                            stack.push(Frame::Enter(left, depth + 1, Some('0')));
                        }
                        None => {
                            let code = if path.is_empty() { "0" } else { path.as_str() };
                            done.push(Tree::new(format!("{} = {}", node, code)));
                        }
                    }
                }
                Frame::Join(frequency) => {
                    let right = done.pop();
                    let left = done.pop();
                    let mut subtree = Tree::new(format!("({})", frequency));
                    subtree.extend(left.into_iter().chain(right));
                    done.push(subtree);
                }
            }
        }

        Ok(done
            .pop()
            .unwrap_or_else(|| Tree::new("Empty tree".to_string())))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::TreeBuilder;

    #[test]
    fn test_render_labels_leaves_with_codes() {
        let tree = TreeBuilder::new().build(&['x', 'y', 'z'], &[1, 2, 4]).unwrap();
        let rendered = tree.to_term_tree().unwrap().to_string();
        assert!(rendered.starts_with("(7)"));
        assert!(rendered.contains("'z' (4) = 1"));
        assert!(rendered.contains("'x' (1) = 00"));
        assert!(rendered.contains("'y' (2) = 01"));
    }

    #[test]
    fn test_render_keeps_left_before_right() {
        let tree = TreeBuilder::new().build(&['x', 'y', 'z'], &[1, 2, 4]).unwrap();
        let rendered = tree.to_term_tree().unwrap().to_string();
        let lines: Vec<&str> = rendered.lines().collect();
        assert_eq!(lines.len(), 5);
        assert!(lines[1].ends_with("(3)"));
        assert!(lines[2].ends_with("'x' (1) = 00"));
        assert!(lines[3].ends_with("'y' (2) = 01"));
        assert!(lines[4].ends_with("'z' (4) = 1"));
    }

    #[test]
    fn test_render_single_leaf() {
        let tree = TreeBuilder::new().build(&['a'], &[5]).unwrap();
        assert_eq!(tree.to_term_tree().unwrap().to_string().trim_end(), "'a' (5) = 0");
    }

    #[test]
    fn test_render_zero_frequencies_within_limit() {
        let symbols: Vec<u32> = (0..200).collect();
        let tree = TreeBuilder::new().build(&symbols, &[0u64; 200]).unwrap();
        assert_eq!(tree.depth(), 199);

        let rendered = tree.to_term_tree().unwrap().to_string();
        assert_eq!(rendered.lines().count(), tree.node_count());
    }

    #[test]
    fn test_render_refuses_deeply_skewed_tree() {
        let symbols: Vec<u32> = (0..3_000).collect();
        let tree = TreeBuilder::new()
            .build(&symbols, &vec![0u64; symbols.len()])
            .unwrap();
        assert!(tree.depth() > MAX_RENDER_DEPTH);

        let err = tree.to_term_tree().unwrap_err();
        assert!(matches!(err, DomainError::InvalidInput { .. }));
    }
}

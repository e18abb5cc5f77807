//! Code extraction: turns root-to-leaf paths into bit strings.

use std::fmt;

use generational_arena::Index;
use tracing::{debug, instrument};

use crate::domain::arena::HuffmanTree;

/// A bit string, most significant (closest to the root) bit first.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Code(Vec<bool>);

impl Code {
    pub fn bits(&self) -> &[bool] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn is_prefix_of(&self, other: &Code) -> bool {
        other.0.starts_with(&self.0)
    }
}

impl From<&[bool]> for Code {
    fn from(bits: &[bool]) -> Self {
        Self(bits.to_vec())
    }
}

impl fmt::Display for Code {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for &bit in &self.0 {
            f.write_str(if bit { "1" } else { "0" })?;
        }
        Ok(())
    }
}

/// One leaf of the tree with its assigned code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeEntry<S> {
    pub symbol: S,
    pub frequency: u64,
    pub code: Code,
}

/// Codes for every leaf, in traversal order (left subtree first).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeTable<S> {
    entries: Vec<CodeEntry<S>>,
}

impl<S> CodeTable<S> {
    pub fn iter(&self) -> std::slice::Iter<'_, CodeEntry<S>> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Sum of `code length * frequency` over all leaves.
    pub fn weighted_length(&self) -> u128 {
        self.entries
            .iter()
            .map(|e| e.code.len() as u128 * e.frequency as u128)
            .sum()
    }

    /// Expected code length per symbol occurrence, `None` if all frequencies are zero.
    pub fn average_length(&self) -> Option<f64> {
        let total: u128 = self.entries.iter().map(|e| e.frequency as u128).sum();
        if total == 0 {
            return None;
        }
        Some(self.weighted_length() as f64 / total as f64)
    }

    pub fn max_length(&self) -> usize {
        self.entries.iter().map(|e| e.code.len()).max().unwrap_or(0)
    }

    /// True if no code is a prefix of another one.
    pub fn is_prefix_free(&self) -> bool {
        self.entries.iter().enumerate().all(|(i, a)| {
            self.entries
                .iter()
                .enumerate()
                .all(|(j, b)| i == j || !a.code.is_prefix_of(&b.code))
        })
    }
}

impl<S: PartialEq> CodeTable<S> {
    /// Code of the first leaf carrying `symbol`.
    pub fn get(&self, symbol: &S) -> Option<&Code> {
        self.entries
            .iter()
            .find(|e| &e.symbol == symbol)
            .map(|e| &e.code)
    }
}

impl<'a, S> IntoIterator for &'a CodeTable<S> {
    type Item = &'a CodeEntry<S>;
    type IntoIter = std::slice::Iter<'a, CodeEntry<S>>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

/// Walks a finished tree and assigns `0` to left edges and `1` to right edges.
#[derive(Debug, Default, Clone, Copy)]
pub struct CodeGenerator;

impl CodeGenerator {
    pub fn new() -> Self {
        Self
    }

    /// Generate the code table for every leaf of `tree`.
    ///
    /// A tree whose root is itself a leaf has no edges; its only symbol gets
    /// the one-bit code `0`.
    #[instrument(level = "debug", skip_all, fields(leaves = tree.leaf_count()))]
    pub fn generate<S: Clone>(&self, tree: &HuffmanTree<S>) -> CodeTable<S> {
        let mut entries = Vec::with_capacity(tree.leaf_count());
        let Some(root) = tree.root() else {
            return CodeTable { entries };
        };

        // Worst case (fully skewed tree) depth is leaves - 1.
        let mut path: Vec<bool> = Vec::with_capacity(tree.leaf_count());
        // (node, depth of node, bit on the edge into node)
        let mut stack: Vec<(Index, usize, Option<bool>)> = vec![(root, 0, None)];

        while let Some((idx, depth, bit)) = stack.pop() {
            let Some(node) = tree.get_node(idx) else {
                continue;
            };
            path.truncate(depth.saturating_sub(1));
            if let Some(bit) = bit {
                path.push(bit);
            }

            match (node.children(), &node.symbol) {
                (Some((left, right)), _) => {
                    stack.push((right, depth + 1, Some(true)));
                    stack.push((left, depth + 1, Some(false)));
                }
                (None, Some(symbol)) => {
                    let code = if depth == 0 {
                        Code(vec![false])
                    } else {
                        Code::from(path.as_slice())
                    };
                    entries.push(CodeEntry {
                        symbol: symbol.clone(),
                        frequency: node.frequency,
                        code,
                    });
                }
                (None, None) => {}
            }
        }

        debug!(codes = entries.len(), "codes generated");
        CodeTable { entries }
    }
}

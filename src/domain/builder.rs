//! Greedy Huffman tree construction.

use generational_arena::Index;
use tracing::{debug, instrument, trace};

use crate::domain::arena::HuffmanTree;
use crate::domain::error::{DomainError, DomainResult};
use crate::domain::heap::{MinHeap, Weighted};

/// Heap entry: a detached subtree and its weight.
#[derive(Debug, Clone, Copy)]
struct Subtree {
    node: Index,
    frequency: u64,
}

impl Weighted for Subtree {
    fn weight(&self) -> u64 {
        self.frequency
    }
}

fn empty_heap() -> DomainError {
    DomainError::invalid_input("empty alphabet")
}

/// Constructs Huffman trees from symbol frequency tables.
#[derive(Debug, Default, Clone, Copy)]
pub struct TreeBuilder;

impl TreeBuilder {
    pub fn new() -> Self {
        Self
    }

    /// Build a tree from parallel symbol and frequency sequences.
    ///
    /// `symbols[i]` is paired with `frequencies[i]`. Both must be non-empty and
    /// of equal length. Duplicate symbols are kept as separate leaves.
    ///
    /// The two lightest subtrees are merged until one remains; the first one
    /// extracted becomes the left child.
    #[instrument(level = "debug", skip_all, fields(symbols = symbols.len()))]
    pub fn build<S: Clone>(&self, symbols: &[S], frequencies: &[u64]) -> DomainResult<HuffmanTree<S>> {
        if symbols.is_empty() {
            return Err(DomainError::invalid_input("empty alphabet"));
        }
        if symbols.len() != frequencies.len() {
            return Err(DomainError::invalid_input(format!(
                "{} symbols but {} frequencies",
                symbols.len(),
                frequencies.len()
            )));
        }

        let mut tree = HuffmanTree::with_leaf_capacity(symbols.len())?;
        let mut leaves: Vec<Subtree> = Vec::new();
        leaves
            .try_reserve_exact(symbols.len())
            .map_err(|_| DomainError::ResourceExhausted {
                what: "heap slots",
                requested: symbols.len(),
            })?;
        leaves.extend(symbols.iter().zip(frequencies).map(|(symbol, &frequency)| Subtree {
            node: tree.insert_leaf(symbol.clone(), frequency),
            frequency,
        }));

        let mut heap = MinHeap::build_from(leaves);
        while !heap.is_singleton() {
            let left = heap.extract_min().ok_or_else(empty_heap)?;
            let right = heap.extract_min().ok_or_else(empty_heap)?;
            let frequency = left
                .frequency
                .checked_add(right.frequency)
                .ok_or_else(|| DomainError::invalid_input("total frequency overflows u64"))?;
            trace!(left = left.frequency, right = right.frequency, "merge");

            let node = tree.insert_internal(frequency, left.node, right.node);
            heap.insert(Subtree { node, frequency });
        }

        let root = heap.extract_min().ok_or_else(empty_heap)?;
        tree.set_root(root.node);
        debug!(
            total = root.frequency,
            nodes = tree.node_count(),
            "huffman tree built"
        );
        Ok(tree)
    }

    /// Build a tree from `(symbol, frequency)` pairs.
    pub fn build_from_pairs<S: Clone>(&self, pairs: &[(S, u64)]) -> DomainResult<HuffmanTree<S>> {
        let (symbols, frequencies): (Vec<S>, Vec<u64>) = pairs.iter().cloned().unzip();
        self.build(&symbols, &frequencies)
    }
}

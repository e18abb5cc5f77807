//! # huffcode
//!
//! Optimal prefix-free (Huffman) codes for a finite alphabet.
//!
//! ```rust
//! let codes = huffcode::huffman_codes(&['a', 'b', 'c'], &[5, 9, 12])?;
//! assert_eq!(codes.get(&'c').map(|c| c.len()), Some(1));
//! # Ok::<(), huffcode::domain::DomainError>(())
//! ```

pub mod application;
pub mod cli;
pub mod config;
pub mod domain;
pub mod exitcode;
pub mod util;

use domain::{CodeGenerator, CodeTable, DomainResult, TreeBuilder};

/// Build the Huffman tree for `symbols`/`frequencies` and return every symbol's code.
///
/// Fails with `InvalidInput` on an empty alphabet or mismatched lengths.
pub fn huffman_codes<S: Clone>(symbols: &[S], frequencies: &[u64]) -> DomainResult<CodeTable<S>> {
    let tree = TreeBuilder::new().build(symbols, frequencies)?;
    Ok(CodeGenerator::new().generate(&tree))
}

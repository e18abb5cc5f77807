//! Coding service
//!
//! Parses a frequency list, builds the Huffman tree and extracts the codes.

use tracing::{debug, instrument};

use crate::application::parser::{Alphabet, InputParser};
use crate::application::ApplicationResult;
use crate::config::Settings;
use crate::domain::{CodeGenerator, CodeTable, DomainResult, HuffmanTree, TreeBuilder};

/// Everything produced for one input.
#[derive(Debug)]
pub struct CodeReport {
    /// Parsed input, in input order
    pub alphabet: Alphabet,
    pub tree: HuffmanTree<char>,
    /// Codes in traversal order
    pub table: CodeTable<char>,
}

impl CodeReport {
    pub fn total_frequency(&self) -> u64 {
        self.tree.total_frequency()
    }
}

/// Service running the full pipeline: parse → build → generate.
pub struct CodingService {
    parser: InputParser,
    builder: TreeBuilder,
    generator: CodeGenerator,
}

impl CodingService {
    pub fn new(settings: &Settings) -> Self {
        Self {
            parser: InputParser::from_settings(settings),
            builder: TreeBuilder::new(),
            generator: CodeGenerator::new(),
        }
    }

    /// Run the pipeline on a raw `symbol:freq` list.
    #[instrument(level = "debug", skip(self))]
    pub fn run(&self, input: &str) -> ApplicationResult<CodeReport> {
        let alphabet = self.parser.parse(input)?;
        let tree = self.builder.build(&alphabet.symbols, &alphabet.frequencies)?;
        let table = self.generator.generate(&tree);
        debug_assert_eq!(Some(tree.total_frequency()), alphabet.total());
        debug!(
            symbols = table.len(),
            total = tree.total_frequency(),
            "coding complete"
        );
        Ok(CodeReport {
            alphabet,
            tree,
            table,
        })
    }

    /// Core interface: codes for parallel symbol and frequency sequences.
    pub fn codes<S: Clone>(&self, symbols: &[S], frequencies: &[u64]) -> DomainResult<CodeTable<S>> {
        let tree = self.builder.build(symbols, frequencies)?;
        Ok(self.generator.generate(&tree))
    }
}

impl Default for CodingService {
    fn default() -> Self {
        Self::new(&Settings::default())
    }
}

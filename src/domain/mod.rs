//! Domain layer: heap, tree construction and code extraction
//!
//! This layer is independent of external concerns (no I/O, no CLI, no config loading).

pub mod arena;
pub mod builder;
pub mod codes;
pub mod error;
pub mod heap;

pub use arena::{HuffmanTree, TreeArena, TreeIterator, TreeNode};
pub use builder::TreeBuilder;
pub use codes::{Code, CodeEntry, CodeGenerator, CodeTable};
pub use error::{DomainError, DomainResult};
pub use heap::{MinHeap, Weighted};

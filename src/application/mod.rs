//! Application layer: input parsing and use cases
//!
//! This layer orchestrates domain logic; it does not print or read from the terminal.

pub mod error;
pub mod error_ext;
pub mod parser;
pub mod services;

pub use error::{ApplicationError, ApplicationResult};
pub use error_ext::IoResultExt;
pub use parser::{Alphabet, InputParser};

//! Application services
//!
//! Concrete service implementations that orchestrate domain logic.

mod coding;

pub use coding::{CodeReport, CodingService};

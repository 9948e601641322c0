//! Question routing and snippet extraction for the CDP docs helper.
//!
//! This crate ties the product/task routing policy, the fetcher, and
//! snippet extraction into [`Assistant`], the single entry point used by
//! the web front-end and the CLI.

pub mod assistant;
pub mod extract;
pub mod router;

pub use assistant::{Assistant, DocumentSource, Resolution};
pub use extract::{extract_snippet, find_case_insensitive};
pub use router::{ProductTable, Route, match_task, route};

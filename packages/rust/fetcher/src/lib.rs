//! Documentation page fetching and HTML flattening.
//!
//! This crate provides:
//! - [`Fetcher`] — single-shot HTTP GET of a documentation page
//! - [`flatten`] — HTML to plain visible text

pub mod client;
pub mod text;

pub use client::{Fetcher, USER_AGENT};
pub use text::flatten;

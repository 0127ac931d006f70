//! # Quiver
//!
//! Boolean full-text retrieval over a static document corpus.
//!
//! ## Features
//!
//! - Tokenization and suffix stemming of raw documents
//! - Batch construction of a sorted inverted index
//! - A compact binary index format with full validation on load
//! - `&`, `|` and `!` queries evaluated left to right with merge-join set operations
//! - An interactive search loop and a term frequency report

pub mod analysis;
pub mod cli;
pub mod error;
pub mod index;
pub mod query;
pub mod util;

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

//! Inverted index: construction, binary encoding and term lookup.
//!
//! - [`builder::PostingBuilder`] turns per-document word streams into sorted,
//!   deduplicated [`posting::PostingEntry`] values.
//! - [`codec`] maps entries to and from the on-disk format.
//! - [`dictionary::TermDictionary`] answers term lookups by binary search.
//! - [`corpus`] drives a batch build from a directory of documents.

pub mod builder;
pub mod codec;
pub mod corpus;
pub mod dictionary;
pub mod posting;

pub use builder::PostingBuilder;
pub use corpus::{BuildConfig, BuildReport, ErrorPolicy, build_index};
pub use dictionary::TermDictionary;
pub use posting::{DocId, PostingEntry};

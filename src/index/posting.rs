//! Posting entries and the raw pairs they are built from.

use std::borrow::Cow;

/// Document identifier. Always non-negative; stored as a signed 32-bit value.
pub type DocId = i32;

/// One term of the index and the documents that contain it.
///
/// `doc_ids` is strictly increasing. Terms are raw bytes and are ordered
/// byte-lexicographically across the index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostingEntry {
    pub term: Vec<u8>,
    pub doc_ids: Vec<DocId>,
}

impl PostingEntry {
    pub fn new<T: Into<Vec<u8>>>(term: T, doc_ids: Vec<DocId>) -> Self {
        PostingEntry {
            term: term.into(),
            doc_ids,
        }
    }

    /// The term as text, with invalid UTF-8 replaced.
    pub fn term_lossy(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.term)
    }

    /// Number of documents containing the term.
    pub fn doc_frequency(&self) -> usize {
        self.doc_ids.len()
    }
}

/// A single word occurrence. Derived ordering is term first, then document.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub(crate) struct RawPair {
    pub term: Vec<u8>,
    pub doc_id: DocId,
}

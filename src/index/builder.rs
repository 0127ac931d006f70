//! Posting builder: from per-document word streams to sorted posting entries.
//!
//! Every word occurrence becomes a raw `(term, doc_id)` pair. [`PostingBuilder::build`]
//! sorts all pairs by term and then document, and collapses runs of equal terms
//! into one [`PostingEntry`]. Because the document id is the secondary sort key,
//! repeated occurrences of a term inside one document are adjacent and are
//! dropped by comparing against the last id appended.

use log::debug;

use crate::error::{QuiverError, Result};
use crate::index::posting::{DocId, PostingEntry, RawPair};

/// Accumulates raw pairs for a batch build.
#[derive(Debug, Default)]
pub struct PostingBuilder {
    pairs: Vec<RawPair>,
    documents: usize,
}

impl PostingBuilder {
    /// Create a new empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add the words of one document.
    ///
    /// The document is added as a whole or not at all: a negative id or an
    /// empty word rejects the document without touching the builder.
    /// Returns the number of words added.
    pub fn add_document<I, W>(&mut self, doc_id: DocId, words: I) -> Result<usize>
    where
        I: IntoIterator<Item = W>,
        W: AsRef<[u8]>,
    {
        if doc_id < 0 {
            return Err(QuiverError::malformed_record(format!(
                "negative document id {doc_id}"
            )));
        }

        let mut pairs = Vec::new();
        for word in words {
            let term = word.as_ref();
            if term.is_empty() {
                return Err(QuiverError::malformed_record(format!(
                    "document {doc_id} contains an empty term"
                )));
            }
            pairs.push(RawPair {
                term: term.to_vec(),
                doc_id,
            });
        }

        let added = pairs.len();
        self.pairs.append(&mut pairs);
        self.documents += 1;
        debug!("document {doc_id}: {added} words");
        Ok(added)
    }

    /// Add a document given as a whitespace-separated byte stream.
    pub fn add_text(&mut self, doc_id: DocId, text: &[u8]) -> Result<usize> {
        let words = text
            .split(|b| b.is_ascii_whitespace())
            .filter(|word| !word.is_empty());
        self.add_document(doc_id, words)
    }

    /// Number of documents added so far.
    pub fn document_count(&self) -> usize {
        self.documents
    }

    /// Number of raw pairs collected so far.
    pub fn pair_count(&self) -> usize {
        self.pairs.len()
    }

    /// Sort, group and deduplicate all pairs into posting entries.
    pub fn build(self) -> Vec<PostingEntry> {
        let mut pairs = self.pairs;
        pairs.sort_unstable();

        let mut entries: Vec<PostingEntry> = Vec::new();
        for RawPair { term, doc_id } in pairs {
            match entries.last_mut() {
                Some(entry) if entry.term == term => {
                    if entry.doc_ids.last() != Some(&doc_id) {
                        entry.doc_ids.push(doc_id);
                    }
                }
                _ => entries.push(PostingEntry::new(term, vec![doc_id])),
            }
        }

        debug!("built {} posting entries", entries.len());
        entries
    }
}

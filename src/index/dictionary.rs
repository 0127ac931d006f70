//! Sorted term table with binary-search lookup.
//!
//! The table is loaded wholesale and never modified afterwards, so it can be
//! shared between readers without locking.

use std::path::Path;

use crate::error::Result;
use crate::index::codec::{read_index_file, validate_entries};
use crate::index::posting::{DocId, PostingEntry};

/// In-memory term table.
#[derive(Debug, Clone, Default)]
pub struct TermDictionary {
    /// Entries sorted by term.
    entries: Vec<PostingEntry>,
}

impl TermDictionary {
    /// Wrap entries that are already sorted and deduplicated.
    pub fn from_entries(entries: Vec<PostingEntry>) -> Result<Self> {
        validate_entries(&entries)?;
        Ok(TermDictionary { entries })
    }

    /// Load an index file.
    pub fn open(path: &Path) -> Result<Self> {
        let entries = read_index_file(path)?;
        Ok(TermDictionary { entries })
    }

    /// Look up a term and return its postings.
    ///
    /// `None` means the term is not in the index, which is different from a
    /// term present with an empty list.
    pub fn lookup(&self, term: &[u8]) -> Option<&[DocId]> {
        self.entries
            .binary_search_by(|probe| probe.term.as_slice().cmp(term))
            .ok()
            .map(|index| self.entries[index].doc_ids.as_slice())
    }

    /// Look up a textual term.
    pub fn lookup_str(&self, term: &str) -> Option<&[DocId]> {
        self.lookup(term.as_bytes())
    }

    /// Get the number of terms.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Total number of postings over all terms.
    pub fn total_postings(&self) -> usize {
        self.entries.iter().map(|e| e.doc_ids.len()).sum()
    }

    /// Entries in term order.
    pub fn entries(&self) -> &[PostingEntry] {
        &self.entries
    }

    /// Get an iterator over all entries.
    pub fn iter(&self) -> impl Iterator<Item = &PostingEntry> {
        self.entries.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn animals() -> TermDictionary {
        TermDictionary::from_entries(vec![
            PostingEntry::new("cat", vec![1, 3]),
            PostingEntry::new("dog", vec![1, 2]),
            PostingEntry::new("fish", vec![4]),
        ])
        .unwrap()
    }

    #[test]
    fn test_lookup_present_terms() {
        let dict = animals();
        assert_eq!(dict.lookup_str("cat"), Some(&[1, 3][..]));
        assert_eq!(dict.lookup_str("dog"), Some(&[1, 2][..]));
        assert_eq!(dict.lookup_str("fish"), Some(&[4][..]));
    }

    #[test]
    fn test_lookup_missing_terms() {
        let dict = animals();
        assert_eq!(dict.lookup_str("bird"), None);
        assert_eq!(dict.lookup_str("ca"), None);
        assert_eq!(dict.lookup_str("zebra"), None);
        assert_eq!(dict.lookup_str(""), None);
    }

    #[test]
    fn test_found_but_empty_is_not_missing() {
        let dict = TermDictionary::from_entries(vec![PostingEntry::new("ghost", vec![])]).unwrap();
        assert_eq!(dict.lookup_str("ghost"), Some(&[][..]));
        assert_eq!(dict.lookup_str("goblin"), None);
    }

    #[test]
    fn test_empty_dictionary() {
        let dict = TermDictionary::default();
        assert!(dict.is_empty());
        assert_eq!(dict.lookup_str("cat"), None);
    }

    #[test]
    fn test_every_term_is_found() {
        let entries: Vec<PostingEntry> = (0..200)
            .map(|i| PostingEntry::new(format!("term{i:04}"), vec![i]))
            .collect();
        let dict = TermDictionary::from_entries(entries).unwrap();
        for i in 0..200 {
            assert_eq!(dict.lookup_str(&format!("term{i:04}")), Some(&[i][..]));
        }
        assert_eq!(dict.len(), 200);
        assert_eq!(dict.total_postings(), 200);
    }

    #[test]
    fn test_unsorted_entries_rejected() {
        let result = TermDictionary::from_entries(vec![
            PostingEntry::new("dog", vec![1]),
            PostingEntry::new("cat", vec![1]),
        ]);
        assert!(result.is_err());
    }
}

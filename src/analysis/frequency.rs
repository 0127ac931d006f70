//! Term frequency report (rank / frequency table).
//!
//! Counts every word occurrence across a directory of stemmed documents and
//! ranks terms by descending frequency, which is the data needed to check a
//! corpus against Zipf's law.

use std::collections::HashMap;
use std::fs;
use std::io::Write;
use std::path::Path;

use anyhow::Context;
use log::info;

use crate::error::Result;
use crate::util::list_documents;

/// A term and the number of times it occurs in the corpus.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TermFrequency {
    /// 1-based rank, most frequent first.
    pub rank: usize,
    pub word: String,
    pub frequency: u64,
}

/// Accumulates word counts and produces a ranked table.
#[derive(Debug, Default)]
pub struct FrequencyCounter {
    counts: HashMap<String, u64>,
    total: u64,
}

impl FrequencyCounter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count all whitespace-separated words of `text`.
    pub fn add_text(&mut self, text: &str) {
        for word in text.split_whitespace() {
            *self.counts.entry(word.to_string()).or_insert(0) += 1;
            self.total += 1;
        }
    }

    /// Count every file of a directory of stemmed documents.
    pub fn add_directory(&mut self, dir: &Path) -> Result<usize> {
        let mut files = 0;
        for path in list_documents(dir)? {
            let text = fs::read_to_string(&path)
                .with_context(|| format!("failed to read {}", path.display()))?;
            self.add_text(&text);
            files += 1;
        }
        info!("Counted {} words in {} files", self.total, files);
        Ok(files)
    }

    /// Total number of word occurrences seen.
    pub fn total(&self) -> u64 {
        self.total
    }

    /// Number of distinct words seen.
    pub fn unique(&self) -> usize {
        self.counts.len()
    }

    /// Ranked table: descending frequency, ties broken by ascending word.
    pub fn ranked(&self) -> Vec<TermFrequency> {
        let mut entries: Vec<(&String, &u64)> = self.counts.iter().collect();
        entries.sort_by(|a, b| b.1.cmp(a.1).then_with(|| a.0.cmp(b.0)));

        entries
            .into_iter()
            .enumerate()
            .map(|(i, (word, &frequency))| TermFrequency {
                rank: i + 1,
                word: word.clone(),
                frequency,
            })
            .collect()
    }
}

/// Write a ranked table as CSV with a `rank,word,frequency` header.
pub fn write_csv<W: Write>(rows: &[TermFrequency], mut out: W) -> Result<()> {
    writeln!(out, "rank,word,frequency")?;
    for row in rows {
        writeln!(out, "{},{},{}", row.rank, row.word, row.frequency)?;
    }
    out.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ranking() {
        let mut counter = FrequencyCounter::new();
        counter.add_text("cat dog cat\nbird");
        counter.add_text("dog cat ant");

        assert_eq!(counter.total(), 7);
        assert_eq!(counter.unique(), 4);

        let ranked = counter.ranked();
        let words: Vec<&str> = ranked.iter().map(|r| r.word.as_str()).collect();
        assert_eq!(words, vec!["cat", "dog", "ant", "bird"]);
        assert_eq!(ranked[0].frequency, 3);
        assert_eq!(ranked[0].rank, 1);
        assert_eq!(ranked[3].rank, 4);
    }

    #[test]
    fn test_csv_output() {
        let mut counter = FrequencyCounter::new();
        counter.add_text("b a b");

        let mut buf = Vec::new();
        write_csv(&counter.ranked(), &mut buf).unwrap();
        assert_eq!(
            String::from_utf8(buf).unwrap(),
            "rank,word,frequency\n1,b,2\n2,a,1\n"
        );
    }

    #[test]
    fn test_directory_skips_hidden_files() {
        let dir = tempfile::TempDir::new().unwrap();
        fs::write(dir.path().join("1.txt"), "cat dog cat").unwrap();
        fs::write(dir.path().join(".notes"), "cat cat cat").unwrap();

        let mut counter = FrequencyCounter::new();
        assert_eq!(counter.add_directory(dir.path()).unwrap(), 1);
        assert_eq!(counter.total(), 3);
        assert_eq!(counter.ranked()[0].frequency, 2);
    }

    #[test]
    fn test_empty_corpus() {
        let counter = FrequencyCounter::new();
        assert!(counter.ranked().is_empty());
    }
}

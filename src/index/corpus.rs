//! Batch index build from a directory of stemmed documents.
//!
//! Each file holds one document as a whitespace-separated word stream. The
//! document id is the file name up to its first `.`, so `42.txt` is document
//! 42. Hidden files (leading `.`) are ignored.

use std::collections::HashMap;
use std::fmt::Write as _;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::ValueEnum;
use log::{info, warn};
use serde::Serialize;

use crate::analysis::pipeline::PROGRESS_INTERVAL;
use crate::error::{QuiverError, Result};
use crate::index::builder::PostingBuilder;
use crate::index::codec::write_index_file;
use crate::index::posting::DocId;
use crate::util::list_documents;

/// What to do with documents that cannot be indexed.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ErrorPolicy {
    /// Scan everything, then fail the build listing every bad document.
    #[default]
    Strict,
    /// Log a warning per bad document and build from the rest.
    Skip,
}

/// Configuration for a batch build.
#[derive(Debug, Clone)]
pub struct BuildConfig {
    /// Directory of stemmed documents.
    pub input_dir: PathBuf,

    /// Where to write the index file.
    pub index_path: PathBuf,

    /// Handling of malformed documents.
    pub error_policy: ErrorPolicy,
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            input_dir: PathBuf::from("stemmed"),
            index_path: PathBuf::from("inverted_index.bin"),
            error_policy: ErrorPolicy::Strict,
        }
    }
}

impl BuildConfig {
    pub fn new<P: Into<PathBuf>, Q: Into<PathBuf>>(input_dir: P, index_path: Q) -> Self {
        Self {
            input_dir: input_dir.into(),
            index_path: index_path.into(),
            ..Default::default()
        }
    }

    /// Set the error policy.
    pub fn with_error_policy(mut self, error_policy: ErrorPolicy) -> Self {
        self.error_policy = error_policy;
        self
    }
}

/// A document left out of the index and the reason why.
#[derive(Debug, Clone, Serialize)]
pub struct SkippedDocument {
    pub path: PathBuf,
    pub reason: String,
}

/// Outcome of a build.
#[derive(Debug, Clone, Default)]
pub struct BuildReport {
    /// Documents indexed.
    pub documents: usize,
    /// Word occurrences read.
    pub pairs: usize,
    /// Distinct terms in the index.
    pub terms: usize,
    /// Size of the written index file.
    pub index_bytes: u64,
    /// Documents left out (only ever non-empty with [`ErrorPolicy::Skip`]).
    pub skipped: Vec<SkippedDocument>,
}

/// Derive a document id from a file name.
///
/// The id is the part before the first `.` and must be a canonical decimal
/// number: ASCII digits only, no sign, no leading zeros. That keeps the
/// mapping from file names to ids one to one.
pub fn parse_doc_id(file_name: &str) -> Result<DocId> {
    let stem = file_name.split('.').next().unwrap_or(file_name);
    if stem.is_empty() || !stem.bytes().all(|b| b.is_ascii_digit()) {
        return Err(QuiverError::malformed_record(format!(
            "file name {file_name:?} does not start with a non-negative document id"
        )));
    }
    if stem.len() > 1 && stem.starts_with('0') {
        return Err(QuiverError::malformed_record(format!(
            "file name {file_name:?} has a document id with leading zeros"
        )));
    }
    stem.parse::<DocId>().map_err(|e| {
        QuiverError::malformed_record(format!(
            "file name {file_name:?} has an out of range document id: {e}"
        ))
    })
}

fn index_document(
    builder: &mut PostingBuilder,
    seen: &mut HashMap<DocId, PathBuf>,
    path: &Path,
) -> Result<usize> {
    let name = path
        .file_name()
        .and_then(|n| n.to_str())
        .ok_or_else(|| QuiverError::malformed_record("file name is not valid UTF-8"))?;
    let doc_id = parse_doc_id(name)?;
    if let Some(first) = seen.get(&doc_id) {
        return Err(QuiverError::malformed_record(format!(
            "document id {doc_id} is already used by {}",
            first.display()
        )));
    }
    let text = fs::read(path)?;
    let added = builder.add_text(doc_id, &text)?;
    seen.insert(doc_id, path.to_path_buf());
    Ok(added)
}

/// Read every document of `dir` into a builder.
///
/// Per-document failures are returned alongside the builder rather than
/// aborting the scan, so the caller can report all of them at once. A missing
/// or unreadable directory is an error.
pub fn scan_corpus(dir: &Path) -> Result<(PostingBuilder, Vec<SkippedDocument>)> {
    let paths = list_documents(dir)?;
    info!("Reading {} files from {}", paths.len(), dir.display());

    let mut builder = PostingBuilder::new();
    let mut seen = HashMap::new();
    let mut failures = Vec::new();
    for (i, path) in paths.iter().enumerate() {
        if let Err(e) = index_document(&mut builder, &mut seen, path) {
            failures.push(SkippedDocument {
                path: path.clone(),
                reason: e.to_string(),
            });
        }
        if (i + 1) % PROGRESS_INTERVAL == 0 {
            info!("Parsed {} docs...", i + 1);
        }
    }

    Ok((builder, failures))
}

fn failure_summary(failures: &[SkippedDocument]) -> String {
    let mut msg = format!("{} document(s) could not be indexed:", failures.len());
    for failure in failures {
        let _ = write!(msg, "\n  {}: {}", failure.path.display(), failure.reason);
    }
    msg
}

/// Build the index described by `config` and write it to disk.
///
/// Nothing is written when the build fails.
pub fn build_index(config: &BuildConfig) -> Result<BuildReport> {
    let (builder, failures) = scan_corpus(&config.input_dir)?;

    if !failures.is_empty() {
        match config.error_policy {
            ErrorPolicy::Strict => {
                return Err(QuiverError::malformed_record(failure_summary(&failures)));
            }
            ErrorPolicy::Skip => {
                for failure in &failures {
                    warn!("skipping {}: {}", failure.path.display(), failure.reason);
                }
            }
        }
    }

    let documents = builder.document_count();
    let pairs = builder.pair_count();
    info!("Total entries loaded: {pairs}");

    let entries = builder.build();
    let index_bytes = write_index_file(&config.index_path, &entries)?;

    Ok(BuildReport {
        documents,
        pairs,
        terms: entries.len(),
        index_bytes,
        skipped: failures,
    })
}

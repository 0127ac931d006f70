//! Output formatting for CLI commands.

use std::io::{self, Write};
use std::path::Path;

use serde::Serialize;

use crate::analysis::pipeline::PassReport;
use crate::cli::args::{OutputFormat, QuiverArgs};
use crate::error::Result;
use crate::index::corpus::{BuildConfig, BuildReport, ErrorPolicy, SkippedDocument};
use crate::index::posting::DocId;

/// Most document ids shown for one human-readable search result.
pub const DISPLAY_LIMIT: usize = 21;

/// Results that know how to render themselves for a terminal.
pub trait HumanOutput {
    /// Lines printed in human mode.
    fn human_lines(&self) -> Vec<String>;
}

/// Result structure for the tokenize and stem passes.
#[derive(Debug, Serialize)]
pub struct PassResult {
    pub pass: &'static str,
    pub input: String,
    pub output: String,
    pub files: usize,
    pub words: usize,
}

impl PassResult {
    pub fn new(pass: &'static str, input: &Path, output: &Path, report: &PassReport) -> Self {
        PassResult {
            pass,
            input: input.display().to_string(),
            output: output.display().to_string(),
            files: report.files,
            words: report.words,
        }
    }
}

impl HumanOutput for PassResult {
    fn human_lines(&self) -> Vec<String> {
        vec![format!(
            "{}: {} files, {} words written to {}",
            self.pass, self.files, self.words, self.output
        )]
    }
}

/// Result structure for an index build.
#[derive(Debug, Serialize)]
pub struct BuildResult {
    pub index: String,
    pub error_policy: ErrorPolicy,
    pub documents: usize,
    pub pairs: usize,
    pub terms: usize,
    pub index_bytes: u64,
    pub skipped: Vec<SkippedDocument>,
}

impl BuildResult {
    pub fn new(config: &BuildConfig, report: BuildReport) -> Self {
        BuildResult {
            index: config.index_path.display().to_string(),
            error_policy: config.error_policy,
            documents: report.documents,
            pairs: report.pairs,
            terms: report.terms,
            index_bytes: report.index_bytes,
            skipped: report.skipped,
        }
    }
}

impl HumanOutput for BuildResult {
    fn human_lines(&self) -> Vec<String> {
        let mut lines = vec![
            format!("Index written to {}", self.index),
            format!("Documents: {}", self.documents),
            format!("Terms: {}", self.terms),
            format!("Postings read: {}", self.pairs),
            format!("Index size: {}", format_bytes(self.index_bytes)),
        ];
        if !self.skipped.is_empty() {
            lines.push(format!("Skipped documents: {}", self.skipped.len()));
            for skipped in &self.skipped {
                lines.push(format!("  {}: {}", skipped.path.display(), skipped.reason));
            }
        }
        lines
    }
}

/// Result structure for the frequency report.
#[derive(Debug, Serialize)]
pub struct ZipfResult {
    pub output: String,
    pub files: usize,
    pub total_words: u64,
    pub unique_words: usize,
}

impl HumanOutput for ZipfResult {
    fn human_lines(&self) -> Vec<String> {
        vec![format!(
            "{} distinct words out of {} in {} files, table written to {}",
            self.unique_words, self.total_words, self.files, self.output
        )]
    }
}

/// One answered query.
#[derive(Debug, Serialize)]
pub struct SearchResult<'a> {
    pub query: &'a str,
    pub total: usize,
    pub doc_ids: &'a [DocId],
}

impl HumanOutput for SearchResult<'_> {
    fn human_lines(&self) -> Vec<String> {
        vec![format_doc_ids(self.doc_ids)]
    }
}

/// A query that could not be evaluated.
#[derive(Debug, Serialize)]
pub struct QueryFailure<'a> {
    pub query: &'a str,
    pub error: &'a str,
}

impl HumanOutput for QueryFailure<'_> {
    fn human_lines(&self) -> Vec<String> {
        vec![format!("Query error: {}", self.error)]
    }
}

/// Render a result list the way the interactive search prints it.
///
/// At most [`DISPLAY_LIMIT`] ids are listed; `...` marks a truncated list.
pub fn format_doc_ids(doc_ids: &[DocId]) -> String {
    if doc_ids.is_empty() {
        return "Nothing found.".to_string();
    }

    let shown: Vec<String> = doc_ids
        .iter()
        .take(DISPLAY_LIMIT)
        .map(|id| id.to_string())
        .collect();
    let mut line = format!("Found {} documents: {}", doc_ids.len(), shown.join(" "));
    if doc_ids.len() > DISPLAY_LIMIT {
        line.push_str(" ...");
    }
    line
}

/// Output a result in the specified format on standard output.
pub fn output_result<T: Serialize + HumanOutput>(result: &T, args: &QuiverArgs) -> Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    write_result(&mut out, result, args.output_format, args.pretty)
}

/// Write a result in the given format.
pub fn write_result<W: Write, T: Serialize + HumanOutput>(
    out: &mut W,
    result: &T,
    format: OutputFormat,
    pretty: bool,
) -> Result<()> {
    match format {
        OutputFormat::Human => {
            for line in result.human_lines() {
                writeln!(out, "{line}")?;
            }
        }
        OutputFormat::Json => {
            if pretty {
                serde_json::to_writer_pretty(&mut *out, result)?;
            } else {
                serde_json::to_writer(&mut *out, result)?;
            }
            writeln!(out)?;
        }
    }
    out.flush()?;
    Ok(())
}

/// Format a byte count with a binary unit.
pub fn format_bytes(bytes: u64) -> String {
    const UNITS: &[&str] = &["B", "KB", "MB", "GB", "TB"];
    let mut size = bytes as f64;
    let mut unit_index = 0;

    while size >= 1024.0 && unit_index < UNITS.len() - 1 {
        size /= 1024.0;
        unit_index += 1;
    }

    if unit_index == 0 {
        format!("{} {}", bytes, UNITS[unit_index])
    } else {
        format!("{:.1} {}", size, UNITS[unit_index])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_doc_ids() {
        assert_eq!(format_doc_ids(&[]), "Nothing found.");
        assert_eq!(format_doc_ids(&[1, 3]), "Found 2 documents: 1 3");

        let exactly: Vec<DocId> = (1..=21).collect();
        let line = format_doc_ids(&exactly);
        assert!(line.starts_with("Found 21 documents: 1 2 3"));
        assert!(line.ends_with(" 21"));

        let many: Vec<DocId> = (0..30).collect();
        let line = format_doc_ids(&many);
        assert!(line.starts_with("Found 30 documents: 0 1 2"));
        assert!(line.ends_with(" 20 ..."));
        assert!(!line.contains(" 21 "));
    }

    #[test]
    fn test_format_bytes() {
        assert_eq!(format_bytes(0), "0 B");
        assert_eq!(format_bytes(1023), "1023 B");
        assert_eq!(format_bytes(1024), "1.0 KB");
        assert_eq!(format_bytes(1536), "1.5 KB");
        assert_eq!(format_bytes(1024 * 1024), "1.0 MB");
    }

    #[test]
    fn test_write_result_human_and_json() {
        let ids = [4, 9];
        let result = SearchResult {
            query: "cat | dog",
            total: ids.len(),
            doc_ids: &ids,
        };

        let mut human = Vec::new();
        write_result(&mut human, &result, OutputFormat::Human, false).unwrap();
        assert_eq!(String::from_utf8(human).unwrap(), "Found 2 documents: 4 9\n");

        let mut json = Vec::new();
        write_result(&mut json, &result, OutputFormat::Json, false).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&json).unwrap();
        assert_eq!(value["query"], "cat | dog");
        assert_eq!(value["total"], 2);
        assert_eq!(value["doc_ids"], serde_json::json!([4, 9]));
    }

    #[test]
    fn test_build_result_lists_skipped() {
        let report = BuildReport {
            documents: 2,
            pairs: 5,
            terms: 3,
            index_bytes: 64,
            skipped: vec![SkippedDocument {
                path: "stemmed/notes.txt".into(),
                reason: "bad id".to_string(),
            }],
        };
        let config =
            BuildConfig::new("stemmed", "index.bin").with_error_policy(ErrorPolicy::Skip);
        let result = BuildResult::new(&config, report);
        let lines = result.human_lines();
        assert!(lines.contains(&"Documents: 2".to_string()));
        assert!(lines.contains(&"Index size: 64 B".to_string()));
        assert!(lines.iter().any(|l| l.contains("notes.txt: bad id")));

        let value = serde_json::to_value(&result).unwrap();
        assert_eq!(value["error_policy"], "skip");
        assert_eq!(value["index"], "index.bin");
    }
}

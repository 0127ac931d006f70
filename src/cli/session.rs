//! Interactive search loop.
//!
//! Reads one query per line, prints the matching document ids and prompts
//! again. `exit` or end of input ends the session. A bad query, including a
//! line that is not valid UTF-8, is reported and the session continues; I/O
//! failures end it with an error.

use std::io::{BufRead, Write};

use log::{debug, info};

use crate::cli::args::OutputFormat;
use crate::cli::output::{QueryFailure, SearchResult, write_result};
use crate::error::{QuiverError, Result};
use crate::query::evaluator::QueryEvaluator;

/// Prompt printed before every query.
pub const PROMPT: &str = "Search > ";

/// Command that ends the session.
pub const EXIT_COMMAND: &str = "exit";

/// Counters for a finished session.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SessionStats {
    /// Queries answered.
    pub queries: usize,
    /// Queries rejected as malformed.
    pub errors: usize,
}

/// A read-eval-print loop over one evaluator.
#[derive(Debug)]
pub struct SearchSession<'a> {
    evaluator: &'a QueryEvaluator,
    format: OutputFormat,
    pretty: bool,
}

impl<'a> SearchSession<'a> {
    pub fn new(evaluator: &'a QueryEvaluator) -> Self {
        SearchSession {
            evaluator,
            format: OutputFormat::Human,
            pretty: false,
        }
    }

    /// Set the output format of answers.
    pub fn with_format(mut self, format: OutputFormat, pretty: bool) -> Self {
        self.format = format;
        self.pretty = pretty;
        self
    }

    /// Run until `exit` or end of input.
    pub fn run<R: BufRead, W: Write>(&self, mut input: R, mut output: W) -> Result<SessionStats> {
        let mut stats = SessionStats::default();
        let mut buf = Vec::new();

        loop {
            write!(output, "{PROMPT}")?;
            output.flush()?;

            buf.clear();
            if input.read_until(b'\n', &mut buf)? == 0 {
                debug!("end of input");
                break;
            }

            let line = match std::str::from_utf8(&buf) {
                Ok(line) => line,
                Err(e) => {
                    let query = String::from_utf8_lossy(&buf);
                    let reason = format!("query is not valid UTF-8: {e}");
                    let failure = QueryFailure {
                        query: query.trim(),
                        error: &reason,
                    };
                    write_result(&mut output, &failure, self.format, self.pretty)?;
                    stats.errors += 1;
                    continue;
                }
            };

            let query = line.trim();
            if query == EXIT_COMMAND {
                break;
            }
            if query.is_empty() {
                continue;
            }

            match self.evaluator.evaluate_line(query) {
                Ok(doc_ids) => {
                    let result = SearchResult {
                        query,
                        total: doc_ids.len(),
                        doc_ids: &doc_ids,
                    };
                    write_result(&mut output, &result, self.format, self.pretty)?;
                    stats.queries += 1;
                }
                Err(QuiverError::MalformedQuery(reason)) => {
                    let failure = QueryFailure {
                        query,
                        error: &reason,
                    };
                    write_result(&mut output, &failure, self.format, self.pretty)?;
                    stats.errors += 1;
                }
                Err(e) => return Err(e),
            }
        }

        info!(
            "Session finished: {} queries, {} rejected",
            stats.queries, stats.errors
        );
        Ok(stats)
    }
}

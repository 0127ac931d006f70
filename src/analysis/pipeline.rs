//! Analysis pipeline: tokenize, then stem.
//!
//! The same pipeline type drives both corpus preparation passes. Raw text goes
//! through [`TextPipeline::tokenizing`] (punctuation-aware tokenizer, no
//! stemming), token files go through [`TextPipeline::stemming`] (whitespace
//! tokenizer, suffix stemmer).

use std::fs;
use std::path::Path;

use anyhow::Context;
use log::{debug, info};

use crate::analysis::stemmer::{IdentityStemmer, Stemmer, SuffixStemmer};
use crate::analysis::tokenizer::{CorpusTokenizer, Tokenizer, WhitespaceTokenizer};
use crate::error::Result;
use crate::util::list_documents;

/// How often directory passes report progress.
pub const PROGRESS_INTERVAL: usize = 500;

/// A tokenizer followed by a stemmer.
pub struct TextPipeline {
    tokenizer: Box<dyn Tokenizer>,
    stemmer: Box<dyn Stemmer>,
}

impl std::fmt::Debug for TextPipeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TextPipeline")
            .field("tokenizer", &self.tokenizer.name())
            .field("stemmer", &self.stemmer.name())
            .finish()
    }
}

/// Summary of a directory-to-directory pass.
#[derive(Debug, Clone, Default)]
pub struct PassReport {
    /// Number of files written.
    pub files: usize,
    /// Number of words written across all files.
    pub words: usize,
}

impl TextPipeline {
    /// Create a pipeline from its parts.
    pub fn new(tokenizer: Box<dyn Tokenizer>, stemmer: Box<dyn Stemmer>) -> Self {
        TextPipeline { tokenizer, stemmer }
    }

    /// Pipeline for raw documents: split on punctuation, keep word forms.
    pub fn tokenizing() -> Self {
        Self::new(
            Box::new(CorpusTokenizer::new()),
            Box::new(IdentityStemmer::new()),
        )
    }

    /// Pipeline for token streams: split on whitespace, strip suffixes.
    pub fn stemming() -> Self {
        Self::new(
            Box::new(WhitespaceTokenizer::new()),
            Box::new(SuffixStemmer::russian()),
        )
    }

    /// Run the pipeline over `text`, returning the resulting words in order.
    pub fn analyze(&self, text: &str) -> Result<Vec<String>> {
        Ok(self
            .tokenizer
            .tokenize(text)?
            .map(|token| self.stemmer.stem(&token.text))
            .filter(|word| !word.is_empty())
            .collect())
    }

    /// Apply the pipeline to every file in `input_dir`, writing one
    /// space-separated word file with the same name into `output_dir`.
    ///
    /// Hidden files are skipped. Any other unreadable or non UTF-8 file aborts
    /// the pass.
    pub fn process_directory(&self, input_dir: &Path, output_dir: &Path) -> Result<PassReport> {
        let paths = list_documents(input_dir)?;

        fs::create_dir_all(output_dir)
            .with_context(|| format!("failed to create directory {}", output_dir.display()))?;

        let mut report = PassReport::default();
        for path in &paths {
            let text = fs::read_to_string(path)
                .with_context(|| format!("failed to read {}", path.display()))?;
            let words = self.analyze(&text)?;

            let mut out = words.join(" ");
            out.push('\n');

            // Paths come from read_dir, so they always carry a file name.
            let target = output_dir.join(path.file_name().unwrap_or_default());
            fs::write(&target, out)
                .with_context(|| format!("failed to write {}", target.display()))?;
            debug!("{} -> {} ({} words)", path.display(), target.display(), words.len());

            report.files += 1;
            report.words += words.len();
            if report.files % PROGRESS_INTERVAL == 0 {
                info!("Processed {} files...", report.files);
            }
        }

        info!(
            "{} pass finished: {} files, {} words",
            self.tokenizer.name(),
            report.files,
            report.words
        );
        Ok(report)
    }
}

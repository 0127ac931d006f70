//! Command line argument parsing for the Quiver CLI using clap.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

use crate::index::corpus::{BuildConfig, ErrorPolicy};

/// Quiver - Boolean full-text search over a static corpus
#[derive(Parser, Debug, Clone)]
#[command(name = "quiver")]
#[command(about = "Boolean full-text search over a static document corpus")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(long_about = None)]
pub struct QuiverArgs {
    /// Verbosity level (0=quiet, 1=normal, 2=verbose, 3=debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Quiet mode (overrides verbose)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Output format
    #[arg(short = 'f', long = "format", default_value = "human", global = true)]
    pub output_format: OutputFormat,

    /// Pretty-print JSON output
    #[arg(long, global = true)]
    pub pretty: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,
}

impl QuiverArgs {
    /// Get the effective verbosity level
    pub fn verbosity(&self) -> u8 {
        if self.quiet {
            0
        } else {
            match self.verbose {
                0 => 1, // Default to normal
                n => n,
            }
        }
    }
}

/// Available CLI commands
#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Split raw documents into word streams
    Tokenize(TokenizeArgs),

    /// Strip inflectional suffixes from word streams
    Stem(StemArgs),

    /// Build the inverted index from stemmed documents
    Build(BuildArgs),

    /// Answer Boolean queries read from standard input
    Search(SearchArgs),

    /// Write a rank/frequency table of all stemmed terms
    Zipf(ZipfArgs),
}

/// Arguments for the tokenization pass
#[derive(Parser, Debug, Clone)]
pub struct TokenizeArgs {
    /// Directory of raw documents
    #[arg(short, long, default_value = "corpus")]
    pub input: PathBuf,

    /// Directory for the token files
    #[arg(short, long, default_value = "tokens")]
    pub output: PathBuf,
}

/// Arguments for the stemming pass
#[derive(Parser, Debug, Clone)]
pub struct StemArgs {
    /// Directory of token files
    #[arg(short, long, default_value = "tokens")]
    pub input: PathBuf,

    /// Directory for the stemmed files
    #[arg(short, long, default_value = "stemmed")]
    pub output: PathBuf,
}

/// Arguments for building the index
#[derive(Parser, Debug, Clone)]
pub struct BuildArgs {
    /// Directory of stemmed documents, named `<id>.<ext>`
    #[arg(short, long, default_value = "stemmed")]
    pub input: PathBuf,

    /// Index file to write
    #[arg(long, default_value = "inverted_index.bin")]
    pub index: PathBuf,

    /// What to do with documents that cannot be indexed
    #[arg(long, value_enum, default_value_t = ErrorPolicy::Strict)]
    pub on_error: ErrorPolicy,
}

impl BuildArgs {
    /// Build configuration described by these arguments.
    pub fn to_config(&self) -> BuildConfig {
        BuildConfig::new(&self.input, &self.index).with_error_policy(self.on_error)
    }
}

/// Arguments for interactive search
#[derive(Parser, Debug, Clone)]
pub struct SearchArgs {
    /// Index file to load
    #[arg(long, default_value = "inverted_index.bin")]
    pub index: PathBuf,

    /// Look query terms up verbatim instead of stemming them
    #[arg(long)]
    pub no_stem: bool,
}

/// Arguments for the frequency report
#[derive(Parser, Debug, Clone)]
pub struct ZipfArgs {
    /// Directory of stemmed documents
    #[arg(short, long, default_value = "stemmed")]
    pub input: PathBuf,

    /// CSV file to write
    #[arg(short, long, default_value = "zipf_data.csv")]
    pub output: PathBuf,
}

/// Output formats for CLI
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable output
    Human,
    /// JSON output
    Json,
}

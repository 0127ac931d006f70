//! Command implementations for Quiver CLI.

use std::fs::{self, File};
use std::io::{self, BufWriter};
use std::sync::Arc;
use std::time::Instant;

use anyhow::Context;
use log::info;

use crate::analysis::frequency::{FrequencyCounter, write_csv};
use crate::analysis::pipeline::TextPipeline;
use crate::analysis::stemmer::{IdentityStemmer, Stemmer, SuffixStemmer};
use crate::cli::args::*;
use crate::cli::output::*;
use crate::cli::session::SearchSession;
use crate::error::Result;
use crate::index::corpus::build_index;
use crate::index::dictionary::TermDictionary;
use crate::query::evaluator::QueryEvaluator;

/// Execute a CLI command.
pub fn execute_command(args: QuiverArgs) -> Result<()> {
    match &args.command {
        Command::Tokenize(tokenize_args) => tokenize(tokenize_args, &args),
        Command::Stem(stem_args) => stem(stem_args, &args),
        Command::Build(build_args) => build(build_args, &args),
        Command::Search(search_args) => search(search_args, &args),
        Command::Zipf(zipf_args) => zipf(zipf_args, &args),
    }
}

/// Split every raw document into a word stream.
fn tokenize(args: &TokenizeArgs, cli_args: &QuiverArgs) -> Result<()> {
    let report = TextPipeline::tokenizing().process_directory(&args.input, &args.output)?;
    let result = PassResult::new("tokenize", &args.input, &args.output, &report);
    output_result(&result, cli_args)
}

/// Stem every token file.
fn stem(args: &StemArgs, cli_args: &QuiverArgs) -> Result<()> {
    let report = TextPipeline::stemming().process_directory(&args.input, &args.output)?;
    let result = PassResult::new("stem", &args.input, &args.output, &report);
    output_result(&result, cli_args)
}

/// Build and persist the inverted index.
fn build(args: &BuildArgs, cli_args: &QuiverArgs) -> Result<()> {
    info!("Building index from: {}", args.input.display());

    let config = args.to_config();
    let start = Instant::now();
    let report = build_index(&config)?;
    info!("Index built in {}ms", start.elapsed().as_millis());

    let result = BuildResult::new(&config, report);
    output_result(&result, cli_args)
}

/// Load the index and answer queries from standard input.
fn search(args: &SearchArgs, cli_args: &QuiverArgs) -> Result<()> {
    let start = Instant::now();
    let dictionary = TermDictionary::open(&args.index)?;
    info!(
        "Loaded {} terms ({} postings) from {} in {}ms",
        dictionary.len(),
        dictionary.total_postings(),
        args.index.display(),
        start.elapsed().as_millis()
    );

    let stemmer: Box<dyn Stemmer> = if args.no_stem {
        Box::new(IdentityStemmer::new())
    } else {
        Box::new(SuffixStemmer::russian())
    };
    let evaluator = QueryEvaluator::with_stemmer(Arc::new(dictionary), stemmer);

    let session =
        SearchSession::new(&evaluator).with_format(cli_args.output_format, cli_args.pretty);
    let stdin = io::stdin();
    let stdout = io::stdout();
    session.run(stdin.lock(), stdout.lock())?;
    Ok(())
}

/// Write the rank/frequency table of the stemmed corpus.
fn zipf(args: &ZipfArgs, cli_args: &QuiverArgs) -> Result<()> {
    let mut counter = FrequencyCounter::new();
    let files = counter.add_directory(&args.input)?;

    if let Some(parent) = args.output.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)
            .with_context(|| format!("failed to create directory {}", parent.display()))?;
    }
    let file = File::create(&args.output)
        .with_context(|| format!("failed to create {}", args.output.display()))?;
    write_csv(&counter.ranked(), BufWriter::new(file))?;

    let result = ZipfResult {
        output: args.output.display().to_string(),
        files,
        total_words: counter.total(),
        unique_words: counter.unique(),
    };
    output_result(&result, cli_args)
}

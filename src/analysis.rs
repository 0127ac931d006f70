//! Text analysis: tokenization, stemming and frequency statistics.
//!
//! Analysis runs before indexing. Raw documents are split into words by a
//! [`tokenizer::Tokenizer`], reduced by a [`stemmer::Stemmer`], and written
//! back as whitespace-separated word streams that the index builder consumes.
//! The query evaluator runs the same stemmer over each query term.

pub mod frequency;
pub mod pipeline;
pub mod stemmer;
pub mod token;
pub mod tokenizer;

pub use pipeline::TextPipeline;
pub use stemmer::{IdentityStemmer, Stemmer, SuffixStemmer};
pub use tokenizer::{CorpusTokenizer, Tokenizer, WhitespaceTokenizer};

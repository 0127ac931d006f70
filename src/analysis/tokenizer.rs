//! Tokenizer implementations for text analysis.
//!
//! # Available Tokenizers
//!
//! - [`WhitespaceTokenizer`] - Splits on whitespace only; used for streams
//!   that were already tokenized.
//! - [`CorpusTokenizer`] - Splits raw article text on ASCII punctuation and
//!   typographic marks, dropping single-byte fragments.
//!
//! # Examples
//!
//! ```
//! use quiver::analysis::tokenizer::{CorpusTokenizer, Tokenizer};
//!
//! let tokenizer = CorpusTokenizer::new();
//! let words: Vec<String> = tokenizer
//!     .tokenize("«Hello», world — again!")
//!     .unwrap()
//!     .map(|t| t.text)
//!     .collect();
//! assert_eq!(words, vec!["Hello", "world", "again"]);
//! ```

use crate::analysis::token::{Token, TokenStream};
use crate::error::Result;

/// Trait for tokenizers that convert text into tokens.
pub trait Tokenizer: Send + Sync {
    /// Tokenize the given text into a stream of tokens.
    fn tokenize(&self, text: &str) -> Result<TokenStream>;

    /// Get the name of this tokenizer (used for debugging and logging).
    fn name(&self) -> &'static str;
}

/// A tokenizer that splits text on whitespace.
#[derive(Clone, Debug, Default)]
pub struct WhitespaceTokenizer;

impl WhitespaceTokenizer {
    /// Create a new whitespace tokenizer.
    pub fn new() -> Self {
        WhitespaceTokenizer
    }
}

impl Tokenizer for WhitespaceTokenizer {
    fn tokenize(&self, text: &str) -> Result<TokenStream> {
        let tokens = split_tokens(text, char::is_whitespace, 0);
        Ok(Box::new(tokens.into_iter()))
    }

    fn name(&self) -> &'static str {
        "whitespace"
    }
}

/// ASCII characters that end a word in raw corpus text.
const ASCII_SEPARATORS: &str = " \n\t\r.,!?:;()[]{}\"'`<>/|\\-=+_~@#$%^&*";

/// Typographic marks treated like whitespace.
const TYPOGRAPHIC_SEPARATORS: [char; 7] = ['—', '«', '»', '…', '–', '“', '”'];

/// Tokenizer for raw article text.
///
/// Words are maximal runs of characters that are neither ASCII separators nor
/// typographic punctuation. Tokens shorter than `min_len` bytes are dropped.
#[derive(Clone, Debug)]
pub struct CorpusTokenizer {
    min_len: usize,
}

impl CorpusTokenizer {
    /// Create a tokenizer that keeps tokens of at least two bytes.
    pub fn new() -> Self {
        CorpusTokenizer { min_len: 2 }
    }

    /// Create a tokenizer with a custom minimum token length in bytes.
    pub fn with_min_len(min_len: usize) -> Self {
        CorpusTokenizer { min_len }
    }

    fn is_separator(c: char) -> bool {
        if c.is_ascii() {
            ASCII_SEPARATORS.contains(c)
        } else {
            TYPOGRAPHIC_SEPARATORS.contains(&c)
        }
    }
}

impl Default for CorpusTokenizer {
    fn default() -> Self {
        Self::new()
    }
}

impl Tokenizer for CorpusTokenizer {
    fn tokenize(&self, text: &str) -> Result<TokenStream> {
        let tokens = split_tokens(text, Self::is_separator, self.min_len);
        Ok(Box::new(tokens.into_iter()))
    }

    fn name(&self) -> &'static str {
        "corpus"
    }
}

/// Split `text` into tokens at every character matching `is_separator`.
fn split_tokens<F>(text: &str, is_separator: F, min_len: usize) -> Vec<Token>
where
    F: Fn(char) -> bool,
{
    let mut tokens = Vec::new();
    let mut start: Option<usize> = None;

    let push = |tokens: &mut Vec<Token>, begin: usize, end: usize| {
        let word = &text[begin..end];
        if !word.is_empty() && word.len() >= min_len {
            let position = tokens.len();
            tokens.push(Token::with_offsets(word, position, begin, end));
        }
    };

    for (offset, c) in text.char_indices() {
        if is_separator(c) {
            if let Some(begin) = start.take() {
                push(&mut tokens, begin, offset);
            }
        } else if start.is_none() {
            start = Some(offset);
        }
    }
    if let Some(begin) = start {
        push(&mut tokens, begin, text.len());
    }

    tokens
}

#[cfg(test)]
mod tests {
    use super::*;

    fn words(tokenizer: &dyn Tokenizer, text: &str) -> Vec<String> {
        tokenizer.tokenize(text).unwrap().map(|t| t.text).collect()
    }

    #[test]
    fn test_whitespace_tokenizer() {
        let tokenizer = WhitespaceTokenizer::new();
        let tokens: Vec<Token> = tokenizer.tokenize("hello  world\ttest").unwrap().collect();

        assert_eq!(tokens.len(), 3);
        assert_eq!(tokens[0].text, "hello");
        assert_eq!(tokens[1].text, "world");
        assert_eq!(tokens[2].text, "test");
        assert_eq!(tokens[1].start_offset, 7);
        assert_eq!(tokens[2].position, 2);
    }

    #[test]
    fn test_corpus_tokenizer_strips_punctuation() {
        let tokenizer = CorpusTokenizer::new();
        assert_eq!(
            words(&tokenizer, "Hello, world! (foo-bar) \"quoted\" a b"),
            vec!["Hello", "world", "foo", "bar", "quoted"]
        );
    }

    #[test]
    fn test_corpus_tokenizer_typographic_marks() {
        let tokenizer = CorpusTokenizer::new();
        assert_eq!(
            words(&tokenizer, "«Москва»—столица…“России”"),
            vec!["Москва", "столица", "России"]
        );
    }

    #[test]
    fn test_corpus_tokenizer_min_len_is_bytes() {
        // A single Cyrillic letter is two bytes and survives the default filter.
        let tokenizer = CorpusTokenizer::new();
        assert_eq!(words(&tokenizer, "я x ok"), vec!["я", "ok"]);

        let tokenizer = CorpusTokenizer::with_min_len(3);
        assert_eq!(words(&tokenizer, "я x ok yes"), vec!["yes"]);
    }

    #[test]
    fn test_empty_input() {
        assert!(words(&CorpusTokenizer::new(), "").is_empty());
        assert!(words(&WhitespaceTokenizer::new(), "   \n").is_empty());
    }

    #[test]
    fn test_tokenizer_names() {
        assert_eq!(WhitespaceTokenizer::new().name(), "whitespace");
        assert_eq!(CorpusTokenizer::new().name(), "corpus");
    }
}

//! Suffix-stripping stemmers.
//!
//! The stemmer used for indexing and for query terms must be the same, otherwise
//! query vocabulary drifts away from the index vocabulary.

/// Trait for stemming algorithms.
pub trait Stemmer: Send + Sync {
    /// Stem a word to its root form.
    fn stem(&self, word: &str) -> String;

    /// Get the name of this stemmer.
    fn name(&self) -> &'static str;
}

/// Russian inflectional endings, checked in order; the first match wins.
pub const RUSSIAN_SUFFIXES: &[&str] = &[
    "вшими", "ями", "ими", "ого", "ому", "ыми", "его", "ему", "ем", "ми", "ая", "ое", "ые", "ие",
    "ый", "ой", "ей", "ий", "ую", "юю", "яя", "ом", "ах", "ях", "ых", "их", "ть", "ти", "ла",
    "на", "ете", "йте", "ли", "й", "л", "н", "ю", "а", "е", "и", "о", "у", "ы", "э", "я",
];

/// Words of at most this many bytes are never stemmed.
pub const DEFAULT_MIN_STEM_BYTES: usize = 6;

/// Stemmer that strips the first matching suffix from an ordered table.
///
/// Lengths are measured in UTF-8 bytes. A word is left untouched when it is
/// no longer than `min_len` bytes; otherwise the first suffix that is a proper
/// suffix of the word (strictly shorter than it) is removed.
#[derive(Debug, Clone)]
pub struct SuffixStemmer {
    suffixes: Vec<String>,
    min_len: usize,
}

impl SuffixStemmer {
    /// Create a stemmer with the Russian suffix table.
    pub fn russian() -> Self {
        Self::with_suffixes(RUSSIAN_SUFFIXES.iter().map(|s| s.to_string()).collect())
    }

    /// Create a stemmer with a custom, ordered suffix table.
    pub fn with_suffixes(suffixes: Vec<String>) -> Self {
        SuffixStemmer {
            suffixes,
            min_len: DEFAULT_MIN_STEM_BYTES,
        }
    }

    /// Change the length below which words are kept as is.
    pub fn with_min_len(mut self, min_len: usize) -> Self {
        self.min_len = min_len;
        self
    }

    /// The suffix table in match order.
    pub fn suffixes(&self) -> &[String] {
        &self.suffixes
    }
}

impl Default for SuffixStemmer {
    fn default() -> Self {
        Self::russian()
    }
}

impl Stemmer for SuffixStemmer {
    fn stem(&self, word: &str) -> String {
        if word.len() <= self.min_len {
            return word.to_string();
        }

        self.suffixes
            .iter()
            .find(|suffix| word.len() > suffix.len() && word.ends_with(suffix.as_str()))
            .map(|suffix| word[..word.len() - suffix.len()].to_string())
            .unwrap_or_else(|| word.to_string())
    }

    fn name(&self) -> &'static str {
        "suffix"
    }
}

/// Stemmer that returns words unchanged.
#[derive(Debug, Clone, Default)]
pub struct IdentityStemmer;

impl IdentityStemmer {
    /// Create a new identity stemmer.
    pub fn new() -> Self {
        IdentityStemmer
    }
}

impl Stemmer for IdentityStemmer {
    fn stem(&self, word: &str) -> String {
        word.to_string()
    }

    fn name(&self) -> &'static str {
        "identity"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_russian_endings() {
        let stemmer = SuffixStemmer::russian();

        assert_eq!(stemmer.stem("красивыми"), "красив");
        assert_eq!(stemmer.stem("кошка"), "кошк");
        assert_eq!(stemmer.stem("читать"), "чита");
        assert_eq!(stemmer.stem("прочитавшими"), "прочита");
    }

    #[test]
    fn test_short_words_are_kept() {
        let stemmer = SuffixStemmer::russian();

        // Three Cyrillic letters are six bytes.
        assert_eq!(stemmer.stem("кот"), "кот");
        assert_eq!(stemmer.stem("dog"), "dog");
        assert_eq!(stemmer.stem(""), "");
    }

    #[test]
    fn test_first_match_wins() {
        let stemmer =
            SuffixStemmer::with_suffixes(vec!["s".to_string(), "ies".to_string()]).with_min_len(3);
        assert_eq!(stemmer.stem("flies"), "flie");

        let stemmer =
            SuffixStemmer::with_suffixes(vec!["ies".to_string(), "s".to_string()]).with_min_len(3);
        assert_eq!(stemmer.stem("flies"), "fl");
    }

    #[test]
    fn test_suffix_must_be_proper() {
        let stemmer = SuffixStemmer::with_suffixes(vec!["running".to_string()]).with_min_len(0);
        assert_eq!(stemmer.stem("running"), "running");
    }

    #[test]
    fn test_latin_words_pass_through_russian_table() {
        let stemmer = SuffixStemmer::russian();
        assert_eq!(stemmer.stem("running"), "running");
    }

    #[test]
    fn test_identity_stemmer() {
        let stemmer = IdentityStemmer::new();
        assert_eq!(stemmer.stem("running"), "running");
        assert_eq!(stemmer.name(), "identity");
    }
}

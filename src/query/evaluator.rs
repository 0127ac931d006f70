//! Left-to-right evaluation of Boolean queries against a term dictionary.

use std::sync::Arc;

use log::debug;

use crate::analysis::stemmer::{Stemmer, SuffixStemmer};
use crate::error::Result;
use crate::index::dictionary::TermDictionary;
use crate::index::posting::DocId;
use crate::query::parser::{BooleanQuery, parse_query};

/// Evaluates queries against a read-only dictionary.
///
/// Query terms go through the same stemmer that produced the index vocabulary
/// before they are looked up. Terms missing from the index match nothing.
pub struct QueryEvaluator {
    dictionary: Arc<TermDictionary>,
    stemmer: Box<dyn Stemmer>,
}

impl std::fmt::Debug for QueryEvaluator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("QueryEvaluator")
            .field("terms", &self.dictionary.len())
            .field("stemmer", &self.stemmer.name())
            .finish()
    }
}

impl QueryEvaluator {
    /// Create an evaluator using the default suffix stemmer.
    pub fn new(dictionary: Arc<TermDictionary>) -> Self {
        Self::with_stemmer(dictionary, Box::new(SuffixStemmer::russian()))
    }

    /// Create an evaluator with a custom stemmer.
    pub fn with_stemmer(dictionary: Arc<TermDictionary>, stemmer: Box<dyn Stemmer>) -> Self {
        QueryEvaluator {
            dictionary,
            stemmer,
        }
    }

    /// The dictionary queries run against.
    pub fn dictionary(&self) -> &TermDictionary {
        &self.dictionary
    }

    /// Postings of a query term after stemming; empty when not indexed.
    pub fn postings(&self, term: &str) -> &[DocId] {
        let stemmed = self.stemmer.stem(term);
        match self.dictionary.lookup_str(&stemmed) {
            Some(doc_ids) => doc_ids,
            None => {
                debug!("term {term:?} (stem {stemmed:?}) is not indexed");
                &[]
            }
        }
    }

    /// Evaluate a parsed query.
    pub fn evaluate(&self, query: &BooleanQuery) -> Vec<DocId> {
        let mut result = self.postings(&query.first).to_vec();
        for clause in &query.clauses {
            result = clause.operator.apply(&result, self.postings(&clause.term));
        }
        debug!("{query} -> {} documents", result.len());
        result
    }

    /// Parse and evaluate one query line.
    pub fn evaluate_line(&self, line: &str) -> Result<Vec<DocId>> {
        let query = parse_query(line)?;
        Ok(self.evaluate(&query))
    }
}

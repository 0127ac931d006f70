//! Boolean query engine.
//!
//! Queries combine terms with `&` (and), `|` (or) and `!` (and not), strictly
//! left to right:
//!
//! ```
//! use std::sync::Arc;
//!
//! use quiver::analysis::IdentityStemmer;
//! use quiver::index::{PostingBuilder, TermDictionary};
//! use quiver::query::QueryEvaluator;
//!
//! let mut builder = PostingBuilder::new();
//! builder.add_text(1, b"cat dog").unwrap();
//! builder.add_text(2, b"dog").unwrap();
//! builder.add_text(3, b"cat cat").unwrap();
//!
//! let dict = Arc::new(TermDictionary::from_entries(builder.build()).unwrap());
//! let evaluator = QueryEvaluator::with_stemmer(dict, Box::new(IdentityStemmer::new()));
//! assert_eq!(evaluator.evaluate_line("cat & dog").unwrap(), vec![1]);
//! ```

pub mod evaluator;
pub mod parser;
pub mod set_ops;

pub use evaluator::QueryEvaluator;
pub use parser::{BooleanQuery, Clause, Operator, parse_query};
pub use set_ops::{difference, intersect, union};

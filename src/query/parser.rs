//! Query line parser.
//!
//! A query is `term (operator term)*` separated by whitespace, evaluated
//! strictly left to right. There is no precedence and no grouping.
//!
//! | Symbol | Operator | Meaning |
//! |--------|----------|---------|
//! | `&` | [`Operator::And`] | intersection |
//! | `\|` | [`Operator::Or`] | union |
//! | `!` | [`Operator::Not`] | difference (left minus right) |

use std::fmt;
use std::str::FromStr;

use log::warn;

use crate::error::{QuiverError, Result};
use crate::index::posting::DocId;
use crate::query::set_ops::{difference, intersect, union};

/// Binary operator between two terms.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operator {
    And,
    Or,
    Not,
}

impl Operator {
    /// The symbol used in query lines.
    pub fn symbol(self) -> &'static str {
        match self {
            Operator::And => "&",
            Operator::Or => "|",
            Operator::Not => "!",
        }
    }

    /// Combine the running result with the postings of the next term.
    pub fn apply(self, left: &[DocId], right: &[DocId]) -> Vec<DocId> {
        match self {
            Operator::And => intersect(left, right),
            Operator::Or => union(left, right),
            Operator::Not => difference(left, right),
        }
    }
}

impl FromStr for Operator {
    type Err = QuiverError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "&" => Ok(Operator::And),
            "|" => Ok(Operator::Or),
            "!" => Ok(Operator::Not),
            other => Err(QuiverError::malformed_query(format!(
                "expected an operator (&, |, !) but found {other:?}"
            ))),
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// One `operator term` step of a query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Clause {
    pub operator: Operator,
    pub term: String,
}

/// A parsed query: a first term followed by clauses applied in order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BooleanQuery {
    pub first: String,
    pub clauses: Vec<Clause>,
}

impl BooleanQuery {
    /// A query consisting of a single term.
    pub fn term<S: Into<String>>(term: S) -> Self {
        BooleanQuery {
            first: term.into(),
            clauses: Vec::new(),
        }
    }

    /// Append a clause.
    pub fn then<S: Into<String>>(mut self, operator: Operator, term: S) -> Self {
        self.clauses.push(Clause {
            operator,
            term: term.into(),
        });
        self
    }

    /// All terms in order of appearance.
    pub fn terms(&self) -> impl Iterator<Item = &str> {
        std::iter::once(self.first.as_str()).chain(self.clauses.iter().map(|c| c.term.as_str()))
    }
}

impl fmt::Display for BooleanQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.first)?;
        for clause in &self.clauses {
            write!(f, " {} {}", clause.operator, clause.term)?;
        }
        Ok(())
    }
}

impl FromStr for BooleanQuery {
    type Err = QuiverError;

    fn from_str(s: &str) -> Result<Self> {
        parse_query(s)
    }
}

/// Parse one query line.
///
/// An unknown operator rejects the whole query. A recognized operator at the
/// end of the line with no term after it is dropped with a warning.
pub fn parse_query(line: &str) -> Result<BooleanQuery> {
    let mut tokens = line.split_whitespace();
    let first = tokens
        .next()
        .ok_or_else(|| QuiverError::malformed_query("empty query"))?;

    let mut query = BooleanQuery::term(first);
    while let Some(op_token) = tokens.next() {
        let operator: Operator = op_token.parse()?;
        match tokens.next() {
            Some(term) => query = query.then(operator, term),
            None => warn!("ignoring trailing operator {operator:?} with no term"),
        }
    }

    Ok(query)
}

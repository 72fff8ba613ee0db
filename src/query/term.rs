//! Search-term serialization.
//!
//! E-utilities search terms use a bracket-tag grammar: each clause is a value
//! followed by the field it applies to, and clauses are combined with boolean
//! operators written between `+` signs.
//!
//! ```text
//!     {WORD: "low coverage", SEQS: "inprogress"}
//!
//!     AND ──► low coverage[WORD]+AND+inprogress[SEQS]
//!     OR  ──► (low coverage[WORD]+OR+inprogress[SEQS])
//!
//!     {A: [1, 2, 3]}  ──►  1,2,3[A]
//! ```

use super::params::{Params, Value};
use crate::error::{EntrezError, Result};
use std::fmt;
use std::str::FromStr;

/// Boolean operator joining search-term clauses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Operator {
    /// Every clause must match.
    #[default]
    And,
    /// Any clause may match. The joined expression is parenthesized.
    Or,
}

impl Operator {
    /// The operator as it appears in a query.
    pub fn as_str(&self) -> &'static str {
        match self {
            Operator::And => "AND",
            Operator::Or => "OR",
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Operator {
    type Err = EntrezError;

    /// Parses `AND` or `OR`. Matching is exact; `and`, `XOR` and anything
    /// else is rejected.
    fn from_str(s: &str) -> Result<Self> {
        match s {
            "AND" => Ok(Operator::And),
            "OR" => Ok(Operator::Or),
            other => Err(EntrezError::UnknownOperator(other.to_string())),
        }
    }
}

/// An ordered mapping of field tag to value.
///
/// ## Example
///
/// ```rust
/// use entrez_client::{Operator, SearchTerms};
///
/// let terms = SearchTerms::new()
///     .field("WORD", "low coverage")
///     .field("SEQS", "inprogress");
///
/// assert_eq!(terms.join(Operator::And), "low coverage[WORD]+AND+inprogress[SEQS]");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchTerms {
    fields: Params,
}

impl SearchTerms {
    /// Creates an empty mapping.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds or replaces a field, builder style.
    pub fn field(mut self, tag: impl Into<String>, value: impl Into<Value>) -> Self {
        self.fields.insert(tag, value);
        self
    }

    /// Adds or replaces a field.
    pub fn insert(&mut self, tag: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.fields.insert(tag, value)
    }

    /// Number of fields.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Returns `true` when no fields are present.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Iterates over `(tag, value)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.fields.iter()
    }

    /// Serializes the mapping with `operator`.
    ///
    /// Each field renders as `value[tag]`, list values comma-joined first.
    /// Clauses are joined with `+AND+` or `+OR+`; an `OR` expression is
    /// wrapped in parentheses.
    pub fn join(&self, operator: Operator) -> String {
        let separator = format!("+{}+", operator.as_str());
        let joined = self
            .fields
            .iter()
            .map(|(tag, value)| format!("{}[{}]", value.render(), tag))
            .collect::<Vec<_>>()
            .join(&separator);

        match operator {
            Operator::And => joined,
            Operator::Or => format!("({joined})"),
        }
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for SearchTerms {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            fields: iter.into_iter().collect(),
        }
    }
}

impl<K: Into<String>, V: Into<Value>, const N: usize> From<[(K, V); N]> for SearchTerms {
    fn from(entries: [(K, V); N]) -> Self {
        entries.into_iter().collect()
    }
}

/// Serializes `terms` with an operator given as text.
///
/// The operator is validated before any serialization happens.
///
/// # Errors
///
/// Returns [`EntrezError::UnknownOperator`] unless `operator` is exactly
/// `AND` or `OR`.
///
/// ```rust
/// use entrez_client::{convert_search_terms, SearchTerms};
///
/// let terms = SearchTerms::from([("A", "x"), ("B", "y")]);
/// assert_eq!(convert_search_terms(&terms, "OR").unwrap(), "(x[A]+OR+y[B])");
/// assert!(convert_search_terms(&terms, "XOR").is_err());
/// ```
pub fn convert_search_terms(terms: &SearchTerms, operator: &str) -> Result<String> {
    let operator = operator.parse::<Operator>()?;
    Ok(terms.join(operator))
}

/// What to send as the `term` parameter of a search.
///
/// Either a literal query passed through verbatim, or a field mapping that is
/// serialized with an operator.
///
/// ```rust
/// use entrez_client::{SearchTerm, SearchTerms};
///
/// let literal = SearchTerm::from("asthma[mesh] AND leukotrienes[mesh]");
/// assert_eq!(literal.render(), "asthma[mesh] AND leukotrienes[mesh]");
///
/// let any = SearchTerm::any(SearchTerms::from([("A", "x"), ("B", "y")]));
/// assert_eq!(any.render(), "(x[A]+OR+y[B])");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchTerm {
    /// Sent exactly as given.
    Literal(String),
    /// Serialized from a field mapping.
    Fields {
        /// The field mapping.
        terms: SearchTerms,
        /// How the clauses are combined.
        operator: Operator,
    },
}

impl SearchTerm {
    /// All clauses must match (`AND`).
    pub fn all(terms: SearchTerms) -> Self {
        SearchTerm::Fields {
            terms,
            operator: Operator::And,
        }
    }

    /// Any clause may match (`OR`).
    pub fn any(terms: SearchTerms) -> Self {
        SearchTerm::Fields {
            terms,
            operator: Operator::Or,
        }
    }

    /// Builds a field term with an operator given as text.
    ///
    /// # Errors
    ///
    /// Returns [`EntrezError::UnknownOperator`] for anything but `AND`/`OR`.
    pub fn with_operator(terms: SearchTerms, operator: &str) -> Result<Self> {
        Ok(SearchTerm::Fields {
            terms,
            operator: operator.parse()?,
        })
    }

    /// Renders the value sent as `term`.
    pub fn render(&self) -> String {
        match self {
            SearchTerm::Literal(text) => text.clone(),
            SearchTerm::Fields { terms, operator } => terms.join(*operator),
        }
    }
}

impl From<&str> for SearchTerm {
    fn from(text: &str) -> Self {
        SearchTerm::Literal(text.to_string())
    }
}

impl From<String> for SearchTerm {
    fn from(text: String) -> Self {
        SearchTerm::Literal(text)
    }
}

impl From<SearchTerms> for SearchTerm {
    fn from(terms: SearchTerms) -> Self {
        SearchTerm::all(terms)
    }
}

impl fmt::Display for SearchTerm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_and_join() {
        let terms = SearchTerms::new()
            .field("WORD", "low coverage")
            .field("SEQS", "inprogress");

        assert_eq!(
            terms.join(Operator::default()),
            "low coverage[WORD]+AND+inprogress[SEQS]"
        );
    }

    #[test]
    fn test_list_value_is_comma_joined() {
        let terms = SearchTerms::new().field("A", vec![1, 2, 3]);
        assert_eq!(terms.join(Operator::And), "1,2,3[A]");
    }

    #[test]
    fn test_or_join_is_parenthesized() {
        let terms = SearchTerms::from([("A", "x"), ("B", "y")]);
        assert_eq!(convert_search_terms(&terms, "OR").unwrap(), "(x[A]+OR+y[B])");
    }

    #[test]
    fn test_single_or_clause_still_parenthesized() {
        let terms = SearchTerms::from([("A", "x")]);
        assert_eq!(terms.join(Operator::Or), "(x[A])");
    }

    #[test]
    fn test_unknown_operator() {
        let terms = SearchTerms::from([("A", "x")]);

        let err = convert_search_terms(&terms, "XOR").unwrap_err();
        assert!(matches!(err, EntrezError::UnknownOperator(ref op) if op == "XOR"));

        // Matching is case-sensitive
        assert!(convert_search_terms(&terms, "and").is_err());
        assert!(SearchTerm::with_operator(terms, "NOT").is_err());
    }

    #[test]
    fn test_operator_round_trip_text() {
        assert_eq!("AND".parse::<Operator>().unwrap(), Operator::And);
        assert_eq!("OR".parse::<Operator>().unwrap(), Operator::Or);
        assert_eq!(Operator::Or.to_string(), "OR");
    }

    #[test]
    fn test_empty_mapping() {
        let terms = SearchTerms::new();
        assert!(terms.is_empty());
        assert_eq!(terms.join(Operator::And), "");
        assert_eq!(terms.join(Operator::Or), "()");
    }

    #[test]
    fn test_insertion_order_preserved() {
        let mut terms = SearchTerms::new().field("ZZ", "last").field("AA", "first");
        terms.insert("ZZ", "replaced");

        assert_eq!(terms.len(), 2);
        assert_eq!(terms.join(Operator::And), "replaced[ZZ]+AND+first[AA]");
    }

    #[test]
    fn test_search_term_conversions() {
        assert_eq!(SearchTerm::from("hapmap[WORD]").render(), "hapmap[WORD]");
        assert_eq!(
            SearchTerm::from(String::from("literal")),
            SearchTerm::Literal("literal".to_string())
        );

        let term: SearchTerm = SearchTerms::from([("WORD", "hapmap")]).into();
        assert_eq!(term.to_string(), "hapmap[WORD]");

        let term = SearchTerm::with_operator(SearchTerms::from([("A", "x")]), "OR").unwrap();
        assert_eq!(term.render(), "(x[A])");
    }
}

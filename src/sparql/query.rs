//! SELECT query construction
//!
//! Every read the bridge performs selects the same three variables, so the
//! normalizer can rely on `?subject ?predicate ?object` being present in the
//! projection.

use std::fmt;
use std::ops::Deref;

use serde::{Deserialize, Serialize};

use crate::error::{BridgeError, BridgeResult};
use crate::sparql::escape::{check_no_controls, quote_literal};

/// Variables projected by every generated SELECT.
pub const TRIPLE_VARIABLES: [&str; 3] = ["subject", "predicate", "object"];

const SELECT_CLAUSE: &str = "SELECT ?subject ?predicate ?object";
const TRIPLE_PATTERN: &str = "?subject ?predicate ?object";

/// Generated SPARQL query text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryText(String);

impl QueryText {
    /// Wrap text that is already a complete query
    pub fn new(text: impl Into<String>) -> Self {
        Self(text.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl Deref for QueryText {
    type Target = str;

    fn deref(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for QueryText {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for QueryText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<QueryText> for String {
    fn from(text: QueryText) -> Self {
        text.0
    }
}

/// What the caller wants to read
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum QuerySpec {
    /// Every triple, up to `limit`
    Dump { limit: i64 },
    /// Triples whose subject, predicate or object mentions `keyword`
    Keyword { keyword: String, limit: i64 },
    /// A complete caller-supplied query, forwarded unmodified
    Raw { text: String },
}

impl QuerySpec {
    /// Produce the query text for this request
    pub fn build(&self) -> BridgeResult<QueryText> {
        match self {
            QuerySpec::Dump { limit } => build_dump_query(*limit),
            QuerySpec::Keyword { keyword, limit } => build_keyword_query(keyword, *limit),
            QuerySpec::Raw { text } => {
                if text.trim().is_empty() {
                    return Err(BridgeError::invalid("query text must not be empty"));
                }
                Ok(QueryText::new(text.clone()))
            }
        }
    }
}

fn check_limit(limit: i64) -> BridgeResult<i64> {
    if limit <= 0 {
        return Err(BridgeError::invalid(format!(
            "limit must be a positive integer, got {}",
            limit
        )));
    }
    Ok(limit)
}

/// Parse a textual limit (query string, CLI flag) into a positive integer
pub fn parse_limit(raw: &str) -> BridgeResult<i64> {
    let limit = raw
        .trim()
        .parse::<i64>()
        .map_err(|_| BridgeError::invalid(format!("limit must be an integer, got {:?}", raw)))?;
    check_limit(limit)
}

/// `SELECT ?subject ?predicate ?object WHERE { ?subject ?predicate ?object } LIMIT <limit>`
pub fn build_dump_query(limit: i64) -> BridgeResult<QueryText> {
    let limit = check_limit(limit)?;
    Ok(QueryText(format!(
        "{} WHERE {{ {} }} LIMIT {}",
        SELECT_CLAUSE, TRIPLE_PATTERN, limit
    )))
}

/// Case-insensitive substring search over subject, predicate and object.
///
/// The keyword is lower-cased and embedded as an escaped string literal, so
/// quotes or braces in it cannot leave the `FILTER` expression. Tabs, line
/// breaks, backspace and form feed are escaped; blank keywords and keywords
/// carrying any other control character are rejected.
pub fn build_keyword_query(keyword: &str, limit: i64) -> BridgeResult<QueryText> {
    let limit = check_limit(limit)?;
    if keyword.trim().is_empty() {
        return Err(BridgeError::invalid("keyword must not be empty"));
    }
    check_no_controls(keyword, "keyword")?;

    let needle = quote_literal(&keyword.to_lowercase());
    let conditions = TRIPLE_VARIABLES
        .iter()
        .map(|var| format!("CONTAINS(LCASE(STR(?{})), {})", var, needle))
        .collect::<Vec<_>>()
        .join(" || ");

    Ok(QueryText(format!(
        "{} WHERE {{ {} . FILTER({}) }} LIMIT {}",
        SELECT_CLAUSE, TRIPLE_PATTERN, conditions, limit
    )))
}

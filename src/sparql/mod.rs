//! SPARQL text construction and result normalization
//!
//! This module turns structured read/write requests into SPARQL text and
//! flattens the store's JSON answers:
//!
//! - `query`: SELECT text for full dumps, keyword searches, raw pass-through
//! - `update`: `INSERT DATA` text from prefixes and triple patterns
//! - `results`: SPARQL-JSON parsing and flat triple records
//! - `escape`: the one place literal text is escaped
//!
//! All builders are pure; nothing here performs I/O.
//!
//! # Example
//!
//! ```rust
//! use sparql_bridge::sparql::{build_keyword_query, build_insert};
//! use sparql_bridge::rdf::Namespace;
//!
//! let query = build_keyword_query("Tomato", 20).unwrap();
//! assert!(query.contains("\"tomato\""));
//!
//! let update = build_insert(
//!     &[Namespace::new("ex", "http://ex#")],
//!     &[("ex:a", "ex:b", "ex:c").into()],
//! ).unwrap();
//! assert!(update.starts_with("PREFIX ex: <http://ex#>"));
//! ```

pub mod escape;
mod query;
mod results;
mod update;

pub use query::{
    build_dump_query, build_keyword_query, parse_limit,
    QuerySpec, QueryText, TRIPLE_VARIABLES,
};
pub use update::{build_insert, InsertSpec, PatternTerm, TriplePattern, UpdateText};
pub use results::{normalize, parse_results, Binding, BindingTerm, TripleRecord};

//! RDF term model
//!
//! This module provides the typed RDF values the SPARQL builders work with:
//! - Named nodes (IRIs), blank nodes, plain and typed literals
//! - Ordered namespace prefixes for `PREFIX` declarations
//!
//! # Example
//!
//! ```rust
//! use sparql_bridge::rdf::RdfTerm;
//!
//! let subject = RdfTerm::iri("http://example.org/alice").unwrap();
//! let name = RdfTerm::lang_literal("Alice", "en").unwrap();
//!
//! assert_eq!(subject.to_string(), "<http://example.org/alice>");
//! assert_eq!(name.to_string(), "\"Alice\"@en");
//! ```

mod namespace;
mod types;

pub use types::{
    RdfTerm, NamedNode, BlankNode, Literal, TypedLiteral,
    RdfError, RdfResult,
};

pub use namespace::{NamespaceManager, Namespace};

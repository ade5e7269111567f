//! SPARQL Bridge
//!
//! Mediates between HTTP clients and a SPARQL 1.1 triple store: builds query
//! and update text from structured input, submits it to the store's
//! endpoints, and flattens SPARQL-JSON results into subject/predicate/object
//! records.
//!
//! # Layers
//!
//! - `rdf`: typed RDF terms and ordered namespace prefixes
//! - `sparql`: pure builders (dump, keyword search, `INSERT DATA`), literal
//!   escaping, and the result normalizer
//! - `store`: the `SparqlStore` trait and its HTTP client
//! - `http`: axum gateway routes over a `SparqlStore`
//! - `config`: endpoint and gateway settings
//!
//! ## Example Usage
//!
//! ```rust
//! use sparql_bridge::sparql::{build_dump_query, normalize, Binding, BindingTerm};
//!
//! let query = build_dump_query(10).unwrap();
//! assert!(query.ends_with("LIMIT 10"));
//!
//! let rows = vec![Binding::new().with("subject", BindingTerm::from_value("http://ex/a"))];
//! let records = normalize(&rows);
//! assert_eq!(records[0].subject.as_deref(), Some("http://ex/a"));
//! assert_eq!(records[0].predicate, None);
//! ```

#![warn(clippy::all)]

pub mod config;
pub mod error;
pub mod http;
pub mod rdf;
pub mod sparql;
pub mod store;

// Re-export main types for convenience
pub use config::{BridgeConfig, GatewayConfig, StoreConfig};

pub use error::{BridgeError, BridgeResult};

pub use rdf::{
    RdfTerm, NamedNode, BlankNode, Literal, TypedLiteral,
    Namespace, NamespaceManager,
};

pub use sparql::{
    build_dump_query, build_keyword_query, build_insert, normalize, parse_results,
    Binding, BindingTerm, InsertSpec, QuerySpec, QueryText, TriplePattern, TripleRecord,
    UpdateText,
};

pub use store::{RequestKind, SparqlStore, StoreClient};

pub use http::HttpServer;

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

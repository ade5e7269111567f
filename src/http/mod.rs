//! Gateway facade
//!
//! Thin axum routes over the SPARQL builders and a `SparqlStore`:
//!
//! - `GET  /api/local?limit=N` — full dump
//! - `POST /api/keyword-search` — `{ "keywords": "...", "limit": N }`
//! - `POST /api/query` — `{ "query": "SELECT ..." }`
//! - `POST /api/insert` — `{ "prefixes": [...], "triples": [...] }`
//! - `GET  /api/status`

mod handler;
mod server;

pub use handler::{
    AppState, DumpParams, InsertRequest, InsertResponse, KeywordRequest, PrefixEntry,
    RawQueryRequest, TripleEntry,
};
pub use server::{router, HttpServer};

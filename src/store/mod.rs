//! Triple store access
//!
//! Provides the `SparqlStore` trait and `StoreClient`, its HTTP implementation
//! against a store's SPARQL query and update endpoints.

mod client;

pub use client::{RequestKind, StoreClient};

use async_trait::async_trait;

use crate::error::BridgeResult;
use crate::sparql::{normalize, Binding, InsertSpec, QuerySpec, QueryText, TripleRecord, UpdateText};

/// Unified interface to a SPARQL triple store.
///
/// Implemented by:
/// - `StoreClient` — talks to a remote store over HTTP
///
/// Dropping a returned future abandons the request; implementations keep no
/// state between calls.
#[async_trait]
pub trait SparqlStore: Send + Sync {
    /// Run a SELECT query and return its solution rows
    async fn select(&self, query: &QueryText) -> BridgeResult<Vec<Binding>>;

    /// Run a SPARQL update
    async fn update(&self, update: &UpdateText) -> BridgeResult<()>;

    /// Build, run and normalize a read
    async fn query(&self, spec: &QuerySpec) -> BridgeResult<Vec<TripleRecord>> {
        let text = spec.build()?;
        let rows = self.select(&text).await?;
        Ok(normalize(&rows))
    }

    /// Build and run an `INSERT DATA`
    async fn insert(&self, spec: &InsertSpec) -> BridgeResult<()> {
        let text = spec.build()?;
        self.update(&text).await
    }
}

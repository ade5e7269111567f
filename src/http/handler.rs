//! HTTP handlers for the gateway API
//!
//! Handlers only extract parameters and serialize results; SPARQL text is
//! produced by `crate::sparql` and sent by the configured `SparqlStore`.
//! If the caller disconnects, axum drops the handler future and with it the
//! in-flight store request.

use axum::{
    extract::{rejection::JsonRejection, Json, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::sync::Arc;
use tracing::{error, warn};

use crate::config::GatewayConfig;
use crate::error::{BridgeError, BridgeResult};
use crate::rdf::Namespace;
use crate::sparql::{parse_limit, InsertSpec, QuerySpec, TriplePattern, TripleRecord};
use crate::store::SparqlStore;

/// Shared handler state
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn SparqlStore>,
    pub gateway: GatewayConfig,
}

/// Query string of `GET /api/local`
#[derive(Debug, Deserialize)]
pub struct DumpParams {
    pub limit: Option<String>,
}

/// Body of `POST /api/keyword-search`
#[derive(Debug, Deserialize)]
pub struct KeywordRequest {
    pub keywords: String,
    pub limit: Option<i64>,
}

/// Body of `POST /api/query`
#[derive(Debug, Deserialize)]
pub struct RawQueryRequest {
    pub query: String,
}

/// One prefix declaration of an insert request
#[derive(Debug, Deserialize)]
pub struct PrefixEntry {
    pub prefix: String,
    pub iri: String,
}

/// One triple of an insert request, each position a SPARQL fragment
#[derive(Debug, Deserialize)]
pub struct TripleEntry {
    pub subject: String,
    pub predicate: String,
    pub object: String,
}

/// Body of `POST /api/insert`
#[derive(Debug, Deserialize)]
pub struct InsertRequest {
    #[serde(default)]
    pub prefixes: Vec<PrefixEntry>,
    #[serde(default)]
    pub triples: Vec<TripleEntry>,
}

impl From<InsertRequest> for InsertSpec {
    fn from(request: InsertRequest) -> Self {
        InsertSpec {
            prefixes: request
                .prefixes
                .into_iter()
                .map(|p| Namespace::new(p.prefix, p.iri))
                .collect(),
            triples: request
                .triples
                .into_iter()
                .map(|t| TriplePattern::new(t.subject, t.predicate, t.object))
                .collect(),
        }
    }
}

/// Response of `POST /api/insert`
#[derive(Debug, Serialize, Deserialize)]
pub struct InsertResponse {
    pub inserted: usize,
}

impl BridgeError {
    fn status_code(&self) -> StatusCode {
        match self {
            BridgeError::InvalidArgument(_) => StatusCode::BAD_REQUEST,
            BridgeError::Store { .. } | BridgeError::MalformedResponse(_) => StatusCode::BAD_GATEWAY,
            BridgeError::Transport(_) => StatusCode::SERVICE_UNAVAILABLE,
            BridgeError::Config(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<JsonRejection> for BridgeError {
    fn from(rejection: JsonRejection) -> Self {
        BridgeError::invalid(rejection.body_text())
    }
}

impl IntoResponse for BridgeError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let message = if self.is_client_error() {
            warn!("Rejected request: {}", self);
            "Invalid request"
        } else {
            error!("Error executing SPARQL operation: {}", self);
            "Error executing query"
        };

        (
            status,
            Json(json!({
                "message": message,
                "kind": self.kind(),
                "error": self.to_string(),
            })),
        )
            .into_response()
    }
}

/// Handler for the full dump
pub async fn dump_handler(
    State(state): State<AppState>,
    Query(params): Query<DumpParams>,
) -> BridgeResult<Json<Vec<TripleRecord>>> {
    let limit = match params.limit.as_deref() {
        Some(raw) => parse_limit(raw)?,
        None => state.gateway.dump_limit,
    };
    let records = state.store.query(&QuerySpec::Dump { limit }).await?;
    Ok(Json(records))
}

/// Handler for keyword search
pub async fn keyword_search_handler(
    State(state): State<AppState>,
    payload: Result<Json<KeywordRequest>, JsonRejection>,
) -> BridgeResult<Json<Vec<TripleRecord>>> {
    let Json(payload) = payload?;
    let spec = QuerySpec::Keyword {
        keyword: payload.keywords,
        limit: payload.limit.unwrap_or(state.gateway.search_limit),
    };
    let records = state.store.query(&spec).await?;
    Ok(Json(records))
}

/// Handler for caller-supplied SELECT queries
pub async fn raw_query_handler(
    State(state): State<AppState>,
    payload: Result<Json<RawQueryRequest>, JsonRejection>,
) -> BridgeResult<Json<Vec<TripleRecord>>> {
    let Json(payload) = payload?;
    let records = state.store.query(&QuerySpec::Raw { text: payload.query }).await?;
    Ok(Json(records))
}

/// Handler for `INSERT DATA`
pub async fn insert_handler(
    State(state): State<AppState>,
    payload: Result<Json<InsertRequest>, JsonRejection>,
) -> BridgeResult<Json<InsertResponse>> {
    let Json(payload) = payload?;
    let spec = InsertSpec::from(payload);
    state.store.insert(&spec).await?;
    Ok(Json(InsertResponse {
        inserted: spec.triples.len(),
    }))
}

/// Handler for gateway status
pub async fn status_handler() -> impl IntoResponse {
    Json(json!({
        "status": "ok",
        "version": crate::VERSION,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(BridgeError::invalid("x").status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(
            BridgeError::Store { status: 500, body: String::new() }.status_code(),
            StatusCode::BAD_GATEWAY
        );
        assert_eq!(
            BridgeError::MalformedResponse("x".to_string()).status_code(),
            StatusCode::BAD_GATEWAY
        );
        assert_eq!(BridgeError::Config("x".to_string()).status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_insert_request_conversion() {
        let request: InsertRequest = serde_json::from_value(json!({
            "prefixes": [{ "prefix": "ex", "iri": "http://ex#" }],
            "triples": [{ "subject": "ex:a", "predicate": "ex:b", "object": "\"c\"" }]
        }))
        .unwrap();

        let spec = InsertSpec::from(request);
        assert_eq!(spec.prefixes, vec![Namespace::new("ex", "http://ex#")]);
        assert_eq!(spec.triples, vec![TriplePattern::new("ex:a", "ex:b", "\"c\"")]);
    }
}

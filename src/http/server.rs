//! HTTP server implementation for the gateway

use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tracing::info;

use super::handler::{
    dump_handler, insert_handler, keyword_search_handler, raw_query_handler, status_handler,
    AppState,
};
use crate::config::GatewayConfig;
use crate::store::SparqlStore;

/// Build the gateway routes over a store
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/api/local", get(dump_handler))
        .route("/api/keyword-search", post(keyword_search_handler))
        .route("/api/query", post(raw_query_handler))
        .route("/api/insert", post(insert_handler))
        .route("/api/status", get(status_handler))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// HTTP server exposing the gateway API
pub struct HttpServer {
    state: AppState,
}

impl HttpServer {
    /// Create a new HTTP server
    pub fn new(store: Arc<dyn SparqlStore>, gateway: GatewayConfig) -> Self {
        Self {
            state: AppState { store, gateway },
        }
    }

    /// Start the HTTP server
    pub async fn start(&self) -> Result<(), Box<dyn std::error::Error>> {
        let app = router(self.state.clone());

        let addr = format!("{}:{}", self.state.gateway.address, self.state.gateway.port);
        let listener = tokio::net::TcpListener::bind(&addr).await?;

        info!("Gateway listening on http://{}", addr);

        axum::serve(listener, app).await?;

        Ok(())
    }
}

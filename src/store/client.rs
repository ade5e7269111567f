//! StoreClient — HTTP client for a SPARQL 1.1 protocol endpoint pair

use std::fmt;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use reqwest::Client;
use tracing::{debug, warn};

use crate::config::StoreConfig;
use crate::error::{BridgeError, BridgeResult};
use crate::sparql::{parse_results, Binding, QueryText, UpdateText};
use crate::store::SparqlStore;

/// Which SPARQL protocol operation a request body carries
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestKind {
    /// SELECT text, answered with SPARQL-JSON
    Query,
    /// Update text, answered with an empty acknowledgement
    Update,
}

impl RequestKind {
    pub fn content_type(&self) -> &'static str {
        match self {
            RequestKind::Query => "application/sparql-query",
            RequestKind::Update => "application/sparql-update",
        }
    }

    fn accept(&self) -> Option<&'static str> {
        match self {
            RequestKind::Query => Some("application/json"),
            RequestKind::Update => None,
        }
    }
}

impl fmt::Display for RequestKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RequestKind::Query => f.write_str("query"),
            RequestKind::Update => f.write_str("update"),
        }
    }
}

/// Network client for a triple store's query and update endpoints.
///
/// Cheap to share behind an `Arc`; the underlying connection pool is reused
/// across requests. No retries are attempted.
#[derive(Debug, Clone)]
pub struct StoreClient {
    query_endpoint: String,
    update_endpoint: String,
    http_client: Client,
}

impl StoreClient {
    /// Create a client for the configured endpoints.
    ///
    /// # Example
    /// ```no_run
    /// # use sparql_bridge::{StoreClient, StoreConfig};
    /// let config = StoreConfig::new(
    ///     "http://localhost:3030/ds/sparql",
    ///     "http://localhost:3030/ds/update",
    /// );
    /// let client = StoreClient::new(&config).unwrap();
    /// ```
    pub fn new(config: &StoreConfig) -> BridgeResult<Self> {
        config.validate()?;

        let mut builder = Client::builder();
        if let Some(secs) = config.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let http_client = builder
            .build()
            .map_err(|e| BridgeError::Config(format!("cannot build HTTP client: {}", e)))?;

        Ok(Self {
            query_endpoint: config.query_endpoint.clone(),
            update_endpoint: config.update_endpoint.clone(),
            http_client,
        })
    }

    pub fn query_endpoint(&self) -> &str {
        &self.query_endpoint
    }

    pub fn update_endpoint(&self) -> &str {
        &self.update_endpoint
    }

    /// POST a SPARQL body to `endpoint` and return the raw response text.
    ///
    /// Non-2xx answers become [`BridgeError::Store`] with the upstream status
    /// and body; failures to reach the store become [`BridgeError::Transport`].
    pub async fn execute(&self, endpoint: &str, body: &str, kind: RequestKind) -> BridgeResult<String> {
        debug!("POST {} ({}):\n{}", endpoint, kind, body);

        let mut request = self
            .http_client
            .post(endpoint)
            .header(CONTENT_TYPE, kind.content_type());
        if let Some(accept) = kind.accept() {
            request = request.header(ACCEPT, accept);
        }

        let response = request.body(body.to_string()).send().await.map_err(classify)?;
        let status = response.status();

        if status.is_success() {
            Ok(response.text().await?)
        } else {
            let text = response.text().await.unwrap_or_default();
            warn!("Store rejected {} with HTTP {}: {}", kind, status, text);
            Err(BridgeError::Store {
                status: status.as_u16(),
                body: text,
            })
        }
    }
}

fn classify(err: reqwest::Error) -> BridgeError {
    if err.is_builder() {
        BridgeError::InvalidArgument(format!("cannot build store request: {}", err))
    } else {
        BridgeError::Transport(err)
    }
}

#[async_trait]
impl SparqlStore for StoreClient {
    async fn select(&self, query: &QueryText) -> BridgeResult<Vec<Binding>> {
        let body = self
            .execute(&self.query_endpoint, query.as_str(), RequestKind::Query)
            .await?;
        let rows = parse_results(&body)?;
        debug!("Store returned {} rows", rows.len());
        Ok(rows)
    }

    async fn update(&self, update: &UpdateText) -> BridgeResult<()> {
        self.execute(&self.update_endpoint, update.as_str(), RequestKind::Update)
            .await?;
        Ok(())
    }
}

use anyhow::Context;
use sparql_bridge::{BridgeConfig, HttpServer, StoreClient};
use std::sync::Arc;
use tracing::info;

/// Path to a YAML configuration file; when unset, settings come from the
/// `SPARQL_BRIDGE_*` environment variables.
const ENV_CONFIG_PATH: &str = "SPARQL_BRIDGE_CONFIG";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let config = match std::env::var(ENV_CONFIG_PATH) {
        Ok(path) => BridgeConfig::from_yaml_file(&path)
            .with_context(|| format!("loading configuration from {}", path))?,
        Err(_) => BridgeConfig::from_env().context("loading configuration from environment")?,
    };

    info!(
        "SPARQL Bridge v{}: query={} update={}",
        sparql_bridge::VERSION,
        config.store.query_endpoint,
        config.store.update_endpoint
    );

    let store = StoreClient::new(&config.store)?;
    let server = HttpServer::new(Arc::new(store), config.gateway);

    server
        .start()
        .await
        .map_err(|e| anyhow::anyhow!("gateway stopped: {}", e))
}

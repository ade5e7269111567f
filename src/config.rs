//! Bridge configuration
//!
//! Settings are loaded from a YAML file or from `SPARQL_BRIDGE_*` environment
//! variables. Store endpoints are required; there are no baked-in defaults
//! for them.
//!
//! ```yaml
//! store:
//!   query_endpoint: http://localhost:3030/ds/sparql
//!   update_endpoint: http://localhost:3030/ds/update
//! gateway:
//!   port: 4000
//! ```

use std::path::Path;

use reqwest::Url;
use serde::{Deserialize, Serialize};

use crate::error::{BridgeError, BridgeResult};

pub const ENV_QUERY_URL: &str = "SPARQL_BRIDGE_QUERY_URL";
pub const ENV_UPDATE_URL: &str = "SPARQL_BRIDGE_UPDATE_URL";
pub const ENV_TIMEOUT_SECS: &str = "SPARQL_BRIDGE_TIMEOUT_SECS";
pub const ENV_ADDRESS: &str = "SPARQL_BRIDGE_ADDRESS";
pub const ENV_PORT: &str = "SPARQL_BRIDGE_PORT";

/// Where the triple store lives
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreConfig {
    /// SPARQL query endpoint (reads)
    pub query_endpoint: String,
    /// SPARQL update endpoint (writes)
    pub update_endpoint: String,
    /// Request timeout; `None` keeps the HTTP client's default
    #[serde(default)]
    pub timeout_secs: Option<u64>,
}

impl StoreConfig {
    pub fn new(query_endpoint: impl Into<String>, update_endpoint: impl Into<String>) -> Self {
        Self {
            query_endpoint: query_endpoint.into(),
            update_endpoint: update_endpoint.into(),
            timeout_secs: None,
        }
    }

    /// Check both endpoints are absolute http(s) URLs
    pub fn validate(&self) -> BridgeResult<()> {
        check_endpoint("query_endpoint", &self.query_endpoint)?;
        check_endpoint("update_endpoint", &self.update_endpoint)?;
        if self.timeout_secs == Some(0) {
            return Err(BridgeError::Config("timeout_secs must be positive".to_string()));
        }
        Ok(())
    }
}

fn check_endpoint(name: &str, value: &str) -> BridgeResult<()> {
    if value.trim().is_empty() {
        return Err(BridgeError::Config(format!("{} is required", name)));
    }
    let url = Url::parse(value)
        .map_err(|e| BridgeError::Config(format!("{} is not a valid URL ({}): {}", name, value, e)))?;
    match url.scheme() {
        "http" | "https" => Ok(()),
        other => Err(BridgeError::Config(format!(
            "{} must use http or https, got {}",
            name, other
        ))),
    }
}

/// HTTP gateway settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GatewayConfig {
    /// Bind address
    pub address: String,
    /// Port
    pub port: u16,
    /// Row limit for `/api/local` when the request names none
    pub dump_limit: i64,
    /// Row limit for `/api/keyword-search` when the request names none
    pub search_limit: i64,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            address: "0.0.0.0".to_string(),
            port: 4000,
            dump_limit: 10,
            search_limit: 20,
        }
    }
}

/// Top-level configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BridgeConfig {
    pub store: StoreConfig,
    #[serde(default)]
    pub gateway: GatewayConfig,
}

impl BridgeConfig {
    /// Parse and validate a YAML document
    pub fn from_yaml_str(text: &str) -> BridgeResult<Self> {
        let config: BridgeConfig = serde_yaml::from_str(text)
            .map_err(|e| BridgeError::Config(format!("invalid configuration: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a YAML file
    pub fn from_yaml_file(path: impl AsRef<Path>) -> BridgeResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .map_err(|e| BridgeError::Config(format!("cannot read {}: {}", path.display(), e)))?;
        Self::from_yaml_str(&text)
    }

    /// Build from `SPARQL_BRIDGE_*` environment variables
    pub fn from_env() -> BridgeResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub(crate) fn from_lookup<F>(lookup: F) -> BridgeResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |key: &str| {
            lookup(key).ok_or_else(|| BridgeError::Config(format!("{} is not set", key)))
        };

        let mut store = StoreConfig::new(required(ENV_QUERY_URL)?, required(ENV_UPDATE_URL)?);
        if let Some(raw) = lookup(ENV_TIMEOUT_SECS) {
            store.timeout_secs = Some(parse_env(ENV_TIMEOUT_SECS, &raw)?);
        }

        let mut gateway = GatewayConfig::default();
        if let Some(address) = lookup(ENV_ADDRESS) {
            gateway.address = address;
        }
        if let Some(raw) = lookup(ENV_PORT) {
            gateway.port = parse_env(ENV_PORT, &raw)?;
        }

        let config = BridgeConfig { store, gateway };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> BridgeResult<()> {
        self.store.validate()?;
        if self.gateway.dump_limit <= 0 || self.gateway.search_limit <= 0 {
            return Err(BridgeError::Config("gateway limits must be positive".to_string()));
        }
        Ok(())
    }
}

fn parse_env<T: std::str::FromStr>(key: &str, raw: &str) -> BridgeResult<T> {
    raw.trim()
        .parse()
        .map_err(|_| BridgeError::Config(format!("{} has an invalid value: {}", key, raw)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_yaml_with_gateway_defaults() {
        let config = BridgeConfig::from_yaml_str(
            "store:\n  query_endpoint: http://localhost:3030/ds/sparql\n  update_endpoint: http://localhost:3030/ds/update\n",
        )
        .unwrap();

        assert_eq!(config.store.query_endpoint, "http://localhost:3030/ds/sparql");
        assert_eq!(config.store.timeout_secs, None);
        assert_eq!(config.gateway, GatewayConfig::default());
        assert_eq!(config.gateway.dump_limit, 10);
        assert_eq!(config.gateway.search_limit, 20);
    }

    #[test]
    fn test_yaml_missing_endpoint() {
        let err = BridgeConfig::from_yaml_str("store:\n  query_endpoint: http://localhost:3030/ds/sparql\n")
            .unwrap_err();
        assert!(matches!(err, BridgeError::Config(_)));
    }

    #[test]
    fn test_rejects_non_http_endpoint() {
        let store = StoreConfig::new("ftp://store/sparql", "http://store/update");
        assert!(matches!(store.validate(), Err(BridgeError::Config(_))));

        let store = StoreConfig::new("", "http://store/update");
        assert!(matches!(store.validate(), Err(BridgeError::Config(_))));
    }

    #[test]
    fn test_from_lookup() {
        let vars: HashMap<&str, &str> = HashMap::from([
            (ENV_QUERY_URL, "http://store:3030/ds/sparql"),
            (ENV_UPDATE_URL, "http://store:3030/ds/update"),
            (ENV_TIMEOUT_SECS, "15"),
            (ENV_PORT, "8081"),
        ]);
        let config = BridgeConfig::from_lookup(|key| vars.get(key).map(|v| v.to_string())).unwrap();

        assert_eq!(config.store.timeout_secs, Some(15));
        assert_eq!(config.gateway.port, 8081);
        assert_eq!(config.gateway.address, "0.0.0.0");
    }

    #[test]
    fn test_from_lookup_requires_endpoints() {
        let err = BridgeConfig::from_lookup(|_| None).unwrap_err();
        assert!(err.to_string().contains(ENV_QUERY_URL));
    }
}

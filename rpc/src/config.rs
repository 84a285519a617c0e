// Copyright 2019-2024 ChainSafe Systems
// SPDX-License-Identifier: Apache-2.0, MIT

use std::time::Duration;
use thiserror::Error;

/// Namespace prepended to every method name, as in `Filecoin.ChainHead`.
pub const DEFAULT_NAMESPACE: &str = "Filecoin";

pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

pub const ENDPOINT_ENV: &str = "FILECOIN_RPC_ENDPOINT";
pub const NAMESPACE_ENV: &str = "FILECOIN_RPC_NAMESPACE";
pub const TIMEOUT_ENV: &str = "FILECOIN_RPC_TIMEOUT_SECS";

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    #[error("no RPC endpoint configured, set FILECOIN_RPC_ENDPOINT")]
    MissingEndpoint,

    #[error("invalid FILECOIN_RPC_TIMEOUT_SECS value: {0}")]
    InvalidTimeout(String),
}

/// A well-known public node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Network {
    pub name: &'static str,
    pub endpoint: &'static str,
}

pub const NETWORKS: [Network; 2] = [
    Network {
        name: "calibrationnet",
        endpoint: "https://filecoin-calibration.ipc.space/rpc/v1",
    },
    Network {
        name: "filecoin",
        endpoint: "https://filecoin.ipc.space/rpc/v1",
    },
];

impl Network {
    pub fn by_name(name: &str) -> Option<&'static Network> {
        NETWORKS.iter().find(|n| n.name == name)
    }

    pub fn names() -> Vec<&'static str> {
        NETWORKS.iter().map(|n| n.name).collect()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub endpoint: String,
    pub namespace: String,
    pub request_timeout: Duration,
}

impl ClientConfig {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            namespace: DEFAULT_NAMESPACE.to_string(),
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
        }
    }

    /// Builds a config from `FILECOIN_RPC_*` environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds a config for `endpoint`, taking namespace and timeout overrides
    /// from the environment.
    pub fn with_env_overrides(endpoint: impl Into<String>) -> Result<Self, ConfigError> {
        Self::new(endpoint).apply_overrides(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let endpoint = lookup(ENDPOINT_ENV)
            .filter(|e| !e.is_empty())
            .ok_or(ConfigError::MissingEndpoint)?;
        Self::new(endpoint).apply_overrides(lookup)
    }

    fn apply_overrides(
        mut self,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ConfigError> {
        if let Some(namespace) = lookup(NAMESPACE_ENV).filter(|n| !n.is_empty()) {
            self.namespace = namespace;
        }
        if let Some(timeout) = lookup(TIMEOUT_ENV) {
            let secs = timeout
                .parse::<u64>()
                .map_err(|_| ConfigError::InvalidTimeout(timeout.clone()))?;
            self.request_timeout = Duration::from_secs(secs);
        }
        Ok(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = ClientConfig::new("http://localhost:1234/rpc/v1");
        assert_eq!(config.namespace, "Filecoin");
        assert_eq!(config.request_timeout, Duration::from_secs(60));
    }

    #[test]
    fn test_from_lookup() {
        let config = ClientConfig::from_lookup(lookup(&[
            (ENDPOINT_ENV, "http://node:1234/rpc/v1"),
            (NAMESPACE_ENV, "Eth"),
            (TIMEOUT_ENV, "5"),
        ]))
        .unwrap();
        assert_eq!(config.endpoint, "http://node:1234/rpc/v1");
        assert_eq!(config.namespace, "Eth");
        assert_eq!(config.request_timeout, Duration::from_secs(5));
    }

    #[test]
    fn test_missing_endpoint() {
        assert_eq!(
            ClientConfig::from_lookup(lookup(&[])),
            Err(ConfigError::MissingEndpoint)
        );
        assert_eq!(
            ClientConfig::from_lookup(lookup(&[(ENDPOINT_ENV, "")])),
            Err(ConfigError::MissingEndpoint)
        );
    }

    #[test]
    fn test_invalid_timeout() {
        let result = ClientConfig::from_lookup(lookup(&[
            (ENDPOINT_ENV, "http://node:1234/rpc/v1"),
            (TIMEOUT_ENV, "soon"),
        ]));
        assert_eq!(result, Err(ConfigError::InvalidTimeout("soon".to_string())));
    }

    #[test]
    fn test_network_lookup() {
        let network = Network::by_name("calibrationnet").unwrap();
        assert_eq!(
            network.endpoint,
            "https://filecoin-calibration.ipc.space/rpc/v1"
        );
        assert!(Network::by_name("mainnet").is_none());
        assert_eq!(Network::names(), vec!["calibrationnet", "filecoin"]);
    }
}

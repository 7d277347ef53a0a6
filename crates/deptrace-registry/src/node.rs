//! Fullnode endpoint configuration and REST URL layout.

use deptrace_core::config::NetworkConfig;
use deptrace_core::network::Network;

/// Move resource type holding every package published at an address.
pub const PACKAGE_REGISTRY_TYPE: &str = "0x1::code::PackageRegistry";

/// A fullnode REST endpoint for one network, with optional API key.
#[derive(Debug, Clone)]
pub struct FullNode {
    pub network: Network,
    /// Base URL including the `/v1` prefix, without trailing slash.
    pub url: String,
    pub api_key: Option<String>,
}

impl FullNode {
    pub fn new(network: Network, url: impl Into<String>) -> Self {
        Self {
            network,
            url: url.into().trim_end_matches('/').to_string(),
            api_key: None,
        }
    }

    /// The public endpoint for `network`.
    pub fn for_network(network: Network) -> Self {
        Self::new(network, network.default_node_url())
    }

    /// Endpoint for `network` honouring `[network.urls]` overrides and the
    /// configured API key.
    pub fn from_config(network: Network, config: &NetworkConfig) -> Self {
        Self {
            api_key: config.api_key.clone(),
            ..Self::new(network, config.node_url(network))
        }
    }

    pub fn with_api_key(mut self, api_key: Option<String>) -> Self {
        if api_key.is_some() {
            self.api_key = api_key;
        }
        self
    }

    /// URL of the package registry resource at `address`.
    pub fn registry_url(&self, address: &str) -> String {
        format!(
            "{}/accounts/{address}/resource/{PACKAGE_REGISTRY_TYPE}",
            self.url
        )
    }

    pub fn has_auth(&self) -> bool {
        self.api_key.is_some()
    }
}

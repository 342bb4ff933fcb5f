//! Per-call network selection.
//!
//! A trigger may name its own endpoint and chain id. When both are given a
//! fresh client is built for that one call; otherwise the shared default
//! client built at startup is handed out. Override clients are never cached.

use std::sync::Arc;

use crate::chain::client::ChainClient;
use crate::chain::types::{ChainResult, NetworkConfig};
use crate::observability::metrics;

/// Hands out the chain client for one operation.
#[derive(Debug, Clone)]
pub struct NetworkResolver {
    default_client: Arc<ChainClient>,
}

impl NetworkResolver {
    /// Create a resolver around the process-wide default network.
    pub fn new(default_network: NetworkConfig) -> Self {
        Self {
            default_client: Arc::new(ChainClient::new(default_network)),
        }
    }

    /// Pick the client for one operation.
    ///
    /// An empty endpoint or a zero chain id counts as absent. A present but
    /// malformed endpoint is an error.
    /// Chain id `0` is never a real network, so `customChainId=0` keeps the
    /// default client even though the host passes it as a non-empty string.
    pub fn resolve(
        &self,
        override_endpoint: Option<&str>,
        override_chain_id: Option<u64>,
    ) -> ChainResult<Arc<ChainClient>> {
        let endpoint = override_endpoint.map(str::trim).filter(|e| !e.is_empty());
        let chain_id = override_chain_id.filter(|id| *id != 0);

        match (endpoint, chain_id) {
            (Some(endpoint), Some(chain_id)) => {
                let network = NetworkConfig::new(endpoint, chain_id)?;
                tracing::debug!(
                    rpc_url = %network.endpoint(),
                    chain_id = chain_id,
                    "Using override network"
                );
                metrics::record_override_client();
                Ok(Arc::new(ChainClient::new(network)))
            }
            _ => {
                tracing::debug!(
                    rpc_url = %self.default_client.network().endpoint(),
                    "Using default network"
                );
                Ok(self.default_client.clone())
            }
        }
    }

    /// The shared default client.
    pub fn default_client(&self) -> &Arc<ChainClient> {
        &self.default_client
    }
}

//! JSON-RPC chain client.
//!
//! # Responsibilities
//! - Bind to one JSON-RPC endpoint
//! - Query chain state (chain id, native balances)
//! - Run read-only contract calls and decode their results
//!
//! No timeout is layered on top of the transport: a hung endpoint stalls the
//! calling operation until the transport gives up.

use alloy::network::TransactionBuilder;
use alloy::primitives::{Address, Bytes, U256};
use alloy::providers::{Provider, ProviderBuilder};
use alloy::rpc::types::TransactionRequest;
use alloy::sol_types::SolCall;
use std::sync::Arc;

use crate::chain::abi::IERC20;
use crate::chain::types::{ChainError, ChainId, ChainResult, NetworkConfig};

/// Stateless client over a single JSON-RPC endpoint.
#[derive(Clone)]
pub struct ChainClient {
    provider: Arc<dyn Provider + Send + Sync>,
    network: NetworkConfig,
}

impl ChainClient {
    /// Create a client bound to `network`.
    ///
    /// Construction does not touch the network; the first RPC happens on the
    /// first query.
    pub fn new(network: NetworkConfig) -> Self {
        let provider = ProviderBuilder::new()
            .disable_recommended_fillers()
            .connect_http(network.endpoint().clone());

        Self {
            provider: Arc::new(provider) as Arc<dyn Provider + Send + Sync>,
            network,
        }
    }

    /// Verify the endpoint's chain ID matches the configured one.
    pub async fn verify_chain_id(&self) -> ChainResult<()> {
        let chain_id = self.get_chain_id().await?;
        if chain_id != self.network.chain_id() {
            return Err(ChainError::ChainMismatch {
                expected: self.network.chain_id().0,
                actual: chain_id.0,
            });
        }
        Ok(())
    }

    /// Get the chain ID reported by the endpoint.
    pub async fn get_chain_id(&self) -> ChainResult<ChainId> {
        self.provider
            .get_chain_id()
            .await
            .map(ChainId)
            .map_err(|e| ChainError::Rpc(e.to_string()))
    }

    /// Get the native balance of an address, in wei.
    pub async fn get_balance(&self, address: Address) -> ChainResult<U256> {
        self.provider
            .get_balance(address)
            .await
            .map_err(|e| ChainError::Rpc(e.to_string()))
    }

    /// Execute a read-only call against a contract and return the raw output.
    pub async fn call(&self, to: Address, data: Bytes) -> ChainResult<Bytes> {
        let tx = TransactionRequest::default().with_to(to).with_input(data);
        self.provider
            .call(tx)
            .await
            .map_err(|e| ChainError::Rpc(e.to_string()))
    }

    /// ERC-20 `balanceOf(owner)` on `token`.
    pub async fn token_balance(&self, token: Address, owner: Address) -> ChainResult<U256> {
        let data = IERC20::balanceOfCall { owner }.abi_encode();
        let output = self.call(token, data.into()).await?;
        IERC20::balanceOfCall::abi_decode_returns(&output)
            .map_err(|e| ChainError::Decode(format!("balanceOf: {}", e)))
    }

    /// ERC-20 `decimals()` on `token`.
    pub async fn token_decimals(&self, token: Address) -> ChainResult<u8> {
        let data = IERC20::decimalsCall {}.abi_encode();
        let output = self.call(token, data.into()).await?;
        IERC20::decimalsCall::abi_decode_returns(&output)
            .map_err(|e| ChainError::Decode(format!("decimals: {}", e)))
    }

    /// The network this client is bound to.
    pub fn network(&self) -> &NetworkConfig {
        &self.network
    }
}

impl std::fmt::Debug for ChainClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChainClient")
            .field("rpc_url", &self.network.endpoint().as_str())
            .field("chain_id", &self.network.chain_id().0)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn local_network() -> NetworkConfig {
        // Anvil default
        NetworkConfig::new("http://127.0.0.1:1", 31337).unwrap()
    }

    #[test]
    fn test_client_creation_is_offline() {
        let client = ChainClient::new(local_network());
        assert_eq!(client.network().chain_id(), ChainId(31337));
    }

    #[test]
    fn test_debug_shows_endpoint() {
        let client = ChainClient::new(local_network());
        let debug = format!("{:?}", client);
        assert!(debug.contains("127.0.0.1:1"));
        assert!(debug.contains("31337"));
    }

    #[tokio::test]
    async fn test_unreachable_endpoint_is_rpc_error() {
        // Port 1 is never listening.
        let client = ChainClient::new(local_network());
        let result = client.get_balance(Address::ZERO).await;
        assert!(matches!(result, Err(ChainError::Rpc(_))));
    }
}

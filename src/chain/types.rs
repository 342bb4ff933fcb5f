//! Network types and chain error definitions.

use alloy::primitives::U256;
use thiserror::Error;

/// Raw smallest-unit quantity (wei for native coins, base units for tokens).
pub type Amount = U256;

/// Chain ID type for strong typing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ChainId(pub u64);

impl From<u64> for ChainId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

impl From<ChainId> for u64 {
    fn from(id: ChainId) -> Self {
        id.0
    }
}

impl std::fmt::Display for ChainId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// An RPC endpoint paired with the chain it is expected to serve.
///
/// Immutable once constructed. The chain id is carried alongside the endpoint
/// but is not checked against it here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NetworkConfig {
    endpoint: url::Url,
    chain_id: ChainId,
}

impl NetworkConfig {
    /// Build a network from an endpoint string and chain id.
    pub fn new(endpoint: &str, chain_id: u64) -> ChainResult<Self> {
        let endpoint: url::Url = endpoint
            .parse()
            .map_err(|e| ChainError::InvalidEndpoint(format!("'{}': {}", endpoint, e)))?;

        match endpoint.scheme() {
            "http" | "https" => {}
            other => {
                return Err(ChainError::InvalidEndpoint(format!(
                    "'{}': unsupported scheme '{}'",
                    endpoint, other
                )))
            }
        }

        Ok(Self {
            endpoint,
            chain_id: ChainId(chain_id),
        })
    }

    /// The JSON-RPC endpoint.
    pub fn endpoint(&self) -> &url::Url {
        &self.endpoint
    }

    /// The chain identifier.
    pub fn chain_id(&self) -> ChainId {
        self.chain_id
    }
}

/// Errors that can occur during chain operations.
#[derive(Debug, Error)]
pub enum ChainError {
    /// Endpoint URL could not be used.
    #[error("Invalid RPC endpoint {0}")]
    InvalidEndpoint(String),

    /// RPC connection or request failed.
    #[error("RPC error: {0}")]
    Rpc(String),

    /// Returned data did not match the expected ABI.
    #[error("ABI decode error: {0}")]
    Decode(String),

    /// Chain configuration mismatch.
    #[error("Chain ID mismatch: expected {expected}, got {actual}")]
    ChainMismatch { expected: u64, actual: u64 },
}

/// Result type for chain operations.
pub type ChainResult<T> = Result<T, ChainError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chain_id_conversion() {
        let chain_id = ChainId::from(8453u64);
        assert_eq!(chain_id.0, 8453);
        assert_eq!(u64::from(chain_id), 8453);
        assert_eq!(chain_id.to_string(), "8453");
    }

    #[test]
    fn test_network_config_parses_endpoint() {
        let network = NetworkConfig::new("https://mainnet.base.org", 8453).unwrap();
        assert_eq!(network.endpoint().host_str(), Some("mainnet.base.org"));
        assert_eq!(network.chain_id(), ChainId(8453));
    }

    #[test]
    fn test_network_config_rejects_bad_endpoints() {
        assert!(matches!(
            NetworkConfig::new("not a url", 1),
            Err(ChainError::InvalidEndpoint(_))
        ));
        assert!(matches!(
            NetworkConfig::new("ws://localhost:8546", 1),
            Err(ChainError::InvalidEndpoint(_))
        ));
    }

    #[test]
    fn test_error_display() {
        let err = ChainError::ChainMismatch {
            expected: 1,
            actual: 8453,
        };
        assert_eq!(err.to_string(), "Chain ID mismatch: expected 1, got 8453");
    }
}

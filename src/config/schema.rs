//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the bridge.
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};

use crate::transaction::TRANSFER_GAS_LIMIT;

/// Root configuration for the wallet bridge.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct BridgeConfig {
    /// Default network used when a trigger gives no override.
    pub network: NetworkSettings,

    /// Wallet endpoint and connection display settings.
    pub wallet: WalletSettings,

    /// Default asset and unlock threshold.
    pub token: TokenSettings,

    /// Outbound transfer settings.
    pub transfer: TransferSettings,

    /// Balance display settings.
    pub display: DisplaySettings,

    /// Network the `*BaseBalance` triggers fall back to.
    pub secondary_network: SecondaryNetworkSettings,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Default network configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct NetworkSettings {
    /// JSON-RPC endpoint URL.
    pub rpc_url: String,

    /// Chain ID (e.g., 1 for Ethereum mainnet, 31337 for local Anvil).
    pub chain_id: u64,
}

impl Default for NetworkSettings {
    fn default() -> Self {
        Self {
            rpc_url: "http://localhost:8545".to_string(),
            chain_id: 1,
        }
    }
}

/// Wallet configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct WalletSettings {
    /// JSON-RPC endpoint answering account and signing requests.
    /// Falls back to `network.rpc_url` when unset.
    pub provider_url: Option<String>,

    /// Application name shown by the wallet during connection.
    pub app_name: String,

    /// Logo shown by the wallet during connection.
    pub app_logo_url: String,

    /// Dark theme for the wallet's connection UI.
    pub dark_mode: bool,
}

impl Default for WalletSettings {
    fn default() -> Self {
        Self {
            provider_url: None,
            app_name: "My RPG Maker Game".to_string(),
            app_logo_url: "https://example.com/logo.png".to_string(),
            dark_mode: false,
        }
    }
}

/// Default asset configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TokenSettings {
    /// `"native"` (any case) or an ERC-20 contract address.
    pub game_token_address: String,

    /// Minimum raw balance that unlocks gated features, as a decimal string.
    pub required_amount: String,
}

impl Default for TokenSettings {
    fn default() -> Self {
        Self {
            game_token_address: "native".to_string(),
            required_amount: "1000000000000000000".to_string(),
        }
    }
}

/// Transfer configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TransferSettings {
    /// Gas allowance for payments. Only sufficient for plain transfers to
    /// non-contract recipients.
    pub gas_limit: u64,
}

impl Default for TransferSettings {
    fn default() -> Self {
        Self {
            gas_limit: TRANSFER_GAS_LIMIT,
        }
    }
}

/// Display configuration.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct DisplaySettings {
    /// Ask token contracts for `decimals()` when converting to whole units.
    /// When false every asset is treated as 18-decimal.
    pub use_token_decimals: bool,
}

/// Secondary network configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct SecondaryNetworkSettings {
    pub rpc_url: String,
    pub chain_id: u64,
    /// Name used in player-facing messages.
    pub label: String,
}

impl Default for SecondaryNetworkSettings {
    fn default() -> Self {
        Self {
            rpc_url: "https://mainnet.base.org".to_string(),
            chain_id: 8453,
            label: "Base".to_string(),
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Enable metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            metrics_enabled: false,
            metrics_address: "127.0.0.1:9090".to_string(),
        }
    }
}

impl BridgeConfig {
    /// Endpoint for wallet requests.
    pub fn wallet_provider_url(&self) -> &str {
        self.wallet
            .provider_url
            .as_deref()
            .filter(|url| !url.trim().is_empty())
            .unwrap_or(&self.network.rpc_url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = BridgeConfig::default();
        assert_eq!(config.network.chain_id, 1);
        assert_eq!(config.token.game_token_address, "native");
        assert_eq!(config.token.required_amount, "1000000000000000000");
        assert_eq!(config.transfer.gas_limit, 21_000);
        assert_eq!(config.secondary_network.chain_id, 8453);
        assert_eq!(config.secondary_network.rpc_url, "https://mainnet.base.org");
        assert!(!config.display.use_token_decimals);
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config: BridgeConfig = toml::from_str(
            r#"
            [network]
            rpc_url = "https://sepolia.base.org"
            chain_id = 84532

            [token]
            game_token_address = "0xAC1Bd2486aAf3B5C0fc3Fd868558b082a531B2B4"
            "#,
        )
        .unwrap();

        assert_eq!(config.network.chain_id, 84532);
        assert_eq!(config.token.required_amount, "1000000000000000000");
        assert_eq!(config.wallet.app_name, "My RPG Maker Game");
        assert_eq!(config.wallet_provider_url(), "https://sepolia.base.org");
    }

    #[test]
    fn test_wallet_provider_override() {
        let mut config = BridgeConfig::default();
        config.wallet.provider_url = Some("http://127.0.0.1:7777".into());
        assert_eq!(config.wallet_provider_url(), "http://127.0.0.1:7777");

        config.wallet.provider_url = Some("  ".into());
        assert_eq!(config.wallet_provider_url(), "http://localhost:8545");
    }
}

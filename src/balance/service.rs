//! Balance queries and amount normalization.
//!
//! # Responsibilities
//! - Native vs. ERC-20 balance lookup through a resolved chain client
//! - Threshold checks on raw integers
//! - Conversion to whole display units
//!
//! # Failure Policy
//! Balance checks gate optional features, so every query failure collapses to
//! a zero balance at the public boundary. The `try_` variants keep the cause
//! for callers (and tests) that want it.

use alloy::primitives::{Address, U256};
use thiserror::Error;

use crate::balance::asset::AssetRef;
use crate::chain::abi::{parse_address, DEFAULT_DECIMALS};
use crate::chain::{Amount, ChainClient, ChainError};
use crate::observability::metrics;

/// 10^18, one whole unit of an 18-decimal asset.
pub const WEI_PER_UNIT: U256 = U256::from_limbs([1_000_000_000_000_000_000, 0, 0, 0]);

/// Why a balance could not be read.
#[derive(Debug, Error)]
pub enum QueryFailure {
    /// The token contract address is not a well-formed address.
    #[error("Invalid token contract address: {0}")]
    InvalidContractAddress(String),

    /// The RPC call or result decoding failed.
    #[error(transparent)]
    Chain(#[from] ChainError),
}

/// Reads balances; never fails outward.
#[derive(Debug, Clone, Default)]
pub struct BalanceService {
    use_token_decimals: bool,
}

impl BalanceService {
    /// `use_token_decimals` makes display conversion ask the token for its
    /// precision instead of assuming 18.
    pub fn new(use_token_decimals: bool) -> Self {
        Self { use_token_decimals }
    }

    /// Balance of `wallet` in raw units, or the reason it could not be read.
    ///
    /// A malformed token address fails before any RPC is made.
    pub async fn try_get_balance(
        &self,
        asset: &AssetRef,
        wallet: Address,
        client: &ChainClient,
    ) -> Result<Amount, QueryFailure> {
        match asset {
            AssetRef::Native => {
                tracing::debug!(wallet = %wallet, "Fetching native balance");
                Ok(client.get_balance(wallet).await?)
            }
            AssetRef::FungibleToken(raw) => {
                let token = parse_address(raw)
                    .ok_or_else(|| QueryFailure::InvalidContractAddress(raw.clone()))?;
                tracing::debug!(token = %token, wallet = %wallet, "Fetching token balance");
                Ok(client.token_balance(token, wallet).await?)
            }
        }
    }

    /// Balance of `wallet` in raw units; zero on any failure.
    pub async fn get_balance(
        &self,
        asset: &AssetRef,
        wallet: Address,
        client: &ChainClient,
    ) -> Amount {
        match self.try_get_balance(asset, wallet, client).await {
            Ok(balance) => {
                metrics::record_balance_query(asset.kind(), "ok");
                tracing::debug!(asset = %asset, balance = %balance, "Balance retrieved");
                balance
            }
            Err(e) => {
                metrics::record_balance_query(asset.kind(), "fallback");
                tracing::warn!(asset = %asset, error = %e, "Balance query failed, using zero");
                U256::ZERO
            }
        }
    }

    /// Token precision from `decimals()`; 18 when the address is malformed or
    /// the call fails.
    pub async fn get_token_decimals(&self, token: &str, client: &ChainClient) -> u8 {
        let Some(address) = parse_address(token) else {
            return DEFAULT_DECIMALS;
        };
        match client.token_decimals(address).await {
            Ok(decimals) => {
                tracing::debug!(token = %address, decimals = decimals, "Token decimals");
                decimals
            }
            Err(e) => {
                tracing::warn!(token = %address, error = %e, "Could not read decimals, defaulting to 18");
                DEFAULT_DECIMALS
            }
        }
    }

    /// `balance >= required`, compared as unbounded integers.
    pub async fn check_threshold(
        &self,
        asset: &AssetRef,
        wallet: Address,
        client: &ChainClient,
        required: Amount,
    ) -> bool {
        let balance = self.get_balance(asset, wallet, client).await;
        meets_threshold(balance, required)
    }

    /// Whole units for display. Native coins always use 18 decimals; tokens
    /// do too unless decimals lookup is enabled.
    pub async fn display_units(&self, asset: &AssetRef, raw: Amount, client: &ChainClient) -> Amount {
        match asset {
            AssetRef::FungibleToken(token) if self.use_token_decimals => {
                let decimals = self.get_token_decimals(token, client).await;
                to_whole_units(raw, decimals)
            }
            _ => to_human_readable(raw),
        }
    }
}

/// `balance >= required`.
pub fn meets_threshold(balance: Amount, required: Amount) -> bool {
    balance >= required
}

/// `floor(raw / 10^18)`.
pub fn to_human_readable(raw: Amount) -> Amount {
    raw / WEI_PER_UNIT
}

/// `floor(raw / 10^decimals)`. Precision too large for 256 bits yields zero.
pub fn to_whole_units(raw: Amount, decimals: u8) -> Amount {
    match U256::from(10u8).checked_pow(U256::from(decimals)) {
        Some(divisor) => raw / divisor,
        None => U256::ZERO,
    }
}

//! Wallet-side JSON-RPC endpoint.
//!
//! The wallet bridge answers the account and signing methods a browser wallet
//! would (`eth_accounts`, `eth_requestAccounts`, `eth_sendTransaction`). The
//! node or bridge behind it holds the keys; nothing is signed locally.

use alloy::primitives::{Address, TxHash};
use alloy::providers::{Provider, ProviderBuilder};
use alloy::rpc::types::{TransactionReceipt, TransactionRequest};
use std::sync::Arc;

use crate::wallet::types::ProviderError;

/// Client for the wallet's request methods.
#[derive(Clone)]
pub struct WalletProvider {
    provider: Arc<dyn Provider + Send + Sync>,
    endpoint: url::Url,
}

impl WalletProvider {
    /// Bind to the wallet endpoint. Does not contact it.
    pub fn new(endpoint: url::Url) -> Self {
        // No fillers: the wallet owns nonce, fees and signing.
        let provider = ProviderBuilder::new()
            .disable_recommended_fillers()
            .connect_http(endpoint.clone());

        Self {
            provider: Arc::new(provider) as Arc<dyn Provider + Send + Sync>,
            endpoint,
        }
    }

    /// `eth_accounts`: accounts already authorized, without prompting.
    pub async fn accounts(&self) -> Result<Vec<Address>, ProviderError> {
        Ok(self.provider.get_accounts().await?)
    }

    /// `eth_requestAccounts`: prompt the player to authorize accounts.
    pub async fn request_accounts(&self) -> Result<Vec<Address>, ProviderError> {
        let accounts = self
            .provider
            .client()
            .request_noparams::<Vec<Address>>("eth_requestAccounts")
            .await?;
        Ok(accounts)
    }

    /// `eth_sendTransaction`: hand a transaction to the wallet to sign and
    /// broadcast. Returns as soon as the wallet reports a hash.
    pub async fn send_transaction(&self, tx: TransactionRequest) -> Result<TxHash, ProviderError> {
        let pending = self.provider.send_transaction(tx).await?;
        Ok(*pending.tx_hash())
    }

    /// Single receipt lookup. `None` means the node has not included it yet.
    pub async fn transaction_receipt(
        &self,
        tx_hash: TxHash,
    ) -> Result<Option<TransactionReceipt>, ProviderError> {
        Ok(self.provider.get_transaction_receipt(tx_hash).await?)
    }
}

impl std::fmt::Debug for WalletProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WalletProvider")
            .field("endpoint", &self.endpoint.as_str())
            .finish()
    }
}

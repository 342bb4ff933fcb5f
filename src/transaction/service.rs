//! Payment and NFT transfer submission.
//!
//! # Responsibilities
//! - Refuse to submit without a connected account
//! - Build the transfer from the session account
//! - Hand it to the wallet and report the hash
//!
//! Failures are returned once and never retried. No confirmation tracking:
//! a payment returns on hash, an NFT transfer does one receipt lookup.

use alloy::primitives::{Address, TxHash, U256};
use std::sync::Arc;

use crate::observability::metrics;
use crate::transaction::types::{
    NftTransferOutcome, SubmissionFailure, SubmissionResult, TransferRequest,
};
use crate::wallet::WalletSession;

/// Submits transfers through the connected wallet.
#[derive(Debug, Clone)]
pub struct TransactionService {
    session: Arc<WalletSession>,
    gas_limit: u64,
}

impl TransactionService {
    /// `gas_limit` applies to payments only.
    pub fn new(session: Arc<WalletSession>, gas_limit: u64) -> Self {
        Self { session, gas_limit }
    }

    /// Send `value` wei from the session account to `recipient`.
    pub async fn submit_payment(&self, recipient: Address, value: U256) -> SubmissionResult<TxHash> {
        let from = self.session.account().ok_or(SubmissionFailure::NotConnected)?;
        let request = TransferRequest::payment(from, recipient, value);
        let tx_hash = self.submit(request).await?;

        tracing::info!(tx_hash = %tx_hash, to = %recipient, value = %value, "Payment sent");
        Ok(tx_hash)
    }

    /// Move ERC-721 `token_id` on `contract` from the session account to
    /// `recipient`.
    pub async fn send_nft(
        &self,
        contract: Address,
        token_id: U256,
        recipient: Address,
    ) -> SubmissionResult<NftTransferOutcome> {
        let from = self.session.account().ok_or(SubmissionFailure::NotConnected)?;
        let request = TransferRequest::nft(from, recipient, contract, token_id);
        let tx_hash = self.submit(request).await?;

        let receipt = match self.session.provider().transaction_receipt(tx_hash).await {
            Ok(receipt) => receipt,
            Err(e) => {
                tracing::warn!(tx_hash = %tx_hash, error = %e, "Receipt lookup failed");
                None
            }
        };

        tracing::info!(
            tx_hash = %tx_hash,
            contract = %contract,
            token_id = %token_id,
            to = %recipient,
            mined = receipt.is_some(),
            "NFT sent"
        );
        Ok(NftTransferOutcome { tx_hash, receipt })
    }

    async fn submit(&self, request: TransferRequest) -> SubmissionResult<TxHash> {
        let kind = request.kind_label();
        let tx = request.into_transaction(self.gas_limit);

        match self.session.provider().send_transaction(tx).await {
            Ok(tx_hash) => {
                metrics::record_submission(kind, "accepted");
                Ok(tx_hash)
            }
            Err(e) => {
                metrics::record_submission(kind, "failed");
                tracing::error!(kind = kind, error = %e, code = ?e.code, "Submission failed");
                Err(SubmissionFailure::Provider(e))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::MemoryHost;
    use crate::transaction::types::TRANSFER_GAS_LIMIT;
    use crate::wallet::WalletProvider;

    fn disconnected_service() -> TransactionService {
        let provider = WalletProvider::new("http://127.0.0.1:1".parse().unwrap());
        let session = Arc::new(WalletSession::new(provider, Arc::new(MemoryHost::default())));
        TransactionService::new(session, TRANSFER_GAS_LIMIT)
    }

    #[tokio::test]
    async fn test_payment_requires_connection() {
        let service = disconnected_service();
        let result = service
            .submit_payment(Address::repeat_byte(0x02), U256::from(1))
            .await;
        assert_eq!(result.unwrap_err(), SubmissionFailure::NotConnected);
    }

    #[tokio::test]
    async fn test_nft_requires_connection() {
        let service = disconnected_service();
        let result = service
            .send_nft(Address::repeat_byte(0x03), U256::from(1), Address::repeat_byte(0x02))
            .await;
        assert!(matches!(result, Err(SubmissionFailure::NotConnected)));
    }
}

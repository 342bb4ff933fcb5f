//! Transfer requests and submission errors.

use alloy::network::TransactionBuilder;
use alloy::primitives::{Address, TxHash, U256};
use alloy::rpc::types::{TransactionReceipt, TransactionRequest};
use alloy::sol_types::SolCall;
use serde::Serialize;
use thiserror::Error;

use crate::chain::abi::IERC721;
use crate::wallet::types::ProviderError;

/// Gas allowance for a plain value transfer to an externally owned account.
///
/// Too low for recipients that are contracts; such payments fail at the node.
pub const TRANSFER_GAS_LIMIT: u64 = 21_000;

/// What a transfer moves.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransferKind {
    /// Native coin value transfer.
    Payment,
    /// ERC-721 token moved by `safeTransferFrom` on `contract`.
    NftTransfer { contract: Address, token_id: U256 },
}

/// A single outbound transfer, built and consumed by one submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransferRequest {
    pub kind: TransferKind,
    pub from: Address,
    pub to: Address,
    pub value: U256,
}

impl TransferRequest {
    pub fn payment(from: Address, to: Address, value: U256) -> Self {
        Self {
            kind: TransferKind::Payment,
            from,
            to,
            value,
        }
    }

    pub fn nft(from: Address, to: Address, contract: Address, token_id: U256) -> Self {
        Self {
            kind: TransferKind::NftTransfer { contract, token_id },
            from,
            to,
            value: U256::ZERO,
        }
    }

    /// Label used in logs and metrics.
    pub fn kind_label(&self) -> &'static str {
        match self.kind {
            TransferKind::Payment => "payment",
            TransferKind::NftTransfer { .. } => "nft",
        }
    }

    /// Build the `eth_sendTransaction` payload.
    ///
    /// Payments carry the fixed `gas_limit`; NFT transfers leave gas to the
    /// wallet.
    pub fn into_transaction(self, gas_limit: u64) -> TransactionRequest {
        match self.kind {
            TransferKind::Payment => TransactionRequest::default()
                .with_from(self.from)
                .with_to(self.to)
                .with_value(self.value)
                .with_gas_limit(gas_limit),
            TransferKind::NftTransfer { contract, token_id } => {
                let data = IERC721::safeTransferFromCall {
                    from: self.from,
                    to: self.to,
                    tokenId: token_id,
                }
                .abi_encode();

                TransactionRequest::default()
                    .with_from(self.from)
                    .with_to(contract)
                    .with_input(data)
            }
        }
    }
}

/// Result of an accepted NFT transfer.
#[derive(Debug, Clone, Serialize)]
pub struct NftTransferOutcome {
    pub tx_hash: TxHash,
    /// Receipt if the node already had one when asked; not polled for.
    pub receipt: Option<TransactionReceipt>,
}

/// Why a payment or NFT transfer was not submitted.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SubmissionFailure {
    /// No connected account to send from.
    #[error("Wallet not connected")]
    NotConnected,

    /// The wallet or node refused the transaction.
    #[error("Transaction failed: {0}")]
    Provider(#[from] ProviderError),
}

/// Result type for submissions.
pub type SubmissionResult<T> = Result<T, SubmissionFailure>;

#[cfg(test)]
mod tests {
    use super::*;
    use alloy::primitives::TxKind;

    #[test]
    fn test_payment_transaction_fields() {
        let from = Address::repeat_byte(0x01);
        let to = Address::repeat_byte(0x02);
        let tx = TransferRequest::payment(from, to, U256::from(1_000u64))
            .into_transaction(TRANSFER_GAS_LIMIT);

        assert_eq!(tx.from, Some(from));
        assert_eq!(tx.to, Some(TxKind::Call(to)));
        assert_eq!(tx.value, Some(U256::from(1_000u64)));
        assert_eq!(tx.gas, Some(21_000));
    }

    #[test]
    fn test_nft_transaction_targets_contract() {
        let from = Address::repeat_byte(0x01);
        let to = Address::repeat_byte(0x02);
        let contract = Address::repeat_byte(0x03);
        let request = TransferRequest::nft(from, to, contract, U256::from(42));
        assert_eq!(request.kind_label(), "nft");

        let tx = request.into_transaction(TRANSFER_GAS_LIMIT);
        assert_eq!(tx.to, Some(TxKind::Call(contract)));
        assert!(tx.gas.is_none());

        let input = tx.input.input().unwrap();
        let decoded = IERC721::safeTransferFromCall::abi_decode(input).unwrap();
        assert_eq!(decoded.from, from);
        assert_eq!(decoded.to, to);
        assert_eq!(decoded.tokenId, U256::from(42));
    }

    #[test]
    fn test_failure_display() {
        assert_eq!(SubmissionFailure::NotConnected.to_string(), "Wallet not connected");
        let err = SubmissionFailure::from(ProviderError {
            code: Some(4001),
            message: "User denied transaction signature".into(),
        });
        assert_eq!(err.to_string(), "Transaction failed: User denied transaction signature");
    }
}

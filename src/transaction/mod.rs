//! Transaction subsystem.
//!
//! # Data Flow
//! ```text
//! PurchaseItem / SendNFT trigger
//!     → service.rs (require connected session account)
//!     → types.rs (TransferRequest → eth_sendTransaction payload)
//!     → wallet provider (signs and broadcasts)
//!     → tx hash (and receipt if already mined) or SubmissionFailure
//! ```
//!
//! # Constraints
//! - Payments use a fixed gas allowance (21000 by default)
//! - No gas estimation, no retries, no confirmation polling

pub mod service;
pub mod types;

pub use service::TransactionService;
pub use types::{
    NftTransferOutcome, SubmissionFailure, SubmissionResult, TransferKind, TransferRequest,
    TRANSFER_GAS_LIMIT,
};

//! Wallet session subsystem.
//!
//! # Data Flow
//! ```text
//! ConnectWallet trigger
//!     → session.rs (state machine, single writer)
//!     → provider.rs (eth_accounts, eth_requestAccounts on the wallet endpoint)
//!     → host UI label on success / ConnectionError on failure
//!
//! Transaction triggers
//!     → session snapshot (connected account)
//!     → provider.rs (eth_sendTransaction)
//! ```
//!
//! # Security Constraints
//! - No keys are held here; the wallet endpoint signs
//! - Session state is never persisted

pub mod provider;
pub mod session;
pub mod types;

pub use provider::WalletProvider;
pub use session::WalletSession;
pub use types::{ConnectionError, ProviderError, Session, SessionState};

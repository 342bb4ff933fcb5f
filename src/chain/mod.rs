//! Chain access subsystem.
//!
//! # Data Flow
//! ```text
//! trigger override (rpc url, chain id)  or  default network from config
//!     → resolver.rs (pick / build a client for this call)
//!     → client.rs (JSON-RPC: balances, contract reads, receipts)
//!     → abi.rs (ERC-20 / ERC-721 call encoding)
//! ```
//!
//! # Constraints
//! - Clients are stateless and cheap; override clients live for one call
//! - The default client is built once and shared
//! - Chain ids are carried, not enforced, except for the startup check

pub mod abi;
pub mod client;
pub mod resolver;
pub mod types;

pub use client::ChainClient;
pub use resolver::NetworkResolver;
pub use types::{Amount, ChainError, ChainId, ChainResult, NetworkConfig};

//! Balance subsystem.
//!
//! # Data Flow
//! ```text
//! token address argument (or configured default)
//!     → asset.rs ("native" vs. contract address)
//!     → service.rs (eth_getBalance or balanceOf through the resolved client)
//!     → raw U256 amount, zero on failure
//!     → threshold check / whole-unit conversion for display
//! ```

pub mod asset;
pub mod service;

pub use asset::AssetRef;
pub use service::{meets_threshold, to_human_readable, BalanceService, QueryFailure};

//! Wallet bridge for games.
//!
//! Lets host game events connect an external wallet, gate features on token
//! balances and submit payments or NFT transfers.
//!
//! # Architecture Overview
//!
//! ```text
//!   host event ──▶ commands ──┬──▶ wallet (session, signing endpoint) ──▶ wallet RPC
//!   (name+args)    decode +   │
//!                  dispatch   ├──▶ balance ──▶ chain (resolver → client) ──▶ node RPC
//!                             │
//!                             └──▶ transaction ──▶ wallet
//!
//!   host ◀── alerts, button label, game variables, messages
//! ```
//!
//! Cross-cutting: `config` (TOML, validated up front) and `observability`
//! (tracing subscriber, Prometheus counters).

// Chain access
pub mod chain;
pub mod wallet;

// Services
pub mod balance;
pub mod transaction;

// Host surface
pub mod commands;
pub mod host;

// Cross-cutting concerns
pub mod config;
pub mod observability;

pub use commands::{CommandArgs, CommandOutcome, WalletBridge};
pub use config::schema::BridgeConfig;
pub use host::{GameState, MemoryHost, WalletUi};

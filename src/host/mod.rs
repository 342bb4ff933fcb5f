//! Host game collaborators.
//!
//! The bridge never draws UI or owns game state. It writes through these
//! traits: a wallet button label and alert box, a numbered variable store,
//! and a message queue. `MemoryHost` backs tests and embedders that poll state.

pub mod memory;

pub use memory::MemoryHost;

use crate::chain::Amount;

/// Wallet-facing UI surface.
pub trait WalletUi: Send + Sync {
    /// Replace the connect button text.
    fn set_wallet_label(&self, label: &str);

    /// Show a blocking alert to the player.
    fn alert(&self, message: &str);
}

/// Game state the triggers write into.
pub trait GameState: Send + Sync {
    /// Store a value in a numbered game variable.
    fn set_variable(&self, id: u32, value: Amount);

    /// Queue a message for display.
    fn add_message(&self, text: String);
}

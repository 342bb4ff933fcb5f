//! In-memory host for tests and embedders.

use dashmap::DashMap;
use std::sync::{Arc, Mutex};

use crate::chain::Amount;
use crate::host::{GameState, WalletUi};

/// Thread-safe in-memory game state.
#[derive(Clone, Default)]
pub struct MemoryHost {
    variables: Arc<DashMap<u32, Amount>>,
    messages: Arc<Mutex<Vec<String>>>,
    alerts: Arc<Mutex<Vec<String>>>,
    label: Arc<Mutex<Option<String>>>,
}

impl MemoryHost {
    pub fn variable(&self, id: u32) -> Option<Amount> {
        self.variables.get(&id).map(|v| *v.value())
    }

    pub fn messages(&self) -> Vec<String> {
        self.messages.lock().map(|m| m.clone()).unwrap_or_default()
    }

    pub fn alerts(&self) -> Vec<String> {
        self.alerts.lock().map(|a| a.clone()).unwrap_or_default()
    }

    pub fn wallet_label(&self) -> Option<String> {
        self.label.lock().ok().and_then(|l| l.clone())
    }
}

impl WalletUi for MemoryHost {
    fn set_wallet_label(&self, label: &str) {
        tracing::info!(label = %label, "Wallet button updated");
        if let Ok(mut slot) = self.label.lock() {
            *slot = Some(label.to_string());
        }
    }

    fn alert(&self, message: &str) {
        tracing::warn!(alert = %message, "Alert");
        if let Ok(mut alerts) = self.alerts.lock() {
            alerts.push(message.to_string());
        }
    }
}

impl GameState for MemoryHost {
    fn set_variable(&self, id: u32, value: Amount) {
        tracing::debug!(variable_id = id, value = %value, "Variable set");
        self.variables.insert(id, value);
    }

    fn add_message(&self, text: String) {
        tracing::info!(message = %text, "Message queued");
        if let Ok(mut messages) = self.messages.lock() {
            messages.push(text);
        }
    }
}

impl std::fmt::Debug for MemoryHost {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MemoryHost")
            .field("variables", &self.variables.len())
            .field("messages", &self.messages())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_variables_overwrite() {
        let host = MemoryHost::default();
        assert!(host.variable(1).is_none());
        host.set_variable(1, Amount::from(5));
        host.set_variable(1, Amount::from(7));
        assert_eq!(host.variable(1), Some(Amount::from(7)));
    }

    #[test]
    fn test_clones_share_state() {
        let host = MemoryHost::default();
        let other = host.clone();
        other.add_message("hello".into());
        other.alert("careful");
        other.set_wallet_label("Wallet: 0x1234...abcd");
        assert_eq!(host.messages(), vec!["hello".to_string()]);
        assert_eq!(host.alerts(), vec!["careful".to_string()]);
        assert_eq!(host.wallet_label().as_deref(), Some("Wallet: 0x1234...abcd"));
    }
}

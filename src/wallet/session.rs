//! Wallet connection state machine.
//!
//! # State Transitions
//! ```text
//! Disconnected → Connecting: connect() called
//! Connecting → Connected: wallet authorized at least one account
//! Connecting → Disconnected: rejection, pending prompt, no accounts, transport error
//! Connected → Connected: connect() again (re-prompts, may switch account)
//! ```
//!
//! # Design Decisions
//! - One session per process, shared by reference with the services
//! - Only connect() writes; everything else reads a snapshot
//! - A failed re-connect keeps the previously connected account
//! - A failed connect never undoes a concurrent successful one

use alloy::primitives::Address;
use arc_swap::ArcSwap;
use std::sync::Arc;

use crate::host::WalletUi;
use crate::observability::metrics;
use crate::wallet::provider::WalletProvider;
use crate::wallet::types::{wallet_label, ConnectionError, ConnectionResult, Session};

/// Owner of the single wallet session.
pub struct WalletSession {
    provider: WalletProvider,
    session: ArcSwap<Session>,
    ui: Arc<dyn WalletUi>,
}

impl WalletSession {
    /// Create a disconnected session.
    pub fn new(provider: WalletProvider, ui: Arc<dyn WalletUi>) -> Self {
        Self {
            provider,
            session: ArcSwap::from_pointee(Session::disconnected()),
            ui,
        }
    }

    /// Ask the wallet for an account and mark the session connected.
    ///
    /// Already-authorized accounts are fetched first for diagnostics only;
    /// the authorization request is always made.
    pub async fn connect(&self) -> ConnectionResult<Address> {
        // Only the Connecting snapshot stored here may be reverted; a
        // concurrent connect that succeeded in the meantime wins.
        let connecting = Arc::new(Session::connecting());
        let current = self.session.load_full();
        let entered = !current.is_connected() && {
            let prev = self.session.compare_and_swap(&current, connecting.clone());
            Arc::ptr_eq(&*prev, &current)
        };

        match self.authorize().await {
            Ok(account) => {
                self.session.store(Arc::new(Session::connected(account)));
                self.ui.set_wallet_label(&wallet_label(&account));
                metrics::record_connect("connected");
                tracing::info!(account = %account, "Wallet connected");
                Ok(account)
            }
            Err(e) => {
                if entered {
                    self.session
                        .compare_and_swap(&connecting, Arc::new(Session::disconnected()));
                }
                metrics::record_connect(match &e {
                    ConnectionError::UserRejected => "rejected",
                    ConnectionError::RequestPending => "pending",
                    ConnectionError::NoAccounts => "no_accounts",
                    _ => "error",
                });
                tracing::error!(error = %e, "Wallet connection failed");
                Err(e)
            }
        }
    }

    async fn authorize(&self) -> ConnectionResult<Address> {
        let existing = self.provider.accounts().await?;
        tracing::debug!(existing = ?existing, "Existing authorized accounts");

        let accounts = self.provider.request_accounts().await?;
        accounts.first().copied().ok_or(ConnectionError::NoAccounts)
    }

    /// Current state snapshot.
    pub fn snapshot(&self) -> Arc<Session> {
        self.session.load_full()
    }

    /// The connected account, if any.
    pub fn account(&self) -> Option<Address> {
        self.session.load().account()
    }

    pub fn is_connected(&self) -> bool {
        self.session.load().is_connected()
    }

    /// The wallet endpoint used for authorization and signing.
    pub fn provider(&self) -> &WalletProvider {
        &self.provider
    }
}

impl std::fmt::Debug for WalletSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WalletSession")
            .field("provider", &self.provider)
            .field("session", &self.session.load())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::MemoryHost;
    use crate::wallet::types::SessionState;

    fn offline_session() -> (WalletSession, Arc<MemoryHost>) {
        let host = Arc::new(MemoryHost::default());
        let provider = WalletProvider::new("http://127.0.0.1:1".parse().unwrap());
        (WalletSession::new(provider, host.clone()), host)
    }

    #[test]
    fn test_starts_disconnected() {
        let (session, _) = offline_session();
        assert_eq!(session.snapshot().state(), SessionState::Disconnected);
        assert!(session.account().is_none());
        assert!(!session.is_connected());
    }

    #[tokio::test]
    async fn test_unreachable_wallet_restores_state() {
        let (session, host) = offline_session();
        let err = session.connect().await.unwrap_err();
        assert!(matches!(err, ConnectionError::Transport(_)));
        assert_eq!(session.snapshot().state(), SessionState::Disconnected);
        assert!(host.wallet_label().is_none());
    }
}

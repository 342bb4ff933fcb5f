//! Session state and connection errors.

use alloy::primitives::Address;
use alloy::transports::TransportError;
use thiserror::Error;

/// EIP-1193 code for a request the user declined.
pub const USER_REJECTED_CODE: i64 = 4001;

/// Code wallets return while an authorization prompt is already open.
pub const REQUEST_PENDING_CODE: i64 = -32002;

/// Where the session is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Disconnected,
    Connecting,
    Connected,
}

/// Connection state plus the authorized account.
///
/// `account` is `Some` exactly when `state` is `Connected`; the constructors
/// are the only way to build one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    state: SessionState,
    account: Option<Address>,
}

impl Session {
    pub fn disconnected() -> Self {
        Self {
            state: SessionState::Disconnected,
            account: None,
        }
    }

    pub fn connecting() -> Self {
        Self {
            state: SessionState::Connecting,
            account: None,
        }
    }

    pub fn connected(account: Address) -> Self {
        Self {
            state: SessionState::Connected,
            account: Some(account),
        }
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn account(&self) -> Option<Address> {
        self.account
    }

    pub fn is_connected(&self) -> bool {
        self.state == SessionState::Connected
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::disconnected()
    }
}

/// A JSON-RPC failure reported by the wallet or node.
///
/// `code` is `None` when the request never produced a JSON-RPC error object
/// (transport down, malformed response).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct ProviderError {
    pub code: Option<i64>,
    pub message: String,
}

impl From<TransportError> for ProviderError {
    fn from(err: TransportError) -> Self {
        match err.as_error_resp() {
            Some(payload) => Self {
                code: Some(payload.code),
                message: payload.message.to_string(),
            },
            None => Self {
                code: None,
                message: err.to_string(),
            },
        }
    }
}

/// Why a connect attempt failed. Display text is shown to the player.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConnectionError {
    #[error("Connection request was rejected by the user. (Error code: 4001)")]
    UserRejected,

    #[error("A connection request is already pending. (Error code: -32002)")]
    RequestPending,

    #[error("No accounts found. Please ensure your wallet account is available.")]
    NoAccounts,

    #[error("Wallet error: {message} (Code: {code})")]
    Provider { code: i64, message: String },

    #[error("Wallet error: {0}")]
    Transport(String),
}

impl From<ProviderError> for ConnectionError {
    fn from(err: ProviderError) -> Self {
        match err.code {
            Some(USER_REJECTED_CODE) => Self::UserRejected,
            Some(REQUEST_PENDING_CODE) => Self::RequestPending,
            Some(code) => Self::Provider {
                code,
                message: err.message,
            },
            None => Self::Transport(err.message),
        }
    }
}

/// Result type for connect attempts.
pub type ConnectionResult<T> = Result<T, ConnectionError>;

/// Button label for a connected account: `Wallet: 0x1234...abcd`.
pub fn wallet_label(account: &Address) -> String {
    let full = account.to_string();
    format!("Wallet: {}...{}", &full[..6], &full[full.len() - 4..])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_invariant() {
        let session = Session::default();
        assert_eq!(session.state(), SessionState::Disconnected);
        assert!(session.account().is_none());

        let session = Session::connecting();
        assert!(!session.is_connected());
        assert!(session.account().is_none());

        let session = Session::connected(Address::repeat_byte(0xab));
        assert!(session.is_connected());
        assert_eq!(session.account(), Some(Address::repeat_byte(0xab)));
    }

    #[test]
    fn test_error_code_classification() {
        let rejected = ProviderError {
            code: Some(4001),
            message: "User denied account authorization".into(),
        };
        assert_eq!(ConnectionError::from(rejected), ConnectionError::UserRejected);

        let pending = ProviderError {
            code: Some(-32002),
            message: "Request already pending".into(),
        };
        assert_eq!(ConnectionError::from(pending), ConnectionError::RequestPending);

        let other = ProviderError {
            code: Some(-32603),
            message: "Internal error".into(),
        };
        assert_eq!(
            ConnectionError::from(other).to_string(),
            "Wallet error: Internal error (Code: -32603)"
        );

        let transport = ProviderError {
            code: None,
            message: "connection refused".into(),
        };
        assert_eq!(
            ConnectionError::from(transport),
            ConnectionError::Transport("connection refused".into())
        );
    }

    #[test]
    fn test_user_facing_messages() {
        assert_eq!(
            ConnectionError::UserRejected.to_string(),
            "Connection request was rejected by the user. (Error code: 4001)"
        );
        assert_eq!(
            ConnectionError::RequestPending.to_string(),
            "A connection request is already pending. (Error code: -32002)"
        );
    }

    #[test]
    fn test_wallet_label() {
        let account: Address = "0x5aAeb6053F3E94C9b9A09f33669435E7Ef1BeAed".parse().unwrap();
        assert_eq!(wallet_label(&account), "Wallet: 0x5aAe...eAed");
    }
}

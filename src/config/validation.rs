//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Endpoints are http(s) URLs with a host
//! - Chain ids are non-zero, amounts parse as unbounded integers
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: BridgeConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use alloy::primitives::U256;
use std::fmt;

use crate::balance::AssetRef;
use crate::chain::abi::is_address;
use crate::config::schema::BridgeConfig;
use crate::transaction::TRANSFER_GAS_LIMIT;

/// A single semantic problem in the configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// Dotted path of the offending field.
    pub field: &'static str,
    pub message: String,
}

impl ValidationError {
    fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

impl std::error::Error for ValidationError {}

/// Validate a parsed configuration.
pub fn validate_config(config: &BridgeConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    check_url(&mut errors, "network.rpc_url", &config.network.rpc_url);
    check_chain_id(&mut errors, "network.chain_id", config.network.chain_id);

    if let Some(url) = config.wallet.provider_url.as_deref() {
        if !url.trim().is_empty() {
            check_url(&mut errors, "wallet.provider_url", url);
        }
    }

    check_url(&mut errors, "secondary_network.rpc_url", &config.secondary_network.rpc_url);
    check_chain_id(&mut errors, "secondary_network.chain_id", config.secondary_network.chain_id);

    if let AssetRef::FungibleToken(address) = AssetRef::parse(&config.token.game_token_address) {
        if !is_address(&address) {
            errors.push(ValidationError::new(
                "token.game_token_address",
                format!("'{}' is neither \"native\" nor a contract address", address),
            ));
        }
    }

    if parse_amount(&config.token.required_amount).is_none() {
        errors.push(ValidationError::new(
            "token.required_amount",
            format!("'{}' is not a non-negative integer", config.token.required_amount),
        ));
    }

    if config.transfer.gas_limit < TRANSFER_GAS_LIMIT {
        errors.push(ValidationError::new(
            "transfer.gas_limit",
            format!("must be at least {}", TRANSFER_GAS_LIMIT),
        ));
    }

    if config.observability.metrics_enabled
        && config
            .observability
            .metrics_address
            .parse::<std::net::SocketAddr>()
            .is_err()
    {
        errors.push(ValidationError::new(
            "observability.metrics_address",
            "must be a socket address",
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Parse a decimal string into an unbounded integer.
pub fn parse_amount(raw: &str) -> Option<U256> {
    let raw = raw.trim();
    if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    U256::from_str_radix(raw, 10).ok()
}

fn check_url(errors: &mut Vec<ValidationError>, field: &'static str, raw: &str) {
    match url::Url::parse(raw) {
        Ok(parsed) if matches!(parsed.scheme(), "http" | "https") && parsed.host().is_some() => {}
        Ok(_) => errors.push(ValidationError::new(field, "must be an http(s) URL with a host")),
        Err(e) => errors.push(ValidationError::new(field, format!("invalid URL: {}", e))),
    }
}

fn check_chain_id(errors: &mut Vec<ValidationError>, field: &'static str, chain_id: u64) {
    if chain_id == 0 {
        errors.push(ValidationError::new(field, "must be non-zero"));
    }
}

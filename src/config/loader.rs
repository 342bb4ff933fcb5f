//! Configuration loading from disk.

use std::fs;
use std::path::Path;
use thiserror::Error;

use crate::config::schema::BridgeConfig;
use crate::config::validation::{validate_config, ValidationError};

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation failed: {}", join(.0))]
    Validation(Vec<ValidationError>),
}

fn join(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Parse and validate configuration from TOML text.
pub fn parse_config(content: &str) -> Result<BridgeConfig, ConfigError> {
    let mut config: BridgeConfig = toml::from_str(content)?;
    config.token.game_token_address = config.token.game_token_address.trim().to_string();

    validate_config(&config).map_err(ConfigError::Validation)?;

    Ok(config)
}

/// Load and validate configuration from a TOML file.
pub fn load_config(path: &Path) -> Result<BridgeConfig, ConfigError> {
    let content = fs::read_to_string(path)?;
    parse_config(&content)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_load_from_file() {
        let path = std::env::temp_dir().join(format!("wallet-bridge-{}.toml", uuid::Uuid::new_v4()));
        let mut file = fs::File::create(&path).unwrap();
        writeln!(file, "[network]\nrpc_url = \"http://127.0.0.1:8545\"\nchain_id = 31337").unwrap();

        let config = load_config(&path).unwrap();
        assert_eq!(config.network.chain_id, 31337);
        fs::remove_file(&path).ok();
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let result = load_config(Path::new("/definitely/not/here.toml"));
        assert!(matches!(result, Err(ConfigError::Io(_))));
    }

    #[test]
    fn test_bad_toml_is_parse_error() {
        assert!(matches!(parse_config("[network"), Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_token_address_is_trimmed() {
        let config = parse_config("[token]\ngame_token_address = \"  native  \"").unwrap();
        assert_eq!(config.token.game_token_address, "native");
    }

    #[test]
    fn test_validation_errors_are_joined() {
        let err = parse_config("[network]\nchain_id = 0\n[secondary_network]\nchain_id = 0")
            .unwrap_err();
        let msg = err.to_string();
        assert!(msg.starts_with("Validation failed: "));
        assert!(msg.contains("network.chain_id: must be non-zero"));
        assert!(msg.contains("secondary_network.chain_id: must be non-zero"));
    }
}

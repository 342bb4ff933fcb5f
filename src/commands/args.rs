//! Trigger argument decoding.
//!
//! Host events deliver a command name plus string arguments. Empty strings
//! count as absent, matching how the event editor stores unset fields.

use alloy::primitives::{Address, U256};
use std::collections::HashMap;
use std::str::FromStr;
use thiserror::Error;

use crate::chain::abi::parse_address;
use crate::config::parse_amount;
use crate::transaction::SubmissionFailure;
use crate::wallet::ConnectionError;

/// Errors raised at the trigger boundary.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandError {
    #[error("Unknown command '{0}'")]
    UnknownCommand(String),

    #[error("{command}: missing required argument '{argument}'")]
    MissingArgument {
        command: &'static str,
        argument: &'static str,
    },

    #[error("{command}: invalid {argument} '{value}'")]
    InvalidArgument {
        command: &'static str,
        argument: &'static str,
        value: String,
    },

    #[error("No wallet connected")]
    NotConnected,

    #[error(transparent)]
    Connection(#[from] ConnectionError),

    #[error(transparent)]
    Submission(#[from] SubmissionFailure),
}

/// Result type for trigger handling.
pub type CommandResult<T> = Result<T, CommandError>;

/// Named string arguments of one trigger.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandArgs(HashMap<String, String>);

impl CommandArgs {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an argument, builder style.
    pub fn with(mut self, name: &str, value: impl Into<String>) -> Self {
        self.0.insert(name.to_string(), value.into());
        self
    }

    /// Parse `key=value` tokens. Tokens without `=` are rejected.
    pub fn from_pairs<'a, I>(pairs: I) -> Result<Self, String>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut args = Self::new();
        for pair in pairs {
            let (key, value) = pair
                .split_once('=')
                .ok_or_else(|| format!("expected key=value, got '{}'", pair))?;
            args.0.insert(key.trim().to_string(), value.trim().to_string());
        }
        Ok(args)
    }

    /// Argument value, `None` when absent or empty.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.0
            .get(name)
            .map(|v| v.trim())
            .filter(|v| !v.is_empty())
    }
}

/// Token and network selection shared by the balance triggers.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BalanceQuery {
    pub token_address: Option<String>,
    pub rpc_url: Option<String>,
    pub chain_id: Option<u64>,
}

/// Arguments of the `Show*Balance` triggers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShowBalance {
    pub variable_id: u32,
    pub human_readable: bool,
    pub query: BalanceQuery,
}

/// A decoded trigger.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    ConnectWallet,
    CheckTokenBalance(BalanceQuery),
    CheckBaseBalance(BalanceQuery),
    PurchaseItem {
        recipient: Address,
        price_wei: U256,
    },
    SendNft {
        contract: Address,
        token_id: U256,
        recipient: Address,
    },
    ShowTokenBalance(ShowBalance),
    ShowBaseBalance(ShowBalance),
}

impl Command {
    /// Decode a trigger by name.
    pub fn decode(name: &str, args: &CommandArgs) -> CommandResult<Self> {
        match name {
            "ConnectWallet" => Ok(Self::ConnectWallet),
            "CheckTokenBalance" => Ok(Self::CheckTokenBalance(balance_query(
                "CheckTokenBalance",
                args,
            )?)),
            "CheckBaseBalance" => Ok(Self::CheckBaseBalance(balance_query(
                "CheckBaseBalance",
                args,
            )?)),
            "PurchaseItem" => {
                const CMD: &str = "PurchaseItem";
                let recipient = required(CMD, args, "recipientAddress")?;
                let price = required(CMD, args, "priceInWei")?;
                Ok(Self::PurchaseItem {
                    recipient: address(CMD, "recipientAddress", recipient)?,
                    price_wei: amount(CMD, "priceInWei", price)?,
                })
            }
            "SendNFT" => {
                const CMD: &str = "SendNFT";
                let contract = required(CMD, args, "nftContractAddress")?;
                let token_id = required(CMD, args, "tokenId")?;
                let recipient = required(CMD, args, "recipientAddress")?;
                Ok(Self::SendNft {
                    contract: address(CMD, "nftContractAddress", contract)?,
                    token_id: amount(CMD, "tokenId", token_id)?,
                    recipient: address(CMD, "recipientAddress", recipient)?,
                })
            }
            "ShowTokenBalance" => Ok(Self::ShowTokenBalance(show_balance(
                "ShowTokenBalance",
                args,
            )?)),
            "ShowBaseBalance" => Ok(Self::ShowBaseBalance(show_balance(
                "ShowBaseBalance",
                args,
            )?)),
            other => Err(CommandError::UnknownCommand(other.to_string())),
        }
    }

    /// Trigger name as the host knows it.
    pub fn name(&self) -> &'static str {
        match self {
            Self::ConnectWallet => "ConnectWallet",
            Self::CheckTokenBalance(_) => "CheckTokenBalance",
            Self::CheckBaseBalance(_) => "CheckBaseBalance",
            Self::PurchaseItem { .. } => "PurchaseItem",
            Self::SendNft { .. } => "SendNFT",
            Self::ShowTokenBalance(_) => "ShowTokenBalance",
            Self::ShowBaseBalance(_) => "ShowBaseBalance",
        }
    }

    /// Whether the trigger reads the connected account.
    pub fn needs_session(&self) -> bool {
        !matches!(self, Self::ConnectWallet)
    }
}

fn required<'a>(
    command: &'static str,
    args: &'a CommandArgs,
    argument: &'static str,
) -> CommandResult<&'a str> {
    args.get(argument)
        .ok_or(CommandError::MissingArgument { command, argument })
}

fn invalid(command: &'static str, argument: &'static str, value: &str) -> CommandError {
    CommandError::InvalidArgument {
        command,
        argument,
        value: value.to_string(),
    }
}

fn address(command: &'static str, argument: &'static str, value: &str) -> CommandResult<Address> {
    parse_address(value).ok_or_else(|| invalid(command, argument, value))
}

fn amount(command: &'static str, argument: &'static str, value: &str) -> CommandResult<U256> {
    parse_amount(value).ok_or_else(|| invalid(command, argument, value))
}

fn balance_query(command: &'static str, args: &CommandArgs) -> CommandResult<BalanceQuery> {
    let chain_id = args
        .get("customChainId")
        .map(|raw| u64::from_str(raw).map_err(|_| invalid(command, "customChainId", raw)))
        .transpose()?;

    Ok(BalanceQuery {
        token_address: args.get("tokenAddress").map(str::to_string),
        rpc_url: args.get("customRpcUrl").map(str::to_string),
        chain_id,
    })
}

fn show_balance(command: &'static str, args: &CommandArgs) -> CommandResult<ShowBalance> {
    let variable_id = match args.get("variableId") {
        Some(raw) => u32::from_str(raw).map_err(|_| invalid(command, "variableId", raw))?,
        None => 1,
    };

    Ok(ShowBalance {
        variable_id,
        human_readable: args.get("humanReadable") != Some("false"),
        query: balance_query(command, args)?,
    })
}

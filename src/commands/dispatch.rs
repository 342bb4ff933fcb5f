//! Trigger dispatch.
//!
//! Wires the wallet session, network resolver, balance and transaction
//! services to the host collaborators. Every trigger runs in its own span
//! tagged with an invocation id.

use alloy::primitives::{Address, TxHash};
use serde::Serialize;
use std::sync::Arc;
use tracing::Instrument;
use uuid::Uuid;

use crate::balance::{meets_threshold, to_human_readable, AssetRef, BalanceService};
use crate::chain::{Amount, ChainClient, ChainResult, NetworkConfig, NetworkResolver};
use crate::commands::args::{
    BalanceQuery, Command, CommandArgs, CommandError, CommandResult, ShowBalance,
};
use crate::config::{parse_amount, BridgeConfig, ConfigError, ValidationError};
use crate::host::{GameState, WalletUi};
use crate::transaction::{NftTransferOutcome, SubmissionFailure, TransactionService};
use crate::wallet::{WalletProvider, WalletSession};

/// Shown when a transfer is triggered before connecting.
pub const CONNECT_FIRST_ALERT: &str = "Please connect your wallet first.";

/// Queued when a balance display is triggered before connecting.
pub const NOT_CONNECTED_MESSAGE: &str = "Wallet not connected.";

/// What a trigger did.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CommandOutcome {
    Connected(Address),
    Threshold { balance: Amount, met: bool },
    PaymentSent(TxHash),
    NftSent(NftTransferOutcome),
    BalanceShown { variable_id: u32, value: Amount },
}

/// Fixed network the `*BaseBalance` triggers default to.
#[derive(Debug, Clone)]
struct SecondaryNetwork {
    rpc_url: String,
    chain_id: u64,
    label: String,
}

/// The bridge between host triggers and the wallet/chain services.
pub struct WalletBridge {
    session: Arc<WalletSession>,
    resolver: NetworkResolver,
    balances: BalanceService,
    transactions: TransactionService,
    default_asset: AssetRef,
    required_amount: Amount,
    secondary: SecondaryNetwork,
    ui: Arc<dyn WalletUi>,
    game: Arc<dyn GameState>,
}

impl WalletBridge {
    /// Build every service from a validated configuration.
    pub fn new(
        config: &BridgeConfig,
        ui: Arc<dyn WalletUi>,
        game: Arc<dyn GameState>,
    ) -> Result<Self, ConfigError> {
        let invalid = |field: &'static str, message: String| {
            ConfigError::Validation(vec![ValidationError { field, message }])
        };

        let default_network = NetworkConfig::new(&config.network.rpc_url, config.network.chain_id)
            .map_err(|e| invalid("network.rpc_url", e.to_string()))?;
        let wallet_url: url::Url = config
            .wallet_provider_url()
            .parse()
            .map_err(|e: url::ParseError| invalid("wallet.provider_url", e.to_string()))?;
        let required_amount = parse_amount(&config.token.required_amount).ok_or_else(|| {
            invalid(
                "token.required_amount",
                format!("'{}' is not a non-negative integer", config.token.required_amount),
            )
        })?;

        tracing::info!(
            rpc_url = %default_network.endpoint(),
            chain_id = config.network.chain_id,
            wallet = %wallet_url,
            app_name = %config.wallet.app_name,
            dark_mode = config.wallet.dark_mode,
            "Wallet bridge initialized"
        );

        let session = Arc::new(WalletSession::new(WalletProvider::new(wallet_url), ui.clone()));

        Ok(Self {
            transactions: TransactionService::new(session.clone(), config.transfer.gas_limit),
            session,
            resolver: NetworkResolver::new(default_network),
            balances: BalanceService::new(config.display.use_token_decimals),
            default_asset: AssetRef::parse(&config.token.game_token_address),
            required_amount,
            secondary: SecondaryNetwork {
                rpc_url: config.secondary_network.rpc_url.clone(),
                chain_id: config.secondary_network.chain_id,
                label: config.secondary_network.label.clone(),
            },
            ui,
            game,
        })
    }

    /// Decode and run a named trigger.
    pub async fn execute(&self, name: &str, args: &CommandArgs) -> CommandResult<CommandOutcome> {
        let span = tracing::info_span!("trigger", command = %name, invocation = %Uuid::new_v4());
        async {
            let command = Command::decode(name, args).inspect_err(|e| {
                tracing::error!(error = %e, "Rejected trigger");
            })?;
            self.dispatch(command).await
        }
        .instrument(span)
        .await
    }

    /// Run a decoded trigger.
    pub async fn dispatch(&self, command: Command) -> CommandResult<CommandOutcome> {
        tracing::debug!(command = command.name(), "Trigger received");
        match command {
            Command::ConnectWallet => self.connect_wallet().await,
            Command::CheckTokenBalance(query) => self.check_balance(&query, None).await,
            Command::CheckBaseBalance(query) => {
                self.check_balance(&query, Some(&self.secondary)).await
            }
            Command::PurchaseItem {
                recipient,
                price_wei,
            } => {
                let result = self.transactions.submit_payment(recipient, price_wei).await;
                self.surface_submission(result).map(CommandOutcome::PaymentSent)
            }
            Command::SendNft {
                contract,
                token_id,
                recipient,
            } => {
                let result = self.transactions.send_nft(contract, token_id, recipient).await;
                self.surface_submission(result).map(CommandOutcome::NftSent)
            }
            Command::ShowTokenBalance(show) => self.show_balance(&show, None).await,
            Command::ShowBaseBalance(show) => self.show_balance(&show, Some(&self.secondary)).await,
        }
    }

    async fn connect_wallet(&self) -> CommandResult<CommandOutcome> {
        match self.session.connect().await {
            Ok(account) => Ok(CommandOutcome::Connected(account)),
            Err(e) => {
                self.ui.alert(&e.to_string());
                Err(e.into())
            }
        }
    }

    async fn check_balance(
        &self,
        query: &BalanceQuery,
        fallback: Option<&SecondaryNetwork>,
    ) -> CommandResult<CommandOutcome> {
        let Some(account) = self.session.account() else {
            tracing::error!("No wallet connected");
            return Err(CommandError::NotConnected);
        };

        let (_, balance, _) = self.query_balance(query, fallback, account).await;
        let met = meets_threshold(balance, self.required_amount);
        if met {
            tracing::info!(balance = %balance, required = %self.required_amount, "Token requirement met");
        } else {
            tracing::info!(balance = %balance, required = %self.required_amount, "Insufficient tokens");
        }
        Ok(CommandOutcome::Threshold { balance, met })
    }

    async fn show_balance(
        &self,
        show: &ShowBalance,
        fallback: Option<&SecondaryNetwork>,
    ) -> CommandResult<CommandOutcome> {
        let Some(account) = self.session.account() else {
            tracing::error!("No wallet connected");
            self.game.add_message(NOT_CONNECTED_MESSAGE.to_string());
            return Err(CommandError::NotConnected);
        };

        let (asset, raw, client) = self.query_balance(&show.query, fallback, account).await;
        let value = match (show.human_readable, client) {
            (false, _) => raw,
            (true, Some(client)) => self.balances.display_units(&asset, raw, &client).await,
            (true, None) => to_human_readable(raw),
        };

        self.game.set_variable(show.variable_id, value);
        let message = match fallback {
            Some(network) => format!("You have {} tokens on {}.", value, network.label),
            None => format!("You have {} tokens.", value),
        };
        self.game.add_message(message);

        tracing::info!(variable_id = show.variable_id, value = %value, "Balance stored");
        Ok(CommandOutcome::BalanceShown {
            variable_id: show.variable_id,
            value,
        })
    }

    /// Resolve asset and network for a query, then read the balance.
    ///
    /// A network that can't be resolved is a query failure like any other:
    /// the balance is zero and no client is returned.
    async fn query_balance(
        &self,
        query: &BalanceQuery,
        fallback: Option<&SecondaryNetwork>,
        account: Address,
    ) -> (AssetRef, Amount, Option<Arc<ChainClient>>) {
        let asset = query
            .token_address
            .as_deref()
            .map(AssetRef::parse)
            .unwrap_or_else(|| self.default_asset.clone());

        match self.resolve(query, fallback) {
            Ok(client) => {
                let balance = self.balances.get_balance(&asset, account, &client).await;
                (asset, balance, Some(client))
            }
            Err(e) => {
                tracing::warn!(error = %e, "Could not resolve network, using zero balance");
                (asset, Amount::ZERO, None)
            }
        }
    }

    fn resolve(
        &self,
        query: &BalanceQuery,
        fallback: Option<&SecondaryNetwork>,
    ) -> ChainResult<Arc<ChainClient>> {
        let rpc_url = query
            .rpc_url
            .as_deref()
            .or(fallback.map(|n| n.rpc_url.as_str()));
        let chain_id = query.chain_id.or(fallback.map(|n| n.chain_id));
        self.resolver.resolve(rpc_url, chain_id)
    }

    fn surface_submission<T>(&self, result: Result<T, SubmissionFailure>) -> CommandResult<T> {
        result.map_err(|e| {
            match &e {
                SubmissionFailure::NotConnected => self.ui.alert(CONNECT_FIRST_ALERT),
                SubmissionFailure::Provider(_) => self.ui.alert(&e.to_string()),
            }
            e.into()
        })
    }

    pub fn session(&self) -> &Arc<WalletSession> {
        &self.session
    }

    pub fn resolver(&self) -> &NetworkResolver {
        &self.resolver
    }

    pub fn default_asset(&self) -> &AssetRef {
        &self.default_asset
    }

    pub fn required_amount(&self) -> Amount {
        self.required_amount
    }
}

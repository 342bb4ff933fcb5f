//! Trigger surface.
//!
//! # Data Flow
//! ```text
//! host event: name + string args
//!     → args.rs (decode, required-argument checks)
//!     → dispatch.rs (span per invocation, route to service)
//!     → session / balance / transaction services
//!     → host writes: alerts, button label, variables, messages
//! ```
//!
//! # Failure Surfacing
//! - Connection errors: alert with the classified message
//! - Balance failures: logged only, zero balance used
//! - Transfer failures: alert, returned to caller, never retried

pub mod args;
pub mod dispatch;

pub use args::{BalanceQuery, Command, CommandArgs, CommandError, CommandResult, ShowBalance};
pub use dispatch::{CommandOutcome, WalletBridge, CONNECT_FIRST_ALERT, NOT_CONNECTED_MESSAGE};

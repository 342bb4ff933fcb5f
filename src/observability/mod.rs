//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! All subsystems produce:
//!     → logging.rs (structured log events via tracing)
//!     → metrics.rs (counters for connects, queries, submissions)
//!
//! Consumers:
//!     → stdout (fmt layer, filter from config or RUST_LOG)
//!     → Metrics endpoint (Prometheus scrape, optional)
//! ```
//!
//! # Design Decisions
//! - Each trigger runs in a span carrying its invocation id
//! - Metric updates are no-ops until a recorder is installed

pub mod logging;
pub mod metrics;

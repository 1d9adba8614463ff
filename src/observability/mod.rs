//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! validation, codec, session, CLI produce:
//!     → logging.rs (structured log events)
//!     → metrics.rs (counters)
//!
//! Consumers:
//!     → stderr (pretty or JSON lines)
//!     → whatever metrics recorder the host installs
//! ```
//!
//! # Design Decisions
//! - Structured logging (JSON) for machine parsing
//! - Metrics go through the `metrics` facade; without a recorder they are no-ops
//! - The library never installs a subscriber or recorder itself

pub mod logging;
pub mod metrics;

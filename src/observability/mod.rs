//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! All subsystems produce:
//!     → logging.rs (structured log events, stderr)
//!     → metrics.rs (counters, gauges)
//!
//! Consumers:
//!     → Terminal / log aggregation
//!     → Metrics endpoint (Prometheus scrape, opt-in)
//! ```
//!
//! # Design Decisions
//! - stdout is reserved for command output; logs go to stderr
//! - Metrics are cheap no-ops until an exporter is installed

pub mod logging;
pub mod metrics;

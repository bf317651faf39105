//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! Handlers and the store produce:
//!     → logging.rs (structured log events via tracing)
//!     → metrics.rs (counters, gauges, histograms)
//!
//! Consumers:
//!     → stdout (pretty or JSON lines)
//!     → Metrics endpoint (Prometheus scrape, when enabled)
//! ```
//!
//! # Design Decisions
//! - Request ID flows through every HTTP span
//! - Metrics are cheap no-ops until an exporter is installed

pub mod logging;
pub mod metrics;

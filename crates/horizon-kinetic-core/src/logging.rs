//! Logging facilities for Horizon Kinetic.
//!
//! Horizon Kinetic uses the `tracing` crate for instrumentation. To see logs,
//! install a subscriber in your application:
//!
//! ```ignore
//! fn main() {
//!     tracing_subscriber::fmt()
//!         .with_env_filter("horizon_kinetic_core::fx=debug,horizon_kinetic=warn")
//!         .init();
//!
//!     // Your application code...
//! }
//! ```
//!
//! Per-tick output (tween values, sweeps) is emitted at `trace` level, clock
//! start/stop at `debug`, and skipped style writes at `warn`.

/// Target names for log filtering.
///
/// Use these with `tracing` directives to filter logs by subsystem.
pub mod targets {
    /// Core crate target.
    pub const CORE: &str = "horizon_kinetic_core";
    /// Shared clock and sweep target.
    pub const FX: &str = "horizon_kinetic_core::fx";
    /// Periodic timer target.
    pub const TIMER: &str = "horizon_kinetic_core::timer";
    /// Element queue target.
    pub const QUEUE: &str = "horizon_kinetic_core::queue";
    /// Property tween target.
    pub const TWEEN: &str = "horizon_kinetic::tween";
    /// Animation run target.
    pub const RUN: &str = "horizon_kinetic::run";
    /// Engine configuration target.
    pub const CONFIG: &str = "horizon_kinetic::config";
    /// Performance span target.
    pub const PERF: &str = "horizon_kinetic::perf";
}

/// A guard that keeps a tracing span entered until dropped.
///
/// Used around each fx sweep so profilers can attribute frame time.
#[derive(Debug)]
pub struct PerfSpan {
    #[allow(dead_code)]
    span: tracing::span::EnteredSpan,
}

impl PerfSpan {
    /// Create a new performance span.
    pub fn new(name: &'static str) -> Self {
        let span = tracing::trace_span!(target: targets::PERF, "perf", operation = name);
        Self {
            span: span.entered(),
        }
    }
}

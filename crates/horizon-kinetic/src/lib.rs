//! Horizon Kinetic: queued, time-based animation of numeric style properties.
//!
//! An [`Animation`] handle wraps an element that exposes string-valued style
//! properties (see [`StyleTarget`]). Each call to [`Animation::animate`]
//! interpolates one or more properties from their current values to target
//! values over a duration, shaped by a named easing curve. Requests made on
//! the same handle run strictly one after another.
//!
//! Every running animation is ticked by one [`Fx`] scheduler. The scheduler
//! owns a single repeating timer that exists only while something is
//! animating; drive it by calling [`Fx::process_expired`] from your event
//! loop, or block on [`Fx::run_until_idle`].
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use std::time::Duration;
//! use horizon_kinetic::{Animation, AnimationOptions, Fx, ManualClock, StyleElement};
//!
//! let clock = Arc::new(ManualClock::new());
//! let fx = Arc::new(Fx::new(clock.clone()));
//! let element = Arc::new(StyleElement::new().with_style("opacity", "1"));
//!
//! Animation::with_fx(element.clone(), fx.clone())
//!     .animate([("opacity", 0.0)], AnimationOptions::new().duration_ms(100).easing("linear"));
//!
//! clock.advance(Duration::from_millis(50));
//! fx.process_expired();
//! assert_eq!(element.style("opacity").as_deref(), Some("0.5"));
//!
//! while fx.is_running() {
//!     clock.advance(Duration::from_millis(16));
//!     fx.process_expired();
//! }
//! assert_eq!(element.style("opacity").as_deref(), Some("0"));
//! ```
//!
//! # Configuration
//!
//! Engine-wide settings (tick interval, default duration and easing) can be
//! loaded from TOML with [`EngineConfig`].

mod animation;
mod config;
pub mod easing;
mod error;
mod options;
mod run;
pub mod style;
mod tween;

pub use animation::Animation;
pub use config::EngineConfig;
pub use easing::{Easing, ease, evaluate};
pub use error::{Error, Result};
pub use options::{
    AnimationDefaults, AnimationOptions, CompleteCallback, ResolvedOptions, StepCallback,
};
pub use run::{AnimationRun, RunHandle, RunState};
pub use style::{StyleElement, StyleTarget, Unit, parse_style_number, unit_for};
pub use tween::PropertyTween;

pub use horizon_kinetic_core::{
    Clock, DEFAULT_TICK_INTERVAL, ElementQueue, Fx, ManualClock, QueueState, SystemClock,
    logging,
};

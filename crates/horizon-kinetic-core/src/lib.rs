//! Core systems for Horizon Kinetic.
//!
//! This crate provides the timing backbone of the Horizon Kinetic animation
//! engine:
//!
//! - **Clock**: monotonic time sources, real or manually stepped
//! - **Timer**: the repeating timer primitive behind the shared clock
//! - **Fx**: the single scheduler that ticks every active animation once
//!   per period and goes idle when nothing is left
//! - **Queue**: per-element FIFO queues with one in-flight slot
//!
//! Everything runs cooperatively on whichever thread polls the scheduler;
//! nothing here spawns threads.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use std::time::Duration;
//! use horizon_kinetic_core::{ElementQueue, Fx, ManualClock};
//!
//! let clock = Arc::new(ManualClock::new());
//! let fx = Arc::new(Fx::new(clock.clone()));
//! let queue = ElementQueue::new();
//!
//! // Each queued job runs for three ticks, then releases the queue.
//! for _ in 0..2 {
//!     let fx_job = fx.clone();
//!     let queue_job = queue.clone();
//!     queue.enqueue(move || {
//!         let mut ticks = 0;
//!         fx_job.schedule(move || {
//!             ticks += 1;
//!             if ticks < 3 {
//!                 return true;
//!             }
//!             queue_job.advance();
//!             false
//!         });
//!     });
//! }
//!
//! while fx.is_running() {
//!     clock.advance(Duration::from_millis(16));
//!     fx.process_expired();
//! }
//! assert!(!queue.is_running());
//! ```

mod clock;
mod error;
mod fx;
pub mod logging;
mod queue;
mod timer;

pub use clock::{Clock, ManualClock, SystemClock};
pub use error::{KineticError, Result, TimerError};
pub use fx::{DEFAULT_TICK_INTERVAL, Fx};
pub use logging::PerfSpan;
pub use queue::{ElementQueue, QueueId, QueueState};
pub use timer::{TimerId, TimerManager};

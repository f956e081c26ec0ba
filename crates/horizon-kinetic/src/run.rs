//! One animation over one or more properties of an element.

use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use horizon_kinetic_core::logging::targets;
use horizon_kinetic_core::{Clock, Fx};

use crate::options::{AnimationDefaults, AnimationOptions, CompleteCallback, ResolvedOptions};
use crate::style::StyleTarget;
use crate::tween::PropertyTween;

/// Where a run is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RunState {
    /// Still ticking.
    #[default]
    Running,
    /// Stopped early through a [`RunHandle`]; `on_complete` was not called.
    Cancelled,
    /// Reached full progress (or had nothing to animate).
    Done,
}

impl RunState {
    /// Check if the run has stopped, either way.
    pub fn is_finished(self) -> bool {
        !matches!(self, RunState::Running)
    }
}

/// Cancels a run from outside the scheduler.
///
/// Cancellation takes effect on the run's next tick.
#[derive(Debug, Clone, Default)]
pub struct RunHandle {
    cancelled: Arc<AtomicBool>,
}

impl RunHandle {
    /// Ask the run to stop.
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Release);
    }

    /// Check if cancellation was requested.
    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Acquire)
    }
}

/// Continuation fired when the run leaves the scheduler.
type Continuation = Box<dyn FnOnce() + Send + 'static>;

/// A set of property tweens that share one duration, easing and start time.
///
/// The start time is captured at construction, not at the first tick.
pub struct AnimationRun {
    element: Option<Arc<dyn StyleTarget>>,
    tweens: Vec<PropertyTween>,
    options: Arc<ResolvedOptions>,
    on_complete: Option<CompleteCallback>,
    continuation: Option<Continuation>,
    clock: Arc<dyn Clock>,
    start_time: Duration,
    state: RunState,
    handle: RunHandle,
}

impl AnimationRun {
    /// Build one tween per property, reading each start value now.
    pub fn new<I, K>(
        element: Arc<dyn StyleTarget>,
        properties: I,
        options: AnimationOptions,
        defaults: &AnimationDefaults,
        clock: Arc<dyn Clock>,
    ) -> Self
    where
        I: IntoIterator<Item = (K, f64)>,
        K: Into<String>,
    {
        let (resolved, on_complete) = options.resolve(defaults);
        let options = Arc::new(resolved);
        let start_time = clock.now();

        let tweens: Vec<PropertyTween> = properties
            .into_iter()
            .map(|(property, end)| {
                PropertyTween::new(element.clone(), property, end, options.clone())
            })
            .collect();

        tracing::debug!(
            target: targets::RUN,
            properties = tweens.len(),
            duration = ?options.duration,
            easing = %options.easing,
            "run created"
        );

        Self {
            element: Some(element),
            tweens,
            options,
            on_complete,
            continuation: None,
            clock,
            start_time,
            state: RunState::Running,
            handle: RunHandle::default(),
        }
    }

    /// A handle that can cancel this run.
    pub fn handle(&self) -> RunHandle {
        self.handle.clone()
    }

    /// Register with `fx`. `next` fires once the run is done or cancelled.
    ///
    /// The scheduler ticks the run once right away, so a zero-duration run
    /// completes (and calls `next`) before this returns.
    pub fn start<F>(mut self, fx: &Fx, next: F)
    where
        F: FnOnce() + Send + 'static,
    {
        self.continuation = Some(Box::new(next));
        fx.schedule(move || self.tick());
    }

    /// Fraction of the duration elapsed, in 0.0..=1.0.
    ///
    /// A zero duration is always complete.
    pub fn progress(&self) -> f64 {
        let duration = self.options.duration;
        if duration.is_zero() {
            return 1.0;
        }
        let elapsed = self.clock.now().saturating_sub(self.start_time);
        let remaining = duration.saturating_sub(elapsed);
        1.0 - remaining.as_secs_f64() / duration.as_secs_f64()
    }

    /// Advance every tween to the current progress.
    ///
    /// Returns `true` while more ticks are needed. The tick that returns
    /// `false` calls `on_complete` and then the continuation; later calls
    /// return `false` without doing anything.
    pub fn tick(&mut self) -> bool {
        if self.state.is_finished() {
            return false;
        }

        if self.handle.is_cancelled() {
            self.state = RunState::Cancelled;
            tracing::debug!(target: targets::RUN, "run cancelled");
            self.finish();
            return false;
        }

        let progress = self.progress();
        for tween in &mut self.tweens {
            tween.advance(progress);
        }

        if progress < 1.0 && !self.tweens.is_empty() {
            return true;
        }

        self.state = RunState::Done;
        tracing::debug!(target: targets::RUN, "run complete");
        if let Some(on_complete) = self.on_complete.take() {
            on_complete();
        }
        self.finish();
        false
    }

    /// Release the element and tweens.
    pub fn dispose(&mut self) {
        self.tweens.clear();
        self.element = None;
    }

    /// Current lifecycle state.
    pub fn state(&self) -> RunState {
        self.state
    }

    /// Clock reading captured at construction.
    pub fn start_time(&self) -> Duration {
        self.start_time
    }

    /// Resolved duration.
    pub fn duration(&self) -> Duration {
        self.options.duration
    }

    /// The tweens, in declaration order. Empty once disposed.
    pub fn tweens(&self) -> &[PropertyTween] {
        &self.tweens
    }

    /// Check if the run still holds its element.
    pub fn is_disposed(&self) -> bool {
        self.element.is_none()
    }

    fn finish(&mut self) {
        let next = self.continuation.take();
        self.dispose();
        if let Some(next) = next {
            next();
        }
    }
}

impl fmt::Debug for AnimationRun {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AnimationRun")
            .field("state", &self.state)
            .field("start_time", &self.start_time)
            .field("options", &self.options)
            .field("tweens", &self.tweens)
            .finish()
    }
}

//! The shared animation clock.
//!
//! [`Fx`] owns the set of active tick functions and the single repeating
//! timer that drives them. N concurrent animations cost one timer: the
//! timer is started lazily by the first [`Fx::schedule`] that leaves work
//! behind, and stopped by the sweep that finds the active set empty.
//!
//! Time only moves when the owner polls. A host event loop calls
//! [`Fx::process_expired`] whenever [`Fx::time_until_next`] elapses, or a
//! plain thread hands control to [`Fx::run_until_idle`].
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use std::time::Duration;
//! use horizon_kinetic_core::{Fx, ManualClock};
//!
//! let clock = Arc::new(ManualClock::new());
//! let fx = Fx::new(clock.clone());
//!
//! let mut remaining = 3;
//! fx.schedule(move || {
//!     remaining -= 1;
//!     remaining > 0
//! });
//! assert!(fx.is_running());
//!
//! while fx.is_running() {
//!     clock.advance(Duration::from_millis(16));
//!     fx.process_expired();
//! }
//! assert_eq!(fx.active_count(), 0);
//! ```

use std::fmt;
use std::sync::{Arc, OnceLock};
use std::time::Duration;

use parking_lot::Mutex;

use crate::clock::{Clock, SystemClock};
use crate::logging::{PerfSpan, targets};
use crate::timer::{TimerId, TimerManager};

/// Nominal period of the shared clock, roughly one display frame.
pub const DEFAULT_TICK_INTERVAL: Duration = Duration::from_millis(16);

/// A tick function. Returns `true` while it has more work to do.
type BoxedTick = Box<dyn FnMut() -> bool + Send + 'static>;

struct FxState {
    /// Active tick functions in registration order.
    active: Vec<BoxedTick>,
    timers: TimerManager,
    /// The shared driver, present while anything is active.
    timer: Option<TimerId>,
}

/// Process-wide animation scheduler.
pub struct Fx {
    clock: Arc<dyn Clock>,
    interval: Duration,
    state: Mutex<FxState>,
}

static SHARED_FX: OnceLock<Arc<Fx>> = OnceLock::new();

impl Fx {
    /// Create a scheduler ticking at [`DEFAULT_TICK_INTERVAL`].
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self::with_interval(clock, DEFAULT_TICK_INTERVAL)
    }

    /// Create a scheduler with a custom tick interval.
    ///
    /// A zero interval would spin, so it is replaced by the default.
    pub fn with_interval(clock: Arc<dyn Clock>, interval: Duration) -> Self {
        let interval = if interval.is_zero() {
            tracing::warn!(
                target: targets::FX,
                "zero tick interval requested, using {:?}",
                DEFAULT_TICK_INTERVAL
            );
            DEFAULT_TICK_INTERVAL
        } else {
            interval
        };

        Self {
            clock,
            interval,
            state: Mutex::new(FxState {
                active: Vec::new(),
                timers: TimerManager::new(),
                timer: None,
            }),
        }
    }

    /// The process-wide scheduler, created on first use with a
    /// [`SystemClock`] and the default interval.
    pub fn shared() -> Arc<Fx> {
        SHARED_FX
            .get_or_init(|| Arc::new(Fx::new(Arc::new(SystemClock::new()))))
            .clone()
    }

    /// The clock this scheduler reads.
    pub fn clock(&self) -> Arc<dyn Clock> {
        self.clock.clone()
    }

    /// Current clock reading.
    pub fn now(&self) -> Duration {
        self.clock.now()
    }

    /// The tick interval.
    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Register a tick function and run it once right away.
    ///
    /// If that first call reports completion the function is dropped without
    /// ever joining the active set. Otherwise it is kept and the shared timer
    /// is started if it is not already running.
    pub fn schedule<F>(&self, tick: F)
    where
        F: FnMut() -> bool + Send + 'static,
    {
        let mut tick: BoxedTick = Box::new(tick);
        if !tick() {
            tracing::trace!(target: targets::FX, "finished on first tick");
            return;
        }

        let mut state = self.state.lock();
        state.active.push(tick);
        self.start_locked(&mut state);
        tracing::trace!(
            target: targets::FX,
            active = state.active.len(),
            "tick function scheduled"
        );
    }

    /// Run one sweep over the active set.
    ///
    /// Each tick function is called once, in registration order, and dropped
    /// if it reports completion. The set is detached for the duration of the
    /// sweep, so tick functions may schedule new work; anything registered
    /// that way is appended after the survivors. Stops the timer when the
    /// set ends up empty.
    ///
    /// Returns the number of tick functions still active.
    #[tracing::instrument(skip(self), target = "horizon_kinetic_core::fx", level = "trace")]
    pub fn on_interval(&self) -> usize {
        let _span = PerfSpan::new("fx_sweep");

        let mut sweep = std::mem::take(&mut self.state.lock().active);
        let before = sweep.len();
        sweep.retain_mut(|tick| tick());
        let finished = before - sweep.len();

        let mut state = self.state.lock();
        let added = std::mem::take(&mut state.active);
        sweep.extend(added);
        state.active = sweep;

        if finished > 0 {
            tracing::trace!(target: targets::FX, finished, "removed finished tick functions");
        }
        if state.active.is_empty() {
            self.stop_locked(&mut state);
        }
        state.active.len()
    }

    /// Poll the shared timer and sweep if a period has elapsed.
    ///
    /// Returns `true` if a sweep ran.
    pub fn process_expired(&self) -> bool {
        let fired = {
            let mut state = self.state.lock();
            let Some(id) = state.timer else {
                return false;
            };
            let now = self.clock.now();
            state.timers.process_expired(now).contains(&id)
        };

        if fired {
            self.on_interval();
        }
        fired
    }

    /// Time until the next sweep is due, or `None` while idle.
    pub fn time_until_next(&self) -> Option<Duration> {
        let mut state = self.state.lock();
        state.timer?;
        let now = self.clock.now();
        state.timers.time_until_next(now)
    }

    /// Drive the scheduler from the calling thread until it goes idle.
    ///
    /// Sleeps between periods, so it needs a clock that follows real time.
    pub fn run_until_idle(&self) {
        while let Some(wait) = self.time_until_next() {
            if !wait.is_zero() {
                std::thread::sleep(wait);
            }
            self.process_expired();
        }
    }

    /// Check if the shared timer is running.
    pub fn is_running(&self) -> bool {
        self.state.lock().timer.is_some()
    }

    /// Number of active tick functions.
    pub fn active_count(&self) -> usize {
        self.state.lock().active.len()
    }

    fn start_locked(&self, state: &mut FxState) {
        if state.timer.is_some() {
            return;
        }
        match state.timers.start_repeating(self.clock.now(), self.interval) {
            Ok(id) => {
                tracing::debug!(target: targets::FX, interval = ?self.interval, "clock started");
                state.timer = Some(id);
            }
            Err(err) => {
                tracing::error!(target: targets::FX, %err, "failed to start clock");
            }
        }
    }

    fn stop_locked(&self, state: &mut FxState) {
        let Some(id) = state.timer.take() else {
            return;
        };
        if let Err(err) = state.timers.stop(id) {
            tracing::warn!(target: targets::FX, %err, "clock was already stopped");
        }
        tracing::debug!(target: targets::FX, "clock stopped, scheduler idle");
    }
}

impl fmt::Debug for Fx {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.state.lock();
        f.debug_struct("Fx")
            .field("interval", &self.interval)
            .field("active", &state.active.len())
            .field("running", &state.timer.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;
    use crate::clock::ManualClock;

    fn setup() -> (Arc<ManualClock>, Arc<Fx>) {
        let clock = Arc::new(ManualClock::new());
        let fx = Arc::new(Fx::new(clock.clone()));
        (clock, fx)
    }

    /// A tick function that reports "more work" until it has run `calls` times.
    fn countdown(calls: usize, counter: Arc<AtomicUsize>) -> impl FnMut() -> bool + Send + 'static {
        move || counter.fetch_add(1, Ordering::SeqCst) + 1 < calls
    }

    fn step(clock: &ManualClock, fx: &Fx) -> bool {
        clock.advance(DEFAULT_TICK_INTERVAL);
        fx.process_expired()
    }

    #[test]
    fn test_schedule_finishing_immediately_never_registers() {
        let (_clock, fx) = setup();
        let calls = Arc::new(AtomicUsize::new(0));

        fx.schedule(countdown(1, calls.clone()));

        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(fx.active_count(), 0);
        assert!(!fx.is_running());
    }

    #[test]
    fn test_single_timer_for_many_runs() {
        let (clock, fx) = setup();
        let a = Arc::new(AtomicUsize::new(0));
        let b = Arc::new(AtomicUsize::new(0));

        fx.schedule(countdown(3, a.clone()));
        fx.schedule(countdown(5, b.clone()));

        assert_eq!(fx.active_count(), 2);
        assert_eq!(fx.state.lock().timers.active_count(), 1);

        // Not due yet.
        assert!(!fx.process_expired());

        assert!(step(&clock, &fx));
        assert_eq!(a.load(Ordering::SeqCst), 2);
        assert_eq!(b.load(Ordering::SeqCst), 2);

        step(&clock, &fx);
        assert_eq!(fx.active_count(), 1);
        assert!(fx.is_running());

        step(&clock, &fx);
        step(&clock, &fx);
        assert_eq!(b.load(Ordering::SeqCst), 5);
        assert_eq!(a.load(Ordering::SeqCst), 3);
        assert_eq!(fx.active_count(), 0);
        assert!(!fx.is_running());
        assert_eq!(fx.state.lock().timers.active_count(), 0);

        // No lingering periodic callback.
        assert!(!step(&clock, &fx));
        assert!(fx.time_until_next().is_none());
    }

    #[test]
    fn test_sweep_preserves_registration_order() {
        let (clock, fx) = setup();
        let order = Arc::new(Mutex::new(Vec::new()));

        for name in ["a", "b", "c"] {
            let order = order.clone();
            let mut first = true;
            fx.schedule(move || {
                if !first {
                    order.lock().push(name);
                }
                first = false;
                true
            });
        }

        step(&clock, &fx);
        step(&clock, &fx);
        assert_eq!(*order.lock(), vec!["a", "b", "c", "a", "b", "c"]);
    }

    #[test]
    fn test_schedule_during_sweep() {
        let (clock, fx) = setup();
        let spawned = Arc::new(AtomicUsize::new(0));

        let fx_inner = fx.clone();
        let spawned_inner = spawned.clone();
        let mut ticks = 0;
        fx.schedule(move || {
            ticks += 1;
            if ticks == 2 {
                // Hand off to a successor from inside the sweep.
                fx_inner.schedule(countdown(3, spawned_inner.clone()));
                return false;
            }
            true
        });

        step(&clock, &fx);
        assert_eq!(spawned.load(Ordering::SeqCst), 1);
        assert_eq!(fx.active_count(), 1);
        assert!(fx.is_running());

        step(&clock, &fx);
        step(&clock, &fx);
        assert_eq!(spawned.load(Ordering::SeqCst), 3);
        assert!(!fx.is_running());
    }

    #[test]
    fn test_restarts_lazily_after_idle() {
        let (clock, fx) = setup();
        let calls = Arc::new(AtomicUsize::new(0));

        fx.schedule(countdown(2, calls.clone()));
        step(&clock, &fx);
        assert!(!fx.is_running());

        let again = Arc::new(AtomicUsize::new(0));
        fx.schedule(countdown(2, again.clone()));
        assert!(fx.is_running());
        assert_eq!(fx.time_until_next(), Some(DEFAULT_TICK_INTERVAL));
    }

    #[test]
    fn test_zero_interval_falls_back() {
        let fx = Fx::with_interval(Arc::new(ManualClock::new()), Duration::ZERO);
        assert_eq!(fx.interval(), DEFAULT_TICK_INTERVAL);
    }

    #[test]
    fn test_run_until_idle_with_system_clock() {
        let fx = Fx::with_interval(Arc::new(SystemClock::new()), Duration::from_millis(2));
        let calls = Arc::new(AtomicUsize::new(0));

        fx.schedule(countdown(4, calls.clone()));
        fx.run_until_idle();

        assert_eq!(calls.load(Ordering::SeqCst), 4);
        assert!(!fx.is_running());
    }

    #[test]
    fn test_shared_is_singleton() {
        assert!(Arc::ptr_eq(&Fx::shared(), &Fx::shared()));
    }
}

//! The public animation handle.

use std::fmt;
use std::sync::Arc;

use horizon_kinetic_core::{ElementQueue, Fx};

use crate::options::{AnimationDefaults, AnimationOptions};
use crate::run::AnimationRun;
use crate::style::StyleTarget;

/// Animates the style properties of one element.
///
/// Every handle owns an [`ElementQueue`], so successive [`animate`] calls on
/// the same handle run one after another, never interleaved. Two handles
/// built independently around the same element do *not* serialize against
/// each other; use [`with_queue`] (or clone the handle) to share a queue.
/// Handles sharing a queue can also [`stop`] each other's runs.
///
/// [`animate`]: Animation::animate
/// [`with_queue`]: Animation::with_queue
/// [`stop`]: Animation::stop
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use std::time::Duration;
/// use horizon_kinetic::{Animation, AnimationOptions, Fx, ManualClock, StyleElement};
///
/// let clock = Arc::new(ManualClock::new());
/// let fx = Arc::new(Fx::new(clock.clone()));
/// let element = Arc::new(StyleElement::new().with_style("left", "0px"));
///
/// Animation::with_fx(element.clone(), fx.clone())
///     .animate([("left", 100.0)], AnimationOptions::new().duration_ms(160))
///     .animate([("opacity", 0.0)], AnimationOptions::new().duration_ms(160));
///
/// while fx.is_running() {
///     clock.advance(Duration::from_millis(16));
///     fx.process_expired();
/// }
/// assert_eq!(element.style("left").as_deref(), Some("100px"));
/// assert_eq!(element.style("opacity").as_deref(), Some("0"));
/// ```
#[derive(Clone)]
pub struct Animation {
    element: Arc<dyn StyleTarget>,
    queue: ElementQueue,
    fx: Arc<Fx>,
    defaults: Arc<AnimationDefaults>,
}

impl Animation {
    /// Bind a fresh queue and the process-wide scheduler.
    pub fn new(element: Arc<dyn StyleTarget>) -> Self {
        Self::with_fx(element, Fx::shared())
    }

    /// Bind a fresh queue and the given scheduler.
    pub fn with_fx(element: Arc<dyn StyleTarget>, fx: Arc<Fx>) -> Self {
        Self::with_queue(element, fx, ElementQueue::new())
    }

    /// Bind an existing queue, serializing against every handle that
    /// shares it.
    pub fn with_queue(element: Arc<dyn StyleTarget>, fx: Arc<Fx>, queue: ElementQueue) -> Self {
        Self {
            element,
            queue,
            fx,
            defaults: Arc::new(AnimationDefaults::default()),
        }
    }

    /// Use `defaults` for options that later requests leave unset.
    pub fn with_defaults(mut self, defaults: AnimationDefaults) -> Self {
        self.defaults = Arc::new(defaults);
        self
    }

    /// Queue an animation of `properties` towards their target values.
    ///
    /// Starts right away if nothing is in flight on this handle's queue,
    /// otherwise after everything queued before it. Returns `self` for
    /// chaining.
    pub fn animate<I, K>(&self, properties: I, options: AnimationOptions) -> &Self
    where
        I: IntoIterator<Item = (K, f64)>,
        K: Into<String>,
    {
        let properties: Vec<(String, f64)> = properties
            .into_iter()
            .map(|(property, end)| (property.into(), end))
            .collect();

        let element = self.element.clone();
        let fx = self.fx.clone();
        let queue = self.queue.clone();
        let defaults = self.defaults.clone();

        self.queue.enqueue(move || {
            let run = AnimationRun::new(element, properties, options, &defaults, fx.clock());
            let handle = run.handle();
            queue.set_cancel_hook(move || handle.cancel());

            run.start(&fx, move || queue.advance());
        });

        self
    }

    /// Cancel the in-flight run on this handle's queue, whichever handle
    /// started it. Queued requests still run afterwards.
    ///
    /// Returns `false` if nothing was in flight.
    pub fn stop(&self) -> bool {
        self.queue.cancel_in_flight()
    }

    /// Drop queued requests that have not started.
    ///
    /// Returns the number dropped.
    pub fn clear_queue(&self) -> usize {
        self.queue.clear()
    }

    /// Check if a request is in flight on this handle's queue.
    pub fn is_animating(&self) -> bool {
        self.queue.is_running()
    }

    /// The animated element.
    pub fn element(&self) -> &Arc<dyn StyleTarget> {
        &self.element
    }

    /// This handle's queue.
    pub fn queue(&self) -> &ElementQueue {
        &self.queue
    }

    /// The scheduler driving this handle's runs.
    pub fn fx(&self) -> &Arc<Fx> {
        &self.fx
    }
}

impl fmt::Debug for Animation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Animation")
            .field("queue", &self.queue)
            .field("defaults", &self.defaults)
            .finish()
    }
}

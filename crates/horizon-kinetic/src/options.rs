//! Per-animation options and their defaults.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::easing::Easing;

/// Called on every written tick with the property name and its new value.
pub type StepCallback = Arc<dyn Fn(&str, f64) + Send + Sync + 'static>;

/// Called once when a run finishes.
pub type CompleteCallback = Box<dyn FnOnce() + Send + 'static>;

/// Values used for any option a caller leaves unset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnimationDefaults {
    /// Run duration in milliseconds.
    pub duration_ms: u64,
    /// Easing name.
    pub easing: String,
}

impl AnimationDefaults {
    /// Default duration of a run.
    pub const DURATION: Duration = Duration::from_millis(400);

    /// The default duration as a [`Duration`].
    pub fn duration(&self) -> Duration {
        Duration::from_millis(self.duration_ms)
    }
}

impl Default for AnimationDefaults {
    fn default() -> Self {
        Self {
            duration_ms: Self::DURATION.as_millis() as u64,
            easing: Easing::EaseInOut.name().to_owned(),
        }
    }
}

/// Options for one `animate` request.
///
/// Every field is optional. Unset fields are filled from
/// [`AnimationDefaults`] when the run starts; fields the caller set are never
/// overwritten.
///
/// ```
/// use horizon_kinetic::{AnimationDefaults, AnimationOptions};
/// use std::time::Duration;
///
/// let (resolved, on_complete) = AnimationOptions::new()
///     .duration(Duration::from_millis(250))
///     .resolve(&AnimationDefaults::default());
///
/// assert_eq!(resolved.duration, Duration::from_millis(250));
/// assert_eq!(resolved.easing, "easeInOut");
/// assert!(on_complete.is_none());
/// ```
#[derive(Default)]
pub struct AnimationOptions {
    duration: Option<Duration>,
    easing: Option<String>,
    on_step: Option<StepCallback>,
    on_complete: Option<CompleteCallback>,
}

impl AnimationOptions {
    /// Options with nothing set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the run duration. Zero finishes on the first tick.
    pub fn duration(mut self, duration: Duration) -> Self {
        self.duration = Some(duration);
        self
    }

    /// Set the run duration in milliseconds.
    pub fn duration_ms(self, millis: u64) -> Self {
        self.duration(Duration::from_millis(millis))
    }

    /// Set the easing by registry name. Unknown names animate linearly.
    pub fn easing(mut self, name: impl Into<String>) -> Self {
        self.easing = Some(name.into());
        self
    }

    /// Set the easing from a registered [`Easing`].
    pub fn easing_fn(self, easing: Easing) -> Self {
        self.easing(easing.name())
    }

    /// Observe every written value.
    pub fn on_step<F>(mut self, callback: F) -> Self
    where
        F: Fn(&str, f64) + Send + Sync + 'static,
    {
        self.on_step = Some(Arc::new(callback));
        self
    }

    /// Run `callback` once when the animation completes.
    pub fn on_complete<F>(mut self, callback: F) -> Self
    where
        F: FnOnce() + Send + 'static,
    {
        self.on_complete = Some(Box::new(callback));
        self
    }

    /// Fill unset fields from `defaults`.
    ///
    /// The completion callback is split off: it is consumed by the run,
    /// while the rest is shared read-only with every tween.
    pub fn resolve(self, defaults: &AnimationDefaults) -> (ResolvedOptions, Option<CompleteCallback>) {
        let resolved = ResolvedOptions {
            duration: self.duration.unwrap_or_else(|| defaults.duration()),
            easing: self.easing.unwrap_or_else(|| defaults.easing.clone()),
            on_step: self.on_step,
        };
        (resolved, self.on_complete)
    }
}

impl fmt::Debug for AnimationOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AnimationOptions")
            .field("duration", &self.duration)
            .field("easing", &self.easing)
            .field("on_step", &self.on_step.is_some())
            .field("on_complete", &self.on_complete.is_some())
            .finish()
    }
}

/// Options with every default applied.
#[derive(Clone)]
pub struct ResolvedOptions {
    /// Run duration. Zero finishes on the first tick.
    pub duration: Duration,
    /// Easing registry name; unknown names animate linearly.
    pub easing: String,
    /// Observer for every written value, if any.
    pub on_step: Option<StepCallback>,
}

impl fmt::Debug for ResolvedOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResolvedOptions")
            .field("duration", &self.duration)
            .field("easing", &self.easing)
            .field("on_step", &self.on_step.is_some())
            .finish()
    }
}

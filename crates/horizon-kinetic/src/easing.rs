//! Easing functions for smooth animations.
//!
//! Easing functions map a linear progress value (0.0 to 1.0) to a transformed
//! value that creates smoother, more natural-looking animations.
//!
//! Animations refer to easings by name. The registry is fixed: `"linear"` and
//! `"easeInOut"`. An unknown name is not an error; [`evaluate`] simply passes
//! the progress through unchanged.

use std::f64::consts::PI;
use std::fmt;

/// Available easing functions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Easing {
    /// Linear interpolation (no easing).
    Linear,
    /// Cosine ease-in-out (smooth start and end).
    #[default]
    EaseInOut,
}

impl Easing {
    /// Every registered easing.
    pub const ALL: [Easing; 2] = [Easing::Linear, Easing::EaseInOut];

    /// The registry name of this easing.
    pub fn name(self) -> &'static str {
        match self {
            Easing::Linear => "linear",
            Easing::EaseInOut => "easeInOut",
        }
    }

    /// Look up an easing by its registry name.
    pub fn from_name(name: &str) -> Option<Easing> {
        Self::ALL.into_iter().find(|easing| easing.name() == name)
    }
}

impl fmt::Display for Easing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Apply an easing function to a progress value.
///
/// Input is not clamped; values outside 0.0..=1.0 go straight through the
/// formula.
///
/// # Example
///
/// ```
/// use horizon_kinetic::easing::{ease, Easing};
///
/// assert_eq!(ease(Easing::Linear, 0.25), 0.25);
/// assert!((ease(Easing::EaseInOut, 0.5) - 0.5).abs() < 1e-12);
/// ```
#[inline]
pub fn ease(easing: Easing, t: f64) -> f64 {
    match easing {
        Easing::Linear => t,
        Easing::EaseInOut => ease_in_out_cos(t),
    }
}

/// Apply the easing registered under `name`, or identity if there is none.
#[inline]
pub fn evaluate(name: &str, t: f64) -> f64 {
    match Easing::from_name(name) {
        Some(easing) => ease(easing, t),
        None => t,
    }
}

#[inline]
fn ease_in_out_cos(t: f64) -> f64 {
    (1.0 - (t * PI).cos()) / 2.0
}

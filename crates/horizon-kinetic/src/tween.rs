//! Single-property interpolation.

use std::fmt;
use std::sync::Arc;

use horizon_kinetic_core::logging::targets;

use crate::easing;
use crate::options::ResolvedOptions;
use crate::style::{StyleTarget, Unit, parse_style_number, unit_for};

/// The evolving value of one numeric style property.
///
/// The start value is read from the element once, at construction. The end
/// value is fixed. Each [`advance`](Self::advance) computes the eased value
/// for a progress fraction and writes it back with the property's unit.
pub struct PropertyTween {
    element: Arc<dyn StyleTarget>,
    property: String,
    unit: Unit,
    start: f64,
    end: f64,
    current: f64,
    options: Arc<ResolvedOptions>,
}

impl PropertyTween {
    /// Capture the property's current rendered value as the start.
    ///
    /// A missing or unparsable value starts from `0.0`.
    pub fn new(
        element: Arc<dyn StyleTarget>,
        property: impl Into<String>,
        end: f64,
        options: Arc<ResolvedOptions>,
    ) -> Self {
        let property = property.into();
        let start = element
            .read_style(&property)
            .map(|raw| parse_style_number(&raw))
            .unwrap_or(0.0);
        let unit = unit_for(&property);

        Self {
            element,
            property,
            unit,
            start,
            end,
            current: start,
            options,
        }
    }

    /// Move to `progress` (0.0 to 1.0) and write the result.
    ///
    /// Returns `false` if the computed value was not finite, in which case
    /// nothing is written or reported for this tick.
    pub fn advance(&mut self, progress: f64) -> bool {
        let eased = easing::evaluate(&self.options.easing, progress);
        self.current = self.start + (self.end - self.start) * eased;

        if !self.current.is_finite() {
            tracing::warn!(
                target: targets::TWEEN,
                property = %self.property,
                value = self.current,
                "non-finite value, skipping write"
            );
            return false;
        }

        if let Some(on_step) = &self.options.on_step {
            on_step(&self.property, self.current);
        }
        let value = self.unit.format(self.current);
        tracing::trace!(target: targets::TWEEN, property = %self.property, %value, "write");
        self.element.write_style(&self.property, &value);
        true
    }

    /// The animated property.
    pub fn property(&self) -> &str {
        &self.property
    }

    /// The unit appended to written values.
    pub fn unit(&self) -> Unit {
        self.unit
    }

    /// Value captured at construction.
    pub fn start(&self) -> f64 {
        self.start
    }

    /// Target value.
    pub fn end(&self) -> f64 {
        self.end
    }

    /// Value computed by the latest advance.
    pub fn current(&self) -> f64 {
        self.current
    }
}

impl fmt::Debug for PropertyTween {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PropertyTween")
            .field("property", &self.property)
            .field("unit", &self.unit)
            .field("start", &self.start)
            .field("end", &self.end)
            .field("current", &self.current)
            .finish()
    }
}

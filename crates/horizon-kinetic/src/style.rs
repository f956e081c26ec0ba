//! Style collaborators: reading and writing numeric style properties.
//!
//! The engine never inspects an element directly. It asks a [`StyleTarget`]
//! for the raw rendered value of a property once per tween, and hands back a
//! formatted value with its unit on every tick.

use std::collections::HashMap;
use std::fmt;

use cssparser::{Parser, ParserInput, Token};
use parking_lot::Mutex;

/// Something whose style properties can be animated.
pub trait StyleTarget: Send + Sync {
    /// The raw rendered value of `property`, e.g. `"12px"` or `"0.5"`.
    ///
    /// `None` when the property has no value.
    fn read_style(&self, property: &str) -> Option<String>;

    /// Set `property` to `value`, which already carries its unit.
    fn write_style(&self, property: &str, value: &str);
}

/// Properties whose values are written without a length unit.
pub const UNITLESS_PROPERTIES: &[&str] = &[
    "columnCount",
    "fillOpacity",
    "fontWeight",
    "lineHeight",
    "opacity",
    "order",
    "orphans",
    "widows",
    "zIndex",
    "zoom",
];

/// Unit suffix appended to written values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Unit {
    /// Plain number.
    None,
    /// CSS pixels.
    #[default]
    Px,
}

impl Unit {
    /// The suffix text.
    pub fn suffix(self) -> &'static str {
        match self {
            Unit::None => "",
            Unit::Px => "px",
        }
    }

    /// Format `value` followed by this unit.
    pub fn format(self, value: f64) -> String {
        format!("{value}{}", self.suffix())
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.suffix())
    }
}

/// The unit used when writing `property`.
pub fn unit_for(property: &str) -> Unit {
    if UNITLESS_PROPERTIES.contains(&property) {
        Unit::None
    } else {
        Unit::Px
    }
}

/// Parse the leading number of a raw style value.
///
/// The value is tokenized as CSS; only a leading number, dimension or
/// percentage counts, and a unit after it is ignored. Anything else, and
/// non-finite results, read as `0.0`.
///
/// ```
/// use horizon_kinetic::style::parse_style_number;
///
/// assert_eq!(parse_style_number("12.5px"), 12.5);
/// assert_eq!(parse_style_number("-3em"), -3.0);
/// assert_eq!(parse_style_number("auto"), 0.0);
/// ```
pub fn parse_style_number(raw: &str) -> f64 {
    let mut input = ParserInput::new(raw);
    let mut parser = Parser::new(&mut input);
    parser.skip_whitespace();

    let start = parser.position();
    let token = match parser.next() {
        Ok(token) => token.clone(),
        Err(_) => return 0.0,
    };

    // cssparser hands back f32; reparse the source text to keep f64 precision.
    let (value, suffix_len) = match token {
        Token::Number { value, .. } => (value, 0),
        Token::Dimension { value, ref unit, .. } => (value, unit.len()),
        Token::Percentage { unit_value, .. } => (unit_value * 100.0, 1),
        _ => return 0.0,
    };
    let text = parser.slice_from(start);

    let number = text
        .get(..text.len().saturating_sub(suffix_len))
        .and_then(|number| number.parse::<f64>().ok())
        .unwrap_or(f64::from(value));
    if number.is_finite() { number } else { 0.0 }
}

/// An in-memory element.
///
/// Holds a property map and records every write, which makes it handy for
/// headless hosts, demos and tests.
///
/// ```
/// use horizon_kinetic::style::{StyleElement, StyleTarget};
///
/// let element = StyleElement::new().with_style("left", "10px");
/// element.write_style("left", "20px");
/// assert_eq!(element.style("left").as_deref(), Some("20px"));
/// assert_eq!(element.writes().len(), 1);
/// ```
#[derive(Default)]
pub struct StyleElement {
    styles: Mutex<HashMap<String, String>>,
    writes: Mutex<Vec<(String, String)>>,
}

impl StyleElement {
    /// Create an element with no styles.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style initial value for a property.
    pub fn with_style(self, property: impl Into<String>, value: impl Into<String>) -> Self {
        self.styles.lock().insert(property.into(), value.into());
        self
    }

    /// Current value of a property.
    pub fn style(&self, property: &str) -> Option<String> {
        self.styles.lock().get(property).cloned()
    }

    /// Every write so far, oldest first.
    pub fn writes(&self) -> Vec<(String, String)> {
        self.writes.lock().clone()
    }

    /// Values written to one property, oldest first.
    pub fn writes_to(&self, property: &str) -> Vec<String> {
        self.writes
            .lock()
            .iter()
            .filter(|(p, _)| p == property)
            .map(|(_, v)| v.clone())
            .collect()
    }

    /// Forget the write log. Current styles are kept.
    pub fn clear_writes(&self) {
        self.writes.lock().clear();
    }
}

impl StyleTarget for StyleElement {
    fn read_style(&self, property: &str) -> Option<String> {
        self.style(property)
    }

    fn write_style(&self, property: &str, value: &str) {
        self.styles
            .lock()
            .insert(property.to_owned(), value.to_owned());
        self.writes
            .lock()
            .push((property.to_owned(), value.to_owned()));
    }
}

impl fmt::Debug for StyleElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StyleElement")
            .field("styles", &*self.styles.lock())
            .field("writes", &self.writes.lock().len())
            .finish()
    }
}

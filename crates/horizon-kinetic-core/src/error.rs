//! Error types for Horizon Kinetic.
//!
//! Animation anomalies (unparsable styles, unknown easings, non-finite
//! values) are absorbed where they happen and never show up here. These
//! errors cover misuse of the timing primitives themselves.

use std::fmt;

/// The main error type for Horizon Kinetic core operations.
#[derive(Debug)]
pub enum KineticError {
    /// Timer-related error.
    Timer(TimerError),
}

impl fmt::Display for KineticError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Timer(err) => write!(f, "Timer error: {err}"),
        }
    }
}

impl std::error::Error for KineticError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Timer(err) => Some(err),
        }
    }
}

/// Timer-specific errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TimerError {
    /// The timer ID is invalid or has already been stopped.
    InvalidTimerId,
    /// A repeating timer was requested with a zero interval.
    ZeroInterval,
}

impl fmt::Display for TimerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidTimerId => write!(f, "Invalid or expired timer ID"),
            Self::ZeroInterval => write!(f, "Repeating timer interval must be non-zero"),
        }
    }
}

impl std::error::Error for TimerError {}

impl From<TimerError> for KineticError {
    fn from(err: TimerError) -> Self {
        Self::Timer(err)
    }
}

/// A specialized Result type for Horizon Kinetic core operations.
pub type Result<T> = std::result::Result<T, KineticError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timer_error_display() {
        let err: KineticError = TimerError::InvalidTimerId.into();
        assert_eq!(err.to_string(), "Timer error: Invalid or expired timer ID");
        assert!(std::error::Error::source(&err).is_some());
    }
}

//! Engine configuration.
//!
//! The engine reads a small TOML document. Every key is optional:
//!
//! ```toml
//! tick_interval_ms = 16
//!
//! [defaults]
//! duration_ms = 400
//! easing = "easeInOut"
//! ```

use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use horizon_kinetic_core::logging::targets;
use horizon_kinetic_core::{Clock, DEFAULT_TICK_INTERVAL, Fx};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::options::AnimationDefaults;

/// Engine-wide settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Period of the shared clock in milliseconds.
    pub tick_interval_ms: u64,
    /// Fallbacks for options a caller leaves unset.
    pub defaults: AnimationDefaults,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            tick_interval_ms: DEFAULT_TICK_INTERVAL.as_millis() as u64,
            defaults: AnimationDefaults::default(),
        }
    }
}

impl EngineConfig {
    /// Parse and validate a TOML document.
    pub fn from_toml_str(source: &str) -> Result<Self> {
        let config: EngineConfig = toml::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
        let config = Self::from_toml_str(&source)?;
        tracing::debug!(target: targets::CONFIG, path = %path.display(), ?config, "engine configuration loaded");
        Ok(config)
    }

    /// Reject values the engine cannot run with.
    pub fn validate(&self) -> Result<()> {
        if self.tick_interval_ms == 0 {
            return Err(Error::invalid_value(
                "tick_interval_ms",
                "must be greater than zero",
            ));
        }
        Ok(())
    }

    /// Period of the shared clock.
    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }

    /// Build a scheduler ticking at the configured interval.
    pub fn build_fx(&self, clock: Arc<dyn Clock>) -> Fx {
        Fx::with_interval(clock, self.tick_interval())
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use horizon_kinetic_core::ManualClock;

    use super::*;

    #[test]
    fn test_empty_document_is_default() {
        let config = EngineConfig::from_toml_str("").unwrap();
        assert_eq!(config, EngineConfig::default());
        assert_eq!(config.tick_interval(), Duration::from_millis(16));
        assert_eq!(config.defaults.duration(), Duration::from_millis(400));
    }

    #[test]
    fn test_partial_document() {
        let config = EngineConfig::from_toml_str(
            r#"
            [defaults]
            easing = "linear"
            "#,
        )
        .unwrap();
        assert_eq!(config.tick_interval_ms, 16);
        assert_eq!(config.defaults.easing, "linear");
        assert_eq!(config.defaults.duration_ms, 400);
    }

    #[test]
    fn test_zero_interval_rejected() {
        let err = EngineConfig::from_toml_str("tick_interval_ms = 0").unwrap_err();
        assert!(matches!(err, Error::InvalidValue { .. }));
    }

    #[test]
    fn test_malformed_document() {
        let err = EngineConfig::from_toml_str("tick_interval_ms = \"fast\"").unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "tick_interval_ms = 8").unwrap();
        writeln!(file, "[defaults]").unwrap();
        writeln!(file, "duration_ms = 120").unwrap();

        let config = EngineConfig::load(file.path()).unwrap();
        assert_eq!(config.tick_interval(), Duration::from_millis(8));
        assert_eq!(config.defaults.duration(), Duration::from_millis(120));

        let fx = config.build_fx(Arc::new(ManualClock::new()));
        assert_eq!(fx.interval(), Duration::from_millis(8));
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = EngineConfig::load(dir.path().join("absent.toml")).unwrap_err();
        assert!(matches!(err, Error::Io { .. }));
    }
}

//! Session configuration.
//!
//! Every field has a default, so an empty file (or none at all) is valid.
//! Values can be layered from a TOML file and `PRICE_OVERLAY__*` environment
//! variables, e.g. `PRICE_OVERLAY__INTERACTION__DRAG_THRESHOLD_RATIO=0.01`.

use crate::error::EngineError;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Environment variable prefix for configuration overrides.
pub const ENV_PREFIX: &str = "PRICE_OVERLAY";

/// Pointer interaction tuning.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InteractionConfig {
    /// Grab distance as a share of the pointer's price (0.005 = 0.5%).
    pub drag_threshold_ratio: f64,
    /// Fractional digits kept in emitted prices.
    pub price_decimals: u32,
}

impl Default for InteractionConfig {
    fn default() -> Self {
        Self {
            drag_threshold_ratio: 0.005,
            price_decimals: 4,
        }
    }
}

/// Configuration for a chart session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Fixed surface height in pixels. `None` follows the container.
    pub height: Option<u32>,
    /// Whether to fit the visible range after every candle update.
    pub fit_content_on_data: bool,
    /// Pointer interaction tuning.
    pub interaction: InteractionConfig,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            height: None,
            fit_content_on_data: true,
            interaction: InteractionConfig::default(),
        }
    }
}

impl SessionConfig {
    /// Creates a config with the given fixed height.
    #[must_use]
    pub fn with_height(mut self, height: u32) -> Self {
        self.height = Some(height);
        self
    }

    /// Loads the config from an optional TOML file and the environment.
    ///
    /// # Errors
    /// Returns an error if a source cannot be parsed or a value is out of range.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, EngineError> {
        let settings = ::config::Config::builder()
            .add_source(::config::File::from(path.as_ref()).required(false))
            .add_source(
                ::config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("__")
                    .separator("__"),
            )
            .build()?;

        let config = settings.try_deserialize::<SessionConfig>()?;
        config.validate()?;
        Ok(config)
    }

    /// Parses a TOML document, ignoring the environment.
    ///
    /// # Errors
    /// Returns an error if the document is malformed or a value is out of range.
    pub fn from_toml_str(toml: &str) -> Result<Self, EngineError> {
        let settings = ::config::Config::builder()
            .add_source(::config::File::from_str(toml, ::config::FileFormat::Toml))
            .build()?;

        let config = settings.try_deserialize::<SessionConfig>()?;
        config.validate()?;
        Ok(config)
    }

    /// Checks value ranges.
    ///
    /// # Errors
    /// Returns [`EngineError::InvalidConfig`] describing the first bad value.
    pub fn validate(&self) -> Result<(), EngineError> {
        let ratio = self.interaction.drag_threshold_ratio;
        if !ratio.is_finite() || ratio <= 0.0 {
            return Err(EngineError::InvalidConfig(format!(
                "drag_threshold_ratio must be positive, got {ratio}"
            )));
        }
        if self.interaction.price_decimals > 12 {
            return Err(EngineError::InvalidConfig(format!(
                "price_decimals must be at most 12, got {}",
                self.interaction.price_decimals
            )));
        }
        if self.height == Some(0) {
            return Err(EngineError::InvalidConfig(
                "height must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = SessionConfig::default();
        assert_eq!(config.height, None);
        assert!(config.fit_content_on_data);
        assert_eq!(config.interaction.drag_threshold_ratio, 0.005);
        assert_eq!(config.interaction.price_decimals, 4);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_from_toml_partial() {
        let config = SessionConfig::from_toml_str(
            r#"
            height = 480

            [interaction]
            drag_threshold_ratio = 0.01
            "#,
        )
        .unwrap();

        assert_eq!(config.height, Some(480));
        assert_eq!(config.interaction.drag_threshold_ratio, 0.01);
        assert_eq!(config.interaction.price_decimals, 4);
    }

    #[test]
    fn test_rejects_bad_ratio() {
        let result = SessionConfig::from_toml_str(
            r#"
            [interaction]
            drag_threshold_ratio = -1.0
            "#,
        );
        assert!(matches!(result, Err(EngineError::InvalidConfig(_))));
    }

    #[test]
    #[serial]
    fn test_load_from_file() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(file, "fit_content_on_data = false").unwrap();
        writeln!(file, "[interaction]").unwrap();
        writeln!(file, "price_decimals = 2").unwrap();

        let config = SessionConfig::load(file.path()).unwrap();
        assert!(!config.fit_content_on_data);
        assert_eq!(config.interaction.price_decimals, 2);
    }

    #[test]
    #[serial]
    fn test_load_missing_file_uses_defaults() {
        let config = SessionConfig::load("does-not-exist.toml").unwrap();
        assert_eq!(config.interaction, InteractionConfig::default());
    }

    #[test]
    #[serial]
    fn test_environment_overrides_file() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(file, "height = 480").unwrap();
        writeln!(file, "[interaction]").unwrap();
        writeln!(file, "drag_threshold_ratio = 0.002").unwrap();
        writeln!(file, "price_decimals = 2").unwrap();

        // SAFETY: env access is serialized across the tests in this module.
        unsafe {
            std::env::set_var("PRICE_OVERLAY__INTERACTION__DRAG_THRESHOLD_RATIO", "0.01");
            std::env::set_var("PRICE_OVERLAY__HEIGHT", "320");
        }
        let result = SessionConfig::load(file.path());
        unsafe {
            std::env::remove_var("PRICE_OVERLAY__INTERACTION__DRAG_THRESHOLD_RATIO");
            std::env::remove_var("PRICE_OVERLAY__HEIGHT");
        }

        let config = result.unwrap();
        assert_eq!(config.height, Some(320));
        assert_eq!(config.interaction.drag_threshold_ratio, 0.01);
        assert_eq!(config.interaction.price_decimals, 2);
    }
}

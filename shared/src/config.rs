use serde::Deserialize;

use crate::image::MAX_DISPLAY_WIDTH;
use crate::pixelate::DEFAULT_PIXEL_SIZE;

#[derive(Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct SurfaceConfig {
    pub max_display_width: f64,
    pub pixel_size: u32,
    pub arrow_pointer: f64,
    pub handle_size: f64,
    pub min_scale: f64,
}

impl Default for SurfaceConfig {
    fn default() -> Self {
        Self {
            max_display_width: MAX_DISPLAY_WIDTH,
            pixel_size: DEFAULT_PIXEL_SIZE,
            arrow_pointer: 15.0,
            handle_size: 10.0,
            min_scale: 0.01,
        }
    }
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidJson(String),
    InvalidValue(&'static str),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::InvalidJson(message) => write!(f, "invalid config JSON: {message}"),
            ConfigError::InvalidValue(field) => write!(f, "invalid config value for {field}"),
        }
    }
}

impl std::error::Error for ConfigError {}

impl SurfaceConfig {
    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        if text.trim().is_empty() {
            return Ok(Self::default());
        }
        let config: SurfaceConfig = serde_json::from_str(text)
            .map_err(|err| ConfigError::InvalidJson(err.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if !(self.max_display_width.is_finite() && self.max_display_width > 0.0) {
            return Err(ConfigError::InvalidValue("max_display_width"));
        }
        if self.pixel_size == 0 {
            return Err(ConfigError::InvalidValue("pixel_size"));
        }
        if !(self.arrow_pointer.is_finite() && self.arrow_pointer >= 0.0) {
            return Err(ConfigError::InvalidValue("arrow_pointer"));
        }
        if !(self.handle_size.is_finite() && self.handle_size > 0.0) {
            return Err(ConfigError::InvalidValue("handle_size"));
        }
        if !(self.min_scale.is_finite() && self.min_scale > 0.0) {
            return Err(ConfigError::InvalidValue("min_scale"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_fields_use_defaults() {
        let config = SurfaceConfig::from_json(r#"{"pixel_size": 12}"#).unwrap();
        assert_eq!(config.pixel_size, 12);
        assert_eq!(config.max_display_width, 600.0);
        assert_eq!(config.arrow_pointer, 15.0);
    }

    #[test]
    fn blank_text_is_default_config() {
        assert_eq!(SurfaceConfig::from_json("  ").unwrap(), SurfaceConfig::default());
    }

    #[test]
    fn malformed_json_is_an_error() {
        assert!(matches!(
            SurfaceConfig::from_json("{pixel_size:"),
            Err(ConfigError::InvalidJson(_))
        ));
    }

    #[test]
    fn zero_pixel_size_is_rejected() {
        assert!(matches!(
            SurfaceConfig::from_json(r#"{"pixel_size": 0}"#),
            Err(ConfigError::InvalidValue("pixel_size"))
        ));
    }
}

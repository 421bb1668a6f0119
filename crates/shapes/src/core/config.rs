//! # Session Configuration
//!
//! Configuration for a drawing session: text layout limits, the malformed
//! UTF-8 policy and the SVG backend's canvas. Every struct has a `Default`
//! matching classic libshapes behaviour and can be loaded from TOML or RON
//! through [`Config`].
//!
//! ```toml
//! [text]
//! glyph_capacity = 500
//! malformed_utf8 = "truncate"
//!
//! [svg]
//! width = 800
//! height = 480
//! background = "white"
//! ```

use serde::{Serialize, Deserialize};

pub use crate::config::{Config, ConfigError};
use crate::render::Color;

/// Glyph capacity used when nothing else is configured
pub const DEFAULT_GLYPH_CAPACITY: usize = 500;

/// What the UTF-8 decoder does when it meets a byte it cannot decode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MalformedUtf8Policy {
    /// Stop decoding; the rest of the string is neither measured nor drawn
    #[default]
    Truncate,
    /// Skip the offending byte and resume at the next one
    Resync,
}

/// Text layout configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TextConfig {
    /// Maximum number of glyphs a font table may declare
    pub glyph_capacity: usize,
    /// Malformed UTF-8 handling
    pub malformed_utf8: MalformedUtf8Policy,
}

impl Default for TextConfig {
    fn default() -> Self {
        Self {
            glyph_capacity: DEFAULT_GLYPH_CAPACITY,
            malformed_utf8: MalformedUtf8Policy::Truncate,
        }
    }
}

impl TextConfig {
    /// Set the glyph capacity
    pub fn with_glyph_capacity(mut self, capacity: usize) -> Self {
        self.glyph_capacity = capacity;
        self
    }

    /// Set the malformed UTF-8 policy
    pub fn with_malformed_utf8(mut self, policy: MalformedUtf8Policy) -> Self {
        self.malformed_utf8 = policy;
        self
    }
}

/// SVG output backend configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SvgConfig {
    /// Canvas width in user units
    pub width: u32,
    /// Canvas height in user units
    pub height: u32,
    /// Named background color, or `None` for a transparent canvas
    pub background: Option<String>,
}

impl Default for SvgConfig {
    fn default() -> Self {
        Self {
            width: 800,
            height: 480,
            background: Some("white".to_string()),
        }
    }
}

impl SvgConfig {
    /// Resolve the background color name
    pub fn background_color(&self) -> Result<Option<Color>, ConfigError> {
        match &self.background {
            None => Ok(None),
            Some(name) => Color::named(name)
                .map(Some)
                .ok_or_else(|| ConfigError::Invalid(format!("unknown background color '{name}'"))),
        }
    }
}

/// Top-level configuration for a graphics session
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Text layout settings
    pub text: TextConfig,
    /// SVG backend settings
    pub svg: SvgConfig,
}

impl Config for SessionConfig {}

impl SessionConfig {
    /// Check values that parse but cannot be used
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.text.glyph_capacity == 0 {
            return Err(ConfigError::Invalid("text.glyph_capacity must be at least 1".to_string()));
        }
        if self.svg.width == 0 || self.svg.height == 0 {
            return Err(ConfigError::Invalid(format!(
                "svg canvas must be non-empty, got {}x{}",
                self.svg.width, self.svg.height
            )));
        }
        self.svg.background_color()?;
        Ok(())
    }

    /// Load from file and validate
    pub fn load_validated(path: impl AsRef<std::path::Path>) -> Result<Self, ConfigError> {
        let config = Self::load_from_file(path)?;
        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_path(name: &str) -> std::path::PathBuf {
        std::env::temp_dir().join(format!("shapes-config-{}-{}", std::process::id(), name))
    }

    #[test]
    fn test_defaults_match_libshapes() {
        let config = SessionConfig::default();
        assert_eq!(config.text.glyph_capacity, 500);
        assert_eq!(config.text.malformed_utf8, MalformedUtf8Policy::Truncate);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_zero_capacity_is_rejected() {
        let mut config = SessionConfig::default();
        config.text.glyph_capacity = 0;
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_unknown_background_is_rejected() {
        let mut config = SessionConfig::default();
        config.svg.background = Some("notacolor".to_string());
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_partial_toml_fills_defaults() {
        let config: SessionConfig = toml::from_str(
            "[text]\nmalformed_utf8 = \"resync\"\n",
        )
        .unwrap();

        assert_eq!(config.text.malformed_utf8, MalformedUtf8Policy::Resync);
        assert_eq!(config.text.glyph_capacity, DEFAULT_GLYPH_CAPACITY);
        assert_eq!(config.svg, SvgConfig::default());
    }

    #[test]
    fn test_toml_file_round_trip() {
        let path = temp_path("session.toml");
        let config = SessionConfig {
            text: TextConfig::default().with_glyph_capacity(256),
            svg: SvgConfig { width: 320, height: 240, background: Some("black".to_string()) },
        };

        config.save_to_file(&path).unwrap();
        let loaded = SessionConfig::load_validated(&path).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(loaded, config);
    }

    #[test]
    fn test_ron_file_round_trip() {
        let path = temp_path("session.ron");
        let config = SessionConfig {
            text: TextConfig::default().with_malformed_utf8(MalformedUtf8Policy::Resync),
            ..SessionConfig::default()
        };

        config.save_to_file(&path).unwrap();
        let loaded = SessionConfig::load_from_file(&path).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(loaded, config);
    }

    #[test]
    fn test_unsupported_extension() {
        let path = temp_path("present.json");
        std::fs::write(&path, "{}").unwrap();
        let result = SessionConfig::load_from_file(&path);
        std::fs::remove_file(&path).ok();
        assert!(matches!(result, Err(ConfigError::UnsupportedFormat(_))));
    }
}

//! # Core Module
//!
//! Shared configuration for the drawing session, text layout, and the SVG
//! output backend.

pub mod config;

pub use config::{SessionConfig, TextConfig, SvgConfig, MalformedUtf8Policy, DEFAULT_GLYPH_CAPACITY};
pub use crate::config::{Config, ConfigError};

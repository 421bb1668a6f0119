//! # Shapes
//!
//! Vector-font text on top of a retained-path 2D drawing API.
//!
//! ## Features
//!
//! - **Font Loading**: compact glyph path tables become backend paths
//! - **Text Layout**: variable-width measuring and drawing, with centered and
//!   right-aligned variants
//! - **Backends**: a headless recorder for tests and an SVG writer
//! - **Configuration**: TOML or RON session settings
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use shapes::prelude::*;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = SessionConfig::default();
//!     let backend = SvgBackend::from_config(&config.svg)?;
//!     let mut session = GraphicsSession::new(backend, config)?;
//!     session.load_font(Typeface::Sans, &fonts::block_sans())?;
//!
//!     session.set_fill(Color::named("steelblue").unwrap_or(Color::BLACK));
//!     session.text_mid(Typeface::Sans, "HELLO", 400.0, 240.0, 48.0)?;
//!     session.backend().save("hello.svg")?;
//!     session.finish()?;
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::similar_names, clippy::too_many_arguments)]

pub mod core;
pub mod config;
pub mod foundation;
pub mod render;
pub mod fonts;

mod session;

pub use session::{GraphicsSession, SessionError, SessionResult, Typeface};

/// Common imports for library users
pub mod prelude {
    pub use crate::{
        GraphicsSession, SessionError, Typeface,
        fonts,
        core::{MalformedUtf8Policy, SessionConfig, SvgConfig, TextConfig},
        config::Config,
        foundation::math::{Mat3, Mat3Ext},
        render::{
            Color, Font, GlyphPathTable, PaintMode, RecordingBackend, RenderBackend, SvgBackend,
            TextLayout, TextRenderer,
        },
    };
}

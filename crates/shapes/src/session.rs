//! Graphics session
//!
//! A [`GraphicsSession`] owns a backend and the typefaces loaded into it,
//! and tracks the paint state text drawing depends on. Fonts are unloaded
//! when the session finishes or is dropped, always before the backend
//! itself goes away.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::core::{ConfigError, SessionConfig};
use crate::foundation::math::{Mat3, Mat3Ext};
use crate::render::{
    Color, Font, FontError, GlyphPathTable, PaintMode, RenderBackend, RenderError, TextRenderer,
};

/// Typeface slots a session can hold
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Typeface {
    /// Proportional sans-serif
    Sans,
    /// Proportional serif
    Serif,
    /// Monospaced
    Mono,
}

/// Session errors
#[derive(Error, Debug)]
pub enum SessionError {
    /// Drawing or measuring with a typeface that was never loaded
    #[error("no font loaded for typeface {0:?}")]
    FontNotLoaded(Typeface),

    /// Font loading or unloading failed
    #[error("font error: {0}")]
    Font(#[from] FontError),

    /// Backend rejected a drawing operation
    #[error("render error: {0}")]
    Render(#[from] RenderError),

    /// Configuration was unusable
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
}

/// Result type for session operations
pub type SessionResult<T> = Result<T, SessionError>;

/// Drawing context over a backend
pub struct GraphicsSession<'f, B: RenderBackend> {
    backend: B,
    fonts: HashMap<Typeface, Font<'f>>,
    config: SessionConfig,
    renderer: TextRenderer,
    fill: Color,
    stroke: Color,
    stroke_width: f32,
}

impl<'f, B: RenderBackend> GraphicsSession<'f, B> {
    /// Create a session after validating `config`
    pub fn new(backend: B, config: SessionConfig) -> SessionResult<Self> {
        config.validate()?;
        let renderer = TextRenderer::new(config.text.malformed_utf8);
        let mut session = Self {
            backend,
            fonts: HashMap::new(),
            config,
            renderer,
            fill: Color::BLACK,
            stroke: Color::BLACK,
            stroke_width: 0.0,
        };
        session.begin();
        log::debug!(
            "Graphics session ready (glyph capacity {}, malformed UTF-8 {:?})",
            session.config.text.glyph_capacity,
            session.config.text.malformed_utf8
        );
        Ok(session)
    }

    /// Session configuration
    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// Backend being drawn into
    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Mutable access to the backend
    pub fn backend_mut(&mut self) -> &mut B {
        &mut self.backend
    }

    /// Load `table` into the `typeface` slot, replacing any font already there.
    ///
    /// The old font stays in place if loading the new one fails.
    pub fn load_font(&mut self, typeface: Typeface, table: &GlyphPathTable<'f>) -> SessionResult<()> {
        let font = Font::load(table, &mut self.backend, self.config.text.glyph_capacity)?;
        log::info!("Loaded {:?} typeface: {} glyphs", typeface, font.glyph_count());
        if let Some(old) = self.fonts.insert(typeface, font) {
            old.unload(&mut self.backend)?;
            log::debug!("Replaced previous {typeface:?} typeface");
        }
        Ok(())
    }

    /// Unload the font in `typeface`; returns whether one was loaded
    pub fn unload_font(&mut self, typeface: Typeface) -> SessionResult<bool> {
        match self.fonts.remove(&typeface) {
            Some(font) => {
                font.unload(&mut self.backend)?;
                log::debug!("Unloaded {typeface:?} typeface");
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Loaded font for a typeface
    pub fn font(&self, typeface: Typeface) -> Option<&Font<'f>> {
        self.fonts.get(&typeface)
    }

    fn loaded(&self, typeface: Typeface) -> SessionResult<&Font<'f>> {
        self.fonts.get(&typeface).ok_or(SessionError::FontNotLoaded(typeface))
    }

    /// Start a picture: identity transform, black fill and stroke, zero stroke width
    pub fn begin(&mut self) {
        self.backend.load_identity();
        self.set_fill(Color::BLACK);
        self.set_stroke(Color::BLACK);
        self.set_stroke_width(0.0);
    }

    /// Current fill color
    pub fn fill(&self) -> Color {
        self.fill
    }

    /// Set the fill color
    pub fn set_fill(&mut self, color: Color) {
        self.fill = color;
        self.backend.set_paint(PaintMode::FILL, color);
    }

    /// Current stroke color
    pub fn stroke(&self) -> Color {
        self.stroke
    }

    /// Set the stroke color
    pub fn set_stroke(&mut self, color: Color) {
        self.stroke = color;
        self.backend.set_paint(PaintMode::STROKE, color);
    }

    /// Current stroke width
    pub fn stroke_width(&self) -> f32 {
        self.stroke_width
    }

    /// Set the stroke width
    pub fn set_stroke_width(&mut self, width: f32) {
        self.stroke_width = width;
        self.backend.set_stroke_width(width);
    }

    /// Move the coordinate system origin
    pub fn translate(&mut self, x: f32, y: f32) {
        self.backend.multiply_transform(&Mat3::translation(x, y));
    }

    /// Rotate the coordinate system counter-clockwise by `degrees`
    pub fn rotate(&mut self, degrees: f32) {
        self.backend.multiply_transform(&Mat3::rotation_degrees(degrees));
    }

    /// Scale the coordinate system
    pub fn scale(&mut self, x: f32, y: f32) {
        self.backend.multiply_transform(&Mat3::scaling(x, y));
    }

    /// Shear the coordinate system by factors `x` and `y`
    pub fn shear(&mut self, x: f32, y: f32) {
        self.backend.multiply_transform(&Mat3::shear(x, y));
    }

    /// Draw `text` starting at `(x, y)`; returns the width drawn
    pub fn text(&mut self, typeface: Typeface, text: impl AsRef<[u8]>, x: f32, y: f32, point_size: f32) -> SessionResult<f32> {
        let font = self.fonts.get(&typeface).ok_or(SessionError::FontNotLoaded(typeface))?;
        Ok(self.renderer.draw(&mut self.backend, font, text, x, y, point_size)?)
    }

    /// Draw `text` centered on `x`
    pub fn text_mid(&mut self, typeface: Typeface, text: impl AsRef<[u8]>, x: f32, y: f32, point_size: f32) -> SessionResult<f32> {
        let font = self.fonts.get(&typeface).ok_or(SessionError::FontNotLoaded(typeface))?;
        Ok(self.renderer.draw_centered(&mut self.backend, font, text, x, y, point_size)?)
    }

    /// Draw `text` so it ends at `x`
    pub fn text_end(&mut self, typeface: Typeface, text: impl AsRef<[u8]>, x: f32, y: f32, point_size: f32) -> SessionResult<f32> {
        let font = self.fonts.get(&typeface).ok_or(SessionError::FontNotLoaded(typeface))?;
        Ok(self.renderer.draw_right_aligned(&mut self.backend, font, text, x, y, point_size)?)
    }

    /// Draw `text` in `fill`, then put the session fill back
    pub fn text_with_fill(
        &mut self,
        typeface: Typeface,
        text: impl AsRef<[u8]>,
        x: f32,
        y: f32,
        point_size: f32,
        fill: Color,
    ) -> SessionResult<f32> {
        let font = self.fonts.get(&typeface).ok_or(SessionError::FontNotLoaded(typeface))?;
        let result = self
            .renderer
            .draw_with_fill(&mut self.backend, font, text, x, y, point_size, fill);
        self.backend.set_paint(PaintMode::FILL, self.fill);
        Ok(result?)
    }

    /// Width of `text` without drawing
    pub fn text_width(&self, typeface: Typeface, text: impl AsRef<[u8]>, point_size: f32) -> SessionResult<f32> {
        Ok(self.renderer.measure(text, self.loaded(typeface)?, point_size))
    }

    /// Line height of a typeface
    pub fn text_height(&self, typeface: Typeface, point_size: f32) -> SessionResult<f32> {
        Ok(self.loaded(typeface)?.height(point_size))
    }

    /// Depth below the baseline of a typeface
    pub fn text_depth(&self, typeface: Typeface, point_size: f32) -> SessionResult<f32> {
        Ok(self.loaded(typeface)?.depth(point_size))
    }

    /// Unload every font, reporting the first failure
    pub fn finish(mut self) -> SessionResult<()> {
        self.unload_all()
    }

    fn unload_all(&mut self) -> SessionResult<()> {
        let mut first_error = None;
        for (typeface, font) in self.fonts.drain() {
            if let Err(e) = font.unload(&mut self.backend) {
                log::warn!("Failed to unload {typeface:?} typeface: {e}");
                first_error.get_or_insert(e);
            }
        }
        first_error.map_or(Ok(()), |e| Err(e.into()))
    }
}

impl<B: RenderBackend> Drop for GraphicsSession<'_, B> {
    fn drop(&mut self) {
        if !self.fonts.is_empty() {
            log::debug!("Unloading {} typefaces on session drop", self.fonts.len());
            let _ = self.unload_all();
        }
    }
}

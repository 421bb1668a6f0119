//! Text rendering system
//!
//! Vector font loading, UTF-8 decoding, text layout, and text drawing.

pub mod glyph_table;
pub mod font;
pub mod utf8;
pub mod text_layout;
pub mod text_renderer;

pub use glyph_table::*;
pub use font::*;
pub use utf8::*;
pub use text_layout::*;
pub use text_renderer::*;

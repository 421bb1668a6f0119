//! Built-in glyph tables

pub mod block;

pub use block::block_sans;

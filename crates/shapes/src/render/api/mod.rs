//! Public rendering API
//!
//! The backend trait and the handle and flag types that cross it.

pub mod render_backend;

pub use render_backend::*;

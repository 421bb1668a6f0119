//! Foundation module - Core utilities and types
//!
//! This module provides fundamental utilities used throughout the crate:
//! - 2D affine math on top of nalgebra
//! - Versioned handle maps for backend resources
//! - Logging utilities

pub mod math;
pub mod collections;
pub mod logging;

//! Rendering systems built on the backend API

pub mod text;

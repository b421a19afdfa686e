//! Image processing.
//!
//! # Modules
//!
//! - [`svg`]: SVG to PNG rasterization backends

pub mod svg;

//! SVG rasterization.
//!
//! The queue drains through a [`Rasterizer`]; which one is chosen by
//! `convert.backend` in `svgres.toml`.

mod convert;

pub use convert::{Rasterizer, rasterizer_for};

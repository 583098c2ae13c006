//! Coordinate and color types shared by the camera and the renderer.
//!
//! Canvas space is physical pixels. Object space (what the camera frames) is
//! a unit-height rectangle centered on the origin, +Y up.

mod color;
mod viewport;

pub use color::ColorRgba;
pub use viewport::Viewport;

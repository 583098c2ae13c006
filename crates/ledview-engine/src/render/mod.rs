//! GPU rendering seam.
//!
//! [`RenderContext`] is what the scene controller draws through and
//! [`DrawSurface`] is what the host hands in. The wgpu implementation lives in
//! `device`; the point pipeline it builds lives here.
//!
//! Convention:
//! - one instance per LED, positions and colors in separate per-instance
//!   vertex buffers
//! - the vertex stage expands each instance into a fixed-pixel-size quad
//!   using the viewport carried in [`FrameUniform`]

mod ctx;
mod pipeline;
mod uniform;

#[cfg(test)]
pub(crate) mod testing;

pub use ctx::{DrawSurface, PointPass, RenderContext};
pub use pipeline::{PointPipeline, COLOR_STRIDE, POSITION_STRIDE, SPRITE_VERTICES};
pub use uniform::FrameUniform;

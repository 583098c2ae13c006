use crate::coords::ColorRgba;
use crate::device::{FrameOutcome, UnsupportedContextError};
use crate::shader::{ShaderError, ShaderProgram};

use super::FrameUniform;

/// GPU operations needed to draw an LED point cloud.
///
/// `device::Gpu` is the wgpu implementation. The scene controller only talks
/// to this trait, so it owns exactly one context and every resource created
/// from it.
pub trait RenderContext {
    /// Linked, device-side point pipeline (plus its uniform storage, if the
    /// program declares one).
    type Pipeline;

    /// Device-side vertex buffer.
    type Buffer;

    /// Current drawable size in physical pixels.
    fn drawable_size(&self) -> (u32, u32);

    /// Creates the instanced point pipeline for a linked program.
    ///
    /// The program must expose `position` (3 components) and `color`
    /// (4 components) attributes.
    fn create_point_pipeline(&mut self, program: &ShaderProgram)
        -> Result<Self::Pipeline, ShaderError>;

    /// Allocates a vertex buffer of `size` bytes that can be rewritten.
    fn create_vertex_buffer(&mut self, label: &'static str, size: u64) -> Self::Buffer;

    /// Replaces the first `data.len()` bytes of `buffer`.
    fn write_buffer(&mut self, buffer: &Self::Buffer, data: &[u8]);

    /// Reconfigures the drawable. Zero sizes are ignored.
    fn resize(&mut self, width: u32, height: u32);

    /// Clears the drawable and draws `pass.point_count` instanced points.
    fn draw_points(&mut self, pass: PointPass<'_, Self>) -> FrameOutcome;
}

/// Everything a single draw needs.
pub struct PointPass<'a, C: RenderContext + ?Sized> {
    pub pipeline: &'a C::Pipeline,
    pub positions: &'a C::Buffer,
    pub colors: &'a C::Buffer,
    /// `None` when the program has no frame uniform.
    pub uniform: Option<FrameUniform>,
    pub point_count: u32,
    pub clear: ColorRgba,
}

/// Host-provided drawable (window, canvas, offscreen target).
pub trait DrawSurface {
    type Context: RenderContext;

    /// Size in physical pixels.
    fn pixel_size(&self) -> (u32, u32);

    /// Requests a rendering context for this surface.
    fn acquire_context(&self) -> Result<Self::Context, UnsupportedContextError>;
}

/// A single acquired surface frame.
///
/// Short-lived: holding the surface texture prevents acquisition of the next
/// one. `Gpu::submit` presents it.
pub(crate) struct GpuFrame {
    pub surface_texture: wgpu::SurfaceTexture,
    pub view: wgpu::TextureView,
    pub encoder: wgpu::CommandEncoder,
}

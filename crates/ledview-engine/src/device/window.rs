use winit::window::Window;

use crate::render::DrawSurface;

use super::{Gpu, GpuInit, UnsupportedContextError};

/// A winit window as a [`DrawSurface`].
///
/// Acquisition blocks on wgpu's async adapter/device requests; it happens
/// once per scene creation, never per frame.
pub struct WindowSurface<'w> {
    window: &'w Window,
    init: GpuInit,
}

impl<'w> WindowSurface<'w> {
    pub fn new(window: &'w Window, init: GpuInit) -> Self {
        Self { window, init }
    }
}

impl<'w> DrawSurface for WindowSurface<'w> {
    type Context = Gpu<'w>;

    fn pixel_size(&self) -> (u32, u32) {
        let size = self.window.inner_size();
        (size.width, size.height)
    }

    fn acquire_context(&self) -> Result<Gpu<'w>, UnsupportedContextError> {
        pollster::block_on(Gpu::new(self.window, self.init.clone())).map_err(Into::into)
    }
}

//! GPU device + surface management.
//!
//! This module is responsible for:
//! - creating the wgpu Instance/Adapter/Device/Queue for a window
//! - creating & configuring the Surface (swapchain)
//! - implementing `render::RenderContext` on top of them

mod error;
mod frame;
mod gpu;
mod init;
mod surface;
mod window;

pub use error::{FrameOutcome, SurfaceErrorAction, UnsupportedContextError};
pub use gpu::Gpu;
pub use init::GpuInit;
pub use window::WindowSurface;

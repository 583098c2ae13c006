//! Recording `RenderContext` used by unit tests; no GPU required.

use std::cell::RefCell;
use std::rc::Rc;

use crate::coords::ColorRgba;
use crate::device::{FrameOutcome, UnsupportedContextError};
use crate::shader::{ShaderError, ShaderProgram, COLOR_ATTRIBUTE, FRAME_UNIFORM, POSITION_ATTRIBUTE};

use super::{DrawSurface, FrameUniform, PointPass, RenderContext};

#[derive(Debug, Clone, PartialEq)]
pub struct DrawRecord {
    pub point_count: u32,
    pub uniform: Option<FrameUniform>,
    pub clear: ColorRgba,
    pub positions: Vec<f32>,
    pub colors: Vec<f32>,
}

/// Shared log of everything the fake context was asked to do.
#[derive(Debug, Default)]
pub struct GpuLog {
    pub contexts_acquired: u32,
    pub pipelines: u32,
    pub buffers_created: Vec<(&'static str, u64)>,
    pub writes: u32,
    pub resizes: Vec<(u32, u32)>,
    pub draws: Vec<DrawRecord>,
    pub dropped_contexts: u32,
}

#[derive(Debug)]
pub struct FakeBuffer {
    pub label: &'static str,
    pub data: RefCell<Vec<u8>>,
}

#[derive(Debug)]
pub struct FakePipeline {
    pub has_frame: bool,
}

/// Outcome the next draws should report.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Behaviour {
    Present,
    Skip,
    Lose,
}

pub struct FakeContext {
    log: Rc<RefCell<GpuLog>>,
    size: (u32, u32),
    behaviour: Rc<RefCell<Behaviour>>,
}

impl Drop for FakeContext {
    fn drop(&mut self) {
        self.log.borrow_mut().dropped_contexts += 1;
    }
}

impl RenderContext for FakeContext {
    type Pipeline = FakePipeline;
    type Buffer = FakeBuffer;

    fn drawable_size(&self) -> (u32, u32) {
        self.size
    }

    fn create_point_pipeline(&mut self, program: &ShaderProgram) -> Result<FakePipeline, ShaderError> {
        program.require_attribute(POSITION_ATTRIBUTE, 3)?;
        program.require_attribute(COLOR_ATTRIBUTE, 4)?;
        self.log.borrow_mut().pipelines += 1;
        Ok(FakePipeline { has_frame: program.locate_uniform(FRAME_UNIFORM).is_some() })
    }

    fn create_vertex_buffer(&mut self, label: &'static str, size: u64) -> FakeBuffer {
        self.log.borrow_mut().buffers_created.push((label, size));
        FakeBuffer { label, data: RefCell::new(vec![0; size as usize]) }
    }

    fn write_buffer(&mut self, buffer: &FakeBuffer, data: &[u8]) {
        let mut dst = buffer.data.borrow_mut();
        assert!(data.len() <= dst.len(), "write past end of {}", buffer.label);
        dst[..data.len()].copy_from_slice(data);
        self.log.borrow_mut().writes += 1;
    }

    fn resize(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        self.size = (width, height);
        self.log.borrow_mut().resizes.push((width, height));
    }

    fn draw_points(&mut self, pass: PointPass<'_, Self>) -> FrameOutcome {
        match *self.behaviour.borrow() {
            Behaviour::Skip => return FrameOutcome::Skipped,
            Behaviour::Lose => return FrameOutcome::Lost,
            Behaviour::Present => {}
        }

        let n = pass.point_count as usize;
        let floats = |b: &FakeBuffer, stride: usize| -> Vec<f32> {
            let bytes = b.data.borrow();
            bytes[..n * stride * 4]
                .chunks_exact(4)
                .map(|c| f32::from_ne_bytes([c[0], c[1], c[2], c[3]]))
                .collect()
        };

        let record = DrawRecord {
            point_count: pass.point_count,
            uniform: if pass.pipeline.has_frame { pass.uniform } else { None },
            clear: pass.clear,
            positions: floats(pass.positions, 3),
            colors: floats(pass.colors, 4),
        };
        self.log.borrow_mut().draws.push(record);
        FrameOutcome::Presented
    }
}

/// Surface handing out [`FakeContext`]s that share one [`GpuLog`].
pub struct FakeSurface {
    pub size: (u32, u32),
    pub supported: bool,
    pub log: Rc<RefCell<GpuLog>>,
    pub behaviour: Rc<RefCell<Behaviour>>,
}

impl FakeSurface {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            size: (width, height),
            supported: true,
            log: Rc::default(),
            behaviour: Rc::new(RefCell::new(Behaviour::Present)),
        }
    }

    pub fn unsupported() -> Self {
        Self { supported: false, ..Self::new(640, 480) }
    }

    pub fn set_behaviour(&self, behaviour: Behaviour) {
        *self.behaviour.borrow_mut() = behaviour;
    }

    pub fn log(&self) -> std::cell::Ref<'_, GpuLog> {
        self.log.borrow()
    }
}

impl DrawSurface for FakeSurface {
    type Context = FakeContext;

    fn pixel_size(&self) -> (u32, u32) {
        self.size
    }

    fn acquire_context(&self) -> Result<FakeContext, UnsupportedContextError> {
        if !self.supported {
            return Err(UnsupportedContextError::new("fake surface has no GPU"));
        }
        self.log.borrow_mut().contexts_acquired += 1;
        Ok(FakeContext {
            log: Rc::clone(&self.log),
            size: self.size,
            behaviour: Rc::clone(&self.behaviour),
        })
    }
}

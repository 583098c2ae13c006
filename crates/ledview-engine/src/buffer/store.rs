use crate::render::{RenderContext, COLOR_STRIDE, POSITION_STRIDE};

use super::{ColorFormat, PointBatch, RgbAlpha};

/// One growable per-instance vertex buffer.
struct VertexBuffer<B> {
    label: &'static str,
    stride: u64,
    buffer: B,
    /// Capacity in points.
    capacity: usize,
}

impl<B> VertexBuffer<B> {
    fn new<C>(ctx: &mut C, label: &'static str, stride: u64, capacity: usize) -> Self
    where
        C: RenderContext<Buffer = B>,
    {
        Self {
            label,
            stride,
            buffer: ctx.create_vertex_buffer(label, stride * capacity as u64),
            capacity,
        }
    }

    fn ensure_capacity<C>(&mut self, ctx: &mut C, required: usize)
    where
        C: RenderContext<Buffer = B>,
    {
        if required <= self.capacity {
            return;
        }
        let new_cap = required.next_power_of_two().max(BufferStore::<C>::MIN_CAPACITY);
        log::debug!("growing {} from {} to {} points", self.label, self.capacity, new_cap);
        self.buffer = ctx.create_vertex_buffer(self.label, self.stride * new_cap as u64);
        self.capacity = new_cap;
    }
}

/// GPU-side position and color buffers for the point cloud.
///
/// Every [`upload`](Self::upload) rewrites both buffers from scratch; the
/// point count and layout may change arbitrarily between frames. Buffers are
/// reallocated only when the count outgrows their capacity, and RGB input is
/// widened through a reused staging vector, so steady-state uploads do not
/// allocate.
pub struct BufferStore<C: RenderContext> {
    positions: VertexBuffer<C::Buffer>,
    colors: VertexBuffer<C::Buffer>,
    staging: Vec<f32>,
    rgb_alpha: RgbAlpha,
    point_count: u32,
}

impl<C: RenderContext> BufferStore<C> {
    pub const MIN_CAPACITY: usize = 64;

    pub fn new(ctx: &mut C, rgb_alpha: RgbAlpha) -> Self {
        Self {
            positions: VertexBuffer::new(ctx, "ledview positions", POSITION_STRIDE, Self::MIN_CAPACITY),
            colors: VertexBuffer::new(ctx, "ledview colors", COLOR_STRIDE, Self::MIN_CAPACITY),
            staging: Vec::new(),
            rgb_alpha,
            point_count: 0,
        }
    }

    /// Replaces the contents of both buffers with `batch`.
    pub fn upload(&mut self, ctx: &mut C, batch: &PointBatch<'_>) {
        let n = batch.point_count();

        self.positions.ensure_capacity(ctx, n);
        self.colors.ensure_capacity(ctx, n);

        ctx.write_buffer(&self.positions.buffer, bytemuck::cast_slice(batch.positions()));

        match batch.format() {
            ColorFormat::Rgba => {
                ctx.write_buffer(&self.colors.buffer, bytemuck::cast_slice(batch.colors()));
            }
            ColorFormat::Rgb => {
                let policy = self.rgb_alpha;
                self.staging.clear();
                self.staging.extend(batch.colors().chunks_exact(3).flat_map(|rgb| {
                    let (r, g, b) = (rgb[0], rgb[1], rgb[2]);
                    [r, g, b, policy.alpha(r, g, b)]
                }));
                ctx.write_buffer(&self.colors.buffer, bytemuck::cast_slice(&self.staging));
            }
        }

        self.point_count = u32::try_from(n).unwrap_or(u32::MAX);
    }

    /// Number of points in the last upload.
    pub fn point_count(&self) -> u32 {
        self.point_count
    }

    /// Current capacity in points (same for both buffers).
    pub fn capacity(&self) -> usize {
        self.positions.capacity.min(self.colors.capacity)
    }

    pub fn positions(&self) -> &C::Buffer {
        &self.positions.buffer
    }

    pub fn colors(&self) -> &C::Buffer {
        &self.colors.buffer
    }
}

use bytemuck::{Pod, Zeroable};
use glam::Mat4;

use crate::coords::Viewport;

/// CPU mirror of the `frame` uniform block in the point vertex stage.
///
/// Layout (80 bytes):
///
///  offset  0  mvp         mat4x4<f32>
///  offset 64  viewport    vec2<f32>
///  offset 72  point_size  f32
///  offset 76  _pad        f32
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct FrameUniform {
    pub mvp: [[f32; 4]; 4],
    pub viewport: [f32; 2],
    pub point_size: f32,
    pub _pad: f32,
}

impl FrameUniform {
    pub fn new(mvp: Mat4, viewport: Viewport, point_size: f32) -> Self {
        Self {
            mvp: mvp.to_cols_array_2d(),
            viewport: [viewport.width.max(1.0), viewport.height.max(1.0)],
            point_size: point_size.max(0.0),
            _pad: 0.0,
        }
    }

    pub fn matrix(&self) -> Mat4 {
        Mat4::from_cols_array_2d(&self.mvp)
    }

    /// Returns the `wgpu` minimum binding size for the uniform buffer.
    pub(crate) fn min_binding_size() -> std::num::NonZeroU64 {
        std::num::NonZeroU64::new(std::mem::size_of::<FrameUniform>() as u64)
            .expect("FrameUniform has non-zero size by construction")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn layout_matches_wgsl_block() {
        assert_eq!(std::mem::size_of::<FrameUniform>(), 80);
        assert_eq!(std::mem::size_of::<FrameUniform>() % 16, 0);
    }

    #[test]
    fn matrix_round_trips_column_major() {
        let m = Mat4::from_cols_array(&[
            1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0, 10.0, 11.0, 12.0, 13.0, 14.0, 15.0, 16.0,
        ]);
        let u = FrameUniform::new(m, Viewport::new(640.0, 480.0), 12.0);
        assert_eq!(u.mvp[3], [13.0, 14.0, 15.0, 16.0]);
        assert_eq!(u.matrix(), m);
    }

    #[test]
    fn degenerate_viewport_is_clamped() {
        let u = FrameUniform::new(Mat4::IDENTITY, Viewport::new(0.0, 0.0), -3.0);
        assert_eq!(u.viewport, [1.0, 1.0]);
        assert_eq!(u.point_size, 0.0);
    }
}

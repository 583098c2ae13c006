/// Drawable size in physical pixels.
///
/// The camera derives its aspect ratio from this and the point-sprite shader
/// uses it to convert `point_size` from pixels to NDC.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    #[inline]
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    #[inline]
    pub fn from_pixels(width: u32, height: u32) -> Self {
        Self::new(width as f32, height as f32)
    }

    /// Width / height, with both sides clamped to at least one pixel.
    #[inline]
    pub fn aspect(self) -> f32 {
        self.width.max(1.0) / self.height.max(1.0)
    }
}

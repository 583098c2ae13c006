use thiserror::Error;

/// Per-LED color tuple layout.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq)]
pub enum ColorFormat {
    /// `(r, g, b)`; alpha is taken as 1.
    Rgb,
    /// `(r, g, b, a)`.
    #[default]
    Rgba,
}

impl ColorFormat {
    pub const fn components(self) -> usize {
        match self {
            Self::Rgb => 3,
            Self::Rgba => 4,
        }
    }
}

/// Alpha given to RGB colors when they are widened to RGBA.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq)]
pub enum RgbAlpha {
    /// `min(r + g + b, 1)`: dim LEDs fade into the background instead of
    /// drawing as dark squares.
    #[default]
    Brightness,
    /// Always 1.
    Opaque,
}

impl RgbAlpha {
    pub fn alpha(self, r: f32, g: f32, b: f32) -> f32 {
        match self {
            Self::Brightness => (r + g + b).clamp(0.0, 1.0),
            Self::Opaque => 1.0,
        }
    }
}

/// Caller supplied inconsistent vertex/color sequences.
///
/// Reported, never fatal: the frame is drawn with the clamped point count.
#[derive(Debug, Clone, Eq, PartialEq, Error)]
pub enum ContractViolation {
    #[error("vertex sequence has {len} floats, not a multiple of 3; trailing values ignored")]
    RaggedVertices { len: usize },

    #[error(
        "{vertex_points} positions but {color_points} {format:?} colors; drawing {drawn} points"
    )]
    LengthMismatch {
        vertex_points: usize,
        color_points: usize,
        format: ColorFormat,
        drawn: usize,
    },
}

/// A validated, index-aligned view over one frame of LED data.
#[derive(Debug, Copy, Clone)]
pub struct PointBatch<'a> {
    positions: &'a [f32],
    colors: &'a [f32],
    format: ColorFormat,
    point_count: usize,
}

impl<'a> PointBatch<'a> {
    /// Pairs up `vertices` (xyz triples) with `colors`.
    ///
    /// The color format is inferred from the vertex count: `4n` floats are
    /// RGBA, `3n` are RGB. Any other length is read as `fallback` and the
    /// batch is clamped to the shorter of the two implied point counts.
    pub fn new(
        vertices: &'a [f32],
        colors: &'a [f32],
        fallback: ColorFormat,
    ) -> (Self, Option<ContractViolation>) {
        let vertex_points = vertices.len() / 3;

        let format = if colors.len() == vertex_points * ColorFormat::Rgba.components() {
            ColorFormat::Rgba
        } else if colors.len() == vertex_points * ColorFormat::Rgb.components() {
            ColorFormat::Rgb
        } else {
            fallback
        };

        let color_points = colors.len() / format.components();
        let point_count = vertex_points.min(color_points);

        let violation = if vertex_points != color_points
            || colors.len() % format.components() != 0
        {
            Some(ContractViolation::LengthMismatch {
                vertex_points,
                color_points,
                format,
                drawn: point_count,
            })
        } else if vertices.len() % 3 != 0 {
            Some(ContractViolation::RaggedVertices { len: vertices.len() })
        } else {
            None
        };

        let batch = Self {
            positions: &vertices[..point_count * 3],
            colors: &colors[..point_count * format.components()],
            format,
            point_count,
        };
        (batch, violation)
    }

    pub fn positions(&self) -> &'a [f32] {
        self.positions
    }

    pub fn colors(&self) -> &'a [f32] {
        self.colors
    }

    pub fn format(&self) -> ColorFormat {
        self.format
    }

    pub fn point_count(&self) -> usize {
        self.point_count
    }

    pub fn is_empty(&self) -> bool {
        self.point_count == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn floats(n: usize) -> Vec<f32> {
        (0..n).map(|i| i as f32).collect()
    }

    // ── inference ─────────────────────────────────────────────────────────

    #[test]
    fn rgba_is_inferred() {
        let (v, c) = (floats(12), floats(16));
        let (batch, violation) = PointBatch::new(&v, &c, ColorFormat::Rgb);
        assert_eq!(batch.format(), ColorFormat::Rgba);
        assert_eq!(batch.point_count(), 4);
        assert_eq!(violation, None);
    }

    #[test]
    fn rgb_is_inferred() {
        let (v, c) = (floats(12), floats(12));
        let (batch, violation) = PointBatch::new(&v, &c, ColorFormat::Rgba);
        assert_eq!(batch.format(), ColorFormat::Rgb);
        assert_eq!(batch.point_count(), 4);
        assert_eq!(violation, None);
    }

    #[test]
    fn empty_frame_is_valid() {
        let (batch, violation) = PointBatch::new(&[], &[], ColorFormat::Rgba);
        assert!(batch.is_empty());
        assert_eq!(violation, None);
    }

    // ── clamping ──────────────────────────────────────────────────────────

    #[test]
    fn fewer_colors_clamps_to_colors() {
        let (v, c) = (floats(30), floats(8));
        let (batch, violation) = PointBatch::new(&v, &c, ColorFormat::Rgba);
        assert_eq!(batch.point_count(), 2);
        assert_eq!(batch.positions().len(), 6);
        assert_eq!(batch.colors().len(), 8);
        assert_eq!(
            violation,
            Some(ContractViolation::LengthMismatch {
                vertex_points: 10,
                color_points: 2,
                format: ColorFormat::Rgba,
                drawn: 2,
            })
        );
    }

    #[test]
    fn fewer_vertices_clamps_to_vertices() {
        let (v, c) = (floats(6), floats(40));
        let (batch, violation) = PointBatch::new(&v, &c, ColorFormat::Rgba);
        assert_eq!(batch.point_count(), 2);
        assert_eq!(batch.colors().len(), 8);
        assert!(matches!(violation, Some(ContractViolation::LengthMismatch { drawn: 2, .. })));
    }

    #[test]
    fn ragged_vertices_drop_the_tail() {
        let (v, c) = (floats(7), floats(8));
        let (batch, violation) = PointBatch::new(&v, &c, ColorFormat::Rgba);
        assert_eq!(batch.point_count(), 2);
        assert_eq!(violation, Some(ContractViolation::RaggedVertices { len: 7 }));
    }

    #[test]
    fn ragged_colors_use_fallback_format() {
        let (v, c) = (floats(9), floats(10));
        let (batch, violation) = PointBatch::new(&v, &c, ColorFormat::Rgb);
        assert_eq!(batch.format(), ColorFormat::Rgb);
        assert_eq!(batch.point_count(), 3);
        assert!(violation.is_some());
    }

    #[test]
    fn colors_without_vertices_draw_nothing() {
        let c = floats(8);
        let (batch, violation) = PointBatch::new(&[], &c, ColorFormat::Rgba);
        assert!(batch.is_empty());
        assert!(violation.is_some());
    }
}

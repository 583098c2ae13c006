use glam::{Mat4, Vec3};

use super::MatrixDimensions;

/// Coordinate space of the incoming LED positions.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq)]
pub enum PositionSpace {
    /// Positions are already in object space: x and y in `[-0.5, 0.5]`,
    /// +Y up. The camera's model matrix stretches x by the matrix aspect.
    #[default]
    Normalized,

    /// Positions are grid coordinates as the device reports them: x in
    /// `0..width`, y in `0..height` growing downward, z in grid units.
    Grid,
}

impl PositionSpace {
    /// Transform from this space into normalized object space.
    ///
    /// For `Grid`, LED centers map to `(x + 0.5) / w - 0.5` and
    /// `0.5 - (y + 0.5) / h`; depth is scaled by `1 / h` so that, once the
    /// model matrix restores the aspect, one grid step is the same length on
    /// every axis.
    pub fn to_object(self, dims: MatrixDimensions) -> Mat4 {
        match self {
            Self::Normalized => Mat4::IDENTITY,
            Self::Grid => {
                let w = dims.width() as f32;
                let h = dims.height() as f32;
                Mat4::from_translation(Vec3::new(0.5 / w - 0.5, 0.5 - 0.5 / h, 0.0))
                    * Mat4::from_scale(Vec3::new(1.0 / w, -1.0 / h, 1.0 / h))
            }
        }
    }
}

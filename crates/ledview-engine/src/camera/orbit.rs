use glam::{EulerRot, Quat, Vec3};

/// Radians of yaw per pixel of horizontal drag.
pub const YAW_PER_PIXEL: f32 = 0.0035;

/// Radians of pitch per pixel of vertical drag.
pub const PITCH_PER_PIXEL: f32 = 0.0030;

/// Pitch stays short of straight up/down so the view never flips.
pub const PITCH_LIMIT: f32 = 1.55;

/// Distance multiplier per wheel step.
pub const ZOOM_STEP: f32 = 0.9;

pub const MIN_ZOOM: f32 = 0.1;
pub const MAX_ZOOM: f32 = 10.0;

/// User rotation and dolly around the matrix center, layered on the fitted
/// view.
///
/// `zoom` multiplies the fitted distance: below 1 moves closer. The default
/// is the fitted view itself.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Orbit {
    yaw: f32,
    pitch: f32,
    zoom: f32,
}

impl Default for Orbit {
    fn default() -> Self {
        Self { yaw: 0.0, pitch: 0.0, zoom: 1.0 }
    }
}

impl Orbit {
    pub fn new(yaw: f32, pitch: f32, zoom: f32) -> Self {
        Self {
            yaw: if yaw.is_finite() { yaw.rem_euclid(std::f32::consts::TAU) } else { 0.0 },
            pitch: if pitch.is_finite() { pitch.clamp(-PITCH_LIMIT, PITCH_LIMIT) } else { 0.0 },
            zoom: if zoom.is_finite() { zoom.clamp(MIN_ZOOM, MAX_ZOOM) } else { 1.0 },
        }
    }

    pub fn yaw(self) -> f32 {
        self.yaw
    }

    pub fn pitch(self) -> f32 {
        self.pitch
    }

    pub fn zoom(self) -> f32 {
        self.zoom
    }

    pub fn is_fitted(self) -> bool {
        self == Self::default()
    }

    /// Applies a pointer drag in pixels: horizontal motion yaws, vertical
    /// motion pitches.
    pub fn dragged(self, dx: f32, dy: f32) -> Self {
        Self::new(
            self.yaw - dx * YAW_PER_PIXEL,
            self.pitch - dy * PITCH_PER_PIXEL,
            self.zoom,
        )
    }

    /// Applies wheel steps; positive steps move closer.
    pub fn zoomed(self, steps: f32) -> Self {
        Self::new(self.yaw, self.pitch, self.zoom * ZOOM_STEP.powf(steps))
    }

    pub(crate) fn rotation(self) -> Quat {
        Quat::from_euler(EulerRot::YXZ, self.yaw, self.pitch, 0.0)
    }

    /// Eye position for a camera fitted at `distance`, looking at the origin.
    pub(crate) fn eye(self, distance: f32) -> Vec3 {
        self.rotation() * Vec3::new(0.0, 0.0, distance * self.zoom)
    }

    pub(crate) fn up(self) -> Vec3 {
        self.rotation() * Vec3::Y
    }
}

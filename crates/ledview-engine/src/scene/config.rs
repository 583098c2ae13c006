use std::borrow::Cow;

use crate::buffer::{ColorFormat, RgbAlpha};
use crate::camera::{CameraConfig, PositionSpace};
use crate::coords::ColorRgba;
use crate::shader::{POINTS_FRAGMENT_WGSL, POINTS_VERTEX_WGSL};

/// WGSL sources for the point program.
#[derive(Debug, Clone)]
pub struct ShaderSources {
    pub vertex: Cow<'static, str>,
    pub fragment: Cow<'static, str>,
}

impl Default for ShaderSources {
    fn default() -> Self {
        Self {
            vertex: Cow::Borrowed(POINTS_VERTEX_WGSL),
            fragment: Cow::Borrowed(POINTS_FRAGMENT_WGSL),
        }
    }
}

/// Scene controller configuration.
#[derive(Debug, Clone)]
pub struct SceneConfig {
    pub camera: CameraConfig,

    /// On-screen LED diameter in device pixels.
    pub point_size: f32,

    /// Clear color. Transparent by default so the host background shows.
    pub clear_color: ColorRgba,

    /// Color layout assumed when it cannot be inferred from the lengths.
    pub fallback_color_format: ColorFormat,

    /// Alpha for RGB input. Brightness-derived by default, so a dark LED is
    /// see-through rather than a black square over the background.
    pub rgb_alpha: RgbAlpha,

    pub position_space: PositionSpace,

    pub shaders: ShaderSources,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            camera: CameraConfig::default(),
            point_size: 12.0,
            clear_color: ColorRgba::transparent(),
            fallback_color_format: ColorFormat::Rgba,
            rgb_alpha: RgbAlpha::Brightness,
            position_space: PositionSpace::Normalized,
            shaders: ShaderSources::default(),
        }
    }
}

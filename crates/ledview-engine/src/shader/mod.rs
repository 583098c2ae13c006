//! Shader program management.
//!
//! WGSL stages are compiled (parsed + validated) and reflected with naga,
//! then linked by matching the vertex outputs against the fragment inputs.
//! The result is a device-independent [`ShaderProgram`] exposing attribute
//! and uniform locations; `render::RenderContext` turns it into a pipeline.

mod error;
mod program;
mod stage;

pub use error::ShaderError;
pub use program::{link_program, AttributeLocation, ShaderProgram, StageModule, UniformLocation};
pub use stage::{compile_stage, CompiledStage, StageKind};

/// Built-in point-sprite vertex stage.
pub const POINTS_VERTEX_WGSL: &str = include_str!("shaders/points.vert.wgsl");

/// Built-in pass-through fragment stage.
pub const POINTS_FRAGMENT_WGSL: &str = include_str!("shaders/points.frag.wgsl");

/// Name of the frame uniform block in the built-in vertex stage.
pub const FRAME_UNIFORM: &str = "frame";

/// Per-instance LED position attribute (3 components).
pub const POSITION_ATTRIBUTE: &str = "position";

/// Per-instance LED color attribute (4 components).
pub const COLOR_ATTRIBUTE: &str = "color";

/// Compiles both stages and links them.
pub fn build_program(vertex_src: &str, fragment_src: &str) -> Result<ShaderProgram, ShaderError> {
    let vertex = compile_stage(StageKind::Vertex, vertex_src)?;
    let fragment = compile_stage(StageKind::Fragment, fragment_src)?;
    link_program(vertex, fragment)
}

//! Scene controller.
//!
//! Composes the shader program, the buffer store and the camera into the
//! `create_scene` / `update_scene` / `resize` / `dispose` lifecycle the host
//! drives.

mod config;
mod controller;
mod error;

pub use config::{SceneConfig, ShaderSources};
pub use controller::{Scene, SceneStats, SceneStatus};
pub use error::SceneError;

//! LED matrix monitor engine.
//!
//! Renders one frame of LED telemetry (positions + colors) as screen-space
//! point sprites, framed by a camera that keeps the whole matrix in view.

pub mod buffer;
pub mod camera;
pub mod coords;
pub mod device;
pub mod logging;
pub mod render;
pub mod scene;
pub mod shader;
pub mod time;

pub use scene::{Scene, SceneConfig, SceneError, SceneStats, SceneStatus};

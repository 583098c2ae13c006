//! Auto-fit camera.
//!
//! Computes the projection × view × model transform that frames an LED
//! matrix of arbitrary aspect ratio on a canvas of arbitrary aspect ratio,
//! and caches it between frames. An optional user orbit rotates and dollies
//! the eye around the matrix center on top of the fit.

mod orbit;
mod position;
mod solver;

pub use orbit::Orbit;
pub use position::PositionSpace;
pub use solver::{solve, solve_with_orbit, CameraConfig, CameraFit, FrameCamera, MatrixDimensions};

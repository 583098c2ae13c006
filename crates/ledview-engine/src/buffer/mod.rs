//! GPU buffer store for LED positions and colors.

mod batch;
mod store;

pub use batch::{ColorFormat, ContractViolation, PointBatch, RgbAlpha};
pub use store::BufferStore;

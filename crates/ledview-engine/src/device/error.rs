use thiserror::Error;

/// High-level response after a surface error.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum SurfaceErrorAction {
    /// Surface was reconfigured; rendering may resume next frame.
    Reconfigured,
    /// Transient error; skip the current frame.
    SkipFrame,
    /// Fatal error (commonly OOM); the context is unusable.
    Fatal,
}

/// Result of a single draw attempt.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum FrameOutcome {
    /// Frame was drawn and handed to the presentation engine.
    Presented,
    /// Nothing was drawn this time (surface outdated, timeout, zero size).
    Skipped,
    /// The context is gone; further draws will not succeed.
    Lost,
}

impl From<SurfaceErrorAction> for FrameOutcome {
    fn from(action: SurfaceErrorAction) -> Self {
        match action {
            SurfaceErrorAction::Reconfigured | SurfaceErrorAction::SkipFrame => Self::Skipped,
            SurfaceErrorAction::Fatal => Self::Lost,
        }
    }
}

/// A rendering context could not be acquired from a surface.
///
/// Not fatal: the scene degrades to drawing nothing.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("GPU context unavailable: {reason}")]
pub struct UnsupportedContextError {
    reason: String,
}

impl UnsupportedContextError {
    pub fn new(reason: impl Into<String>) -> Self {
        Self { reason: reason.into() }
    }
}

impl From<anyhow::Error> for UnsupportedContextError {
    fn from(err: anyhow::Error) -> Self {
        Self::new(format!("{err:#}"))
    }
}

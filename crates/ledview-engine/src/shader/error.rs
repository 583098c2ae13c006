use thiserror::Error;

use super::StageKind;

/// Shader build failure.
///
/// Both variants are fatal to scene initialization: without a linked program
/// nothing can be drawn. The diagnostic is the front-end's rendered message
/// and is meant to be shown to a developer verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ShaderError {
    #[error("{stage} stage failed to compile:\n{diagnostic}")]
    Compile { stage: StageKind, diagnostic: String },

    #[error("program failed to link:\n{diagnostic}")]
    Link { diagnostic: String },
}

impl ShaderError {
    pub(crate) fn compile(stage: StageKind, diagnostic: impl Into<String>) -> Self {
        Self::Compile { stage, diagnostic: diagnostic.into() }
    }

    pub(crate) fn link(diagnostic: impl Into<String>) -> Self {
        Self::Link { diagnostic: diagnostic.into() }
    }

    /// Returns the compiler or linker diagnostic text.
    pub fn diagnostic(&self) -> &str {
        match self {
            Self::Compile { diagnostic, .. } | Self::Link { diagnostic } => diagnostic,
        }
    }
}

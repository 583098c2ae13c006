use thiserror::Error;

use crate::shader::ShaderError;

/// Scene initialization failure.
///
/// A missing GPU is *not* an error (the scene degrades instead); only a
/// program that cannot be built is.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SceneError {
    #[error(transparent)]
    Shader(#[from] ShaderError),
}

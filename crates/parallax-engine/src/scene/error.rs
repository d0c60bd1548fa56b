use thiserror::Error;

use crate::assets::LoadError;
use crate::parallax::{DegenerateAspectError, UniformBindingError};

/// Why a scene could not be built or updated.
#[derive(Debug, Error)]
pub enum SceneError {
    #[error(transparent)]
    Load(#[from] LoadError),

    #[error("cannot fit plane")]
    Aspect(#[from] DegenerateAspectError),

    #[error(transparent)]
    Binding(#[from] UniformBindingError),

    #[error("grid scale must be finite and positive, got {0}")]
    GridScale(f32),
}

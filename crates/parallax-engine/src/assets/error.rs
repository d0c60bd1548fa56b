use thiserror::Error;

use super::AssetRole;

/// Why a single image could not be turned into a texture.
#[derive(Debug, Error)]
pub enum LoadFailure {
    #[error("i/o error")]
    Io(#[from] std::io::Error),

    #[error("decode error")]
    Decode(#[from] image::ImageError),

    #[error("image has zero size ({width}x{height})")]
    Empty { width: u32, height: u32 },

    #[error("image is {width}x{height}, device textures are limited to {max}px per side")]
    TooLarge { width: u32, height: u32, max: u32 },

    #[error("pixel buffer holds {actual} bytes, expected {expected}")]
    BufferSize { expected: usize, actual: usize },

    #[error("no in-memory image named `{0}`")]
    NotFound(String),

    #[error("loader stopped before producing a result")]
    Cancelled,
}

/// A scene asset failed to load. Fatal for scene setup.
#[derive(Debug, Error)]
#[error("failed to load {role} image `{origin}`")]
pub struct LoadError {
    pub role: AssetRole,
    pub origin: String,
    #[source]
    pub cause: LoadFailure,
}

impl LoadError {
    pub fn new(role: AssetRole, origin: impl Into<String>, cause: LoadFailure) -> Self {
        Self {
            role,
            origin: origin.into(),
            cause,
        }
    }
}

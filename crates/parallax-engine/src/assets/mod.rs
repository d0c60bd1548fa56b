//! Asset loading.
//!
//! A scene needs a base photo, a grid pattern and optionally a depth map.
//! [`AssetPipeline`] starts all loads at once and resolves only when every one
//! of them has produced a [`Texture`], failing fast on the first
//! [`LoadError`].

mod error;
mod loader;
mod pipeline;
mod source;
mod texture;

pub use error::{LoadError, LoadFailure};
pub use loader::{FileImageLoader, ImageLoader, MemoryImageLoader};
pub use pipeline::{AssetManifest, AssetPipeline, SceneAssets};
pub use source::{AssetRole, AssetSource};
pub use texture::Texture;

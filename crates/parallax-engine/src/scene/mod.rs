//! The running viewer scene.
//!
//! A [`Scene`] only exists once every asset has resolved and the plane has
//! been fitted, so everything downstream (pointer updates, frames, the GPU
//! renderer) can assume complete uniforms.

mod error;
mod init;
mod state;

pub use error::SceneError;
pub use init::{init, init_async};
pub use state::{Scene, SceneConfig};

//! GPU rendering subsystem.
//!
//! Renderers issue GPU commands via wgpu and own their GPU resources
//! (pipelines, buffers, uploaded textures).
//!
//! Convention:
//! - The plane quad is a unit square (`0..1` corners) scaled into NDC by the
//!   fitted plane size in the vertex shader.
//! - Corner `(0, 0)` is the bottom-left of the plane and doubles as its UV.

mod common;
mod ctx;
mod plane;

pub use ctx::{RenderCtx, RenderTarget};
pub use plane::PlaneRenderer;

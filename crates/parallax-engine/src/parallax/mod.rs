//! Depth-parallax grid compositing.
//!
//! The math that decides where the grid lands on the photo:
//! - [`fit`] sizes the plane so the photo keeps its aspect ratio
//! - [`pointer`] maps pointer pixels into the plane's UV space
//! - [`depth`] turns a depth texel into a displacement factor
//! - [`composite`] is the per-pixel rule, mirrored by the WGSL programs in
//!   [`shader`]
//!
//! The GPU side lives in `render::plane`; everything here is plain CPU code.

pub mod composite;
pub mod depth;
pub mod fit;
pub mod pointer;
pub mod shader;
mod uniforms;

pub use fit::{aspect_ratio, fit_plane, DegenerateAspectError, PlaneDimensions};
pub use pointer::map_pointer;
pub use shader::{ShaderProgram, ShaderVariant};
pub use uniforms::{UniformBindingError, UniformName, UniformValue, Uniforms};
pub(crate) use uniforms::valid_grid_scale;

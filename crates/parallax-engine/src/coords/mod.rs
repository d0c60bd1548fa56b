//! Coordinate types shared by the runtime, the scene and the renderers.
//!
//! Three spaces show up in this crate:
//! - surface pixels (logical, origin top-left, +Y down) for pointer offsets
//! - normalized device units for plane geometry (`[-1, 1]`, +Y up)
//! - plane UV (`[0, 1]`, origin bottom-left, +Y up)

mod vec2;
mod viewport;

pub use vec2::Vec2;
pub use viewport::Viewport;

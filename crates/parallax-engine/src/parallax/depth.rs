//! Depth-map sampling and the parallax displacement factor.
//!
//! Depth is stored in the red/green channels; a larger value means nearer.
//! Nearer texels get a smaller factor, so the grid shifts less there.

use crate::assets::Texture;
use crate::coords::Vec2;

/// Keeps fully black texels from dividing by zero.
pub const DEPTH_EPSILON: f32 = 1e-4;

/// `0.5 / (depth + ε) + 1`, per channel.
pub fn parallax_factor(depth: Vec2) -> Vec2 {
    Vec2::new(factor(depth.x), factor(depth.y))
}

#[inline]
fn factor(d: f32) -> f32 {
    0.5 / (d + DEPTH_EPSILON) + 1.0
}

/// Red/green channels of the depth map at plane `uv`, in `[0, 1]`.
pub fn sample_depth(depth: &Texture, uv: Vec2) -> Vec2 {
    let [r, g, _, _] = depth.sample_nearest(uv);
    Vec2::new(r as f32 / 255.0, g as f32 / 255.0)
}

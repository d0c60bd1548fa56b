use crate::coords::{Vec2, Viewport};

use super::PlaneDimensions;

/// Maps a pointer offset (surface pixels, origin top-left) to plane UV.
///
/// Assumes the plane is centered in the view. The vertical term divides by
/// the half height twice; that is the established mapping and is kept as is.
/// Input is sanitized rather than rejected: non-finite coordinates count as
/// 0, offsets are clamped to the surface and a zero-sized surface is treated
/// as 1 px, so the result is always finite for a valid plane.
pub fn map_pointer(offset: Vec2, surface: Viewport, plane: PlaneDimensions) -> Vec2 {
    let w = sanitize_extent(surface.width);
    let h = sanitize_extent(surface.height);
    let x = sanitize_coord(offset.x).clamp(0.0, w);
    let y = sanitize_coord(offset.y).clamp(0.0, h);

    let half_w = 0.5 * plane.width;
    let half_h = 0.5 * plane.height;

    let u = ((x / w) - (1.0 - half_w) / 2.0) / half_w;
    let v = ((1.0 - y / h) / half_h - (1.0 - half_h) / 2.0) / half_h;

    Vec2::new(u, v)
}

fn sanitize_coord(c: f32) -> f32 {
    if c.is_finite() { c } else { 0.0 }
}

fn sanitize_extent(e: f32) -> f32 {
    if e.is_finite() && e >= 1.0 { e } else { 1.0 }
}

//! Per-pixel compositing rule.
//!
//! CPU mirror of the WGSL programs in `shaders/`. The GPU renderer is what
//! draws to the screen; this module pins down the math and backs the
//! headless [`render_cpu`] path.

use crate::assets::Texture;
use crate::coords::{Vec2, Viewport};

use super::depth::{parallax_factor, sample_depth};
use super::{PlaneDimensions, Uniforms};

/// Grid scale baked into the flat program.
pub const GRID_SCALE_DEFAULT: f32 = 10.0;

const GRID_CENTER: Vec2 = Vec2::new(0.5, 0.5);

/// Grid coordinate for the flat program.
pub fn grid_uv_flat(v_uv: Vec2, mouse: Vec2) -> Vec2 {
    (v_uv - mouse) * GRID_SCALE_DEFAULT
}

/// Grid coordinate for the depth program.
///
/// `depth` is the red/green sample of the depth map at `v_uv`.
pub fn grid_uv_depth(
    v_uv: Vec2,
    mouse: Vec2,
    depth: Vec2,
    texture_aspect: f32,
    grid_scale: f32,
) -> Vec2 {
    let factor = parallax_factor(depth);
    Vec2::new(texture_aspect, 1.0)
        .mul_elem(v_uv - mouse)
        .mul_elem(factor)
        * grid_scale
        + GRID_CENTER
}

/// Half-open `[0, 1)` test, per axis.
pub fn grid_in_bounds(grid_uv: Vec2) -> bool {
    (0.0..1.0).contains(&grid_uv.x) && (0.0..1.0).contains(&grid_uv.y)
}

/// Grid coordinate the active program computes at `v_uv`.
pub fn grid_uv(uniforms: &Uniforms, v_uv: Vec2) -> Vec2 {
    match uniforms.depth_texture() {
        Some(depth) => grid_uv_depth(
            v_uv,
            uniforms.mouse(),
            sample_depth(depth, v_uv),
            uniforms.texture_aspect(),
            uniforms.grid_scale(),
        ),
        None => grid_uv_flat(v_uv, uniforms.mouse()),
    }
}

/// Final color at plane `v_uv`: the grid texel inside the grid window, the
/// photo texel everywhere else. No blending at the seam.
pub fn shade(uniforms: &Uniforms, v_uv: Vec2) -> [u8; 4] {
    let g = grid_uv(uniforms, v_uv);
    if grid_in_bounds(g) {
        uniforms.grid_texture().sample_nearest(g)
    } else {
        uniforms.base_texture().sample_nearest(v_uv)
    }
}

/// Rasterizes the plane into a `surface`-sized RGBA image.
///
/// Pixels outside the plane keep `clear`. Sampling is nearest-texel, so edges
/// are harder than on the GPU path, which filters linearly.
pub fn render_cpu(
    uniforms: &Uniforms,
    plane: PlaneDimensions,
    surface: Viewport,
    clear: [u8; 4],
) -> Texture {
    let w = surface.width.max(1.0) as u32;
    let h = surface.height.max(1.0) as u32;
    let mut pixels = Vec::with_capacity(w as usize * h as usize * 4);

    for py in 0..h {
        for px in 0..w {
            // Pixel centre in NDC, +Y up.
            let ndc = Vec2::new(
                (px as f32 + 0.5) / w as f32 * 2.0 - 1.0,
                1.0 - (py as f32 + 0.5) / h as f32 * 2.0,
            );
            let corner = Vec2::new(ndc.x / plane.width + 0.5, ndc.y / plane.height + 0.5);

            let inside = (0.0..=1.0).contains(&corner.x) && (0.0..=1.0).contains(&corner.y);
            let color = if inside { shade(uniforms, corner) } else { clear };
            pixels.extend_from_slice(&color);
        }
    }

    Texture::from_exact(w, h, pixels)
}

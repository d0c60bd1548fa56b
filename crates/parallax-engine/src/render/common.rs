//! GPU-side layouts shared with the composite shaders.

use bytemuck::{Pod, Zeroable};

use crate::parallax::{PlaneDimensions, Uniforms};

// ── plane uniform ─────────────────────────────────────────────────────────

/// Mirrors `PlaneUniform` in the composite WGSL programs.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub(super) struct GpuUniform {
    pub mouse: [f32; 2],
    pub plane: [f32; 2],
    pub texture_aspect: f32,
    pub grid_scale: f32,
    pub _pad: [f32; 2], // 16-byte alignment
}

impl GpuUniform {
    pub(super) fn new(uniforms: &Uniforms, plane: PlaneDimensions) -> Self {
        Self {
            mouse: uniforms.mouse().to_array(),
            plane: [plane.width, plane.height],
            texture_aspect: uniforms.texture_aspect(),
            grid_scale: uniforms.grid_scale(),
            _pad: [0.0; 2],
        }
    }
}

// ── quad vertex ───────────────────────────────────────────────────────────

#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
pub(super) struct QuadVertex {
    pub corner: [f32; 2], // 0..1, bottom-left origin
}

impl QuadVertex {
    const ATTRS: [wgpu::VertexAttribute; 1] = wgpu::vertex_attr_array![0 => Float32x2];

    pub(super) fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<QuadVertex>() as u64,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRS,
        }
    }
}

pub(super) const QUAD_VERTICES: [QuadVertex; 4] = [
    QuadVertex { corner: [0.0, 0.0] },
    QuadVertex { corner: [1.0, 0.0] },
    QuadVertex { corner: [1.0, 1.0] },
    QuadVertex { corner: [0.0, 1.0] },
];

pub(super) const QUAD_INDICES: [u16; 6] = [0, 1, 2, 0, 2, 3];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uniform_block_matches_wgsl_size() {
        assert_eq!(std::mem::size_of::<GpuUniform>(), 32);
        assert_eq!(std::mem::offset_of!(GpuUniform, texture_aspect), 16);
        assert_eq!(std::mem::offset_of!(GpuUniform, grid_scale), 20);
    }

    #[test]
    fn quad_is_counter_clockwise() {
        let [a, b, c] = [0usize, 1, 2].map(|i| QUAD_VERTICES[QUAD_INDICES[i] as usize].corner);
        let cross = (b[0] - a[0]) * (c[1] - a[1]) - (b[1] - a[1]) * (c[0] - a[0]);
        assert!(cross > 0.0);
    }
}

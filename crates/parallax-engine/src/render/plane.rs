use wgpu::util::DeviceExt;

use crate::assets::Texture;
use crate::parallax::ShaderVariant;
use crate::render::{RenderCtx, RenderTarget};
use crate::scene::Scene;

use super::common::{GpuUniform, QuadVertex, QUAD_INDICES, QUAD_VERTICES};

/// Draws the fitted photo plane with the scene's composite program.
///
/// Textures are uploaded on the first frame and then only bound; the uniform
/// block is rewritten every frame. The pipeline is rebuilt when the surface
/// format or the shader variant changes.
#[derive(Default)]
pub struct PlaneRenderer {
    pipeline_key: Option<(wgpu::TextureFormat, ShaderVariant)>,
    pipeline: Option<wgpu::RenderPipeline>,

    bind_group_layout: Option<wgpu::BindGroupLayout>,
    bind_group: Option<wgpu::BindGroup>,
    uniform_ubo: Option<wgpu::Buffer>,
    sampler: Option<wgpu::Sampler>,

    quad_vbo: Option<wgpu::Buffer>,
    quad_ibo: Option<wgpu::Buffer>,

    textures: Option<PlaneTextures>,
    last_uniform: Option<GpuUniform>,
}

struct PlaneTextures {
    base: wgpu::TextureView,
    grid: wgpu::TextureView,
    depth: Option<wgpu::TextureView>,
}

impl PlaneRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Renders `scene` into `target`, on top of whatever the target holds.
    pub fn render(&mut self, ctx: &RenderCtx<'_>, target: &mut RenderTarget<'_>, scene: &Scene) {
        let variant = scene.variant();

        self.ensure_pipeline(ctx, variant);
        self.ensure_static_buffers(ctx);
        self.ensure_textures(ctx, scene);
        self.ensure_bindings(ctx);
        self.write_uniform(ctx, GpuUniform::new(scene.uniforms(), scene.plane()));

        let Some(pipeline) = self.pipeline.as_ref() else { return };
        let Some(bind_group) = self.bind_group.as_ref() else { return };
        let Some(quad_vbo) = self.quad_vbo.as_ref() else { return };
        let Some(quad_ibo) = self.quad_ibo.as_ref() else { return };

        let mut rpass = target.pass("parallax plane pass", None);

        rpass.set_pipeline(pipeline);
        rpass.set_bind_group(0, bind_group, &[]);
        rpass.set_vertex_buffer(0, quad_vbo.slice(..));
        rpass.set_index_buffer(quad_ibo.slice(..), wgpu::IndexFormat::Uint16);
        rpass.draw_indexed(0..QUAD_INDICES.len() as u32, 0, 0..1);
    }

    fn ensure_pipeline(&mut self, ctx: &RenderCtx<'_>, variant: ShaderVariant) {
        let key = (ctx.surface_format, variant);
        if self.pipeline_key == Some(key) && self.pipeline.is_some() {
            return;
        }

        let program = variant.program();
        let label = program.label();
        log::debug!("building pipeline for {label} ({:?})", ctx.surface_format);

        let shader = ctx.device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some(label.as_str()),
            source: wgpu::ShaderSource::Wgsl(program.source.into()),
        });

        let mut entries = vec![
            wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX_FRAGMENT,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: wgpu::BufferSize::new(
                        std::mem::size_of::<GpuUniform>() as u64,
                    ),
                },
                count: None,
            },
            texture_entry(1),
            texture_entry(2),
            wgpu::BindGroupLayoutEntry {
                binding: 3,
                visibility: wgpu::ShaderStages::FRAGMENT,
                ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
                count: None,
            },
        ];
        if variant.uses_depth() {
            entries.push(texture_entry(4));
        }

        let bind_group_layout =
            ctx.device
                .create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                    label: Some("parallax plane bgl"),
                    entries: &entries,
                });

        let pipeline_layout =
            ctx.device
                .create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
                    label: Some("parallax plane pipeline layout"),
                    bind_group_layouts: &[&bind_group_layout],
                    immediate_size: 0,
                });

        let pipeline = ctx.device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some(label.as_str()),
            layout: Some(&pipeline_layout),

            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some(crate::parallax::ShaderProgram::VERTEX_ENTRY),
                compilation_options: Default::default(),
                buffers: &[QuadVertex::layout()],
            },

            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some(crate::parallax::ShaderProgram::FRAGMENT_ENTRY),
                compilation_options: Default::default(),
                targets: &[Some(wgpu::ColorTargetState {
                    format: ctx.surface_format,
                    blend: Some(wgpu::BlendState::REPLACE),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
            }),

            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                strip_index_format: None,
                front_face: wgpu::FrontFace::Ccw,
                cull_mode: None,
                polygon_mode: wgpu::PolygonMode::Fill,
                unclipped_depth: false,
                conservative: false,
            },

            depth_stencil: None,
            multisample: wgpu::MultisampleState::default(),
            multiview_mask: None,
            cache: None,
        });

        self.pipeline_key = Some(key);
        self.pipeline = Some(pipeline);
        self.bind_group_layout = Some(bind_group_layout);

        // Old bind group targets the old layout.
        self.bind_group = None;
    }

    fn ensure_static_buffers(&mut self, ctx: &RenderCtx<'_>) {
        if self.quad_vbo.is_none() {
            self.quad_vbo = Some(ctx.device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("parallax plane quad vbo"),
                contents: bytemuck::cast_slice(&QUAD_VERTICES),
                usage: wgpu::BufferUsages::VERTEX,
            }));
        }

        if self.quad_ibo.is_none() {
            self.quad_ibo = Some(ctx.device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("parallax plane quad ibo"),
                contents: bytemuck::cast_slice(&QUAD_INDICES),
                usage: wgpu::BufferUsages::INDEX,
            }));
        }

        if self.uniform_ubo.is_none() {
            self.uniform_ubo = Some(ctx.device.create_buffer(&wgpu::BufferDescriptor {
                label: Some("parallax plane ubo"),
                size: std::mem::size_of::<GpuUniform>() as u64,
                usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
                mapped_at_creation: false,
            }));
        }

        if self.sampler.is_none() {
            self.sampler = Some(ctx.device.create_sampler(&wgpu::SamplerDescriptor {
                label: Some("parallax plane sampler"),
                address_mode_u: wgpu::AddressMode::ClampToEdge,
                address_mode_v: wgpu::AddressMode::ClampToEdge,
                address_mode_w: wgpu::AddressMode::ClampToEdge,
                mag_filter: wgpu::FilterMode::Linear,
                min_filter: wgpu::FilterMode::Linear,
                mipmap_filter: wgpu::MipmapFilterMode::Nearest,
                ..Default::default()
            }));
        }
    }

    fn ensure_textures(&mut self, ctx: &RenderCtx<'_>, scene: &Scene) {
        if self.textures.is_some() {
            return;
        }

        let uniforms = scene.uniforms();
        let srgb = wgpu::TextureFormat::Rgba8UnormSrgb;

        self.textures = Some(PlaneTextures {
            base: upload(ctx, "parallax base texture", uniforms.base_texture(), srgb),
            grid: upload(ctx, "parallax grid texture", uniforms.grid_texture(), srgb),
            // Depth is data, not color: no sRGB decode.
            depth: uniforms.depth_texture().map(|t| {
                upload(ctx, "parallax depth texture", t, wgpu::TextureFormat::Rgba8Unorm)
            }),
        });
        self.bind_group = None;
    }

    fn ensure_bindings(&mut self, ctx: &RenderCtx<'_>) {
        if self.bind_group.is_some() {
            return;
        }

        let Some(((bgl, ubo), sampler)) = self
            .bind_group_layout
            .as_ref()
            .zip(self.uniform_ubo.as_ref())
            .zip(self.sampler.as_ref())
        else {
            return;
        };
        let Some(textures) = self.textures.as_ref() else { return };
        let uses_depth = self.pipeline_key.is_some_and(|(_, v)| v.uses_depth());

        let mut entries = vec![
            wgpu::BindGroupEntry {
                binding: 0,
                resource: ubo.as_entire_binding(),
            },
            wgpu::BindGroupEntry {
                binding: 1,
                resource: wgpu::BindingResource::TextureView(&textures.base),
            },
            wgpu::BindGroupEntry {
                binding: 2,
                resource: wgpu::BindingResource::TextureView(&textures.grid),
            },
            wgpu::BindGroupEntry {
                binding: 3,
                resource: wgpu::BindingResource::Sampler(sampler),
            },
        ];

        if uses_depth {
            let Some(depth) = textures.depth.as_ref() else {
                log::error!("depth pipeline selected without a depth texture; skipping plane");
                return;
            };
            entries.push(wgpu::BindGroupEntry {
                binding: 4,
                resource: wgpu::BindingResource::TextureView(depth),
            });
        }

        self.bind_group = Some(ctx.device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("parallax plane bind group"),
            layout: bgl,
            entries: &entries,
        }));
    }

    fn write_uniform(&mut self, ctx: &RenderCtx<'_>, uniform: GpuUniform) {
        let Some(ubo) = self.uniform_ubo.as_ref() else { return };
        // The first frame always uploads; afterwards only on change.
        if self.last_uniform == Some(uniform) {
            return;
        }
        ctx.queue.write_buffer(ubo, 0, bytemuck::bytes_of(&uniform));
        self.last_uniform = Some(uniform);
    }
}

fn texture_entry(binding: u32) -> wgpu::BindGroupLayoutEntry {
    wgpu::BindGroupLayoutEntry {
        binding,
        visibility: wgpu::ShaderStages::FRAGMENT,
        ty: wgpu::BindingType::Texture {
            sample_type: wgpu::TextureSampleType::Float { filterable: true },
            view_dimension: wgpu::TextureViewDimension::D2,
            multisampled: false,
        },
        count: None,
    }
}

fn upload(
    ctx: &RenderCtx<'_>,
    label: &str,
    texture: &Texture,
    format: wgpu::TextureFormat,
) -> wgpu::TextureView {
    let size = wgpu::Extent3d {
        width: texture.width(),
        height: texture.height(),
        depth_or_array_layers: 1,
    };

    let gpu_texture = ctx.device.create_texture(&wgpu::TextureDescriptor {
        label: Some(label),
        size,
        mip_level_count: 1,
        sample_count: 1,
        dimension: wgpu::TextureDimension::D2,
        format,
        usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
        view_formats: &[],
    });

    ctx.queue.write_texture(
        gpu_texture.as_image_copy(),
        texture.pixels(),
        wgpu::TexelCopyBufferLayout {
            offset: 0,
            bytes_per_row: Some(4 * texture.width()),
            rows_per_image: Some(texture.height()),
        },
        size,
    );

    log::debug!("uploaded {label}: {}x{}", texture.width(), texture.height());
    gpu_texture.create_view(&wgpu::TextureViewDescriptor::default())
}

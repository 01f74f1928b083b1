use crate::coords::{ColorRgba, ScreenOrigin};
use crate::render::{RenderCtx, RenderTarget, SpriteTexture};

use super::common::{
    create_pipeline, uniform_min_binding_size, viewport_layout_entry, PipelineSpec, SpriteVertex,
    StreamBuffer, TintUniform, ViewportUniform,
};
use super::shader::ShaderKind;

/// Textured sprite renderer.
///
/// Output color is `sample(image, flip(uv)) * tint`, per channel, with no
/// clamping. The bind group is rebuilt only when the bound texture changes.
pub struct SpriteRenderer {
    origin: ScreenOrigin,

    pipeline_format: Option<wgpu::TextureFormat>,
    pipeline: Option<wgpu::RenderPipeline>,
    bind_group_layout: Option<wgpu::BindGroupLayout>,

    bind_group: Option<wgpu::BindGroup>,
    bound_texture: Option<u64>,
    viewport_ubo: Option<wgpu::Buffer>,
    tint_ubo: Option<wgpu::Buffer>,

    vertices: StreamBuffer,
    indices: StreamBuffer,
}

impl SpriteRenderer {
    pub fn new(origin: ScreenOrigin) -> Self {
        Self {
            origin,
            pipeline_format: None,
            pipeline: None,
            bind_group_layout: None,
            bind_group: None,
            bound_texture: None,
            viewport_ubo: None,
            tint_ubo: None,
            vertices: StreamBuffer::new("pixclip sprite vbo", wgpu::BufferUsages::VERTEX),
            indices: StreamBuffer::new("pixclip sprite ibo", wgpu::BufferUsages::INDEX),
        }
    }

    #[inline]
    pub fn origin(&self) -> ScreenOrigin {
        self.origin
    }

    /// Draws indexed triangles from `vertices` with `texture` bound and `tint` applied.
    pub fn render(
        &mut self,
        ctx: &RenderCtx<'_>,
        target: &mut RenderTarget<'_>,
        texture: &SpriteTexture,
        tint: ColorRgba,
        vertices: &[SpriteVertex],
        indices: &[u16],
    ) {
        if vertices.is_empty() || indices.len() < 3 {
            return;
        }

        self.ensure_pipeline(ctx);
        self.ensure_uniforms(ctx);
        self.ensure_bindings(ctx, texture);
        self.write_uniforms(ctx, tint);

        let Some(vbo) = self.vertices.write(ctx, vertices) else { return };
        let Some(ibo) = self.indices.write(ctx, indices) else { return };
        let Some(pipeline) = self.pipeline.as_ref() else { return };
        let Some(bind_group) = self.bind_group.as_ref() else { return };

        let mut rpass = target.begin_pass("pixclip sprite pass");
        rpass.set_pipeline(pipeline);
        rpass.set_bind_group(0, bind_group, &[]);
        rpass.set_vertex_buffer(0, vbo.slice(..));
        rpass.set_index_buffer(ibo.slice(..), wgpu::IndexFormat::Uint16);
        rpass.draw_indexed(0..indices.len() as u32, 0, 0..1);
    }

    fn ensure_pipeline(&mut self, ctx: &RenderCtx<'_>) {
        if self.pipeline_format == Some(ctx.surface_format) && self.pipeline.is_some() {
            return;
        }

        let bind_group_layout = ctx.device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("pixclip sprite bgl"),
            entries: &[
                viewport_layout_entry(),
                wgpu::BindGroupLayoutEntry {
                    binding: 1,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Uniform,
                        has_dynamic_offset: false,
                        min_binding_size: Some(uniform_min_binding_size::<TintUniform>()),
                    },
                    count: None,
                },
                wgpu::BindGroupLayoutEntry {
                    binding: 2,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Texture {
                        sample_type: wgpu::TextureSampleType::Float { filterable: true },
                        view_dimension: wgpu::TextureViewDimension::D2,
                        multisampled: false,
                    },
                    count: None,
                },
                wgpu::BindGroupLayoutEntry {
                    binding: 3,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
                    count: None,
                },
            ],
        });

        let pipeline = create_pipeline(
            ctx,
            PipelineSpec {
                kind: ShaderKind::Sprites,
                origin: self.origin,
                bind_group_layout: &bind_group_layout,
                buffers: &[SpriteVertex::layout()],
                topology: wgpu::PrimitiveTopology::TriangleList,
            },
        );

        self.pipeline_format = Some(ctx.surface_format);
        self.pipeline = Some(pipeline);
        self.bind_group_layout = Some(bind_group_layout);

        self.bind_group = None;
        self.bound_texture = None;
    }

    fn ensure_uniforms(&mut self, ctx: &RenderCtx<'_>) {
        if self.viewport_ubo.is_none() {
            self.viewport_ubo = Some(ctx.device.create_buffer(&wgpu::BufferDescriptor {
                label: Some("pixclip sprite viewport ubo"),
                size: std::mem::size_of::<ViewportUniform>() as u64,
                usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
                mapped_at_creation: false,
            }));
            self.bind_group = None;
        }
        if self.tint_ubo.is_none() {
            self.tint_ubo = Some(ctx.device.create_buffer(&wgpu::BufferDescriptor {
                label: Some("pixclip sprite tint ubo"),
                size: std::mem::size_of::<TintUniform>() as u64,
                usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
                mapped_at_creation: false,
            }));
            self.bind_group = None;
        }
    }

    fn ensure_bindings(&mut self, ctx: &RenderCtx<'_>, texture: &SpriteTexture) {
        if self.bind_group.is_some() && self.bound_texture == Some(texture.id()) {
            return;
        }

        let Some(bgl) = self.bind_group_layout.as_ref() else { return };
        let Some(viewport_ubo) = self.viewport_ubo.as_ref() else { return };
        let Some(tint_ubo) = self.tint_ubo.as_ref() else { return };

        let bind_group = ctx.device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("pixclip sprite bind group"),
            layout: bgl,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: viewport_ubo.as_entire_binding(),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: tint_ubo.as_entire_binding(),
                },
                wgpu::BindGroupEntry {
                    binding: 2,
                    resource: wgpu::BindingResource::TextureView(texture.view()),
                },
                wgpu::BindGroupEntry {
                    binding: 3,
                    resource: wgpu::BindingResource::Sampler(texture.sampler()),
                },
            ],
        });

        self.bind_group = Some(bind_group);
        self.bound_texture = Some(texture.id());
    }

    fn write_uniforms(&mut self, ctx: &RenderCtx<'_>, tint: ColorRgba) {
        if let Some(ubo) = self.viewport_ubo.as_ref() {
            ctx.queue.write_buffer(ubo, 0, bytemuck::bytes_of(&ViewportUniform::new(ctx.viewport)));
        }
        if let Some(ubo) = self.tint_ubo.as_ref() {
            ctx.queue.write_buffer(ubo, 0, bytemuck::bytes_of(&TintUniform { color: tint.to_array() }));
        }
    }
}

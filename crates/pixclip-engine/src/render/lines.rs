use crate::coords::ScreenOrigin;
use crate::render::{RenderCtx, RenderTarget};

use super::common::{
    create_pipeline, viewport_layout_entry, LineVertex, PipelineSpec, StreamBuffer,
    ViewportUniform,
};
use super::shader::ShaderKind;

/// Line-list renderer: every consecutive pair of vertices is one segment.
/// A trailing odd vertex is dropped.
pub struct LineRenderer {
    origin: ScreenOrigin,

    pipeline_format: Option<wgpu::TextureFormat>,
    pipeline: Option<wgpu::RenderPipeline>,

    bind_group_layout: Option<wgpu::BindGroupLayout>,
    bind_group: Option<wgpu::BindGroup>,
    viewport_ubo: Option<wgpu::Buffer>,

    vertices: StreamBuffer,
    warned_odd: bool,
}

impl LineRenderer {
    pub fn new(origin: ScreenOrigin) -> Self {
        Self {
            origin,
            pipeline_format: None,
            pipeline: None,
            bind_group_layout: None,
            bind_group: None,
            viewport_ubo: None,
            vertices: StreamBuffer::new("pixclip line vbo", wgpu::BufferUsages::VERTEX),
            warned_odd: false,
        }
    }

    #[inline]
    pub fn origin(&self) -> ScreenOrigin {
        self.origin
    }

    pub fn render(&mut self, ctx: &RenderCtx<'_>, target: &mut RenderTarget<'_>, vertices: &[LineVertex]) {
        let count = vertices.len() & !1;
        if count != vertices.len() && !self.warned_odd {
            log::debug!("LineRenderer: odd vertex count {}; last vertex ignored", vertices.len());
            self.warned_odd = true;
        }
        if count == 0 {
            return;
        }

        self.ensure_pipeline(ctx);
        self.ensure_bindings(ctx);
        self.write_viewport_uniform(ctx);

        let Some(vbo) = self.vertices.write(ctx, &vertices[..count]) else { return };
        let Some(pipeline) = self.pipeline.as_ref() else { return };
        let Some(bind_group) = self.bind_group.as_ref() else { return };

        let mut rpass = target.begin_pass("pixclip line pass");
        rpass.set_pipeline(pipeline);
        rpass.set_bind_group(0, bind_group, &[]);
        rpass.set_vertex_buffer(0, vbo.slice(..));
        rpass.draw(0..count as u32, 0..1);
    }

    fn ensure_pipeline(&mut self, ctx: &RenderCtx<'_>) {
        if self.pipeline_format == Some(ctx.surface_format) && self.pipeline.is_some() {
            return;
        }

        let bind_group_layout = ctx.device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("pixclip line bgl"),
            entries: &[viewport_layout_entry()],
        });

        let pipeline = create_pipeline(
            ctx,
            PipelineSpec {
                kind: ShaderKind::Lines,
                origin: self.origin,
                bind_group_layout: &bind_group_layout,
                buffers: &[LineVertex::layout()],
                topology: wgpu::PrimitiveTopology::LineList,
            },
        );

        self.pipeline_format = Some(ctx.surface_format);
        self.pipeline = Some(pipeline);
        self.bind_group_layout = Some(bind_group_layout);

        self.bind_group = None;
        self.viewport_ubo = None;
    }

    fn ensure_bindings(&mut self, ctx: &RenderCtx<'_>) {
        if self.bind_group.is_some() && self.viewport_ubo.is_some() {
            return;
        }
        let Some(bgl) = self.bind_group_layout.as_ref() else { return };

        let viewport_ubo = ctx.device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("pixclip line viewport ubo"),
            size: std::mem::size_of::<ViewportUniform>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let bind_group = ctx.device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("pixclip line bind group"),
            layout: bgl,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: viewport_ubo.as_entire_binding(),
            }],
        });

        self.viewport_ubo = Some(viewport_ubo);
        self.bind_group = Some(bind_group);
    }

    fn write_viewport_uniform(&mut self, ctx: &RenderCtx<'_>) {
        let Some(ubo) = self.viewport_ubo.as_ref() else { return };
        ctx.queue.write_buffer(ubo, 0, bytemuck::bytes_of(&ViewportUniform::new(ctx.viewport)));
    }
}

//! GPU-side types and pipeline plumbing shared by the renderers.

use bytemuck::{Pod, Zeroable};

use crate::coords::{ColorRgba, ScreenOrigin, Vec2, Viewport};

use super::shader::{ShaderKind, FRAGMENT_ENTRY_POINT};
use super::RenderCtx;

// ── uniforms ──────────────────────────────────────────────────────────────

#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
pub(super) struct ViewportUniform {
    pub viewport: [f32; 2],
    pub _pad: [f32; 2], // 16-byte alignment
}

impl ViewportUniform {
    pub(super) fn new(viewport: Viewport) -> Self {
        Self { viewport: viewport.uniform_size(), _pad: [0.0; 2] }
    }
}

#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
pub(super) struct TintUniform {
    pub color: [f32; 4],
}

pub(super) fn uniform_min_binding_size<T>() -> std::num::NonZeroU64 {
    std::num::NonZeroU64::new(std::mem::size_of::<T>() as u64)
        .expect("uniform structs are non-empty by construction")
}

pub(super) fn viewport_layout_entry() -> wgpu::BindGroupLayoutEntry {
    wgpu::BindGroupLayoutEntry {
        binding: 0,
        visibility: wgpu::ShaderStages::VERTEX,
        ty: wgpu::BindingType::Buffer {
            ty: wgpu::BufferBindingType::Uniform,
            has_dynamic_offset: false,
            min_binding_size: Some(uniform_min_binding_size::<ViewportUniform>()),
        },
        count: None,
    }
}

// ── vertex types ──────────────────────────────────────────────────────────

/// Unit-quad corner; expanded to a point's footprint in the vertex stage.
#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
pub(super) struct QuadCorner {
    pub corner: [f32; 2],
}

impl QuadCorner {
    const ATTRS: [wgpu::VertexAttribute; 1] = wgpu::vertex_attr_array![0 => Float32x2];

    pub(super) fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<QuadCorner>() as u64,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRS,
        }
    }
}

pub(super) const QUAD_CORNERS: [QuadCorner; 4] = [
    QuadCorner { corner: [0.0, 0.0] },
    QuadCorner { corner: [1.0, 0.0] },
    QuadCorner { corner: [1.0, 1.0] },
    QuadCorner { corner: [0.0, 1.0] },
];

/// Two triangles over four corners listed clockwise from the first.
pub const QUAD_INDICES: [u16; 6] = [0, 1, 2, 0, 2, 3];

/// One point of a point draw (instance data, 28 bytes).
///
///  offset  0  center  [f32; 2]   loc 1
///  offset  8  size    f32        loc 2
///  offset 12  color   [f32; 4]   loc 3
#[repr(C)]
#[derive(Debug, Copy, Clone, Default, PartialEq, Pod, Zeroable)]
pub struct PointInstance {
    pub center: [f32; 2],
    pub size: f32,
    pub color: [f32; 4],
}

impl PointInstance {
    const ATTRS: [wgpu::VertexAttribute; 3] = wgpu::vertex_attr_array![
        1 => Float32x2, // center
        2 => Float32,   // size
        3 => Float32x4  // color
    ];

    #[inline]
    pub fn new(center: Vec2, size: f32, color: ColorRgba) -> Self {
        Self { center: center.to_array(), size, color: color.to_array() }
    }

    pub(super) fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<PointInstance>() as u64,
            step_mode: wgpu::VertexStepMode::Instance,
            attributes: &Self::ATTRS,
        }
    }
}

/// One endpoint of a line list (24 bytes).
#[repr(C)]
#[derive(Debug, Copy, Clone, Default, PartialEq, Pod, Zeroable)]
pub struct LineVertex {
    pub pos: [f32; 2],
    pub color: [f32; 4],
}

impl LineVertex {
    const ATTRS: [wgpu::VertexAttribute; 2] = wgpu::vertex_attr_array![
        0 => Float32x2, // pos
        1 => Float32x4  // color
    ];

    #[inline]
    pub fn new(pos: Vec2, color: ColorRgba) -> Self {
        Self { pos: pos.to_array(), color: color.to_array() }
    }

    pub(super) fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<LineVertex>() as u64,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRS,
        }
    }
}

/// One sprite corner (16 bytes). `uv` uses the asset convention (`v = 0` at
/// the bottom edge); the vertex stage flips it.
#[repr(C)]
#[derive(Debug, Copy, Clone, Default, PartialEq, Pod, Zeroable)]
pub struct SpriteVertex {
    pub pos: [f32; 2],
    pub uv: [f32; 2],
}

impl SpriteVertex {
    const ATTRS: [wgpu::VertexAttribute; 2] = wgpu::vertex_attr_array![
        0 => Float32x2, // pos
        1 => Float32x2  // uv
    ];

    #[inline]
    pub fn new(pos: Vec2, uv: Vec2) -> Self {
        Self { pos: pos.to_array(), uv: uv.to_array() }
    }

    /// Axis-aligned quad covering the whole image, for a top-left origin draw.
    ///
    /// Corner order matches [`QUAD_INDICES`]: top-left, top-right,
    /// bottom-right, bottom-left.
    pub fn quad(origin: Vec2, size: Vec2) -> [SpriteVertex; 4] {
        let (x0, y0) = (origin.x, origin.y);
        let (x1, y1) = (origin.x + size.x, origin.y + size.y);
        [
            SpriteVertex { pos: [x0, y0], uv: [0.0, 1.0] },
            SpriteVertex { pos: [x1, y0], uv: [1.0, 1.0] },
            SpriteVertex { pos: [x1, y1], uv: [1.0, 0.0] },
            SpriteVertex { pos: [x0, y1], uv: [0.0, 0.0] },
        ]
    }

    pub(super) fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<SpriteVertex>() as u64,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRS,
        }
    }
}

// ── pipeline ──────────────────────────────────────────────────────────────

pub(super) struct PipelineSpec<'a> {
    pub kind: ShaderKind,
    pub origin: ScreenOrigin,
    pub bind_group_layout: &'a wgpu::BindGroupLayout,
    pub buffers: &'a [wgpu::VertexBufferLayout<'a>],
    pub topology: wgpu::PrimitiveTopology,
}

/// Builds a straight-alpha color pipeline whose vertex stage is the entry
/// point selected by `desc.origin`.
pub(super) fn create_pipeline(ctx: &RenderCtx<'_>, desc: PipelineSpec<'_>) -> wgpu::RenderPipeline {
    let shader = desc.kind.create_module(ctx.device);

    let pipeline_layout = ctx.device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
        label: Some(desc.kind.label()),
        bind_group_layouts: &[desc.bind_group_layout],
        immediate_size: 0,
    });

    log::debug!(
        "creating {} pipeline ({:?}, entry {})",
        desc.kind.label(),
        ctx.surface_format,
        desc.origin.vertex_entry_point()
    );

    ctx.device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
        label: Some(desc.kind.label()),
        layout: Some(&pipeline_layout),
        vertex: wgpu::VertexState {
            module: &shader,
            entry_point: Some(desc.origin.vertex_entry_point()),
            compilation_options: Default::default(),
            buffers: desc.buffers,
        },
        fragment: Some(wgpu::FragmentState {
            module: &shader,
            entry_point: Some(FRAGMENT_ENTRY_POINT),
            compilation_options: Default::default(),
            targets: &[Some(wgpu::ColorTargetState {
                format: ctx.surface_format,
                blend: Some(wgpu::BlendState::ALPHA_BLENDING),
                write_mask: wgpu::ColorWrites::ALL,
            })],
        }),
        primitive: wgpu::PrimitiveState {
            topology: desc.topology,
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
    })
}

// ── streamed buffers ──────────────────────────────────────────────────────

/// A buffer rewritten every draw, grown to the next power of two on demand.
pub(super) struct StreamBuffer {
    label: &'static str,
    usage: wgpu::BufferUsages,
    buffer: Option<wgpu::Buffer>,
    capacity: u64,
}

impl StreamBuffer {
    pub(super) const fn new(label: &'static str, usage: wgpu::BufferUsages) -> Self {
        Self { label, usage, buffer: None, capacity: 0 }
    }

    /// Uploads `data`, reallocating first if it does not fit.
    pub(super) fn write<T: Pod>(&mut self, ctx: &RenderCtx<'_>, data: &[T]) -> Option<&wgpu::Buffer> {
        let bytes: &[u8] = bytemuck::cast_slice(data);
        // Copies must be 4-byte aligned; u16 index data may be 2 short.
        let required = wgpu::util::align_to(bytes.len() as u64, wgpu::COPY_BUFFER_ALIGNMENT);

        if required > self.capacity || self.buffer.is_none() {
            let new_cap = required.next_power_of_two().max(256);
            self.buffer = Some(ctx.device.create_buffer(&wgpu::BufferDescriptor {
                label: Some(self.label),
                size: new_cap,
                usage: self.usage | wgpu::BufferUsages::COPY_DST,
                mapped_at_creation: false,
            }));
            self.capacity = new_cap;
        }

        let buffer = self.buffer.as_ref()?;
        if bytes.len() as u64 == required {
            ctx.queue.write_buffer(buffer, 0, bytes);
        } else {
            let mut padded = bytes.to_vec();
            padded.resize(required as usize, 0);
            ctx.queue.write_buffer(buffer, 0, &padded);
        }
        Some(buffer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::mem::size_of;

    #[test]
    fn uniform_sizes_are_16_byte_multiples() {
        assert_eq!(size_of::<ViewportUniform>(), 16);
        assert_eq!(size_of::<TintUniform>(), 16);
    }

    #[test]
    fn vertex_strides_match_attribute_tables() {
        assert_eq!(size_of::<QuadCorner>(), 8);
        assert_eq!(size_of::<PointInstance>(), 28);
        assert_eq!(size_of::<LineVertex>(), 24);
        assert_eq!(size_of::<SpriteVertex>(), 16);

        let last = PointInstance::ATTRS[2];
        assert_eq!(last.offset, 12);
        assert_eq!(last.shader_location, 3);
    }

    #[test]
    fn viewport_uniform_is_clamped() {
        let u = ViewportUniform::new(Viewport::new(0.0, 720.0));
        assert_eq!(u.viewport, [1.0, 720.0]);
    }

    #[test]
    fn point_instance_keeps_size_verbatim() {
        let p = PointInstance::new(Vec2::new(3.0, 4.0), -2.5, ColorRgba::white());
        assert_eq!(p.size, -2.5);
        assert_eq!(p.center, [3.0, 4.0]);
    }

    #[test]
    fn sprite_quad_covers_rect_with_asset_uvs() {
        let q = SpriteVertex::quad(Vec2::new(10.0, 20.0), Vec2::new(30.0, 40.0));
        assert_eq!(q[0], SpriteVertex { pos: [10.0, 20.0], uv: [0.0, 1.0] });
        assert_eq!(q[2], SpriteVertex { pos: [40.0, 60.0], uv: [1.0, 0.0] });
        for i in QUAD_INDICES {
            assert!((i as usize) < q.len());
        }
    }
}

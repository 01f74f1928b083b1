use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};

use anyhow::{Context, Result};
use image::RgbaImage;

use crate::render::RenderCtx;

static NEXT_TEXTURE_ID: AtomicU64 = AtomicU64::new(1);

/// Texels are sampled as stored, with no sRGB decode, matching `ImageSampler`.
pub(crate) const SPRITE_TEXTURE_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Rgba8Unorm;

/// Image bound to a sprite draw: texture, view and sampler.
///
/// Stored top row first, exactly as decoded. Sampling clamps to the edge.
pub struct SpriteTexture {
    id: u64,
    _texture: wgpu::Texture,
    view: wgpu::TextureView,
    sampler: wgpu::Sampler,
}

impl SpriteTexture {
    /// Decodes a PNG from disk and uploads it.
    pub fn from_path(ctx: &RenderCtx<'_>, path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let image = image::open(path)
            .with_context(|| format!("failed to decode image {}", path.display()))?
            .to_rgba8();
        log::debug!("loaded {} ({}x{})", path.display(), image.width(), image.height());
        Self::from_image(ctx, &image)
    }

    pub fn from_image(ctx: &RenderCtx<'_>, image: &RgbaImage) -> Result<Self> {
        let (width, height) = image.dimensions();
        anyhow::ensure!(width > 0 && height > 0, "sprite image has zero size");

        let max = ctx.device.limits().max_texture_dimension_2d;
        anyhow::ensure!(
            width <= max && height <= max,
            "sprite image {width}x{height} exceeds device limit {max}"
        );

        let size = wgpu::Extent3d { width, height, depth_or_array_layers: 1 };

        let texture = ctx.device.create_texture(&wgpu::TextureDescriptor {
            label: Some("pixclip sprite texture"),
            size,
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: SPRITE_TEXTURE_FORMAT,
            usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
            view_formats: &[],
        });

        ctx.queue.write_texture(
            wgpu::TexelCopyTextureInfo {
                texture: &texture,
                mip_level: 0,
                origin: wgpu::Origin3d::ZERO,
                aspect: wgpu::TextureAspect::All,
            },
            image.as_raw(),
            wgpu::TexelCopyBufferLayout {
                offset: 0,
                bytes_per_row: Some(4 * width),
                rows_per_image: Some(height),
            },
            size,
        );

        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
        let sampler = ctx.device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some("pixclip sprite sampler"),
            address_mode_u: wgpu::AddressMode::ClampToEdge,
            address_mode_v: wgpu::AddressMode::ClampToEdge,
            address_mode_w: wgpu::AddressMode::ClampToEdge,
            mag_filter: wgpu::FilterMode::Linear,
            min_filter: wgpu::FilterMode::Linear,
            mipmap_filter: wgpu::MipmapFilterMode::Nearest,
            ..Default::default()
        });

        Ok(Self {
            id: NEXT_TEXTURE_ID.fetch_add(1, Ordering::Relaxed),
            _texture: texture,
            view,
            sampler,
        })
    }

    /// Process-unique identity, used to know when a bind group is stale.
    #[inline]
    pub(crate) fn id(&self) -> u64 {
        self.id
    }

    #[inline]
    pub(crate) fn view(&self) -> &wgpu::TextureView {
        &self.view
    }

    #[inline]
    pub(crate) fn sampler(&self) -> &wgpu::Sampler {
        &self.sampler
    }
}

use image::RgbaImage;

use crate::coords::{ColorRgba, Vec2};

/// Something the fragment stage can read a color from.
///
/// Addressing outside [0, 1] is the implementor's policy.
pub trait Sampler {
    fn sample(&self, uv: Vec2) -> ColorRgba;
}

/// Nearest-filtered, clamp-to-edge view over an RGBA8 image.
///
/// `v = 0` addresses the first stored row, as a bound GPU texture does.
/// Channels are normalized to [0, 1] with no sRGB decoding.
#[derive(Debug, Clone, Copy)]
pub struct ImageSampler<'a> {
    image: &'a RgbaImage,
}

impl<'a> ImageSampler<'a> {
    #[inline]
    pub fn new(image: &'a RgbaImage) -> Self {
        Self { image }
    }
}

impl Sampler for ImageSampler<'_> {
    fn sample(&self, uv: Vec2) -> ColorRgba {
        let (w, h) = self.image.dimensions();
        if w == 0 || h == 0 {
            return ColorRgba::transparent();
        }
        let x = texel_index(uv.x, w);
        let y = texel_index(uv.y, h);
        ColorRgba::from_rgba_u8(self.image.get_pixel(x, y).0)
    }
}

fn texel_index(coord: f32, len: u32) -> u32 {
    let i = (coord * len as f32).floor();
    // NaN falls into the first branch.
    if !(i > 0.0) { 0 } else { (i as u32).min(len - 1) }
}

/// Multiplies a sampled color by the draw's tint, channel by channel.
///
/// No clamping and no premultiplication beyond the multiply itself.
#[inline]
pub fn tinted_sample(sample: ColorRgba, tint: ColorRgba) -> ColorRgba {
    sample * tint
}

/// Full sprite fragment stage: sample at the (already flipped) `uv`, then tint.
#[inline]
pub fn shade_sprite<S: Sampler + ?Sized>(sampler: &S, uv: Vec2, tint: ColorRgba) -> ColorRgba {
    tinted_sample(sampler.sample(uv), tint)
}

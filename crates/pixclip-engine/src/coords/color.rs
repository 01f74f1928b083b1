use core::ops::Mul;

/// RGBA color with `f32` channels, nominally in [0, 1].
///
/// No clamping and no premultiplication happens anywhere in this type; values
/// pass through stages exactly as given.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct ColorRgba {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl ColorRgba {
    #[inline]
    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    #[inline]
    pub const fn transparent() -> Self {
        Self::new(0.0, 0.0, 0.0, 0.0)
    }

    #[inline]
    pub const fn white() -> Self {
        Self::new(1.0, 1.0, 1.0, 1.0)
    }

    #[inline]
    pub const fn to_array(self) -> [f32; 4] {
        [self.r, self.g, self.b, self.a]
    }

    /// Normalizes 8-bit channels to [0, 1] without any transfer-function conversion.
    #[inline]
    pub fn from_rgba_u8(c: [u8; 4]) -> Self {
        Self::new(
            f32::from(c[0]) / 255.0,
            f32::from(c[1]) / 255.0,
            f32::from(c[2]) / 255.0,
            f32::from(c[3]) / 255.0,
        )
    }
}

/// Per-channel (Hadamard) product.
impl Mul for ColorRgba {
    type Output = ColorRgba;
    #[inline]
    fn mul(self, rhs: ColorRgba) -> ColorRgba {
        ColorRgba::new(self.r * rhs.r, self.g * rhs.g, self.b * rhs.b, self.a * rhs.a)
    }
}

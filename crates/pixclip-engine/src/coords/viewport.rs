/// Viewport size in pixels, supplied once per draw batch.
///
/// Both dimensions must be strictly positive before any mapping runs. The
/// mappers only `debug_assert!` this; renderers clamp the uploaded uniform
/// to at least one pixel per axis.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    #[inline]
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    #[inline]
    pub fn is_valid(self) -> bool {
        self.width > 0.0 && self.height > 0.0 && self.width.is_finite() && self.height.is_finite()
    }

    /// Size as uploaded to the GPU, never below one pixel per axis.
    #[inline]
    pub fn uniform_size(self) -> [f32; 2] {
        [self.width.max(1.0), self.height.max(1.0)]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn positive_finite_is_valid() {
        assert!(Viewport::new(800.0, 600.0).is_valid());
    }

    #[test]
    fn zero_or_non_finite_is_invalid() {
        assert!(!Viewport::new(0.0, 600.0).is_valid());
        assert!(!Viewport::new(800.0, 0.0).is_valid());
        assert!(!Viewport::new(-1.0, 600.0).is_valid());
        assert!(!Viewport::new(f32::INFINITY, 600.0).is_valid());
        assert!(!Viewport::new(800.0, f32::NAN).is_valid());
    }

    #[test]
    fn uniform_size_clamps_to_one_pixel() {
        assert_eq!(Viewport::new(0.0, 0.5).uniform_size(), [1.0, 1.0]);
        assert_eq!(Viewport::new(640.0, 480.0).uniform_size(), [640.0, 480.0]);
    }
}

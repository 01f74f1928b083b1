use super::{Vec2, Viewport};

/// Homogeneous clip-space position as handed to the rasterizer.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct ClipPos {
    pub x: f32,
    pub y: f32,
    pub z: f32,
    pub w: f32,
}

impl ClipPos {
    /// Position on the `z = 0` plane with `w = 1`.
    #[inline]
    pub const fn planar(x: f32, y: f32) -> Self {
        Self { x, y, z: 0.0, w: 1.0 }
    }
}

/// Maps a screen position whose origin is the bottom-left corner (+Y up).
///
/// `(0, 0)` lands on `(-1, -1)` and `(width, height)` on `(1, 1)`.
///
/// The viewport must be valid; a zero dimension divides by zero.
#[inline]
pub fn clip_from_bottom_left(p: Vec2, viewport: Viewport) -> ClipPos {
    debug_assert!(viewport.is_valid(), "invalid viewport {viewport:?}");
    let x = (p.x / viewport.width) * 2.0 - 1.0;
    let y = (p.y / viewport.height) * 2.0 - 1.0;
    ClipPos::planar(x, y)
}

/// Maps a screen position whose origin is the top-left corner (+Y down).
///
/// `(0, 0)` lands on `(-1, 1)` and `(0, height)` on `(-1, -1)`.
///
/// The viewport must be valid; a zero dimension divides by zero.
#[inline]
pub fn clip_from_top_left(p: Vec2, viewport: Viewport) -> ClipPos {
    debug_assert!(viewport.is_valid(), "invalid viewport {viewport:?}");
    let x = (p.x / viewport.width) * 2.0 - 1.0;
    let y = 1.0 - (p.y / viewport.height) * 2.0;
    ClipPos::planar(x, y)
}

/// Which screen-space convention a draw's geometry already uses.
///
/// Picked by the caller per draw; it only selects between the two mappers
/// above (and their WGSL twins), it does not parameterize a shared formula.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq, Hash)]
pub enum ScreenOrigin {
    #[default]
    TopLeft,
    BottomLeft,
}

impl ScreenOrigin {
    #[inline]
    pub fn to_clip(self, p: Vec2, viewport: Viewport) -> ClipPos {
        match self {
            ScreenOrigin::TopLeft => clip_from_top_left(p, viewport),
            ScreenOrigin::BottomLeft => clip_from_bottom_left(p, viewport),
        }
    }

    /// WGSL vertex entry point that runs the same mapping on the GPU.
    #[inline]
    pub const fn vertex_entry_point(self) -> &'static str {
        match self {
            ScreenOrigin::TopLeft => "vs_top_left",
            ScreenOrigin::BottomLeft => "vs_bottom_left",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const VIEWPORTS: [Viewport; 4] = [
        Viewport::new(1.0, 1.0),
        Viewport::new(800.0, 600.0),
        Viewport::new(1920.0, 1080.0),
        Viewport::new(37.5, 4096.0),
    ];

    fn steps(max: f32) -> impl Iterator<Item = f32> {
        (0..=16).map(move |i| max * i as f32 / 16.0)
    }

    // ── bottom-left ───────────────────────────────────────────────────────

    #[test]
    fn bottom_left_corners() {
        for v in VIEWPORTS {
            let lo = clip_from_bottom_left(Vec2::new(0.0, 0.0), v);
            let hi = clip_from_bottom_left(Vec2::new(v.width, v.height), v);
            assert_eq!((lo.x, lo.y), (-1.0, -1.0));
            assert_eq!((hi.x, hi.y), (1.0, 1.0));
        }
    }

    #[test]
    fn bottom_left_stays_in_clip_range() {
        for v in VIEWPORTS {
            for px in steps(v.width) {
                for py in steps(v.height) {
                    let c = clip_from_bottom_left(Vec2::new(px, py), v);
                    assert!((-1.0..=1.0).contains(&c.x), "x {} for {px},{py} in {v:?}", c.x);
                    assert!((-1.0..=1.0).contains(&c.y), "y {} for {px},{py} in {v:?}", c.y);
                }
            }
        }
    }

    #[test]
    fn bottom_left_center_is_origin() {
        let c = clip_from_bottom_left(Vec2::new(400.0, 300.0), Viewport::new(800.0, 600.0));
        assert_eq!((c.x, c.y), (0.0, 0.0));
    }

    // ── top-left ──────────────────────────────────────────────────────────

    #[test]
    fn top_left_corners() {
        for v in VIEWPORTS {
            let top = clip_from_top_left(Vec2::new(0.0, 0.0), v);
            let bottom = clip_from_top_left(Vec2::new(0.0, v.height), v);
            assert_eq!((top.x, top.y), (-1.0, 1.0));
            assert_eq!((bottom.x, bottom.y), (-1.0, -1.0));
        }
    }

    #[test]
    fn top_left_stays_in_clip_range() {
        for v in VIEWPORTS {
            for px in steps(v.width) {
                for py in steps(v.height) {
                    let c = clip_from_top_left(Vec2::new(px, py), v);
                    assert!((-1.0..=1.0).contains(&c.x), "x {} for {px},{py} in {v:?}", c.x);
                    assert!((-1.0..=1.0).contains(&c.y), "y {} for {px},{py} in {v:?}", c.y);
                }
            }
        }
    }

    #[test]
    fn top_left_inverts_vertical_axis_only() {
        let v = Viewport::new(800.0, 600.0);
        for px in steps(v.width) {
            for py in steps(v.height) {
                let a = clip_from_bottom_left(Vec2::new(px, py), v);
                let b = clip_from_top_left(Vec2::new(px, py), v);
                assert_eq!(a.x, b.x);
                assert!((a.y + b.y).abs() < 1e-6, "{} vs {}", a.y, b.y);
            }
        }
    }

    // ── depth / w ─────────────────────────────────────────────────────────

    #[test]
    fn depth_is_zero_and_w_is_one() {
        let v = Viewport::new(320.0, 240.0);
        for c in [
            clip_from_bottom_left(Vec2::new(12.0, 99.0), v),
            clip_from_top_left(Vec2::new(12.0, 99.0), v),
        ] {
            assert_eq!(c.z, 0.0);
            assert_eq!(c.w, 1.0);
        }
    }

    // ── ScreenOrigin ──────────────────────────────────────────────────────

    #[test]
    fn origin_dispatches_to_matching_mapper() {
        let v = Viewport::new(640.0, 480.0);
        let p = Vec2::new(100.0, 50.0);
        assert_eq!(ScreenOrigin::TopLeft.to_clip(p, v), clip_from_top_left(p, v));
        assert_eq!(ScreenOrigin::BottomLeft.to_clip(p, v), clip_from_bottom_left(p, v));
    }

    #[test]
    fn origin_entry_points_are_distinct() {
        assert_ne!(
            ScreenOrigin::TopLeft.vertex_entry_point(),
            ScreenOrigin::BottomLeft.vertex_entry_point()
        );
    }
}

use crate::coords::{ColorRgba, Vec2};

/// Per-vertex color goes to the next stage untouched.
#[inline]
pub fn forward_color(color: ColorRgba) -> ColorRgba {
    color
}

/// Inverts the vertical texture coordinate: `(u, v) -> (u, 1 - v)`.
///
/// The asset pipeline puts `v = 0` on the bottom edge of an image, while a
/// bound texture stores its top row first and samples that row at `v = 0`.
/// Applied once, in the sprite vertex stage, and nowhere else.
#[inline]
pub fn flip_tex_coords(uv: Vec2) -> Vec2 {
    Vec2::new(uv.x, 1.0 - uv.y)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn color_is_forwarded_bit_for_bit() {
        for c in [
            ColorRgba::new(0.1, 0.2, 0.3, 0.4),
            ColorRgba::new(-1.0, 2.0, 0.0, 7.5),
            ColorRgba::transparent(),
        ] {
            assert_eq!(forward_color(c), c);
        }
    }

    #[test]
    fn flip_inverts_v_and_keeps_u() {
        let f = flip_tex_coords(Vec2::new(0.3, 0.25));
        assert_eq!(f, Vec2::new(0.3, 0.75));
        assert_eq!(flip_tex_coords(Vec2::new(0.0, 0.0)), Vec2::new(0.0, 1.0));
        assert_eq!(flip_tex_coords(Vec2::new(1.0, 1.0)), Vec2::new(1.0, 0.0));
    }

    #[test]
    fn flip_twice_is_identity() {
        for v in [0.0, 0.25, 0.5, 0.75, 1.0] {
            let uv = Vec2::new(0.5, v);
            assert_eq!(flip_tex_coords(flip_tex_coords(uv)), uv);
        }
    }

    #[test]
    fn flip_fixed_point_is_half() {
        assert_eq!(flip_tex_coords(Vec2::new(0.0, 0.5)).y, 0.5);
        assert_ne!(flip_tex_coords(Vec2::new(0.0, 0.25)).y, 0.25);
    }
}

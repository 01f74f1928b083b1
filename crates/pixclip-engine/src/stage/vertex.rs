use crate::coords::{ClipPos, ColorRgba, ScreenOrigin, Vec2, Viewport};

use super::passthrough::{flip_tex_coords, forward_color};

// ── inputs ────────────────────────────────────────────────────────────────

/// One point of a point draw.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct PointInput {
    pub pos: Vec2,
    pub color: ColorRgba,
    /// Side length in pixels. Not clamped or validated.
    pub size: f32,
}

/// One endpoint of a line-list draw.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct LineInput {
    pub pos: Vec2,
    pub color: ColorRgba,
}

/// One corner of a textured sprite.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct SpriteInput {
    pub pos: Vec2,
    /// Texture coordinates as produced by the asset pipeline (`v = 0` on the bottom edge).
    pub uv: Vec2,
}

// ── outputs ───────────────────────────────────────────────────────────────

#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct PointOutput {
    pub clip: ClipPos,
    /// Rasterizer size hint, identical to the input size.
    pub size: f32,
    pub color: ColorRgba,
}

#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct ColoredOutput {
    pub clip: ClipPos,
    pub color: ColorRgba,
}

#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct TexturedOutput {
    pub clip: ClipPos,
    /// Flipped texture coordinates, ready for sampling.
    pub uv: Vec2,
}

// ── stages ────────────────────────────────────────────────────────────────

pub fn point_stage(origin: ScreenOrigin, input: PointInput, viewport: Viewport) -> PointOutput {
    PointOutput {
        clip: origin.to_clip(input.pos, viewport),
        size: input.size,
        color: forward_color(input.color),
    }
}

pub fn line_stage(origin: ScreenOrigin, input: LineInput, viewport: Viewport) -> ColoredOutput {
    ColoredOutput {
        clip: origin.to_clip(input.pos, viewport),
        color: forward_color(input.color),
    }
}

pub fn sprite_stage(origin: ScreenOrigin, input: SpriteInput, viewport: Viewport) -> TexturedOutput {
    TexturedOutput {
        clip: origin.to_clip(input.pos, viewport),
        uv: flip_tex_coords(input.uv),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coords::{clip_from_bottom_left, clip_from_top_left};

    const VP: Viewport = Viewport::new(200.0, 100.0);

    #[test]
    fn point_forwards_size_without_clamping() {
        for size in [0.0, 1.0, 64.0, -3.0, 10_000.0] {
            let out = point_stage(
                ScreenOrigin::TopLeft,
                PointInput { pos: Vec2::new(10.0, 10.0), color: ColorRgba::white(), size },
                VP,
            );
            assert_eq!(out.size, size);
        }
    }

    #[test]
    fn point_uses_selected_origin() {
        let input = PointInput { pos: Vec2::new(50.0, 25.0), color: ColorRgba::white(), size: 4.0 };
        let tl = point_stage(ScreenOrigin::TopLeft, input, VP);
        let bl = point_stage(ScreenOrigin::BottomLeft, input, VP);
        assert_eq!(tl.clip, clip_from_top_left(input.pos, VP));
        assert_eq!(bl.clip, clip_from_bottom_left(input.pos, VP));
        assert_eq!((tl.clip.x, tl.clip.y), (-0.5, 0.5));
        assert_eq!((bl.clip.x, bl.clip.y), (-0.5, -0.5));
    }

    #[test]
    fn line_forwards_color() {
        let color = ColorRgba::new(0.9, 0.1, 0.4, 0.5);
        let out = line_stage(
            ScreenOrigin::BottomLeft,
            LineInput { pos: Vec2::new(200.0, 100.0), color },
            VP,
        );
        assert_eq!(out.color, color);
        assert_eq!((out.clip.x, out.clip.y), (1.0, 1.0));
    }

    #[test]
    fn sprite_flips_v_once() {
        let out = sprite_stage(
            ScreenOrigin::TopLeft,
            SpriteInput { pos: Vec2::new(0.0, 0.0), uv: Vec2::new(0.25, 0.0) },
            VP,
        );
        assert_eq!(out.uv, Vec2::new(0.25, 1.0));
        assert_eq!((out.clip.x, out.clip.y), (-1.0, 1.0));
    }
}

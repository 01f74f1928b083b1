//! Coordinate and color types shared by the CPU stages and the GPU renderers.
//!
//! Screen space:
//! - Pixels relative to the viewport
//! - Origin is chosen per draw (`ScreenOrigin`), never detected
//!
//! Clip space:
//! - Visible range is [-1, 1] on both axes
//! - Depth is always 0, `w` is always 1

mod clip;
mod color;
mod vec2;
mod viewport;

pub use clip::{clip_from_bottom_left, clip_from_top_left, ClipPos, ScreenOrigin};
pub use color::ColorRgba;
pub use vec2::Vec2;
pub use viewport::Viewport;

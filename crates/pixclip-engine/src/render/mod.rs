//! Thin wgpu draw helpers for points, lines and sprites.
//!
//! The caller owns the device, the frame and the geometry; these renderers
//! only own their pipelines and the buffers they stream into.
//!
//! Convention:
//! - Geometry is in screen pixels; each renderer is built with a fixed
//!   `ScreenOrigin` that picks the vertex entry point.
//! - The viewport uniform is written on every draw.

mod common;
mod ctx;
mod lines;
mod points;
mod shader;
mod sprites;
mod texture;

pub use common::{LineVertex, PointInstance, SpriteVertex, QUAD_INDICES};
pub use ctx::{RenderCtx, RenderTarget};
pub use lines::LineRenderer;
pub use points::PointRenderer;
pub use sprites::SpriteRenderer;
pub use texture::SpriteTexture;

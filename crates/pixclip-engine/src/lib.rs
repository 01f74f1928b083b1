//! pixclip engine crate.
//!
//! Maps screen-space geometry to clip space, forwards per-vertex attributes,
//! and applies a uniform tint to sampled images, both as pure CPU stages and
//! as WGSL shaders behind thin wgpu renderers.

pub mod coords;
pub mod logging;
#[cfg(feature = "render")]
pub mod render;
pub mod stage;

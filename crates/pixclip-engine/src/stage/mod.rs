//! CPU evaluation of the per-vertex and per-fragment stages.
//!
//! Every function here is pure and mirrors one WGSL stage under
//! `render/shaders`. They exist so that the mapping rules can be checked,
//! and used for hit-testing or picking, without a GPU.

mod fragment;
mod passthrough;
mod vertex;

pub use fragment::{shade_sprite, tinted_sample, ImageSampler, Sampler};
pub use passthrough::{flip_tex_coords, forward_color};
pub use vertex::{
    line_stage, point_stage, sprite_stage, ColoredOutput, LineInput, PointInput, PointOutput,
    SpriteInput, TexturedOutput,
};

//! pixmix combines the per-pixel output of two shader programs into one.
//!
//! A composite either blends a *destination* and a *source* shader with a [`BlendMode`], or
//! interpolates between them by a fixed weight. Composites are plain shader nodes, so they nest
//! freely and can be persisted, evaluated on the raster pipeline, or lowered to GPU processors.
//!
//! # Pipeline overview
//!
//! 1. **Construct**: [`make_blend`] / [`make_lerp`] build nodes, collapsing degenerate
//!    configurations (Clear/Src/Dst modes, boundary weights, identical children) into a child or
//!    a constant instead of allocating a composite.
//! 2. **Append**: [`ShaderProgram::build`] asks the graph to append stages to a
//!    [`RasterPipeline`]. Each composite runs its first child, pins that result in a scratch
//!    buffer, runs its second child, then appends one merge stage.
//! 3. **Evaluate**: [`ShaderProgram::shade_span`] or [`render_rgba8`] produce premultiplied
//!    colors.
//! 4. **Persist** (optional): [`serialize_shader`] / [`deserialize_shader`]; reading re-runs the
//!    factories so stored graphs collapse exactly like freshly built ones.
//!
//! Design constraints:
//!
//! - **No unsafe**: `unsafe` is forbidden in this crate.
//! - **Immutable nodes**: graphs are `Arc`-shared and safe to evaluate from many threads; scratch
//!   buffers belong to one build and are never shared.
//! - **Premultiplied** colors everywhere inside a pipeline.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod blend;
mod flatten;
mod foundation;
#[cfg(feature = "gpu")]
mod gpu;
mod pipeline;
mod render;
mod scene;
mod shader;

pub use blend::equations::blend_color;
pub use blend::mode::BlendMode;
pub use flatten::buffer::{MAX_NESTING_DEPTH, PAINT_COLOR_TAG, ReadBuffer, WriteBuffer};
pub use flatten::{deserialize_shader, serialize_shader};
pub use foundation::core::{Color4f, Paint, Point, Rgba8Premul};
pub use foundation::error::{PixmixError, PixmixResult};
#[cfg(feature = "gpu")]
pub use gpu::processor::{FpArgs, FragmentProcessor, make_from_two_processors};
pub use pipeline::builder::{PipelineCaps, RasterOpts, RasterPipeline, StageArena, StageRec};
pub use pipeline::program::ShaderProgram;
pub use pipeline::stage::{GradientCtx, MAX_STRIDE, SCRATCH_LEN, ScratchId, Stage};
pub use render::{FrameRGBA, RenderOpts, render_rgba8};
pub use scene::Scene;
pub use shader::color::ColorShader;
pub use shader::compose::{BlendShader, LerpShader};
pub use shader::factory::{make_blend, make_color, make_lerp, make_linear_gradient};
pub use shader::gradient::LinearGradientShader;
pub use shader::{Input, Shader, ShaderKind, ShaderRef};

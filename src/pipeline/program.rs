use crate::foundation::core::{Color4f, Paint};
use crate::foundation::error::PixmixResult;
use crate::pipeline::builder::{RasterOpts, RasterPipeline, StageArena, StageRec};
use crate::shader::Input;

/// A built pipeline together with the arena that owns its scratch buffers.
///
/// Programs are cheap to rebuild and are not shared: each thread that evaluates a shader graph
/// builds its own.
#[derive(Debug)]
pub struct ShaderProgram {
    pipeline: RasterPipeline,
    arena: StageArena,
}

impl ShaderProgram {
    /// Append `input`'s stages to a fresh pipeline configured by `opts`.
    #[tracing::instrument(skip_all, fields(lane_width = opts.lane_width))]
    pub fn build(input: &Input, paint: &Paint, opts: &RasterOpts) -> PixmixResult<Self> {
        opts.validate()?;
        let mut pipeline = RasterPipeline::new(*opts);
        let mut arena = StageArena::default();
        {
            let mut rec = StageRec {
                pipeline: &mut pipeline,
                alloc: &mut arena,
                paint,
            };
            input.append_stages(&mut rec)?;
        }
        tracing::debug!(
            stages = pipeline.len(),
            scratch_buffers = arena.len(),
            "built shader program"
        );
        Ok(Self { pipeline, arena })
    }

    /// The underlying stage list.
    pub fn pipeline(&self) -> &RasterPipeline {
        &self.pipeline
    }

    /// Scratch buffers allocated while building.
    pub fn scratch_buffers(&self) -> usize {
        self.arena.len()
    }

    /// Shade `out.len()` pixels of row `y`, starting at column `x`.
    pub fn shade_span(&mut self, x: u32, y: u32, out: &mut [Color4f]) -> PixmixResult<()> {
        self.pipeline.run(&mut self.arena, x, y, out)
    }

    /// Shade a single pixel.
    pub fn shade_pixel(&mut self, x: u32, y: u32) -> PixmixResult<Color4f> {
        let mut out = [Color4f::TRANSPARENT];
        self.shade_span(x, y, &mut out)?;
        Ok(out[0])
    }
}

#[cfg(test)]
#[path = "../../tests/unit/pipeline/program.rs"]
mod tests;

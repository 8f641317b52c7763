use smallvec::SmallVec;

use crate::blend::mode::BlendMode;
use crate::foundation::core::{Color4f, Paint};
use crate::foundation::error::{PixmixError, PixmixResult};
use crate::pipeline::stage::{GradientCtx, MAX_STRIDE, SCRATCH_LEN, ScratchId, Stage};

/// Features a pipeline configuration provides to shaders.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct PipelineCaps {
    /// Whether gradient stages may be appended.
    pub gradients: bool,
}

impl Default for PipelineCaps {
    fn default() -> Self {
        Self { gradients: true }
    }
}

/// Raster pipeline configuration.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct RasterOpts {
    /// Pixels processed per batch, `1..=MAX_STRIDE`.
    pub lane_width: usize,
    /// Capabilities shaders may rely on.
    pub caps: PipelineCaps,
}

impl Default for RasterOpts {
    fn default() -> Self {
        Self {
            lane_width: MAX_STRIDE,
            caps: PipelineCaps::default(),
        }
    }
}

impl RasterOpts {
    /// Check option ranges.
    pub fn validate(&self) -> PixmixResult<()> {
        if self.lane_width == 0 || self.lane_width > MAX_STRIDE {
            return Err(PixmixError::validation(format!(
                "lane_width must be in 1..={MAX_STRIDE}, got {}",
                self.lane_width
            )));
        }
        Ok(())
    }
}

/// Build-scoped storage for scratch buffers.
///
/// Buffers live exactly as long as the arena; an arena belongs to one build and is never shared
/// between threads while a pipeline runs against it.
#[derive(Debug, Default)]
pub struct StageArena {
    buffers: Vec<Box<[f32; SCRATCH_LEN]>>,
}

impl StageArena {
    /// Allocate a zeroed scratch buffer and return its handle.
    pub fn alloc_scratch(&mut self) -> ScratchId {
        let id = ScratchId(self.buffers.len() as u32);
        self.buffers.push(Box::new([0.0; SCRATCH_LEN]));
        id
    }

    /// Number of scratch buffers allocated so far.
    pub fn len(&self) -> usize {
        self.buffers.len()
    }

    /// Whether no scratch buffer has been allocated.
    pub fn is_empty(&self) -> bool {
        self.buffers.is_empty()
    }

    pub(crate) fn buffer(&self, id: ScratchId) -> PixmixResult<&[f32; SCRATCH_LEN]> {
        self.buffers
            .get(id.0 as usize)
            .map(|b| &**b)
            .ok_or_else(|| unknown_scratch(id))
    }

    pub(crate) fn buffer_mut(&mut self, id: ScratchId) -> PixmixResult<&mut [f32; SCRATCH_LEN]> {
        self.buffers
            .get_mut(id.0 as usize)
            .map(|b| &mut **b)
            .ok_or_else(|| unknown_scratch(id))
    }
}

fn unknown_scratch(id: ScratchId) -> PixmixError {
    PixmixError::Other(anyhow::anyhow!("{id} was not allocated by this arena"))
}

/// An append-only list of stages plus the configuration they were built for.
#[derive(Clone, Debug)]
pub struct RasterPipeline {
    stages: SmallVec<[Stage; 8]>,
    opts: RasterOpts,
}

impl RasterPipeline {
    /// Empty pipeline for the given configuration.
    pub fn new(opts: RasterOpts) -> Self {
        Self {
            stages: SmallVec::new(),
            opts,
        }
    }

    /// Configuration this pipeline was created with.
    pub fn opts(&self) -> &RasterOpts {
        &self.opts
    }

    /// Appended stages, in execution order.
    pub fn stages(&self) -> &[Stage] {
        &self.stages
    }

    /// Number of appended stages.
    pub fn len(&self) -> usize {
        self.stages.len()
    }

    /// Whether nothing has been appended.
    pub fn is_empty(&self) -> bool {
        self.stages.is_empty()
    }

    /// Load a premultiplied constant into the working registers.
    pub fn append_constant_color(&mut self, color: Color4f) {
        self.stages.push(Stage::ConstantColor(color));
    }

    /// Load a per-pixel gradient color into the working registers.
    pub fn append_linear_gradient(&mut self, ctx: GradientCtx) -> PixmixResult<()> {
        if !self.opts.caps.gradients {
            return Err(PixmixError::stage_append(
                "linear gradient requires the 'gradients' pipeline capability",
            ));
        }
        self.stages.push(Stage::LinearGradient(ctx));
        Ok(())
    }

    /// Store the working registers into `buffer`.
    pub fn append_store_src(&mut self, buffer: ScratchId) {
        self.stages.push(Stage::StoreSrc(buffer));
    }

    /// Load `buffer` into the destination registers.
    pub fn append_load_dst(&mut self, buffer: ScratchId) {
        self.stages.push(Stage::LoadDst(buffer));
    }

    /// Blend the working registers (source) onto the destination registers.
    pub fn append_blend(&mut self, mode: BlendMode) {
        self.stages.push(Stage::Blend(mode));
    }

    /// Interpolate from the destination registers towards the working registers by `weight`.
    pub fn append_lerp_1_float(&mut self, weight: f32) {
        self.stages.push(Stage::Lerp1Float(weight));
    }
}

/// Everything a shader needs while appending its stages.
pub struct StageRec<'a> {
    /// Pipeline under construction.
    pub pipeline: &'a mut RasterPipeline,
    /// Build-scoped scratch allocator.
    pub alloc: &'a mut StageArena,
    /// Ambient paint; resolves [`crate::Input::PaintColor`].
    pub paint: &'a Paint,
}

#[cfg(test)]
#[path = "../../tests/unit/pipeline/builder.rs"]
mod tests;

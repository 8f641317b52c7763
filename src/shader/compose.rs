//! Two-input composites: blend by mode, or interpolate by weight.
//!
//! Both run their children through [`append_two_shaders`] and differ only in the final merge
//! stage. Instances are created by [`crate::make_blend`] / [`crate::make_lerp`], which never build
//! a composite for a degenerate configuration.

use crate::blend::mode::BlendMode;
use crate::flatten::buffer::{ReadBuffer, WriteBuffer};
use crate::foundation::error::{PixmixError, PixmixResult};
use crate::pipeline::builder::StageRec;
use crate::pipeline::stage::ScratchId;
use crate::shader::factory::{make_blend, make_lerp};
use crate::shader::{Input, Shader, ShaderKind};

#[cfg(feature = "gpu")]
use crate::gpu::processor::{FpArgs, FragmentProcessor, make_from_two_processors};

/// Append `first`, pin its output in a fresh scratch buffer, then append `second`.
///
/// On success the working registers hold `second`'s output and the returned buffer holds
/// `first`'s. A child that cannot append aborts the whole sequence.
pub(crate) fn append_two_shaders(
    rec: &mut StageRec<'_>,
    first: &Input,
    second: &Input,
) -> PixmixResult<ScratchId> {
    let storage = rec.alloc.alloc_scratch();

    first.append_stages(rec)?;
    rec.pipeline.append_store_src(storage);

    second.append_stages(rec)?;
    Ok(storage)
}

/// `mode(src, dst)` per pixel.
#[derive(Clone, Debug)]
pub struct BlendShader {
    dst: Input,
    src: Input,
    mode: BlendMode,
}

impl BlendShader {
    // `mode` is never Clear/Src/Dst here; the factory handles those.
    pub(crate) fn new(mode: BlendMode, dst: Input, src: Input) -> Self {
        debug_assert!(!mode.is_degenerate());
        Self { dst, src, mode }
    }

    /// Blend mode applied to the children.
    pub fn mode(&self) -> BlendMode {
        self.mode
    }

    /// Destination child.
    pub fn dst(&self) -> &Input {
        &self.dst
    }

    /// Source child.
    pub fn src(&self) -> &Input {
        &self.src
    }

    pub(crate) fn unflatten(buffer: &mut ReadBuffer<'_>) -> PixmixResult<Input> {
        let dst = buffer.read_shader()?;
        let src = buffer.read_shader()?;
        let raw = buffer.read_u32()?;

        // Validate before converting to the enum.
        let Some(mode) = BlendMode::from_ordinal(raw) else {
            tracing::warn!(ordinal = raw, "rejecting stored blend with unknown mode");
            return Err(PixmixError::malformed(format!(
                "blend mode ordinal {raw} exceeds {}",
                BlendMode::LAST_MODE.ordinal()
            )));
        };
        Ok(make_blend(mode, dst, src))
    }
}

impl Shader for BlendShader {
    fn kind(&self) -> ShaderKind {
        ShaderKind::Blend
    }

    fn append_stages(&self, rec: &mut StageRec<'_>) -> PixmixResult<()> {
        let res0 = append_two_shaders(rec, &self.dst, &self.src)?;
        rec.pipeline.append_load_dst(res0);
        rec.pipeline.append_blend(self.mode);
        Ok(())
    }

    fn flatten(&self, buffer: &mut WriteBuffer) {
        buffer.write_shader(&self.dst);
        buffer.write_shader(&self.src);
        buffer.write_u32(self.mode.ordinal());
    }

    #[cfg(feature = "gpu")]
    fn as_fragment_processor(&self, args: &FpArgs<'_>) -> Option<FragmentProcessor> {
        let fp_dst = self.dst.as_fragment_processor(args)?;
        let fp_src = self.src.as_fragment_processor(args)?;
        Some(make_from_two_processors(fp_src, fp_dst, self.mode))
    }

    fn children(&self) -> Vec<&Input> {
        vec![&self.dst, &self.src]
    }

    fn label(&self) -> String {
        format!("blend({})", self.mode)
    }
}

/// `dst + weight * (src - dst)` per pixel.
#[derive(Clone, Debug)]
pub struct LerpShader {
    dst: Input,
    src: Input,
    weight: f32,
}

impl LerpShader {
    // `0 < weight < 1`; the factory handles everything else.
    pub(crate) fn new(weight: f32, dst: Input, src: Input) -> Self {
        debug_assert!(weight > 0.0 && weight < 1.0);
        Self { dst, src, weight }
    }

    /// Interpolation weight, strictly between 0 and 1.
    pub fn weight(&self) -> f32 {
        self.weight
    }

    /// Destination child (weight 0).
    pub fn dst(&self) -> &Input {
        &self.dst
    }

    /// Source child (weight 1).
    pub fn src(&self) -> &Input {
        &self.src
    }

    pub(crate) fn unflatten(buffer: &mut ReadBuffer<'_>) -> PixmixResult<Input> {
        let dst = buffer.read_shader()?;
        let src = buffer.read_shader()?;
        let weight = buffer.read_f32()?;
        make_lerp(weight, dst, src).map_err(|e| {
            tracing::warn!(error = %e, "rejecting stored lerp");
            PixmixError::malformed(format!("stored lerp: {e}"))
        })
    }
}

impl Shader for LerpShader {
    fn kind(&self) -> ShaderKind {
        ShaderKind::Lerp
    }

    fn append_stages(&self, rec: &mut StageRec<'_>) -> PixmixResult<()> {
        let res0 = append_two_shaders(rec, &self.dst, &self.src)?;
        rec.pipeline.append_load_dst(res0);
        rec.pipeline.append_lerp_1_float(self.weight);
        Ok(())
    }

    fn flatten(&self, buffer: &mut WriteBuffer) {
        buffer.write_shader(&self.dst);
        buffer.write_shader(&self.src);
        buffer.write_f32(self.weight);
    }

    // No GPU interpolation combinator yet; callers fall back to the raster path.
    #[cfg(feature = "gpu")]
    fn as_fragment_processor(&self, _args: &FpArgs<'_>) -> Option<FragmentProcessor> {
        None
    }

    fn children(&self) -> Vec<&Input> {
        vec![&self.dst, &self.src]
    }

    fn label(&self) -> String {
        format!("lerp({})", self.weight)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/shader/compose.rs"]
mod tests;

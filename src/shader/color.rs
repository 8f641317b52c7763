use crate::flatten::buffer::{ReadBuffer, WriteBuffer};
use crate::foundation::core::Color4f;
use crate::foundation::error::PixmixResult;
use crate::pipeline::builder::StageRec;
use crate::shader::{Input, Shader, ShaderKind};

#[cfg(feature = "gpu")]
use crate::gpu::processor::{FpArgs, FragmentProcessor};

/// Produces one color everywhere.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ColorShader {
    color: Color4f, // straight alpha
}

impl ColorShader {
    /// Constant shader for a straight-alpha color.
    pub fn new(color: Color4f) -> Self {
        Self { color }
    }

    /// The straight-alpha color this shader was built from.
    pub fn color(&self) -> Color4f {
        self.color
    }

    pub(crate) fn unflatten(buffer: &mut ReadBuffer<'_>) -> PixmixResult<Input> {
        let color = buffer.read_color4f()?;
        Ok(Input::shader(Self::new(color)))
    }
}

impl Shader for ColorShader {
    fn kind(&self) -> ShaderKind {
        ShaderKind::Color
    }

    fn append_stages(&self, rec: &mut StageRec<'_>) -> PixmixResult<()> {
        rec.pipeline.append_constant_color(self.color.premul());
        Ok(())
    }

    fn flatten(&self, buffer: &mut WriteBuffer) {
        buffer.write_color4f(self.color);
    }

    #[cfg(feature = "gpu")]
    fn as_fragment_processor(&self, _args: &FpArgs<'_>) -> Option<FragmentProcessor> {
        Some(FragmentProcessor::ConstColor(self.color.premul()))
    }

    fn label(&self) -> String {
        let Color4f { r, g, b, a } = self.color;
        format!("color({r}, {g}, {b}, {a})")
    }
}

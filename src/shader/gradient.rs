use crate::flatten::buffer::{ReadBuffer, WriteBuffer};
use crate::foundation::core::{Color4f, Point};
use crate::foundation::error::{PixmixError, PixmixResult};
use crate::pipeline::builder::StageRec;
use crate::pipeline::stage::GradientCtx;
use crate::shader::factory::make_linear_gradient;
use crate::shader::{Input, Shader, ShaderKind};

#[cfg(feature = "gpu")]
use crate::gpu::processor::{FpArgs, FragmentProcessor};

/// Two-stop linear gradient, clamped outside `[start, end]`.
///
/// Stops are straight alpha; interpolation happens on the premultiplied stops. Geometry is kept
/// at f32 precision so a stored gradient reads back bit-identical.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LinearGradientShader {
    start: Point,
    end: Point,
    colors: [Color4f; 2],
}

impl LinearGradientShader {
    pub(crate) fn new(start: Point, end: Point, colors: [Color4f; 2]) -> Self {
        Self {
            start: quantize(start),
            end: quantize(end),
            colors,
        }
    }

    /// Start point (`t == 0`).
    pub fn start(&self) -> Point {
        self.start
    }

    /// End point (`t == 1`).
    pub fn end(&self) -> Point {
        self.end
    }

    /// Straight-alpha stop colors.
    pub fn colors(&self) -> [Color4f; 2] {
        self.colors
    }

    pub(crate) fn ctx(&self) -> GradientCtx {
        GradientCtx {
            start: self.start,
            end: self.end,
            c0: self.colors[0].premul(),
            c1: self.colors[1].premul(),
        }
    }

    pub(crate) fn unflatten(buffer: &mut ReadBuffer<'_>) -> PixmixResult<Input> {
        let start = buffer.read_point()?;
        let end = buffer.read_point()?;
        let c0 = buffer.read_color4f()?;
        let c1 = buffer.read_color4f()?;
        make_linear_gradient(start, end, [c0, c1]).map_err(|e| {
            tracing::warn!(error = %e, "rejecting stored linear gradient");
            PixmixError::malformed(format!("stored linear gradient: {e}"))
        })
    }
}

fn quantize(p: Point) -> Point {
    Point::new(f64::from(p.x as f32), f64::from(p.y as f32))
}

impl Shader for LinearGradientShader {
    fn kind(&self) -> ShaderKind {
        ShaderKind::LinearGradient
    }

    fn append_stages(&self, rec: &mut StageRec<'_>) -> PixmixResult<()> {
        rec.pipeline.append_linear_gradient(self.ctx())
    }

    fn flatten(&self, buffer: &mut WriteBuffer) {
        buffer.write_point(self.start);
        buffer.write_point(self.end);
        buffer.write_color4f(self.colors[0]);
        buffer.write_color4f(self.colors[1]);
    }

    #[cfg(feature = "gpu")]
    fn as_fragment_processor(&self, _args: &FpArgs<'_>) -> Option<FragmentProcessor> {
        Some(FragmentProcessor::LinearGradient(self.ctx()))
    }

    fn label(&self) -> String {
        format!(
            "linear_gradient(({}, {}) -> ({}, {}))",
            self.start.x, self.start.y, self.end.x, self.end.y
        )
    }
}

use crate::blend::equations::blend_color;
use crate::blend::mode::BlendMode;
use crate::foundation::core::{Color4f, Paint, Point};
use crate::pipeline::stage::GradientCtx;

/// Context handed to shaders when requesting GPU processors.
#[derive(Clone, Copy, Debug)]
pub struct FpArgs<'a> {
    /// Ambient paint; resolves [`crate::Input::PaintColor`].
    pub paint: &'a Paint,
}

/// GPU-side fragment processor tree.
///
/// Backends translate this tree into shader code; [`FragmentProcessor::eval`] is the reference
/// semantics they must match.
#[derive(Clone, Debug, PartialEq)]
pub enum FragmentProcessor {
    /// Premultiplied constant.
    ConstColor(Color4f),
    /// Two-stop linear gradient (premultiplied stops).
    LinearGradient(GradientCtx),
    /// `mode(src, dst)` over two child processors.
    ComposeTwo {
        /// Source operand.
        src: Box<FragmentProcessor>,
        /// Destination operand.
        dst: Box<FragmentProcessor>,
        /// Blend equation.
        mode: BlendMode,
    },
}

impl FragmentProcessor {
    /// Evaluate the processor at a device position.
    pub fn eval(&self, p: Point) -> Color4f {
        match self {
            Self::ConstColor(c) => *c,
            Self::LinearGradient(ctx) => ctx.color_at(p.x as f32, p.y as f32),
            Self::ComposeTwo { src, dst, mode } => blend_color(*mode, src.eval(p), dst.eval(p)),
        }
    }

    /// Number of processors in this tree.
    pub fn num_nodes(&self) -> usize {
        match self {
            Self::ConstColor(_) | Self::LinearGradient(_) => 1,
            Self::ComposeTwo { src, dst, .. } => 1 + src.num_nodes() + dst.num_nodes(),
        }
    }
}

/// Combine two processors with a blend mode; `Clear`, `Src` and `Dst` skip the combinator.
pub fn make_from_two_processors(
    src: FragmentProcessor,
    dst: FragmentProcessor,
    mode: BlendMode,
) -> FragmentProcessor {
    match mode {
        BlendMode::Clear => FragmentProcessor::ConstColor(Color4f::TRANSPARENT),
        BlendMode::Src => src,
        BlendMode::Dst => dst,
        _ => FragmentProcessor::ComposeTwo {
            src: Box::new(src),
            dst: Box::new(dst),
            mode,
        },
    }
}

#[cfg(test)]
#[path = "../../tests/unit/gpu/processor.rs"]
mod tests;

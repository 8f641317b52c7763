use std::fmt;

use crate::blend::mode::BlendMode;
use crate::foundation::core::{Color4f, Point};

/// Maximum number of pixels a pipeline processes per batch.
pub const MAX_STRIDE: usize = 16;

/// Floats in one scratch buffer: one register of `MAX_STRIDE` lanes per color channel.
pub const SCRATCH_LEN: usize = 4 * MAX_STRIDE;

/// Handle to a scratch buffer owned by a [`crate::StageArena`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ScratchId(pub u32);

impl fmt::Display for ScratchId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "scratch#{}", self.0)
    }
}

/// Parameters of a two-stop linear gradient stage. Colors are premultiplied.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GradientCtx {
    /// Where `t == 0`.
    pub start: Point,
    /// Where `t == 1`.
    pub end: Point,
    /// Color at `t == 0`.
    pub c0: Color4f,
    /// Color at `t == 1`.
    pub c1: Color4f,
}

impl GradientCtx {
    /// Gradient color at device position `(x, y)`; `t` is clamped to `[0, 1]`.
    pub fn color_at(&self, x: f32, y: f32) -> Color4f {
        let axis = self.end - self.start;
        let len2 = axis.hypot2();
        if len2 <= 0.0 {
            return self.c1;
        }
        let rel = Point::new(f64::from(x), f64::from(y)) - self.start;
        let t = (rel.dot(axis) / len2).clamp(0.0, 1.0) as f32;
        self.c0.lerp(self.c1, t)
    }
}

/// One appended pipeline operation.
///
/// Stages read and write the working registers (`r,g,b,a`); `LoadDst` fills the designated
/// destination registers (`dr,dg,db,da`) that `Blend` and `Lerp1Float` combine with.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Stage {
    /// Overwrite the working registers with a premultiplied constant.
    ConstantColor(Color4f),
    /// Overwrite the working registers with a per-pixel gradient color.
    LinearGradient(GradientCtx),
    /// Copy the working registers into a scratch buffer.
    StoreSrc(ScratchId),
    /// Copy a scratch buffer into the destination registers.
    LoadDst(ScratchId),
    /// `working = mode(working, dst)`.
    Blend(BlendMode),
    /// `working = dst + w * (working - dst)`.
    Lerp1Float(f32),
}

impl Stage {
    /// Short stage name used in logs and dumps.
    pub fn name(&self) -> &'static str {
        match self {
            Stage::ConstantColor(_) => "constant_color",
            Stage::LinearGradient(_) => "linear_gradient",
            Stage::StoreSrc(_) => "store_src",
            Stage::LoadDst(_) => "load_dst",
            Stage::Blend(_) => "blend",
            Stage::Lerp1Float(_) => "lerp_1_float",
        }
    }
}

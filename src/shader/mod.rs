//! Shader nodes: pixel-color programs that append stages to a raster pipeline.
//!
//! Nodes are immutable once built and shared through [`ShaderRef`] (`Arc`), so one graph can be
//! evaluated from many threads at once. Composite nodes reference their children by [`Input`],
//! which makes "use the paint's color" an explicit variant instead of a null child.

use std::fmt;
use std::sync::Arc;

use crate::flatten::buffer::WriteBuffer;
use crate::foundation::error::PixmixResult;
use crate::pipeline::builder::StageRec;

#[cfg(feature = "gpu")]
use crate::gpu::processor::{FpArgs, FragmentProcessor};

pub(crate) mod color;
pub(crate) mod compose;
pub(crate) mod factory;
pub(crate) mod gradient;

/// Shared, immutable handle to a shader node.
pub type ShaderRef = Arc<dyn Shader>;

/// Stable type tag of each concrete node kind; this is what the persisted form records.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u32)]
pub enum ShaderKind {
    /// [`crate::ColorShader`]
    Color = 1,
    /// [`crate::LinearGradientShader`]
    LinearGradient = 2,
    /// [`crate::BlendShader`]
    Blend = 3,
    /// [`crate::LerpShader`]
    Lerp = 4,
}

impl ShaderKind {
    /// Numeric tag written before each sub-shader record.
    pub fn tag(self) -> u32 {
        self as u32
    }

    /// Checked conversion from a stored tag.
    pub fn from_tag(tag: u32) -> Option<Self> {
        match tag {
            1 => Some(Self::Color),
            2 => Some(Self::LinearGradient),
            3 => Some(Self::Blend),
            4 => Some(Self::Lerp),
            _ => None,
        }
    }

    /// Lowercase kind name.
    pub fn name(self) -> &'static str {
        match self {
            Self::Color => "color",
            Self::LinearGradient => "linear_gradient",
            Self::Blend => "blend",
            Self::Lerp => "lerp",
        }
    }
}

/// Capability set every shader node provides.
pub trait Shader: fmt::Debug + Send + Sync {
    /// Concrete node kind.
    fn kind(&self) -> ShaderKind;

    /// Append the stages that leave this shader's premultiplied color in the working registers.
    ///
    /// Fails with [`crate::PixmixError::StageAppend`] when the pipeline configuration cannot run
    /// this shader.
    fn append_stages(&self, rec: &mut StageRec<'_>) -> PixmixResult<()>;

    /// Write this node's payload (not its type tag) to `buffer`.
    fn flatten(&self, buffer: &mut WriteBuffer);

    /// GPU-side equivalent of this node, if one exists.
    #[cfg(feature = "gpu")]
    fn as_fragment_processor(&self, args: &FpArgs<'_>) -> Option<FragmentProcessor>;

    /// Child inputs, destination first.
    fn children(&self) -> Vec<&Input> {
        Vec::new()
    }

    /// Short one-line description, e.g. `blend(src_over)`.
    fn label(&self) -> String;
}

/// A child slot of a composite: either a shader node or the ambient paint color.
#[derive(Clone, Debug)]
pub enum Input {
    /// Evaluate to the paint's premultiplied solid color.
    PaintColor,
    /// Evaluate a shader node.
    Shader(ShaderRef),
}

impl Input {
    /// Wrap a concrete node.
    pub fn shader(node: impl Shader + 'static) -> Self {
        Self::Shader(Arc::new(node))
    }

    /// Whether this is [`Input::PaintColor`].
    pub fn is_paint_color(&self) -> bool {
        matches!(self, Self::PaintColor)
    }

    /// The node, unless this is the paint color.
    pub fn as_shader(&self) -> Option<&ShaderRef> {
        match self {
            Self::PaintColor => None,
            Self::Shader(s) => Some(s),
        }
    }

    /// Kind of the referenced node.
    pub fn kind(&self) -> Option<ShaderKind> {
        self.as_shader().map(|s| s.kind())
    }

    /// Identity comparison: the same node, or both the paint color.
    pub fn same_node(&self, other: &Input) -> bool {
        match (self, other) {
            (Self::PaintColor, Self::PaintColor) => true,
            (Self::Shader(a), Self::Shader(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }

    /// Append this input's stages, loading the paint color when there is no node.
    pub fn append_stages(&self, rec: &mut StageRec<'_>) -> PixmixResult<()> {
        match self {
            Self::Shader(s) => s.append_stages(rec),
            Self::PaintColor => {
                rec.pipeline.append_constant_color(rec.paint.premul_color());
                Ok(())
            }
        }
    }

    /// GPU-side equivalent; the paint color becomes a constant processor.
    #[cfg(feature = "gpu")]
    pub fn as_fragment_processor(&self, args: &FpArgs<'_>) -> Option<FragmentProcessor> {
        match self {
            Self::Shader(s) => s.as_fragment_processor(args),
            Self::PaintColor => Some(FragmentProcessor::ConstColor(args.paint.premul_color())),
        }
    }

    /// Indented one-node-per-line dump of the graph rooted here.
    pub fn describe_tree(&self) -> String {
        let mut out = String::new();
        describe_into(self, 0, &mut out);
        out
    }
}

fn describe_into(input: &Input, depth: usize, out: &mut String) {
    for _ in 0..depth {
        out.push_str("  ");
    }
    match input {
        Input::PaintColor => out.push_str("paint\n"),
        Input::Shader(s) => {
            out.push_str(&s.label());
            out.push('\n');
            for child in s.children() {
                describe_into(child, depth + 1, out);
            }
        }
    }
}

impl From<ShaderRef> for Input {
    fn from(s: ShaderRef) -> Self {
        Self::Shader(s)
    }
}

impl From<Option<ShaderRef>> for Input {
    fn from(s: Option<ShaderRef>) -> Self {
        s.map_or(Self::PaintColor, Self::Shader)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/shader/input.rs"]
mod tests;

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use crate::foundation::core::{Color4f, Paint, Point};
use crate::foundation::error::{PixmixError, PixmixResult};
use crate::shader::Input;
use crate::shader::factory::{make_blend, make_color, make_lerp, make_linear_gradient};

pub(crate) mod model;

use model::{SceneDef, ShaderDef};

/// JSON scene document: a canvas size, a paint and a shader graph.
///
/// ```json
/// {
///   "width": 64, "height": 64,
///   "paint": [1, 1, 1, 1],
///   "shader": { "blend": { "mode": "src_over",
///                          "dst": { "color": { "rgba": [1, 0, 0, 1] } },
///                          "src": "paint" } }
/// }
/// ```
#[derive(Debug, Clone)]
pub struct Scene {
    def: SceneDef,
}

impl Scene {
    /// Parse a scene from a JSON reader.
    pub fn from_reader<R: std::io::Read>(r: R) -> PixmixResult<Self> {
        let def: SceneDef = serde_json::from_reader(r)
            .map_err(|e| PixmixError::serde(format!("parse scene JSON: {e}")))?;
        let scene = Self { def };
        scene.validate()?;
        Ok(scene)
    }

    /// Parse a scene from a JSON file on disk.
    pub fn from_path(path: impl AsRef<Path>) -> PixmixResult<Self> {
        let path = path.as_ref();
        let f = File::open(path).map_err(|e| {
            PixmixError::validation(format!("open scene JSON '{}': {e}", path.display()))
        })?;
        Self::from_reader(BufReader::new(f))
    }

    /// Check canvas size and paint.
    pub fn validate(&self) -> PixmixResult<()> {
        if self.def.width == 0 || self.def.height == 0 {
            return Err(PixmixError::validation(format!(
                "scene size must be non-zero, got {}x{}",
                self.def.width, self.def.height
            )));
        }
        if self.def.paint.iter().any(|v| !v.is_finite()) {
            return Err(PixmixError::validation("scene paint must be finite"));
        }
        Ok(())
    }

    /// Canvas width in pixels.
    pub fn width(&self) -> u32 {
        self.def.width
    }

    /// Canvas height in pixels.
    pub fn height(&self) -> u32 {
        self.def.height
    }

    /// Paint resolving `"paint"` inputs.
    pub fn paint(&self) -> Paint {
        Paint::new(Color4f::from_array(self.def.paint))
    }

    /// Build the shader graph through the factories.
    pub fn build(&self) -> PixmixResult<Input> {
        build_def(&self.def.shader)
    }
}

fn build_def(def: &ShaderDef) -> PixmixResult<Input> {
    match def {
        ShaderDef::Paint => Ok(Input::PaintColor),
        ShaderDef::Color { rgba } => Ok(make_color(Color4f::from_array(*rgba))),
        ShaderDef::LinearGradient { start, end, colors } => make_linear_gradient(
            Point::new(start[0], start[1]),
            Point::new(end[0], end[1]),
            [
                Color4f::from_array(colors[0]),
                Color4f::from_array(colors[1]),
            ],
        ),
        ShaderDef::Blend { mode, dst, src } => {
            Ok(make_blend(*mode, build_def(dst)?, build_def(src)?))
        }
        ShaderDef::Lerp { weight, dst, src } => make_lerp(*weight, build_def(dst)?, build_def(src)?),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/scene.rs"]
mod tests;

use serde::{Deserialize, Serialize};

use crate::blend::mode::BlendMode;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub(crate) struct SceneDef {
    pub(crate) width: u32,
    pub(crate) height: u32,
    #[serde(default = "default_paint")]
    pub(crate) paint: [f32; 4],
    pub(crate) shader: ShaderDef,
}

fn default_paint() -> [f32; 4] {
    [0.0, 0.0, 0.0, 1.0]
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub(crate) enum ShaderDef {
    Paint,
    Color {
        rgba: [f32; 4],
    },
    LinearGradient {
        start: [f64; 2],
        end: [f64; 2],
        colors: [[f32; 4]; 2],
    },
    Blend {
        mode: BlendMode,
        dst: Box<ShaderDef>,
        src: Box<ShaderDef>,
    },
    Lerp {
        weight: f32,
        dst: Box<ShaderDef>,
        src: Box<ShaderDef>,
    },
}

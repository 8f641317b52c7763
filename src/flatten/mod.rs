//! Binary persistence for shader graphs.
//!
//! Record layout, in write order:
//!
//! - sub-shader: `[u32 tag][u32 payload len][payload]`, or `[u32 0]` for the paint color
//! - color: `[f32 r][f32 g][f32 b][f32 a]` (straight alpha)
//! - linear gradient: `[point start][point end][color c0][color c1]`
//! - blend: `[sub-shader dst][sub-shader src][u32 mode]`
//! - lerp: `[sub-shader dst][sub-shader src][f32 weight]`
//!
//! Reading re-runs the factories, so a record decodes to the same node a fresh construction
//! with those parameters would produce.

use crate::foundation::error::PixmixResult;
use crate::shader::Input;

pub(crate) mod buffer;

use buffer::{ReadBuffer, WriteBuffer};

/// Serialize a shader graph.
pub fn serialize_shader(input: &Input) -> Vec<u8> {
    let mut w = WriteBuffer::new();
    w.write_shader(input);
    w.into_bytes()
}

/// Rebuild a shader graph from [`serialize_shader`] output.
pub fn deserialize_shader(bytes: &[u8]) -> PixmixResult<Input> {
    let mut r = ReadBuffer::new(bytes);
    let input = r.read_shader()?;
    r.finish()?;
    Ok(input)
}

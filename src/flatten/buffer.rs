use crate::foundation::core::{Color4f, Point};
use crate::foundation::error::{PixmixError, PixmixResult};
use crate::shader::color::ColorShader;
use crate::shader::compose::{BlendShader, LerpShader};
use crate::shader::gradient::LinearGradientShader;
use crate::shader::{Input, ShaderKind};

/// Tag recorded in place of a sub-shader when the input is the paint color.
pub const PAINT_COLOR_TAG: u32 = 0;

/// Deepest sub-shader nesting a [`ReadBuffer`] accepts.
pub const MAX_NESTING_DEPTH: u32 = 256;

/// Append-only little-endian writer. Every field is 4 bytes, so records stay 4-byte aligned.
#[derive(Clone, Debug, Default)]
pub struct WriteBuffer {
    bytes: Vec<u8>,
}

impl WriteBuffer {
    /// Empty buffer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Bytes written so far.
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Whether nothing has been written.
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Written bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Consume the buffer, returning the written bytes.
    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }

    /// Write a `u32`.
    pub fn write_u32(&mut self, v: u32) {
        self.bytes.extend_from_slice(&v.to_le_bytes());
    }

    /// Write an `f32`.
    pub fn write_f32(&mut self, v: f32) {
        self.bytes.extend_from_slice(&v.to_le_bytes());
    }

    /// Write four `f32` channels in `r, g, b, a` order.
    pub fn write_color4f(&mut self, c: Color4f) {
        for v in c.to_array() {
            self.write_f32(v);
        }
    }

    /// Write a point as two `f32`.
    pub fn write_point(&mut self, p: Point) {
        self.write_f32(p.x as f32);
        self.write_f32(p.y as f32);
    }

    /// Write a type-tagged sub-shader record: `[tag][payload len][payload]`, or a bare
    /// [`PAINT_COLOR_TAG`] for the paint color.
    pub fn write_shader(&mut self, input: &Input) {
        let Some(shader) = input.as_shader() else {
            self.write_u32(PAINT_COLOR_TAG);
            return;
        };
        self.write_u32(shader.kind().tag());

        let len_at = self.bytes.len();
        self.write_u32(0);
        let start = self.bytes.len();
        shader.flatten(self);
        let payload_len = (self.bytes.len() - start) as u32;
        self.bytes[len_at..len_at + 4].copy_from_slice(&payload_len.to_le_bytes());
    }
}

/// Cursor over bytes produced by [`WriteBuffer`].
///
/// Every read either yields a value or a [`PixmixError::MalformedData`]; there is no sticky error
/// state, callers propagate the first failure with `?`. Records nested deeper than
/// [`MAX_NESTING_DEPTH`] are rejected.
#[derive(Clone, Debug)]
pub struct ReadBuffer<'a> {
    bytes: &'a [u8],
    pos: usize,
    depth: u32,
}

impl<'a> ReadBuffer<'a> {
    /// Reader positioned at the start of `bytes`.
    pub fn new(bytes: &'a [u8]) -> Self {
        Self {
            bytes,
            pos: 0,
            depth: 0,
        }
    }

    /// Bytes not yet consumed.
    pub fn remaining(&self) -> usize {
        self.bytes.len() - self.pos
    }

    /// Fail unless every byte has been consumed.
    pub fn finish(&self) -> PixmixResult<()> {
        if self.remaining() != 0 {
            return Err(PixmixError::malformed(format!(
                "{} trailing bytes after shader record",
                self.remaining()
            )));
        }
        Ok(())
    }

    fn take4(&mut self) -> PixmixResult<[u8; 4]> {
        let end = self.pos + 4;
        let Some(chunk) = self.bytes.get(self.pos..end) else {
            return Err(PixmixError::malformed(format!(
                "unexpected end of data at byte {}",
                self.pos
            )));
        };
        self.pos = end;
        let mut out = [0u8; 4];
        out.copy_from_slice(chunk);
        Ok(out)
    }

    /// Read a `u32`.
    pub fn read_u32(&mut self) -> PixmixResult<u32> {
        self.take4().map(u32::from_le_bytes)
    }

    /// Read an `f32`.
    pub fn read_f32(&mut self) -> PixmixResult<f32> {
        self.take4().map(f32::from_le_bytes)
    }

    /// Read four `f32` channels.
    pub fn read_color4f(&mut self) -> PixmixResult<Color4f> {
        Ok(Color4f::new(
            self.read_f32()?,
            self.read_f32()?,
            self.read_f32()?,
            self.read_f32()?,
        ))
    }

    /// Read a point stored as two `f32`.
    pub fn read_point(&mut self) -> PixmixResult<Point> {
        let x = self.read_f32()?;
        let y = self.read_f32()?;
        Ok(Point::new(f64::from(x), f64::from(y)))
    }

    /// Read a type-tagged sub-shader record and rebuild it through its factory.
    pub fn read_shader(&mut self) -> PixmixResult<Input> {
        let tag = self.read_u32()?;
        if tag == PAINT_COLOR_TAG {
            return Ok(Input::PaintColor);
        }
        let kind = ShaderKind::from_tag(tag)
            .ok_or_else(|| PixmixError::malformed(format!("unknown shader type tag {tag}")))?;

        let len = self.read_u32()? as usize;
        let start = self.pos;
        if len > self.remaining() {
            return Err(PixmixError::malformed(format!(
                "{} record claims {len} bytes, {} available",
                kind.name(),
                self.remaining()
            )));
        }

        if self.depth >= MAX_NESTING_DEPTH {
            tracing::warn!(depth = self.depth, "rejecting deeply nested shader record");
            return Err(PixmixError::malformed(format!(
                "shader graph nested deeper than {MAX_NESTING_DEPTH} levels"
            )));
        }
        self.depth += 1;
        let input = match kind {
            ShaderKind::Color => ColorShader::unflatten(self),
            ShaderKind::LinearGradient => LinearGradientShader::unflatten(self),
            ShaderKind::Blend => BlendShader::unflatten(self),
            ShaderKind::Lerp => LerpShader::unflatten(self),
        };
        self.depth -= 1;
        let input = input?;

        let consumed = self.pos - start;
        if consumed != len {
            return Err(PixmixError::malformed(format!(
                "{} record declared {len} bytes but used {consumed}",
                kind.name()
            )));
        }
        Ok(input)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/flatten/buffer.rs"]
mod tests;

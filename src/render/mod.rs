use rayon::prelude::*;

use crate::foundation::core::{Color4f, Paint};
use crate::foundation::error::{PixmixError, PixmixResult};
use crate::pipeline::builder::RasterOpts;
use crate::pipeline::program::ShaderProgram;
use crate::shader::Input;

/// A rendered frame as RGBA8 pixels.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FrameRGBA {
    /// Frame width in pixels.
    pub width: u32,
    /// Frame height in pixels.
    pub height: u32,
    /// RGBA8 bytes, tightly packed, row-major.
    pub data: Vec<u8>,
    /// Whether the `data` is premultiplied alpha. Always true for frames from [`render_rgba8`].
    pub premultiplied: bool,
}

/// Frame rendering options.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct RenderOpts {
    /// Render rows on a rayon pool, one shader program per worker.
    pub parallel: bool,
    /// Worker thread override (parallel mode only). Must be >= 1 when set.
    pub threads: Option<usize>,
    /// Pipeline configuration.
    pub raster: RasterOpts,
}

impl Default for RenderOpts {
    fn default() -> Self {
        Self {
            parallel: false,
            threads: None,
            raster: RasterOpts::default(),
        }
    }
}

/// Evaluate `input` at every pixel of a `width x height` frame.
///
/// The serial and parallel paths produce identical bytes.
#[tracing::instrument(skip(input, paint, opts), fields(parallel = opts.parallel))]
pub fn render_rgba8(
    input: &Input,
    paint: &Paint,
    width: u32,
    height: u32,
    opts: &RenderOpts,
) -> PixmixResult<FrameRGBA> {
    if width == 0 || height == 0 {
        return Err(PixmixError::validation(format!(
            "frame size must be non-zero, got {width}x{height}"
        )));
    }
    let row_bytes = (width as usize)
        .checked_mul(4)
        .ok_or_else(|| PixmixError::validation("frame row size overflow"))?;
    let len = row_bytes
        .checked_mul(height as usize)
        .ok_or_else(|| PixmixError::validation("frame buffer size overflow"))?;

    // Build once up front so configuration errors surface before any worker starts.
    let mut program = ShaderProgram::build(input, paint, &opts.raster)?;
    let mut data = vec![0u8; len];

    if opts.parallel {
        let pool = build_thread_pool(opts.threads)?;
        pool.install(|| {
            data.par_chunks_mut(row_bytes).enumerate().try_for_each_init(
                || {
                    (
                        ShaderProgram::build(input, paint, &opts.raster),
                        vec![Color4f::TRANSPARENT; width as usize],
                    )
                },
                |(program, span), (y, row)| -> PixmixResult<()> {
                    let program = program.as_mut().map_err(|e| e.duplicate())?;
                    shade_row(program, y as u32, span, row)
                },
            )
        })?;
    } else {
        let mut span = vec![Color4f::TRANSPARENT; width as usize];
        for (y, row) in data.chunks_exact_mut(row_bytes).enumerate() {
            shade_row(&mut program, y as u32, &mut span, row)?;
        }
    }

    Ok(FrameRGBA {
        width,
        height,
        data,
        premultiplied: true,
    })
}

fn shade_row(
    program: &mut ShaderProgram,
    y: u32,
    span: &mut [Color4f],
    row: &mut [u8],
) -> PixmixResult<()> {
    program.shade_span(0, y, span)?;
    for (px, c) in row.chunks_exact_mut(4).zip(span.iter()) {
        px.copy_from_slice(&c.to_rgba8_premul().to_bytes());
    }
    Ok(())
}

fn build_thread_pool(threads: Option<usize>) -> PixmixResult<rayon::ThreadPool> {
    if let Some(n) = threads
        && n == 0
    {
        return Err(PixmixError::validation(
            "render 'threads' must be >= 1 when set",
        ));
    }
    let mut builder = rayon::ThreadPoolBuilder::new();
    if let Some(n) = threads {
        builder = builder.num_threads(n);
    }
    builder
        .build()
        .map_err(|e| PixmixError::Other(anyhow::anyhow!("failed to build rayon thread pool: {e}")))
}

#[cfg(test)]
#[path = "../../tests/unit/render/render.rs"]
mod tests;

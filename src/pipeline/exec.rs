use crate::blend::equations::kernel_for;
use crate::foundation::core::Color4f;
use crate::foundation::error::{PixmixError, PixmixResult};
use crate::pipeline::builder::{RasterPipeline, StageArena};
use crate::pipeline::stage::{MAX_STRIDE, Stage};

type Lanes = [f32; MAX_STRIDE];

/// Per-batch register file.
struct Registers {
    r: Lanes,
    g: Lanes,
    b: Lanes,
    a: Lanes,
    dr: Lanes,
    dg: Lanes,
    db: Lanes,
    da: Lanes,
    x: Lanes,
    y: Lanes,
}

impl Registers {
    fn new() -> Self {
        Self {
            r: [0.0; MAX_STRIDE],
            g: [0.0; MAX_STRIDE],
            b: [0.0; MAX_STRIDE],
            a: [0.0; MAX_STRIDE],
            dr: [0.0; MAX_STRIDE],
            dg: [0.0; MAX_STRIDE],
            db: [0.0; MAX_STRIDE],
            da: [0.0; MAX_STRIDE],
            x: [0.0; MAX_STRIDE],
            y: [0.0; MAX_STRIDE],
        }
    }

    fn src(&self, i: usize) -> Color4f {
        Color4f::new(self.r[i], self.g[i], self.b[i], self.a[i])
    }

    fn dst(&self, i: usize) -> Color4f {
        Color4f::new(self.dr[i], self.dg[i], self.db[i], self.da[i])
    }

    fn set_src(&mut self, i: usize, c: Color4f) {
        self.r[i] = c.r;
        self.g[i] = c.g;
        self.b[i] = c.b;
        self.a[i] = c.a;
    }
}

impl RasterPipeline {
    /// Run the pipeline over the horizontal span starting at pixel `(x, y)`, writing one
    /// premultiplied color per element of `out`.
    ///
    /// Coordinates handed to shaders are pixel centers. `arena` must be the arena the pipeline
    /// was built with.
    pub fn run(
        &self,
        arena: &mut StageArena,
        x: u32,
        y: u32,
        out: &mut [Color4f],
    ) -> PixmixResult<()> {
        let lane_width = self.opts().lane_width;
        if lane_width == 0 || lane_width > MAX_STRIDE {
            return Err(PixmixError::validation(format!(
                "lane_width must be in 1..={MAX_STRIDE}, got {lane_width}"
            )));
        }

        let mut regs = Registers::new();
        let mut px = x;
        for chunk in out.chunks_mut(lane_width) {
            let n = chunk.len();
            for i in 0..n {
                regs.x[i] = (px + i as u32) as f32 + 0.5;
                regs.y[i] = y as f32 + 0.5;
            }
            self.run_batch(arena, &mut regs, n)?;
            for (i, o) in chunk.iter_mut().enumerate() {
                *o = regs.src(i);
            }
            px += n as u32;
        }
        Ok(())
    }

    fn run_batch(&self, arena: &mut StageArena, regs: &mut Registers, n: usize) -> PixmixResult<()> {
        for stage in self.stages() {
            match *stage {
                Stage::ConstantColor(c) => {
                    for i in 0..n {
                        regs.set_src(i, c);
                    }
                }
                Stage::LinearGradient(ctx) => {
                    for i in 0..n {
                        let c = ctx.color_at(regs.x[i], regs.y[i]);
                        regs.set_src(i, c);
                    }
                }
                Stage::StoreSrc(id) => {
                    let buf = arena.buffer_mut(id)?;
                    let (r, rest) = buf.split_at_mut(MAX_STRIDE);
                    let (g, rest) = rest.split_at_mut(MAX_STRIDE);
                    let (b, a) = rest.split_at_mut(MAX_STRIDE);
                    r[..n].copy_from_slice(&regs.r[..n]);
                    g[..n].copy_from_slice(&regs.g[..n]);
                    b[..n].copy_from_slice(&regs.b[..n]);
                    a[..n].copy_from_slice(&regs.a[..n]);
                }
                Stage::LoadDst(id) => {
                    let buf = arena.buffer(id)?;
                    regs.dr[..n].copy_from_slice(&buf[..n]);
                    regs.dg[..n].copy_from_slice(&buf[MAX_STRIDE..MAX_STRIDE + n]);
                    regs.db[..n].copy_from_slice(&buf[2 * MAX_STRIDE..2 * MAX_STRIDE + n]);
                    regs.da[..n].copy_from_slice(&buf[3 * MAX_STRIDE..3 * MAX_STRIDE + n]);
                }
                Stage::Blend(mode) => {
                    // Kernel chosen once per stage, not per lane.
                    let kernel = kernel_for(mode);
                    for i in 0..n {
                        let c = kernel(regs.src(i), regs.dst(i));
                        regs.set_src(i, c);
                    }
                }
                Stage::Lerp1Float(w) => {
                    for i in 0..n {
                        let c = regs.dst(i).lerp(regs.src(i), w);
                        regs.set_src(i, c);
                    }
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/pipeline/exec.rs"]
mod tests;

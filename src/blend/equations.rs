//! Premultiplied blend equations.
//!
//! Every kernel takes `(src, dst)` in premultiplied space and returns the premultiplied result.
//! Inputs are not clamped; out-of-range values flow through the formulas unchanged, except for
//! `Plus`, which saturates at 1.

use crate::blend::mode::BlendMode;
use crate::foundation::core::Color4f;
use crate::foundation::math::{inv, max3, min3, rcp_or_zero};

/// Per-pixel blend kernel.
pub(crate) type BlendKernel = fn(Color4f, Color4f) -> Color4f;

/// Blend one premultiplied `src` color onto one premultiplied `dst` color.
pub fn blend_color(mode: BlendMode, src: Color4f, dst: Color4f) -> Color4f {
    kernel_for(mode)(src, dst)
}

/// Select the kernel once per stage so the lane loop does not re-dispatch on the mode.
pub(crate) fn kernel_for(mode: BlendMode) -> BlendKernel {
    match mode {
        BlendMode::Clear => |_, _| Color4f::TRANSPARENT,
        BlendMode::Src => |s, _| s,
        BlendMode::Dst => |_, d| d,
        BlendMode::SrcOver => |s, d| all_channels(s, d, |s, d, sa, _| s + d * inv(sa)),
        BlendMode::DstOver => |s, d| all_channels(s, d, |s, d, _, da| d + s * inv(da)),
        BlendMode::SrcIn => |s, d| all_channels(s, d, |s, _, _, da| s * da),
        BlendMode::DstIn => |s, d| all_channels(s, d, |_, d, sa, _| d * sa),
        BlendMode::SrcOut => |s, d| all_channels(s, d, |s, _, _, da| s * inv(da)),
        BlendMode::DstOut => |s, d| all_channels(s, d, |_, d, sa, _| d * inv(sa)),
        BlendMode::SrcATop => |s, d| all_channels(s, d, |s, d, sa, da| s * da + d * inv(sa)),
        BlendMode::DstATop => |s, d| all_channels(s, d, |s, d, sa, da| d * sa + s * inv(da)),
        BlendMode::Xor => |s, d| all_channels(s, d, |s, d, sa, da| s * inv(da) + d * inv(sa)),
        BlendMode::Plus => |s, d| all_channels(s, d, |s, d, _, _| (s + d).min(1.0)),
        BlendMode::Modulate => |s, d| all_channels(s, d, |s, d, _, _| s * d),
        BlendMode::Screen => |s, d| all_channels(s, d, |s, d, _, _| s + d - s * d),
        BlendMode::Overlay => |s, d| rgb_channels(s, d, overlay),
        BlendMode::Darken => |s, d| rgb_channels(s, d, |s, d, sa, da| s + d - (s * da).max(d * sa)),
        BlendMode::Lighten => {
            |s, d| rgb_channels(s, d, |s, d, sa, da| s + d - (s * da).min(d * sa))
        }
        BlendMode::ColorDodge => |s, d| rgb_channels(s, d, color_dodge),
        BlendMode::ColorBurn => |s, d| rgb_channels(s, d, color_burn),
        BlendMode::HardLight => |s, d| rgb_channels(s, d, hard_light),
        BlendMode::SoftLight => |s, d| rgb_channels(s, d, soft_light),
        BlendMode::Difference => {
            |s, d| rgb_channels(s, d, |s, d, sa, da| s + d - 2.0 * (s * da).min(d * sa))
        }
        BlendMode::Exclusion => |s, d| rgb_channels(s, d, |s, d, _, _| s + d - 2.0 * s * d),
        BlendMode::Multiply => {
            |s, d| rgb_channels(s, d, |s, d, sa, da| s * inv(da) + d * inv(sa) + s * d)
        }
        BlendMode::Hue => hue,
        BlendMode::Saturation => saturation,
        BlendMode::Color => color,
        BlendMode::Luminosity => luminosity,
    }
}

/// Apply `f(s, d, sa, da)` to all four channels, alpha included.
#[inline(always)]
fn all_channels(s: Color4f, d: Color4f, f: impl Fn(f32, f32, f32, f32) -> f32) -> Color4f {
    let (sa, da) = (s.a, d.a);
    Color4f::new(
        f(s.r, d.r, sa, da),
        f(s.g, d.g, sa, da),
        f(s.b, d.b, sa, da),
        f(s.a, d.a, sa, da),
    )
}

/// Apply `f` to the color channels; alpha is source-over.
#[inline(always)]
fn rgb_channels(s: Color4f, d: Color4f, f: impl Fn(f32, f32, f32, f32) -> f32) -> Color4f {
    let (sa, da) = (s.a, d.a);
    Color4f::new(
        f(s.r, d.r, sa, da),
        f(s.g, d.g, sa, da),
        f(s.b, d.b, sa, da),
        src_over_alpha(sa, da),
    )
}

fn src_over_alpha(sa: f32, da: f32) -> f32 {
    sa + da * inv(sa)
}

fn overlay(s: f32, d: f32, sa: f32, da: f32) -> f32 {
    let term = if 2.0 * d <= da {
        2.0 * s * d
    } else {
        sa * da - 2.0 * (da - d) * (sa - s)
    };
    s * inv(da) + d * inv(sa) + term
}

fn hard_light(s: f32, d: f32, sa: f32, da: f32) -> f32 {
    let term = if 2.0 * s <= sa {
        2.0 * s * d
    } else {
        sa * da - 2.0 * (da - d) * (sa - s)
    };
    s * inv(da) + d * inv(sa) + term
}

fn color_dodge(s: f32, d: f32, sa: f32, da: f32) -> f32 {
    if d == 0.0 {
        s * inv(da)
    } else if s == sa {
        s + d * inv(sa)
    } else {
        sa * da.min((d * sa) * rcp_or_zero(sa - s)) + s * inv(da) + d * inv(sa)
    }
}

fn color_burn(s: f32, d: f32, sa: f32, da: f32) -> f32 {
    if d == da {
        d + s * inv(da)
    } else if s == 0.0 {
        d * inv(sa)
    } else {
        sa * (da - da.min((da - d) * sa * rcp_or_zero(s))) + s * inv(da) + d * inv(sa)
    }
}

fn soft_light(s: f32, d: f32, sa: f32, da: f32) -> f32 {
    let m = if da > 0.0 { d / da } else { 0.0 };
    let s2 = 2.0 * s;
    let m4 = 4.0 * m;

    let dark_src = d * (sa + (s2 - sa) * (1.0 - m));
    let dark_dst = (m4 * m4 + m4) * (m - 1.0) + 7.0 * m;
    let lite_dst = m.max(0.0).sqrt() - m;
    let lite_src = d * sa + da * (s2 - sa) * if 4.0 * d <= da { dark_dst } else { lite_dst };

    s * inv(da) + d * inv(sa) + if s2 <= sa { dark_src } else { lite_src }
}

fn lum(r: f32, g: f32, b: f32) -> f32 {
    r * 0.30 + g * 0.59 + b * 0.11
}

fn sat(r: f32, g: f32, b: f32) -> f32 {
    max3(r, g, b) - min3(r, g, b)
}

fn set_sat(c: &mut [f32; 3], s: f32) {
    let mn = min3(c[0], c[1], c[2]);
    let mx = max3(c[0], c[1], c[2]);
    let range = mx - mn;
    for v in c.iter_mut() {
        *v = if range == 0.0 {
            0.0
        } else {
            (*v - mn) * s / range
        };
    }
}

fn set_lum(c: &mut [f32; 3], l: f32) {
    let diff = l - lum(c[0], c[1], c[2]);
    for v in c.iter_mut() {
        *v += diff;
    }
}

fn clip_color(c: &mut [f32; 3], a: f32) {
    let mn = min3(c[0], c[1], c[2]);
    let mx = max3(c[0], c[1], c[2]);
    let l = lum(c[0], c[1], c[2]);
    for v in c.iter_mut() {
        let mut x = *v;
        if mn < 0.0 && l - mn != 0.0 {
            x = l + (x - l) * l / (l - mn);
        }
        if mx > a && mx - l != 0.0 {
            x = l + (x - l) * (a - l) / (mx - l);
        }
        *v = x.max(0.0);
    }
}

/// Shared tail of the HSL modes: `s*(1-da) + d*(1-sa) + mixed`, source-over alpha.
fn finish_non_separable(s: Color4f, d: Color4f, mut mixed: [f32; 3]) -> Color4f {
    clip_color(&mut mixed, s.a * d.a);
    Color4f::new(
        s.r * inv(d.a) + d.r * inv(s.a) + mixed[0],
        s.g * inv(d.a) + d.g * inv(s.a) + mixed[1],
        s.b * inv(d.a) + d.b * inv(s.a) + mixed[2],
        src_over_alpha(s.a, d.a),
    )
}

fn hue(s: Color4f, d: Color4f) -> Color4f {
    let mut c = [s.r * d.a, s.g * d.a, s.b * d.a];
    set_sat(&mut c, sat(d.r, d.g, d.b) * s.a);
    set_lum(&mut c, lum(d.r, d.g, d.b) * s.a);
    finish_non_separable(s, d, c)
}

fn saturation(s: Color4f, d: Color4f) -> Color4f {
    let mut c = [d.r * s.a, d.g * s.a, d.b * s.a];
    set_sat(&mut c, sat(s.r, s.g, s.b) * d.a);
    set_lum(&mut c, lum(d.r, d.g, d.b) * s.a);
    finish_non_separable(s, d, c)
}

fn color(s: Color4f, d: Color4f) -> Color4f {
    let mut c = [s.r * d.a, s.g * d.a, s.b * d.a];
    set_lum(&mut c, lum(d.r, d.g, d.b) * s.a);
    finish_non_separable(s, d, c)
}

fn luminosity(s: Color4f, d: Color4f) -> Color4f {
    let mut c = [d.r * s.a, d.g * s.a, d.b * s.a];
    set_lum(&mut c, lum(s.r, s.g, s.b) * d.a);
    finish_non_separable(s, d, c)
}

#[cfg(test)]
#[path = "../../tests/unit/blend/equations.rs"]
mod tests;

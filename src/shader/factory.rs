use crate::blend::mode::BlendMode;
use crate::foundation::core::{Color4f, Point};
use crate::foundation::error::{PixmixError, PixmixResult};
use crate::shader::Input;
use crate::shader::color::ColorShader;
use crate::shader::compose::{BlendShader, LerpShader};
use crate::shader::gradient::LinearGradientShader;

/// Constant shader for a straight-alpha color.
pub fn make_color(color: Color4f) -> Input {
    Input::shader(ColorShader::new(color))
}

/// Two-stop linear gradient from `start` to `end` with straight-alpha `colors`.
///
/// Coincident endpoints produce a constant shader of the last stop. Colors, and endpoints once
/// narrowed to f32, must be finite.
pub fn make_linear_gradient(start: Point, end: Point, colors: [Color4f; 2]) -> PixmixResult<Input> {
    if colors
        .iter()
        .flat_map(|c| c.to_array())
        .any(|v| !v.is_finite())
    {
        return Err(PixmixError::invalid_parameter(
            "linear gradient colors must be finite",
        ));
    }
    // Endpoints are stored as f32; check what will actually be stored.
    let shader = LinearGradientShader::new(start, end, colors);
    if !(shader.start().is_finite() && shader.end().is_finite()) {
        return Err(PixmixError::invalid_parameter(
            "linear gradient endpoints must be finite in f32",
        ));
    }
    if shader.start() == shader.end() {
        tracing::debug!("degenerate linear gradient collapsed to its last stop");
        return Ok(make_color(colors[1]));
    }
    Ok(Input::shader(shader))
}

/// Blend `src` onto `dst` with `mode`.
///
/// `Clear` yields transparent black, `Dst` and `Src` return that child unchanged; every other
/// mode allocates a [`BlendShader`].
pub fn make_blend(mode: BlendMode, dst: Input, src: Input) -> Input {
    match mode {
        BlendMode::Clear => {
            tracing::debug!("blend(clear) collapsed to transparent");
            make_color(Color4f::TRANSPARENT)
        }
        BlendMode::Dst => {
            tracing::debug!("blend(dst) collapsed to its destination");
            dst
        }
        BlendMode::Src => {
            tracing::debug!("blend(src) collapsed to its source");
            src
        }
        _ => Input::shader(BlendShader::new(mode, dst, src)),
    }
}

/// Interpolate from `dst` (weight 0) to `src` (weight 1).
///
/// A NaN weight is an [`PixmixError::InvalidParameter`]. Identical children, `weight <= 0` and
/// `weight >= 1` return a child unchanged instead of allocating a [`LerpShader`].
pub fn make_lerp(weight: f32, dst: Input, src: Input) -> PixmixResult<Input> {
    if weight.is_nan() {
        return Err(PixmixError::invalid_parameter("lerp weight is NaN"));
    }
    if dst.same_node(&src) {
        tracing::debug!(weight, "lerp of a node with itself collapsed");
        return Ok(dst);
    }
    if weight <= 0.0 {
        tracing::debug!(weight, "lerp collapsed to its destination");
        return Ok(dst);
    }
    if weight >= 1.0 {
        tracing::debug!(weight, "lerp collapsed to its source");
        return Ok(src);
    }
    Ok(Input::shader(LerpShader::new(weight, dst, src)))
}

#[cfg(test)]
#[path = "../../tests/unit/shader/factory.rs"]
mod tests;

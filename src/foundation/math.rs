/// Map a unit-range float to a byte, clamping and rounding to nearest.
pub(crate) fn unit_to_u8(v: f32) -> u8 {
    if v.is_nan() {
        return 0;
    }
    (v.clamp(0.0, 1.0) * 255.0).round() as u8
}

pub(crate) fn inv(v: f32) -> f32 {
    1.0 - v
}

/// `1/v`, with `0` for a zero divisor.
pub(crate) fn rcp_or_zero(v: f32) -> f32 {
    if v == 0.0 { 0.0 } else { 1.0 / v }
}

pub(crate) fn min3(a: f32, b: f32, c: f32) -> f32 {
    a.min(b).min(c)
}

pub(crate) fn max3(a: f32, b: f32, c: f32) -> f32 {
    a.max(b).max(c)
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/math.rs"]
mod tests;

use crate::foundation::math::unit_to_u8;

pub use kurbo::Point;

/// Four f32 color channels.
///
/// Whether the channels are premultiplied depends on context: shader constructors and [`Paint`]
/// take straight alpha, everything that flows through a pipeline is premultiplied.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Color4f {
    /// Red.
    pub r: f32,
    /// Green.
    pub g: f32,
    /// Blue.
    pub b: f32,
    /// Alpha.
    pub a: f32,
}

impl Color4f {
    /// Fully transparent black.
    pub const TRANSPARENT: Self = Self::new(0.0, 0.0, 0.0, 0.0);
    /// Opaque black.
    pub const BLACK: Self = Self::new(0.0, 0.0, 0.0, 1.0);
    /// Opaque white.
    pub const WHITE: Self = Self::new(1.0, 1.0, 1.0, 1.0);
    /// Opaque red.
    pub const RED: Self = Self::new(1.0, 0.0, 0.0, 1.0);
    /// Opaque green.
    pub const GREEN: Self = Self::new(0.0, 1.0, 0.0, 1.0);
    /// Opaque blue.
    pub const BLUE: Self = Self::new(0.0, 0.0, 1.0, 1.0);
    /// Opaque yellow.
    pub const YELLOW: Self = Self::new(1.0, 1.0, 0.0, 1.0);

    /// Build a color from its four channels.
    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Build a color from `[r, g, b, a]`.
    pub const fn from_array(v: [f32; 4]) -> Self {
        Self::new(v[0], v[1], v[2], v[3])
    }

    /// Channels as `[r, g, b, a]`.
    pub const fn to_array(self) -> [f32; 4] {
        [self.r, self.g, self.b, self.a]
    }

    /// Multiply color channels by alpha.
    pub fn premul(self) -> Self {
        Self::new(self.r * self.a, self.g * self.a, self.b * self.a, self.a)
    }

    /// Divide color channels by alpha. Zero alpha maps to transparent black.
    pub fn unpremul(self) -> Self {
        if self.a <= 0.0 {
            return Self::TRANSPARENT;
        }
        let inv = 1.0 / self.a;
        Self::new(self.r * inv, self.g * inv, self.b * inv, self.a)
    }

    /// Channel-wise `self + (other - self) * t`.
    pub fn lerp(self, other: Self, t: f32) -> Self {
        Self::new(
            self.r + (other.r - self.r) * t,
            self.g + (other.g - self.g) * t,
            self.b + (other.b - self.b) * t,
            self.a + (other.a - self.a) * t,
        )
    }

    /// Largest absolute channel difference.
    pub fn max_abs_diff(self, other: Self) -> f32 {
        self.to_array()
            .iter()
            .zip(other.to_array().iter())
            .map(|(a, b)| (a - b).abs())
            .fold(0.0, f32::max)
    }

    /// Pack an already premultiplied color into RGBA8, clamping each channel to `[0, 1]`.
    pub fn to_rgba8_premul(self) -> Rgba8Premul {
        Rgba8Premul {
            r: unit_to_u8(self.r),
            g: unit_to_u8(self.g),
            b: unit_to_u8(self.b),
            a: unit_to_u8(self.a),
        }
    }
}

/// Premultiplied RGBA8 (r,g,b already multiplied by a).
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Rgba8Premul {
    /// Red.
    pub r: u8,
    /// Green.
    pub g: u8,
    /// Blue.
    pub b: u8,
    /// Alpha.
    pub a: u8,
}

impl Rgba8Premul {
    /// Channels as `[r, g, b, a]` bytes.
    pub fn to_bytes(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }
}

/// Ambient draw state available while a pipeline is being built.
///
/// An input left as [`crate::Input::PaintColor`] evaluates to this paint's color.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Paint {
    /// Straight-alpha solid color.
    pub color: Color4f,
}

impl Paint {
    /// Paint with the given straight-alpha color.
    pub fn new(color: Color4f) -> Self {
        Self { color }
    }

    /// The paint color, premultiplied.
    pub fn premul_color(&self) -> Color4f {
        self.color.premul()
    }
}

impl Default for Paint {
    fn default() -> Self {
        Self {
            color: Color4f::BLACK,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;

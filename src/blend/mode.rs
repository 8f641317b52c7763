use std::fmt;
use std::str::FromStr;

use crate::foundation::error::PixmixError;

/// Binary compositing operator over two premultiplied colors.
///
/// Ordinals are stable: they are what the persisted form stores.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
#[repr(u32)]
pub enum BlendMode {
    /// `0`
    Clear = 0,
    /// `s`
    Src,
    /// `d`
    Dst,
    /// `s + d*(1-sa)`
    SrcOver,
    /// `d + s*(1-da)`
    DstOver,
    /// `s*da`
    SrcIn,
    /// `d*sa`
    DstIn,
    /// `s*(1-da)`
    SrcOut,
    /// `d*(1-sa)`
    DstOut,
    /// `s*da + d*(1-sa)`
    #[serde(rename = "src_atop")]
    SrcATop,
    /// `d*sa + s*(1-da)`
    #[serde(rename = "dst_atop")]
    DstATop,
    /// `s*(1-da) + d*(1-sa)`
    Xor,
    /// `min(s + d, 1)`
    Plus,
    /// `s*d`
    Modulate,
    /// `s + d - s*d`
    Screen,
    /// Multiply or screen, depending on the destination.
    Overlay,
    /// Per-channel minimum.
    Darken,
    /// Per-channel maximum.
    Lighten,
    /// Brighten the destination to reflect the source.
    ColorDodge,
    /// Darken the destination to reflect the source.
    ColorBurn,
    /// Multiply or screen, depending on the source.
    HardLight,
    /// Lighten or darken, depending on the source.
    SoftLight,
    /// Subtract the darker of the two colors from the brighter.
    Difference,
    /// Like difference, with lower contrast.
    Exclusion,
    /// `s*(1-da) + d*(1-sa) + s*d`
    Multiply,
    /// Source hue with destination saturation and luminosity.
    Hue,
    /// Source saturation with destination hue and luminosity.
    Saturation,
    /// Source hue and saturation with destination luminosity.
    Color,
    /// Source luminosity with destination hue and saturation.
    Luminosity,
}

impl BlendMode {
    /// Highest defined mode; ordinals above it are rejected when reading stored records.
    pub const LAST_MODE: BlendMode = BlendMode::Luminosity;

    /// Every mode, in ordinal order.
    pub const ALL: [BlendMode; 29] = [
        BlendMode::Clear,
        BlendMode::Src,
        BlendMode::Dst,
        BlendMode::SrcOver,
        BlendMode::DstOver,
        BlendMode::SrcIn,
        BlendMode::DstIn,
        BlendMode::SrcOut,
        BlendMode::DstOut,
        BlendMode::SrcATop,
        BlendMode::DstATop,
        BlendMode::Xor,
        BlendMode::Plus,
        BlendMode::Modulate,
        BlendMode::Screen,
        BlendMode::Overlay,
        BlendMode::Darken,
        BlendMode::Lighten,
        BlendMode::ColorDodge,
        BlendMode::ColorBurn,
        BlendMode::HardLight,
        BlendMode::SoftLight,
        BlendMode::Difference,
        BlendMode::Exclusion,
        BlendMode::Multiply,
        BlendMode::Hue,
        BlendMode::Saturation,
        BlendMode::Color,
        BlendMode::Luminosity,
    ];

    /// Stable numeric value of this mode.
    pub fn ordinal(self) -> u32 {
        self as u32
    }

    /// Checked conversion from a stored ordinal.
    pub fn from_ordinal(v: u32) -> Option<Self> {
        if v > Self::LAST_MODE.ordinal() {
            return None;
        }
        Self::ALL.get(v as usize).copied()
    }

    /// Snake-case name, matching the JSON spelling.
    pub fn name(self) -> &'static str {
        match self {
            Self::Clear => "clear",
            Self::Src => "src",
            Self::Dst => "dst",
            Self::SrcOver => "src_over",
            Self::DstOver => "dst_over",
            Self::SrcIn => "src_in",
            Self::DstIn => "dst_in",
            Self::SrcOut => "src_out",
            Self::DstOut => "dst_out",
            Self::SrcATop => "src_atop",
            Self::DstATop => "dst_atop",
            Self::Xor => "xor",
            Self::Plus => "plus",
            Self::Modulate => "modulate",
            Self::Screen => "screen",
            Self::Overlay => "overlay",
            Self::Darken => "darken",
            Self::Lighten => "lighten",
            Self::ColorDodge => "color_dodge",
            Self::ColorBurn => "color_burn",
            Self::HardLight => "hard_light",
            Self::SoftLight => "soft_light",
            Self::Difference => "difference",
            Self::Exclusion => "exclusion",
            Self::Multiply => "multiply",
            Self::Hue => "hue",
            Self::Saturation => "saturation",
            Self::Color => "color",
            Self::Luminosity => "luminosity",
        }
    }

    /// Porter-Duff modes expressible as `s*F(da) + d*G(sa)` coefficients (through `Screen`).
    pub fn is_coefficient_mode(self) -> bool {
        self.ordinal() <= Self::Screen.ordinal()
    }

    /// Modes that operate on each channel independently (everything but the HSL modes).
    pub fn is_separable(self) -> bool {
        self.ordinal() <= Self::Multiply.ordinal()
    }

    /// Modes the blend factory replaces with a child or a constant.
    pub fn is_degenerate(self) -> bool {
        matches!(self, Self::Clear | Self::Src | Self::Dst)
    }
}

impl fmt::Display for BlendMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for BlendMode {
    type Err = PixmixError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim().to_ascii_lowercase().replace('-', "_");
        Self::ALL
            .iter()
            .copied()
            .find(|m| m.name() == key)
            .ok_or_else(|| PixmixError::validation(format!("unknown blend mode '{s}'")))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/blend/mode.rs"]
mod tests;

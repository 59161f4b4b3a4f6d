use super::{Oklab, Xyz};
use crate::core::conversion::{
    cmyk_to_srgb, hsl_to_srgb, hsv_to_srgb, oklab_to_srgb, srgb_to_cmyk, srgb_to_hsl,
    srgb_to_hsv, xyz_to_srgb,
};
use crate::core::{
    clamp_channel, format, normalize_alpha, normalize_hue, parse_cmyk, parse_hsl, parse_hsv,
    parse_rgb, parse_srgb, snap_unit, to_linear, Syntax,
};
use crate::error::ParseError;
use crate::{Float, Space};

/// A color with byte-range red, green, and blue channels `0..=255`.
///
/// Channels are not rounded. Use [`Rgb::to_bytes`] for the 24-bit form.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Rgb {
    pub r: Float,
    pub g: Float,
    pub b: Float,
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub alpha: Option<Float>,
}

impl Rgb {
    /// Create a new, normalized RGB color.
    pub fn new(r: Float, g: Float, b: Float, alpha: Option<Float>) -> Self {
        Self {
            r: clamp_channel(r, 0.0, 255.0),
            g: clamp_channel(g, 0.0, 255.0),
            b: clamp_channel(b, 0.0, 255.0),
            alpha: normalize_alpha(alpha),
        }
    }

    /// Create a new RGB color from bytes. The alpha byte maps to unit range.
    pub fn from_bytes(rgb: [u8; 3], alpha: Option<u8>) -> Self {
        Self::new(
            rgb[0] as Float,
            rgb[1] as Float,
            rgb[2] as Float,
            alpha.map(|a| a as Float / 255.0),
        )
    }

    /// Normalize this color.
    #[must_use = "method returns new color and does not mutate original value"]
    pub fn normalize(&self) -> Self {
        Self::new(self.r, self.g, self.b, self.alpha)
    }

    /// Convert sRGB to RGB by scaling with 255.
    pub fn from_srgb(srgb: &Srgb) -> Self {
        let srgb = srgb.normalize();
        Self::new(srgb.r * 255.0, srgb.g * 255.0, srgb.b * 255.0, srgb.alpha)
    }

    /// Round the channels to bytes.
    pub fn to_bytes(&self) -> [u8; 3] {
        let Self { r, g, b, .. } = self.normalize();
        [r.round() as u8, g.round() as u8, b.round() as u8]
    }

    /// Scale alpha to a byte, if present.
    pub fn alpha_byte(&self) -> Option<u8> {
        normalize_alpha(self.alpha).map(|a| (a * 255.0).round() as u8)
    }

    /// Parse `rgb()` or `rgba()` with comma-separated or space-separated
    /// arguments.
    pub fn from_css(s: &str) -> Result<Self, ParseError> {
        let ([r, g, b], alpha) = parse_rgb(s)?;
        Ok(Self::new(r, g, b, alpha))
    }
}

impl std::fmt::Display for Rgb {
    /// Format as `rgb(r, g, b)` or `rgba(r, g, b, alpha)` with rounded
    /// channels.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let Self { r, g, b, alpha } = self.normalize();
        let prefix = if alpha.is_some() { "rgba(" } else { "rgb(" };
        format(f, prefix, Syntax::Legacy, &[(r, 0, ""), (g, 0, ""), (b, 0, "")], alpha)
    }
}

impl_channels!(Rgb, Space::Rgb);

// --------------------------------------------------------------------------------------------------------------------

/// A color in gamma-corrected sRGB with unit-range channels `0..=1`.
///
/// Channels within 1e-10 of either end snap to that end, which absorbs the
/// rounding errors of round-tripping through other color spaces.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Srgb {
    pub r: Float,
    pub g: Float,
    pub b: Float,
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub alpha: Option<Float>,
}

impl Srgb {
    /// Create a new, normalized sRGB color.
    pub fn new(r: Float, g: Float, b: Float, alpha: Option<Float>) -> Self {
        Self {
            r: snap_unit(r),
            g: snap_unit(g),
            b: snap_unit(b),
            alpha: normalize_alpha(alpha),
        }
    }

    /// Normalize this color.
    #[must_use = "method returns new color and does not mutate original value"]
    pub fn normalize(&self) -> Self {
        Self::new(self.r, self.g, self.b, self.alpha)
    }

    /// Access the channels as an array.
    pub const fn channels(&self) -> [Float; 3] {
        [self.r, self.g, self.b]
    }

    #[inline]
    fn from_channels(channels: [Float; 3], alpha: Option<Float>) -> Self {
        Self::new(channels[0], channels[1], channels[2], alpha)
    }

    /// Convert RGB to sRGB by dividing by 255.
    pub fn from_rgb(rgb: &Rgb) -> Self {
        let rgb = rgb.normalize();
        Self::new(rgb.r / 255.0, rgb.g / 255.0, rgb.b / 255.0, rgb.alpha)
    }

    /// Convert XYZ to sRGB. Out-of-gamut colors are clamped.
    pub fn from_xyz(xyz: &Xyz) -> Self {
        Self::from_channels(xyz_to_srgb(&xyz.channels()), xyz.alpha)
    }

    /// Convert HSL to sRGB.
    pub fn from_hsl(hsl: &Hsl) -> Self {
        let hsl = hsl.normalize();
        Self::from_channels(hsl_to_srgb(&[hsl.h, hsl.s, hsl.l]), hsl.alpha)
    }

    /// Convert HSV to sRGB.
    pub fn from_hsv(hsv: &Hsv) -> Self {
        let hsv = hsv.normalize();
        Self::from_channels(hsv_to_srgb(&[hsv.h, hsv.s, hsv.v]), hsv.alpha)
    }

    /// Convert CMYK to sRGB.
    pub fn from_cmyk(cmyk: &Cmyk) -> Self {
        let cmyk = cmyk.normalize();
        Self::from_channels(cmyk_to_srgb(&[cmyk.c, cmyk.m, cmyk.y, cmyk.k]), cmyk.alpha)
    }

    /// Convert Oklab to sRGB. Out-of-gamut colors are clamped.
    pub fn from_oklab(oklab: &Oklab) -> Self {
        Self::from_channels(oklab_to_srgb(&oklab.channels()), oklab.alpha)
    }

    /// Parse `color(srgb …)` or `color(srgb-linear …)`.
    pub fn from_css(s: &str) -> Result<Self, ParseError> {
        let ([r, g, b], alpha) = parse_srgb(s)?;
        Ok(Self::new(r, g, b, alpha))
    }

    /// Format as `color(srgb-linear …)`.
    pub fn to_css_linear(&self) -> String {
        struct Linear(Srgb);

        impl std::fmt::Display for Linear {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                let [r, g, b] = to_linear(&self.0.channels());
                format(
                    f,
                    "color(srgb-linear ",
                    Syntax::Modern,
                    &[(r, 5, ""), (g, 5, ""), (b, 5, "")],
                    self.0.alpha,
                )
            }
        }

        Linear(self.normalize()).to_string()
    }
}

impl std::fmt::Display for Srgb {
    /// Format as `color(srgb r g b)` with up to 5 digits past the decimal.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let Self { r, g, b, alpha } = self.normalize();
        format(
            f,
            "color(srgb ",
            Syntax::Modern,
            &[(r, 5, ""), (g, 5, ""), (b, 5, "")],
            alpha,
        )
    }
}

impl_channels!(Srgb, Space::Srgb);

// --------------------------------------------------------------------------------------------------------------------

/// A color in HSL, with hue in degrees and unit-range saturation and
/// lightness.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Hsl {
    pub h: Float,
    pub s: Float,
    pub l: Float,
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub alpha: Option<Float>,
}

impl Hsl {
    /// Create a new, normalized HSL color.
    pub fn new(h: Float, s: Float, l: Float, alpha: Option<Float>) -> Self {
        Self {
            h: normalize_hue(h),
            s: clamp_channel(s, 0.0, 1.0),
            l: clamp_channel(l, 0.0, 1.0),
            alpha: normalize_alpha(alpha),
        }
    }

    /// Normalize this color.
    #[must_use = "method returns new color and does not mutate original value"]
    pub fn normalize(&self) -> Self {
        Self::new(self.h, self.s, self.l, self.alpha)
    }

    /// Convert sRGB to HSL.
    pub fn from_srgb(srgb: &Srgb) -> Self {
        let srgb = srgb.normalize();
        let [h, s, l] = srgb_to_hsl(&srgb.channels());
        Self::new(h, s, l, srgb.alpha)
    }

    /// Parse `hsl()` or `hsla()` with comma-separated or space-separated
    /// arguments.
    pub fn from_css(s: &str) -> Result<Self, ParseError> {
        let ([h, s, l], alpha) = parse_hsl(s)?;
        Ok(Self::new(h, s, l, alpha))
    }
}

impl std::fmt::Display for Hsl {
    /// Format as `hsl(h, s%, l%)` or `hsla(h, s%, l%, alpha)`.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let Self { h, s, l, alpha } = self.normalize();
        let prefix = if alpha.is_some() { "hsla(" } else { "hsl(" };
        format(
            f,
            prefix,
            Syntax::Legacy,
            &[(h, 2, ""), (s * 100.0, 2, "%"), (l * 100.0, 2, "%")],
            alpha,
        )
    }
}

impl_channels!(Hsl, Space::Hsl);

// --------------------------------------------------------------------------------------------------------------------

/// A color in HSV, with hue in degrees and unit-range saturation and value.
///
/// CSS has no HSV function. This record's CSS form uses `color()` with the
/// custom `--hsv` color space instead.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Hsv {
    pub h: Float,
    pub s: Float,
    pub v: Float,
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub alpha: Option<Float>,
}

impl Hsv {
    /// Create a new, normalized HSV color.
    pub fn new(h: Float, s: Float, v: Float, alpha: Option<Float>) -> Self {
        Self {
            h: normalize_hue(h),
            s: clamp_channel(s, 0.0, 1.0),
            v: clamp_channel(v, 0.0, 1.0),
            alpha: normalize_alpha(alpha),
        }
    }

    /// Normalize this color.
    #[must_use = "method returns new color and does not mutate original value"]
    pub fn normalize(&self) -> Self {
        Self::new(self.h, self.s, self.v, self.alpha)
    }

    /// Convert sRGB to HSV.
    pub fn from_srgb(srgb: &Srgb) -> Self {
        let srgb = srgb.normalize();
        let [h, s, v] = srgb_to_hsv(&srgb.channels());
        Self::new(h, s, v, srgb.alpha)
    }

    /// Parse `color(--hsv h s% v%)`.
    pub fn from_css(s: &str) -> Result<Self, ParseError> {
        let ([h, s, v], alpha) = parse_hsv(s)?;
        Ok(Self::new(h, s, v, alpha))
    }
}

impl std::fmt::Display for Hsv {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let Self { h, s, v, alpha } = self.normalize();
        format(
            f,
            "color(--hsv ",
            Syntax::Modern,
            &[(h, 2, ""), (s * 100.0, 2, "%"), (v * 100.0, 2, "%")],
            alpha,
        )
    }
}

impl_channels!(Hsv, Space::Hsv);

// --------------------------------------------------------------------------------------------------------------------

/// A color in naive, device-dependent CMYK with unit-range channels.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Cmyk {
    pub c: Float,
    pub m: Float,
    pub y: Float,
    pub k: Float,
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub alpha: Option<Float>,
}

impl Cmyk {
    /// Create a new, normalized CMYK color.
    pub fn new(c: Float, m: Float, y: Float, k: Float, alpha: Option<Float>) -> Self {
        Self {
            c: clamp_channel(c, 0.0, 1.0),
            m: clamp_channel(m, 0.0, 1.0),
            y: clamp_channel(y, 0.0, 1.0),
            k: clamp_channel(k, 0.0, 1.0),
            alpha: normalize_alpha(alpha),
        }
    }

    /// Normalize this color.
    #[must_use = "method returns new color and does not mutate original value"]
    pub fn normalize(&self) -> Self {
        Self::new(self.c, self.m, self.y, self.k, self.alpha)
    }

    /// Convert sRGB to CMYK. Black has key 1 and all other channels 0.
    pub fn from_srgb(srgb: &Srgb) -> Self {
        let srgb = srgb.normalize();
        let [c, m, y, k] = srgb_to_cmyk(&srgb.channels());
        Self::new(c, m, y, k, srgb.alpha)
    }

    /// Parse `device-cmyk(c m y k)`.
    pub fn from_css(s: &str) -> Result<Self, ParseError> {
        let ([c, m, y, k], alpha) = parse_cmyk(s)?;
        Ok(Self::new(c, m, y, k, alpha))
    }
}

impl std::fmt::Display for Cmyk {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let Self { c, m, y, k, alpha } = self.normalize();
        format(
            f,
            "device-cmyk(",
            Syntax::Modern,
            &[(c, 2, ""), (m, 2, ""), (y, 2, ""), (k, 2, "")],
            alpha,
        )
    }
}

impl_channels!(Cmyk, Space::Cmyk);

// ====================================================================================================================

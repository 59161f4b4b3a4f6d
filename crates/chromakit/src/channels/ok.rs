use super::Srgb;
use crate::core::conversion::{oklch_to_srgb, srgb_to_oklab, xab_to_xch, xch_to_xab};
use crate::core::{
    clamp_channel, fit_to_srgb, format, in_srgb_gamut, normalize_alpha, normalize_hue,
    parse_oklab, parse_oklch, Syntax, GAMUT_EPSILON, OKLCH,
};
use crate::error::ParseError;
use crate::{Float, Space};

/// A color in Oklab with lightness `0..=1` and a/b axes `-0.4..=0.4`.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Oklab {
    pub l: Float,
    pub a: Float,
    pub b: Float,
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub alpha: Option<Float>,
}

impl Oklab {
    /// Create a new, normalized Oklab color.
    pub fn new(l: Float, a: Float, b: Float, alpha: Option<Float>) -> Self {
        Self {
            l: clamp_channel(l, 0.0, 1.0),
            a: clamp_channel(a, -0.4, 0.4),
            b: clamp_channel(b, -0.4, 0.4),
            alpha: normalize_alpha(alpha),
        }
    }

    /// Normalize this color.
    #[must_use = "method returns new color and does not mutate original value"]
    pub fn normalize(&self) -> Self {
        Self::new(self.l, self.a, self.b, self.alpha)
    }

    /// Access the channels as an array.
    pub const fn channels(&self) -> [Float; 3] {
        [self.l, self.a, self.b]
    }

    /// Convert sRGB to Oklab.
    pub fn from_srgb(srgb: &Srgb) -> Self {
        let srgb = srgb.normalize();
        let [l, a, b] = srgb_to_oklab(&srgb.channels());
        Self::new(l, a, b, srgb.alpha)
    }

    /// Convert Oklch to Oklab.
    pub fn from_oklch(oklch: &Oklch) -> Self {
        let oklch = oklch.normalize();
        let [l, a, b] = xch_to_xab(&oklch.channels());
        Self::new(l, a, b, oklch.alpha)
    }

    /// Parse `oklab()`.
    pub fn from_css(s: &str) -> Result<Self, ParseError> {
        let ([l, a, b], alpha) = parse_oklab(s)?;
        Ok(Self::new(l, a, b, alpha))
    }
}

impl std::fmt::Display for Oklab {
    /// Format as `oklab(l% a b)` with lightness as percentage.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let Self { l, a, b, alpha } = self.normalize();
        format(
            f,
            "oklab(",
            Syntax::Modern,
            &[(l * 100.0, 2, "%"), (a, 4, ""), (b, 4, "")],
            alpha,
        )
    }
}

impl_channels!(Oklab, Space::Oklab);

// --------------------------------------------------------------------------------------------------------------------

/// A color in Oklch, the polar form of Oklab, with lightness `0..=1`, chroma
/// `0..=1`, and hue `0..360`.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Oklch {
    pub l: Float,
    pub c: Float,
    pub h: Float,
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub alpha: Option<Float>,
}

impl Oklch {
    /// The default tolerance for fitting into the sRGB gamut.
    pub const DEFAULT_EPSILON: Float = 0.001;

    /// Create a new, normalized Oklch color.
    pub fn new(l: Float, c: Float, h: Float, alpha: Option<Float>) -> Self {
        Self {
            l: clamp_channel(l, 0.0, 1.0),
            c: clamp_channel(c, 0.0, 1.0),
            h: normalize_hue(h),
            alpha: normalize_alpha(alpha),
        }
    }

    /// Normalize this color.
    #[must_use = "method returns new color and does not mutate original value"]
    pub fn normalize(&self) -> Self {
        Self::new(self.l, self.c, self.h, self.alpha)
    }

    /// Access the channels as an array.
    pub const fn channels(&self) -> [Float; 3] {
        [self.l, self.c, self.h]
    }

    /// Convert Oklab to Oklch.
    pub fn from_oklab(oklab: &Oklab) -> Self {
        let oklab = oklab.normalize();
        let [l, c, h] = xab_to_xch(&oklab.channels());
        Self::new(l, c, h, oklab.alpha)
    }

    /// Determine whether this color is inside the sRGB gamut.
    pub fn in_srgb_gamut(&self) -> bool {
        in_srgb_gamut(&oklch_to_srgb(&self.normalize().channels()), GAMUT_EPSILON)
    }

    /// Map this color into the sRGB gamut by reducing its chroma.
    ///
    /// This method works just like [`Lch::fit_to_srgb`](super::Lch::fit_to_srgb),
    /// only with Oklch's lightness and chroma scales.
    #[must_use = "method returns new color and does not mutate original value"]
    pub fn fit_to_srgb(&self, epsilon: Float) -> Self {
        let oklch = self.normalize();
        let [l, c, h] = fit_to_srgb(&oklch.channels(), epsilon, &OKLCH);
        Self::new(l, c, h, oklch.alpha)
    }

    /// Parse `oklch()`.
    pub fn from_css(s: &str) -> Result<Self, ParseError> {
        let ([l, c, h], alpha) = parse_oklch(s)?;
        Ok(Self::new(l, c, h, alpha))
    }
}

impl std::fmt::Display for Oklch {
    /// Format as `oklch(l% c h)` with lightness as percentage.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let Self { l, c, h, alpha } = self.normalize();
        format(
            f,
            "oklch(",
            Syntax::Modern,
            &[(l * 100.0, 2, "%"), (c, 4, ""), (h, 2, "")],
            alpha,
        )
    }
}

impl_channels!(Oklch, Space::Oklch);

// ====================================================================================================================

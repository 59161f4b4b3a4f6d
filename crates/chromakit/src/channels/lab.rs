use super::Srgb;
use crate::core::conversion::{
    d50_to_d65, d65_to_d50, lab_to_xyz, lch_to_srgb, srgb_to_xyz, xab_to_xch, xch_to_xab,
    xyz_to_lab, D65_WHITE,
};
use crate::core::{
    clamp_channel, fit_to_srgb, format, in_srgb_gamut, normalize_alpha, normalize_hue, parse_lab,
    parse_lch, parse_xyz, Syntax, GAMUT_EPSILON, LCH,
};
use crate::error::ParseError;
use crate::{Float, Space};

/// A color in CIELAB with lightness `0..=100` and a/b axes `-128..=128`.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Lab {
    pub l: Float,
    pub a: Float,
    pub b: Float,
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub alpha: Option<Float>,
}

impl Lab {
    /// Create a new, normalized CIELAB color.
    pub fn new(l: Float, a: Float, b: Float, alpha: Option<Float>) -> Self {
        Self {
            l: clamp_channel(l, 0.0, 100.0),
            a: clamp_channel(a, -128.0, 128.0),
            b: clamp_channel(b, -128.0, 128.0),
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

    /// Convert XYZ to CIELAB.
    pub fn from_xyz(xyz: &Xyz) -> Self {
        let xyz = xyz.normalize();
        let [l, a, b] = xyz_to_lab(&xyz.channels());
        Self::new(l, a, b, xyz.alpha)
    }

    /// Convert CIELCh to CIELAB.
    pub fn from_lch(lch: &Lch) -> Self {
        let lch = lch.normalize();
        let [l, a, b] = xch_to_xab(&lch.channels());
        Self::new(l, a, b, lch.alpha)
    }

    /// Parse `lab()`.
    pub fn from_css(s: &str) -> Result<Self, ParseError> {
        let ([l, a, b], alpha) = parse_lab(s)?;
        Ok(Self::new(l, a, b, alpha))
    }
}

impl std::fmt::Display for Lab {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let Self { l, a, b, alpha } = self.normalize();
        format(
            f,
            "lab(",
            Syntax::Modern,
            &[(l, 2, ""), (a, 2, ""), (b, 2, "")],
            alpha,
        )
    }
}

impl_channels!(Lab, Space::Lab);

// --------------------------------------------------------------------------------------------------------------------

/// A color in CIELCh, the polar form of CIELAB, with lightness `0..=100`,
/// chroma `0..=150`, and hue `0..360`.
///
/// This is the canonical representation for [`Color`](crate::Color).
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Lch {
    pub l: Float,
    pub c: Float,
    pub h: Float,
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub alpha: Option<Float>,
}

impl Lch {
    /// The default tolerance for fitting into the sRGB gamut.
    pub const DEFAULT_EPSILON: Float = 0.01;

    /// Create a new, normalized CIELCh color.
    pub fn new(l: Float, c: Float, h: Float, alpha: Option<Float>) -> Self {
        Self {
            l: clamp_channel(l, 0.0, 100.0),
            c: clamp_channel(c, 0.0, 150.0),
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

    /// Convert CIELAB to CIELCh.
    pub fn from_lab(lab: &Lab) -> Self {
        let lab = lab.normalize();
        let [l, c, h] = xab_to_xch(&lab.channels());
        Self::new(l, c, h, lab.alpha)
    }

    /// Determine whether this color is inside the sRGB gamut.
    pub fn in_srgb_gamut(&self) -> bool {
        in_srgb_gamut(&lch_to_srgb(&self.normalize().channels()), GAMUT_EPSILON)
    }

    /// Map this color into the sRGB gamut by reducing its chroma.
    ///
    /// Lightness and hue stay the same, unless the color is so dark or light
    /// that it becomes black or white. Chroma is found by binary search with
    /// the given tolerance; [`Lch::DEFAULT_EPSILON`] is a good default. The
    /// result always is in gamut.
    #[must_use = "method returns new color and does not mutate original value"]
    pub fn fit_to_srgb(&self, epsilon: Float) -> Self {
        let lch = self.normalize();
        let [l, c, h] = fit_to_srgb(&lch.channels(), epsilon, &LCH);
        Self::new(l, c, h, lch.alpha)
    }

    /// Parse `lch()`.
    pub fn from_css(s: &str) -> Result<Self, ParseError> {
        let ([l, c, h], alpha) = parse_lch(s)?;
        Ok(Self::new(l, c, h, alpha))
    }
}

impl std::fmt::Display for Lch {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let Self { l, c, h, alpha } = self.normalize();
        format(
            f,
            "lch(",
            Syntax::Modern,
            &[(l, 2, ""), (c, 2, ""), (h, 2, "")],
            alpha,
        )
    }
}

impl_channels!(Lch, Space::Lch);

// --------------------------------------------------------------------------------------------------------------------

/// A color in CIE XYZ with D65 white point.
///
/// X and Y are limited to unit range and Z to `0..=1.08883`, i.e., the Z of
/// the reference white.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Xyz {
    pub x: Float,
    pub y: Float,
    pub z: Float,
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub alpha: Option<Float>,
}

impl Xyz {
    /// Create a new, normalized XYZ color.
    pub fn new(x: Float, y: Float, z: Float, alpha: Option<Float>) -> Self {
        Self {
            x: clamp_channel(x, 0.0, 1.0),
            y: clamp_channel(y, 0.0, 1.0),
            z: clamp_channel(z, 0.0, D65_WHITE[2]),
            alpha: normalize_alpha(alpha),
        }
    }

    /// Normalize this color.
    #[must_use = "method returns new color and does not mutate original value"]
    pub fn normalize(&self) -> Self {
        Self::new(self.x, self.y, self.z, self.alpha)
    }

    /// Access the channels as an array.
    pub const fn channels(&self) -> [Float; 3] {
        [self.x, self.y, self.z]
    }

    /// Convert CIELAB to XYZ.
    pub fn from_lab(lab: &Lab) -> Self {
        let lab = lab.normalize();
        let [x, y, z] = lab_to_xyz(&lab.channels());
        Self::new(x, y, z, lab.alpha)
    }

    /// Convert sRGB to XYZ.
    pub fn from_srgb(srgb: &Srgb) -> Self {
        let srgb = srgb.normalize();
        let [x, y, z] = srgb_to_xyz(&srgb.channels());
        Self::new(x, y, z, srgb.alpha)
    }

    /// Chromatically adapt this color to the D50 white point with the
    /// Bradford transform.
    pub fn to_d50(&self) -> [Float; 3] {
        d65_to_d50(&self.normalize().channels())
    }

    /// Create a new XYZ color from D50 coordinates.
    pub fn from_d50(x: Float, y: Float, z: Float, alpha: Option<Float>) -> Self {
        let [x, y, z] = d50_to_d65(&[x, y, z]);
        Self::new(x, y, z, alpha)
    }

    /// Parse `color(xyz …)`, `color(xyz-d65 …)`, or `color(xyz-d50 …)`.
    pub fn from_css(s: &str) -> Result<Self, ParseError> {
        let ([x, y, z], alpha) = parse_xyz(s)?;
        Ok(Self::new(x, y, z, alpha))
    }

    /// Format as `color(xyz-d50 …)`.
    pub fn to_css_d50(&self) -> String {
        struct D50([Float; 3], Option<Float>);

        impl std::fmt::Display for D50 {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                let [x, y, z] = self.0;
                format(
                    f,
                    "color(xyz-d50 ",
                    Syntax::Modern,
                    &[(x, 5, ""), (y, 5, ""), (z, 5, "")],
                    self.1,
                )
            }
        }

        let xyz = self.normalize();
        D50(xyz.to_d50(), xyz.alpha).to_string()
    }
}

impl std::fmt::Display for Xyz {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let Self { x, y, z, alpha } = self.normalize();
        format(
            f,
            "color(xyz-d65 ",
            Syntax::Modern,
            &[(x, 5, ""), (y, 5, ""), (z, 5, "")],
            alpha,
        )
    }
}

impl_channels!(Xyz, Space::Xyz);

// ====================================================================================================================

#[cfg(test)]
mod test {
    use super::{Lab, Lch, Xyz};
    use crate::channels::Srgb;
    use crate::core::assert_within;
    use crate::error::ParseError;

    #[test]
    fn test_normalize() {
        assert_eq!(
            Lab::new(120.0, -200.0, 200.0, None),
            Lab { l: 100.0, a: -128.0, b: 128.0, alpha: None }
        );
        assert_eq!(
            Lch::new(-5.0, 200.0, 725.0, Some(0.5)),
            Lch { l: 0.0, c: 150.0, h: 5.0, alpha: Some(0.5) }
        );
        let white = Xyz::new(0.95047, 1.0, 1.08883, None);
        assert!(white.is_normalized());
        assert_eq!(Xyz::new(2.0, 2.0, 2.0, None).z, 1.08883);
    }

    #[test]
    fn test_conversions() {
        let teal = Srgb::new(58.0 / 255.0, 143.0 / 255.0, 154.0 / 255.0, Some(0.25));
        let xyz = Xyz::from_srgb(&teal);
        assert_within!(xyz.x, 0.17398, 1e-5);
        assert_within!(xyz.y, 0.22876, 1e-5);
        assert_within!(xyz.z, 0.34064, 1e-5);
        assert_eq!(xyz.alpha, Some(0.25));

        let lab = Lab::from_xyz(&xyz);
        assert_within!(lab.l, 54.9441, 1e-3);
        assert_within!(lab.a, -21.9009, 1e-3);
        assert_within!(lab.b, -13.4542, 1e-3);

        let lch = Lch::from_lab(&lab);
        assert_within!(lch.c, 25.7034, 1e-3);
        assert_within!(lch.h, 211.5635, 1e-3);

        let lab2 = Lab::from_lch(&lch);
        assert_within!(lab2.a, lab.a, 1e-9);
        assert_within!(lab2.b, lab.b, 1e-9);

        let back = Srgb::from_xyz(&Xyz::from_lab(&lab2));
        assert_within!(back.r, teal.r, 1e-5);
        assert_within!(back.g, teal.g, 1e-5);
        assert_within!(back.b, teal.b, 1e-5);
        assert_eq!(back.alpha, Some(0.25));
    }

    #[test]
    fn test_d50() {
        let xyz = Xyz::new(0.5, 0.4, 0.3, None);
        let [x, y, z] = xyz.to_d50();
        let back = Xyz::from_d50(x, y, z, None);
        assert_within!(back.x, 0.5, 1e-6);
        assert_within!(back.y, 0.4, 1e-6);
        assert_within!(back.z, 0.3, 1e-6);
        assert!(xyz.to_css_d50().starts_with("color(xyz-d50 "));
    }

    #[test]
    fn test_gamut() {
        let lch = Lch::new(80.0, 150.0, 140.0, Some(0.5));
        assert!(!lch.in_srgb_gamut());

        let fitted = lch.fit_to_srgb(Lch::DEFAULT_EPSILON);
        assert!(fitted.in_srgb_gamut());
        assert_eq!(fitted.l, 80.0);
        assert_eq!(fitted.h, 140.0);
        assert!(fitted.c < 150.0);
        assert_eq!(fitted.alpha, Some(0.5));

        let gray = Lch::new(50.0, 0.0, 0.0, None);
        assert!(gray.in_srgb_gamut());
        assert_eq!(gray.fit_to_srgb(Lch::DEFAULT_EPSILON), gray);
    }

    #[test]
    fn test_css() -> Result<(), ParseError> {
        assert_eq!(
            Lab::new(50.0, 25.0, -25.0, Some(0.5)).to_css(),
            "lab(50 25 -25 / 0.5)"
        );
        assert_eq!(
            Lch::new(50.0, 30.0, 120.0, Some(0.8)).to_css(),
            "lch(50 30 120 / 0.8)"
        );
        assert_eq!(
            Xyz::new(0.5, 0.5, 0.5, Some(0.7)).to_css(),
            "color(xyz-d65 0.5 0.5 0.5 / 0.7)"
        );
        assert_eq!(
            format!("{:.1}", Lch::new(50.123, 30.456, 120.789, None)),
            "lch(50.1 30.5 120.8)"
        );
        assert_eq!(
            format!("{:.400}", Lch::new(50.0, 30.0, 120.0, None)),
            "lch(50 30 120)"
        );
        assert_eq!(
            "lch(50 none 120)".parse::<Lch>()?,
            Lch::new(50.0, 0.0, 120.0, None)
        );
        assert_eq!(
            "lch(50 30 none)".parse::<Lch>()?,
            Lch::new(50.0, 30.0, 0.0, None)
        );

        assert_eq!("lab(50% 25 -25)".parse::<Lab>()?, Lab::new(50.0, 25.0, -25.0, None));
        assert_eq!(
            "lch(50 30 0.25turn / 50%)".parse::<Lch>()?,
            Lch::new(50.0, 30.0, 90.0, Some(0.5))
        );
        assert_eq!(
            "color(xyz 0.1 0.2 0.3)".parse::<Xyz>()?,
            Xyz::new(0.1, 0.2, 0.3, None)
        );
        assert!(matches!(
            "lab(50 25)".parse::<Lab>(),
            Err(ParseError::Malformed { .. })
        ));
        Ok(())
    }
}

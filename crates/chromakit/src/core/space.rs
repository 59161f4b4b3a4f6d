/// The enumeration of supported color spaces.
///
/// # RGB Variations
///
/// [sRGB](https://en.wikipedia.org/wiki/SRGB) is the web's default color
/// space. This crate represents it twice: [`Space::Srgb`] uses unit-range
/// channels `0..=1`, whereas [`Space::Rgb`] uses byte-range channels
/// `0..=255`. Both are gamma-corrected. [`Space::Hsl`], [`Space::Hsv`], and
/// [`Space::Cmyk`] are alternative coordinate systems for the very same gamut.
///
/// # CIE and Oklab
///
/// CIELAB and its polar form CIELCh are perceptually motivated color spaces
/// with lightness ranging `0..=100`. Oklab and its polar form Oklch improve on
/// CIELAB's hue linearity and use lightness ranging `0..=1`. XYZ with the D65
/// standard illuminant connects the RGB variations with CIELAB.
///
/// The polar color spaces HSL, HSV, LCh, and Oklch express hue in degrees
/// `0..360`.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Space {
    Rgb,
    Srgb,
    Hsl,
    Hsv,
    Cmyk,
    Lab,
    Lch,
    Oklab,
    Oklch,
    Xyz,
}

impl Space {
    /// All color spaces, in declaration order.
    pub const ALL: [Space; 10] = [
        Space::Rgb,
        Space::Srgb,
        Space::Hsl,
        Space::Hsv,
        Space::Cmyk,
        Space::Lab,
        Space::Lch,
        Space::Oklab,
        Space::Oklch,
        Space::Xyz,
    ];

    /// Get the lowercase name of this color space.
    pub const fn name(&self) -> &'static str {
        match *self {
            Self::Rgb => "rgb",
            Self::Srgb => "srgb",
            Self::Hsl => "hsl",
            Self::Hsv => "hsv",
            Self::Cmyk => "cmyk",
            Self::Lab => "lab",
            Self::Lch => "lch",
            Self::Oklab => "oklab",
            Self::Oklch => "oklch",
            Self::Xyz => "xyz",
        }
    }
}

impl std::fmt::Display for Space {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match *self {
            Self::Rgb => "RGB",
            Self::Srgb => "sRGB",
            Self::Hsl => "HSL",
            Self::Hsv => "HSV",
            Self::Cmyk => "CMYK",
            Self::Lab => "CIELAB",
            Self::Lch => "CIELCh",
            Self::Oklab => "Oklab",
            Self::Oklch => "Oklch",
            Self::Xyz => "XYZ D65",
        };

        f.write_str(s)
    }
}

#[cfg(test)]
mod test {
    use super::Space;

    #[test]
    fn test_space() {
        assert_eq!(Space::ALL.len(), 10);
        assert_eq!(Space::Srgb.name(), "srgb");
        assert_eq!(Space::Oklch.name(), "oklch");
        assert_eq!(format!("{}", Space::Xyz), "XYZ D65");
    }
}

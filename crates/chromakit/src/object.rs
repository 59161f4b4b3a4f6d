use std::collections::HashMap;
use std::sync::{Arc, Mutex, OnceLock, PoisonError};

use tracing::debug;

use crate::channels::{Cmyk, Hsl, Hsv, Lab, Lch, Oklab, Oklch, Rgb, Srgb, Xyz};
use crate::core::{
    ansi_background, ansi_text, clamp_channel, from_binary, parse_hex, to_apca_contrast,
    to_apca_luminance, to_binary, to_contrast_ratio, to_eq_alpha, to_eq_bits, to_hex,
    to_luminance, DEFAULT_DECODING,
};
use crate::error::ParseError;
use crate::opt::ContrastOptions;
use crate::value::{from_channels, from_text, ColorValue};
use crate::{Bits, Float, Space};

/// The memoized views of a color.
#[derive(Default)]
struct Cache {
    lab: OnceLock<Lab>,
    xyz: OnceLock<Xyz>,
    srgb: OnceLock<Srgb>,
    oklab: OnceLock<Oklab>,
    oklch: OnceLock<Oklch>,
    hsl: OnceLock<Hsl>,
    hsv: OnceLock<Hsv>,
    cmyk: OnceLock<Cmyk>,
    rgb: OnceLock<Rgb>,
    luminance: OnceLock<Float>,
    gamut: OnceLock<Box<Color>>,
    ansi_text: Mutex<HashMap<String, Arc<str>>>,
    ansi_background: Mutex<HashMap<String, Arc<str>>>,
}

/// Look up the rendered content or render and remember it.
fn memoize(
    memo: &Mutex<HashMap<String, Arc<str>>>,
    content: &str,
    render: impl FnOnce() -> String,
) -> Arc<str> {
    let mut memo = memo.lock().unwrap_or_else(PoisonError::into_inner);
    if let Some(rendered) = memo.get(content) {
        return Arc::clone(rendered);
    }

    let rendered: Arc<str> = render().into();
    memo.insert(content.to_owned(), Arc::clone(&rendered));
    rendered
}

/// Interpolate between two hues along the shorter arc.
fn interpolate_hue(h1: Float, h2: Float, factor: Float) -> Float {
    let difference = h2 - h1;
    let h2 = if 180.0 < difference {
        h2 - 360.0
    } else if difference < -180.0 {
        h2 + 360.0
    } else {
        h2
    };

    h1.mul_add(1.0 - factor, h2 * factor)
}

/// An immutable color.
///
/// A color stores exactly one authoritative representation, its [`Lch`]
/// coordinates plus optional alpha. All other representations are derived on
/// first access and then cached, so that repeated accessor calls return the
/// very same reference. Derivation follows a fixed chain: CIELAB from CIELCh,
/// XYZ from CIELAB, sRGB from XYZ, and everything else from sRGB. Since the
/// sRGB view clamps, so do all views derived from it.
///
/// Factories for other color spaces convert along the reverse chain. For
/// example, [`Color::from_hsl`] converts HSL to sRGB, then XYZ, then CIELAB,
/// and finally CIELCh.
///
/// Methods that "modify" a color return a new color instead. Cloning a color
/// produces an independent color with an empty cache.
///
/// # Equality Testing and Hashing
///
/// Equality testing and hashing only consider the CIELCh coordinates and
/// alpha. To tolerate floating point error, they compare coordinates after
/// reducing their resolution with [`to_eq_bits`](crate::to_eq_bits). The hue
/// of a color without chroma is ignored.
///
/// ```
/// # use chromakit::{Color, Space};
/// # use chromakit::error::ParseError;
/// let teal = Color::from_hex("#3a8f9a")?;
/// assert_eq!(teal.hex("rgb"), "#3a8f9a");
/// assert_eq!(teal.rgb().to_bytes(), [58, 143, 154]);
/// assert_eq!(teal.css(Space::Rgb), "rgb(58, 143, 154)");
/// assert!(std::ptr::eq(teal.oklch(), teal.oklch()));
/// # Ok::<(), ParseError>(())
/// ```
pub struct Color {
    lch: Lch,
    cache: Cache,
}

impl Color {
    /// Create a new color from CIELCh coordinates. This is the most efficient
    /// factory.
    pub fn from_lch(lch: &Lch) -> Self {
        Self {
            lch: lch.normalize(),
            cache: Cache::default(),
        }
    }

    /// Create a new color from CIELAB coordinates.
    pub fn from_lab(lab: &Lab) -> Self {
        Self::from_lch(&Lch::from_lab(lab))
    }

    /// Create a new color from XYZ coordinates.
    pub fn from_xyz(xyz: &Xyz) -> Self {
        Self::from_lab(&Lab::from_xyz(xyz))
    }

    /// Create a new color from sRGB coordinates.
    pub fn from_srgb(srgb: &Srgb) -> Self {
        Self::from_xyz(&Xyz::from_srgb(srgb))
    }

    /// Create a new color from Oklab coordinates. Out-of-gamut colors are
    /// clamped to sRGB.
    pub fn from_oklab(oklab: &Oklab) -> Self {
        Self::from_srgb(&Srgb::from_oklab(oklab))
    }

    /// Create a new color from Oklch coordinates. Out-of-gamut colors are
    /// clamped to sRGB.
    pub fn from_oklch(oklch: &Oklch) -> Self {
        Self::from_oklab(&Oklab::from_oklch(oklch))
    }

    /// Create a new color from HSL coordinates.
    pub fn from_hsl(hsl: &Hsl) -> Self {
        Self::from_srgb(&Srgb::from_hsl(hsl))
    }

    /// Create a new color from HSV coordinates.
    pub fn from_hsv(hsv: &Hsv) -> Self {
        Self::from_srgb(&Srgb::from_hsv(hsv))
    }

    /// Create a new color from CMYK coordinates.
    pub fn from_cmyk(cmyk: &Cmyk) -> Self {
        Self::from_srgb(&Srgb::from_cmyk(cmyk))
    }

    /// Create a new color from RGB coordinates.
    pub fn from_rgb(rgb: &Rgb) -> Self {
        Self::from_srgb(&Srgb::from_rgb(rgb))
    }

    /// Create a new color from a hexadecimal string with 3, 4, 6, or 8
    /// digits and an optional leading `#`. The 4 and 8 digit forms include
    /// alpha as the last byte.
    pub fn from_hex(s: &str) -> Result<Self, ParseError> {
        let (rgb, alpha) = parse_hex(s)?;
        Ok(Self::from_rgb(&Rgb::from_bytes(rgb, alpha)))
    }

    /// Create a new color from a packed integer with the given byte order,
    /// e.g., `"argb"` or `"bgr"`. The first channel in the format occupies the
    /// most significant byte. If the format has no `a`, the color has no
    /// alpha.
    ///
    /// ```
    /// # use chromakit::{Color, DEFAULT_DECODING};
    /// let red = Color::from_binary(0xff0000, "rgb");
    /// assert_eq!(red, Color::from_binary(0x0000ff, "bgr"));
    /// assert_eq!(red.alpha(), None);
    ///
    /// let faded = Color::from_binary(0x80ff0000, DEFAULT_DECODING);
    /// assert_eq!(faded.binary("rgba"), 0xff000080);
    /// ```
    pub fn from_binary(value: u32, format: &str) -> Self {
        let (rgb, alpha) = from_binary(value, format);
        Self::from_rgb(&Rgb::from_bytes(rgb, alpha))
    }

    /// Parse a color from a channel map, text, or packed integer.
    ///
    /// Packed integers are decoded with [`DEFAULT_DECODING`]. Channel maps
    /// are recognized by their channel names, trying RGB, HSL, HSV, CIELAB,
    /// CIELCh, XYZ, and CMYK in that order. Text may be a hexadecimal string,
    /// `rgb()`, `hsl()`, `lab()`, `lch()`, `oklab()`, `oklch()`,
    /// `device-cmyk()`, `color(srgb …)`, `color(xyz …)`, or `color(--hsv
    /// …)`, again tried in that order.
    ///
    /// ```
    /// # use chromakit::{Channels, Color};
    /// # use chromakit::error::ParseError;
    /// let red = Color::parse("#f00")?;
    /// assert_eq!(red, Color::parse("rgb(255 0 0)")?);
    /// assert_eq!(red, Color::parse("hsl(0, 100%, 50%)")?);
    /// assert_eq!(red, Color::parse_with(0xff0000_u32, "rgb")?);
    /// assert_eq!(red, Color::parse(&Channels::from([("r", 255.0), ("g", 0.0), ("b", 0.0)]))?);
    /// assert!(Color::parse("red").is_err());
    /// # Ok::<(), ParseError>(())
    /// ```
    pub fn parse<'a>(value: impl Into<ColorValue<'a>>) -> Result<Self, ParseError> {
        Self::parse_with(value, DEFAULT_DECODING)
    }

    /// Parse a color, decoding packed integers with the given byte order.
    pub fn parse_with<'a>(
        value: impl Into<ColorValue<'a>>,
        format: &str,
    ) -> Result<Self, ParseError> {
        match value.into() {
            ColorValue::Channels(channels) => from_channels(channels),
            ColorValue::Text(text) => from_text(text),
            ColorValue::Binary(number) => Ok(Self::from_binary(number, format)),
        }
    }

    // ----------------------------------------------------------------------------------------------------------------

    /// Get this color's CIELCh coordinates.
    #[inline]
    pub fn lch(&self) -> &Lch {
        &self.lch
    }

    /// Get this color's CIELAB coordinates.
    pub fn lab(&self) -> &Lab {
        self.cache.lab.get_or_init(|| Lab::from_lch(&self.lch))
    }

    /// Get this color's XYZ coordinates.
    pub fn xyz(&self) -> &Xyz {
        self.cache.xyz.get_or_init(|| Xyz::from_lab(self.lab()))
    }

    /// Get this color's sRGB coordinates.
    pub fn srgb(&self) -> &Srgb {
        self.cache.srgb.get_or_init(|| Srgb::from_xyz(self.xyz()))
    }

    /// Get this color's Oklab coordinates.
    pub fn oklab(&self) -> &Oklab {
        self.cache.oklab.get_or_init(|| Oklab::from_srgb(self.srgb()))
    }

    /// Get this color's Oklch coordinates.
    pub fn oklch(&self) -> &Oklch {
        self.cache.oklch.get_or_init(|| Oklch::from_oklab(self.oklab()))
    }

    /// Get this color's HSL coordinates.
    pub fn hsl(&self) -> &Hsl {
        self.cache.hsl.get_or_init(|| Hsl::from_srgb(self.srgb()))
    }

    /// Get this color's HSV coordinates.
    pub fn hsv(&self) -> &Hsv {
        self.cache.hsv.get_or_init(|| Hsv::from_srgb(self.srgb()))
    }

    /// Get this color's CMYK coordinates.
    pub fn cmyk(&self) -> &Cmyk {
        self.cache.cmyk.get_or_init(|| Cmyk::from_srgb(self.srgb()))
    }

    /// Get this color's RGB coordinates.
    pub fn rgb(&self) -> &Rgb {
        self.cache.rgb.get_or_init(|| Rgb::from_srgb(self.srgb()))
    }

    /// Get this color's alpha.
    #[inline]
    pub fn alpha(&self) -> Option<Float> {
        self.lch.alpha
    }

    /// Format this color as CSS in the given color space.
    ///
    /// Since CSS has no HSV function, HSV uses `color(--hsv …)`.
    pub fn css(&self, space: Space) -> String {
        match space {
            Space::Rgb => self.rgb().to_css(),
            Space::Srgb => self.srgb().to_css(),
            Space::Hsl => self.hsl().to_css(),
            Space::Hsv => self.hsv().to_css(),
            Space::Cmyk => self.cmyk().to_css(),
            Space::Lab => self.lab().to_css(),
            Space::Lch => self.lch.to_css(),
            Space::Oklab => self.oklab().to_css(),
            Space::Oklch => self.oklch().to_css(),
            Space::Xyz => self.xyz().to_css(),
        }
    }

    /// Format this color as a hexadecimal string with leading `#` and the
    /// given byte order. Missing alpha is formatted as `ff`.
    pub fn hex(&self, format: &str) -> String {
        let rgb = self.rgb();
        to_hex(&rgb.to_bytes(), rgb.alpha_byte(), format)
    }

    /// Pack this color into an integer with the given byte order. The first
    /// channel in the format occupies the most significant byte, so `"rgb"`
    /// packs as `0xRRGGBB`. Code that places the first channel in the least
    /// significant byte instead needs to reverse the format, e.g., `"bgr"`
    /// for `"rgb"`. Missing alpha is encoded as `0xff`.
    ///
    /// ```
    /// # use chromakit::{channels::Rgb, Color};
    /// let color = Color::from_rgb(&Rgb::new(255.0, 128.0, 64.0, None));
    /// assert_eq!(color.binary("rgb"), 0xff8040);
    /// assert_eq!(color.binary("bgr"), 0x4080ff);
    /// ```
    pub fn binary(&self, format: &str) -> u32 {
        let rgb = self.rgb();
        to_binary(&rgb.to_bytes(), rgb.alpha_byte(), format)
    }

    /// Wrap the content in ANSI escape sequences that set this color as
    /// 24-bit foreground color and then reset all attributes.
    ///
    /// The result is memoized per content.
    pub fn ansi_text(&self, content: &str) -> Arc<str> {
        memoize(&self.cache.ansi_text, content, || {
            ansi_text(&self.rgb().to_bytes(), content)
        })
    }

    /// Wrap the content in ANSI escape sequences that set this color as
    /// 24-bit background color and then reset all attributes.
    ///
    /// The result is memoized per content.
    pub fn ansi_background(&self, content: &str) -> Arc<str> {
        memoize(&self.cache.ansi_background, content, || {
            ansi_background(&self.rgb().to_bytes(), content)
        })
    }

    // ----------------------------------------------------------------------------------------------------------------

    /// Get this color's WCAG 2 relative luminance.
    pub fn relative_luminance(&self) -> Float {
        *self
            .cache
            .luminance
            .get_or_init(|| to_luminance(&self.srgb().channels()))
    }

    /// Compute the WCAG 2 contrast ratio between this and the other color.
    ///
    /// The ratio ranges from 1 for identical luminance to 21 for black and
    /// white. It is symmetric.
    pub fn contrast_ratio(&self, other: &Self) -> Float {
        to_contrast_ratio(self.relative_luminance(), other.relative_luminance())
    }

    /// Get this color's APCA luminance for use as text or background, with
    /// light-on-dark polarity if `is_dark` is true.
    pub fn relative_luminance_apca(&self, is_text: bool, is_dark: bool) -> Float {
        to_apca_luminance(self.relative_luminance(), is_text, is_dark)
    }

    /// Compute the APCA lightness contrast of this color as text on the
    /// given background. The polarity follows the background's
    /// [`Color::is_dark`].
    ///
    /// ```
    /// # use chromakit::Color;
    /// # use chromakit::error::ParseError;
    /// let black = Color::from_hex("#000")?;
    /// let white = Color::from_hex("#fff")?;
    /// assert_eq!(black.contrast_ratio_apca(&white).round(), 106.0);
    /// assert_eq!(white.contrast_ratio_apca(&black).round(), -108.0);
    /// # Ok::<(), ParseError>(())
    /// ```
    pub fn contrast_ratio_apca(&self, background: &Self) -> Float {
        self.contrast_ratio_apca_with(background, background.is_dark())
    }

    /// Compute the APCA lightness contrast of this color as text on the
    /// given background with the given polarity.
    ///
    /// The result is positive for dark text on light background and negative
    /// for light text on dark background. Magnitudes below 10 are zero.
    pub fn contrast_ratio_apca_with(&self, background: &Self, is_dark: bool) -> Float {
        to_apca_contrast(
            self.relative_luminance_apca(true, is_dark),
            background.relative_luminance_apca(false, is_dark),
        )
    }

    /// Determine whether this color is dark, i.e., has XYZ luminance Y below
    /// 0.5.
    pub fn is_dark(&self) -> bool {
        self.is_dark_with(0.5)
    }

    /// Determine whether this color's XYZ luminance Y is below the given
    /// threshold.
    pub fn is_dark_with(&self, threshold: Float) -> bool {
        self.xyz().y < threshold
    }

    // ----------------------------------------------------------------------------------------------------------------

    /// Invert this color in sRGB.
    ///
    /// The factor is clamped to unit range and blends between this color for
    /// 0 and the complement of each channel for 1. Alpha is unchanged.
    #[must_use = "method returns new color and does not mutate original value"]
    pub fn invert(&self, factor: Float) -> Self {
        let factor = clamp_channel(factor, 0.0, 1.0);
        let Srgb { r, g, b, alpha } = *self.srgb();
        let blend = |c: Float| c.mul_add(1.0 - factor, (1.0 - c) * factor);
        Self::from_srgb(&Srgb::new(blend(r), blend(g), blend(b), alpha))
    }

    /// Rotate this color's Oklch hue towards its complement.
    ///
    /// The factor is clamped to unit range, with 1 rotating by the full 180°.
    /// Lightness, chroma, and alpha are unchanged.
    #[must_use = "method returns new color and does not mutate original value"]
    pub fn complementary(&self, factor: Float) -> Self {
        let factor = clamp_channel(factor, 0.0, 1.0);
        let Oklch { l, c, h, alpha } = *self.oklch();
        let hue = interpolate_hue(h, (h + 180.0) % 360.0, factor);
        Self::from_oklch(&Oklch::new(l, c, hue, alpha))
    }

    /// Interpolate between this and the other color in Oklch.
    ///
    /// The factor is clamped to unit range. Lightness, chroma, and alpha are
    /// interpolated linearly and hue along the shorter arc. The result has
    /// alpha unless neither color has alpha, with a missing alpha counting as
    /// opaque.
    ///
    /// ```
    /// # use chromakit::{Color, channels::Oklch};
    /// let c1 = Color::from_oklch(&Oklch::new(0.6, 0.1, 350.0, None));
    /// let c2 = Color::from_oklch(&Oklch::new(0.6, 0.1, 10.0, None));
    /// let hue = c1.interpolate(&c2, 0.5).oklch().h;
    /// assert!(hue < 0.5 || 359.5 < hue);
    /// ```
    #[must_use = "method returns new color and does not mutate original value"]
    pub fn interpolate(&self, other: &Self, factor: Float) -> Self {
        let factor = clamp_channel(factor, 0.0, 1.0);
        let (c1, c2) = (self.oklch(), other.oklch());
        let lerp = |v1: Float, v2: Float| v1.mul_add(1.0 - factor, v2 * factor);

        let alpha = match (c1.alpha, c2.alpha) {
            (None, None) => None,
            (a1, a2) => Some(lerp(a1.unwrap_or(1.0), a2.unwrap_or(1.0))),
        };

        Self::from_oklch(&Oklch::new(
            lerp(c1.l, c2.l),
            lerp(c1.c, c2.c),
            interpolate_hue(c1.h, c2.h, factor),
            alpha,
        ))
    }

    /// Derive a text color that contrasts with this color as background.
    ///
    /// The text color has this color's Oklch hue and the options' lightness
    /// for dark or light backgrounds. Its chroma is the options' target
    /// chroma if that meets the target APCA contrast, then the minimum
    /// chroma if that meets the target, and otherwise zero. Both chromas are
    /// capped by the maximum chroma. This method never fails. The text color
    /// has no alpha.
    ///
    /// ```
    /// # use chromakit::Color;
    /// # use chromakit::error::ParseError;
    /// # use chromakit::opt::ContrastOptions;
    /// let background = Color::from_hex("#1e293b")?;
    /// let text = background.contrast(&ContrastOptions::default());
    /// assert!(text.contrast_ratio_apca(&background).abs() >= 80.0);
    /// # Ok::<(), ParseError>(())
    /// ```
    pub fn contrast(&self, options: &ContrastOptions) -> Self {
        let hue = self.oklch().h;
        let is_dark = self.relative_luminance() < options.darkness_threshold();
        let lightness = if is_dark {
            options.lightness_when_dark()
        } else {
            options.lightness_when_light()
        };

        let candidate = |chroma: Float| Self::from_oklch(&Oklch::new(lightness, chroma, hue, None));
        let is_sufficient = |text: &Self| {
            options.target_ratio() <= text.contrast_ratio_apca_with(self, is_dark).abs()
        };

        let maximum = options.maximum_chroma();
        for chroma in [options.target_chroma().min(maximum), options.minimum_chroma().min(maximum)] {
            let text = candidate(chroma);
            if is_sufficient(&text) {
                return text;
            }
        }

        debug!(
            background = %self,
            target = options.target_ratio(),
            "contrasting text color falls back on gray"
        );
        candidate(0.0)
    }

    // ----------------------------------------------------------------------------------------------------------------

    /// Map this color into the sRGB gamut with the default tolerance
    /// [`Lch::DEFAULT_EPSILON`]. The result is memoized.
    pub fn to_srgb_gamut(&self) -> &Self {
        self.cache
            .gamut
            .get_or_init(|| Box::new(self.to_srgb_gamut_with(Lch::DEFAULT_EPSILON)))
    }

    /// Map this color into the sRGB gamut by reducing its CIELCh chroma with
    /// the given tolerance.
    ///
    /// Colors that are in gamut already are unchanged. Very dark and very
    /// light colors become black and white, respectively. All other colors
    /// keep their lightness and hue.
    ///
    /// ```
    /// # use chromakit::{Color, channels::Lch};
    /// let vivid = Color::from_lch(&Lch::new(80.0, 150.0, 140.0, None));
    /// let fitted = vivid.to_srgb_gamut_with(0.01);
    /// assert!(fitted.lch().in_srgb_gamut());
    /// assert_eq!(fitted.lch().h, 140.0);
    /// assert!(fitted.lch().c < 150.0);
    /// ```
    #[must_use = "method returns new color and does not mutate original value"]
    pub fn to_srgb_gamut_with(&self, epsilon: Float) -> Self {
        Self::from_lch(&self.lch.fit_to_srgb(epsilon))
    }

    /// Create a copy of this color with the given alpha.
    #[must_use = "method returns new color and does not mutate original value"]
    pub fn with_alpha(&self, alpha: Option<Float>) -> Self {
        Self::from_lch(&Lch { alpha, ..self.lch })
    }

    /// Prepare this color for equality testing and hashing.
    fn eq_key(&self) -> ([Bits; 3], Option<Bits>) {
        let Lch { l, c, h, alpha } = self.lch;
        let c = to_eq_bits(c);
        let h = if c == to_eq_bits(0.0) { to_eq_bits(0.0) } else { to_eq_bits(h) };
        ([to_eq_bits(l), c, h], to_eq_alpha(alpha))
    }
}

// --------------------------------------------------------------------------------------------------------------------

impl Clone for Color {
    /// Clone this color. The clone has its own, empty cache.
    fn clone(&self) -> Self {
        Self::from_lch(&self.lch)
    }
}

impl Default for Color {
    /// Create black without alpha.
    fn default() -> Self {
        Self::from_lch(&Lch::default())
    }
}

impl PartialEq for Color {
    fn eq(&self, other: &Self) -> bool {
        self.lch == other.lch || self.eq_key() == other.eq_key()
    }
}

impl Eq for Color {}

impl std::hash::Hash for Color {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.eq_key().hash(state);
    }
}

impl std::fmt::Debug for Color {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let Lch { l, c, h, alpha } = self.lch;
        match alpha {
            Some(alpha) => f.write_fmt(format_args!("Color(lch [{}, {}, {}], alpha {})", l, c, h, alpha)),
            None => f.write_fmt(format_args!("Color(lch [{}, {}, {}])", l, c, h)),
        }
    }
}

impl std::fmt::Display for Color {
    /// Format this color as `lch()`, respecting the formatter's precision.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        std::fmt::Display::fmt(&self.lch, f)
    }
}

impl std::str::FromStr for Color {
    type Err = ParseError;

    /// Parse a hexadecimal string or CSS color function, just like
    /// [`Color::parse`].
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        from_text(s)
    }
}

impl TryFrom<&str> for Color {
    type Error = ParseError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        from_text(value)
    }
}

impl TryFrom<String> for Color {
    type Error = ParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        from_text(value.as_str())
    }
}

macro_rules! impl_from_record {
    ($($type:ident => $factory:ident),* $(,)?) => {
        $(
            impl From<$type> for Color {
                fn from(value: $type) -> Self {
                    Self::$factory(&value)
                }
            }

            impl From<&$type> for Color {
                fn from(value: &$type) -> Self {
                    Self::$factory(value)
                }
            }
        )*
    };
}

impl_from_record!(
    Lch => from_lch,
    Lab => from_lab,
    Xyz => from_xyz,
    Srgb => from_srgb,
    Oklab => from_oklab,
    Oklch => from_oklch,
    Hsl => from_hsl,
    Hsv => from_hsv,
    Cmyk => from_cmyk,
    Rgb => from_rgb,
);

#[cfg(feature = "serde")]
impl serde::Serialize for Color {
    /// Serialize this color as `lch()` with 6 digits past the decimal.
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(&format_args!("{:.6}", self))
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for Color {
    /// Deserialize a color from any text accepted by [`Color::parse`].
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        from_text(&text).map_err(serde::de::Error::custom)
    }
}

// ====================================================================================================================

#[cfg(test)]
mod test {
    use std::collections::HashSet;
    use std::sync::Arc;

    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    use super::Color;
    use crate::channels::{Cmyk, Hsv, Lab, Lch, Oklch, Rgb, Srgb, Xyz};
    use crate::core::assert_within;
    use crate::error::ParseError;
    use crate::opt::ContrastOptions;
    use crate::{Channels, Float, Space};

    #[test]
    fn test_send_sync() {
        fn is_send_sync<T: Send + Sync>() {}
        is_send_sync::<Color>();
    }

    #[test]
    fn test_round_trips() {
        let mut rng = StdRng::seed_from_u64(0x7465_616c);
        for _ in 0..200 {
            let srgb = Srgb::new(
                rng.random_range(0.0..=1.0),
                rng.random_range(0.0..=1.0),
                rng.random_range(0.0..=1.0),
                None,
            );
            let color = Color::from_srgb(&srgb);
            let actual = color.srgb();
            assert_within!(actual.r, srgb.r, 1e-3);
            assert_within!(actual.g, srgb.g, 1e-3);
            assert_within!(actual.b, srgb.b, 1e-3);

            let views = [
                Color::from_hsl(color.hsl()),
                Color::from_hsv(color.hsv()),
                Color::from_cmyk(color.cmyk()),
                Color::from_rgb(color.rgb()),
                Color::from_oklab(color.oklab()),
                Color::from_oklch(color.oklch()),
                Color::from_xyz(color.xyz()),
                Color::from_lab(color.lab()),
            ];
            for view in views {
                let again = view.srgb();
                assert_within!(again.r, srgb.r, 1e-3);
                assert_within!(again.g, srgb.g, 1e-3);
                assert_within!(again.b, srgb.b, 1e-3);
            }
        }

        let lab = Lab::new(54.9441, -21.9009, -13.4542, Some(0.5));
        let color = Color::from_lab(&lab);
        assert_within!(color.lab().l, lab.l, 1e-9);
        assert_within!(color.lab().a, lab.a, 1e-9);
        assert_within!(color.lab().b, lab.b, 1e-9);
        assert_eq!(color.alpha(), Some(0.5));
        assert_eq!(color.rgb().to_bytes(), [58, 143, 154]);

        let xyz = Xyz::new(0.2, 0.3, 0.4, None);
        let color = Color::from_xyz(&xyz);
        assert_within!(color.xyz().x, 0.2, 1e-9);
        assert_within!(color.xyz().y, 0.3, 1e-9);
        assert_within!(color.xyz().z, 0.4, 1e-9);

        let hsv = Hsv::new(200.0, 0.5, 0.6, None);
        assert_within!(Color::from_hsv(&hsv).hsv().h, 200.0, 1e-3);
    }

    #[test]
    fn test_accessors_are_memoized() {
        let color = Color::from_rgb(&Rgb::new(12.0, 34.0, 56.0, None));
        assert!(std::ptr::eq(color.lab(), color.lab()));
        assert!(std::ptr::eq(color.srgb(), color.srgb()));
        assert!(std::ptr::eq(color.oklch(), color.oklch()));
        assert!(std::ptr::eq(color.cmyk(), color.cmyk()));
        assert!(std::ptr::eq(color.to_srgb_gamut(), color.to_srgb_gamut()));

        let text = color.ansi_text("hello");
        assert!(Arc::ptr_eq(&text, &color.ansi_text("hello")));
        assert_eq!(&*text, "\x1b[38;2;12;34;56mhello\x1b[0m");
        assert_eq!(&*color.ansi_text("world"), "\x1b[38;2;12;34;56mworld\x1b[0m");
        assert_eq!(
            &*color.ansi_background("hello"),
            "\x1b[48;2;12;34;56mhello\x1b[0m"
        );

        let clone = color.clone();
        assert_eq!(clone, color);
        assert!(!std::ptr::eq(clone.lab(), color.lab()));
    }

    #[test]
    fn test_hex_and_binary() -> Result<(), ParseError> {
        let red = Color::from_hex("#FF0000")?;
        assert_eq!(red.binary("rgb"), 0xff0000);
        assert_eq!(red.binary("argb"), 0xffff0000);
        assert_eq!(red.binary("bgr"), 0x0000ff);
        assert_eq!(red.hex("rgb"), "#ff0000");
        assert_eq!(red.hex("argb"), "#ffff0000");
        assert_eq!(red.alpha(), None);

        let translucent = Color::from_hex("#ff000080")?;
        assert_eq!(translucent.rgb().alpha_byte(), Some(0x80));
        assert_eq!(translucent.hex("rgba"), "#ff000080");

        assert_eq!(Color::from_binary(0x00ff00, "rgb"), Color::from_hex("#0f0")?);
        assert_eq!(
            Color::from_hex("#12"),
            Err(ParseError::Malformed {
                space: Space::Rgb,
                input: "#12".to_string()
            })
        );
        Ok(())
    }

    #[test]
    fn test_parse() -> Result<(), ParseError> {
        let blue = Color::from_rgb(&Rgb::new(0.0, 0.0, 255.0, None));
        assert_eq!(Color::parse("#0000ff")?, blue);
        assert_eq!(Color::parse("rgb(0, 0, 255)")?, blue);
        assert_eq!(Color::parse("hsl(240deg 100% 50%)")?, blue);
        assert_eq!(Color::parse("color(srgb 0 0 1)")?, blue);
        assert_eq!(Color::parse("color(--hsv 240 100% 100%)")?, blue);
        assert_eq!(Color::parse(0xff0000ff_u32)?, blue.with_alpha(Some(1.0)));
        assert_eq!(Color::parse_with(0xff0000_u32, "bgr")?, blue);
        assert_eq!(
            Color::parse(&Channels::from([("h", 240.0), ("s", 1.0), ("v", 1.0)]))?,
            blue
        );
        assert_eq!("#00f".parse::<Color>()?, blue);
        assert_eq!(Color::try_from(String::from("#00f"))?, blue);

        let cmyk: Color = "device-cmyk(0.5 0.3 0.2 0.1)".parse()?;
        assert_eq!(cmyk, Color::from_cmyk(&Cmyk::new(0.5, 0.3, 0.2, 0.1, None)));
        let Srgb { r, g, b, .. } = *cmyk.srgb();
        assert_within!(r, 0.45, 1e-3);
        assert_within!(g, 0.63, 1e-3);
        assert_within!(b, 0.72, 1e-3);

        // Black is re-extracted from sRGB.
        let Cmyk { c, m, y, k, .. } = *cmyk.cmyk();
        assert_within!(c, 0.375, 1e-3);
        assert_within!(m, 0.125, 1e-3);
        assert_within!(y, 0.0, 1e-3);
        assert_within!(k, 0.28, 1e-3);

        let oklch = Color::parse("oklch(70% 0.1 200 / 0.5)")?;
        assert_within!(oklch.oklch().l, 0.7, 1e-3);
        assert_within!(oklch.oklch().c, 0.1, 1e-3);
        assert_within!(oklch.oklch().h, 200.0, 0.5);
        assert_eq!(oklch.alpha(), Some(0.5));

        assert_eq!(
            Color::parse("hsl(1, 2, 3)"),
            Err(ParseError::Unparseable {
                input: "hsl(1, 2, 3)".to_string()
            })
        );
        Ok(())
    }

    #[test]
    fn test_luminance_and_contrast() -> Result<(), ParseError> {
        let black = Color::from_hex("#000")?;
        let white = Color::from_hex("#fff")?;

        assert_eq!(black.relative_luminance(), 0.0);
        assert_within!(white.relative_luminance(), 1.0, 1e-6);
        assert_within!(black.contrast_ratio(&white), 21.0, 1e-3);
        assert_eq!(black.contrast_ratio(&white), white.contrast_ratio(&black));

        assert_within!(black.contrast_ratio_apca(&white), 106.04, 0.01);
        assert_within!(white.contrast_ratio_apca(&black), -107.88, 0.01);
        assert_eq!(white.contrast_ratio_apca(&white), 0.0);

        assert!(black.is_dark());
        assert!(!white.is_dark());
        let gray = Color::from_hex("#777")?;
        assert!(gray.is_dark());
        assert!(!gray.is_dark_with(0.1));
        Ok(())
    }

    #[test]
    fn test_invert() -> Result<(), ParseError> {
        let red = Color::from_hex("#ff0000cc")?;
        let cyan = red.invert(1.0);
        assert_eq!(cyan.hex("rgb"), "#00ffff");
        assert_eq!(cyan.alpha(), red.alpha());
        assert_eq!(red.invert(0.0).hex("rgba"), red.hex("rgba"));
        assert_eq!(red.invert(5.0).hex("rgb"), "#00ffff");

        let gray = red.invert(0.5);
        assert_within!(gray.srgb().r, 0.5, 1e-6);
        assert_within!(gray.srgb().g, 0.5, 1e-6);
        assert_within!(gray.srgb().b, 0.5, 1e-6);
        Ok(())
    }

    #[test]
    fn test_complementary() {
        let color = Color::from_oklch(&Oklch::new(0.6, 0.1, 30.0, Some(0.4)));
        let complement = color.complementary(1.0);
        assert_within!(complement.oklch().h, 210.0, 0.5);
        assert_within!(complement.oklch().l, 0.6, 1e-3);
        assert_within!(complement.oklch().c, 0.1, 1e-3);
        assert_eq!(complement.alpha(), Some(0.4));

        let halfway = color.complementary(0.5);
        assert_within!(halfway.oklch().h, 120.0, 0.5);

        let unchanged = color.complementary(0.0);
        assert_within!(unchanged.oklch().h, color.oklch().h, 1e-3);
    }

    #[test]
    fn test_interpolate() {
        let c1 = Color::from_oklch(&Oklch::new(0.5, 0.1, 350.0, None));
        let c2 = Color::from_oklch(&Oklch::new(0.7, 0.05, 10.0, Some(0.5)));

        let start = c1.interpolate(&c2, 0.0);
        assert_within!(start.oklch().l, c1.oklch().l, 1e-5);
        assert_within!(start.oklch().c, c1.oklch().c, 1e-5);
        assert_within!(start.oklch().h, c1.oklch().h, 1e-3);
        assert_eq!(start.alpha(), Some(1.0));

        let end = c1.interpolate(&c2, 1.0);
        assert_within!(end.oklch().l, c2.oklch().l, 1e-5);
        assert_within!(end.oklch().c, c2.oklch().c, 1e-5);
        assert_within!(end.oklch().h, c2.oklch().h, 1e-3);
        assert_eq!(end.alpha(), Some(0.5));

        let middle = c1.interpolate(&c2, 0.5);
        let hue = middle.oklch().h;
        assert!(hue < 0.5 || 359.5 < hue, "hue {} should be close to 0", hue);
        assert_within!(middle.oklch().l, 0.6, 1e-3);
        assert_eq!(middle.alpha(), Some(0.75));

        let opaque = c1.interpolate(&c1.clone(), 0.3);
        assert_eq!(opaque.alpha(), None);
        assert_within!(c1.interpolate(&c2, 7.0).oklch().l, c2.oklch().l, 1e-5);
    }

    #[test]
    fn test_contrast() -> Result<(), ParseError> {
        let options = ContrastOptions::default();

        let white = Color::from_hex("#fff")?;
        let text = white.contrast(&options);
        assert!(text.relative_luminance() < 0.05);
        assert!(text.contrast_ratio_apca(&white).abs() >= 80.0);
        assert_eq!(text.alpha(), None);

        let black = Color::from_hex("#000")?;
        let text = black.contrast(&options);
        assert_within!(text.oklch().l, 0.95, 0.02);
        assert!(text.contrast_ratio_apca_with(&black, true).abs() >= 80.0);

        // Medium gray cannot reach the target and degrades to gray text
        let gray = Color::from_hex("#777")?;
        let text = gray.contrast(&options);
        assert!(text.oklch().c < 1e-4);
        assert_within!(text.oklch().l, 0.95, 1e-3);
        Ok(())
    }

    #[test]
    fn test_gamut() {
        let vivid = Color::from_lch(&Lch::new(80.0, 150.0, 140.0, Some(0.5)));
        assert!(!vivid.lch().in_srgb_gamut());

        let fitted = vivid.to_srgb_gamut();
        assert!(fitted.lch().in_srgb_gamut());
        assert_eq!(fitted.lch().l, 80.0);
        assert_eq!(fitted.lch().h, 140.0);
        assert_eq!(fitted.alpha(), Some(0.5));

        let coarse = vivid.to_srgb_gamut_with(1.0);
        assert!(coarse.lch().in_srgb_gamut());
        assert!(coarse.lch().c <= fitted.lch().c + 1.0);

        let teal = Color::from_lch(&Lch::new(55.0, 25.0, 210.0, None));
        assert_eq!(teal.to_srgb_gamut(), &teal);
    }

    #[test]
    fn test_alpha_and_equality() {
        let color = Color::from_lch(&Lch::new(50.0, 30.0, 120.0, None));
        let translucent = color.with_alpha(Some(0.25));
        assert_eq!(translucent.alpha(), Some(0.25));
        assert_ne!(translucent, color);
        assert_eq!(translucent.with_alpha(None), color);
        assert_eq!(color.with_alpha(Some(7.0)).alpha(), Some(1.0));

        let rotated = Color::from_lch(&Lch::new(50.0, 30.0, 120.0 + 1e-14, None));
        assert_eq!(rotated, color);

        // Without chroma, hue does not matter
        let gray1 = Color::from_lch(&Lch::new(50.0, 0.0, 10.0, None));
        let gray2 = Color::from_lch(&Lch::new(50.0, 0.0, 250.0, None));
        assert_eq!(gray1, gray2);

        let set: HashSet<Color> = [color.clone(), rotated, gray1, gray2].into_iter().collect();
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn test_css() {
        let color = Color::from_lch(&Lch::new(50.0, 30.0, 120.0, Some(0.8)));
        assert_eq!(color.to_string(), "lch(50 30 120 / 0.8)");
        assert_eq!(format!("{:.1}", color), "lch(50 30 120 / 0.8)");
        assert_eq!(color.css(Space::Lch), "lch(50 30 120 / 0.8)");

        let green = Color::from_rgb(&Rgb::new(0.0, 128.0, 0.0, None));
        assert_eq!(green.css(Space::Rgb), "rgb(0, 128, 0)");
        assert_eq!(green.css(Space::Hsl), "hsl(120, 100%, 25.1%)");
        assert_eq!(green.css(Space::Hsv), "color(--hsv 120 100% 50.2%)");
        assert_eq!(green.css(Space::Cmyk), "device-cmyk(1 0 1 0.5)");
        assert_eq!(green.css(Space::Srgb), "color(srgb 0 0.50196 0)");
        assert!(green.css(Space::Xyz).starts_with("color(xyz-d65 "));
        assert!(green.css(Space::Lab).starts_with("lab("));
        assert!(green.css(Space::Oklab).starts_with("oklab("));
        assert!(green.css(Space::Oklch).starts_with("oklch("));

        for space in Space::ALL {
            let css = green.css(space);
            let parsed: Color = css.parse().unwrap_or_default();
            assert_within!(parsed.srgb().g, green.srgb().g, 0.01 as Float);
        }
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_serde() -> Result<(), serde_json::Error> {
        let color = Color::from_lch(&Lch::new(50.0, 30.0, 120.0, Some(0.8)));
        let json = serde_json::to_string(&color)?;
        assert_eq!(json, r#""lch(50 30 120 / 0.8)""#);
        assert_eq!(serde_json::from_str::<Color>(&json)?, color);
        assert_eq!(
            serde_json::from_str::<Color>(r##""#ff0000""##)?,
            Color::from_rgb(&Rgb::new(255.0, 0.0, 0.0, None))
        );
        assert!(serde_json::from_str::<Color>(r#""nope""#).is_err());

        let oklab = crate::channels::Oklab::new(0.5, 0.1, -0.1, None);
        let json = serde_json::to_string(&oklab)?;
        assert_eq!(serde_json::from_str::<crate::channels::Oklab>(&json)?, oklab);
        Ok(())
    }
}

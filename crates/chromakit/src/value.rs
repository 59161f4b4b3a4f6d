//! Untyped color values for [`Color::parse`].
//!
//! A [`ColorValue`] is either a [`Channels`] map, some text, or a packed
//! integer. Channel maps are recognized by the names of their channels, text
//! by trying one grammar after the other. In both cases, order matters. The
//! first match wins.

use std::collections::BTreeMap;

use tracing::{debug, trace};

use crate::channels::{Cmyk, Hsl, Hsv, Lab, Lch, Oklab, Oklch, Rgb, Srgb, Xyz};
use crate::error::ParseError;
use crate::{Color, Float};

/// A color given as a map from channel names to values.
///
/// Channel names are the single-letter field names of the typed records,
/// e.g., `r`, `g`, and `b` for [`Rgb`], plus `alpha`. The shape predicates
/// only check for the presence of channel names. Values are normalized when
/// the map is converted into a color, so out-of-range values are fine.
///
/// ```
/// # use chromakit::{Channels, Color};
/// let teal = Channels::new().with("r", 58.0).with("g", 143.0).with("b", 154.0);
/// assert!(teal.is_rgb());
/// assert!(!teal.is_lab());
/// assert_eq!(Color::parse(&teal)?.hex("rgb"), "#3a8f9a");
/// # Ok::<(), chromakit::error::ParseError>(())
/// ```
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(transparent)
)]
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Channels(BTreeMap<String, Float>);

impl Channels {
    /// Create a new, empty channel map.
    pub fn new() -> Self {
        Self(BTreeMap::new())
    }

    /// Add the named channel and return the updated map.
    #[must_use = "method returns updated map and does not mutate original value"]
    pub fn with(mut self, name: impl Into<String>, value: Float) -> Self {
        self.0.insert(name.into(), value);
        self
    }

    /// Set the named channel, returning the previous value.
    pub fn insert(&mut self, name: impl Into<String>, value: Float) -> Option<Float> {
        self.0.insert(name.into(), value)
    }

    /// Get the named channel.
    pub fn get(&self, name: &str) -> Option<Float> {
        self.0.get(name).copied()
    }

    /// Get the alpha channel.
    pub fn alpha(&self) -> Option<Float> {
        self.get("alpha")
    }

    /// Get the number of channels, including alpha.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Determine whether this map has no channels.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate over the channels in alphabetical order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, Float)> {
        self.0.iter().map(|(name, value)| (name.as_str(), *value))
    }

    fn has(&self, names: &[&str]) -> bool {
        names.iter().all(|name| self.0.contains_key(*name))
    }

    fn value(&self, name: &str) -> Float {
        self.get(name).unwrap_or(0.0)
    }

    /// Determine whether this map has `r`, `g`, and `b` channels.
    pub fn is_rgb(&self) -> bool {
        self.has(&["r", "g", "b"])
    }

    /// Determine whether this map has `h`, `s`, and `l` channels.
    pub fn is_hsl(&self) -> bool {
        self.has(&["h", "s", "l"])
    }

    /// Determine whether this map has `h`, `s`, and `v` channels.
    pub fn is_hsv(&self) -> bool {
        self.has(&["h", "s", "v"])
    }

    /// Determine whether this map has `l`, `a`, and `b` channels.
    pub fn is_lab(&self) -> bool {
        self.has(&["l", "a", "b"])
    }

    /// Determine whether this map has `l`, `c`, and `h` channels.
    pub fn is_lch(&self) -> bool {
        self.has(&["l", "c", "h"])
    }

    /// Determine whether this map has `x`, `y`, and `z` channels.
    pub fn is_xyz(&self) -> bool {
        self.has(&["x", "y", "z"])
    }

    /// Determine whether this map has `c`, `m`, `y`, and `k` channels.
    pub fn is_cmyk(&self) -> bool {
        self.has(&["c", "m", "y", "k"])
    }
}

impl<S: Into<String>> FromIterator<(S, Float)> for Channels {
    fn from_iter<I: IntoIterator<Item = (S, Float)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(name, value)| (name.into(), value)).collect())
    }
}

impl<S: Into<String>, const N: usize> From<[(S, Float); N]> for Channels {
    fn from(value: [(S, Float); N]) -> Self {
        value.into_iter().collect()
    }
}

impl std::fmt::Display for Channels {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("{")?;
        for (index, (name, value)) in self.iter().enumerate() {
            if 0 < index {
                f.write_str(", ")?;
            }
            f.write_fmt(format_args!("{}: {}", name, value))?;
        }
        f.write_str("}")
    }
}

// --------------------------------------------------------------------------------------------------------------------

/// Any of the values recognized by [`Color::parse`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ColorValue<'a> {
    /// A map from channel names to values.
    Channels(&'a Channels),
    /// A hexadecimal string or CSS color function.
    Text(&'a str),
    /// A packed integer, decoded with the given byte order or
    /// [`DEFAULT_DECODING`](crate::DEFAULT_DECODING).
    Binary(u32),
}

impl<'a> From<&'a Channels> for ColorValue<'a> {
    fn from(value: &'a Channels) -> Self {
        Self::Channels(value)
    }
}

impl<'a> From<&'a str> for ColorValue<'a> {
    fn from(value: &'a str) -> Self {
        Self::Text(value)
    }
}

impl<'a> From<&'a String> for ColorValue<'a> {
    fn from(value: &'a String) -> Self {
        Self::Text(value.as_str())
    }
}

impl From<u32> for ColorValue<'_> {
    fn from(value: u32) -> Self {
        Self::Binary(value)
    }
}

// --------------------------------------------------------------------------------------------------------------------

type Predicate = fn(&Channels) -> bool;
type Constructor = fn(&Channels) -> Color;

fn rgb_color(c: &Channels) -> Color {
    Color::from_rgb(&Rgb::new(c.value("r"), c.value("g"), c.value("b"), c.alpha()))
}

fn hsl_color(c: &Channels) -> Color {
    Color::from_hsl(&Hsl::new(c.value("h"), c.value("s"), c.value("l"), c.alpha()))
}

fn hsv_color(c: &Channels) -> Color {
    Color::from_hsv(&Hsv::new(c.value("h"), c.value("s"), c.value("v"), c.alpha()))
}

fn lab_color(c: &Channels) -> Color {
    Color::from_lab(&Lab::new(c.value("l"), c.value("a"), c.value("b"), c.alpha()))
}

fn lch_color(c: &Channels) -> Color {
    Color::from_lch(&Lch::new(c.value("l"), c.value("c"), c.value("h"), c.alpha()))
}

fn xyz_color(c: &Channels) -> Color {
    Color::from_xyz(&Xyz::new(c.value("x"), c.value("y"), c.value("z"), c.alpha()))
}

fn cmyk_color(c: &Channels) -> Color {
    let [cyan, magenta, yellow, key] = [c.value("c"), c.value("m"), c.value("y"), c.value("k")];
    Color::from_cmyk(&Cmyk::new(cyan, magenta, yellow, key, c.alpha()))
}

/// The channel map shapes in order of precedence.
const SHAPES: [(Predicate, Constructor); 7] = [
    (Channels::is_rgb, rgb_color),
    (Channels::is_hsl, hsl_color),
    (Channels::is_hsv, hsv_color),
    (Channels::is_lab, lab_color),
    (Channels::is_lch, lch_color),
    (Channels::is_xyz, xyz_color),
    (Channels::is_cmyk, cmyk_color),
];

/// Convert the channel map to a color, using the first matching shape.
pub(crate) fn from_channels(channels: &Channels) -> Result<Color, ParseError> {
    SHAPES
        .iter()
        .find(|(predicate, _)| predicate(channels))
        .map(|(_, constructor)| constructor(channels))
        .ok_or_else(|| {
            debug!(%channels, "channel map has no recognized shape");
            ParseError::unparseable(channels.to_string())
        })
}

// --------------------------------------------------------------------------------------------------------------------

type TextParser = fn(&str) -> Result<Color, ParseError>;

fn via<T>(s: &str) -> Result<Color, ParseError>
where
    T: std::str::FromStr<Err = ParseError>,
    Color: From<T>,
{
    s.parse::<T>().map(Color::from)
}

/// The text grammars in order of precedence.
const GRAMMARS: [TextParser; 11] = [
    Color::from_hex,
    via::<Rgb>,
    via::<Hsl>,
    via::<Lab>,
    via::<Lch>,
    via::<Oklab>,
    via::<Oklch>,
    via::<Cmyk>,
    via::<Srgb>,
    via::<Xyz>,
    via::<Hsv>,
];

/// Parse the text, using the first matching grammar.
pub(crate) fn from_text(s: &str) -> Result<Color, ParseError> {
    for parse in GRAMMARS {
        match parse(s) {
            Ok(color) => return Ok(color),
            Err(error) => trace!(
                space = error.space().map(|space| space.name()),
                %error,
                "grammar did not match"
            ),
        }
    }

    debug!(input = s, "text matches no color grammar");
    Err(ParseError::unparseable(s))
}

// ====================================================================================================================

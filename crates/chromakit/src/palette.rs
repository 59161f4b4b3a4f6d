//! Generation of tonal palettes from a single color.
//!
//! A [`Palette`] spreads a base color across Tailwind-style stops from 50 to
//! 900. The base color sits at the base stop. Lower stops are lighter and
//! higher stops darker, with HSL lightness changing by a fixed number of
//! percentage points per 100 stops. Optionally, hue shifts as well.
//!
//! ```
//! # use chromakit::Color;
//! # use chromakit::error::ParseError;
//! # use chromakit::palette::{Palette, PaletteOptions};
//! let palette = Palette::new(&Color::from_hex("#6c50ff")?, &PaletteOptions::default());
//! assert_eq!(palette.get(500).map(|c| c.hex("rgb")), Some("#6c50ff".to_owned()));
//! assert_eq!(palette.get(100).map(|c| c.hex("rgb")), Some("#f5f3ff".to_owned()));
//! assert_eq!(palette.get(900).map(|c| c.hex("rgb")), Some("#12006f".to_owned()));
//! # Ok::<(), ParseError>(())
//! ```

use tracing::trace;

use crate::channels::Hsl;
use crate::core::normalize_hue;
use crate::{Color, Float};

/// The default stops.
pub const DEFAULT_STOPS: [u16; 10] = [50, 100, 200, 300, 400, 500, 600, 700, 800, 900];

#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default, rename_all = "camelCase")
)]
#[derive(Clone, Debug, PartialEq)]
struct PaletteData {
    step_up: Float,
    step_down: Float,
    hue_shift: Float,
    stops: Vec<u16>,
    base_stop: u16,
}

impl Default for PaletteData {
    fn default() -> Self {
        Self {
            step_up: 8.0,
            step_down: 11.0,
            hue_shift: 0.0,
            stops: DEFAULT_STOPS.to_vec(),
            base_stop: 500,
        }
    }
}

/// A builder of palette options.
#[derive(Debug)]
pub struct PaletteOptionBuilder(PaletteData);

impl PaletteOptionBuilder {
    /// Set the HSL lightness gain in percentage points per 100 stops below
    /// the base stop.
    pub fn step_up(&mut self, step: Float) -> &mut Self {
        self.0.step_up = step;
        self
    }

    /// Set the HSL lightness loss in percentage points per 100 stops above
    /// the base stop.
    pub fn step_down(&mut self, step: Float) -> &mut Self {
        self.0.step_down = step;
        self
    }

    /// Set the hue shift in tenths of a degree per 100 stops below the base
    /// stop. Stops above the base shift in the opposite direction.
    pub fn hue_shift(&mut self, shift: Float) -> &mut Self {
        self.0.hue_shift = shift;
        self
    }

    /// Set the stops.
    pub fn stops(&mut self, stops: impl IntoIterator<Item = u16>) -> &mut Self {
        self.0.stops = stops.into_iter().collect();
        self
    }

    /// Set the stop holding the unmodified base color.
    pub fn base_stop(&mut self, stop: u16) -> &mut Self {
        self.0.base_stop = stop;
        self
    }

    /// Instantiate the options.
    pub fn build(&self) -> PaletteOptions {
        PaletteOptions(self.0.clone())
    }
}

/// The options for generating a palette.
///
/// By default, lightness rises by 8 points per 100 stops towards 50 and
/// falls by 11 points per 100 stops towards 900, hue does not shift, and the
/// base color sits at stop 500.
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(transparent)
)]
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PaletteOptions(PaletteData);

impl PaletteOptions {
    /// Create a new builder with the default option values.
    pub fn builder() -> PaletteOptionBuilder {
        PaletteOptionBuilder(PaletteData::default())
    }

    /// Create a new builder starting from these options.
    pub fn to_builder(&self) -> PaletteOptionBuilder {
        PaletteOptionBuilder(self.0.clone())
    }

    /// Get the lightness gain per 100 stops.
    pub fn step_up(&self) -> Float {
        self.0.step_up
    }

    /// Get the lightness loss per 100 stops.
    pub fn step_down(&self) -> Float {
        self.0.step_down
    }

    /// Get the hue shift per 100 stops.
    pub fn hue_shift(&self) -> Float {
        self.0.hue_shift
    }

    /// Get the stops.
    pub fn stops(&self) -> &[u16] {
        &self.0.stops
    }

    /// Get the base stop.
    pub fn base_stop(&self) -> u16 {
        self.0.base_stop
    }
}

// --------------------------------------------------------------------------------------------------------------------

/// A tonal palette.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Debug, PartialEq)]
pub struct Palette {
    shades: Vec<(u16, Color)>,
}

impl Palette {
    /// Generate the palette for the given base color and options.
    ///
    /// For each stop, the distance to the base stop in hundreds determines
    /// the shade. Positive distances, i.e., lighter shades, use the step up,
    /// negative distances the step down. HSL lightness clamps to unit range.
    /// Saturation and alpha are unchanged.
    pub fn new(color: &Color, options: &PaletteOptions) -> Self {
        let Hsl { h, s, l, alpha } = *color.hsl();
        let options = &options.0;

        let shades = options
            .stops
            .iter()
            .map(|&stop| {
                let distance = (Float::from(options.base_stop) - Float::from(stop)) / 100.0;
                let step = if 0.0 < distance {
                    options.step_up
                } else {
                    options.step_down
                };

                let lightness = (l + step / 100.0 * distance).clamp(0.0, 1.0);
                let hue = if options.hue_shift == 0.0 {
                    h
                } else {
                    normalize_hue(h + options.hue_shift * distance / 10.0)
                };

                trace!(stop, distance, lightness, hue, "palette shade");
                (stop, Color::from_hsl(&Hsl::new(hue, s, lightness, alpha)))
            })
            .collect();

        Self { shades }
    }

    /// Look up the shade for the given stop.
    pub fn get(&self, stop: u16) -> Option<&Color> {
        self.shades
            .iter()
            .find(|(s, _)| *s == stop)
            .map(|(_, color)| color)
    }

    /// Iterate over stops and shades in the order of the options' stops.
    pub fn iter(&self) -> impl Iterator<Item = (u16, &Color)> {
        self.shades.iter().map(|(stop, color)| (*stop, color))
    }

    /// Get the number of shades.
    pub fn len(&self) -> usize {
        self.shades.len()
    }

    /// Determine whether the palette has no shades.
    pub fn is_empty(&self) -> bool {
        self.shades.is_empty()
    }
}

// ====================================================================================================================

//! Helper module with the options for generating contrasting text colors.
//!
//! This module provides the options for [`Color::contrast`](crate::Color::contrast)
//! and the corresponding builder.
//!
//!
//! # Example
//!
//! ```
//! # use chromakit::opt::ContrastOptions;
//! let options = ContrastOptions::builder()
//!     .target_ratio(60.0)
//!     .lightness_when_dark(0.9)
//!     .build();
//!
//! assert_eq!(options.target_ratio(), 60.0);
//! assert_eq!(options.lightness_when_dark(), 0.9);
//! assert_eq!(options.lightness_when_light(), 0.1);
//! ```

use crate::Float;

#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default, rename_all = "camelCase")
)]
#[derive(Clone, Copy, Debug, PartialEq)]
struct ContrastData {
    target_ratio: Float,
    target_chroma: Float,
    minimum_chroma: Float,
    maximum_chroma: Float,
    darkness_threshold: Float,
    lightness_when_dark: Float,
    lightness_when_light: Float,
}

impl ContrastData {
    pub const fn new() -> Self {
        Self {
            target_ratio: 80.0,
            target_chroma: 0.05,
            minimum_chroma: 0.015,
            maximum_chroma: 0.15,
            darkness_threshold: 0.35,
            lightness_when_dark: 0.95,
            lightness_when_light: 0.1,
        }
    }

    pub const fn theme() -> Self {
        Self {
            target_ratio: 75.0,
            darkness_threshold: 0.3,
            lightness_when_light: 0.2,
            ..Self::new()
        }
    }
}

impl Default for ContrastData {
    fn default() -> Self {
        Self::new()
    }
}

/// A builder of contrast options.
#[derive(Debug)]
pub struct ContrastOptionBuilder(ContrastData);

impl ContrastOptionBuilder {
    /// Set the target APCA contrast, i.e., the minimum magnitude of the
    /// lightness contrast before chroma is reduced.
    pub fn target_ratio(&mut self, ratio: Float) -> &mut Self {
        self.0.target_ratio = ratio;
        self
    }

    /// Set the Oklch chroma tried first.
    pub fn target_chroma(&mut self, chroma: Float) -> &mut Self {
        self.0.target_chroma = chroma;
        self
    }

    /// Set the Oklch chroma tried second.
    pub fn minimum_chroma(&mut self, chroma: Float) -> &mut Self {
        self.0.minimum_chroma = chroma;
        self
    }

    /// Set the upper bound for both target and minimum chroma.
    pub fn maximum_chroma(&mut self, chroma: Float) -> &mut Self {
        self.0.maximum_chroma = chroma;
        self
    }

    /// Set the WCAG 2 relative luminance below which a background is dark.
    pub fn darkness_threshold(&mut self, threshold: Float) -> &mut Self {
        self.0.darkness_threshold = threshold;
        self
    }

    /// Set the Oklch lightness of text on dark backgrounds.
    pub fn lightness_when_dark(&mut self, lightness: Float) -> &mut Self {
        self.0.lightness_when_dark = lightness;
        self
    }

    /// Set the Oklch lightness of text on light backgrounds.
    pub fn lightness_when_light(&mut self, lightness: Float) -> &mut Self {
        self.0.lightness_when_light = lightness;
        self
    }

    /// Instantiate the options.
    pub fn build(&self) -> ContrastOptions {
        ContrastOptions(self.0)
    }
}

/// The options for generating a contrasting text color.
///
/// The defaults aim for APCA contrast 80 with subtly tinted text. The text
/// color has Oklch lightness 0.95 on dark and 0.1 on light backgrounds, with
/// the background being dark if its relative luminance is below 0.35.
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(transparent)
)]
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ContrastOptions(ContrastData);

impl Default for ContrastOptions {
    fn default() -> Self {
        Self(ContrastData::new())
    }
}

impl ContrastOptions {
    /// The options used by [`Theme`](crate::theme::Theme), which settle for
    /// APCA contrast 75, treat more backgrounds as light, and use a lighter
    /// text color on them.
    pub const THEME: ContrastOptions = ContrastOptions(ContrastData::theme());

    /// Create a new builder with the default option values.
    pub fn builder() -> ContrastOptionBuilder {
        ContrastOptionBuilder(ContrastData::new())
    }

    /// Create a new builder starting from these options.
    pub fn to_builder(&self) -> ContrastOptionBuilder {
        ContrastOptionBuilder(self.0)
    }

    /// Get the target APCA contrast.
    pub fn target_ratio(&self) -> Float {
        self.0.target_ratio
    }

    /// Get the chroma tried first.
    pub fn target_chroma(&self) -> Float {
        self.0.target_chroma
    }

    /// Get the chroma tried second.
    pub fn minimum_chroma(&self) -> Float {
        self.0.minimum_chroma
    }

    /// Get the upper bound for chroma.
    pub fn maximum_chroma(&self) -> Float {
        self.0.maximum_chroma
    }

    /// Get the luminance threshold for dark backgrounds.
    pub fn darkness_threshold(&self) -> Float {
        self.0.darkness_threshold
    }

    /// Get the text lightness on dark backgrounds.
    pub fn lightness_when_dark(&self) -> Float {
        self.0.lightness_when_dark
    }

    /// Get the text lightness on light backgrounds.
    pub fn lightness_when_light(&self) -> Float {
        self.0.lightness_when_light
    }
}

// ====================================================================================================================

#[cfg(test)]
mod test {
    use super::ContrastOptions;

    #[test]
    fn test_defaults() {
        let options = ContrastOptions::default();
        assert_eq!(options.target_ratio(), 80.0);
        assert_eq!(options.target_chroma(), 0.05);
        assert_eq!(options.minimum_chroma(), 0.015);
        assert_eq!(options.maximum_chroma(), 0.15);
        assert_eq!(options.darkness_threshold(), 0.35);
        assert_eq!(options.lightness_when_dark(), 0.95);
        assert_eq!(options.lightness_when_light(), 0.1);
        assert_eq!(ContrastOptions::builder().build(), options);
    }

    #[test]
    fn test_theme_preset() {
        let theme = ContrastOptions::THEME;
        assert_eq!(theme.target_ratio(), 75.0);
        assert_eq!(theme.darkness_threshold(), 0.3);
        assert_eq!(theme.lightness_when_light(), 0.2);
        assert_eq!(theme.lightness_when_dark(), 0.95);

        let tweaked = theme.to_builder().maximum_chroma(0.1).build();
        assert_eq!(tweaked.maximum_chroma(), 0.1);
        assert_eq!(tweaked.target_ratio(), 75.0);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_serde() -> Result<(), serde_json::Error> {
        let options: ContrastOptions =
            serde_json::from_str(r#"{"targetRatio": 60, "lightnessWhenDark": 0.9}"#)?;
        assert_eq!(options.target_ratio(), 60.0);
        assert_eq!(options.lightness_when_dark(), 0.9);
        assert_eq!(options.target_chroma(), 0.05);

        let json = serde_json::to_string(&ContrastOptions::THEME)?;
        assert_eq!(serde_json::from_str::<ContrastOptions>(&json)?, ContrastOptions::THEME);
        Ok(())
    }
}

//! Utility module with chromakit's errors.

use crate::Space;

/// An erroneous color format.
///
/// Parsing never fails because of out-of-range numbers, which are clamped by
/// the normalizing constructors. It only fails when the input does not match
/// the expected grammar.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ParseError {
    /// The input does not match the grammar for the given color space. For
    /// example, `lab(50 20)` is missing a coordinate and `rgb(1, 2, x)`
    /// contains something other than a number.
    Malformed { space: Space, input: String },

    /// The input does not match any of the formats recognized by
    /// [`Color::parse`](crate::Color::parse).
    Unparseable { input: String },
}

impl ParseError {
    /// Create a new error for input that is malformed for the color space.
    pub(crate) fn malformed(space: Space, input: impl Into<String>) -> Self {
        Self::Malformed {
            space,
            input: input.into(),
        }
    }

    /// Create a new error for input that is not recognized at all.
    pub(crate) fn unparseable(input: impl Into<String>) -> Self {
        Self::Unparseable {
            input: input.into(),
        }
    }

    /// Get the offending input.
    pub fn input(&self) -> &str {
        match *self {
            Self::Malformed { ref input, .. } | Self::Unparseable { ref input } => input,
        }
    }

    /// Get the color space whose grammar was attempted, if any.
    pub fn space(&self) -> Option<Space> {
        match *self {
            Self::Malformed { space, .. } => Some(space),
            Self::Unparseable { .. } => None,
        }
    }
}

impl std::fmt::Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match *self {
            Self::Malformed { space, ref input } => f.write_fmt(format_args!(
                "\"{}\" should be a valid {} color but is malformed",
                input, space
            )),
            Self::Unparseable { ref input } => f.write_fmt(format_args!(
                "\"{}\" should be a hex, rgb(), hsl(), lab(), lch(), oklab(), oklch(), \
                 device-cmyk(), or color() color but is none of those",
                input
            )),
        }
    }
}

impl std::error::Error for ParseError {}

#[cfg(test)]
mod test {
    use super::ParseError;
    use crate::Space;

    #[test]
    fn test_parse_error() {
        let error = ParseError::malformed(Space::Lab, "lab(1 2)");
        assert_eq!(error.input(), "lab(1 2)");
        assert_eq!(error.space(), Some(Space::Lab));
        assert_eq!(
            error.to_string(),
            "\"lab(1 2)\" should be a valid CIELAB color but is malformed"
        );

        let error = ParseError::unparseable("nope");
        assert_eq!(error.input(), "nope");
        assert_eq!(error.space(), None);
        assert!(error.to_string().starts_with("\"nope\" should be"));
    }
}

//! Typed channel records for the ten supported color spaces.
//!
//! Each record is a plain `Copy` value with public channels and an optional
//! alpha. The `new` constructors normalize, i.e., they clamp linear channels,
//! wrap hues into `0..360`, and replace not-a-number with zero. Records built
//! with struct expressions may be denormalized; [`normalize`](Rgb::normalize)
//! fixes that and `is_normalized` checks it.
//!
//! Conversions between records are associated functions named after their
//! source, e.g., [`Lch::from_lab`] or [`Srgb::from_xyz`]. They follow a fixed
//! graph: CIELCh and CIELAB, CIELAB and XYZ, XYZ and sRGB, sRGB and Oklab,
//! Oklab and Oklch, as well as sRGB and RGB, HSL, HSV, and CMYK. Every
//! conversion normalizes its result and carries alpha over unchanged.
//!
//! All records implement `Display` and `FromStr` with their CSS forms.

/// Implement the methods and traits shared by all channel records.
macro_rules! impl_channels {
    ($type:ident, $space:expr) => {
        impl $type {
            /// Get this record's color space.
            pub const fn space(&self) -> $crate::Space {
                $space
            }

            /// Determine whether the channels are normalized.
            pub fn is_normalized(&self) -> bool {
                *self == self.normalize()
            }

            /// Format this record as CSS.
            pub fn to_css(&self) -> String {
                self.to_string()
            }
        }

        impl std::str::FromStr for $type {
            type Err = $crate::error::ParseError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::from_css(s)
            }
        }

        impl TryFrom<&str> for $type {
            type Error = $crate::error::ParseError;

            fn try_from(value: &str) -> Result<Self, Self::Error> {
                Self::from_css(value)
            }
        }
    };
}

mod lab;
mod ok;
mod rgb;

pub use lab::{Lab, Lch, Xyz};
pub use ok::{Oklab, Oklch};
pub use rgb::{Cmyk, Hsl, Hsv, Rgb, Srgb};

//! # Chromakit
//!
//! Chromakit represents colors, converts them between ten color spaces,
//! reads and writes them as CSS, hexadecimal strings, and packed integers,
//! and derives accessible text colors as well as complete UI themes.
//!
//!
//! ## 1. Overview
//!
//! Chromakit's main abstractions are:
//!
//!   * [`Color`] implements **immutable colors** that store their CIELCh
//!     coordinates and derive all other representations on demand. Derived
//!     representations are cached, so accessors are cheap after the first
//!     call. Its methods also cover interpolation, inversion, complementary
//!     colors, WCAG 2 and APCA contrast, and gamut mapping.
//!   * The [`channels`] module offers **typed channel records** for RGB,
//!     sRGB, HSL, HSV, CMYK, CIELAB, CIELCh, Oklab, Oklch, and XYZ. Each
//!     record normalizes its channels and reads and writes its CSS form.
//!   * [`Channels`] and [`ColorValue`] are the **untyped inputs** accepted by
//!     [`Color::parse`]. They cover maps from channel names to numbers, CSS
//!     and hexadecimal strings, as well as packed integers.
//!   * The [`theme`] module generates **UI themes** from seed colors, with
//!     colors for every role and interaction state. The [`palette`] module
//!     generates **tonal palettes** from a single color.
//!
//!
//! ## 2. Parsing and Formatting
//!
//! [`Color::parse`] accepts every supported input. Strings are tried as
//! hexadecimal colors and then as the CSS forms of all color spaces.
//!
//! ```
//! # use chromakit::{Channels, Color, Space};
//! # use chromakit::error::ParseError;
//! let teal = Color::parse("#3a8f9a")?;
//! assert_eq!(teal, Color::parse("rgb(58, 143, 154)")?);
//! assert_eq!(teal, Color::parse(0x3a8f9a_u32)?.with_alpha(None));
//!
//! let red = Channels::from([("r", 255.0), ("g", 0.0), ("b", 0.0)]);
//! assert_eq!(Color::parse(&red)?.css(Space::Rgb), "rgb(255, 0, 0)");
//! # Ok::<(), ParseError>(())
//! ```
//!
//! Packed integers and hexadecimal strings name their byte order with a
//! format such as `"rgb"` or `"argb"`. [`DEFAULT_DECODING`] and
//! [`DEFAULT_ENCODING`] are the defaults.
//!
//!
//! ## 3. Accessible Text
//!
//! [`Color::contrast`] derives a text color for a background, aiming for a
//! target APCA contrast while tinting the text with the background's hue.
//!
//! ```
//! # use chromakit::Color;
//! # use chromakit::error::ParseError;
//! # use chromakit::opt::ContrastOptions;
//! let background = Color::parse("#1e293b")?;
//! let text = background.contrast(&ContrastOptions::default());
//! assert!(text.lch().l > background.lch().l);
//! # Ok::<(), ParseError>(())
//! ```
//!
//!
//! ## 4. Feature Flags
//!
//!   * `f64` (default) selects `f64` as [`Float`]; without it, chromakit
//!     uses `f32`.
//!   * `serde` enables serialization of channel records, options, themes,
//!     palettes, and colors. Colors serialize as their CSS `lch()` form.

/// The floating point type in use.
#[cfg(feature = "f64")]
pub type Float = f64;
/// The floating point type in use.
#[cfg(not(feature = "f64"))]
pub type Float = f32;

/// [`Float`]'s bits.
#[cfg(feature = "f64")]
pub type Bits = u64;
/// [`Float`]'s bits.
#[cfg(not(feature = "f64"))]
pub type Bits = u32;

mod core;
pub mod channels;
pub mod error;
mod object;
pub mod opt;
pub mod palette;
pub mod theme;
mod value;

#[doc(hidden)]
pub use core::to_eq_bits;

pub use core::{Space, DEFAULT_DECODING, DEFAULT_ENCODING};
pub use object::Color;
pub use value::{Channels, ColorValue};

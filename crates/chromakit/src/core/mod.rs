mod contrast;
pub(crate) mod conversion;
mod equality;
mod gamut;
mod hex;
mod space;
mod string;

// contrast
pub(crate) use contrast::{to_apca_contrast, to_apca_luminance, to_contrast_ratio, to_luminance};

// equality
#[cfg(test)]
pub(crate) use equality::assert_within;
pub use equality::to_eq_bits;
pub(crate) use equality::{
    clamp_channel, normalize_alpha, normalize_hue, snap_unit, to_eq_alpha,
};

// gamut
pub(crate) use gamut::{fit_to_srgb, in_srgb_gamut, GAMUT_EPSILON, LCH, OKLCH};

// hex
pub use hex::{DEFAULT_DECODING, DEFAULT_ENCODING};
pub(crate) use hex::{ansi_background, ansi_text, from_binary, parse_hex, to_binary, to_hex};

// space
pub use space::Space;

// string
pub(crate) use string::{
    format, parse_cmyk, parse_hsl, parse_hsv, parse_lab, parse_lch, parse_oklab, parse_oklch,
    parse_rgb, parse_srgb, parse_xyz, to_linear, Syntax,
};

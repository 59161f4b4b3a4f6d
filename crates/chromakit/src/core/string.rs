use super::conversion::{d50_to_d65, linear_to_srgb, srgb_to_linear};
use crate::error::ParseError;
use crate::{Float, Space};

// --------------------------------------------------------------------------------------------------------------------
// Tokens

/// Parse a plain number. Unlike Rust's float parser, this function rejects
/// `inf`, `nan`, and other named quantities.
fn parse_number(s: &str) -> Option<Float> {
    if s.is_empty()
        || !s
            .bytes()
            .all(|b| b.is_ascii_digit() || matches!(b, b'.' | b'+' | b'-' | b'e'))
    {
        return None;
    }

    s.parse().ok()
}

/// The CSS keyword for a missing component, which counts as zero.
const NONE: &str = "none";

/// Parse a number or a percentage. A percentage is scaled so that `100%`
/// corresponds to the given reference value.
fn parse_scaled(s: &str, reference: Float) -> Option<Float> {
    if s == NONE {
        return Some(0.0);
    }

    match s.strip_suffix('%') {
        Some(percentage) => parse_number(percentage).map(|n| n / 100.0 * reference),
        None => parse_number(s),
    }
}

/// Parse a percentage. When `strict` is false, a bare number is treated as a
/// percentage, too.
fn parse_percentage(s: &str, strict: bool) -> Option<Float> {
    if s == NONE {
        return Some(0.0);
    }

    match s.strip_suffix('%') {
        Some(percentage) => parse_number(percentage).map(|n| n / 100.0),
        None if !strict => parse_number(s).map(|n| n / 100.0),
        None => None,
    }
}

/// Parse an alpha value, which is either a fraction or a percentage.
fn parse_alpha(s: &str) -> Option<Float> {
    parse_scaled(s, 1.0)
}

/// Parse a hue in degrees, gradians, radians, or turns, returning degrees.
fn parse_hue(s: &str) -> Option<Float> {
    if s == NONE {
        Some(0.0)
    } else if let Some(n) = s.strip_suffix("deg") {
        parse_number(n)
    } else if let Some(n) = s.strip_suffix("grad") {
        parse_number(n).map(|n| n * 0.9)
    } else if let Some(n) = s.strip_suffix("rad") {
        parse_number(n).map(Float::to_degrees)
    } else if let Some(n) = s.strip_suffix("turn") {
        parse_number(n).map(|n| n * 360.0)
    } else {
        parse_number(s)
    }
}

// --------------------------------------------------------------------------------------------------------------------
// Functions

/// Strip the function name and parentheses. The names are tried in order,
/// so longer names with a shorter prefix must come first.
fn function_body<'a>(s: &'a str, names: &[&str]) -> Option<&'a str> {
    names
        .iter()
        .find_map(|name| s.strip_prefix(name))?
        .trim_start()
        .strip_prefix('(')?
        .strip_suffix(')')
}

/// Split the body of a CSS function into exactly `count` channel arguments
/// and an optional alpha argument.
///
/// The modern syntax separates channels with white space and alpha with a
/// slash. The legacy syntax separates all arguments with commas and is only
/// recognized when `legacy` is true.
fn split_arguments(body: &str, count: usize, legacy: bool) -> Option<(Vec<&str>, Option<&str>)> {
    if body.contains(',') {
        if !legacy {
            return None;
        }

        let mut values: Vec<&str> = body.split(',').map(str::trim).collect();
        if values.iter().any(|v| v.is_empty() || v.contains(char::is_whitespace)) {
            return None;
        }

        let alpha = if values.len() == count + 1 {
            values.pop()
        } else {
            None
        };

        return (values.len() == count).then_some((values, alpha));
    }

    let mut parts = body.splitn(2, '/');
    let values: Vec<&str> = parts.next()?.split_whitespace().collect();
    if values.len() != count {
        return None;
    }

    let alpha = match parts.next() {
        Some(rest) => {
            let mut tokens = rest.split_whitespace();
            let alpha = tokens.next()?;
            if tokens.next().is_some() {
                return None;
            }
            Some(alpha)
        }
        None => None,
    };

    Some((values, alpha))
}

/// Parse the alpha argument, if any.
fn alpha_argument(alpha: Option<&str>) -> Option<Option<Float>> {
    match alpha {
        Some(a) => parse_alpha(a).map(Some),
        None => Some(None),
    }
}

/// Parse three channels with the given per-channel parsers.
fn parse_three(
    s: &str,
    names: &[&str],
    legacy: bool,
    parsers: [&dyn Fn(&str) -> Option<Float>; 3],
) -> Option<([Float; 3], Option<Float>)> {
    let body = function_body(s, names)?;
    let (values, alpha) = split_arguments(body, 3, legacy)?;

    let c1 = parsers[0](values[0])?;
    let c2 = parsers[1](values[1])?;
    let c3 = parsers[2](values[2])?;
    Some(([c1, c2, c3], alpha_argument(alpha)?))
}

/// Normalize the input before parsing. Like the rest of CSS, color functions
/// are case-insensitive.
#[inline]
fn prepare(s: &str) -> String {
    s.trim().to_ascii_lowercase()
}

// --------------------------------------------------------------------------------------------------------------------

/// The result of parsing a color with three channels.
pub(crate) type Parsed3 = Result<([Float; 3], Option<Float>), ParseError>;

/// Parse `rgb()` or `rgba()` in legacy or modern syntax. Channels are numbers
/// `0..=255` or percentages.
pub(crate) fn parse_rgb(s: &str) -> Parsed3 {
    let channel = |t: &str| parse_scaled(t, 255.0);
    parse_three(&prepare(s), &["rgba", "rgb"], true, [&channel, &channel, &channel])
        .ok_or_else(|| ParseError::malformed(Space::Rgb, s))
}

/// Parse `hsl()` or `hsla()` in legacy or modern syntax. Hue may carry a
/// `deg`, `grad`, `rad`, or `turn` unit. Saturation and lightness are
/// percentages, with the `%` sign being optional in modern syntax only.
pub(crate) fn parse_hsl(s: &str) -> Parsed3 {
    let input = prepare(s);
    let strict = input.contains(',');
    let percentage = |t: &str| parse_percentage(t, strict);
    parse_three(&input, &["hsla", "hsl"], true, [&parse_hue, &percentage, &percentage])
        .ok_or_else(|| ParseError::malformed(Space::Hsl, s))
}

/// Parse `lab()`. Lightness may be a percentage of 100 and a/b may be
/// percentages of 125.
pub(crate) fn parse_lab(s: &str) -> Parsed3 {
    let lightness = |t: &str| parse_scaled(t, 100.0);
    let axis = |t: &str| parse_scaled(t, 125.0);
    parse_three(&prepare(s), &["lab"], false, [&lightness, &axis, &axis])
        .ok_or_else(|| ParseError::malformed(Space::Lab, s))
}

/// Parse `lch()`. Lightness may be a percentage of 100 and chroma may be a
/// percentage of 150.
pub(crate) fn parse_lch(s: &str) -> Parsed3 {
    let lightness = |t: &str| parse_scaled(t, 100.0);
    let chroma = |t: &str| parse_scaled(t, 150.0);
    parse_three(&prepare(s), &["lch"], false, [&lightness, &chroma, &parse_hue])
        .ok_or_else(|| ParseError::malformed(Space::Lch, s))
}

/// Parse `oklab()`. Lightness may be a percentage of 1 and a/b may be
/// percentages of 0.4.
pub(crate) fn parse_oklab(s: &str) -> Parsed3 {
    let lightness = |t: &str| parse_scaled(t, 1.0);
    let axis = |t: &str| parse_scaled(t, 0.4);
    parse_three(&prepare(s), &["oklab"], false, [&lightness, &axis, &axis])
        .ok_or_else(|| ParseError::malformed(Space::Oklab, s))
}

/// Parse `oklch()`. Lightness may be a percentage of 1 and chroma may be a
/// percentage of 0.4.
pub(crate) fn parse_oklch(s: &str) -> Parsed3 {
    let lightness = |t: &str| parse_scaled(t, 1.0);
    let chroma = |t: &str| parse_scaled(t, 0.4);
    parse_three(&prepare(s), &["oklch"], false, [&lightness, &chroma, &parse_hue])
        .ok_or_else(|| ParseError::malformed(Space::Oklch, s))
}

/// Parse `device-cmyk()`. Channels are fractions or percentages.
pub(crate) fn parse_cmyk(s: &str) -> Result<([Float; 4], Option<Float>), ParseError> {
    fn parse(s: &str) -> Option<([Float; 4], Option<Float>)> {
        let body = function_body(s, &["device-cmyk"])?;
        let (values, alpha) = split_arguments(body, 4, true)?;

        let mut channels = [0.0; 4];
        for (channel, value) in channels.iter_mut().zip(values) {
            *channel = parse_scaled(value, 1.0)?;
        }

        Some((channels, alpha_argument(alpha)?))
    }

    parse(&prepare(s)).ok_or_else(|| ParseError::malformed(Space::Cmyk, s))
}

/// Split `color()` into the color space identifier and the remaining
/// arguments.
fn color_function(s: &str) -> Option<(&str, &str)> {
    let body = function_body(s, &["color"])?.trim_start();
    let end = body.find(char::is_whitespace)?;
    Some((&body[..end], &body[end..]))
}

/// Parse `color(srgb …)` or `color(srgb-linear …)`. Linear coordinates are
/// gamma-corrected.
pub(crate) fn parse_srgb(s: &str) -> Parsed3 {
    fn parse(s: &str) -> Option<([Float; 3], Option<Float>)> {
        let (space, body) = color_function(s)?;
        let linear = match space {
            "srgb" => false,
            "srgb-linear" => true,
            _ => return None,
        };

        let (values, alpha) = split_arguments(body, 3, false)?;
        let mut channels = [0.0; 3];
        for (channel, value) in channels.iter_mut().zip(values) {
            let n = parse_scaled(value, 1.0)?;
            *channel = if linear { linear_to_srgb(n) } else { n };
        }

        Some((channels, alpha_argument(alpha)?))
    }

    parse(&prepare(s)).ok_or_else(|| ParseError::malformed(Space::Srgb, s))
}

/// Parse `color(xyz …)`, `color(xyz-d65 …)`, or `color(xyz-d50 …)`. D50
/// coordinates are adapted to D65.
pub(crate) fn parse_xyz(s: &str) -> Parsed3 {
    fn parse(s: &str) -> Option<([Float; 3], Option<Float>)> {
        let (space, body) = color_function(s)?;
        let d50 = match space {
            "xyz" | "xyz-d65" => false,
            "xyz-d50" => true,
            _ => return None,
        };

        let (values, alpha) = split_arguments(body, 3, false)?;
        let mut channels = [0.0; 3];
        for (channel, value) in channels.iter_mut().zip(values) {
            *channel = parse_scaled(value, 1.0)?;
        }

        if d50 {
            channels = d50_to_d65(&channels);
        }

        Some((channels, alpha_argument(alpha)?))
    }

    parse(&prepare(s)).ok_or_else(|| ParseError::malformed(Space::Xyz, s))
}

/// Parse `color(--hsv …)`. Like in `hsl()`, hue may carry a unit and
/// saturation and value are percentages with optional `%` sign.
pub(crate) fn parse_hsv(s: &str) -> Parsed3 {
    fn parse(s: &str) -> Option<([Float; 3], Option<Float>)> {
        let (space, body) = color_function(s)?;
        if space != "--hsv" {
            return None;
        }

        let (values, alpha) = split_arguments(body, 3, false)?;
        let h = parse_hue(values[0])?;
        let s = parse_percentage(values[1], false)?;
        let v = parse_percentage(values[2], false)?;
        Some(([h, s, v], alpha_argument(alpha)?))
    }

    parse(&prepare(s)).ok_or_else(|| ParseError::malformed(Space::Hsv, s))
}

/// Linearize sRGB coordinates for `color(srgb-linear …)` output.
pub(crate) fn to_linear(channels: &[Float; 3]) -> [Float; 3] {
    [
        srgb_to_linear(channels[0]),
        srgb_to_linear(channels[1]),
        srgb_to_linear(channels[2]),
    ]
}

// --------------------------------------------------------------------------------------------------------------------
// Formatting

/// The syntax for formatting CSS color functions.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) enum Syntax {
    /// Comma-separated arguments, with alpha as fourth argument.
    Legacy,
    /// Space-separated arguments, with alpha following a slash.
    Modern,
}

/// A channel to format: its value, the default number of digits past the
/// decimal, and a unit suffix.
pub(crate) type Channel<'a> = (Float, usize, &'a str);

/// The default number of digits past the decimal for alpha.
const ALPHA_PRECISION: usize = 3;

/// The maximum number of digits past the decimal.
#[cfg(feature = "f64")]
const MAX_PRECISION: usize = 15;
#[cfg(not(feature = "f64"))]
const MAX_PRECISION: usize = 7;

/// Write a number, rounded to the given number of digits past the decimal.
fn write_number(f: &mut std::fmt::Formatter<'_>, value: Float, precision: usize) -> std::fmt::Result {
    // CSS mandates NO trailing zeros whatsoever. But formatting floats with a
    // precision produces trailing zeros. Rounding avoids them, for the most
    // part. If fractional part is zero, we do need an explicit precision---of
    // zero!
    let factor = (10.0 as Float).powi(precision.min(MAX_PRECISION) as i32);
    let mut n = (value * factor).round() / factor;
    if n == 0.0 {
        n = 0.0; // No negative zero
    }

    if n == n.trunc() {
        f.write_fmt(format_args!("{:.0}", n))
    } else {
        f.write_fmt(format_args!("{}", n))
    }
}

/// Format a CSS color function.
///
/// The prefix includes the opening parenthesis and, for `color()`, the color
/// space identifier. If the formatter has a precision, it overrides the
/// per-channel defaults.
pub(crate) fn format(
    f: &mut std::fmt::Formatter<'_>,
    prefix: &str,
    syntax: Syntax,
    channels: &[Channel<'_>],
    alpha: Option<Float>,
) -> std::fmt::Result {
    let precision = f.precision();
    let separator = match syntax {
        Syntax::Legacy => ", ",
        Syntax::Modern => " ",
    };

    f.write_str(prefix)?;
    for (index, &(value, digits, unit)) in channels.iter().enumerate() {
        if 0 < index {
            f.write_str(separator)?;
        }
        write_number(f, value, precision.unwrap_or(digits))?;
        f.write_str(unit)?;
    }

    if let Some(alpha) = alpha {
        f.write_str(match syntax {
            Syntax::Legacy => ", ",
            Syntax::Modern => " / ",
        })?;
        write_number(f, alpha, precision.unwrap_or(ALPHA_PRECISION))?;
    }

    f.write_str(")")
}

// ====================================================================================================================

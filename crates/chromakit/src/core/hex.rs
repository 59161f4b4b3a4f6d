use crate::error::ParseError;
use crate::Space;

/// The default byte order for encoding colors as integers or hex strings.
pub const DEFAULT_ENCODING: &str = "rgba";

/// The default byte order for decoding colors from integers.
pub const DEFAULT_DECODING: &str = "argb";

/// Parse a color in hexadecimal format.
///
/// This function accepts 3, 4, 6, or 8 hexadecimal digits with an optional
/// leading `#`. Single digits are replicated, so `#abc` is the same as
/// `#aabbcc`. If successful, this function returns the red, green, and blue
/// bytes as well as the alpha byte for the 4 and 8 digit forms.
pub(crate) fn parse_hex(s: &str) -> Result<([u8; 3], Option<u8>), ParseError> {
    let error = || ParseError::malformed(Space::Rgb, s);

    let digits = s.trim();
    let digits = digits.strip_prefix('#').unwrap_or(digits);
    if !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
        return Err(error());
    }

    let width = match digits.len() {
        3 | 4 => 1,
        6 | 8 => 2,
        _ => return Err(error()),
    };

    let mut bytes = [0_u8; 4];
    let count = digits.len() / width;
    for (index, byte) in bytes.iter_mut().take(count).enumerate() {
        let t = digits
            .get(index * width..(index + 1) * width)
            .ok_or_else(error)?;
        let n = u8::from_str_radix(t, 16).map_err(|_| error())?;
        *byte = if width == 1 { 16 * n + n } else { n };
    }

    let alpha = (count == 4).then_some(bytes[3]);
    Ok(([bytes[0], bytes[1], bytes[2]], alpha))
}

/// Determine the byte for the channel named by the format character.
#[inline]
fn channel_byte(name: char, rgb: &[u8; 3], alpha: u8) -> Option<u8> {
    match name {
        'r' => Some(rgb[0]),
        'g' => Some(rgb[1]),
        'b' => Some(rgb[2]),
        'a' => Some(alpha),
        _ => None,
    }
}

/// Normalize the byte order format. Letters are case-insensitive, characters
/// other than `r`, `g`, `b`, and `a` are ignored, and at most four channels
/// are considered.
fn channel_names(format: &str) -> impl Iterator<Item = char> + '_ {
    format
        .chars()
        .map(|c| c.to_ascii_lowercase())
        .filter(|c| matches!(c, 'r' | 'g' | 'b' | 'a'))
        .take(4)
}

/// Pack the given bytes into an integer with the given byte order.
///
/// The first channel in the format occupies the most significant byte, so
/// `rgb` produces `0xRRGGBB` and `argb` produces `0xAARRGGBB`. A missing
/// alpha encodes as `0xff`.
pub(crate) fn to_binary(rgb: &[u8; 3], alpha: Option<u8>, format: &str) -> u32 {
    let alpha = alpha.unwrap_or(0xff);
    channel_names(format)
        .filter_map(|name| channel_byte(name, rgb, alpha))
        .fold(0_u32, |acc, byte| (acc << 8) | byte as u32)
}

/// Unpack the integer with the given byte order into bytes.
///
/// The number of channels in the format determines the number of bytes
/// consumed, starting with the least significant byte for the last channel.
/// If the format has no alpha channel, this function returns no alpha byte.
/// Channels missing from the format are zero.
pub(crate) fn from_binary(value: u32, format: &str) -> ([u8; 3], Option<u8>) {
    let names: Vec<char> = channel_names(format).collect();

    let mut rgb = [0_u8; 3];
    let mut alpha = None;
    for (index, name) in names.iter().rev().enumerate() {
        let byte = ((value >> (8 * index)) & 0xff) as u8;
        match *name {
            'r' => rgb[0] = byte,
            'g' => rgb[1] = byte,
            'b' => rgb[2] = byte,
            _ => alpha = Some(byte),
        }
    }

    (rgb, alpha)
}

/// Format the given bytes as a hexadecimal string with leading `#` and the
/// given byte order.
pub(crate) fn to_hex(rgb: &[u8; 3], alpha: Option<u8>, format: &str) -> String {
    let alpha = alpha.unwrap_or(0xff);
    let mut hex = String::with_capacity(9);
    hex.push('#');
    for name in channel_names(format) {
        if let Some(byte) = channel_byte(name, rgb, alpha) {
            hex.push_str(&format!("{:02x}", byte));
        }
    }
    hex
}

// --------------------------------------------------------------------------------------------------------------------

/// Wrap the content in ANSI escape sequences for a 24-bit foreground color.
pub(crate) fn ansi_text(rgb: &[u8; 3], content: &str) -> String {
    format!(
        "\x1b[38;2;{};{};{}m{}\x1b[0m",
        rgb[0], rgb[1], rgb[2], content
    )
}

/// Wrap the content in ANSI escape sequences for a 24-bit background color.
pub(crate) fn ansi_background(rgb: &[u8; 3], content: &str) -> String {
    format!(
        "\x1b[48;2;{};{};{}m{}\x1b[0m",
        rgb[0], rgb[1], rgb[2], content
    )
}

// ====================================================================================================================

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_parse_hex() -> Result<(), ParseError> {
        assert_eq!(parse_hex("#123")?, ([0x11, 0x22, 0x33], None));
        assert_eq!(parse_hex("1234")?, ([0x11, 0x22, 0x33], Some(0x44)));
        assert_eq!(parse_hex("#FF0000")?, ([0xff, 0, 0], None));
        assert_eq!(parse_hex("#ff000080")?, ([0xff, 0, 0], Some(0x80)));
        assert_eq!(parse_hex(" abcdef ")?, ([0xab, 0xcd, 0xef], None));

        for bad in ["#12", "#12345", "#1234567", "#0g0", "#💩0", ""] {
            assert_eq!(parse_hex(bad), Err(ParseError::malformed(Space::Rgb, bad)));
        }
        Ok(())
    }

    #[test]
    fn test_binary() {
        let red = [0xff, 0, 0];
        assert_eq!(to_binary(&red, None, "rgb"), 0xff0000);
        assert_eq!(to_binary(&red, None, "bgr"), 0x0000ff);
        assert_eq!(to_binary(&red, None, "argb"), 0xffff0000);
        assert_eq!(to_binary(&red, Some(0x80), "rgba"), 0xff000080);
        assert_eq!(to_binary(&red, Some(0x80), "ARGB"), 0x80ff0000);
        assert_eq!(to_binary(&[0x11, 0x22, 0x33], None, "r-g-b"), 0x112233);

        assert_eq!(from_binary(0xff0000, "rgb"), (red, None));
        assert_eq!(from_binary(0x80ff0000, "argb"), (red, Some(0x80)));
        assert_eq!(from_binary(0xff000080, "rgba"), (red, Some(0x80)));
        assert_eq!(from_binary(0x332211, "bgr"), ([0x11, 0x22, 0x33], None));
        assert_eq!(from_binary(0x1234, "gb"), ([0, 0x12, 0x34], None));
    }

    #[test]
    fn test_hex() {
        let rgb = [0x11, 0x22, 0x33];
        assert_eq!(to_hex(&rgb, None, "rgb"), "#112233");
        assert_eq!(to_hex(&rgb, None, "bgr"), "#332211");
        assert_eq!(to_hex(&rgb, Some(0x80), "rgba"), "#11223380");
        assert_eq!(to_hex(&rgb, Some(0x80), "argb"), "#80112233");
        assert_eq!(to_hex(&rgb, None, "argb"), "#ff112233");
    }

    #[test]
    fn test_ansi() {
        assert_eq!(
            ansi_text(&[255, 0, 0], "Error"),
            "\x1b[38;2;255;0;0mError\x1b[0m"
        );
        assert_eq!(
            ansi_background(&[0, 0, 255], "Alert"),
            "\x1b[48;2;0;0;255mAlert\x1b[0m"
        );
    }
}

use super::conversion::srgb_to_linear;
use crate::Float;

/// The coefficients for computing luminance from linear sRGB coordinates.
const SRGB_CONTRAST: &[Float; 3] = &[0.2126729, 0.7151522, 0.0721750];

/// Compute the WCAG 2 relative luminance for the given sRGB coordinates.
pub(crate) fn to_luminance(coordinates: &[Float; 3]) -> Float {
    let [c1, c2, c3] = *SRGB_CONTRAST;
    let [r, g, b] = *coordinates;

    srgb_to_linear(r).mul_add(c1, srgb_to_linear(g).mul_add(c2, srgb_to_linear(b) * c3))
}

/// Compute the WCAG 2 contrast ratio between two relative luminance values.
/// The ratio is symmetric and ranges from 1 to 21.
pub(crate) fn to_contrast_ratio(luminance1: Float, luminance2: Float) -> Float {
    let lighter = luminance1.max(luminance2);
    let darker = luminance1.min(luminance2);
    (lighter + 0.05) / (darker + 0.05)
}

const BLACK_THRESHOLD: Float = 0.022;
const BLACK_EXPONENT: Float = 1.414;
const SCALE: Float = 1.14;
const OFFSET: Float = 0.027;
const OUTPUT_CLAMP: Float = 0.1;

/// Compute the APCA luminance for the given relative luminance.
///
/// Very dark values are soft-clamped, and the result is perceptually weighted
/// with an exponent that depends on whether the color is used for text and on
/// the polarity. Reverse polarity, i.e., light text on dark background, uses
/// exponents 0.62 for text and 0.65 for background. Normal polarity uses 0.57
/// and 0.56, respectively.
pub(crate) fn to_apca_luminance(luminance: Float, is_text: bool, is_dark: bool) -> Float {
    // Soft clip black
    let luminance = if luminance < BLACK_THRESHOLD {
        (BLACK_THRESHOLD - luminance).powf(BLACK_EXPONENT) + luminance
    } else {
        luminance
    };

    let exponent = match (is_dark, is_text) {
        (true, true) => 0.62,
        (true, false) => 0.65,
        (false, true) => 0.57,
        (false, false) => 0.56,
    };

    luminance.powf(exponent)
}

/// Compute the APCA lightness contrast between text and background.
///
/// The arguments are *not* interchangeable. The first argument must be the
/// APCA luminance for the foreground, i.e., text, and the second argument must
/// be the APCA luminance for the background. The result is positive for dark
/// text on light background and negative for light text on dark background.
/// Magnitudes below 10 are reported as zero.
pub(crate) fn to_apca_contrast(text_luminance: Float, background_luminance: Float) -> Float {
    let contrast = (background_luminance - text_luminance) * SCALE;

    if contrast.abs() < OUTPUT_CLAMP {
        0.0
    } else if contrast > 0.0 {
        (contrast - OFFSET) * 100.0
    } else {
        (contrast + OFFSET) * 100.0
    }
}

#[cfg(test)]
mod test {
    use super::{to_apca_contrast, to_apca_luminance, to_contrast_ratio, to_luminance};
    use crate::assert_close_enough;
    use crate::core::assert_within;

    #[test]
    fn test_luminance() {
        assert_eq!(to_luminance(&[0.0, 0.0, 0.0]), 0.0);
        assert_within!(to_luminance(&[1.0, 1.0, 1.0]), 1.0, 1e-6);
        assert_close_enough!(to_luminance(&[1.0, 0.0, 0.0]), 0.2126729);
    }

    #[test]
    fn test_contrast_ratio() {
        assert_within!(to_contrast_ratio(0.0, 1.0), 21.0, 1e-9);
        assert_eq!(to_contrast_ratio(0.3, 0.7), to_contrast_ratio(0.7, 0.3));
        assert_eq!(to_contrast_ratio(0.5, 0.5), 1.0);
    }

    #[test]
    fn test_apca() {
        // Black text on white background
        let text = to_apca_luminance(0.0, true, false);
        let background = to_apca_luminance(1.0, false, false);
        assert_within!(to_apca_contrast(text, background), 106.04, 0.01);

        // White text on black background
        let text = to_apca_luminance(1.0, true, true);
        let background = to_apca_luminance(0.0, false, true);
        assert_within!(to_apca_contrast(text, background), -107.88, 0.01);

        // Identical colors have no contrast
        let text = to_apca_luminance(0.4, true, false);
        let background = to_apca_luminance(0.4, false, false);
        assert_eq!(to_apca_contrast(text, background), 0.0);
    }
}

use crate::{Bits, Float};

/// The factor for reducing floating point resolution before equality testing.
#[cfg(feature = "f64")]
const ROUNDING_FACTOR: Float = 1e12;
#[cfg(not(feature = "f64"))]
const ROUNDING_FACTOR: Float = 1e4;

/// Test macro for asserting the equality of floating point numbers.
///
/// This macro relies on [`to_eq_bits`] to normalize the two floating point
/// numbers by zeroing out not-a-numbers, reducing resolution, and dropping the
/// sign of negative zeros and then compares the resulting bit strings.
///
/// # Panics
///
/// This macro panics if the normalized bit strings are not identical. Its
/// message places the numbers below each other at the beginning of subsequent
/// lines for easy comparability.
#[macro_export]
macro_rules! assert_close_enough {
    ($f1:expr, $f2:expr $(,)?) => {
        let (f1, f2) = ($f1, $f2);
        let bits1 = $crate::to_eq_bits(f1);
        let bits2 = $crate::to_eq_bits(f2);
        assert_eq!(bits1, bits2, "quantities differ:\n{:?}\n{:?}", f1, f2);
    };
}

/// Test macro for asserting that a floating point number is within the given
/// absolute tolerance of the expected value.
///
/// # Panics
///
/// This macro panics if the two numbers differ by more than the tolerance.
#[cfg(test)]
macro_rules! assert_within {
    ($actual:expr, $expected:expr, $tolerance:expr $(,)?) => {
        let (actual, expected, tolerance) = ($actual, $expected, $tolerance);
        assert!(
            (actual - expected).abs() <= tolerance,
            "quantities differ by more than {:?}:\n{:?}\n{:?}",
            tolerance,
            actual,
            expected
        );
    };
}

#[cfg(test)]
pub(crate) use assert_within;

// --------------------------------------------------------------------------------------------------------------------

/// Helper function to normalize a floating point number before hashing or
/// equality testing.
///
/// This function zeros out not-a-number, reduces significant digits after the
/// decimal, and drops the sign of negative zero and returns the result as a bit
/// string. It is only public because the [`assert_close_enough`] test macro
/// uses it.
#[doc(hidden)]
#[inline]
pub fn to_eq_bits(f: Float) -> Bits {
    // Eliminate not-a-number.
    let mut f = if f.is_nan() { 0.0 } else { f };

    // Reduce precision.
    f = (ROUNDING_FACTOR * f).round();

    // Too much negativity!
    if f == -0.0 {
        f = 0.0
    }

    f.to_bits()
}

// --------------------------------------------------------------------------------------------------------------------

/// Clamp a linear channel, replacing not-a-number with zero first.
#[inline]
pub(crate) fn clamp_channel(value: Float, min: Float, max: Float) -> Float {
    let value = if value.is_nan() { 0.0 } else { value };
    value.clamp(min, max)
}

/// Clamp a unit-range channel, snapping values within 1e-10 of either end to
/// that end.
#[inline]
pub(crate) fn snap_unit(value: Float) -> Float {
    const SNAP: Float = 1e-10;

    if value.is_nan() || value.abs() < SNAP {
        0.0
    } else if (value - 1.0).abs() < SNAP {
        1.0
    } else {
        value.clamp(0.0, 1.0)
    }
}

/// Wrap a hue into `0..360`.
#[inline]
pub(crate) fn normalize_hue(hue: Float) -> Float {
    if !hue.is_finite() {
        return 0.0;
    }

    // rem_euclid may round tiny negative values up to 360.
    let hue = hue.rem_euclid(360.0);
    if hue >= 360.0 {
        0.0
    } else {
        hue
    }
}

/// Clamp alpha to unit range. Not-a-number is treated as missing.
#[inline]
pub(crate) fn normalize_alpha(alpha: Option<Float>) -> Option<Float> {
    alpha.and_then(|a| if a.is_nan() { None } else { Some(a.clamp(0.0, 1.0)) })
}

/// Normalize an optional alpha for equality testing and hashing.
#[inline]
pub(crate) fn to_eq_alpha(alpha: Option<Float>) -> Option<Bits> {
    alpha.map(to_eq_bits)
}

// ====================================================================================================================

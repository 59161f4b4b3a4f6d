use tracing::{debug, trace};

use super::conversion::{lch_to_srgb, oklch_to_srgb};
use crate::Float;

/// The tolerance for sRGB coordinates to still count as in gamut.
pub(crate) const GAMUT_EPSILON: Float = 1e-6;

/// The maximum number of binary search steps when fitting chroma.
pub(crate) const MAX_ITERATIONS: usize = 50;

/// Determine whether the (unclamped) sRGB coordinates are in gamut, allowing
/// for the given tolerance on either end of the unit range.
#[inline]
pub(crate) fn in_srgb_gamut(srgb: &[Float; 3], epsilon: Float) -> bool {
    srgb.iter()
        .all(|&c| !c.is_nan() && -epsilon <= c && c <= 1.0 + epsilon)
}

// --------------------------------------------------------------------------------------------------------------------

/// The parameters for fitting a polar color space with lightness, chroma, and
/// hue into the sRGB gamut.
#[derive(Debug)]
pub(crate) struct FitParameters {
    /// The name used in log events.
    pub name: &'static str,
    /// Lightness below this threshold becomes black.
    pub black_threshold: Float,
    /// Lightness above this threshold becomes white.
    pub white_threshold: Float,
    /// The lightness of white.
    pub max_lightness: Float,
    /// The raw conversion to sRGB.
    pub to_srgb: fn(&[Float; 3]) -> [Float; 3],
}

/// The parameters for fitting CIELCh colors.
pub(crate) const LCH: FitParameters = FitParameters {
    name: "CIELCh",
    black_threshold: 0.01,
    white_threshold: 99.99,
    max_lightness: 100.0,
    to_srgb: lch_to_srgb,
};

/// The parameters for fitting Oklch colors.
pub(crate) const OKLCH: FitParameters = FitParameters {
    name: "Oklch",
    black_threshold: 0.01,
    white_threshold: 0.99,
    max_lightness: 1.0,
    to_srgb: oklch_to_srgb,
};

/// Fit the polar coordinates into the sRGB gamut by reducing chroma.
///
/// Near-black and near-white colors snap to black and white. Colors that are
/// in gamut already are returned unchanged, as are colors whose chroma is
/// below epsilon, which have their chroma zeroed instead. All other colors
/// have their chroma reduced by binary search, with at most
/// [`MAX_ITERATIONS`] steps and a tolerance of `min(epsilon, 1% of chroma)`.
/// The search only ever accepts in-gamut candidates, so the result always is
/// in gamut. Lightness and hue remain unchanged.
pub(crate) fn fit_to_srgb(
    coordinates: &[Float; 3],
    epsilon: Float,
    parameters: &FitParameters,
) -> [Float; 3] {
    let [lightness, chroma, hue] = *coordinates;

    if lightness < parameters.black_threshold {
        return [0.0, 0.0, hue];
    } else if lightness > parameters.white_threshold {
        return [parameters.max_lightness, 0.0, hue];
    }

    let in_gamut = |c: Float| {
        in_srgb_gamut(&(parameters.to_srgb)(&[lightness, c, hue]), GAMUT_EPSILON)
    };
    if in_gamut(chroma) {
        return *coordinates;
    } else if chroma < epsilon {
        return [lightness, 0.0, hue];
    }

    let tolerance = epsilon.min(chroma * 0.01);
    let mut low = 0.0;
    let mut high = chroma;
    let mut best = 0.0;
    let mut iterations = 0;

    while tolerance < high - low {
        if iterations == MAX_ITERATIONS {
            debug!(
                space = parameters.name,
                lightness,
                chroma,
                hue,
                best,
                "gamut fitting stopped at iteration limit"
            );
            break;
        }

        let candidate = (low + high) / 2.0;
        if in_gamut(candidate) {
            best = candidate;
            low = candidate;
        } else {
            high = candidate;
        }
        iterations += 1;
    }

    trace!(
        space = parameters.name,
        iterations,
        from = chroma,
        to = best,
        "fitted chroma into sRGB gamut"
    );
    [lightness, best, hue]
}

// ====================================================================================================================

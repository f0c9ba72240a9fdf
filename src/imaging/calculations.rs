//! Pure calculation functions for decode sizing.
//!
//! All functions here are pure and testable without any I/O or images.

use super::orientation::Orientation;
use super::params::{Dimensions, RequestedBounds, SampleFactor};

/// Calculate the power-of-two decode divisor for a source image.
///
/// Returns [`SampleFactor::ONE`] when the source already fits the requested
/// box. Otherwise picks the largest power of two that keeps *both* halved
/// dimensions strictly larger than the box once divided, so the decoded
/// image never undershoots the request on both axes.
///
/// Both conditions must hold to keep doubling. A very wide or very tall
/// source therefore stops as soon as its short side would undershoot, and
/// may decode larger than necessary on the long side.
///
/// # Examples
/// ```
/// # use sampled_thumbs::imaging::{calculate_sample_size, Dimensions, RequestedBounds};
/// // 4000x3000 into 800x600 → decode at 1/4 (1000x750)
/// let factor = calculate_sample_size(Dimensions::new(4000, 3000), RequestedBounds::new(800, 600));
/// assert_eq!(factor.value(), 4);
/// ```
pub fn calculate_sample_size(dimensions: Dimensions, bounds: RequestedBounds) -> SampleFactor {
    let Dimensions { width, height } = dimensions;
    let RequestedBounds {
        max_width,
        max_height,
    } = bounds;

    let mut factor = SampleFactor::ONE;
    if height <= max_height && width <= max_width {
        return factor;
    }

    let half_height = height / 2;
    let half_width = width / 2;
    while half_height / factor.value() > max_height && half_width / factor.value() > max_width {
        let next = factor.doubled();
        if next == factor {
            break;
        }
        factor = next;
    }
    factor
}

/// Size of the raster produced by decoding at `factor`.
///
/// Rounds up, matching scaled JPEG decoding, and never returns a zero side.
pub fn sampled_dimensions(dimensions: Dimensions, factor: SampleFactor) -> Dimensions {
    let f = factor.value();
    Dimensions {
        width: dimensions.width.div_ceil(f).max(1),
        height: dimensions.height.div_ceil(f).max(1),
    }
}

/// Dimensions after orientation correction.
pub fn oriented_dimensions(dimensions: Dimensions, orientation: Orientation) -> Dimensions {
    if orientation.swaps_dimensions() {
        Dimensions {
            width: dimensions.height,
            height: dimensions.width,
        }
    } else {
        dimensions
    }
}

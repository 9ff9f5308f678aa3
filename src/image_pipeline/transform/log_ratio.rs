//! Log-ratio chrominance.
//!
//! For every window `(c0, c1, c2, c3)` of a row the outer samples are
//! compared against the mean of the middle pair on a log2 scale:
//!
//! ```text
//! d1 = (c1 + c2) / 2
//! X  = log2(c0 / d1)
//! Y  = log2(c3 / d1)
//! ```
//!
//! Dark samples make these ratios non-finite (`d1 == 0` divides by zero,
//! `c0 == 0` takes log2 of zero). What happens then is decided by a
//! [`NonFinitePolicy`].

use tracing::trace;

use crate::image_pipeline::common::error::{Result, VectorscopeError};
use crate::image_pipeline::source::types::{FrameGeometry, WINDOW_WIDTH};
use crate::image_pipeline::transform::luma_chroma::{luminance, window_at};
use crate::image_pipeline::transform::types::{ColorBuffers, ColorSample};

/// Magnitude substituted for infinite log-ratios under
/// [`NonFinitePolicy::Clamp`]: log2(512), beyond any finite ratio of two raw
/// 8-bit samples.
pub const LOG_RATIO_LIMIT: f64 = 9.0;

/// Handling of log-ratio samples that come out infinite or NaN.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NonFinitePolicy {
    /// Drop the sample; the count of dropped samples is reported.
    #[default]
    Skip,
    /// Replace +/-inf with +/-`LOG_RATIO_LIMIT` and NaN with 0.
    Clamp,
    /// Abort the run with `MalformedSampleError`.
    Fail,
}

/// `(luminance, X, Y)` for one window; X and Y may be non-finite.
pub fn log_ratio(window: [f64; WINDOW_WIDTH]) -> ColorSample {
    let [c0, c1, c2, c3] = window;
    let d1 = (c1 + c2) / 2.0;
    ColorSample::new(luminance(window), (c0 / d1).log2(), (c3 / d1).log2())
}

fn clamp_non_finite(value: f64) -> f64 {
    if value.is_nan() {
        0.0
    } else if value.is_infinite() {
        LOG_RATIO_LIMIT.copysign(value)
    } else {
        value
    }
}

/// Appends the log-ratio points of one unpacked row to `out`.
///
/// Returns the number of samples dropped under [`NonFinitePolicy::Skip`].
pub fn log_ratio_row(
    samples: &[f64],
    row: usize,
    geometry: FrameGeometry,
    policy: NonFinitePolicy,
    out: &mut ColorBuffers,
) -> Result<usize> {
    debug_assert_eq!(samples.len(), geometry.unpacked_row_len());

    let mut skipped = 0;
    for index in 0..geometry.log_ratio_points_per_row() {
        let sample = log_ratio(window_at(samples, index * WINDOW_WIDTH));

        if sample.is_finite() {
            out.push(sample);
            continue;
        }

        match policy {
            NonFinitePolicy::Skip => {
                trace!(row, index, "skipping non-finite log-ratio");
                skipped += 1;
            }
            NonFinitePolicy::Clamp => out.push(ColorSample::new(
                sample.first,
                clamp_non_finite(sample.second),
                clamp_non_finite(sample.third),
            )),
            NonFinitePolicy::Fail => {
                return Err(VectorscopeError::MalformedSampleError { row, index });
            }
        }
    }

    Ok(skipped)
}

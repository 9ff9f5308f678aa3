//! Luminance/chrominance transform.
//!
//! Each output point reads a window of four consecutive samples starting at
//! a multiple of four bytes. Windows therefore straddle the logical sample
//! triples; existing vectorscope plots depend on this layout, so it is kept.
//! Even-half windows read only even-half samples, odd-half windows only
//! odd-half samples.

use crate::image_pipeline::source::types::{FrameGeometry, WINDOW_WIDTH};
use crate::image_pipeline::transform::types::{ColorBuffers, ColorSample};

pub const U_MAX: f64 = 0.436;
pub const V_MAX: f64 = 0.615;

const WEIGHT_C0: f64 = 0.299;
const WEIGHT_C12: f64 = 0.587;
const WEIGHT_C3: f64 = 0.114;

#[inline]
pub(crate) fn window_at(samples: &[f64], offset: usize) -> [f64; WINDOW_WIDTH] {
    [
        samples[offset],
        samples[offset + 1],
        samples[offset + 2],
        samples[offset + 3],
    ]
}

/// Weighted luminance of one window; the two middle samples are averaged.
#[inline]
pub fn luminance(window: [f64; WINDOW_WIDTH]) -> f64 {
    let [c0, c1, c2, c3] = window;
    WEIGHT_C0 * c0 + (WEIGHT_C12 * c1 + WEIGHT_C12 * c2) / 2.0 + WEIGHT_C3 * c3
}

/// `(Y, U, V)` for one window.
pub fn luma_chroma(window: [f64; WINDOW_WIDTH]) -> ColorSample {
    let y = luminance(window);
    let [c0, _, _, c3] = window;
    ColorSample::new(y, U_MAX * (c3 - y), V_MAX * (c0 - y))
}

/// Transforms one unpacked row group into its slots of `out`.
///
/// Row group `j` owns `2 * windows_per_half` consecutive slots starting at
/// `j * 2 * windows_per_half`: first the even half-row windows, then the odd.
/// `out` must have been sized with `geometry.luma_points()`.
pub fn transform_row_group(
    samples: &[f64],
    row_group: usize,
    geometry: FrameGeometry,
    out: &mut ColorBuffers,
) {
    debug_assert_eq!(samples.len(), geometry.unpacked_row_len());
    debug_assert_eq!(out.len(), geometry.luma_points());

    let windows = geometry.windows_per_half();
    let half_len = geometry.half_row_len();
    let base = row_group * 2 * windows;

    for i in 0..windows {
        let ce = i * WINDOW_WIDTH;
        let co = half_len + i * WINDOW_WIDTH;

        out.set(base + i, luma_chroma(window_at(samples, ce)));
        out.set(base + windows + i, luma_chroma(window_at(samples, co)));
    }
}

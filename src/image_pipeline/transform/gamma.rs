/// Exponent used by the reference analysis when gamma correction is on.
pub const DEFAULT_GAMMA: f64 = 0.5;

const FULL_SCALE: f64 = 255.0;

/// Replaces every sample `s` with `255 * (s / 255)^gamma`.
///
/// Operates on the floating-point copy of a row; the unpacked integer
/// samples are never touched.
pub fn gamma_correct(samples: &mut [f64], gamma: f64) {
    for sample in samples.iter_mut() {
        *sample = FULL_SCALE * (*sample / FULL_SCALE).powf(gamma);
    }
}

//! Color sample types

/// One derived point: `(Y, U, V)` in luminance/chrominance mode, or
/// `(Y, X, Y_ratio)` in log-ratio mode, where the luminance of the window is
/// followed by its two log-ratios.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ColorSample {
    pub first: f64,
    pub second: f64,
    pub third: f64,
}

impl ColorSample {
    pub fn new(first: f64, second: f64, third: f64) -> Self {
        Self {
            first,
            second,
            third,
        }
    }

    pub fn is_finite(&self) -> bool {
        self.first.is_finite() && self.second.is_finite() && self.third.is_finite()
    }
}

/// Three parallel output sequences of equal length.
///
/// Allocated by the caller and handed to the transform stage, so the same
/// buffers can be reused across rows without hidden shared state.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ColorBuffers {
    first: Vec<f64>,
    second: Vec<f64>,
    third: Vec<f64>,
}

impl ColorBuffers {
    /// Zero-filled buffers of exactly `len` slots, for indexed writes.
    pub fn with_len(len: usize) -> Self {
        Self {
            first: vec![0.0; len],
            second: vec![0.0; len],
            third: vec![0.0; len],
        }
    }

    /// Empty buffers with room for `capacity` appended samples.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            first: Vec::with_capacity(capacity),
            second: Vec::with_capacity(capacity),
            third: Vec::with_capacity(capacity),
        }
    }

    pub fn len(&self) -> usize {
        self.first.len()
    }

    pub fn is_empty(&self) -> bool {
        self.first.is_empty()
    }

    pub fn push(&mut self, sample: ColorSample) {
        self.first.push(sample.first);
        self.second.push(sample.second);
        self.third.push(sample.third);
    }

    pub fn set(&mut self, index: usize, sample: ColorSample) {
        self.first[index] = sample.first;
        self.second[index] = sample.second;
        self.third[index] = sample.third;
    }

    pub fn get(&self, index: usize) -> Option<ColorSample> {
        Some(ColorSample::new(
            *self.first.get(index)?,
            *self.second.get(index)?,
            *self.third.get(index)?,
        ))
    }

    pub fn clear(&mut self) {
        self.first.clear();
        self.second.clear();
        self.third.clear();
    }

    pub fn iter(&self) -> impl ExactSizeIterator<Item = ColorSample> + '_ {
        self.first
            .iter()
            .zip(&self.second)
            .zip(&self.third)
            .map(|((&a, &b), &c)| ColorSample::new(a, b, c))
    }

    pub fn luminance(&self) -> &[f64] {
        &self.first
    }
}

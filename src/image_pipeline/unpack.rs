//! Packed word unpacking
//!
//! Every 64-bit readout word carries two sample triples: the top three bytes
//! belong to the even half-row, the next three to the odd half-row. The low
//! 16 bits are padding in this layout and are dropped.

use crate::image_pipeline::source::FrameGeometry;

/// Bit offsets of the even half-row triple within a packed word.
const EVEN_SHIFTS: [u32; 3] = [56, 48, 40];

/// Bit offsets of the odd half-row triple within a packed word.
const ODD_SHIFTS: [u32; 3] = [32, 24, 16];

/// One unpacked row group: the even half-row followed by the odd half-row,
/// three 8-bit samples per column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnpackedRow {
    samples: Vec<u8>,
    half_len: usize,
}

impl UnpackedRow {
    pub fn new(geometry: FrameGeometry) -> Self {
        Self {
            samples: vec![0; geometry.unpacked_row_len()],
            half_len: geometry.half_row_len(),
        }
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.samples
    }

    pub fn even_half(&self) -> &[u8] {
        &self.samples[..self.half_len]
    }

    pub fn odd_half(&self) -> &[u8] {
        &self.samples[self.half_len..]
    }

    /// Copies the samples into `out` as floating point, leaving the integer
    /// samples untouched for any later stage.
    pub fn to_samples(&self, out: &mut Vec<f64>) {
        out.clear();
        out.extend(self.samples.iter().map(|&s| f64::from(s)));
    }
}

#[inline]
fn field(word: u64, shift: u32) -> u8 {
    ((word >> shift) & 0xFF) as u8
}

/// Unpacks one row group of packed words into `row`.
///
/// Word `i` fills the even triple at `i * 3` and the odd triple at
/// `(i + cols / 2) * 3`. Every sample of `row` is overwritten.
pub fn unpack_row_group<I>(words: I, row: &mut UnpackedRow)
where
    I: IntoIterator<Item = u64>,
{
    let half_len = row.half_len;
    let (even, odd) = row.samples.split_at_mut(half_len);

    for ((word, even_triple), odd_triple) in words
        .into_iter()
        .zip(even.chunks_exact_mut(3))
        .zip(odd.chunks_exact_mut(3))
    {
        for (dst, shift) in even_triple.iter_mut().zip(EVEN_SHIFTS) {
            *dst = field(word, shift);
        }
        for (dst, shift) in odd_triple.iter_mut().zip(ODD_SHIFTS) {
            *dst = field(word, shift);
        }
    }
}

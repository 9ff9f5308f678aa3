//! Packed frame types

use crate::image_pipeline::common::error::{Result, VectorscopeError};

/// Each packed readout word is 64 bits wide.
pub const WORD_BYTES: usize = 8;

/// Bytes read by one luminance/chrominance or log-ratio window.
pub const WINDOW_WIDTH: usize = 4;

/// Shape of one packed sensor readout.
///
/// The sensor delivers two interleaved half-rows per group of `cols / 2`
/// words, so a frame holds `rows / 2` row groups.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameGeometry {
    cols: usize,
    rows: usize,
}

impl FrameGeometry {
    /// The 4096 x 3072 readout of the AXIOM sensor front end.
    pub const AXIOM: FrameGeometry = FrameGeometry {
        cols: 4096,
        rows: 3072,
    };

    /// Builds a geometry whose windows tile every half-row exactly.
    ///
    /// `cols` must be a non-zero multiple of 8 and `rows` a non-zero even
    /// number.
    pub fn new(cols: usize, rows: usize) -> Result<Self> {
        if cols == 0 || cols % 8 != 0 || rows == 0 || rows % 2 != 0 {
            return Err(VectorscopeError::InvalidGeometry(cols, rows));
        }
        Ok(Self { cols, rows })
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn words_per_row_group(&self) -> usize {
        self.cols / 2
    }

    pub fn row_groups(&self) -> usize {
        self.rows / 2
    }

    pub fn frame_words(&self) -> usize {
        self.words_per_row_group() * self.row_groups()
    }

    pub fn frame_bytes(&self) -> usize {
        self.frame_words() * WORD_BYTES
    }

    /// Length of one unpacked row: three samples per column.
    pub fn unpacked_row_len(&self) -> usize {
        self.cols * 3
    }

    pub fn half_row_len(&self) -> usize {
        self.words_per_row_group() * 3
    }

    pub fn windows_per_half(&self) -> usize {
        self.half_row_len() / WINDOW_WIDTH
    }

    /// Number of (Y, U, V) points produced for a whole frame.
    pub fn luma_points(&self) -> usize {
        self.row_groups() * 2 * self.windows_per_half()
    }

    /// Number of log-ratio pairs produced per unpacked row.
    pub fn log_ratio_points_per_row(&self) -> usize {
        self.unpacked_row_len() / WINDOW_WIDTH
    }
}

impl Default for FrameGeometry {
    fn default() -> Self {
        Self::AXIOM
    }
}

/// A read-only view of one packed frame.
#[derive(Debug, Clone, Copy)]
pub struct Frame<'a> {
    data: &'a [u8],
    geometry: FrameGeometry,
}

impl<'a> Frame<'a> {
    /// Wraps `data` as a frame of the given geometry.
    ///
    /// Bytes past the end of the frame are ignored; a hardware mapping is
    /// usually larger than a single frame.
    pub fn new(data: &'a [u8], geometry: FrameGeometry) -> Result<Self> {
        let expected = geometry.frame_bytes();
        if data.len() < expected {
            return Err(VectorscopeError::InvalidFrameSize {
                expected,
                actual: data.len(),
            });
        }
        Ok(Self {
            data: &data[..expected],
            geometry,
        })
    }

    pub fn geometry(&self) -> FrameGeometry {
        self.geometry
    }

    /// Words of row group `index`, decoded little-endian.
    pub fn row_group(self, index: usize) -> impl ExactSizeIterator<Item = u64> + 'a {
        let stride = self.geometry.words_per_row_group() * WORD_BYTES;
        let start = index * stride;
        let data: &'a [u8] = self.data;
        data[start..start + stride]
            .chunks_exact(WORD_BYTES)
            .map(|chunk| {
                let mut word = [0u8; WORD_BYTES];
                word.copy_from_slice(chunk);
                u64::from_le_bytes(word)
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_axiom_geometry() {
        let geometry = FrameGeometry::AXIOM;
        assert_eq!(geometry.words_per_row_group(), 2048);
        assert_eq!(geometry.row_groups(), 1536);
        assert_eq!(geometry.frame_bytes(), 2048 * 1536 * 8);
        assert_eq!(geometry.unpacked_row_len(), 4096 * 3);
        assert_eq!(geometry.windows_per_half(), 1536);
        assert_eq!(geometry.luma_points(), (3072 / 2) * 3072);
        assert_eq!(geometry.log_ratio_points_per_row(), 3072);
    }

    #[test]
    fn test_axiom_frame_fits_default_mapping() {
        assert!(FrameGeometry::AXIOM.frame_bytes() <= 0x0800_0000);
    }

    #[test]
    fn test_invalid_geometry() {
        assert!(matches!(
            FrameGeometry::new(12, 4),
            Err(VectorscopeError::InvalidGeometry(12, 4))
        ));
        assert!(FrameGeometry::new(16, 3).is_err());
        assert!(FrameGeometry::new(0, 2).is_err());
        assert!(FrameGeometry::new(16, 0).is_err());
        assert!(FrameGeometry::new(16, 2).is_ok());
    }

    #[test]
    fn test_frame_too_small() {
        let geometry = FrameGeometry::new(16, 2).unwrap();
        let data = vec![0u8; geometry.frame_bytes() - 1];
        let result = Frame::new(&data, geometry);
        assert!(matches!(
            result,
            Err(VectorscopeError::InvalidFrameSize { expected: 64, actual: 63 })
        ));
    }

    #[test]
    fn test_row_group_words() {
        let geometry = FrameGeometry::new(8, 4).unwrap();
        let data: Vec<u8> = (0u64..8).flat_map(|w| w.to_le_bytes()).collect();
        let frame = Frame::new(&data, geometry).unwrap();

        assert_eq!(frame.row_group(0).collect::<Vec<_>>(), vec![0, 1, 2, 3]);
        assert_eq!(frame.row_group(1).collect::<Vec<_>>(), vec![4, 5, 6, 7]);
    }

    #[test]
    fn test_trailing_bytes_ignored() {
        let geometry = FrameGeometry::new(8, 2).unwrap();
        let data = vec![0xFFu8; geometry.frame_bytes() + 100];
        let frame = Frame::new(&data, geometry).unwrap();
        assert_eq!(frame.row_group(0).len(), 4);
    }
}

use crate::image_pipeline::source::reader::FrameSource;
use crate::image_pipeline::source::types::FrameGeometry;

/// In-memory frame, used for synthetic test patterns.
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    data: Vec<u8>,
}

impl MemorySource {
    pub fn from_bytes(data: Vec<u8>) -> Self {
        Self { data }
    }

    /// Lays out `words` exactly as the capture hardware stores them.
    pub fn from_words(words: &[u64]) -> Self {
        Self {
            data: words.iter().flat_map(|w| w.to_le_bytes()).collect(),
        }
    }

    /// A whole frame of `geometry` where every packed word equals `word`.
    pub fn filled(geometry: FrameGeometry, word: u64) -> Self {
        Self::from_words(&vec![word; geometry.frame_words()])
    }
}

impl FrameSource for MemorySource {
    fn bytes(&self) -> &[u8] {
        &self.data
    }

    fn describe(&self) -> String {
        format!("memory ({} bytes)", self.data.len())
    }
}

use std::fs::File;
use std::path::{Path, PathBuf};

use memmap2::Mmap;
use tracing::debug;

use crate::image_pipeline::common::error::{Result, VectorscopeError};
use crate::image_pipeline::source::reader::FrameSource;

/// Frame source reading a dumped frame from a regular file.
///
/// The file must hold the same packed layout the hardware produces. It is
/// memory-mapped rather than read so large dumps are paged in on demand.
pub struct FileSource {
    map: Mmap,
    path: PathBuf,
}

impl FileSource {
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        let file = File::open(path).map_err(|source| VectorscopeError::DeviceOpenError {
            path: path.to_path_buf(),
            source,
        })?;

        // SAFETY: the dump is treated as an immutable snapshot; it must not be
        // truncated while the source is alive.
        let map = unsafe { Mmap::map(&file) }.map_err(|source| VectorscopeError::MappingError {
            base: 0,
            size: file.metadata().map(|m| m.len() as usize).unwrap_or(0),
            source,
        })?;

        debug!(
            "Memory-mapped {}: {} bytes ({:.1} MB)",
            path.display(),
            map.len(),
            map.len() as f64 / 1_048_576.0
        );

        Ok(Self {
            map,
            path: path.to_path_buf(),
        })
    }
}

impl FrameSource for FileSource {
    fn bytes(&self) -> &[u8] {
        &self.map
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

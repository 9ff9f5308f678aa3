//! Frame source backed by a physical memory mapping.
//!
//! The capture hardware writes each frame into a fixed window of physical
//! memory. This source maps that window read-only through a memory device
//! (normally `/dev/mem`), so it needs the privileges the device requires.
//! The mapping is released when the source is dropped.

use std::fs::OpenOptions;
use std::os::unix::fs::OpenOptionsExt;
use std::path::{Path, PathBuf};

use memmap2::{Mmap, MmapOptions};
use tracing::info;

use crate::image_pipeline::common::error::{Result, VectorscopeError};
use crate::image_pipeline::source::reader::FrameSource;

/// Default physical base of the frame buffer.
pub const DEFAULT_MAP_BASE: u64 = 0x1800_0000;

/// Default length of the mapped window.
pub const DEFAULT_MAP_SIZE: usize = 0x0800_0000;

pub const DEFAULT_DEVICE: &str = "/dev/mem";

pub struct DevMemSource {
    map: Mmap,
    device: PathBuf,
    base: u64,
}

impl DevMemSource {
    /// Maps `size` bytes of `device` starting at physical address `base`.
    ///
    /// # Errors
    ///
    /// * `DeviceOpenError` - the device could not be opened
    /// * `MappingError` - the kernel refused the mapping (bad base or size,
    ///   missing privileges)
    pub fn open<P: AsRef<Path>>(device: P, base: u64, size: usize) -> Result<Self> {
        let device = device.as_ref();

        let file = OpenOptions::new()
            .read(true)
            .custom_flags(libc::O_SYNC)
            .open(device)
            .map_err(|source| VectorscopeError::DeviceOpenError {
                path: device.to_path_buf(),
                source,
            })?;

        // SAFETY: the region is only ever read through the returned slice.
        // Concurrent writes by the capture hardware can change sample values
        // but never the length or validity of the mapping.
        let map = unsafe { MmapOptions::new().offset(base).len(size).map(&file) }
            .map_err(|source| VectorscopeError::MappingError { base, size, source })?;

        info!(
            "mapped 0x{:08X}+0x{:08X} to {:p}",
            base,
            size,
            map.as_ptr()
        );

        Ok(Self {
            map,
            device: device.to_path_buf(),
            base,
        })
    }
}

impl FrameSource for DevMemSource {
    fn bytes(&self) -> &[u8] {
        &self.map
    }

    fn describe(&self) -> String {
        format!(
            "{} @0x{:08X}+0x{:08X}",
            self.device.display(),
            self.base,
            self.map.len()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_device_is_open_error() {
        let dir = tempfile::tempdir().unwrap();
        let device = dir.path().join("no-such-mem");

        let result = DevMemSource::open(&device, DEFAULT_MAP_BASE, DEFAULT_MAP_SIZE);

        match result {
            Err(VectorscopeError::DeviceOpenError { path, .. }) => assert_eq!(path, device),
            Err(other) => panic!("unexpected error: {other}"),
            Ok(_) => panic!("opening a missing device must fail"),
        }
    }

    #[test]
    fn test_regular_file_maps_at_offset() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        let page = 4096usize;
        let mut contents = vec![0u8; page * 2];
        contents[page] = 0xAB;
        std::io::Write::write_all(&mut file, &contents).unwrap();

        let source = DevMemSource::open(file.path(), page as u64, page).unwrap();

        assert_eq!(source.bytes().len(), page);
        assert_eq!(source.bytes()[0], 0xAB);
        assert!(source.describe().contains("0x00001000"));
    }
}

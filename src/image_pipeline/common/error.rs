use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum VectorscopeError {
    #[error("error opening >{}<: {source}", .path.display())]
    DeviceOpenError {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("error mapping 0x{base:08X}+0x{size:08X}: {source}")]
    MappingError {
        base: u64,
        size: usize,
        source: std::io::Error,
    },

    #[error("error opening >{}< for writing: {source}", .path.display())]
    OutputUnavailable {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("non-finite log-ratio sample at row {row}, index {index}")]
    MalformedSampleError { row: usize, index: usize },

    #[error("Failed to write output file: {0}")]
    OutputWriteError(String),

    #[error("Frame too small: expected at least {expected} bytes, got {actual}")]
    InvalidFrameSize { expected: usize, actual: usize },

    #[error("Invalid frame geometry: cols={0}, rows={1}")]
    InvalidGeometry(usize, usize),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, VectorscopeError>;

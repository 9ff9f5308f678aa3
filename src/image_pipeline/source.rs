//! Frame acquisition module
//!
//! This module hides where a packed frame comes from: a physical memory
//! mapping on the camera, a dumped file, or a synthetic buffer.

mod reader;
mod dev_mem_source;
mod file_source;
mod memory_source;
pub mod types;

pub use reader::FrameSource;
pub use dev_mem_source::{DevMemSource, DEFAULT_DEVICE, DEFAULT_MAP_BASE, DEFAULT_MAP_SIZE};
pub use file_source::FileSource;
pub use memory_source::MemorySource;
pub use types::{Frame, FrameGeometry};

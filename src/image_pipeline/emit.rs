//! Text output module
//!
//! This module serializes vectorscope points as whitespace-delimited text
//! records for plotting tools.

mod writer;
mod text_writer;

pub use writer::SampleWriter;
pub use text_writer::{parse_record, TabSeparatedWriter};

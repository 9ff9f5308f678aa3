//! Pipeline conversions module
//!
//! This module contains the orchestration logic that turns a packed frame
//! into vectorscope text records.

mod frame_to_vectorscope;


pub use frame_to_vectorscope::{AnalysisSummary, VectorscopePipeline};

//! Image processing pipeline module
//!
//! This module turns one packed RAW12 frame into luminance/chrominance
//! points for vectorscope plotting, with separate modules for frame
//! acquisition, unpacking, color transforms, text output and orchestration.

pub mod common;
pub mod config;
pub mod conversions;
pub mod emit;
pub mod source;
pub mod transform;
pub mod unpack;

pub use common::{
    PipelineTimings,
    Result,
    VectorscopeError,
};

pub use config::{
    AnalysisConfig,
    AnalysisConfigBuilder,
    AnalysisMode,
    MappingConfig,
};

pub use source::{
    DevMemSource,
    FileSource,
    Frame,
    FrameGeometry,
    FrameSource,
    MemorySource,
};

pub use unpack::{
    unpack_row_group,
    UnpackedRow,
};

pub use transform::{
    ColorBuffers,
    ColorSample,
    NonFinitePolicy,
    DEFAULT_GAMMA,
};

pub use emit::{
    parse_record,
    SampleWriter,
    TabSeparatedWriter,
};

pub use conversions::{
    AnalysisSummary,
    VectorscopePipeline,
};

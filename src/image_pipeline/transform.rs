//! Color transform module
//!
//! Turns unpacked samples into vectorscope points: gamma pre-correction,
//! luminance/chrominance and log-ratio chrominance.

pub mod gamma;
pub mod log_ratio;
pub mod luma_chroma;
pub mod types;

pub use gamma::{gamma_correct, DEFAULT_GAMMA};
pub use log_ratio::{log_ratio, log_ratio_row, NonFinitePolicy, LOG_RATIO_LIMIT};
pub use luma_chroma::{luma_chroma, luminance, transform_row_group, U_MAX, V_MAX};
pub use types::{ColorBuffers, ColorSample};

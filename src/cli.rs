//! Command-line surface of the `vectorscope` binary.

use std::path::PathBuf;

use clap::error::ErrorKind;
use clap::{Parser, ValueEnum};

use crate::image_pipeline::{
    AnalysisConfig, AnalysisMode, FrameGeometry, MappingConfig, NonFinitePolicy,
};
use crate::image_pipeline::source::DEFAULT_DEVICE;

/// Default output file, the name existing plotting scripts expect.
pub const DEFAULT_OUTPUT: &str = "test.txt";

#[derive(Parser, Debug)]
#[command(
    name = "vectorscope",
    version,
    about = "Luminance/chrominance analysis of a packed RAW12 frame"
)]
pub struct Cli {
    /// Memory mapping base (0x hex, 0 octal or decimal)
    #[arg(short = 'B', value_name = "VAL", value_parser = parse_c_integer, default_value = "0x18000000")]
    pub base: u64,

    /// Memory mapping size (0x hex, 0 octal or decimal)
    #[arg(short = 'S', value_name = "VAL", value_parser = parse_c_size, default_value = "0x08000000")]
    pub size: usize,

    /// Memory device to map the frame from
    #[arg(short = 'D', value_name = "DEVICE", default_value = DEFAULT_DEVICE)]
    pub device: PathBuf,

    /// Analyze a dumped frame file instead of mapping memory
    #[arg(short = 'f', value_name = "FILE")]
    pub file: Option<PathBuf>,

    /// Gamma-correct samples with this exponent before the transform (e.g. 0.5)
    #[arg(short = 'g', value_name = "GAMMA", value_parser = parse_gamma)]
    pub gamma: Option<f64>,

    /// Emit log2 chrominance ratios instead of U/V
    #[arg(short = 'l')]
    pub log_ratio: bool,

    /// What to do with non-finite log-ratio samples
    #[arg(short = 'n', value_name = "POLICY", value_enum, default_value_t = PolicyArg::Skip)]
    pub non_finite: PolicyArg,

    /// Output text file
    #[arg(default_value = DEFAULT_OUTPUT)]
    pub output: PathBuf,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum PolicyArg {
    Skip,
    Clamp,
    Fail,
}

impl From<PolicyArg> for NonFinitePolicy {
    fn from(arg: PolicyArg) -> Self {
        match arg {
            PolicyArg::Skip => NonFinitePolicy::Skip,
            PolicyArg::Clamp => NonFinitePolicy::Clamp,
            PolicyArg::Fail => NonFinitePolicy::Fail,
        }
    }
}

impl Cli {
    pub fn analysis_config(&self) -> AnalysisConfig {
        AnalysisConfig::builder()
            .geometry(FrameGeometry::AXIOM)
            .mode(if self.log_ratio {
                AnalysisMode::LogRatio
            } else {
                AnalysisMode::LumaChroma
            })
            .gamma(self.gamma)
            .non_finite(self.non_finite.into())
            .build()
    }

    pub fn mapping_config(&self) -> MappingConfig {
        MappingConfig {
            device: self.device.clone(),
            base: self.base,
            size: self.size,
        }
    }
}

/// Exit status for a failed parse: 0 when help or version was requested,
/// 1 for any usage error.
pub fn parse_error_exit_code(err: &clap::Error) -> u8 {
    match err.kind() {
        ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => 0,
        _ => 1,
    }
}

/// Parses an unsigned integer the way `strtoll(s, NULL, 0)` does: `0x`
/// selects hex, a leading `0` octal, anything else decimal.
pub fn parse_c_integer(s: &str) -> Result<u64, String> {
    let trimmed = s.trim();
    let digits = trimmed.strip_prefix('+').unwrap_or(trimmed);

    let (digits, radix) = if let Some(hex) = digits
        .strip_prefix("0x")
        .or_else(|| digits.strip_prefix("0X"))
    {
        (hex, 16)
    } else if digits.len() > 1 && digits.starts_with('0') {
        (&digits[1..], 8)
    } else {
        (digits, 10)
    };

    if digits.is_empty() {
        return Err(format!("invalid number: {s:?}"));
    }

    u64::from_str_radix(digits, radix).map_err(|e| format!("invalid number {s:?}: {e}"))
}

fn parse_c_size(s: &str) -> Result<usize, String> {
    let value = parse_c_integer(s)?;
    usize::try_from(value).map_err(|_| format!("size {s:?} does not fit in memory"))
}

fn parse_gamma(s: &str) -> Result<f64, String> {
    let gamma: f64 = s.trim().parse().map_err(|e| format!("invalid gamma {s:?}: {e}"))?;
    if gamma.is_finite() && gamma > 0.0 {
        Ok(gamma)
    } else {
        Err(format!("gamma must be a positive number, got {s:?}"))
    }
}

//! Analysis configuration types

use std::path::PathBuf;

use crate::image_pipeline::source::{FrameGeometry, DEFAULT_DEVICE, DEFAULT_MAP_BASE, DEFAULT_MAP_SIZE};
use crate::image_pipeline::transform::NonFinitePolicy;

/// Which chrominance representation to derive
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AnalysisMode {
    /// `(Y, U, V)` per window, all row groups emitted once at the end
    #[default]
    LumaChroma,
    /// `(Y, X, Y)` log2 ratios per window, appended row by row
    LogRatio,
}

/// Configuration for one analysis run
#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisConfig {
    /// Shape of the packed frame
    pub geometry: FrameGeometry,
    /// Chrominance representation
    pub mode: AnalysisMode,
    /// Gamma exponent applied to samples before the transform, if any
    pub gamma: Option<f64>,
    /// What to do with non-finite log-ratio samples
    pub non_finite: NonFinitePolicy,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            geometry: FrameGeometry::AXIOM,
            mode: AnalysisMode::LumaChroma,
            gamma: None,
            non_finite: NonFinitePolicy::Skip,
        }
    }
}

impl AnalysisConfig {
    pub fn builder() -> AnalysisConfigBuilder {
        AnalysisConfigBuilder::default()
    }
}

/// Builder for AnalysisConfig
#[derive(Default)]
pub struct AnalysisConfigBuilder {
    geometry: Option<FrameGeometry>,
    mode: Option<AnalysisMode>,
    gamma: Option<Option<f64>>,
    non_finite: Option<NonFinitePolicy>,
}

impl AnalysisConfigBuilder {
    pub fn geometry(mut self, geometry: FrameGeometry) -> Self {
        self.geometry = Some(geometry);
        self
    }

    pub fn mode(mut self, mode: AnalysisMode) -> Self {
        self.mode = Some(mode);
        self
    }

    pub fn gamma(mut self, gamma: Option<f64>) -> Self {
        self.gamma = Some(gamma);
        self
    }

    pub fn non_finite(mut self, policy: NonFinitePolicy) -> Self {
        self.non_finite = Some(policy);
        self
    }

    pub fn build(self) -> AnalysisConfig {
        let default = AnalysisConfig::default();
        AnalysisConfig {
            geometry: self.geometry.unwrap_or(default.geometry),
            mode: self.mode.unwrap_or(default.mode),
            gamma: self.gamma.unwrap_or(default.gamma),
            non_finite: self.non_finite.unwrap_or(default.non_finite),
        }
    }
}

/// Where the frame lives in physical memory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MappingConfig {
    /// Memory device to map from
    pub device: PathBuf,
    /// Physical base address of the frame buffer
    pub base: u64,
    /// Number of bytes to map
    pub size: usize,
}

impl Default for MappingConfig {
    fn default() -> Self {
        Self {
            device: PathBuf::from(DEFAULT_DEVICE),
            base: DEFAULT_MAP_BASE,
            size: DEFAULT_MAP_SIZE,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_defaults() {
        let config = AnalysisConfig::builder().build();
        assert_eq!(config, AnalysisConfig::default());
        assert_eq!(config.geometry, FrameGeometry::AXIOM);
        assert_eq!(config.gamma, None);
    }

    #[test]
    fn test_builder_overrides() {
        let geometry = FrameGeometry::new(16, 4).unwrap();
        let config = AnalysisConfig::builder()
            .geometry(geometry)
            .mode(AnalysisMode::LogRatio)
            .gamma(Some(0.5))
            .non_finite(NonFinitePolicy::Fail)
            .build();

        assert_eq!(config.geometry, geometry);
        assert_eq!(config.mode, AnalysisMode::LogRatio);
        assert_eq!(config.gamma, Some(0.5));
        assert_eq!(config.non_finite, NonFinitePolicy::Fail);
    }

    #[test]
    fn test_mapping_defaults() {
        let mapping = MappingConfig::default();
        assert_eq!(mapping.device, PathBuf::from("/dev/mem"));
        assert_eq!(mapping.base, 0x1800_0000);
        assert_eq!(mapping.size, 0x0800_0000);
    }
}

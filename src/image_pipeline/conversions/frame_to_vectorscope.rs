use std::io::{BufWriter, Write};
use std::path::Path;

use tempfile::NamedTempFile;
use tracing::{debug, info, instrument};

use crate::image_pipeline::{
    common::{
        error::{Result, VectorscopeError},
        timing::{PipelineTimings, Timer},
    },
    config::{AnalysisConfig, AnalysisMode},
    emit::{SampleWriter, TabSeparatedWriter},
    source::{Frame, FrameSource},
    transform::{gamma_correct, log_ratio_row, transform_row_group, ColorBuffers},
    unpack::{unpack_row_group, UnpackedRow},
};

/// Outcome of one analysis run.
#[derive(Debug, Clone)]
pub struct AnalysisSummary {
    /// Records handed to the writer
    pub points_written: usize,
    /// Log-ratio samples dropped as non-finite
    pub skipped_non_finite: usize,
    pub timings: PipelineTimings,
}

/// Per-run scratch buffers, reused across row groups.
struct RowScratch {
    row: UnpackedRow,
    samples: Vec<f64>,
}

pub struct VectorscopePipeline<W: SampleWriter> {
    writer: W,
    config: AnalysisConfig,
}

impl VectorscopePipeline<TabSeparatedWriter> {
    pub fn new(config: AnalysisConfig) -> Self {
        Self {
            writer: TabSeparatedWriter,
            config,
        }
    }
}

impl<W: SampleWriter> VectorscopePipeline<W> {
    pub fn with_custom(writer: W, config: AnalysisConfig) -> Self {
        Self { writer, config }
    }

    /// Runs the whole frame through unpack, optional gamma, transform and
    /// emit, writing records to `output`.
    ///
    /// Every run allocates its own buffers; nothing carries over between
    /// calls.
    #[instrument(skip(self, source, output), fields(source = %source.describe(), mode = ?self.config.mode))]
    pub fn analyze(&self, source: &dyn FrameSource, output: &mut dyn Write) -> Result<AnalysisSummary> {
        info!("Starting vectorscope analysis");

        let frame = self.load_frame(source)?;
        self.analyze_frame(&frame, output)
    }

    /// Analyzes `source` into a text file at `output_path`.
    ///
    /// The frame is validated before the output is touched, and records go to
    /// a temporary file next to `output_path` that only replaces it once the
    /// whole run succeeded. A failed run leaves any previous output intact.
    #[instrument(skip(self, source, output_path), fields(source = %source.describe(), mode = ?self.config.mode))]
    pub fn analyze_to_file<P: AsRef<Path>>(
        &self,
        source: &dyn FrameSource,
        output_path: P,
    ) -> Result<AnalysisSummary> {
        let output_path = output_path.as_ref();
        let frame = self.load_frame(source)?;

        info!(output = %output_path.display(), "Writing analysis");

        let unavailable = |source: std::io::Error| VectorscopeError::OutputUnavailable {
            path: output_path.to_path_buf(),
            source,
        };
        let write_failed =
            |e: std::io::Error| VectorscopeError::OutputWriteError(format!("{}: {}", output_path.display(), e));

        let mut staged = {
            let _span = tracing::info_span!("create_output_file").entered();
            let dir = match output_path.parent() {
                Some(parent) if !parent.as_os_str().is_empty() => parent,
                _ => Path::new("."),
            };
            NamedTempFile::new_in(dir).map_err(unavailable)?
        };

        let summary = {
            let mut output = BufWriter::new(&mut staged);
            let summary = self.analyze_frame(&frame, &mut output)?;
            output.flush().map_err(write_failed)?;
            summary
        };

        staged
            .persist(output_path)
            .map_err(|e| write_failed(e.error))?;
        debug!(output = %output_path.display(), "Output persisted");

        Ok(summary)
    }

    fn load_frame<'a>(&self, source: &'a dyn FrameSource) -> Result<Frame<'a>> {
        let _span = tracing::info_span!("load_frame", bytes = source.bytes().len()).entered();
        Frame::new(source.bytes(), self.config.geometry)
    }

    fn analyze_frame(&self, frame: &Frame<'_>, output: &mut dyn Write) -> Result<AnalysisSummary> {
        let summary = match self.config.mode {
            AnalysisMode::LumaChroma => self.analyze_luma_chroma(frame, output)?,
            AnalysisMode::LogRatio => self.analyze_log_ratio(frame, output)?,
        };

        summary.timings.log_summary();
        info!(
            points = summary.points_written,
            skipped = summary.skipped_non_finite,
            "Analysis complete in {:.3}ms",
            summary.timings.total_duration().as_secs_f64() * 1000.0
        );
        Ok(summary)
    }

    fn scratch(&self) -> RowScratch {
        RowScratch {
            row: UnpackedRow::new(self.config.geometry),
            samples: Vec::with_capacity(self.config.geometry.unpacked_row_len()),
        }
    }

    /// Unpacks row group `index` and applies gamma to the float copy.
    fn prepare_row(
        &self,
        frame: &Frame<'_>,
        index: usize,
        scratch: &mut RowScratch,
        timings: &mut PipelineTimings,
    ) {
        let timer = Timer::start("unpack");
        unpack_row_group(frame.row_group(index), &mut scratch.row);
        scratch.row.to_samples(&mut scratch.samples);
        timings.record(timer);

        if let Some(gamma) = self.config.gamma {
            let timer = Timer::start("gamma");
            gamma_correct(&mut scratch.samples, gamma);
            timings.record(timer);
        }
    }

    fn analyze_luma_chroma(&self, frame: &Frame<'_>, output: &mut dyn Write) -> Result<AnalysisSummary> {
        let geometry = self.config.geometry;
        let mut timings = PipelineTimings::new();
        let mut scratch = self.scratch();
        let mut buffers = ColorBuffers::with_len(geometry.luma_points());

        {
            let _span = tracing::info_span!(
                "transform",
                row_groups = geometry.row_groups(),
                gamma = ?self.config.gamma
            )
            .entered();
            for index in 0..geometry.row_groups() {
                self.prepare_row(frame, index, &mut scratch, &mut timings);

                let timer = Timer::start("transform");
                transform_row_group(&scratch.samples, index, geometry, &mut buffers);
                timings.record(timer);
            }
        }

        {
            let _span = tracing::info_span!("emit", points = buffers.len()).entered();
            let timer = Timer::start("emit");
            self.writer.write_samples(&buffers, output)?;
            timings.record(timer);
        }

        Ok(AnalysisSummary {
            points_written: buffers.len(),
            skipped_non_finite: 0,
            timings,
        })
    }

    /// Log-ratio points are emitted row by row into the same output, so the
    /// file ends up holding every row.
    fn analyze_log_ratio(&self, frame: &Frame<'_>, output: &mut dyn Write) -> Result<AnalysisSummary> {
        let geometry = self.config.geometry;
        let mut timings = PipelineTimings::new();
        let mut scratch = self.scratch();
        let mut buffers = ColorBuffers::with_capacity(geometry.log_ratio_points_per_row());
        let mut points_written = 0;
        let mut skipped_non_finite = 0;

        let _span = tracing::info_span!(
            "log_ratio",
            rows = geometry.row_groups(),
            policy = ?self.config.non_finite
        )
        .entered();

        for index in 0..geometry.row_groups() {
            self.prepare_row(frame, index, &mut scratch, &mut timings);

            let timer = Timer::start("transform");
            buffers.clear();
            let skipped = log_ratio_row(
                &scratch.samples,
                index,
                geometry,
                self.config.non_finite,
                &mut buffers,
            )?;
            timings.record(timer);

            if skipped > 0 {
                debug!(row = index, skipped, "Dropped non-finite log-ratio samples");
            }
            skipped_non_finite += skipped;

            let timer = Timer::start("emit");
            self.writer.write_samples(&buffers, output)?;
            timings.record(timer);
            points_written += buffers.len();
        }

        Ok(AnalysisSummary {
            points_written,
            skipped_non_finite,
            timings,
        })
    }

    pub fn config(&self) -> &AnalysisConfig {
        &self.config
    }

    pub fn set_config(&mut self, config: AnalysisConfig) {
        self.config = config;
    }
}

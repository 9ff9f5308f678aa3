use std::io::Write;

use tracing::debug;

use crate::image_pipeline::common::error::{Result, VectorscopeError};
use crate::image_pipeline::emit::writer::SampleWriter;
use crate::image_pipeline::transform::types::ColorBuffers;

/// Writes one record per sample: three fixed-point fields with six decimal
/// places, separated by `" \t "` and terminated by `" \n"`.
///
/// The plotting scripts that consume these files split on whitespace, so the
/// padding around the tab is kept as-is.
pub struct TabSeparatedWriter;

impl SampleWriter for TabSeparatedWriter {
    fn write_samples(&self, samples: &ColorBuffers, output: &mut dyn Write) -> Result<()> {
        debug!("Writing {} records", samples.len());

        for sample in samples.iter() {
            writeln!(
                output,
                "{:.6} \t {:.6} \t {:.6} ",
                sample.first, sample.second, sample.third
            )
            .map_err(|e| VectorscopeError::OutputWriteError(e.to_string()))?;
        }

        Ok(())
    }
}

/// Parses one record written by [`TabSeparatedWriter`].
///
/// Returns `None` unless the line holds exactly three numeric fields.
pub fn parse_record(line: &str) -> Option<(f64, f64, f64)> {
    let mut fields = line.split_whitespace().map(str::parse::<f64>);
    let record = (
        fields.next()?.ok()?,
        fields.next()?.ok()?,
        fields.next()?.ok()?,
    );
    match fields.next() {
        None => Some(record),
        Some(_) => None,
    }
}

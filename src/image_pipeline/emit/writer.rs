use std::io::Write;

use crate::image_pipeline::common::error::Result;
use crate::image_pipeline::transform::types::ColorBuffers;

pub trait SampleWriter {
    fn write_samples(&self, samples: &ColorBuffers, output: &mut dyn Write) -> Result<()>;
}

use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;

use vectorscope_rs::cli::{self, Cli};
use vectorscope_rs::image_pipeline::{
    AnalysisMode, DevMemSource, FileSource, FrameSource, VectorscopePipeline,
};
use vectorscope_rs::logger::{self, info, warn};

fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            e.print().ok();
            return ExitCode::from(cli::parse_error_exit_code(&e));
        }
    };

    logger::init();

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("vectorscope: {e:#}");
            ExitCode::from(2)
        }
    }
}

fn run(cli: &Cli) -> Result<()> {
    let config = cli.analysis_config();

    info!("Starting vectorscope...");
    info!("Mode: {:?}", config.mode);
    info!(
        "Gamma correction: {}",
        match config.gamma {
            Some(gamma) => format!("enabled (gamma = {gamma})"),
            None => "disabled".to_string(),
        }
    );
    if config.mode == AnalysisMode::LogRatio {
        info!("Non-finite samples: {:?}", config.non_finite);
    }

    let source: Box<dyn FrameSource> = match &cli.file {
        Some(path) => Box::new(FileSource::open(path).context("cannot load frame dump")?),
        None => {
            let mapping = cli.mapping_config();
            Box::new(
                DevMemSource::open(&mapping.device, mapping.base, mapping.size)
                    .context("cannot map frame buffer")?,
            )
        }
    };

    let pipeline = VectorscopePipeline::new(config);
    let summary = pipeline
        .analyze_to_file(source.as_ref(), &cli.output)
        .with_context(|| format!("analysis of {} failed", source.describe()))?;

    if summary.skipped_non_finite > 0 {
        warn!(
            "{} non-finite log-ratio samples were dropped",
            summary.skipped_non_finite
        );
    }
    info!(
        "Wrote {} points to {}",
        summary.points_written,
        cli.output.display()
    );

    Ok(())
}

use std::io::Write;
use std::process::Command;

use vectorscope_rs::image_pipeline::{
    parse_record, AnalysisConfig, AnalysisMode, FileSource, FrameGeometry, MemorySource,
    NonFinitePolicy, VectorscopeError, VectorscopePipeline,
};

fn geometry() -> FrameGeometry {
    FrameGeometry::new(32, 8).unwrap()
}

fn write_frame(word: u64) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    for _ in 0..geometry().frame_words() {
        file.write_all(&word.to_le_bytes()).unwrap();
    }
    file.flush().unwrap();
    file
}

fn read_records(path: &std::path::Path) -> Vec<(f64, f64, f64)> {
    std::fs::read_to_string(path)
        .unwrap()
        .lines()
        .map(|line| parse_record(line).unwrap())
        .collect()
}

#[test]
fn uniform_frame_file_yields_constant_records() {
    let frame = write_frame(0x6464_6464_6464_6464);
    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("test.txt");

    let source = FileSource::open(frame.path()).unwrap();
    let pipeline = VectorscopePipeline::new(AnalysisConfig::builder().geometry(geometry()).build());
    let summary = pipeline.analyze_to_file(&source, &output).unwrap();

    let records = read_records(&output);
    assert_eq!(records.len(), geometry().luma_points());
    assert_eq!(summary.points_written, records.len());
    assert!(records.iter().all(|&r| r == records[0]));
    assert!((records[0].0 - 100.0).abs() < 1e-6);
    assert!(records[0].1.abs() < 1e-6);
    assert!(records[0].2.abs() < 1e-6);
}

#[test]
fn output_is_truncated_on_open() {
    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("test.txt");
    std::fs::write(&output, "stale\n".repeat(10_000)).unwrap();

    let source = MemorySource::filled(geometry(), 0);
    let pipeline = VectorscopePipeline::new(AnalysisConfig::builder().geometry(geometry()).build());
    pipeline.analyze_to_file(&source, &output).unwrap();

    let text = std::fs::read_to_string(&output).unwrap();
    assert!(!text.contains("stale"));
    assert_eq!(text.lines().count(), geometry().luma_points());
}

#[test]
fn short_frame_keeps_previous_output() {
    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("test.txt");
    let previous = "100.000000 \t 0.000000 \t 0.000000 \n";
    std::fs::write(&output, previous).unwrap();

    let source = MemorySource::from_words(&[0x6464_6464_6464_6464; 3]);
    let pipeline = VectorscopePipeline::new(AnalysisConfig::builder().geometry(geometry()).build());
    let result = pipeline.analyze_to_file(&source, &output);

    assert!(matches!(result, Err(VectorscopeError::InvalidFrameSize { .. })));
    assert_eq!(std::fs::read_to_string(&output).unwrap(), previous);
    assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 1);
}

#[test]
fn failed_log_ratio_run_leaves_no_partial_output() {
    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("ratios.txt");

    // bright first row group, dark from the second on
    let mut words = vec![0u64; geometry().frame_words()];
    words[..geometry().words_per_row_group()].fill(0x6464_6464_6464_6464);
    let source = MemorySource::from_words(&words);
    let config = AnalysisConfig::builder()
        .geometry(geometry())
        .mode(AnalysisMode::LogRatio)
        .non_finite(NonFinitePolicy::Fail)
        .build();
    let result = VectorscopePipeline::new(config).analyze_to_file(&source, &output);

    assert!(matches!(
        result,
        Err(VectorscopeError::MalformedSampleError { row: 1, index: 0 })
    ));
    assert!(!output.exists());
    assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
}

#[test]
fn log_ratio_file_keeps_every_row() {
    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("ratios.txt");

    let source = MemorySource::filled(geometry(), 0x6464_6464_6464_6464);
    let config = AnalysisConfig::builder()
        .geometry(geometry())
        .mode(AnalysisMode::LogRatio)
        .build();
    VectorscopePipeline::new(config)
        .analyze_to_file(&source, &output)
        .unwrap();

    let records = read_records(&output);
    assert_eq!(
        records.len(),
        geometry().row_groups() * geometry().log_ratio_points_per_row()
    );
    assert!(records.iter().all(|&(_, x, y)| x == 0.0 && y == 0.0));
}

#[test]
fn unwritable_output_is_reported() {
    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("missing").join("test.txt");

    let source = MemorySource::filled(geometry(), 0);
    let pipeline = VectorscopePipeline::new(AnalysisConfig::builder().geometry(geometry()).build());
    let result = pipeline.analyze_to_file(&source, &output);

    match result {
        Err(VectorscopeError::OutputUnavailable { path, .. }) => assert_eq!(path, output),
        other => panic!("expected OutputUnavailable, got {other:?}"),
    }
}

fn vectorscope() -> Command {
    Command::new(env!("CARGO_BIN_EXE_vectorscope"))
}

#[test]
fn help_exits_zero() {
    let status = vectorscope().arg("-h").output().unwrap().status;
    assert_eq!(status.code(), Some(0));
}

#[test]
fn unknown_flag_exits_one_with_usage() {
    let output = vectorscope().arg("-x").output().unwrap();
    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("Usage"));
}

#[test]
fn missing_device_exits_two() {
    let dir = tempfile::tempdir().unwrap();
    let device = dir.path().join("mem");

    let output = vectorscope()
        .arg("-D")
        .arg(&device)
        .arg(dir.path().join("out.txt"))
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(2));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains(&device.display().to_string()), "{stderr}");
}

#[test]
fn short_frame_dump_exits_two() {
    let dir = tempfile::tempdir().unwrap();
    let dump = dir.path().join("frame.raw12");
    std::fs::write(&dump, [0u8; 64]).unwrap();

    let output = vectorscope()
        .arg("-f")
        .arg(&dump)
        .arg(dir.path().join("out.txt"))
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(2));
    assert!(String::from_utf8_lossy(&output.stderr).contains("Frame too small"));
}

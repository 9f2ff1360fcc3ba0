//! Integration tests for the merge pipeline with real files

use logmerge::input::{Location, remove_inputs};
use logmerge::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::{TempDir, tempdir};

const MINUTE_REGEX: &str = r"^(\d{4}-\d{2}-\d{2} \d{2}:\d{2})";
const MINUTE_FORMAT: &str = "%Y-%m-%d %H:%M";

fn minute_pattern() -> TimestampPattern {
    TimestampPattern::new(MINUTE_REGEX, MINUTE_FORMAT).unwrap()
}

fn write_file(dir: &Path, name: &str, content: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, content).unwrap();
    path
}

/// Two hosts whose logs overlap in time.
fn two_hosts() -> TempDir {
    let dir = tempdir().unwrap();
    write_file(dir.path(), "1-app.log", "2024-01-02 10:00 hello\n");
    write_file(
        dir.path(),
        "2-app.log",
        "2024-01-01 09:00 world\n  detail line\n",
    );
    dir
}

#[test]
fn test_end_to_end_two_files() {
    let dir = two_hosts();
    let files = discover_inputs(dir.path(), "app.log").unwrap();
    let source = LineSource::from_files(&files).unwrap();

    let (merged, stats) = merge_lines(source.lines(), &minute_pattern(), &MergeConfig::new()).unwrap();

    assert_eq!(
        merged,
        ["2024-01-01 09:00 world", "  detail line", "2024-01-02 10:00 hello"]
    );
    assert_eq!(stats.records, 2);
    assert_eq!(stats.lines, 3);
}

#[test]
fn test_mode_driven_pipeline() {
    let dir = two_hosts();
    let mode = Mode::new("app", MINUTE_REGEX, MINUTE_FORMAT)
        .with_file_pattern("app.log*")
        .with_export_path(dir.path())
        .with_export_filename("merged.log");

    let files = discover_inputs(&mode.export_path, &mode.file_pattern).unwrap();
    let source = LineSource::from_files(&files).unwrap();
    let (stats, output) = process_and_write(
        source.lines(),
        &mode.timestamp_pattern().unwrap(),
        &MergeConfig::new(),
        mode.export_file(),
    )
    .unwrap();

    assert_eq!(stats.records, 2);
    assert_eq!(output.lines, 3);
    assert_eq!(output.bytes, fs::metadata(mode.export_file()).unwrap().len());

    // The merged file is not itself an input on the next run.
    let again = discover_inputs(&mode.export_path, &mode.file_pattern).unwrap();
    assert_eq!(again.len(), 2);
}

#[test]
fn test_config_file_round_trip() {
    let dir = tempdir().unwrap();
    let path = write_file(
        dir.path(),
        "config.json",
        r#"{"modes": [{"name": "app", "date_regex": "^(\\d{4}-\\d{2}-\\d{2} \\d{2}:\\d{2})", "date_format": "%Y-%m-%d %H:%M"}]}"#,
    );

    let config = Config::load(&path).unwrap();
    let pattern = config.mode("app").unwrap().timestamp_pattern().unwrap();
    assert!(pattern.is_record_start("2024-01-01 09:00 x"));
}

#[test]
fn test_ties_across_files_follow_file_order() {
    let dir = tempdir().unwrap();
    write_file(dir.path(), "2-app.log", "2024-01-01 09:00 from host 2\n");
    write_file(dir.path(), "1-app.log", "2024-01-01 09:00 from host 1\n");
    write_file(dir.path(), "10-app.log", "2024-01-01 09:00 from host 10\n");

    let files = discover_inputs(dir.path(), "app.log").unwrap();
    let source = LineSource::from_files(&files).unwrap();
    let (merged, _) = merge_lines(source.lines(), &minute_pattern(), &MergeConfig::new()).unwrap();

    assert_eq!(
        merged,
        [
            "2024-01-01 09:00 from host 1",
            "2024-01-01 09:00 from host 2",
            "2024-01-01 09:00 from host 10",
        ]
    );
}

#[test]
fn test_missing_final_newline_does_not_join_files() {
    let dir = tempdir().unwrap();
    let a = write_file(dir.path(), "1-app.log", "2024-01-02 10:00 a");
    let b = write_file(dir.path(), "2-app.log", "2024-01-01 09:00 b\n");

    let source = LineSource::from_files(&[a, b]).unwrap();
    let (merged, _) = merge_lines(source.lines(), &minute_pattern(), &MergeConfig::new()).unwrap();
    assert_eq!(merged, ["2024-01-01 09:00 b", "2024-01-02 10:00 a"]);
}

#[test]
fn test_continuation_at_file_start_joins_previous_record() {
    // Files are concatenated before chunking: untimestamped lines at the top
    // of a later file continue the last record of the previous file.
    let dir = tempdir().unwrap();
    let a = write_file(dir.path(), "1-app.log", "2024-01-02 10:00 a\n");
    let b = write_file(dir.path(), "2-app.log", "  orphan\n2024-01-01 09:00 b\n");

    let source = LineSource::from_files(&[a, b]).unwrap();
    let (merged, stats) = merge_lines(source.lines(), &minute_pattern(), &MergeConfig::new()).unwrap();
    assert_eq!(stats.records, 2);
    assert_eq!(merged, ["2024-01-01 09:00 b", "2024-01-02 10:00 a", "  orphan"]);
}

#[test]
fn test_malformed_record_located_in_file() {
    let dir = tempdir().unwrap();
    let a = write_file(dir.path(), "1-app.log", "2024-01-01 09:00 a\n  x\n");
    let b = write_file(dir.path(), "2-app.log", "2024-01-01 10:00 b\n2024-02-30 10:00 c\n");

    let source = LineSource::from_files(&[&a, &b]).unwrap();
    let err = merge_lines(source.lines(), &minute_pattern(), &MergeConfig::new()).unwrap_err();

    assert!(err.is_malformed_record());
    let location = err.line_index().and_then(|i| source.locate(i)).unwrap();
    assert_eq!(location, Location { path: b, line: 2 });
}

#[test]
fn test_first_record_without_timestamp_fails() {
    let mut source = LineSource::new();
    source.push_lines("1-app.log", ["not a date at all"]);

    let err = merge_lines(source.lines(), &minute_pattern(), &MergeConfig::new()).unwrap_err();
    assert!(err.is_malformed_record());
    assert!(err.to_string().contains("not a date at all"));
}

#[test]
fn test_records_from_source_match_pipeline() {
    let dir = two_hosts();
    let files = discover_inputs(dir.path(), "app.log").unwrap();
    let source = LineSource::from_files(&files).unwrap();
    let pattern = minute_pattern();

    let records: Vec<Record> = source.records(&pattern).collect();
    let merged = flatten(merge(records, &pattern, &MergeConfig::sequential()).unwrap());
    let (via_pipeline, _) = merge_lines(source.lines(), &pattern, &MergeConfig::sequential()).unwrap();

    assert_eq!(merged, via_pipeline);
}

#[cfg(feature = "gzip")]
#[test]
fn test_gzip_and_plain_inputs_mixed() {
    use flate2::Compression;
    use flate2::write::GzEncoder;
    use std::io::Write;

    let dir = tempdir().unwrap();
    write_file(dir.path(), "1-app.log", "2024-01-02 10:00 plain\n");

    let gz_path = dir.path().join("2-app.log.1.gz");
    let mut encoder = GzEncoder::new(fs::File::create(&gz_path).unwrap(), Compression::default());
    encoder
        .write_all(b"2024-01-01 09:00 compressed\n  trace\n")
        .unwrap();
    encoder.finish().unwrap();

    let files = discover_inputs(dir.path(), "app.log*").unwrap();
    assert_eq!(files.len(), 2);

    let source = LineSource::from_files(&files).unwrap();
    let (merged, _) = merge_lines(source.lines(), &minute_pattern(), &MergeConfig::new()).unwrap();
    assert_eq!(
        merged,
        ["2024-01-01 09:00 compressed", "  trace", "2024-01-02 10:00 plain"]
    );
}

#[test]
fn test_remove_inputs_after_write() {
    let dir = two_hosts();
    let files = discover_inputs(dir.path(), "app.log").unwrap();
    let source = LineSource::from_files(&files).unwrap();

    process_and_write(
        source.lines(),
        &minute_pattern(),
        &MergeConfig::new(),
        dir.path().join("merged.log"),
    )
    .unwrap();
    remove_inputs(&files).unwrap();

    assert!(discover_inputs(dir.path(), "app.log").unwrap_err().is_empty_input());
    assert!(dir.path().join("merged.log").exists());
}

#[test]
fn test_apache_style_timestamps_with_offsets() {
    let pattern = TimestampPattern::new(
        r"^\S+ \S+ \S+ \[([^\]]+)\]",
        "%d/%b/%Y:%H:%M:%S %z",
    )
    .unwrap();

    let mut source = LineSource::new();
    source.push_lines(
        "1-access.log",
        [r#"10.0.0.1 - - [10/Oct/2023:13:55:36 -0700] "GET / HTTP/1.1" 200"#],
    );
    source.push_lines(
        "2-access.log",
        [r#"10.0.0.2 - - [10/Oct/2023:22:00:00 +0200] "GET /a HTTP/1.1" 200"#],
    );

    // 22:00 +0200 is 20:00 UTC, before 13:55 -0700 (20:55 UTC)
    let (merged, _) = merge_lines(source.lines(), &pattern, &MergeConfig::new()).unwrap();
    assert!(merged[0].starts_with("10.0.0.2"));
}

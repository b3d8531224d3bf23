use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Command, Output, Stdio};

use flate2::Compression;
use flate2::write::GzEncoder;
use pretty_assertions::assert_eq;
use rstest::*;

#[fixture]
fn path_to_data() -> PathBuf {
    std::env::current_dir()
        .unwrap()
        .join("../tests/data/density")
}

fn densaround(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_densaround"))
        .arg("--no-progress")
        .args(args)
        .output()
        .expect("failed to run densaround")
}

fn as_str(path: &Path) -> &str {
    path.to_str().unwrap()
}

#[rstest]
fn test_counts(path_to_data: PathBuf) {
    let tempdir = tempfile::tempdir().unwrap();
    let out = tempdir.path().join("out.csv");

    let output = densaround(&[
        "10",
        "3",
        as_str(&path_to_data.join("objects.csv")),
        as_str(&path_to_data.join("events.csv")),
        as_str(&out),
    ]);
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));

    assert_eq!(
        std::fs::read_to_string(&out).unwrap(),
        std::fs::read_to_string(path_to_data.join("expected_counts.csv")).unwrap()
    );
}

#[rstest]
fn test_counts_with_density_column(path_to_data: PathBuf) {
    let tempdir = tempfile::tempdir().unwrap();
    let out = tempdir.path().join("out.csv");

    let output = densaround(&[
        "--density",
        "40",
        "180",
        "10",
        "3",
        as_str(&path_to_data.join("objects.csv")),
        as_str(&path_to_data.join("events.csv")),
        as_str(&out),
    ]);
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));

    assert_eq!(
        std::fs::read_to_string(&out).unwrap(),
        std::fs::read_to_string(path_to_data.join("expected_counts_density.csv")).unwrap()
    );
}

#[rstest]
fn test_separate_density_output(path_to_data: PathBuf) {
    let tempdir = tempfile::tempdir().unwrap();
    let out = tempdir.path().join("out.csv");
    let denom = tempdir.path().join("denom.csv");

    let output = densaround(&[
        "--density",
        "40",
        "180",
        "--density-out",
        as_str(&denom),
        "10",
        "3",
        as_str(&path_to_data.join("objects.csv")),
        as_str(&path_to_data.join("events.csv")),
        as_str(&out),
    ]);
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));

    assert_eq!(
        std::fs::read_to_string(&out).unwrap(),
        std::fs::read_to_string(path_to_data.join("expected_counts.csv")).unwrap()
    );
    assert_eq!(
        std::fs::read_to_string(&denom).unwrap(),
        "-25.000000,1.000000\n-15.000000,1.000000\n-5.000000,2.000000\n0,50.000000\n\
         5.000000,2.000000\n15.000000,2.000000\n25.000000,2.000000\n"
    );
}

#[rstest]
fn test_region_warning(path_to_data: PathBuf) {
    let tempdir = tempfile::tempdir().unwrap();
    let out = tempdir.path().join("out.csv");

    let output = densaround(&[
        "--density",
        "60",
        "180",
        "10",
        "3",
        as_str(&path_to_data.join("objects.csv")),
        as_str(&path_to_data.join("events.csv")),
        as_str(&out),
    ]);
    assert!(output.status.success());

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("object starts before region (50 < 60)"), "{stderr}");
}

#[rstest]
fn test_gzip_input(path_to_data: PathBuf) {
    let tempdir = tempfile::tempdir().unwrap();
    let events_gz = tempdir.path().join("events.csv.gz");
    let out = tempdir.path().join("out.csv");

    let mut encoder = GzEncoder::new(File::create(&events_gz).unwrap(), Compression::default());
    encoder
        .write_all(&std::fs::read(path_to_data.join("events.csv")).unwrap())
        .unwrap();
    encoder.finish().unwrap();

    let output = densaround(&[
        "10",
        "3",
        as_str(&path_to_data.join("objects.csv")),
        as_str(&events_gz),
        as_str(&out),
    ]);
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));

    assert_eq!(
        std::fs::read_to_string(&out).unwrap(),
        std::fs::read_to_string(path_to_data.join("expected_counts.csv")).unwrap()
    );
}

#[rstest]
fn test_shared_stdin_to_stdout(path_to_data: PathBuf) {
    let mut child = Command::new(env!("CARGO_BIN_EXE_densaround"))
        .args(["--no-progress", "10", "3", "-", "-", "-"])
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .unwrap();

    let events = std::fs::read_to_string(path_to_data.join("events.csv")).unwrap();
    let objects = std::fs::read_to_string(path_to_data.join("objects.csv")).unwrap();
    {
        let mut stdin = child.stdin.take().unwrap();
        write!(stdin, "{}\n\n{}", events, objects).unwrap();
    }

    let output = child.wait_with_output().unwrap();
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));
    assert_eq!(
        String::from_utf8(output.stdout).unwrap(),
        std::fs::read_to_string(path_to_data.join("expected_counts.csv")).unwrap()
    );
}

#[rstest]
fn test_malformed_events_leave_no_output(path_to_data: PathBuf) {
    let tempdir = tempfile::tempdir().unwrap();
    let out = tempdir.path().join("out.csv");

    let output = densaround(&[
        "10",
        "3",
        as_str(&path_to_data.join("objects.csv")),
        as_str(&path_to_data.join("events_malformed.csv")),
        as_str(&out),
    ]);
    assert!(!output.status.success());

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Error on line: 3"), "{stderr}");
    assert!(!out.exists());
}

#[rstest]
#[case(&["0", "3"])]
#[case(&["10", "0"])]
#[case(&["--density", "100", "100", "10", "3"])]
fn test_invalid_arguments(path_to_data: PathBuf, #[case] leading: &[&str]) {
    let tempdir = tempfile::tempdir().unwrap();
    let out = tempdir.path().join("out.csv");

    let objects = path_to_data.join("objects.csv");
    let events = path_to_data.join("events.csv");
    let mut args = leading.to_vec();
    args.extend([as_str(&objects), as_str(&events), as_str(&out)]);

    let output = densaround(&args);
    assert!(!output.status.success());
    assert!(!out.exists());
}

#[rstest]
fn test_summary(path_to_data: PathBuf) {
    let tempdir = tempfile::tempdir().unwrap();
    let out = tempdir.path().join("out.csv");
    let summary = tempdir.path().join("summary.json");

    let output = densaround(&[
        "--summary",
        as_str(&summary),
        "10",
        "3",
        as_str(&path_to_data.join("objects.csv")),
        as_str(&path_to_data.join("events.csv")),
        as_str(&out),
    ]);
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));

    let summary = std::fs::read_to_string(&summary).unwrap();
    assert!(summary.contains("\"events\": 7"));
    assert!(summary.contains("\"events_overlapping_objects\": 2"));
    assert!(!summary.contains("objects_in_region"));
}

#[rstest]
fn test_unwritable_summary_leaves_no_output(path_to_data: PathBuf) {
    let tempdir = tempfile::tempdir().unwrap();
    let out = tempdir.path().join("out.csv");
    let blocker = tempdir.path().join("blocker");
    std::fs::write(&blocker, "").unwrap();
    let summary = blocker.join("summary.json");

    let output = densaround(&[
        "--summary",
        as_str(&summary),
        "10",
        "3",
        as_str(&path_to_data.join("objects.csv")),
        as_str(&path_to_data.join("events.csv")),
        as_str(&out),
    ]);
    assert!(!output.status.success());
    assert!(!out.exists());
}

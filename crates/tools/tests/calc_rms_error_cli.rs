use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

const ROW: &str = "1.0 0 0 0 0 10 0 10 0\n";

fn write_text(dir: &Path, name: &str, s: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, s).expect("write plot file");
    path
}

fn cmd() -> Command {
    let mut cmd = Command::cargo_bin("calc_rms_error").unwrap();
    cmd.env_remove("RUST_LOG");
    cmd
}

#[test]
fn identical_files_pass() {
    let tmp = tempfile::tempdir().unwrap();
    let reference = write_text(tmp.path(), "ref.dat", ROW);
    let plot = write_text(tmp.path(), "new.dat", ROW);

    cmd()
        .arg(&reference)
        .arg(&plot)
        .assert()
        .code(0)
        .stdout(predicate::str::contains(
            "    Phi-Phi Error (Rel. Error) =          0 (         0) | RMS Error at 1 GHz",
        ))
        .stdout(predicate::str::contains(
            "Theta-Theta Error (Rel. Error) =          0 (         0) | 100% inc/scatter coverage",
        ));
}

#[test]
fn wrong_argument_count_is_usage_error() {
    cmd().assert().code(1);

    let tmp = tempfile::tempdir().unwrap();
    let reference = write_text(tmp.path(), "ref.dat", ROW);
    cmd().arg(&reference).assert().code(1);
    cmd().arg(&reference).arg(&reference).arg(&reference).assert().code(1);
}

#[test]
fn help_exits_zero() {
    cmd().arg("--help").assert().success().stdout(predicate::str::contains("calc_rms_error"));
    cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn unknown_flag_prints_usage() {
    cmd()
        .args(["--bogus", "ref.dat", "new.dat"])
        .assert()
        .code(1)
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("Usage:"));
}

#[test]
fn missing_file_is_file_error() {
    let tmp = tempfile::tempdir().unwrap();
    let plot = write_text(tmp.path(), "new.dat", ROW);

    cmd()
        .arg(tmp.path().join("missing.dat"))
        .arg(&plot)
        .assert()
        .code(125)
        .stderr(predicate::str::contains("error opening reference plot file"));

    cmd()
        .arg(&plot)
        .arg(tmp.path().join("missing.dat"))
        .assert()
        .code(125)
        .stderr(predicate::str::contains("error opening plot file"));
}

#[test]
fn empty_reference_is_file_error() {
    let tmp = tempfile::tempdir().unwrap();
    let reference = write_text(tmp.path(), "ref.dat", "# freq theta phi\n# nothing here\n");
    let plot = write_text(tmp.path(), "new.dat", ROW);

    cmd()
        .arg(&reference)
        .arg(&plot)
        .assert()
        .code(125)
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("no data found in reference plot file"));
}

#[test]
fn malformed_number_is_file_error() {
    let tmp = tempfile::tempdir().unwrap();
    let reference = write_text(tmp.path(), "ref.dat", ROW);
    let plot = write_text(tmp.path(), "new.dat", &format!("{ROW}1.0 0 0 0 0 1O 0 10 0\n"));

    cmd()
        .arg(&reference)
        .arg(&plot)
        .assert()
        .code(125)
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("line 2: `1O` is not a number"));
}

#[test]
fn non_finite_value_is_file_error() {
    let tmp = tempfile::tempdir().unwrap();
    let reference = write_text(tmp.path(), "ref.dat", ROW);
    let plot = write_text(tmp.path(), "new.dat", "1.0 0 0 0 0 nan 0 10 0\n");

    cmd()
        .arg(&reference)
        .arg(&plot)
        .assert()
        .code(125)
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("`nan` is not a number"));

    let reference = write_text(tmp.path(), "ref_inf.dat", "1.0 0 0 0 0 10 0 inf 0\n");
    cmd().arg(&reference).arg(&plot).assert().code(125);
}

#[test]
fn unmatched_angle_fails_with_zero_coverage() {
    let tmp = tempfile::tempdir().unwrap();
    let reference = write_text(tmp.path(), "ref.dat", ROW);
    let plot = write_text(tmp.path(), "new.dat", "2.0 0 0 10 0 10 0\n");

    cmd()
        .arg(&reference)
        .arg(&plot)
        .assert()
        .code(122)
        .stdout(predicate::str::contains("       N/A (       N/A) | RMS Error at 2 GHz"))
        .stdout(predicate::str::contains("| 0% inc/scatter coverage"));
}

#[test]
fn large_phase_error_fails() {
    let tmp = tempfile::tempdir().unwrap();
    let reference = write_text(tmp.path(), "ref.dat", "1 0 0 10 0 10 0\n1 10 0 10 0 10 0\n");
    let plot = write_text(tmp.path(), "new.dat", "1 0 0 10 0 10 5\n1 10 0 10 0 10 5\n");

    cmd().arg(&reference).arg(&plot).assert().code(122);
}

#[test]
fn shape_warning_is_not_fatal() {
    let tmp = tempfile::tempdir().unwrap();
    let reference = write_text(tmp.path(), "ref.dat", ROW);
    let plot = write_text(tmp.path(), "new.dat", &format!("1 2 3\n{ROW}\n"));

    cmd()
        .arg(&reference)
        .arg(&plot)
        .assert()
        .code(0)
        .stderr(predicate::str::contains("expected 7 or 9 values, found 3"));
}

#[test]
fn multiple_frequencies_are_reported_in_order() {
    let tmp = tempfile::tempdir().unwrap();
    let data = "# freq theta phi pp_dbsm pp_phase tt_dbsm tt_phase\n\
                3 0 0 -5 10 -6 20\n\
                1 0 0 -5 10 -6 20\n\
                2 0 0 -5 10 -6 20\n";
    let reference = write_text(tmp.path(), "ref.dat", data);
    let plot = write_text(tmp.path(), "new.dat", data);

    let out = cmd().arg(&reference).arg(&plot).output().unwrap();
    assert_eq!(out.status.code(), Some(0));
    let stdout = String::from_utf8(out.stdout).unwrap();
    let p1 = stdout.find("RMS Error at 1 GHz").unwrap();
    let p2 = stdout.find("RMS Error at 2 GHz").unwrap();
    let p3 = stdout.find("RMS Error at 3 GHz").unwrap();
    assert!(p1 < p2 && p2 < p3);
    assert_eq!(stdout.matches("+------------------------------").count(), 4);
}

#[test]
fn gzip_and_stdin_inputs() {
    let tmp = tempfile::tempdir().unwrap();
    let reference = tmp.path().join("ref.dat.gz");
    let f = fs::File::create(&reference).unwrap();
    let mut enc = flate2::write::GzEncoder::new(f, flate2::Compression::default());
    enc.write_all(ROW.as_bytes()).unwrap();
    enc.finish().unwrap();

    cmd().arg(&reference).arg("-").write_stdin(ROW).assert().code(0);
}

#[test]
fn both_stdin_is_usage_error() {
    cmd().args(["-", "-"]).write_stdin(ROW).assert().code(1);
}

#[test]
fn json_summary_and_quiet() {
    let tmp = tempfile::tempdir().unwrap();
    let reference = write_text(tmp.path(), "ref.dat", ROW);
    let plot = write_text(tmp.path(), "new.dat", ROW);
    let json = tmp.path().join("summary.json");

    cmd()
        .arg(&reference)
        .arg(&plot)
        .arg("--json")
        .arg(&json)
        .arg("--quiet")
        .assert()
        .code(0)
        .stdout(predicate::str::is_empty());

    let v: serde_json::Value = serde_json::from_slice(&fs::read(&json).unwrap()).unwrap();
    assert_eq!(v["verdict"], "PASS");
    assert_eq!(v["max_error"], 0.0);
    assert_eq!(v["candidate"]["records"], 1);
    assert_eq!(v["frequencies"][0]["coverage_percent"], 100.0);
}

use std::fs;
use std::path::{Path, PathBuf};

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

const CLOUD: &str = "\
x,y,z,opacity,red:uint8
0,0,0,0.5,10
1,0,0,0.25,20
0,2,0,nan,30
5,5,5,1.0,40
";

fn fixture(dir: &TempDir) -> PathBuf {
    let path = dir.path().join("cloud.csv");
    fs::write(&path, CLOUD).unwrap();
    path
}

fn splatstat() -> Command {
    Command::cargo_bin("splatstat").unwrap()
}

#[test]
fn summary_terminal() {
    let dir = TempDir::new().unwrap();
    let path = fixture(&dir);

    splatstat()
        .args(["summary", path.to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains("4 rows, 5 columns"))
        .stdout(predicate::str::contains("opacity"))
        .stdout(predicate::str::contains("histogram"));
}

#[test]
fn summary_json_with_drop() {
    let dir = TempDir::new().unwrap();
    let path = fixture(&dir);

    let output = splatstat()
        .args(["summary", path.to_str().unwrap(), "--format", "json", "--bins", "4", "--drop", "red"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["row_count"], 4);
    assert_eq!(value["version"], 1);
    assert!(value["columns"].get("red").is_none());
    assert_eq!(value["columns"]["opacity"]["nan_count"], 1);
    assert_eq!(value["columns"]["x"]["max"], 5.0);
    assert_eq!(
        value["columns"]["x"]["histogram"].as_str().unwrap().chars().count(),
        4
    );
}

#[test]
fn nearest_reports_row() {
    let dir = TempDir::new().unwrap();
    let path = fixture(&dir);

    splatstat()
        .args(["nearest", path.to_str().unwrap(), "--point", "0.9,0.1,0"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Nearest: row 1"))
        .stdout(predicate::str::contains("red: 20"));
}

#[test]
fn nearest_with_exclusions_and_negative_point() {
    let dir = TempDir::new().unwrap();
    let path = fixture(&dir);

    splatstat()
        .args([
            "nearest",
            path.to_str().unwrap(),
            "--point=-1,0,0",
            "--exclude",
            "0,1",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Nearest: row 2"));

    splatstat()
        .args([
            "nearest",
            path.to_str().unwrap(),
            "--point",
            "0,0,0",
            "--exclude",
            "0,1,2,3",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Nearest: none"));
}

#[test]
fn nearest_dimension_mismatch_fails() {
    let dir = TempDir::new().unwrap();
    let path = fixture(&dir);

    splatstat()
        .args(["nearest", path.to_str().unwrap(), "--point", "1,2"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("dimension mismatch"));
}

#[test]
fn bounds_over_subset() {
    let dir = TempDir::new().unwrap();
    let path = fixture(&dir);

    splatstat()
        .args(["bounds", path.to_str().unwrap(), "--rows", "0,1,2"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Bounds over 3 rows"))
        .stdout(predicate::str::contains("y: [0, 2] extent 2"))
        .stdout(predicate::str::contains("Largest axis: y"));
}

#[test]
fn bounds_with_all_nan_axis_still_reports_rows() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("holes.csv");
    fs::write(&path, "x,y\n1,nan\n4,nan\n").unwrap();

    splatstat()
        .args(["bounds", path.to_str().unwrap(), "--columns", "x,y"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Bounds over 2 rows"))
        .stdout(predicate::str::contains("x: [1, 4] extent 3"))
        .stdout(predicate::str::contains("y: no values (all NaN)"))
        .stdout(predicate::str::contains("Largest axis: x (extent 3)"))
        .stdout(predicate::str::contains("no rows").not());
}

#[test]
fn bounds_unknown_column_fails() {
    let dir = TempDir::new().unwrap();
    let path = fixture(&dir);

    splatstat()
        .args(["bounds", path.to_str().unwrap(), "--columns", "x,w"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("column not found: w"));
}

#[test]
fn export_round_trips() {
    let dir = TempDir::new().unwrap();
    let path = fixture(&dir);
    let out = dir.path().join("out.csv");

    splatstat()
        .args([
            "export",
            path.to_str().unwrap(),
            "--output",
            out.to_str().unwrap(),
            "--drop",
            "opacity",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Wrote 4 rows x 4 columns"));

    let written = fs::read_to_string(&out).unwrap();
    assert_eq!(written.lines().next(), Some("x,y,z,red"));
    assert_eq!(written.lines().nth(4), Some("5,5,5,40"));
}

#[test]
fn missing_file_fails() {
    splatstat()
        .args(["summary", Path::new("does-not-exist.csv").to_str().unwrap()])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Failed to load"));
}

#[test]
fn unsupported_extension_fails() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("cloud.ply");
    fs::write(&path, "ply\n").unwrap();

    splatstat()
        .args(["summary", path.to_str().unwrap()])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Unsupported file format"));
}

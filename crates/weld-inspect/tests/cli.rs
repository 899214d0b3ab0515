use std::fs;
use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use weld_inspect::InspectConfig;

fn write_frame(path: &Path, porous: bool) {
    let mut img = image::GrayImage::from_pixel(640, 480, image::Luma([255]));
    if porous {
        for y in 200..240 {
            for x in 200..260 {
                img.put_pixel(x, y, image::Luma([0]));
            }
        }
    }
    img.save(path).unwrap();
}

fn weld_inspect() -> Command {
    Command::cargo_bin("weld-inspect").unwrap()
}

#[test]
fn init_config_writes_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("station.json");

    weld_inspect()
        .args(["init-config", "--out"])
        .arg(&out)
        .assert()
        .success()
        .stdout(predicate::str::contains("station.json"));

    let cfg = InspectConfig::load_json(&out).unwrap();
    assert_eq!(cfg, InspectConfig::default());
}

#[test]
fn inspect_clean_frame_exits_zero() {
    let dir = tempfile::tempdir().unwrap();
    let image = dir.path().join("clean.png");
    write_frame(&image, false);

    weld_inspect()
        .arg("inspect")
        .arg("--image")
        .arg(&image)
        .assert()
        .code(0)
        .stdout("Good\t-\t0.00\n");
}

#[test]
fn inspect_porous_frame_exits_two() {
    let dir = tempfile::tempdir().unwrap();
    let image = dir.path().join("porous.png");
    write_frame(&image, true);

    // 40 x 60 black pixels in a 290 x 100 ROI.
    weld_inspect()
        .arg("inspect")
        .arg("--image")
        .arg(&image)
        .assert()
        .code(2)
        .stdout("Bad\t8.28%\t8.28\n");
}

#[test]
fn verbose_flag_enables_debug_logs() {
    let dir = tempfile::tempdir().unwrap();
    let image = dir.path().join("clean.png");
    write_frame(&image, false);

    weld_inspect()
        .arg("inspect")
        .arg("--image")
        .arg(&image)
        .env_remove("RUST_LOG")
        .assert()
        .code(0)
        .stderr(predicate::str::contains("DEBUG").not());

    weld_inspect()
        .args(["--verbose", "inspect", "--image"])
        .arg(&image)
        .env_remove("RUST_LOG")
        .assert()
        .code(0)
        .stderr(predicate::str::contains("DEBUG"))
        .stderr(predicate::str::contains("hole detector"));
}

#[test]
fn inspect_missing_image_fails() {
    let dir = tempfile::tempdir().unwrap();
    weld_inspect()
        .arg("inspect")
        .arg("--image")
        .arg(dir.path().join("absent.png"))
        .assert()
        .code(1)
        .stderr(predicate::str::starts_with("Error:"));
}

#[test]
fn run_reads_triggers_from_stdin() {
    let dir = tempfile::tempdir().unwrap();
    let camera = dir.path().join("camera1.png");
    write_frame(&camera, true);
    let log_dir = dir.path().join("log");
    let snapshot_dir = dir.path().join("temp");

    weld_inspect()
        .arg("run")
        .arg("--camera1")
        .arg(&camera)
        .arg("--log-dir")
        .arg(&log_dir)
        .arg("--snapshot-dir")
        .arg(&snapshot_dir)
        .write_stdin("l\nr\nx\nq\nl\n")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "inspections=2 good=0 bad=1 undefined=1 ignored=1 aborted=0",
        ));

    let logs: Vec<_> = fs::read_dir(&log_dir).unwrap().collect();
    assert_eq!(logs.len(), 1);
    let text = fs::read_to_string(logs[0].as_ref().unwrap().path()).unwrap();
    let lines: Vec<_> = text.lines().collect();
    assert_eq!(lines.len(), 2);
    assert!(lines[0].ends_with("\t0\tCamera 1\tBad\t8.28%"));
    assert!(lines[1].ends_with("\t1\tCamera 2\tN/A\tCamera undefined"));

    let snapshots: Vec<_> = fs::read_dir(&snapshot_dir)
        .unwrap()
        .map(|e| e.unwrap().path())
        .collect();
    assert_eq!(snapshots.len(), 1);
    assert_eq!(
        snapshots[0].extension().and_then(|e| e.to_str()),
        Some("jpg")
    );
}

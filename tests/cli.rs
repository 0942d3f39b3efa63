use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::process::Command;
use tempfile::tempdir;

#[test]
fn cli_shows_help() {
    let mut cmd = Command::cargo_bin("figlayout").unwrap();
    cmd.arg("--help");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("figlayout"))
        .stdout(predicate::str::contains("layout"));
}

#[test]
fn layout_prints_geometry() {
    let mut cmd = Command::cargo_bin("figlayout").unwrap();
    cmd.args([
        "layout",
        "--width",
        "400",
        "--height",
        "500",
        "--min-aspect",
        "2",
    ]);
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("width=400 height=200 x=0 y=150"));
}

#[test]
fn layout_with_paddings_and_report() {
    let dir = tempdir().unwrap();
    let out = dir.path().join("layout.json");
    let mut cmd = Command::cargo_bin("figlayout").unwrap();
    cmd.args([
        "layout", "--width", "400", "--height", "500", "--bottom", "11", "--bottom", "9",
        "--left", "30", "--out",
    ])
    .arg(&out);
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("width=370 height=480 x=30 y=0"));
    let text = std::fs::read_to_string(&out).unwrap();
    assert!(text.contains("\"reserved_bottom\": 20.0"));
}

#[test]
fn inverted_band_fails() {
    let mut cmd = Command::cargo_bin("figlayout").unwrap();
    cmd.args(["layout", "--min-aspect", "2", "--max-aspect", "0.5"]);
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("aspect"));
}

#[test]
fn render_writes_png_and_svg() {
    let dir = tempdir().unwrap();
    let cfg = dir.path().join("figure.json");
    std::fs::write(
        &cfg,
        r#"{"width": 200, "height": 100, "title": "Points",
            "marks": [{"x": [1, 2, 3], "y": [1, 4, 9]}]}"#,
    )
    .unwrap();

    for name in ["figure.png", "figure.svg"] {
        let out = dir.path().join(name);
        let mut cmd = Command::cargo_bin("figlayout").unwrap();
        cmd.arg("render").arg("--config").arg(&cfg).arg("--out").arg(&out);
        cmd.assert().success();
        assert!(out.exists(), "{name} not written");
    }
    let svg = std::fs::read_to_string(dir.path().join("figure.svg")).unwrap();
    assert!(svg.contains("Points"));
}

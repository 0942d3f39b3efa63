use figlayout::{FigureConfig, LayoutReport, RenderMode, storage};
use std::fs;
use tempfile::tempdir;

const CONFIG: &str = r#"{
    "width": 400,
    "height": 500,
    "title": "i should fit above",
    "min_aspect_ratio": 2,
    "max_aspect_ratio": 2,
    "decorators": [{"side": "bottom", "padding": 20}],
    "marks": [
        {"x": [0.5, 0.5], "y": [2.0, 2.5], "colors": ["red"]},
        {"kind": "scatter_gl", "x": [1, 2, 3], "y": [3, 2, 1], "marker": "square"}
    ]
}"#;

#[test]
fn config_file_builds_a_figure() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("figure.json");
    fs::write(&path, CONFIG).unwrap();

    let cfg = FigureConfig::from_path(&path).unwrap();
    let fig = cfg.build().unwrap();
    let g = fig.figure_size().unwrap();
    assert_eq!((g.width, g.height, g.x, g.y), (400.0, 200.0, 0.0, 150.0));
    assert_eq!(fig.marks().len(), 2);
    assert_eq!(fig.marks()[1].kind, figlayout::render::MarkKind::ScatterGl);
    assert_eq!(
        fig.render_mode(figlayout::MarkId(1)),
        Some(RenderMode::Accelerated)
    );
}

#[test]
fn broken_config_reports_the_path() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("broken.json");
    fs::write(&path, "{ not json").unwrap();
    let err = FigureConfig::from_path(&path).unwrap_err();
    assert!(format!("{err:#}").contains("broken.json"));
}

#[test]
fn invalid_mark_fails_the_build() {
    let cfg: FigureConfig =
        serde_json::from_str(r#"{"marks": [{"x": [1, 2], "y": [1]}]}"#).unwrap();
    assert!(cfg.build().is_err());
}

#[test]
fn layout_report_round_trips_through_json() {
    let cfg: FigureConfig = serde_json::from_str(CONFIG).unwrap();
    let fig = cfg.build().unwrap();
    let layout = fig.layout().unwrap();
    let report = LayoutReport::new(fig.canvas(), fig.model(), &layout);
    assert_eq!(report.reserved_top, 20.0);
    assert_eq!(report.reserved_bottom, 20.0);

    let dir = tempdir().unwrap();
    let json = dir.path().join("layout.json");
    let csv = dir.path().join("layout.csv");
    storage::save_report(&[report.clone()], &json).unwrap();
    storage::save_report(&[report.clone()], &csv).unwrap();

    let back: Vec<LayoutReport> =
        serde_json::from_str(&fs::read_to_string(&json).unwrap()).unwrap();
    assert_eq!(back, vec![report]);

    let text = fs::read_to_string(&csv).unwrap();
    let mut lines = text.lines();
    assert!(lines.next().unwrap().contains("reserved_top"));
    assert!(lines.next().unwrap().contains("i should fit above"));
}

use figlayout::render::MarkerShape;
use figlayout::{Canvas, Figure, RenderMode, ScatterSpec};
use tempfile::tempdir;

const RED: [u8; 4] = [255, 0, 0, 255];
// first palette color
const BLUE: [u8; 4] = [68, 114, 196, 255];

fn figure() -> Figure {
    Figure::new(Canvas::new(400.0, 500.0).unwrap())
}

fn two_points() -> ScatterSpec {
    ScatterSpec::new(vec![0.5, 0.5], vec![2.0, 2.5])
}

#[test]
fn renderer_is_created_only_for_accelerated_marks() {
    let mut f = figure();
    let plain = f.add_mark(&two_points()).unwrap();
    assert!(f.renderer().is_none());
    assert_eq!(f.render_mode(plain), Some(RenderMode::Vector));

    let gl = f.add_mark(&two_points().accelerated()).unwrap();
    assert!(f.renderer().is_some());
    assert_eq!(f.render_mode(gl), Some(RenderMode::Accelerated));
}

#[test]
fn large_marks_switch_to_accelerated() {
    let mut f = figure();
    f.set_acceleration_threshold(1000);
    let n = 1000;
    let xs: Vec<f64> = (0..n).map(|i| i as f64).collect();
    let id = f.add_mark(&ScatterSpec::new(xs.clone(), xs)).unwrap();
    assert_eq!(f.render_mode(id), Some(RenderMode::Accelerated));
    assert_eq!(f.renderer().map(|r| r.threshold()), Some(1000));
}

fn huge_red_marker(accelerated: bool) {
    let mut f = figure();
    let spec = if accelerated {
        two_points().accelerated()
    } else {
        two_points()
    };
    let id = f.add_mark(&spec).unwrap();
    f.set_mark_size(id, 1e6).unwrap();
    f.set_mark_colors(id, &["red"]).unwrap();
    f.flush_animations();
    assert!(f.is_settled());

    let bitmap = f.rasterize().unwrap();
    assert_eq!((bitmap.width(), bitmap.height()), (400, 500));
    assert_eq!(bitmap.pixel(200, 200), Some(RED));
}

#[test]
fn huge_vector_marker_covers_the_center() {
    huge_red_marker(false);
}

#[test]
fn huge_accelerated_marker_covers_the_center() {
    huge_red_marker(true);
}

fn oversized_marker(marker: MarkerShape) {
    let mut f = figure();
    let mut spec = two_points();
    spec.marker = marker;
    let id = f.add_mark(&spec).unwrap();
    f.set_mark_size(id, 1e20).unwrap();
    f.set_mark_colors(id, &["red"]).unwrap();
    f.flush_animations();

    let bitmap = f.rasterize().unwrap();
    assert_eq!(bitmap.pixel(200, 200), Some(RED));
    for (x, y) in [(0, 0), (399, 0), (0, 499), (399, 499)] {
        assert_eq!(bitmap.pixel(x, y), Some(RED), "({x}, {y})");
    }
    assert!(f.render_svg().unwrap().contains("<svg"));
}

#[test]
fn oversized_circle_fills_the_plot() {
    oversized_marker(MarkerShape::Circle);
}

#[test]
fn oversized_square_fills_the_plot() {
    oversized_marker(MarkerShape::Square);
}

#[test]
fn title_is_drawn_above_the_plot() {
    let white = [255, 255, 255, 255];
    let mut f = figure();
    f.set("max_aspect_ratio", 0.5).unwrap();
    let plain = f.rasterize().unwrap();
    let band = plain.region(0, 0, 400, 20).unwrap();
    assert_eq!(band.count_color(white), 400 * 20);

    f.set("title", "Measurements").unwrap();
    let titled = f.rasterize().unwrap();
    let band = titled.region(0, 0, 400, 20).unwrap();
    assert!(band.count_color(white) < 400 * 20);
    // the text is centred, so the outer columns stay blank
    assert_eq!(titled.region(0, 0, 60, 20).unwrap().count_color(white), 60 * 20);
}

#[test]
fn pending_updates_are_not_drawn_until_flushed() {
    let mut f = figure();
    let id = f.add_mark(&two_points()).unwrap();
    f.set_mark_colors(id, &["red"]).unwrap();
    assert!(!f.is_settled());

    // the upper point sits on the top edge of the plot
    let before = f.rasterize().unwrap();
    assert_eq!(before.pixel(200, 2), Some(BLUE));

    assert_eq!(f.flush_animations(), 1);
    let after = f.rasterize().unwrap();
    assert_eq!(after.pixel(200, 2), Some(RED));
}

#[test]
fn marks_stay_inside_the_plot_area() {
    let mut f = figure();
    f.set("max_aspect_ratio", 0.5).unwrap();
    let id = f.add_mark(&two_points()).unwrap();
    f.set_mark_size(id, 1e6).unwrap();
    f.set_mark_colors(id, &["red"]).unwrap();
    f.flush_animations();

    // plot area is 250 wide starting at x=75
    let bitmap = f.rasterize().unwrap();
    assert_eq!(bitmap.pixel(100, 250), Some(RED));
    assert_eq!(bitmap.pixel(50, 250), Some([255, 255, 255, 255]));
    assert_eq!(bitmap.pixel(350, 250), Some([255, 255, 255, 255]));
}

#[test]
fn svg_contains_title_and_markers() {
    let mut f = figure();
    f.set("title", "Scatter").unwrap();
    f.add_mark(&two_points()).unwrap();
    let svg = f.render_svg().unwrap();
    assert!(svg.contains("<svg"));
    assert!(svg.contains("Scatter"));
    assert!(svg.contains("<circle"));
}

#[test]
fn png_export_has_canvas_size() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("figure.png");
    let mut f = figure();
    f.add_mark(&two_points()).unwrap();
    f.rasterize().unwrap().save_png(&path).unwrap();

    let img = image::open(&path).unwrap();
    assert_eq!((img.width(), img.height()), (400, 500));
}

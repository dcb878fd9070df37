use kurbo::Point;
use watch_planner::layout::{point_on_circle, slot_angle};
use watch_planner::store::sample_activities;
use watch_planner::{Activity, FaceGeometry, SceneOptions, Shape, build_scene};

fn ring_point(slot: f64) -> Point {
    point_on_circle(Point::new(200.0, 200.0), 160.0, slot_angle(slot))
}

#[test]
fn one_segment_per_activity() {
    let geometry = FaceGeometry::default();
    let scene = build_scene(&sample_activities(), &geometry, SceneOptions::default());
    assert_eq!(scene.segment_count(), 6);

    let texts = scene
        .shapes()
        .iter()
        .filter(|shape| matches!(shape, Shape::Text { .. }))
        .count();
    assert_eq!(texts, 24, "only hour numbers without labels");
}

#[test]
fn labels_add_text_and_connectors() {
    let geometry = FaceGeometry::default();
    let plain = build_scene(&sample_activities(), &geometry, SceneOptions::default());
    let labelled = build_scene(
        &sample_activities(),
        &geometry,
        SceneOptions { show_labels: true },
    );
    assert_eq!(labelled.shapes().len(), plain.shapes().len() + 12);

    let svg = labelled.to_svg();
    assert!(svg.contains("Dinner &amp; Family"));
    assert!(svg.contains(r#"text-anchor="end""#));
}

#[test]
fn zero_length_activities_are_not_drawn() {
    let geometry = FaceGeometry::default();
    let activities = vec![
        Activity::new(1, "Empty", 4, 0, "#fff"),
        Activity::new(2, "Real", 4, 2, "#000"),
    ];
    let scene = build_scene(&activities, &geometry, SceneOptions { show_labels: true });
    assert_eq!(scene.segment_count(), 1);
    assert!(!scene.to_svg().contains(r#"data-activity-id="1""#));
}

#[test]
fn svg_document_is_well_formed() {
    let geometry = FaceGeometry::default();
    let scene = build_scene(&sample_activities(), &geometry, SceneOptions::default());
    let svg = scene.to_svg();

    assert!(svg.starts_with(r#"<svg xmlns="http://www.w3.org/2000/svg" width="400" height="400""#));
    assert!(svg.trim_end().ends_with("</svg>"));
    assert!(svg.contains(r#"<path data-activity-id="2" d="M "#));
    assert!(svg.contains(r##"fill="#3B82F6""##));
    assert!(svg.contains(r#"<line x1="200" y1="200" x2="200" y2="40""#));
}

#[test]
fn hit_test_routes_pointer_to_segment() {
    let geometry = FaceGeometry::default();
    let scene = build_scene(&sample_activities(), &geometry, SceneOptions::default());

    assert_eq!(scene.hit_test(ring_point(15.0)), Some(1));
    assert_eq!(scene.hit_test(ring_point(20.0)), Some(2));
    assert_eq!(scene.hit_test(ring_point(3.0)), None);
    assert_eq!(scene.hit_test(Point::new(200.0, 200.0)), None);
}

#[test]
fn hit_test_prefers_the_segment_drawn_last() {
    let geometry = FaceGeometry::default();
    let activities = vec![
        Activity::new(1, "Under", 10, 6, "#fff"),
        Activity::new(2, "Over", 12, 2, "#000"),
    ];
    let scene = build_scene(&activities, &geometry, SceneOptions::default());
    assert_eq!(scene.hit_test(ring_point(13.0)), Some(2));
    assert_eq!(scene.hit_test(ring_point(11.0)), Some(1));
}

#[test]
fn hit_test_handles_segments_crossing_midnight() {
    let geometry = FaceGeometry::default();
    let activities = vec![Activity::new(9, "Sleep", 46, 16, "#fff")];
    let scene = build_scene(&activities, &geometry, SceneOptions::default());
    assert_eq!(scene.hit_test(ring_point(47.5)), Some(9));
    assert_eq!(scene.hit_test(ring_point(5.0)), Some(9));
    assert_eq!(scene.hit_test(ring_point(15.0)), None);
}

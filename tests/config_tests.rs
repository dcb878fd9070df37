use watch_planner::{ConfigError, FaceGeometry, PlannerConfig};

#[test]
fn defaults_match_the_classic_face() {
    let config = PlannerConfig::default();
    assert_eq!(config.face.outer_radius, 180.0);
    assert_eq!(config.face.inner_radius, 140.0);
    assert_eq!(config.face.center_x, 200.0);
    assert_eq!(config.palette.len(), 10);
    config.validate().unwrap();
}

#[test]
fn partial_json_keeps_defaults() {
    let config = PlannerConfig::from_json(r#"{"face": {"label_radius": 230}}"#).unwrap();
    assert_eq!(config.face.label_radius, 230.0);
    assert_eq!(config.face.outer_radius, FaceGeometry::default().outer_radius);
    assert_eq!(config.palette, PlannerConfig::default().palette);
}

#[test]
fn ring_must_have_positive_width() {
    let result = PlannerConfig::from_json(r#"{"face": {"inner_radius": 200, "outer_radius": 180}}"#);
    match result {
        Err(ConfigError::Invalid(msg)) => assert!(msg.contains("inner_radius")),
        other => panic!("expected invalid config, got {other:?}"),
    }
}

#[test]
fn empty_palette_is_rejected() {
    assert!(matches!(
        PlannerConfig::from_json(r#"{"palette": []}"#),
        Err(ConfigError::Invalid(_))
    ));
}

#[test]
fn malformed_json_is_parse_error() {
    assert!(matches!(
        PlannerConfig::from_json("{"),
        Err(ConfigError::Parse(_))
    ));
}

#[test]
fn load_reads_file_and_reports_missing_path() {
    let file = tempfile::NamedTempFile::new().unwrap();
    std::fs::write(file.path(), r##"{"palette": ["#000000"], "export_dir": "out"}"##).unwrap();
    let config = PlannerConfig::load(file.path()).unwrap();
    assert_eq!(config.palette, vec!["#000000".to_string()]);
    assert_eq!(config.export_dir, std::path::PathBuf::from("out"));

    let missing = PlannerConfig::load("/definitely/not/here.json");
    assert!(matches!(missing, Err(ConfigError::Read { .. })));
}

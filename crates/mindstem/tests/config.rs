use mindstem::prelude::*;
use std::fs;
use tempfile::tempdir;

#[test]
fn test_config_file_changes_output() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("mindstem.json");
    fs::write(
        &path,
        r##"{
            "layout": {"canvas_width": 600, "center_x": 300},
            "theme": {"background": "#000000"}
        }"##,
    )
    .unwrap();

    let config = RenderConfig::from_json_file(&path).unwrap();
    let svg = MindMapPipeline::new(config)
        .svg("Root\n- A\n- B")
        .unwrap();
    assert!(svg.contains("viewBox=\"0 0 600 800\""));
    assert!(svg.contains("fill=\"#000000\""));
}

#[test]
fn test_missing_config_file_names_path() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("absent.json");
    let err = RenderConfig::from_json_file(&path).unwrap_err();
    assert!(matches!(err, DiagramError::Config { .. }));
    assert!(err.to_string().contains("absent.json"));
}

#[test]
fn test_invalid_config_file_names_path() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("broken.json");
    fs::write(&path, r#"{"layout": {"leaf_gap": "#).unwrap();
    let err = RenderConfig::from_json_file(&path).unwrap_err();
    assert!(err.to_string().contains("broken.json"));
}

#[test]
fn test_out_of_range_constants_rejected() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("negative.json");
    fs::write(&path, r#"{"layout": {"leaf_gap": -3}}"#).unwrap();
    let err = RenderConfig::from_json_file(&path).unwrap_err();
    assert!(matches!(err, DiagramError::Layout { .. }));
}

//! Raster export

use mindstem::mindmap::{trim, MindMapPipeline, RasterExporter, Scene, Theme};
use mindstem::{DiagramError, ExportOptions, Renderer, Size};

fn options(transparent: bool, scale: f32, trim: bool) -> ExportOptions {
    ExportOptions {
        transparent,
        scale,
        trim,
        ..ExportOptions::default()
    }
}

#[test]
fn test_untrimmed_size_follows_scale() {
    let image = MindMapPipeline::default()
        .export_with("Root\n- A", options(true, 0.5, false))
        .unwrap();
    assert_eq!((image.width(), image.height()), (500, 400));
}

#[test]
fn test_transparent_export_is_trimmed() {
    let image = MindMapPipeline::default()
        .export_with("Root\n- A\n  - A1", options(true, 1.0, true))
        .unwrap();
    assert!(image.width() < 1000);
    assert!(image.height() < 800);
    assert!(image.width() >= 180);
}

#[test]
fn test_opaque_export_fills_white() {
    let image = MindMapPipeline::default()
        .export_with("Root", options(false, 0.25, true))
        .unwrap();
    // every pixel is visible, so trimming keeps the full canvas
    assert_eq!((image.width(), image.height()), (250, 200));
    let rgba = image.to_rgba();
    assert_eq!(&rgba[..4], &[255, 255, 255, 255]);
}

#[test]
fn test_empty_scene_is_not_cropped() {
    let scene = Scene::empty(Size::new(100.0, 60.0), &Theme::default());
    let image = RasterExporter::new(options(true, 1.0, true))
        .render(&scene)
        .unwrap();
    assert_eq!((image.width(), image.height()), (100, 60));
    assert!(image.to_rgba().iter().all(|b| *b == 0));
}

#[test]
fn test_trim_is_idempotent_on_export() {
    let image = MindMapPipeline::default()
        .export_with("Root\n- A\n- B", options(true, 0.5, true))
        .unwrap();
    let again = trim(image.pixmap().clone());
    assert_eq!((again.width(), again.height()), (image.width(), image.height()));
}

#[test]
fn test_invalid_scale_rejected() {
    let result = MindMapPipeline::default().export_with("Root", options(true, 0.0, true));
    assert!(result.is_err());
}

#[test]
fn test_png_encoding() {
    let image = MindMapPipeline::default()
        .export_with("Root", options(true, 0.5, true))
        .unwrap();
    let png = image.encode_png().unwrap();
    assert_eq!(&png[1..4], b"PNG");
}

#[test]
fn test_control_characters_still_export() {
    let image = MindMapPipeline::default()
        .export_with("Root\u{7}\n- A\u{1}B\n  - \u{1b}[31mred", options(true, 0.25, true))
        .unwrap();
    assert!(image.width() > 0);
}

#[test]
fn test_huge_scale_is_an_export_error() {
    let err = MindMapPipeline::default()
        .export_with("Root\n- A", options(true, 1000.0, true))
        .unwrap_err();
    let err = err.downcast_ref::<DiagramError>().unwrap();
    assert!(matches!(err, DiagramError::Export { .. }));
}

#[test]
fn test_pixel_limit_is_configurable() {
    let tight = ExportOptions {
        max_pixels: 1_000,
        ..options(true, 1.0, false)
    };
    assert!(MindMapPipeline::default().export_with("Root", tight).is_err());
}

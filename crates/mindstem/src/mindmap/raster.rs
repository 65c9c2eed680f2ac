//! Raster export
//!
//! The scene goes through the SVG adapter and is rasterized with `resvg`.
//! The background rectangle is never part of that SVG: an opaque export
//! pre-fills the pixel buffer with white instead, and a transparent export
//! leaves it empty so the result can be trimmed to its visible content.

use anyhow::{anyhow, Result};
use resvg::tiny_skia::{self, IntRect, Pixmap, Transform};
use resvg::usvg;
use tracing::{debug, info, span, warn, Level};

use super::scene::Scene;
use super::svg::SvgRenderer;
use crate::core::{DiagramError, ExportOptions, Renderer};

/// A rasterized mind map
#[derive(Debug, Clone)]
pub struct RasterImage {
    pixmap: Pixmap,
}

impl RasterImage {
    pub fn width(&self) -> u32 {
        self.pixmap.width()
    }

    pub fn height(&self) -> u32 {
        self.pixmap.height()
    }

    pub fn pixmap(&self) -> &Pixmap {
        &self.pixmap
    }

    /// Encode as PNG bytes
    pub fn encode_png(&self) -> Result<Vec<u8>> {
        self.pixmap
            .encode_png()
            .map_err(|e| DiagramError::export_error(format!("failed to encode PNG: {}", e)).into())
    }

    /// Straight (non-premultiplied) RGBA bytes, row-major
    pub fn to_rgba(&self) -> Vec<u8> {
        self.pixmap
            .pixels()
            .iter()
            .flat_map(|p| {
                let c = p.demultiply();
                [c.red(), c.green(), c.blue(), c.alpha()]
            })
            .collect()
    }
}

/// Smallest rectangle holding every pixel with non-zero alpha.
///
/// Returns `None` for a fully transparent pixmap.
pub fn trim_transparent(pixmap: &Pixmap) -> Option<IntRect> {
    let width = pixmap.width() as usize;
    let mut min_x = usize::MAX;
    let mut min_y = usize::MAX;
    let mut max_x = 0usize;
    let mut max_y = 0usize;

    for (i, pixel) in pixmap.pixels().iter().enumerate() {
        if pixel.alpha() == 0 {
            continue;
        }
        let (x, y) = (i % width, i / width);
        min_x = min_x.min(x);
        min_y = min_y.min(y);
        max_x = max_x.max(x);
        max_y = max_y.max(y);
    }

    if min_x == usize::MAX {
        return None;
    }
    IntRect::from_xywh(
        min_x as i32,
        min_y as i32,
        (max_x - min_x + 1) as u32,
        (max_y - min_y + 1) as u32,
    )
}

/// Crop to the visible content; fully transparent pixmaps come back unchanged
pub fn trim(pixmap: Pixmap) -> Pixmap {
    let Some(rect) = trim_transparent(&pixmap) else {
        debug!("Nothing visible to trim to");
        return pixmap;
    };
    if rect.width() == pixmap.width() && rect.height() == pixmap.height() {
        return pixmap;
    }
    match pixmap.clone_rect(rect) {
        Some(cropped) => cropped,
        None => {
            warn!(?rect, "Trim rectangle outside the pixmap, keeping full image");
            pixmap
        }
    }
}

/// Last entry of a CSS font list, used when no listed family resolves
fn fallback_family(families: &str) -> String {
    families
        .split(',')
        .map(|f| f.trim().trim_matches('"').trim_matches('\''))
        .filter(|f| !f.is_empty())
        .last()
        .unwrap_or("sans-serif")
        .to_string()
}

fn scaled_dimension(value: f64, scale: f32) -> Result<u32> {
    let scaled = (value * scale as f64).ceil();
    if !scaled.is_finite() || scaled < 1.0 || scaled > u32::MAX as f64 {
        return Err(DiagramError::export_error(format!(
            "scaled dimension {} is out of range; try another scale factor",
            scaled
        ))
        .into());
    }
    Ok(scaled as u32)
}

/// Refuse buffers larger than `max_pixels` before allocating them
fn check_pixel_budget(width: u32, height: u32, max_pixels: u64) -> Result<()> {
    let pixels = width as u64 * height as u64;
    if pixels > max_pixels {
        return Err(DiagramError::export_error(format!(
            "{}x{} image needs {} pixels, more than the limit of {}; lower the scale",
            width, height, pixels, max_pixels
        ))
        .into());
    }
    Ok(())
}

/// Scene to pixels
#[derive(Debug, Clone, Copy, Default)]
pub struct RasterExporter {
    options: ExportOptions,
}

impl RasterExporter {
    pub fn new(options: ExportOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &ExportOptions {
        &self.options
    }
}

impl Renderer<Scene> for RasterExporter {
    type Output = RasterImage;

    fn render(&self, scene: &Scene) -> Result<RasterImage> {
        let raster_span = span!(
            Level::INFO,
            "rasterize",
            scale = self.options.scale,
            transparent = self.options.transparent,
            trim = self.options.trim
        );
        let _enter = raster_span.enter();

        self.options.validate()?;
        let width = scaled_dimension(scene.size.width, self.options.scale)?;
        let height = scaled_dimension(scene.size.height, self.options.scale)?;
        check_pixel_budget(width, height, self.options.max_pixels)?;

        let svg = SvgRenderer::new().with_background(false).render(scene)?;

        let mut options = usvg::Options::default();
        options.font_family = fallback_family(&scene.font_family);
        options.fontdb_mut().load_system_fonts();
        let tree = usvg::Tree::from_str(&svg, &options)
            .map_err(|e| DiagramError::render_error(format!("generated SVG is invalid: {}", e)))?;

        let mut pixmap = Pixmap::new(width, height)
            .ok_or_else(|| anyhow!("failed to allocate {}x{} pixel buffer", width, height))?;
        if !self.options.transparent {
            let bg = scene.background;
            pixmap.fill(tiny_skia::Color::from_rgba8(bg.r, bg.g, bg.b, 255));
        }

        let transform = Transform::from_scale(self.options.scale, self.options.scale);
        resvg::render(&tree, transform, &mut pixmap.as_mut());
        debug!(width, height, "Scene rasterized");

        let pixmap = if self.options.trim { trim(pixmap) } else { pixmap };
        info!(
            width = pixmap.width(),
            height = pixmap.height(),
            "Raster image ready"
        );
        Ok(RasterImage { pixmap })
    }

    fn name(&self) -> &'static str {
        "resvg"
    }

    fn format(&self) -> &'static str {
        "png"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::DEFAULT_MAX_PIXELS;
    use resvg::tiny_skia::{Paint, Rect};

    fn pixmap_with_block(x: f32, y: f32, w: f32, h: f32) -> Pixmap {
        let mut pixmap = Pixmap::new(40, 30).unwrap();
        let mut paint = Paint::default();
        paint.set_color_rgba8(255, 0, 0, 255);
        pixmap.fill_rect(
            Rect::from_xywh(x, y, w, h).unwrap(),
            &paint,
            Transform::identity(),
            None,
        );
        pixmap
    }

    #[test]
    fn test_trim_finds_block() {
        let pixmap = pixmap_with_block(10.0, 5.0, 8.0, 4.0);
        let rect = trim_transparent(&pixmap).unwrap();
        assert_eq!((rect.x(), rect.y()), (10, 5));
        assert_eq!((rect.width(), rect.height()), (8, 4));
        let cropped = trim(pixmap);
        assert_eq!((cropped.width(), cropped.height()), (8, 4));
    }

    #[test]
    fn test_trim_empty_is_noop() {
        let pixmap = Pixmap::new(40, 30).unwrap();
        assert!(trim_transparent(&pixmap).is_none());
        let same = trim(pixmap);
        assert_eq!((same.width(), same.height()), (40, 30));
    }

    #[test]
    fn test_trim_is_idempotent() {
        let once = trim(pixmap_with_block(3.0, 7.0, 12.0, 9.0));
        let twice = trim(once.clone());
        assert_eq!((once.width(), once.height()), (twice.width(), twice.height()));
    }

    #[test]
    fn test_fallback_family() {
        assert_eq!(fallback_family("system-ui, sans-serif"), "sans-serif");
        assert_eq!(fallback_family("\"Noto Sans\""), "Noto Sans");
        assert_eq!(fallback_family(""), "sans-serif");
    }

    #[test]
    fn test_scaled_dimension() {
        assert_eq!(scaled_dimension(1000.0, 2.0).unwrap(), 2000);
        assert_eq!(scaled_dimension(333.0, 1.5).unwrap(), 500);
        assert!(scaled_dimension(1.0, 0.1).is_ok());
        assert!(scaled_dimension(0.0, 1.0).is_err());
    }

    #[test]
    fn test_pixel_budget() {
        assert!(check_pixel_budget(2000, 1600, 3_200_000).is_ok());
        let err = check_pixel_budget(1_000_000, 800_000, DEFAULT_MAX_PIXELS).unwrap_err();
        assert!(err.to_string().contains("lower the scale"));
    }

    #[test]
    fn test_rgba_is_demultiplied() {
        let mut pixmap = Pixmap::new(1, 1).unwrap();
        pixmap.fill(tiny_skia::Color::from_rgba8(255, 0, 0, 128));
        let image = RasterImage { pixmap };
        let rgba = image.to_rgba();
        assert_eq!(rgba[0], 255);
        assert_eq!(rgba[3], 128);
    }
}

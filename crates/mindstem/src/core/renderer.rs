//! Core renderer trait for diagram output
//!
//! Renderers turn an already-positioned structure into a concrete output
//! format: SVG markup, terminal text, or a raster image.

use anyhow::Result;

/// Core trait for renderers
pub trait Renderer<T>: Send + Sync {
    /// The output type of this renderer
    type Output;

    /// Render `input` into the output format
    fn render(&self, input: &T) -> Result<Self::Output>;

    /// Get the name of this renderer
    fn name(&self) -> &'static str;

    /// Get the produced format (`svg`, `text`, `png`)
    fn format(&self) -> &'static str;
}

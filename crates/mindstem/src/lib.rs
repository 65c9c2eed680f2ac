//! Mindstem - Turn indented outlines into vertical mind maps
//!
//! An outline such as
//!
//! ```text
//! Interview Analysis
//! - Data\nCollection
//!   - Transcripts
//!   - Surveys
//! - Findings
//! ```
//!
//! becomes a three-tier diagram: the root on top, level-1 nodes in a row of
//! colored columns below it, and level-2 nodes stacked under their column.
//! Output is SVG, a PNG image, or a text preview for terminals.
//!
//! # Quick Start
//!
//! ```rust
//! let svg = mindstem::render_svg("Root\n- A\n  - A1\n- B").unwrap();
//! assert!(svg.starts_with("<svg"));
//! assert!(svg.contains(">A1</tspan>"));
//! ```
//!
//! # Advanced Usage
//!
//! For more control, run the stages one by one:
//!
//! ```rust
//! use mindstem::prelude::*;
//!
//! let map = OutlineParser::new().parse("Root\n- A\n- B").unwrap();
//! assert_eq!(map.branches().len(), 2);
//!
//! let layout = MindMapLayout::default().layout(&map).unwrap();
//! let scene = SceneBuilder::default().build(&layout);
//! let svg = SvgRenderer::new().render(&scene).unwrap();
//! assert!(svg.contains("viewBox=\"0 0 1000 800\""));
//! ```

pub mod core;
pub mod mindmap;

pub use core::*;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::core::{
        CharacterSet, DiagramError, ExportOptions, LayoutAlgorithm, LayoutConstants, Parser,
        ParserOptions, RenderConfig, Renderer,
    };
    pub use crate::mindmap::{
        LayoutResult, MindMap, MindMapLayout, MindMapPipeline, OutlineParser, RasterExporter,
        Scene, SceneBuilder, SvgRenderer, TextRenderer, Theme,
    };
}

/// Parse an outline into a tree; `None` when the text is blank
///
/// # Example
/// ```rust
/// let map = mindstem::parse("Root\n  - Orphan\n- A").unwrap();
/// assert_eq!(map.branches().len(), 1);
/// assert!(mindstem::parse("  \n").is_none());
/// ```
pub fn parse(input: &str) -> Option<mindmap::MindMap> {
    use crate::core::Parser as _;

    mindmap::OutlineParser::new().parse(input)
}

/// Render an outline as SVG markup with the default configuration
pub fn render_svg(input: &str) -> anyhow::Result<String> {
    mindmap::MindMapPipeline::default().svg(input)
}

/// Render an outline as PNG bytes
///
/// Uses the default export options: transparent background, scale 2 and
/// trimmed to the visible content.
pub fn render_png(input: &str) -> anyhow::Result<Vec<u8>> {
    mindmap::MindMapPipeline::default()
        .export(input)?
        .encode_png()
}

//! End-to-end pipeline: text → tree → layout → scene → output
//!
//! Every stage is a pure function of the input text and the configuration.
//! Nothing is cached between calls; a new text snapshot always produces a
//! fresh tree, layout and scene.

use anyhow::Result;
use serde::Serialize;
use tracing::{debug, info, span, Level};

use super::layout::{LayoutResult, MindMapLayout};
use super::parser::OutlineParser;
use super::preview::TextRenderer;
use super::raster::{RasterExporter, RasterImage};
use super::scene::{Scene, SceneBuilder};
use super::svg::SvgRenderer;
use super::tree::MindMap;
use crate::core::{
    CharacterSet, ExportOptions, LayoutAlgorithm, Parser, RenderConfig, Renderer, Size,
};

/// Tree and geometry for one snapshot, for debugging output
#[derive(Debug, Clone, Serialize)]
pub struct Inspection {
    pub tree: Option<MindMap>,
    pub layout: Option<LayoutResult>,
}

/// Runs the stages with one configuration
#[derive(Debug, Clone, Default)]
pub struct MindMapPipeline {
    config: RenderConfig,
    parser: OutlineParser,
    layout: MindMapLayout,
    scenes: SceneBuilder,
}

impl MindMapPipeline {
    pub fn new(config: RenderConfig) -> Self {
        Self {
            parser: OutlineParser::with_options(config.parser),
            layout: MindMapLayout::new(config.layout),
            scenes: SceneBuilder::new(config.theme.clone()),
            config,
        }
    }

    pub fn config(&self) -> &RenderConfig {
        &self.config
    }

    /// `None` for blank input
    pub fn parse(&self, input: &str) -> Option<MindMap> {
        self.parser.parse(input)
    }

    pub fn layout(&self, input: &str) -> Result<Option<LayoutResult>> {
        self.parse(input)
            .map(|map| self.layout.layout(&map))
            .transpose()
    }

    /// Display list; blank input gives an empty canvas
    pub fn scene(&self, input: &str) -> Result<Scene> {
        let scene_span = span!(Level::INFO, "pipeline_scene", input_len = input.len());
        let _enter = scene_span.enter();

        match self.layout(input)? {
            Some(layout) => Ok(self.scenes.build(&layout)),
            None => {
                debug!("Blank input, producing empty scene");
                let c = &self.config.layout;
                Ok(Scene::empty(
                    Size::new(c.canvas_width, c.canvas_height),
                    self.scenes.theme(),
                ))
            }
        }
    }

    pub fn svg(&self, input: &str) -> Result<String> {
        SvgRenderer::new().render(&self.scene(input)?)
    }

    /// Rasterize with the configured export options
    pub fn export(&self, input: &str) -> Result<RasterImage> {
        self.export_with(input, self.config.export)
    }

    pub fn export_with(&self, input: &str, options: ExportOptions) -> Result<RasterImage> {
        let export_span = span!(Level::INFO, "pipeline_export", input_len = input.len());
        let _enter = export_span.enter();

        let scene = self.scene(input)?;
        let image = RasterExporter::new(options).render(&scene)?;
        info!(
            width = image.width(),
            height = image.height(),
            "Export complete"
        );
        Ok(image)
    }

    /// Terminal preview; blank input gives an empty string
    pub fn preview(&self, input: &str, style: CharacterSet) -> Result<String> {
        match self.parse(input) {
            Some(map) => TextRenderer::new(style).render(&map),
            None => Ok(String::new()),
        }
    }

    pub fn inspect(&self, input: &str) -> Result<Inspection> {
        let tree = self.parse(input);
        let layout = tree
            .as_ref()
            .map(|map| self.layout.layout(map))
            .transpose()?;
        Ok(Inspection { tree, layout })
    }
}

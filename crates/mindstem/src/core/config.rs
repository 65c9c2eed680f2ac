//! Render configuration
//!
//! Every knob of the pipeline lives in [`RenderConfig`]. All sections use
//! `#[serde(default)]`, so a JSON file only needs to name what it overrides:
//!
//! ```json
//! { "layout": { "sibling_spacing": 240 }, "export": { "scale": 3 } }
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use super::DiagramError;
use crate::mindmap::Theme;

/// Options for the outline parser
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParserOptions {
    /// Columns of indentation that make a marker line a level-2 node.
    /// A tab counts as one full unit.
    pub indent_unit: usize,
}

impl Default for ParserOptions {
    fn default() -> Self {
        Self { indent_unit: 2 }
    }
}

/// Fixed geometric constants for the vertical layout, in canvas units
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConstants {
    pub canvas_width: f64,
    pub canvas_height: f64,
    /// Horizontal center of the root and of the level-1 group
    pub center_x: f64,
    /// Top edge of the root box
    pub root_y: f64,
    pub root_width: f64,
    pub root_height: f64,
    pub branch_width: f64,
    pub branch_height: f64,
    /// Top edge of every level-1 box
    pub level1_y: f64,
    /// Top edge of the first level-2 label in each column
    pub level2_start_y: f64,
    /// Distance between neighbouring level-1 centers
    pub sibling_spacing: f64,
    /// Height of a single-line level-2 label
    pub leaf_height: f64,
    /// Gap between a level-2 label's bottom and the next one's top
    pub leaf_gap: f64,
    /// Baseline distance between lines of a multi-line label
    pub text_line_height: f64,
    /// Length of the straight segment below the root
    pub trunk_length: f64,
    /// How far above the level-1 row the branch curves flatten out
    pub branch_curve_lift: f64,
}

impl Default for LayoutConstants {
    fn default() -> Self {
        Self {
            canvas_width: 1000.0,
            canvas_height: 800.0,
            center_x: 500.0,
            root_y: 50.0,
            root_width: 180.0,
            root_height: 60.0,
            branch_width: 150.0,
            branch_height: 60.0,
            level1_y: 250.0,
            level2_start_y: 380.0,
            sibling_spacing: 280.0,
            leaf_height: 30.0,
            leaf_gap: 50.0,
            text_line_height: 22.0,
            trunk_length: 20.0,
            branch_curve_lift: 60.0,
        }
    }
}

impl LayoutConstants {
    /// Reject constants that would make the layout meaningless
    pub fn validate(&self) -> Result<(), DiagramError> {
        let finite = [
            ("canvas_width", self.canvas_width),
            ("canvas_height", self.canvas_height),
            ("center_x", self.center_x),
            ("root_y", self.root_y),
            ("root_width", self.root_width),
            ("root_height", self.root_height),
            ("branch_width", self.branch_width),
            ("branch_height", self.branch_height),
            ("level1_y", self.level1_y),
            ("level2_start_y", self.level2_start_y),
            ("sibling_spacing", self.sibling_spacing),
            ("leaf_height", self.leaf_height),
            ("leaf_gap", self.leaf_gap),
            ("text_line_height", self.text_line_height),
            ("trunk_length", self.trunk_length),
            ("branch_curve_lift", self.branch_curve_lift),
        ];
        if let Some((name, _)) = finite.iter().find(|(_, v)| !v.is_finite()) {
            return Err(DiagramError::layout_error(format!("{} must be finite", name)));
        }

        let positive = [
            ("canvas_width", self.canvas_width),
            ("canvas_height", self.canvas_height),
            ("root_width", self.root_width),
            ("root_height", self.root_height),
            ("branch_width", self.branch_width),
            ("branch_height", self.branch_height),
            ("sibling_spacing", self.sibling_spacing),
            ("leaf_height", self.leaf_height),
            ("text_line_height", self.text_line_height),
        ];
        if let Some((name, value)) = positive.iter().find(|(_, v)| *v <= 0.0) {
            return Err(DiagramError::layout_error(format!(
                "{} must be positive, got {}",
                name, value
            )));
        }

        if self.leaf_gap < 0.0 || self.trunk_length < 0.0 {
            return Err(DiagramError::layout_error(
                "leaf_gap and trunk_length cannot be negative",
            ));
        }
        Ok(())
    }
}

/// 100 megapixels, about 400 MB of RGBA
pub const DEFAULT_MAX_PIXELS: u64 = 100_000_000;

/// How a scene is turned into a raster image
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportOptions {
    /// Leave the background fully transparent instead of white
    pub transparent: bool,
    /// Pixels per canvas unit
    pub scale: f32,
    /// Crop to the smallest rectangle holding any visible pixel
    pub trim: bool,
    /// Largest pixel buffer (width x height) an export may allocate
    pub max_pixels: u64,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            transparent: true,
            scale: 2.0,
            trim: true,
            max_pixels: DEFAULT_MAX_PIXELS,
        }
    }
}

impl ExportOptions {
    pub fn validate(&self) -> Result<(), DiagramError> {
        if !self.scale.is_finite() || self.scale <= 0.0 {
            return Err(DiagramError::export_error(format!(
                "scale must be a positive number, got {}",
                self.scale
            )));
        }
        if self.max_pixels == 0 {
            return Err(DiagramError::export_error("max_pixels must be positive"));
        }
        Ok(())
    }
}

/// Complete pipeline configuration
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    pub parser: ParserOptions,
    pub layout: LayoutConstants,
    pub theme: Theme,
    pub export: ExportOptions,
}

impl RenderConfig {
    /// Parse a (partial) JSON configuration
    pub fn from_json_str(json: &str) -> Result<Self, DiagramError> {
        let config: RenderConfig = serde_json::from_str(json)
            .map_err(|e| DiagramError::config_error(format!("invalid configuration: {}", e)))?;
        config.layout.validate()?;
        config.export.validate()?;
        Ok(config)
    }

    /// Read a (partial) JSON configuration file
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, DiagramError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|e| {
            DiagramError::config_error(format!("cannot read '{}': {}", path.display(), e))
        })?;
        Self::from_json_str(&raw).map_err(|e| match e {
            DiagramError::Config { message } => {
                DiagramError::config_error(format!("{}: {}", path.display(), message))
            }
            other => other,
        })
    }
}

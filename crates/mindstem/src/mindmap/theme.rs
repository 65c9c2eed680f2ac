//! Visual theme for the vector scene

use serde::{Deserialize, Serialize};

use crate::core::Color;

/// Colors, stroke widths and fonts used by the scene builder
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Theme {
    pub background: Color,
    /// Branch colors, picked by level-1 index modulo the palette length
    pub palette: Vec<Color>,
    pub trunk_color: Color,
    pub trunk_width: f64,
    pub branch_width: f64,
    pub sub_branch_width: f64,
    pub sub_branch_opacity: f64,
    pub node_fill: Color,
    pub root_stroke: Color,
    pub root_stroke_width: f64,
    pub branch_box_stroke_width: f64,
    pub corner_radius: f64,
    pub text_color: Color,
    pub leaf_text_color: Color,
    pub root_font_size: f64,
    pub branch_font_size: f64,
    pub leaf_font_size: f64,
    pub font_family: String,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            background: Color::WHITE,
            palette: vec![
                Color::rgb(0xff, 0x76, 0x54),
                Color::rgb(0xff, 0xb8, 0x00),
                Color::rgb(0x6e, 0xd3, 0x5b),
                Color::rgb(0x4d, 0x96, 0xff),
                Color::rgb(0xa0, 0x76, 0xff),
            ],
            trunk_color: Color::rgb(0x6e, 0xd3, 0x5b),
            trunk_width: 6.0,
            branch_width: 5.0,
            sub_branch_width: 2.0,
            sub_branch_opacity: 0.4,
            node_fill: Color::WHITE,
            root_stroke: Color::rgb(0xcb, 0xd5, 0xe1),
            root_stroke_width: 1.0,
            branch_box_stroke_width: 3.0,
            corner_radius: 10.0,
            text_color: Color::rgb(0x1e, 0x29, 0x3b),
            leaf_text_color: Color::rgb(0x64, 0x74, 0x8b),
            root_font_size: 24.0,
            branch_font_size: 18.0,
            leaf_font_size: 16.0,
            font_family: "system-ui, sans-serif".to_string(),
        }
    }
}

impl Theme {
    /// Color of the level-1 column at `index`
    pub fn branch_color(&self, index: usize) -> Color {
        if self.palette.is_empty() {
            return self.trunk_color;
        }
        self.palette[index % self.palette.len()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_palette_wraps() {
        let theme = Theme::default();
        assert_eq!(theme.branch_color(0).to_string(), "#ff7654");
        assert_eq!(theme.branch_color(5), theme.branch_color(0));
        assert_eq!(theme.branch_color(7).to_string(), "#6ed35b");
    }

    #[test]
    fn test_empty_palette_falls_back_to_trunk() {
        let theme = Theme {
            palette: Vec::new(),
            ..Theme::default()
        };
        assert_eq!(theme.branch_color(3), theme.trunk_color);
    }

    #[test]
    fn test_partial_json() {
        let theme: Theme = serde_json::from_str(r##"{"palette": ["#000", "#fff"]}"##).unwrap();
        assert_eq!(theme.palette.len(), 2);
        assert_eq!(theme.trunk_width, 6.0);
    }
}

//! Renderer-agnostic display list
//!
//! A [`Scene`] is the ordered list of shapes for one tree snapshot. Every
//! connector comes before every node shape, so any painter's-algorithm
//! backend draws connectors underneath the boxes and labels.

use serde::Serialize;
use tracing::{debug, span, Level};

use super::layout::{ConnectorGeometry, ConnectorKind, ConnectorPath, LayoutNode, LayoutResult};
use super::theme::Theme;
use super::tree::{NodeId, NodeLevel};
use crate::core::{Color, Point, Rect, Size};

/// Stroke style for connectors and box outlines
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Stroke {
    pub color: Color,
    pub width: f64,
    pub opacity: f64,
    pub round_cap: bool,
}

/// One drawable item
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SceneElement {
    /// Rounded box behind a root or level-1 label
    Rect {
        node: NodeId,
        bounds: Rect,
        radius: f64,
        fill: Color,
        stroke: Stroke,
    },
    /// Horizontally centered text, one entry per line
    Label {
        node: NodeId,
        anchor: Point,
        lines: Vec<String>,
        line_height: f64,
        font_size: f64,
        bold: bool,
        color: Color,
    },
    Line {
        from: Point,
        to: Point,
        stroke: Stroke,
    },
    Curve {
        from: Point,
        c1: Point,
        c2: Point,
        to: Point,
        stroke: Stroke,
    },
}

impl SceneElement {
    pub fn is_connector(&self) -> bool {
        matches!(self, SceneElement::Line { .. } | SceneElement::Curve { .. })
    }
}

/// Display list for one snapshot
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Scene {
    pub size: Size,
    pub background: Color,
    pub font_family: String,
    pub elements: Vec<SceneElement>,
}

impl Scene {
    /// A blank canvas, used for blank input
    pub fn empty(size: Size, theme: &Theme) -> Self {
        Self {
            size,
            background: theme.background,
            font_family: theme.font_family.clone(),
            elements: Vec::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    pub fn connectors(&self) -> impl Iterator<Item = &SceneElement> + '_ {
        self.elements.iter().filter(|e| e.is_connector())
    }

    pub fn labels(&self) -> impl Iterator<Item = &SceneElement> + '_ {
        self.elements
            .iter()
            .filter(|e| matches!(e, SceneElement::Label { .. }))
    }
}

/// Turns a [`LayoutResult`] into a [`Scene`]
#[derive(Debug, Clone, Default)]
pub struct SceneBuilder {
    theme: Theme,
}

impl SceneBuilder {
    pub fn new(theme: Theme) -> Self {
        Self { theme }
    }

    pub fn theme(&self) -> &Theme {
        &self.theme
    }

    pub fn build(&self, layout: &LayoutResult) -> Scene {
        let build_span = span!(
            Level::DEBUG,
            "build_scene",
            connectors = layout.connectors.len()
        );
        let _enter = build_span.enter();

        let mut scene = Scene::empty(layout.canvas, &self.theme);
        scene
            .elements
            .extend(layout.connectors.iter().map(|c| self.connector(c)));
        for node in layout.nodes() {
            self.push_node(&mut scene.elements, node);
        }

        debug!(elements = scene.elements.len(), "Scene built");
        scene
    }

    fn stroke_for(&self, connector: &ConnectorGeometry) -> Stroke {
        let t = &self.theme;
        let branch_color = connector
            .branch_index
            .map_or(t.trunk_color, |i| t.branch_color(i));
        match connector.kind {
            ConnectorKind::Trunk => Stroke {
                color: t.trunk_color,
                width: t.trunk_width,
                opacity: 1.0,
                round_cap: true,
            },
            ConnectorKind::Branch => Stroke {
                color: branch_color,
                width: t.branch_width,
                opacity: 1.0,
                round_cap: true,
            },
            ConnectorKind::SubBranch => Stroke {
                color: branch_color,
                width: t.sub_branch_width,
                opacity: t.sub_branch_opacity,
                round_cap: false,
            },
        }
    }

    fn connector(&self, connector: &ConnectorGeometry) -> SceneElement {
        let stroke = self.stroke_for(connector);
        match connector.path {
            ConnectorPath::Line { from, to } => SceneElement::Line { from, to, stroke },
            ConnectorPath::Cubic { from, c1, c2, to } => SceneElement::Curve {
                from,
                c1,
                c2,
                to,
                stroke,
            },
        }
    }

    fn push_node(&self, elements: &mut Vec<SceneElement>, node: &LayoutNode) {
        let t = &self.theme;
        let (font_size, bold, color) = match node.level {
            NodeLevel::Root => (t.root_font_size, true, t.text_color),
            NodeLevel::Branch => (t.branch_font_size, true, t.text_color),
            NodeLevel::Leaf => (t.leaf_font_size, false, t.leaf_text_color),
        };

        let outline = match node.level {
            NodeLevel::Root => Some(Stroke {
                color: t.root_stroke,
                width: t.root_stroke_width,
                opacity: 1.0,
                round_cap: false,
            }),
            NodeLevel::Branch => Some(Stroke {
                color: t.branch_color(node.id.branch_index().unwrap_or(0)),
                width: t.branch_box_stroke_width,
                opacity: 1.0,
                round_cap: false,
            }),
            NodeLevel::Leaf => None,
        };
        if let Some(stroke) = outline {
            elements.push(SceneElement::Rect {
                node: node.id,
                bounds: node.bounds(),
                radius: t.corner_radius,
                fill: t.node_fill,
                stroke,
            });
        }

        elements.push(SceneElement::Label {
            node: node.id,
            anchor: node.text_anchor,
            lines: node.lines.clone(),
            line_height: node.line_height,
            font_size,
            bold,
            color,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{LayoutAlgorithm, Parser};
    use crate::mindmap::{MindMapLayout, OutlineParser};

    fn scene(input: &str) -> Scene {
        let map = OutlineParser::new().parse(input).unwrap();
        let layout = MindMapLayout::default().layout(&map).unwrap();
        SceneBuilder::default().build(&layout)
    }

    #[test]
    fn test_connectors_precede_nodes() {
        let scene = scene("Root\n- A\n  - A1\n- B");
        let first_node = scene
            .elements
            .iter()
            .position(|e| !e.is_connector())
            .unwrap();
        assert!(scene.elements[first_node..].iter().all(|e| !e.is_connector()));
        assert_eq!(scene.connectors().count(), 4);
    }

    #[test]
    fn test_leaves_have_no_box() {
        let scene = scene("Root\n- A\n  - A1");
        let boxed: Vec<NodeId> = scene
            .elements
            .iter()
            .filter_map(|e| match e {
                SceneElement::Rect { node, .. } => Some(*node),
                _ => None,
            })
            .collect();
        assert_eq!(boxed, vec![NodeId::Root, NodeId::Branch(0)]);
        assert_eq!(scene.labels().count(), 3);
    }

    #[test]
    fn test_branch_colors_follow_palette() {
        let scene = scene("Root\n- A\n  - A1\n- B");
        let theme = Theme::default();
        for element in &scene.elements {
            match element {
                SceneElement::Curve { stroke, to, .. } if to.x < 500.0 => {
                    assert_eq!(stroke.color, theme.branch_color(0));
                }
                SceneElement::Curve { stroke, .. } => {
                    assert_eq!(stroke.color, theme.branch_color(1));
                }
                SceneElement::Line { stroke, from, .. } if from.y > 200.0 => {
                    assert_eq!(stroke.color, theme.branch_color(0));
                    assert_eq!(stroke.opacity, 0.4);
                    assert_eq!(stroke.width, 2.0);
                }
                SceneElement::Line { stroke, .. } => {
                    assert_eq!(stroke.color, theme.trunk_color);
                    assert_eq!(stroke.width, 6.0);
                }
                _ => {}
            }
        }
    }

    #[test]
    fn test_multiline_label_keeps_line_height() {
        let scene = scene("Root\n- Data\\nRAG");
        let label = scene
            .labels()
            .find_map(|e| match e {
                SceneElement::Label {
                    node: NodeId::Branch(0),
                    lines,
                    line_height,
                    ..
                } => Some((lines.clone(), *line_height)),
                _ => None,
            })
            .unwrap();
        assert_eq!(label.0, vec!["Data", "RAG"]);
        assert_eq!(label.1, 22.0);
    }

    #[test]
    fn test_empty_scene() {
        let scene = Scene::empty(Size::new(1000.0, 800.0), &Theme::default());
        assert!(scene.is_empty());
        assert_eq!(scene.background, Color::WHITE);
    }
}

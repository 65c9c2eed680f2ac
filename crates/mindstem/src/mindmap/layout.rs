//! Vertical mind map layout
//!
//! Places the three tiers top to bottom with fixed slots:
//!
//! ```text
//!              [ root ]
//!                 |            trunk
//!        .-------' '-------.   branch curves
//!     [ A ]     [ B ]     [ C ]
//!       |         |
//!      A1        B1            leaves stacked per column
//!       |
//!      A2
//! ```
//!
//! Level-1 columns are spaced uniformly and centered as a group on the
//! canvas center, whatever their text length. Leaves share their column's
//! x and are chained downward, each starting a fixed gap below the previous
//! one's bottom edge. Nothing is measured from rendered output: every
//! coordinate is computed here.

use anyhow::Result;
use serde::Serialize;
use tracing::{debug, info, span, trace, warn, Level};

use super::tree::{MindMap, Node, NodeId, NodeLevel};
use crate::core::{LayoutAlgorithm, LayoutConstants, Point, Rect, Size};

/// A tree node with computed geometry
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LayoutNode {
    pub id: NodeId,
    pub level: NodeLevel,
    pub text: String,
    /// Label split into drawable lines
    pub lines: Vec<String>,
    /// Baseline distance between label lines
    pub line_height: f64,
    pub center: Point,
    pub size: Size,
    /// Position of the first text line; shifted up so that multi-line labels
    /// stay vertically centered on `center`
    pub text_anchor: Point,
    pub children: Vec<LayoutNode>,
}

impl LayoutNode {
    /// Bounding box of the node
    pub fn bounds(&self) -> Rect {
        Rect::centered(self.center, self.size)
    }

    pub fn top(&self) -> f64 {
        self.center.y - self.size.height / 2.0
    }

    pub fn bottom(&self) -> f64 {
        self.center.y + self.size.height / 2.0
    }

    /// This node followed by all of its descendants, pre-order
    pub fn walk(&self) -> Box<dyn Iterator<Item = &LayoutNode> + '_> {
        Box::new(std::iter::once(self).chain(self.children.iter().flat_map(|c| c.walk())))
    }
}

/// Which pair of tiers a connector joins
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ConnectorKind {
    /// Straight stub below the root
    Trunk,
    /// Curve from the trunk end to a level-1 node
    Branch,
    /// Straight segment into a level-2 node
    SubBranch,
}

/// Connector shape in canvas coordinates
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ConnectorPath {
    Line {
        from: Point,
        to: Point,
    },
    Cubic {
        from: Point,
        c1: Point,
        c2: Point,
        to: Point,
    },
}

impl ConnectorPath {
    pub fn start(&self) -> Point {
        match self {
            ConnectorPath::Line { from, .. } | ConnectorPath::Cubic { from, .. } => *from,
        }
    }

    pub fn end(&self) -> Point {
        match self {
            ConnectorPath::Line { to, .. } | ConnectorPath::Cubic { to, .. } => *to,
        }
    }
}

/// A connector and the column it belongs to
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ConnectorGeometry {
    pub kind: ConnectorKind,
    /// Level-1 index the connector leads into; `None` for the trunk
    pub branch_index: Option<usize>,
    pub path: ConnectorPath,
}

/// Output of [`MindMapLayout`]
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LayoutResult {
    pub root: LayoutNode,
    /// Trunk first, then per column its branch curve and sub-branch lines
    pub connectors: Vec<ConnectorGeometry>,
    pub canvas: Size,
    /// Union of every node box
    pub bounds: Rect,
}

impl LayoutResult {
    /// True when some node box sticks out of the canvas
    pub fn overflows(&self) -> bool {
        let canvas = Rect::new(0.0, 0.0, self.canvas.width, self.canvas.height);
        !canvas.contains_rect(&self.bounds)
    }

    pub fn nodes(&self) -> impl Iterator<Item = &LayoutNode> + '_ {
        self.root.walk()
    }

    pub fn find(&self, id: NodeId) -> Option<&LayoutNode> {
        self.nodes().find(|n| n.id == id)
    }
}

/// Fixed-slot vertical layout for three-tier mind maps
#[derive(Debug, Clone, Copy, Default)]
pub struct MindMapLayout {
    constants: LayoutConstants,
}

impl MindMapLayout {
    pub fn new(constants: LayoutConstants) -> Self {
        Self { constants }
    }

    pub fn constants(&self) -> &LayoutConstants {
        &self.constants
    }

    /// Horizontal center of level-1 column `index` out of `count`
    pub fn column_x(&self, index: usize, count: usize) -> f64 {
        let offset = index as f64 - (count as f64 - 1.0) / 2.0;
        self.constants.center_x + offset * self.constants.sibling_spacing
    }

    fn leaf_height(&self, line_count: usize) -> f64 {
        let extra = line_count.saturating_sub(1) as f64;
        self.constants.leaf_height + extra * self.constants.text_line_height
    }

    /// Box of `width` x `height` whose top edge is at `top`, centered on `x`
    fn slot(x: f64, top: f64, width: f64, height: f64) -> Rect {
        Rect::new(x - width / 2.0, top, width, height)
    }

    fn place(&self, node: &Node, slot: Rect) -> LayoutNode {
        let center = slot.center();
        let size = Size::new(slot.width, slot.height);
        let lines: Vec<String> = node.lines().into_iter().map(str::to_string).collect();
        let shift = lines.len().saturating_sub(1) as f64 * self.constants.text_line_height / 2.0;
        LayoutNode {
            id: node.id(),
            level: node.level(),
            text: node.text().to_string(),
            lines,
            line_height: self.constants.text_line_height,
            center,
            size,
            text_anchor: Point::new(center.x, center.y - shift),
            children: Vec::new(),
        }
    }

    fn layout_column(
        &self,
        branch: &Node,
        x: f64,
        trunk_end: Point,
        connectors: &mut Vec<ConnectorGeometry>,
    ) -> LayoutNode {
        let c = &self.constants;
        let index = branch.id().branch_index();
        let mut column = self.place(
            branch,
            Self::slot(x, c.level1_y, c.branch_width, c.branch_height),
        );

        let lift = c.level1_y - c.branch_curve_lift;
        connectors.push(ConnectorGeometry {
            kind: ConnectorKind::Branch,
            branch_index: index,
            path: ConnectorPath::Cubic {
                from: trunk_end,
                c1: Point::new(trunk_end.x, lift),
                c2: Point::new(x, lift),
                to: Point::new(x, c.level1_y),
            },
        });

        let mut previous_bottom = column.bottom();
        let mut top = c.level2_start_y;
        for leaf in branch.children() {
            let height = self.leaf_height(leaf.lines().len());
            let placed = self.place(leaf, Self::slot(x, top, c.branch_width, height));
            trace!(id = %placed.id, top, height, "Placed leaf");

            connectors.push(ConnectorGeometry {
                kind: ConnectorKind::SubBranch,
                branch_index: index,
                path: ConnectorPath::Line {
                    from: Point::new(x, previous_bottom),
                    to: Point::new(x, top),
                },
            });

            previous_bottom = placed.bottom();
            top = previous_bottom + c.leaf_gap;
            column.children.push(placed);
        }
        column
    }
}

impl LayoutAlgorithm<MindMap> for MindMapLayout {
    type Output = LayoutResult;

    fn layout(&self, map: &MindMap) -> Result<Self::Output> {
        let layout_span = span!(
            Level::INFO,
            "layout_mindmap",
            branch_count = map.branches().len(),
            leaf_count = map.leaf_count()
        );
        let _enter = layout_span.enter();

        self.constants.validate()?;
        let c = &self.constants;

        let mut root = self.place(
            map.root(),
            Self::slot(c.center_x, c.root_y, c.root_width, c.root_height),
        );

        let trunk_start = Point::new(c.center_x, root.bottom());
        let trunk_end = Point::new(c.center_x, trunk_start.y + c.trunk_length);
        let mut connectors = vec![ConnectorGeometry {
            kind: ConnectorKind::Trunk,
            branch_index: None,
            path: ConnectorPath::Line {
                from: trunk_start,
                to: trunk_end,
            },
        }];

        let count = map.branches().len();
        for (i, branch) in map.branches().iter().enumerate() {
            let x = self.column_x(i, count);
            debug!(index = i, x, leaves = branch.children().len(), "Placing column");
            let column = self.layout_column(branch, x, trunk_end, &mut connectors);
            root.children.push(column);
        }

        let bounds = root
            .walk()
            .skip(1)
            .fold(root.bounds(), |acc, node| acc.union(&node.bounds()));

        let result = LayoutResult {
            root,
            connectors,
            canvas: Size::new(c.canvas_width, c.canvas_height),
            bounds,
        };

        if result.overflows() {
            warn!(
                bounds = ?result.bounds,
                canvas_width = c.canvas_width,
                canvas_height = c.canvas_height,
                "Mind map extends past the canvas"
            );
        }

        info!(
            connectors = result.connectors.len(),
            "Layout complete"
        );
        Ok(result)
    }

    fn name(&self) -> &'static str {
        "vertical"
    }

    fn version(&self) -> &'static str {
        "0.1.0"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Parser;
    use crate::mindmap::OutlineParser;

    fn layout(input: &str) -> LayoutResult {
        let map = OutlineParser::new().parse(input).unwrap();
        MindMapLayout::default().layout(&map).unwrap()
    }

    #[test]
    fn test_root_placement() {
        let result = layout("Root");
        assert_eq!(result.root.center, Point::new(500.0, 80.0));
        assert_eq!(result.root.bounds(), Rect::new(410.0, 50.0, 180.0, 60.0));
        assert_eq!(result.connectors.len(), 1);
        assert_eq!(
            result.connectors[0].path,
            ConnectorPath::Line {
                from: Point::new(500.0, 110.0),
                to: Point::new(500.0, 130.0)
            }
        );
    }

    #[test]
    fn test_boxes_hang_from_their_top_edges() {
        let result = layout("Root\n- A\n  - A1\n  - A2\\nmore\n- B");
        let a = &result.root.children[0];
        assert_eq!(a.top(), 250.0);
        assert_eq!(a.children[0].top(), 380.0);
        assert_eq!(a.children[1].top(), 460.0);
        for node in result.nodes() {
            assert_eq!(node.bounds().center(), node.center);
        }
    }

    #[test]
    fn test_columns_are_centered() {
        let result = layout("Root\n- A\n- B\n- C");
        let xs: Vec<f64> = result.root.children.iter().map(|n| n.center.x).collect();
        assert_eq!(xs, vec![220.0, 500.0, 780.0]);
        assert!(result.root.children.iter().all(|n| n.center.y == 280.0));
    }

    #[test]
    fn test_branch_curve_control_points() {
        let result = layout("Root\n- A\n- B");
        let branch = result
            .connectors
            .iter()
            .find(|c| c.kind == ConnectorKind::Branch && c.branch_index == Some(0))
            .unwrap();
        assert_eq!(
            branch.path,
            ConnectorPath::Cubic {
                from: Point::new(500.0, 130.0),
                c1: Point::new(500.0, 190.0),
                c2: Point::new(360.0, 190.0),
                to: Point::new(360.0, 250.0),
            }
        );
    }

    #[test]
    fn test_leaves_step_by_eighty() {
        let result = layout("Root\n- A\n  - A1\n  - A2\n  - A3");
        let tops: Vec<f64> = result.root.children[0]
            .children
            .iter()
            .map(|n| n.top())
            .collect();
        assert_eq!(tops, vec![380.0, 460.0, 540.0]);
    }

    #[test]
    fn test_multiline_leaf_pushes_next_down() {
        let result = layout("Root\n- A\n  - one\\ntwo\n  - next");
        let leaves = &result.root.children[0].children;
        assert_eq!(leaves[0].size.height, 52.0);
        assert_eq!(leaves[1].top(), 380.0 + 52.0 + 50.0);
        // first text line stays where a single-line label would sit
        assert_eq!(leaves[0].text_anchor.y, 395.0);
    }

    #[test]
    fn test_text_anchor_shift() {
        let result = layout("Root\n- a\\nb\\nc");
        let node = &result.root.children[0];
        assert_eq!(node.text_anchor.y, 280.0 - 22.0);
        assert_eq!(node.lines, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_sub_branch_chain() {
        let result = layout("Root\n- A\n  - A1\n  - A2");
        let subs: Vec<ConnectorPath> = result
            .connectors
            .iter()
            .filter(|c| c.kind == ConnectorKind::SubBranch)
            .map(|c| c.path)
            .collect();
        assert_eq!(subs.len(), 2);
        assert_eq!(subs[0].start(), Point::new(500.0, 310.0));
        assert_eq!(subs[0].end(), Point::new(500.0, 380.0));
        assert_eq!(subs[1].start(), Point::new(500.0, 410.0));
        assert_eq!(subs[1].end(), Point::new(500.0, 460.0));
    }

    #[test]
    fn test_overflow_detection() {
        assert!(!layout("Root\n- A\n- B").overflows());
        assert!(layout("Root\n- A\n- B\n- C\n- D\n- E").overflows());
    }

    #[test]
    fn test_invalid_constants_rejected() {
        let map = OutlineParser::new().parse("Root").unwrap();
        let layout = MindMapLayout::new(LayoutConstants {
            branch_height: -1.0,
            ..LayoutConstants::default()
        });
        assert!(layout.layout(&map).is_err());
    }

    #[test]
    fn test_find_by_id() {
        let result = layout("Root\n- A\n  - A1");
        let leaf = result.find(NodeId::Leaf(0, 0)).unwrap();
        assert_eq!(leaf.text, "A1");
        assert_eq!(leaf.level, NodeLevel::Leaf);
    }
}

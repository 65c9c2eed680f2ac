//! Terminal preview of a mind map
//!
//! Lays the tree out as text: the root box on top, a trunk and a horizontal
//! bus under it, one column per level-1 node, and leaves stacked in each
//! column. Column widths come from the labels themselves (measured with
//! `unicode-width`), so nothing overlaps here even when the vector layout
//! would.
//!
//! ```text
//!            ╭──────╮
//!            │ Root │
//!            ╰──────╯
//!               │
//!       ╭───────┴──────╮
//!       │              │
//!     ╭───╮          ╭───╮
//!     │ A │          │ B │
//!     ╰───╯          ╰───╯
//!       │
//!       A1
//! ```

use anyhow::Result;
use tracing::{debug, span, Level};

use super::tree::{MindMap, Node};
use crate::core::{max_line_width, CharacterSet, Renderer, TextCanvas};

/// Gap between neighbouring columns
const COLUMN_GAP: usize = 3;

/// Box and connector glyphs for one character set
#[derive(Debug, Clone, Copy)]
struct Glyphs {
    top_left: char,
    top_right: char,
    bottom_left: char,
    bottom_right: char,
    horizontal: char,
    vertical: char,
    ascii: bool,
}

impl Glyphs {
    fn for_style(style: CharacterSet) -> Self {
        match style {
            CharacterSet::Ascii => Self {
                top_left: '+',
                top_right: '+',
                bottom_left: '+',
                bottom_right: '+',
                horizontal: '-',
                vertical: '|',
                ascii: true,
            },
            CharacterSet::Unicode => Self {
                top_left: '╭',
                top_right: '╮',
                bottom_left: '╰',
                bottom_right: '╯',
                horizontal: '─',
                vertical: '│',
                ascii: false,
            },
        }
    }

    /// Glyph where lines leave a cell in the given directions
    fn junction(&self, up: bool, down: bool, left: bool, right: bool) -> char {
        if self.ascii {
            return match (up || down, left || right) {
                (true, true) => '+',
                (true, false) => '|',
                _ => '-',
            };
        }
        match (up, down, left, right) {
            (false, true, false, true) => '╭',
            (false, true, true, false) => '╮',
            (true, false, false, true) => '╰',
            (true, false, true, false) => '╯',
            (false, true, true, true) => '┬',
            (true, false, true, true) => '┴',
            (true, true, false, true) => '├',
            (true, true, true, false) => '┤',
            (true, true, true, true) => '┼',
            (_, _, false, false) => '│',
            _ => '─',
        }
    }
}

/// Text renderer for mind maps
#[derive(Debug, Clone, Copy, Default)]
pub struct TextRenderer {
    style: CharacterSet,
}

struct Column<'a> {
    branch: &'a Node,
    center: usize,
}

impl TextRenderer {
    pub fn new(style: CharacterSet) -> Self {
        Self { style }
    }

    pub fn style(&self) -> CharacterSet {
        self.style
    }

    fn box_width(node: &Node) -> usize {
        max_line_width(node.text()) + 4
    }

    fn column_width(branch: &Node) -> usize {
        branch
            .children()
            .iter()
            .map(|leaf| max_line_width(leaf.text()))
            .fold(Self::box_width(branch), usize::max)
    }

    /// Draw a bordered box centered on `center`; returns the row below it
    fn draw_box(
        &self,
        canvas: &mut TextCanvas,
        glyphs: &Glyphs,
        node: &Node,
        center: usize,
        top: usize,
        tint: Option<usize>,
    ) -> usize {
        let width = Self::box_width(node);
        let left = center.saturating_sub(width / 2);
        let right = left + width - 1;
        let lines = node.lines();
        let bottom = top + lines.len() + 1;

        canvas.hline(left, right, top, glyphs.horizontal, tint);
        canvas.hline(left, right, bottom, glyphs.horizontal, tint);
        canvas.vline(left, top, bottom, glyphs.vertical, tint);
        canvas.vline(right, top, bottom, glyphs.vertical, tint);
        canvas.put(left, top, glyphs.top_left, tint);
        canvas.put(right, top, glyphs.top_right, tint);
        canvas.put(left, bottom, glyphs.bottom_left, tint);
        canvas.put(right, bottom, glyphs.bottom_right, tint);

        for (i, line) in lines.iter().enumerate() {
            canvas.text_centered(left + width / 2, top + 1 + i, line, None);
        }
        bottom + 1
    }

    /// Render onto a canvas whose cell tints are level-1 column indexes
    pub fn render_canvas(&self, map: &MindMap) -> TextCanvas {
        let glyphs = Glyphs::for_style(self.style);
        let branches = map.branches();

        // Columns left to right, then center the root over them
        let mut columns = Vec::with_capacity(branches.len());
        let mut x = 0usize;
        for branch in branches {
            let width = Self::column_width(branch);
            columns.push(Column {
                branch,
                center: x + width / 2,
            });
            x += width + COLUMN_GAP;
        }

        let root_width = Self::box_width(map.root());
        let mut root_center = match (columns.first(), columns.last()) {
            (Some(first), Some(last)) => (first.center + last.center) / 2,
            _ => root_width / 2,
        };
        if root_center < root_width / 2 {
            let shift = root_width / 2 - root_center;
            root_center += shift;
            for column in &mut columns {
                column.center += shift;
            }
        }

        let mut canvas = TextCanvas::new(x.max(root_width), 3);
        let trunk_row = self.draw_box(&mut canvas, &glyphs, map.root(), root_center, 0, None);
        if columns.is_empty() {
            return canvas;
        }

        let bus_row = trunk_row + 1;
        let drop_row = bus_row + 1;
        let box_row = drop_row + 1;
        canvas.put(root_center, trunk_row, glyphs.vertical, None);

        let min = columns.iter().map(|c| c.center).min().unwrap_or(root_center);
        let max = columns.iter().map(|c| c.center).max().unwrap_or(root_center);
        for x in min.min(root_center)..=max.max(root_center) {
            let up = x == root_center;
            let down = columns.iter().any(|c| c.center == x);
            let ch = glyphs.junction(up, down, x > min, x < max);
            canvas.put(x, bus_row, ch, None);
        }

        for (i, column) in columns.iter().enumerate() {
            let tint = Some(i);
            canvas.put(column.center, drop_row, glyphs.vertical, tint);
            let mut row =
                self.draw_box(&mut canvas, &glyphs, column.branch, column.center, box_row, tint);
            for leaf in column.branch.children() {
                canvas.put(column.center, row, glyphs.vertical, tint);
                row += 1;
                for line in leaf.lines() {
                    canvas.text_centered(column.center, row, line, None);
                    row += 1;
                }
            }
        }
        canvas
    }
}

impl Renderer<MindMap> for TextRenderer {
    type Output = String;

    fn render(&self, map: &MindMap) -> Result<String> {
        let render_span = span!(
            Level::INFO,
            "render_text",
            node_count = map.node_count(),
            style = %self.style
        );
        let _enter = render_span.enter();

        let canvas = self.render_canvas(map);
        debug!(
            width = canvas.width(),
            height = canvas.height(),
            "Text preview rendered"
        );
        Ok(canvas.to_string())
    }

    fn name(&self) -> &'static str {
        "text"
    }

    fn format(&self) -> &'static str {
        "text"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Parser;
    use crate::mindmap::OutlineParser;

    fn preview(input: &str, style: CharacterSet) -> String {
        let map = OutlineParser::new().parse(input).unwrap();
        TextRenderer::new(style).render(&map).unwrap()
    }

    #[test]
    fn test_root_only() {
        let out = preview("Root", CharacterSet::Unicode);
        assert_eq!(out, "╭──────╮\n│ Root │\n╰──────╯");
    }

    #[test]
    fn test_single_column_is_straight() {
        let out = preview("Root\n- A\n  - A1", CharacterSet::Ascii);
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines[0], "+------+");
        assert_eq!(lines[3].trim(), "|");
        assert_eq!(lines[4].trim(), "|");
        assert!(out.contains("| A |"));
        assert!(lines.last().unwrap().contains("A1"));
    }

    #[test]
    fn test_bus_joins_columns() {
        let out = preview("Root\n- A\n- B", CharacterSet::Unicode);
        let bus = out.lines().nth(4).unwrap();
        assert!(bus.trim().starts_with('╭'));
        assert!(bus.contains('┴'));
        assert!(bus.trim_end().ends_with('╮'));
    }

    #[test]
    fn test_columns_do_not_overlap() {
        let out = preview(
            "Root\n- a long level one label\n  - leaf\n- another long label",
            CharacterSet::Ascii,
        );
        let row = out
            .lines()
            .find(|l| l.contains("a long level one label"))
            .unwrap();
        assert!(row.contains("another long label"));
    }

    #[test]
    fn test_wide_labels_measured_by_columns() {
        let out = preview("訪談", CharacterSet::Unicode);
        assert_eq!(out.lines().next().unwrap(), "╭──────╮");
    }

    #[test]
    fn test_tints_mark_columns() {
        let map = OutlineParser::new().parse("Root\n- A\n- B").unwrap();
        let canvas = TextRenderer::default().render_canvas(&map);
        let tints: Vec<usize> = canvas
            .spans()
            .iter()
            .flatten()
            .filter_map(|s| s.tint)
            .collect();
        assert!(tints.contains(&0));
        assert!(tints.contains(&1));
    }
}

//! Outline parser
//!
//! Turns indented text into a [`MindMap`]:
//!
//! ```text
//! Root text
//! - Level-1 node
//!   - Level-2 node under the branch above
//! ```
//!
//! Parsing is tolerant. Blank lines are skipped, and lines that fit neither
//! tier (no marker, a marker indented less than one unit, or a level-2 line
//! before any level-1 line) are dropped with a debug event. Markers indented
//! by more than one unit still become level-2 nodes: the tree never grows a
//! fourth tier.

use tracing::{debug, info, span, trace, Level};

use super::syntax::{classify_line, OutlineLine};
use super::tree::{MindMap, MindMapBuilder};
use crate::core::{unescape_line_breaks, Parser, ParserOptions};

/// Why a line was left out of the tree
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// Text without a `-` marker
    Unmarked,
    /// Marker indented, but by less than one indent unit
    ShallowIndent,
    /// Level-2 line with no level-1 line before it
    Orphan,
}

/// What a single outline line contributes
#[derive(Debug, Clone, PartialEq, Eq)]
enum LineRole {
    Branch(String),
    Leaf(String),
    Skip(SkipReason),
}

/// Indented-outline parser
#[derive(Debug, Clone, Copy, Default)]
pub struct OutlineParser {
    options: ParserOptions,
}

impl OutlineParser {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: ParserOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> ParserOptions {
        self.options
    }

    fn role(&self, line: OutlineLine) -> LineRole {
        let unit = self.options.indent_unit.max(1);
        if !line.marked {
            return LineRole::Skip(SkipReason::Unmarked);
        }
        let text = unescape_line_breaks(&line.text);
        match line.indent {
            0 => LineRole::Branch(text),
            n if n < unit => LineRole::Skip(SkipReason::ShallowIndent),
            n => {
                if n > unit {
                    debug!(indent = n, unit, "Deep indentation flattened to level 2");
                }
                LineRole::Leaf(text)
            }
        }
    }
}

impl Parser for OutlineParser {
    type Output = Option<MindMap>;

    fn parse(&self, input: &str) -> Option<MindMap> {
        let parse_span = span!(Level::INFO, "parse_outline", input_len = input.len());
        let _enter = parse_span.enter();

        let mut lines = input
            .lines()
            .enumerate()
            .filter(|(_, line)| !line.trim().is_empty());

        let Some((_, first)) = lines.next() else {
            debug!("Outline is blank");
            return None;
        };

        let mut builder = MindMapBuilder::new(unescape_line_breaks(first.trim()));
        let mut skipped = 0usize;

        for (index, raw) in lines {
            let line_no = index + 1;
            let Some(line) = classify_line(raw, self.options.indent_unit) else {
                skipped += 1;
                continue;
            };
            trace!(line_no, indent = line.indent, marked = line.marked, "Classified line");

            let reason = match self.role(line) {
                LineRole::Branch(text) => {
                    builder.push_branch(text);
                    continue;
                }
                LineRole::Leaf(text) => match builder.push_leaf(text) {
                    Some(_) => continue,
                    None => SkipReason::Orphan,
                },
                LineRole::Skip(reason) => reason,
            };
            skipped += 1;
            debug!(line_no, ?reason, "Dropped outline line");
        }

        let map = builder.finish();
        info!(
            branches = map.branches().len(),
            leaves = map.leaf_count(),
            skipped,
            "Outline parsed"
        );
        Some(map)
    }

    fn name(&self) -> &'static str {
        "outline"
    }

    fn version(&self) -> &'static str {
        "0.1.0"
    }
}

//! Terminal colorization for the text preview
//!
//! Cells drawn for a level-1 column carry that column's index as a tint;
//! the tint is mapped to the theme's branch color with crossterm.

use crossterm::style::{Color, Stylize};
use mindstem::mindmap::Theme;
use mindstem::Span;

fn terminal_color(color: mindstem::Color) -> Color {
    Color::Rgb {
        r: color.r,
        g: color.g,
        b: color.b,
    }
}

/// Render tinted rows with ANSI colors
pub fn colorize_rows(rows: &[Vec<Span>], theme: &Theme) -> String {
    let last = rows.iter().rposition(|r| !r.is_empty()).map_or(0, |i| i + 1);
    let mut result = String::new();
    for (i, row) in rows[..last].iter().enumerate() {
        if i > 0 {
            result.push('\n');
        }
        for span in row {
            match span.tint {
                Some(index) => {
                    let color = terminal_color(theme.branch_color(index));
                    result.push_str(&format!("{}", span.text.clone().with(color)));
                }
                None => result.push_str(&span.text),
            }
        }
    }
    result
}

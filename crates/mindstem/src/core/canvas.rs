//! Character grid used by the terminal preview
//!
//! Each cell holds one character plus an optional tint (a palette index the
//! caller can map to a terminal color). Wide characters take two cells; the
//! second one is a continuation cell that is skipped on output.

use unicode_width::UnicodeWidthChar;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Cell {
    ch: char,
    tint: Option<usize>,
    continuation: bool,
}

impl Cell {
    const BLANK: Cell = Cell {
        ch: ' ',
        tint: None,
        continuation: false,
    };
}

/// A run of characters that share one tint
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Span {
    pub text: String,
    pub tint: Option<usize>,
}

/// Growable character grid
#[derive(Debug, Clone)]
pub struct TextCanvas {
    width: usize,
    height: usize,
    cells: Vec<Vec<Cell>>,
}

impl TextCanvas {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            cells: vec![vec![Cell::BLANK; width]; height],
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    fn grow(&mut self, min_width: usize, min_height: usize) {
        if min_width > self.width {
            for row in &mut self.cells {
                row.resize(min_width, Cell::BLANK);
            }
            self.width = min_width;
        }
        while self.height < min_height {
            self.cells.push(vec![Cell::BLANK; self.width]);
            self.height += 1;
        }
    }

    /// Put one character; returns how many columns it occupied
    pub fn put(&mut self, x: usize, y: usize, ch: char, tint: Option<usize>) -> usize {
        let cols = UnicodeWidthChar::width(ch).unwrap_or(0).max(1);
        self.grow(x + cols, y + 1);
        self.cells[y][x] = Cell {
            ch,
            tint,
            continuation: false,
        };
        for extra in 1..cols {
            self.cells[y][x + extra] = Cell {
                ch: ' ',
                tint,
                continuation: true,
            };
        }
        cols
    }

    pub fn get(&self, x: usize, y: usize) -> char {
        self.cells
            .get(y)
            .and_then(|row| row.get(x))
            .map_or(' ', |cell| cell.ch)
    }

    /// Write text starting at column `x`
    pub fn text(&mut self, x: usize, y: usize, text: &str, tint: Option<usize>) {
        let mut col = x;
        for ch in text.chars() {
            col += self.put(col, y, ch, tint);
        }
    }

    /// Write text centered on column `center`
    pub fn text_centered(&mut self, center: usize, y: usize, text: &str, tint: Option<usize>) {
        let width = crate::core::display_width(text);
        self.text(center.saturating_sub(width / 2), y, text, tint);
    }

    pub fn hline(&mut self, x1: usize, x2: usize, y: usize, ch: char, tint: Option<usize>) {
        let (start, end) = if x1 <= x2 { (x1, x2) } else { (x2, x1) };
        for x in start..=end {
            self.put(x, y, ch, tint);
        }
    }

    pub fn vline(&mut self, x: usize, y1: usize, y2: usize, ch: char, tint: Option<usize>) {
        let (start, end) = if y1 <= y2 { (y1, y2) } else { (y2, y1) };
        for y in start..=end {
            self.put(x, y, ch, tint);
        }
    }

    /// Rows as tinted spans, trailing blanks removed
    pub fn spans(&self) -> Vec<Vec<Span>> {
        self.cells
            .iter()
            .map(|row| {
                let visible = row
                    .iter()
                    .rposition(|c| c.ch != ' ' && !c.continuation)
                    .map_or(0, |i| i + 1);
                let mut spans: Vec<Span> = Vec::new();
                for cell in row[..visible].iter().filter(|c| !c.continuation) {
                    match spans.last_mut() {
                        Some(span) if span.tint == cell.tint => span.text.push(cell.ch),
                        _ => spans.push(Span {
                            text: cell.ch.to_string(),
                            tint: cell.tint,
                        }),
                    }
                }
                spans
            })
            .collect()
    }
}

impl std::fmt::Display for TextCanvas {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let rows: Vec<String> = self
            .spans()
            .into_iter()
            .map(|row| row.into_iter().map(|s| s.text).collect())
            .collect();
        let last = rows.iter().rposition(|r| !r.is_empty()).map_or(0, |i| i + 1);
        write!(f, "{}", rows[..last].join("\n"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_put_grows_canvas() {
        let mut canvas = TextCanvas::new(2, 2);
        canvas.put(5, 4, 'x', None);
        assert!(canvas.width() >= 6);
        assert!(canvas.height() >= 5);
        assert_eq!(canvas.get(5, 4), 'x');
        assert_eq!(canvas.get(0, 0), ' ');
    }

    #[test]
    fn test_wide_chars_take_two_columns() {
        let mut canvas = TextCanvas::new(10, 1);
        canvas.text(0, 0, "訪a", None);
        assert_eq!(canvas.get(0, 0), '訪');
        assert_eq!(canvas.get(2, 0), 'a');
        assert_eq!(canvas.to_string(), "訪a");
    }

    #[test]
    fn test_text_centered() {
        let mut canvas = TextCanvas::new(20, 1);
        canvas.text_centered(10, 0, "Hi", None);
        assert_eq!(canvas.get(9, 0), 'H');
        assert_eq!(canvas.get(10, 0), 'i');
    }

    #[test]
    fn test_spans_group_by_tint() {
        let mut canvas = TextCanvas::new(10, 1);
        canvas.hline(0, 2, 0, '-', Some(1));
        canvas.text(3, 0, "ab", None);
        let rows = canvas.spans();
        assert_eq!(
            rows[0],
            vec![
                Span {
                    text: "---".into(),
                    tint: Some(1)
                },
                Span {
                    text: "ab".into(),
                    tint: None
                },
            ]
        );
    }

    #[test]
    fn test_display_drops_trailing_blank_rows() {
        let mut canvas = TextCanvas::new(10, 6);
        canvas.vline(1, 0, 1, '|', None);
        assert_eq!(canvas.to_string(), " |\n |");
    }
}

//! Line grammar for outline text
//!
//! Each physical line is classified independently:
//!
//! ```text
//! <indent: spaces/tabs> [ "-" <whitespace | end> ] <text>
//! ```
//!
//! The grammar accepts every line; deciding what a line means is left to the
//! parser.

use chumsky::prelude::*;

/// One classified outline line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutlineLine {
    /// Leading indentation in columns, with tabs expanded to `indent_unit`
    pub indent: usize,
    /// Whether the line starts with a `-` list marker
    pub marked: bool,
    /// Remaining text after the indent and marker, trimmed
    pub text: String,
}

fn marker<'src>() -> impl Parser<'src, &'src str, ()> + Clone {
    just('-')
        .then(
            one_of(" \t")
                .repeated()
                .at_least(1)
                .ignored()
                .or(end()),
        )
        .ignored()
}

fn line_parser<'src>() -> impl Parser<'src, &'src str, (String, bool, String)> + Clone {
    let indent = one_of(" \t").repeated().collect::<String>();
    let rest = any().repeated().collect::<String>();

    indent
        .then(marker().or_not().map(|m| m.is_some()))
        .then(rest)
        .then_ignore(end())
        .map(|((indent, marked), rest)| (indent, marked, rest))
}

/// Classify a single line. `indent_unit` is the width a tab counts for.
pub fn classify_line(line: &str, indent_unit: usize) -> Option<OutlineLine> {
    let (indent, marked, rest) = line_parser().parse(line).into_result().ok()?;
    let indent = indent
        .chars()
        .map(|c| if c == '\t' { indent_unit.max(1) } else { 1 })
        .sum();
    Some(OutlineLine {
        indent,
        marked,
        text: rest.trim().to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_top_level_marker() {
        let line = classify_line("- Branch", 2).unwrap();
        assert_eq!(
            line,
            OutlineLine {
                indent: 0,
                marked: true,
                text: "Branch".into()
            }
        );
    }

    #[test]
    fn test_indented_marker() {
        let line = classify_line("  - Leaf  ", 2).unwrap();
        assert_eq!(line.indent, 2);
        assert!(line.marked);
        assert_eq!(line.text, "Leaf");
    }

    #[test]
    fn test_tab_counts_as_unit() {
        let line = classify_line("\t- Leaf", 4).unwrap();
        assert_eq!(line.indent, 4);
        assert!(line.marked);
    }

    #[test]
    fn test_dash_without_space_is_text() {
        let line = classify_line("-5 degrees", 2).unwrap();
        assert!(!line.marked);
        assert_eq!(line.text, "-5 degrees");
    }

    #[test]
    fn test_bare_marker() {
        let line = classify_line("-", 2).unwrap();
        assert!(line.marked);
        assert_eq!(line.text, "");
    }

    #[test]
    fn test_plain_text() {
        let line = classify_line("just words", 2).unwrap();
        assert_eq!(line.indent, 0);
        assert!(!line.marked);
        assert_eq!(line.text, "just words");
    }
}

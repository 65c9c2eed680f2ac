//! Shared label utilities
//!
//! Labels may carry the two-character escape `\n`, which becomes a real line
//! break. Widths are measured in terminal display columns.

use unicode_width::UnicodeWidthStr;

/// Characters that are not allowed in file names on common filesystems
pub const ILLEGAL_FILE_CHARS: &[char] = &['\\', '/', ':', '*', '?', '"', '<', '>', '|'];

/// Replace every literal backslash-n sequence with a line break.
///
/// ```
/// use mindstem::core::unescape_line_breaks;
///
/// assert_eq!(unescape_line_breaks(r"Data\nAnalysis"), "Data\nAnalysis");
/// ```
pub fn unescape_line_breaks(text: &str) -> String {
    text.replace("\\n", "\n")
}

/// Split a label into its drawable lines. Always yields at least one line.
pub fn label_lines(text: &str) -> Vec<&str> {
    text.split('\n').collect()
}

/// Display width of a single line in terminal columns
pub fn display_width(line: &str) -> usize {
    UnicodeWidthStr::width(line)
}

/// Widest line of a (possibly multi-line) label
pub fn max_line_width(text: &str) -> usize {
    label_lines(text)
        .into_iter()
        .map(display_width)
        .max()
        .unwrap_or(0)
}

/// Replace characters that would make an invalid file name with `_`
pub fn sanitize_file_stem(stem: &str) -> String {
    stem.chars()
        .map(|c| {
            if ILLEGAL_FILE_CHARS.contains(&c) || c.is_control() {
                '_'
            } else {
                c
            }
        })
        .collect()
}

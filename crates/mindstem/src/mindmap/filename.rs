//! Suggested file names for exported images

use chrono::NaiveDateTime;

use crate::core::sanitize_file_stem;

/// Stem used when the text has no usable first line
pub const FALLBACK_STEM: &str = "mindmap";

/// Characters of the first line kept in the stem
pub const MAX_STEM_CHARS: usize = 50;

/// `<first line>-YYYYMMDD-HHmmss.png`
///
/// The first line is taken from the trimmed text, cut to
/// [`MAX_STEM_CHARS`] characters, trimmed again and stripped of characters
/// that are not allowed in file names.
///
/// ```
/// use chrono::NaiveDate;
/// use mindstem::mindmap::export_file_name;
///
/// let at = NaiveDate::from_ymd_opt(2024, 3, 9).unwrap().and_hms_opt(7, 5, 1).unwrap();
/// assert_eq!(export_file_name("Plans: 2024?\n- A", at), "Plans_ 2024_-20240309-070501.png");
/// ```
pub fn export_file_name(text: &str, timestamp: NaiveDateTime) -> String {
    let first_line: String = text
        .trim()
        .lines()
        .next()
        .unwrap_or_default()
        .chars()
        .take(MAX_STEM_CHARS)
        .collect();
    let stem = sanitize_file_stem(first_line.trim());
    let stem = if stem.is_empty() {
        FALLBACK_STEM
    } else {
        stem.as_str()
    };
    format!("{}-{}.png", stem, timestamp.format("%Y%m%d-%H%M%S"))
}

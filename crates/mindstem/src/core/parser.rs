//! Core parser trait for outline text
//!
//! A parser turns a raw text snapshot into a fresh, immutable structure.
//! Parsers in this crate are tolerant: malformed input is skipped rather than
//! reported, so `parse` does not return a `Result`.

/// Core trait for text parsers
///
/// # Example
/// ```
/// use mindstem::core::Parser;
/// use mindstem::mindmap::OutlineParser;
///
/// let parser = OutlineParser::new();
/// let map = parser.parse("Root\n- Branch").unwrap();
/// assert_eq!(map.root().text(), "Root");
/// ```
pub trait Parser: Send + Sync {
    /// The structure produced for one text snapshot
    type Output;

    /// Parse a complete text snapshot
    fn parse(&self, input: &str) -> Self::Output;

    /// Get the name of this parser
    fn name(&self) -> &'static str;

    /// Get the version of this parser
    fn version(&self) -> &'static str;
}

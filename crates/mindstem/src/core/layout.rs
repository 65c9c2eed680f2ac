//! Core layout trait for diagram positioning
//!
//! A layout algorithm assigns coordinates to every element of its input.
//! Implementations must be deterministic: the same input and constants always
//! give bit-identical output.

use anyhow::Result;

/// Core trait for layout algorithms
///
/// # Example
/// ```
/// use mindstem::core::{LayoutAlgorithm, Parser};
/// use mindstem::mindmap::{MindMapLayout, OutlineParser};
///
/// let map = OutlineParser::new().parse("Root\n- A\n- B").unwrap();
/// let result = MindMapLayout::default().layout(&map).unwrap();
/// assert_eq!(result.root.children.len(), 2);
/// ```
pub trait LayoutAlgorithm<T>: Send + Sync {
    /// The positioned output of this layout algorithm
    type Output;

    /// Position every element of `input`
    fn layout(&self, input: &T) -> Result<Self::Output>;

    /// Get the name of this layout algorithm
    fn name(&self) -> &'static str;

    /// Get the version of this layout algorithm
    fn version(&self) -> &'static str;
}

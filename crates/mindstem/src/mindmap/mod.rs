//! Vertical three-tier mind maps
//!
//! Stages, leaf first: [`OutlineParser`] turns indented text into a
//! [`MindMap`], [`MindMapLayout`] assigns coordinates, [`SceneBuilder`]
//! produces a display list, and the adapters ([`SvgRenderer`],
//! [`RasterExporter`], [`TextRenderer`]) turn it into output.
//! [`MindMapPipeline`] wires them together.

pub mod filename;
pub mod layout;
pub mod parser;
pub mod pipeline;
pub mod preview;
pub mod raster;
pub mod scene;
pub mod svg;
mod syntax;
pub mod theme;
pub mod tree;

pub use filename::*;
pub use layout::*;
pub use parser::*;
pub use pipeline::*;
pub use preview::*;
pub use raster::*;
pub use scene::*;
pub use svg::*;
pub use theme::*;
pub use tree::*;

//! Core abstractions shared by the mind map pipeline
//!
//! Stage traits ([`Parser`], [`LayoutAlgorithm`], [`Renderer`]), the error
//! type, configuration, logging, geometry and small text helpers.

mod canvas;
mod config;
mod debounce;
mod error;
mod layout;
pub mod logging;
mod parser;
mod renderer;
mod text;
mod types;

pub use canvas::*;
pub use config::*;
pub use debounce::*;
pub use error::*;
pub use layout::*;
pub use logging::*;
pub use parser::*;
pub use renderer::*;
pub use text::*;
pub use types::*;

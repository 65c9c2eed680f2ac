//! Core error types for the mind map pipeline
//!
//! Parsing is tolerant and never produces an error. Everything that can fail
//! downstream (bad layout constants, SVG re-parsing, rasterization, config
//! files, clipboard access) reports through [`DiagramError`].

use thiserror::Error;

/// Errors raised by the layout, rendering, and export stages
#[derive(Error, Debug)]
pub enum DiagramError {
    #[error("Layout error: {message}")]
    Layout { message: String },

    #[error("Render error: {message}")]
    Render { message: String },

    #[error("Export error: {message}")]
    Export { message: String },

    #[error("Config error: {message}")]
    Config { message: String },

    #[error("Clipboard error: {message}")]
    Clipboard { message: String },

    #[error("IO error: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },
}

impl DiagramError {
    /// Invalid layout constants
    pub fn layout_error(message: impl Into<String>) -> Self {
        Self::Layout {
            message: message.into(),
        }
    }

    /// Scene could not be turned into markup
    pub fn render_error(message: impl Into<String>) -> Self {
        Self::Render {
            message: message.into(),
        }
    }

    /// Rasterization or image encoding failed
    pub fn export_error(message: impl Into<String>) -> Self {
        Self::Export {
            message: message.into(),
        }
    }

    /// A configuration file could not be read or understood
    pub fn config_error(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// The host refused clipboard access
    pub fn clipboard_error(message: impl Into<String>) -> Self {
        Self::Clipboard {
            message: message.into(),
        }
    }

    /// Whether the user has to change the configuration before retrying
    pub fn needs_user_action(&self) -> bool {
        matches!(self, Self::Config { .. } | Self::Layout { .. })
    }
}

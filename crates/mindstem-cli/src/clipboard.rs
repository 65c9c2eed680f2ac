//! Copying rendered images to the system clipboard
//!
//! A failed copy is reported as [`CopyOutcome::FellBack`] with a hint to use
//! file export, never as an error.

use std::borrow::Cow;

use mindstem::mindmap::RasterImage;
use mindstem::DiagramError;
use tracing::{info, warn};

/// Anything that can receive an RGBA image
pub trait ImageClipboard {
    fn set_image(&mut self, width: usize, height: usize, rgba: Vec<u8>) -> Result<(), DiagramError>;
}

/// The platform clipboard via `arboard`
#[derive(Debug, Default)]
pub struct SystemClipboard;

impl ImageClipboard for SystemClipboard {
    fn set_image(&mut self, width: usize, height: usize, rgba: Vec<u8>) -> Result<(), DiagramError> {
        let mut clipboard = arboard::Clipboard::new()
            .map_err(|e| DiagramError::clipboard_error(e.to_string()))?;
        clipboard
            .set_image(arboard::ImageData {
                width,
                height,
                bytes: Cow::Owned(rgba),
            })
            .map_err(|e| DiagramError::clipboard_error(e.to_string()))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CopyOutcome {
    Copied,
    /// Copy failed; the message tells the user what to do instead
    FellBack(String),
}

/// Put `image` on `clipboard`, turning failure into a fallback hint
pub fn copy_image(clipboard: &mut dyn ImageClipboard, image: &RasterImage) -> CopyOutcome {
    let (width, height) = (image.width() as usize, image.height() as usize);
    match clipboard.set_image(width, height, image.to_rgba()) {
        Ok(()) => {
            info!(width, height, "Image copied to clipboard");
            CopyOutcome::Copied
        }
        Err(e) => {
            warn!(error = %e, "Clipboard unavailable");
            CopyOutcome::FellBack(format!(
                "Could not copy the image to the clipboard ({}). \
                 Use `mindstem export` to save it as a PNG file instead.",
                e
            ))
        }
    }
}

/// Error types for the card editor
///
/// Errors travel inside iced messages, so every type here is `Clone`;
/// non-clonable sources are wrapped in `Arc`.

use std::path::PathBuf;
use std::sync::Arc;

use crate::state::notice::Notice;

/// Failure while reading the system clipboard
#[derive(thiserror::Error, Debug, Clone)]
pub enum ClipboardError {
    /// The clipboard could not be opened at all (no display server, denied, ...)
    #[error("clipboard unavailable: {0}")]
    Unavailable(String),

    /// The clipboard was opened but reading its contents failed
    #[error("clipboard read failed: {0}")]
    Read(String),

    /// An image payload was found but could not be decoded
    #[error("clipboard image could not be decoded: {0}")]
    Payload(String),
}

/// Failure while acquiring an image for a slot
#[derive(thiserror::Error, Debug, Clone)]
pub enum AcquireError {
    #[error("no image found on the clipboard")]
    NoImageFound,

    #[error(transparent)]
    Clipboard(#[from] ClipboardError),

    #[error("could not read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: Arc<std::io::Error>,
    },

    #[error("could not decode image: {0}")]
    Decode(#[source] Arc<image::ImageError>),

    #[error("background task failed: {0}")]
    Join(String),
}

impl AcquireError {
    /// The notice shown to the user for this failure, if any.
    ///
    /// File read and decode failures are only logged; the slot keeps its
    /// previous image and the user simply sees nothing change.
    pub fn notice(&self) -> Option<Notice> {
        match self {
            AcquireError::NoImageFound => Some(Notice::NoImageFound),
            AcquireError::Clipboard(_) => Some(Notice::PasteFailed),
            AcquireError::Read { .. } | AcquireError::Decode(_) | AcquireError::Join(_) => None,
        }
    }
}

/// Failure while rasterizing the card
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum RenderError {
    #[error("card has an empty canvas ({width}x{height})")]
    EmptyCanvas { width: u32, height: u32 },

    #[error("card canvas {width}x{height} exceeds the {limit}px limit")]
    TooLarge { width: u32, height: u32, limit: u32 },

    #[error("invalid export scale {0}")]
    InvalidScale(String),
}

/// Failure while exporting the card to a PNG file
#[derive(thiserror::Error, Debug, Clone)]
pub enum ExportError {
    #[error("could not render card: {0}")]
    Render(#[from] RenderError),

    #[error("could not write {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: Arc<image::ImageError>,
    },

    #[error("background task failed: {0}")]
    Join(String),
}

/// Failure while loading the card layout configuration
#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error("could not read config {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config: {0}")]
    Json(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clipboard_failures_surface_paste_failed() {
        let err = AcquireError::from(ClipboardError::Unavailable("denied".into()));
        assert_eq!(err.notice(), Some(Notice::PasteFailed));
        assert!(err.to_string().contains("denied"));
    }

    #[test]
    fn missing_image_surfaces_its_own_notice() {
        assert_eq!(AcquireError::NoImageFound.notice(), Some(Notice::NoImageFound));
    }

    #[test]
    fn file_failures_are_silent() {
        let err = AcquireError::Read {
            path: PathBuf::from("/tmp/missing.png"),
            source: Arc::new(std::io::Error::new(std::io::ErrorKind::NotFound, "gone")),
        };
        assert_eq!(err.notice(), None);
        assert!(err.to_string().contains("missing.png"));
    }

    #[test]
    fn render_error_mentions_dimensions() {
        let err = ExportError::from(RenderError::EmptyCanvas { width: 0, height: 10 });
        assert!(err.to_string().contains("0x10"));
    }
}

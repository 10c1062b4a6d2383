/// Transient user-facing notices
///
/// Shown as a status line above the form; a new notice replaces the old one.

use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    /// The clipboard held nothing image-typed
    NoImageFound,
    /// The clipboard could not be read
    PasteFailed,
    /// Rasterizing or saving the card failed
    ExportFailed,
    /// The card was saved
    Exported(PathBuf),
}

impl Notice {
    pub fn message(&self) -> String {
        match self {
            Notice::NoImageFound => "No image found on the clipboard.".to_string(),
            Notice::PasteFailed => "Pasting the image failed.".to_string(),
            Notice::ExportFailed => "Something went wrong while saving the image.".to_string(),
            Notice::Exported(path) => format!("Saved to {}", path.display()),
        }
    }

    pub fn is_error(&self) -> bool {
        !matches!(self, Notice::Exported(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn failures_are_errors() {
        assert!(Notice::NoImageFound.is_error());
        assert!(Notice::PasteFailed.is_error());
        assert!(Notice::ExportFailed.is_error());
        assert!(!Notice::Exported(PathBuf::from("card.png")).is_error());
    }

    #[test]
    fn export_message_names_the_file() {
        let notice = Notice::Exported(PathBuf::from("/tmp/my-oc-motif.png"));
        assert!(notice.message().contains("my-oc-motif.png"));
    }
}

/// PNG export of the finished card
///
/// Rasterizes the card at the export scale on the blocking pool and writes
/// the PNG. The trigger button is disabled with a progress label while the
/// export runs, and restored afterwards whatever the outcome.

use std::path::PathBuf;
use std::sync::Arc;

use image::ImageFormat;
use tokio::task;
use tracing::info;

use crate::error::ExportError;
use crate::render::Rasterizer;
use crate::state::card::Card;

/// Button label while idle
pub const EXPORT_LABEL: &str = "Save as PNG";
/// Button label while an export is running
pub const PROGRESS_LABEL: &str = "Generating image...";

/// Label and enabled state of the export trigger
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportButton {
    label: String,
    enabled: bool,
    /// Label to restore once the running export finishes
    saved_label: Option<String>,
}

impl Default for ExportButton {
    fn default() -> Self {
        Self {
            label: EXPORT_LABEL.to_string(),
            enabled: true,
            saved_label: None,
        }
    }
}

impl ExportButton {
    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Enter the busy state. Returns false if an export is already running.
    pub fn begin(&mut self) -> bool {
        if !self.enabled {
            return false;
        }
        self.saved_label = Some(std::mem::replace(&mut self.label, PROGRESS_LABEL.to_string()));
        self.enabled = false;
        true
    }

    /// Restore the label and enabled state from before `begin`
    pub fn finish(&mut self) {
        if let Some(label) = self.saved_label.take() {
            self.label = label;
        }
        self.enabled = true;
    }
}

/// Rasterize `card` at `scale` and save it as a PNG at `path`
pub async fn export_card<R: Rasterizer>(
    rasterizer: Arc<R>,
    card: Card,
    scale: f32,
    path: PathBuf,
) -> Result<PathBuf, ExportError> {
    task::spawn_blocking(move || -> Result<PathBuf, ExportError> {
        let canvas = rasterizer.rasterize(&card, scale)?;
        canvas
            .save_with_format(&path, ImageFormat::Png)
            .map_err(|source| ExportError::Write {
                path: path.clone(),
                source: Arc::new(source),
            })?;

        info!(path = %path.display(), width = canvas.width(), height = canvas.height(), "exported card");
        Ok(path)
    })
    .await
    .map_err(|e| ExportError::Join(e.to_string()))?
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::RenderError;
    use crate::render::CardRasterizer;
    use crate::state::config::CardConfig;
    use image::RgbaImage;

    struct FailingRasterizer;

    impl Rasterizer for FailingRasterizer {
        fn rasterize(&self, _card: &Card, _scale: f32) -> Result<RgbaImage, RenderError> {
            Err(RenderError::EmptyCanvas { width: 0, height: 0 })
        }
    }

    #[test]
    fn button_restores_after_finish() {
        let mut button = ExportButton::default();
        assert!(button.begin());
        assert_eq!(button.label(), PROGRESS_LABEL);
        assert!(!button.is_enabled());

        assert!(!button.begin());

        button.finish();
        assert_eq!(button.label(), EXPORT_LABEL);
        assert!(button.is_enabled());
    }

    #[tokio::test]
    async fn writes_a_png_at_export_scale() {
        let config = CardConfig::default();
        let card = Card::new(&config);
        let rasterizer = Arc::new(CardRasterizer::new(config.clone()));
        let path = std::env::temp_dir().join(format!("oc-card-export-{}.png", std::process::id()));

        let written = export_card(rasterizer.clone(), card.clone(), config.export_scale, path.clone())
            .await
            .unwrap();
        assert_eq!(written, path);

        let saved = image::open(&path).unwrap();
        let preview = rasterizer.rasterize(&card, 1.0).unwrap();
        assert_eq!(saved.width(), preview.width() * 2);
        assert_eq!(saved.height(), preview.height() * 2);

        std::fs::remove_file(&path).ok();
    }

    #[tokio::test]
    async fn render_failure_is_reported() {
        let card = Card::new(&CardConfig::default());
        let path = std::env::temp_dir().join("oc-card-never-written.png");
        let result = export_card(Arc::new(FailingRasterizer), card, 2.0, path.clone()).await;

        assert!(matches!(result, Err(ExportError::Render(_))));
        assert!(!path.exists());
    }

    #[tokio::test]
    async fn unwritable_path_is_reported() {
        let config = CardConfig::default();
        let card = Card::new(&config);
        let path = PathBuf::from("/definitely/not/a/dir/my-oc-motif.png");
        let result = export_card(Arc::new(CardRasterizer::new(config)), card, 1.0, path).await;

        assert!(matches!(result, Err(ExportError::Write { .. })));
    }
}

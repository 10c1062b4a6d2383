/// Card layout configuration
///
/// Geometry of the card and its slots, export settings and initial style.
/// Loaded from JSON in the user's config directory when present:
/// - Linux: ~/.config/oc-card-editor/layout.json
/// - macOS: ~/Library/Application Support/oc-card-editor/layout.json
/// - Windows: %APPDATA%\oc-card-editor\layout.json
///
/// Every field has a default, so a partial file only overrides what it names.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use super::card::Section;
use super::options::{Background, FontTheme};
use crate::error::ConfigError;
use crate::slot::fit::Dimensions;

const APP_DIR: &str = "oc-card-editor";
const CONFIG_FILE: &str = "layout.json";

/// Container sizes for the framed slots, in card pixels
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
#[serde(default)]
pub struct SlotContainers {
    pub fullbody: Dimensions,
    pub headshot: Dimensions,
    pub album: Dimensions,
    /// Shared by the three motif slots
    pub motif: Dimensions,
}

impl Default for SlotContainers {
    fn default() -> Self {
        Self {
            fullbody: Dimensions::new(260, 620),
            headshot: Dimensions::new(140, 140),
            album: Dimensions::new(96, 96),
            motif: Dimensions::new(112, 112),
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct CardConfig {
    /// Card width in card pixels (1x)
    pub card_width: u32,
    /// Outer margin
    pub padding: u32,
    /// Space between blocks
    pub gap: u32,
    pub containers: SlotContainers,
    /// Stickers larger than this on either axis are scaled down to fit
    pub sticker_max: u32,
    /// Resolution multiplier for the exported PNG
    pub export_scale: f32,
    pub export_file_name: String,
    /// Sections that start unchecked
    pub hidden_sections: Vec<Section>,
    pub background: Background,
    pub font: FontTheme,
}

impl Default for CardConfig {
    fn default() -> Self {
        Self {
            card_width: 720,
            padding: 24,
            gap: 16,
            containers: SlotContainers::default(),
            sticker_max: 160,
            export_scale: 2.0,
            export_file_name: "my-oc-motif.png".to_string(),
            hidden_sections: Vec::new(),
            background: Background::default(),
            font: FontTheme::default(),
        }
    }
}

impl CardConfig {
    /// Load the user's config, falling back to defaults.
    ///
    /// A missing file is normal; a broken one is logged and ignored.
    pub fn load() -> Self {
        let Some(path) = Self::path() else {
            return Self::default();
        };
        if !path.exists() {
            return Self::default();
        }

        match Self::from_file(&path) {
            Ok(config) => {
                info!(path = %path.display(), "loaded card layout");
                config
            }
            Err(e) => {
                warn!(error = %e, "ignoring card layout, using defaults");
                Self::default()
            }
        }
    }

    /// Where the user's layout file lives, if the platform has a config dir
    pub fn path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(APP_DIR).join(CONFIG_FILE))
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Self::from_json(&json)?)
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Full path the exported PNG is written to.
    ///
    /// Goes to the downloads folder, then home, then the working directory.
    pub fn export_path(&self) -> PathBuf {
        dirs::download_dir()
            .or_else(dirs::home_dir)
            .unwrap_or_else(|| PathBuf::from("."))
            .join(&self.export_file_name)
    }
}

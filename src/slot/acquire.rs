/// Image acquisition for slots
///
/// Two alternative sources feed a slot: the native file picker and the
/// system clipboard. Each acquisition is one linear async operation
/// (read bytes, then decode the bitmap) whose result is handed back to the
/// slot on the UI thread.

use std::future::Future;
use std::io::Cursor;
use std::path::PathBuf;
use std::sync::Arc;

use image::{ImageFormat, RgbaImage};
use tokio::task;
use tracing::{debug, info};

use super::decode::{self, EncodedImage, SlotImage};
use super::SlotId;
use crate::error::{AcquireError, ClipboardError};

/// Type tags with this prefix mark an image payload
pub const IMAGE_TYPE_PREFIX: &str = "image/";

/// One clipboard entry, offering its content under one or more type tags
#[derive(Debug, Clone, Default)]
pub struct ClipboardItem {
    entries: Vec<(String, Vec<u8>)>,
}

impl ClipboardItem {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a representation of this item under the given type tag
    pub fn with_entry(mut self, content_type: impl Into<String>, bytes: Vec<u8>) -> Self {
        self.entries.push((content_type.into(), bytes));
        self
    }

    /// Declared type tags, in the order they were offered
    pub fn types(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(ty, _)| ty.as_str())
    }

    /// Payload for a declared type tag
    pub fn get_type(&self, content_type: &str) -> Option<&[u8]> {
        self.entries
            .iter()
            .find(|(ty, _)| ty == content_type)
            .map(|(_, bytes)| bytes.as_slice())
    }
}

/// Anything that can hand over the current clipboard contents.
///
/// Reading may block (the OS clipboard round-trip), so it is always called
/// from the blocking pool.
pub trait ClipboardSource: Send + 'static {
    fn read(&mut self) -> Result<Vec<ClipboardItem>, ClipboardError>;
}

/// The OS clipboard, via arboard
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClipboard;

impl ClipboardSource for SystemClipboard {
    fn read(&mut self) -> Result<Vec<ClipboardItem>, ClipboardError> {
        let mut clipboard =
            arboard::Clipboard::new().map_err(|e| ClipboardError::Unavailable(e.to_string()))?;

        // arboard hands out raw RGBA; re-encode it so the payload looks like
        // any other image/png entry.
        match clipboard.get_image() {
            Ok(data) => {
                let png = encode_rgba_as_png(data.width as u32, data.height as u32, data.bytes.into_owned())?;
                return Ok(vec![ClipboardItem::new().with_entry("image/png", png)]);
            }
            Err(arboard::Error::ContentNotAvailable) => {}
            Err(e) => return Err(ClipboardError::Read(e.to_string())),
        }

        match clipboard.get_text() {
            Ok(text) => Ok(vec![
                ClipboardItem::new().with_entry("text/plain", text.into_bytes()),
            ]),
            Err(arboard::Error::ContentNotAvailable) => Ok(Vec::new()),
            Err(e) => Err(ClipboardError::Read(e.to_string())),
        }
    }
}

fn encode_rgba_as_png(width: u32, height: u32, rgba: Vec<u8>) -> Result<Vec<u8>, ClipboardError> {
    let img = RgbaImage::from_raw(width, height, rgba)
        .ok_or_else(|| ClipboardError::Read(format!("malformed {}x{} clipboard image", width, height)))?;

    let mut png = Vec::new();
    img.write_to(&mut Cursor::new(&mut png), ImageFormat::Png)
        .map_err(|e| ClipboardError::Read(e.to_string()))?;
    Ok(png)
}

/// Pick the first image payload across all items.
///
/// Within an item the first `image/` type tag wins; items are examined in
/// order and the search stops at the first one offering an image.
pub fn first_image(items: Vec<ClipboardItem>) -> Option<(String, EncodedImage)> {
    items.iter().find_map(|item| {
        let ty = item.types().find(|ty| ty.starts_with(IMAGE_TYPE_PREFIX))?;
        let bytes = item.get_type(ty)?;
        Some((ty.to_string(), EncodedImage::sniff(bytes.to_vec())))
    })
}

/// Start reading the first selected file into a slot.
///
/// Only the first path is used; an empty selection yields `None` and no work
/// is scheduled.
pub fn acquire_from_file_input(
    slot: SlotId,
    files: Vec<PathBuf>,
) -> Option<impl Future<Output = Result<SlotImage, AcquireError>> + Send + 'static> {
    let path = files.into_iter().next()?;

    Some(async move {
        info!(?slot, path = %path.display(), "reading image file");

        let bytes = tokio::fs::read(&path).await.map_err(|source| AcquireError::Read {
            path: path.clone(),
            source: Arc::new(source),
        })?;

        let encoded = EncodedImage::sniff(bytes);
        debug!(?slot, mime = encoded.mime(), size = encoded.len(), "decoding image file");
        decode::decode(encoded).await
    })
}

/// Read the clipboard and decode the first image payload found on it
pub async fn acquire_from_clipboard<C: ClipboardSource>(
    slot: SlotId,
    mut source: C,
) -> Result<SlotImage, AcquireError> {
    let items = task::spawn_blocking(move || source.read())
        .await
        .map_err(|e| ClipboardError::Read(e.to_string()))??;

    let (content_type, encoded) = first_image(items).ok_or(AcquireError::NoImageFound)?;
    debug!(?slot, %content_type, size = encoded.len(), "decoding clipboard image");

    decode::decode(encoded).await.map_err(|e| match e {
        AcquireError::Decode(source) => ClipboardError::Payload(source.to_string()).into(),
        other => other,
    })
}

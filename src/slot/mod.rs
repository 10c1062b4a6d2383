/// Image slots
///
/// A slot is one image-bearing region of the card: an upload control, a
/// paste trigger, the displayed image, an optional placeholder and (except
/// for stickers) a clipping container. Its render targets are plain fields,
/// wired once when the card is built.
///
/// - `fit.rs` - cover-fit decision and visible region
/// - `decode.rs` - MIME sniffing and bitmap decoding
/// - `acquire.rs` - file picker and clipboard acquisition

pub mod acquire;
pub mod decode;
pub mod fit;

use std::future::Future;
use std::path::PathBuf;

use tracing::{error, info, warn};

use crate::error::AcquireError;
use crate::state::notice::Notice;
use acquire::ClipboardSource;
use decode::SlotImage;
use fit::{Dimensions, FitDecision};

/// Identifies one configured slot on the card
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum SlotId {
    Fullbody,
    Headshot,
    Album,
    Motif1,
    Motif2,
    Motif3,
    Sticker,
}

impl SlotId {
    pub const ALL: [SlotId; 7] = [
        SlotId::Fullbody,
        SlotId::Headshot,
        SlotId::Album,
        SlotId::Motif1,
        SlotId::Motif2,
        SlotId::Motif3,
        SlotId::Sticker,
    ];

    pub fn label(self) -> &'static str {
        match self {
            SlotId::Fullbody => "Full body",
            SlotId::Headshot => "Headshot",
            SlotId::Album => "Album cover",
            SlotId::Motif1 => "Motif 1",
            SlotId::Motif2 => "Motif 2",
            SlotId::Motif3 => "Motif 3",
            SlotId::Sticker => "Sticker",
        }
    }

    /// Stickers are sized intrinsically and never fitted to a container
    pub fn is_sticker(self) -> bool {
        self == SlotId::Sticker
    }
}

/// Static configuration of a slot
#[derive(Debug, Clone, PartialEq)]
pub struct SlotSpec {
    /// Text shown in the placeholder until an image arrives; `None` means
    /// the slot has no placeholder
    pub placeholder: Option<String>,
    pub sticker: bool,
    /// Container size in card pixels; unused in sticker mode
    pub container: Dimensions,
}

impl SlotSpec {
    pub fn framed(placeholder: impl Into<String>, container: Dimensions) -> Self {
        Self {
            placeholder: Some(placeholder.into()),
            sticker: false,
            container,
        }
    }

    pub fn sticker() -> Self {
        Self {
            placeholder: None,
            sticker: true,
            container: Dimensions::default(),
        }
    }
}

/// One image slot and the visual state of its render targets
#[derive(Debug, Clone)]
pub struct ImageSlot {
    id: SlotId,
    spec: SlotSpec,
    image: Option<SlotImage>,
    image_visible: bool,
    placeholder_visible: bool,
    container_visible: bool,
    fit: Option<FitDecision>,
}

impl ImageSlot {
    pub fn new(id: SlotId, spec: SlotSpec) -> Self {
        let placeholder_visible = spec.placeholder.is_some();
        Self {
            id,
            spec,
            image: None,
            image_visible: false,
            placeholder_visible,
            container_visible: false,
            fit: None,
        }
    }

    pub fn id(&self) -> SlotId {
        self.id
    }

    pub fn spec(&self) -> &SlotSpec {
        &self.spec
    }

    pub fn image(&self) -> Option<&SlotImage> {
        self.image.as_ref()
    }

    pub fn image_visible(&self) -> bool {
        self.image_visible
    }

    pub fn placeholder_visible(&self) -> bool {
        self.placeholder_visible
    }

    pub fn container_visible(&self) -> bool {
        self.container_visible
    }

    pub fn fit(&self) -> Option<FitDecision> {
        self.fit
    }

    /// Start acquiring the first of the selected files; `None` when nothing
    /// was selected.
    pub fn acquire_from_file_input(
        &self,
        files: Vec<PathBuf>,
    ) -> Option<impl Future<Output = Result<SlotImage, AcquireError>> + Send + 'static> {
        acquire::acquire_from_file_input(self.id, files)
    }

    /// Start acquiring the first image on the clipboard
    pub fn acquire_from_clipboard<C: ClipboardSource>(
        &self,
        source: C,
    ) -> impl Future<Output = Result<SlotImage, AcquireError>> + Send + 'static {
        acquire::acquire_from_clipboard(self.id, source)
    }

    /// Show a decoded image in this slot, replacing any previous one.
    ///
    /// The placeholder is hidden and, unless this is a sticker, the
    /// container becomes visible and the image is fitted to it.
    pub fn apply_image(&mut self, image: SlotImage) {
        self.image_visible = true;
        if self.spec.placeholder.is_some() {
            self.placeholder_visible = false;
        }

        if !self.spec.sticker {
            self.container_visible = true;
            self.fit = Some(FitDecision::compute(self.spec.container, image.natural()));
        }

        self.image = Some(image);
    }

    /// Consume the outcome of an acquisition.
    ///
    /// Success applies the image. Failure leaves the slot untouched and
    /// returns the notice to show, if the failure warrants one.
    pub fn resolve(&mut self, outcome: Result<SlotImage, AcquireError>) -> Option<Notice> {
        match outcome {
            Ok(image) => {
                let natural = image.natural();
                info!(slot = ?self.id, width = natural.width, height = natural.height, mime = image.mime(), "image applied");
                self.apply_image(image);
                None
            }
            Err(AcquireError::NoImageFound) => {
                warn!(slot = ?self.id, "no image found on clipboard");
                AcquireError::NoImageFound.notice()
            }
            Err(err) => {
                error!(slot = ?self.id, error = %err, "image acquisition failed");
                err.notice()
            }
        }
    }
}

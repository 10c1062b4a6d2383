use std::path::PathBuf;
use std::sync::Arc;

use iced::widget::{column, row};
use iced::{Element, Length, Task, Theme};
use rfd::FileDialog;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

mod error;
mod export;
mod render;
mod slot;
mod state;
mod ui;

use error::{AcquireError, ExportError};
use export::ExportButton;
use render::{CardRasterizer, Rasterizer};
use slot::acquire::SystemClipboard;
use slot::decode::SlotImage;
use slot::SlotId;
use state::card::{Card, Section, TextField};
use state::config::CardConfig;
use state::notice::Notice;
use state::options::{Background, FontTheme};

/// Extensions offered by the file picker
const IMAGE_EXTENSIONS: [&str; 6] = ["png", "jpg", "jpeg", "gif", "webp", "bmp"];

/// Main application state
struct CardEditor {
    /// The card being edited
    card: Card,
    /// Shared with export tasks
    rasterizer: Arc<CardRasterizer>,
    /// Latest 1x render of the card
    preview: Option<iced::widget::image::Handle>,
    export_button: ExportButton,
    /// Most recent notice, until dismissed or replaced
    notice: Option<Notice>,
}

/// Application messages (events)
#[derive(Debug, Clone)]
pub enum Message {
    TextChanged(TextField, String),
    SectionToggled(Section, bool),
    BackgroundSelected(Background),
    FontSelected(FontTheme),
    /// User clicked a slot's "Upload" button
    PickFile(SlotId),
    /// User clicked a slot's "Paste" button
    PasteImage(SlotId),
    /// A file or clipboard acquisition finished
    ImageResolved(SlotId, Result<SlotImage, AcquireError>),
    /// User clicked the export button
    Export,
    ExportFinished(Result<PathBuf, ExportError>),
    DismissNotice,
}

impl CardEditor {
    fn new() -> (Self, Task<Message>) {
        let config = CardConfig::load();
        let card = Card::new(&config);

        let mut editor = CardEditor {
            card,
            rasterizer: Arc::new(CardRasterizer::new(config)),
            preview: None,
            export_button: ExportButton::default(),
            notice: None,
        };
        editor.refresh_preview();

        info!("card editor initialized");
        (editor, Task::none())
    }

    fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::TextChanged(field, value) => {
                self.card.set_text(field, value);
                self.refresh_preview();
                Task::none()
            }
            Message::SectionToggled(section, visible) => {
                self.card.set_visible(section, visible);
                self.refresh_preview();
                Task::none()
            }
            Message::BackgroundSelected(background) => {
                self.card.select_background(background);
                self.refresh_preview();
                Task::none()
            }
            Message::FontSelected(font) => {
                self.card.select_font(font);
                self.refresh_preview();
                Task::none()
            }
            Message::PickFile(id) => {
                // Show the native file picker; the filter is the only type gate
                let files = FileDialog::new()
                    .set_title(format!("Choose an image for {}", id.label()))
                    .add_filter("Images", &IMAGE_EXTENSIONS)
                    .pick_files()
                    .unwrap_or_default();

                match self.card.slot(id).acquire_from_file_input(files) {
                    Some(acquisition) => Task::perform(acquisition, move |outcome| {
                        Message::ImageResolved(id, outcome)
                    }),
                    None => Task::none(),
                }
            }
            Message::PasteImage(id) => Task::perform(
                self.card.slot(id).acquire_from_clipboard(SystemClipboard),
                move |outcome| Message::ImageResolved(id, outcome),
            ),
            Message::ImageResolved(id, outcome) => {
                // Whichever acquisition completes last wins the slot
                if let Some(notice) = self.card.slot_mut(id).resolve(outcome) {
                    self.notice = Some(notice);
                }
                self.refresh_preview();
                Task::none()
            }
            Message::Export => {
                if !self.export_button.begin() {
                    return Task::none();
                }

                let config = self.rasterizer.config();
                let path = config.export_path();
                info!(path = %path.display(), scale = config.export_scale, "exporting card");

                Task::perform(
                    export::export_card(
                        Arc::clone(&self.rasterizer),
                        self.card.clone(),
                        config.export_scale,
                        path,
                    ),
                    Message::ExportFinished,
                )
            }
            Message::ExportFinished(result) => {
                self.export_button.finish();
                self.notice = Some(match result {
                    Ok(path) => Notice::Exported(path),
                    Err(e) => {
                        error!(error = %e, "export failed");
                        Notice::ExportFailed
                    }
                });
                Task::none()
            }
            Message::DismissNotice => {
                self.notice = None;
                Task::none()
            }
        }
    }

    /// Re-render the on-screen card; on failure the previous render stays
    fn refresh_preview(&mut self) {
        match self.rasterizer.rasterize(&self.card, 1.0) {
            Ok(canvas) => {
                let (width, height) = canvas.dimensions();
                self.preview = Some(iced::widget::image::Handle::from_rgba(
                    width,
                    height,
                    canvas.into_raw(),
                ));
            }
            Err(e) => warn!(error = %e, "preview render failed"),
        }
    }

    fn view(&self) -> Element<'_, Message> {
        let body = row![
            iced::widget::scrollable(ui::form::form(&self.card, &self.export_button))
                .width(Length::Fixed(400.0))
                .height(Length::Fill),
            ui::preview(self.preview.as_ref()),
        ]
        .height(Length::Fill);

        match &self.notice {
            Some(notice) => column![ui::notice_bar(notice), body].into(),
            None => body.into(),
        }
    }

    fn theme(&self) -> Theme {
        Theme::Dark
    }
}

fn main() -> iced::Result {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("oc_card_editor=info")),
        )
        .init();

    iced::application("OC Card Editor", CardEditor::update, CardEditor::view)
        .theme(CardEditor::theme)
        .centered()
        .run_with(CardEditor::new)
}

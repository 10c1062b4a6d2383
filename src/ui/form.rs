/// The editing form on the left of the window
use iced::widget::{button, checkbox, column, pick_list, row, text, text_input, Column};
use iced::{Alignment, Element, Length};

use crate::export::ExportButton;
use crate::slot::SlotId;
use crate::state::card::{Card, Section, TextField};
use crate::state::options::{Background, FontTheme};
use crate::Message;

/// Build the full form for the current card
pub fn form<'a>(card: &'a Card, export: &'a ExportButton) -> Element<'a, Message> {
    let groups = [
        group("Name", vec![
            toggle(card, Section::Header),
            field(card, TextField::Name),
            toggle(card, Section::Subname),
            field(card, TextField::Subname),
        ]),
        group("Full body", vec![
            toggle(card, Section::Fullbody),
            image_controls(card, SlotId::Fullbody),
            field(card, TextField::FullbodySource),
        ]),
        group("Headshot", vec![
            toggle(card, Section::Headshot),
            image_controls(card, SlotId::Headshot),
            field(card, TextField::HeadshotSource),
        ]),
        group("Theme song", vec![
            toggle(card, Section::Music),
            image_controls(card, SlotId::Album),
            field(card, TextField::Song),
            field(card, TextField::Artist),
        ]),
        group("Motifs", vec![
            toggle(card, Section::Motif1),
            image_controls(card, SlotId::Motif1),
            field(card, TextField::Motif1),
            toggle(card, Section::Motif2),
            image_controls(card, SlotId::Motif2),
            field(card, TextField::Motif2),
            toggle(card, Section::Motif3),
            image_controls(card, SlotId::Motif3),
            field(card, TextField::Motif3),
        ]),
        group("Comment", vec![
            toggle(card, Section::Comment),
            field(card, TextField::Comment),
        ]),
        group("Sticker", vec![
            toggle(card, Section::Sticker),
            image_controls(card, SlotId::Sticker),
        ]),
        group("Style", vec![
            row![
                text("Background").width(Length::Fixed(90.0)),
                pick_list(Background::ALL, Some(card.background()), Message::BackgroundSelected),
            ]
            .spacing(8)
            .align_y(Alignment::Center)
            .into(),
            row![
                text("Font").width(Length::Fixed(90.0)),
                pick_list(FontTheme::ALL, Some(card.font()), Message::FontSelected),
            ]
            .spacing(8)
            .align_y(Alignment::Center)
            .into(),
        ]),
    ];

    let export_button = button(text(export.label()))
        .on_press_maybe(export.is_enabled().then_some(Message::Export))
        .padding(10)
        .width(Length::Fill);

    groups
        .into_iter()
        .fold(Column::new(), |column, group| column.push(group))
        .push(export_button)
        .spacing(20)
        .padding(20)
        .into()
}

fn group<'a>(title: &'a str, rows: Vec<Element<'a, Message>>) -> Element<'a, Message> {
    column![text(title).size(18), Column::with_children(rows).spacing(6)]
        .spacing(8)
        .into()
}

fn field(card: &Card, field: TextField) -> Element<'_, Message> {
    text_input(field.hint(), card.text(field))
        .on_input(move |value| Message::TextChanged(field, value))
        .padding(6)
        .into()
}

fn toggle(card: &Card, section: Section) -> Element<'_, Message> {
    checkbox(section.label(), card.is_visible(section))
        .on_toggle(move |visible| Message::SectionToggled(section, visible))
        .into()
}

fn image_controls(card: &Card, slot: SlotId) -> Element<'_, Message> {
    let status = match card.slot(slot).image() {
        Some(image) => {
            let natural = image.natural();
            format!("{}x{}", natural.width, natural.height)
        }
        None => "No image".to_string(),
    };

    row![
        button(text("Upload")).on_press(Message::PickFile(slot)),
        button(text("Paste")).on_press(Message::PasteImage(slot)),
        text(status).size(14),
    ]
    .spacing(8)
    .align_y(Alignment::Center)
    .into()
}

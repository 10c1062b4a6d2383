/// The card being edited
///
/// Everything the rendered card shows: mirrored text fields, section
/// visibility, the image slots and the selected style options.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::config::CardConfig;
use super::options::{Background, FontTheme};
use crate::slot::{ImageSlot, SlotId, SlotSpec};

/// Text inputs mirrored onto the card
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum TextField {
    Name,
    Subname,
    Song,
    Artist,
    Motif1,
    Motif2,
    Motif3,
    Comment,
    FullbodySource,
    HeadshotSource,
}

impl TextField {
    pub fn hint(self) -> &'static str {
        match self {
            TextField::Name => "Character name",
            TextField::Subname => "Alias or subtitle",
            TextField::Song => "Song title",
            TextField::Artist => "Artist",
            TextField::Motif1 => "Motif 1",
            TextField::Motif2 => "Motif 2",
            TextField::Motif3 => "Motif 3",
            TextField::Comment => "Comment",
            TextField::FullbodySource => "Art credit",
            TextField::HeadshotSource => "Art credit",
        }
    }
}

/// Optional parts of the card, each behind a checkbox
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Section {
    Header,
    Subname,
    Fullbody,
    Headshot,
    Music,
    Motif1,
    Motif2,
    Motif3,
    Comment,
    Sticker,
}

impl Section {
    pub const ALL: [Section; 10] = [
        Section::Header,
        Section::Subname,
        Section::Fullbody,
        Section::Headshot,
        Section::Music,
        Section::Motif1,
        Section::Motif2,
        Section::Motif3,
        Section::Comment,
        Section::Sticker,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Section::Header => "Show name",
            Section::Subname => "Show subtitle",
            Section::Fullbody => "Show full body",
            Section::Headshot => "Show headshot",
            Section::Music => "Show theme song",
            Section::Motif1 => "Show motif 1",
            Section::Motif2 => "Show motif 2",
            Section::Motif3 => "Show motif 3",
            Section::Comment => "Show comment",
            Section::Sticker => "Show sticker",
        }
    }

    /// The section an image slot belongs to
    pub fn of_slot(slot: SlotId) -> Section {
        match slot {
            SlotId::Fullbody => Section::Fullbody,
            SlotId::Headshot => Section::Headshot,
            SlotId::Album => Section::Music,
            SlotId::Motif1 => Section::Motif1,
            SlotId::Motif2 => Section::Motif2,
            SlotId::Motif3 => Section::Motif3,
            SlotId::Sticker => Section::Sticker,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Card {
    texts: BTreeMap<TextField, String>,
    visible: BTreeMap<Section, bool>,
    slots: BTreeMap<SlotId, ImageSlot>,
    background: Background,
    font: FontTheme,
}

impl Card {
    /// Build an empty card with one slot per configured region
    pub fn new(config: &CardConfig) -> Self {
        let containers = &config.containers;
        let slots = SlotId::ALL
            .iter()
            .map(|&id| {
                let spec = match id {
                    SlotId::Fullbody => SlotSpec::framed(id.label(), containers.fullbody),
                    SlotId::Headshot => SlotSpec::framed(id.label(), containers.headshot),
                    SlotId::Album => SlotSpec::framed(id.label(), containers.album),
                    SlotId::Motif1 | SlotId::Motif2 | SlotId::Motif3 => {
                        SlotSpec::framed(id.label(), containers.motif)
                    }
                    SlotId::Sticker => SlotSpec::sticker(),
                };
                (id, ImageSlot::new(id, spec))
            })
            .collect();

        let visible = Section::ALL
            .iter()
            .map(|&section| (section, !config.hidden_sections.contains(&section)))
            .collect();

        Self {
            texts: BTreeMap::new(),
            visible,
            slots,
            background: config.background,
            font: config.font,
        }
    }

    /// Current value of a text field; empty until first typed into
    pub fn text(&self, field: TextField) -> &str {
        self.texts.get(&field).map(String::as_str).unwrap_or("")
    }

    /// Mirror the latest input value
    pub fn set_text(&mut self, field: TextField, value: impl Into<String>) {
        self.texts.insert(field, value.into());
    }

    pub fn is_visible(&self, section: Section) -> bool {
        self.visible.get(&section).copied().unwrap_or(true)
    }

    pub fn set_visible(&mut self, section: Section, visible: bool) {
        self.visible.insert(section, visible);
    }

    pub fn slot(&self, id: SlotId) -> &ImageSlot {
        // Card::new creates every SlotId, and slots are never removed
        &self.slots[&id]
    }

    pub fn slot_mut(&mut self, id: SlotId) -> &mut ImageSlot {
        self.slots
            .get_mut(&id)
            .unwrap_or_else(|| unreachable!("slot {:?} missing from card", id))
    }

    pub fn background(&self) -> Background {
        self.background
    }

    pub fn select_background(&mut self, background: Background) {
        self.background = background;
    }

    pub fn font(&self) -> FontTheme {
        self.font
    }

    pub fn select_font(&mut self, font: FontTheme) {
        self.font = font;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::slot::fit::Dimensions;

    #[test]
    fn text_mirrors_latest_value() {
        let mut card = Card::new(&CardConfig::default());
        assert_eq!(card.text(TextField::Name), "");

        card.set_text(TextField::Name, "A");
        card.set_text(TextField::Name, "Ari");
        assert_eq!(card.text(TextField::Name), "Ari");
        assert_eq!(card.text(TextField::Song), "");
    }

    #[test]
    fn sections_follow_config_then_toggles() {
        let mut config = CardConfig::default();
        config.hidden_sections = vec![Section::Fullbody];
        let mut card = Card::new(&config);

        assert!(!card.is_visible(Section::Fullbody));
        assert!(card.is_visible(Section::Comment));

        card.set_visible(Section::Fullbody, true);
        card.set_visible(Section::Comment, false);
        assert!(card.is_visible(Section::Fullbody));
        assert!(!card.is_visible(Section::Comment));
    }

    #[test]
    fn slots_are_wired_from_config() {
        let card = Card::new(&CardConfig::default());
        assert_eq!(card.slot(SlotId::Album).spec().container, Dimensions::new(96, 96));
        assert_eq!(card.slot(SlotId::Motif2).spec().container, Dimensions::new(112, 112));
        assert!(card.slot(SlotId::Sticker).spec().sticker);
        assert!(card.slot(SlotId::Sticker).spec().placeholder.is_none());
        assert!(card.slot(SlotId::Fullbody).placeholder_visible());
    }

    #[test]
    fn selecting_an_option_replaces_the_previous_one() {
        let mut card = Card::new(&CardConfig::default());
        card.select_background(Background::Paper);
        card.select_background(Background::Dark);
        assert_eq!(card.background(), Background::Dark);

        card.select_font(FontTheme::Cute);
        assert_eq!(card.font(), FontTheme::Cute);
    }

    #[test]
    fn every_slot_maps_to_a_section() {
        for id in SlotId::ALL {
            let section = Section::of_slot(id);
            assert!(Section::ALL.contains(&section));
        }
        assert_eq!(Section::of_slot(SlotId::Album), Section::Music);
    }
}

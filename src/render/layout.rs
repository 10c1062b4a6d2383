/// Card layout: positions every visible part of the card in card pixels.
///
/// The full-body slot, when shown, takes a fixed left column and everything
/// else stacks in the right column. Without it the stack spans the card.
/// The sticker floats over the top-right corner.

use crate::slot::fit::Dimensions;
use crate::slot::SlotId;
use crate::state::card::{Card, Section, TextField};
use crate::state::config::CardConfig;

use super::font::{wrap, Glyphs, TextRole};

/// Inner margin of section panels
const PANEL_INSET: u32 = 12;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rect {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl Rect {
    pub fn new(x: u32, y: u32, size: Dimensions) -> Self {
        Self {
            x,
            y,
            width: size.width,
            height: size.height,
        }
    }

    pub fn bottom(&self) -> u32 {
        self.y + self.height
    }

    /// Canvas coordinates for a render at `scale`
    pub fn scaled(&self, scale: f32) -> (i64, i64, u32, u32) {
        (
            (self.x as f32 * scale).round() as i64,
            (self.y as f32 * scale).round() as i64,
            (self.width as f32 * scale).round() as u32,
            (self.height as f32 * scale).round() as u32,
        )
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Block {
    /// Translucent backing box of a section
    Panel(Rect),
    /// One line of text, top-left anchored
    Text {
        x: u32,
        y: u32,
        text: String,
        role: TextRole,
    },
    Slot { id: SlotId, rect: Rect },
}

#[derive(Debug, Clone, PartialEq)]
pub struct CardLayout {
    pub width: u32,
    pub height: u32,
    /// In paint order
    pub blocks: Vec<Block>,
}

#[cfg(test)]
impl CardLayout {
    pub fn slot_rect(&self, id: SlotId) -> Option<Rect> {
        self.blocks.iter().find_map(|block| match block {
            Block::Slot { id: slot, rect } if *slot == id => Some(*rect),
            _ => None,
        })
    }

    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.blocks.iter().filter_map(|block| match block {
            Block::Text { text, .. } => Some(text.as_str()),
            _ => None,
        })
    }
}

/// Appends wrapped lines of `text`; returns the height used
fn push_lines(blocks: &mut Vec<Block>, text: &str, role: TextRole, glyphs: Glyphs, x: u32, y: u32, max_width: u32) -> u32 {
    let lines = wrap(text, glyphs.chars_in(max_width));
    let line_height = glyphs.line_height();

    for (i, line) in lines.iter().enumerate() {
        blocks.push(Block::Text {
            x,
            y: y + i as u32 * line_height,
            text: line.clone(),
            role,
        });
    }

    lines.len() as u32 * line_height
}

/// Vertical stack of blocks in one column
struct Column {
    x: u32,
    width: u32,
    y: u32,
    gap: u32,
    used: bool,
}

impl Column {
    /// Reserve `height` pixels and return the top of the reservation
    fn take(&mut self, height: u32) -> u32 {
        if self.used {
            self.y += self.gap;
        }
        let top = self.y;
        self.y += height;
        self.used = true;
        top
    }
}

pub fn layout(card: &Card, config: &CardConfig) -> CardLayout {
    let face = card.font().face();
    let pad = config.padding;
    let gap = config.gap;
    let width = config.card_width;
    let containers = &config.containers;

    let mut blocks = Vec::new();
    let mut left_bottom = 0;

    let (column_x, column_width) = if card.is_visible(Section::Fullbody) {
        let rect = Rect::new(pad, pad, containers.fullbody);
        blocks.push(Block::Slot { id: SlotId::Fullbody, rect });

        let caption = face.glyphs(TextRole::Caption);
        let used = push_lines(
            &mut blocks,
            card.text(TextField::FullbodySource),
            TextRole::Caption,
            caption,
            rect.x,
            rect.bottom() + gap / 2,
            rect.width,
        );
        left_bottom = rect.bottom() + if used > 0 { gap / 2 + used } else { 0 };

        let x = pad + rect.width + gap;
        (x, width.saturating_sub(x + pad))
    } else {
        (pad, width.saturating_sub(2 * pad))
    };

    let mut column = Column {
        x: column_x,
        width: column_width,
        y: pad,
        gap,
        used: false,
    };
    let text_width = column.width.saturating_sub(2 * PANEL_INSET);

    if card.is_visible(Section::Header) {
        let mut lines = Vec::new();
        let title = face.glyphs(TextRole::Title);
        let mut height = push_lines(&mut lines, card.text(TextField::Name), TextRole::Title, title, 0, 0, text_width)
            .max(title.line_height());

        if card.is_visible(Section::Subname) {
            let subtitle = face.glyphs(TextRole::Subtitle);
            height += push_lines(&mut lines, card.text(TextField::Subname), TextRole::Subtitle, subtitle, 0, height, text_width);
        }

        let top = column.take(height + 2 * PANEL_INSET);
        blocks.push(Block::Panel(Rect {
            x: column.x,
            y: top,
            width: column.width,
            height: height + 2 * PANEL_INSET,
        }));
        blocks.extend(offset(lines, column.x + PANEL_INSET, top + PANEL_INSET));
    }

    if card.is_visible(Section::Headshot) {
        let size = containers.headshot;
        let caption = face.glyphs(TextRole::Caption);
        let mut lines = Vec::new();
        let used = push_lines(&mut lines, card.text(TextField::HeadshotSource), TextRole::Caption, caption, 0, 0, size.width.max(column.width / 2));
        let caption_height = if used > 0 { gap / 2 + used } else { 0 };

        let top = column.take(size.height + caption_height);
        blocks.push(Block::Slot {
            id: SlotId::Headshot,
            rect: Rect::new(column.x, top, size),
        });
        blocks.extend(offset(lines, column.x, top + size.height + gap / 2));
    }

    if card.is_visible(Section::Music) {
        let album = containers.album;
        let text_x = PANEL_INSET + album.width + gap;
        let text_room = column.width.saturating_sub(text_x + PANEL_INSET);

        let mut lines = Vec::new();
        let mut text_height = push_lines(&mut lines, card.text(TextField::Song), TextRole::Subtitle, face.glyphs(TextRole::Subtitle), 0, 0, text_room);
        text_height += push_lines(&mut lines, card.text(TextField::Artist), TextRole::Body, face.glyphs(TextRole::Body), 0, text_height, text_room);

        let height = album.height.max(text_height) + 2 * PANEL_INSET;
        let top = column.take(height);
        blocks.push(Block::Panel(Rect {
            x: column.x,
            y: top,
            width: column.width,
            height,
        }));
        blocks.push(Block::Slot {
            id: SlotId::Album,
            rect: Rect::new(column.x + PANEL_INSET, top + PANEL_INSET, album),
        });
        blocks.extend(offset(lines, column.x + text_x, top + PANEL_INSET));
    }

    let motifs: Vec<(SlotId, TextField)> = [
        (Section::Motif1, SlotId::Motif1, TextField::Motif1),
        (Section::Motif2, SlotId::Motif2, TextField::Motif2),
        (Section::Motif3, SlotId::Motif3, TextField::Motif3),
    ]
    .into_iter()
    .filter(|(section, _, _)| card.is_visible(*section))
    .map(|(_, slot, field)| (slot, field))
    .collect();

    if !motifs.is_empty() {
        let count = motifs.len() as u32;
        let cell_width = column.width.saturating_sub(gap * (count - 1)) / count;
        let size = containers.motif;
        let body = face.glyphs(TextRole::Body);

        let mut lines = Vec::new();
        let mut row_height = size.height;
        for (i, (_, field)) in motifs.iter().enumerate() {
            let cell_x = i as u32 * (cell_width + gap);
            let used = push_lines(&mut lines, card.text(*field), TextRole::Body, body, cell_x, size.height + gap / 2, cell_width);
            if used > 0 {
                row_height = row_height.max(size.height + gap / 2 + used);
            }
        }

        let top = column.take(row_height);
        for (i, (slot, _)) in motifs.iter().enumerate() {
            let cell_x = column.x + i as u32 * (cell_width + gap);
            let inset = cell_width.saturating_sub(size.width) / 2;
            blocks.push(Block::Slot {
                id: *slot,
                rect: Rect::new(cell_x + inset, top, size),
            });
        }
        blocks.extend(offset(lines, column.x, top));
    }

    if card.is_visible(Section::Comment) {
        let body = face.glyphs(TextRole::Body);
        let mut lines = Vec::new();
        let height = push_lines(&mut lines, card.text(TextField::Comment), TextRole::Body, body, 0, 0, text_width)
            .max(body.line_height());

        let top = column.take(height + 2 * PANEL_INSET);
        blocks.push(Block::Panel(Rect {
            x: column.x,
            y: top,
            width: column.width,
            height: height + 2 * PANEL_INSET,
        }));
        blocks.extend(offset(lines, column.x + PANEL_INSET, top + PANEL_INSET));
    }

    let height = left_bottom.max(column.y) + pad;

    if card.is_visible(Section::Sticker) {
        if let Some(image) = card.slot(SlotId::Sticker).image() {
            let size = sticker_size(image.natural(), config.sticker_max);
            let rect = Rect::new(width.saturating_sub(pad / 2 + size.width), pad / 2, size);
            blocks.push(Block::Slot { id: SlotId::Sticker, rect });
        }
    }

    CardLayout { width, height, blocks }
}

/// Intrinsic size, scaled down only when an axis exceeds `max`
fn sticker_size(natural: Dimensions, max: u32) -> Dimensions {
    let longest = natural.width.max(natural.height);
    if longest <= max || longest == 0 {
        return natural;
    }
    let factor = max as f64 / longest as f64;
    Dimensions::new(
        ((natural.width as f64 * factor).round() as u32).max(1),
        ((natural.height as f64 * factor).round() as u32).max(1),
    )
}

/// Shift text blocks laid out at the origin to their final position
fn offset(blocks: Vec<Block>, dx: u32, dy: u32) -> impl Iterator<Item = Block> {
    blocks.into_iter().map(move |block| match block {
        Block::Text { x, y, text, role } => Block::Text {
            x: x + dx,
            y: y + dy,
            text,
            role,
        },
        other => other,
    })
}

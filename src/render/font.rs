/// Bitmap text for the card, using the Spleen font family.

use image::{Rgba, RgbaImage};
use spleen_font::{PSF2Font, FONT_12X24, FONT_6X12, FONT_8X16};

use super::paint::blend_pixel;

/// One of the bundled Spleen faces
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Face {
    /// 6x12
    Small,
    /// 8x16
    Medium,
    /// 12x24
    Large,
}

impl Face {
    fn cell(self) -> (u32, u32) {
        match self {
            Face::Small => (6, 12),
            Face::Medium => (8, 16),
            Face::Large => (12, 24),
        }
    }

    fn font_data(self) -> &'static [u8] {
        match self {
            Face::Small => FONT_6X12,
            Face::Medium => FONT_8X16,
            Face::Large => FONT_12X24,
        }
    }
}

/// What a line of text is on the card; each theme sizes roles differently
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextRole {
    Title,
    Subtitle,
    Body,
    Caption,
}

/// A face drawn at an integer pixel multiple
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Glyphs {
    pub face: Face,
    pub scale: u32,
}

impl Glyphs {
    pub const fn new(face: Face, scale: u32) -> Self {
        Self { face, scale }
    }

    pub fn char_width(&self) -> u32 {
        self.face.cell().0 * self.scale
    }

    pub fn line_height(&self) -> u32 {
        self.face.cell().1 * self.scale
    }

    /// Same face, scaled again for a higher-resolution render
    pub fn at(&self, render_scale: f32) -> Glyphs {
        let scale = (self.scale as f32 * render_scale).round().max(1.0) as u32;
        Glyphs::new(self.face, scale)
    }

    /// Width of a single line of text
    pub fn text_width(&self, text: &str) -> u32 {
        text.chars().count() as u32 * self.char_width()
    }

    /// How many characters fit in `width` pixels
    pub fn chars_in(&self, width: u32) -> usize {
        (width / self.char_width().max(1)) as usize
    }
}

/// Break text into lines of at most `max_chars`, preferring spaces.
///
/// Explicit newlines are kept; words longer than a line are split.
pub fn wrap(text: &str, max_chars: usize) -> Vec<String> {
    let max_chars = max_chars.max(1);
    let mut lines = Vec::new();

    for paragraph in text.lines() {
        let mut line = String::new();
        let mut line_len = 0;

        for word in paragraph.split(' ') {
            let mut word: Vec<char> = word.chars().collect();

            if line_len > 0 && line_len + 1 + word.len() > max_chars {
                lines.push(std::mem::take(&mut line));
                line_len = 0;
            }

            while word.len() > max_chars {
                if line_len > 0 {
                    lines.push(std::mem::take(&mut line));
                    line_len = 0;
                }
                let rest = word.split_off(max_chars);
                lines.push(word.into_iter().collect());
                word = rest;
            }

            if line_len > 0 {
                line.push(' ');
                line_len += 1;
            }
            line.extend(word.iter());
            line_len += word.len();
        }

        lines.push(line);
    }

    lines
}

/// Draw one line of text with its top-left corner at `(x, y)`.
///
/// Characters missing from the face advance the cursor without ink.
pub fn draw_text(canvas: &mut RgbaImage, text: &str, x: i64, y: i64, glyphs: Glyphs, color: Rgba<u8>) {
    let Ok(mut font) = PSF2Font::new(glyphs.face.font_data()) else {
        return;
    };

    let scale = glyphs.scale as i64;
    let mut cursor_x = x;

    for ch in text.chars() {
        let utf8 = ch.to_string();
        if let Some(glyph) = font.glyph_for_utf8(utf8.as_bytes()) {
            for (row_y, row) in glyph.enumerate() {
                for (col_x, on) in row.enumerate() {
                    if !on {
                        continue;
                    }
                    let px = cursor_x + col_x as i64 * scale;
                    let py = y + row_y as i64 * scale;
                    for dy in 0..scale {
                        for dx in 0..scale {
                            blend_pixel(canvas, px + dx, py + dy, color);
                        }
                    }
                }
            }
        }
        cursor_x += glyphs.char_width() as i64;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wraps_on_spaces() {
        assert_eq!(wrap("the quick brown fox", 10), vec!["the quick", "brown fox"]);
    }

    #[test]
    fn splits_long_words() {
        assert_eq!(wrap("abcdefghij", 4), vec!["abcd", "efgh", "ij"]);
    }

    #[test]
    fn keeps_explicit_newlines() {
        assert_eq!(wrap("one\ntwo", 20), vec!["one", "two"]);
    }

    #[test]
    fn glyph_metrics_scale() {
        let glyphs = Glyphs::new(Face::Small, 2);
        assert_eq!(glyphs.char_width(), 12);
        assert_eq!(glyphs.line_height(), 24);
        assert_eq!(glyphs.at(2.0).line_height(), 48);
        assert_eq!(glyphs.text_width("abc"), 36);
        assert_eq!(glyphs.chars_in(40), 3);
    }

    #[test]
    fn draws_ink_inside_the_cell() {
        let mut canvas = RgbaImage::new(24, 24);
        let glyphs = Glyphs::new(Face::Medium, 1);
        draw_text(&mut canvas, "A", 0, 0, glyphs, Rgba([0, 0, 0, 255]));

        let inked = canvas.pixels().filter(|p| p.0[3] > 0).count();
        assert!(inked > 0);
        for (x, y, p) in canvas.enumerate_pixels() {
            if p.0[3] > 0 {
                assert!(x < 8 && y < 16);
            }
        }
    }
}

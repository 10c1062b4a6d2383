/// Style options for the card
///
/// Each option maps to exactly one effect. Picking a new value replaces the
/// previous one, so mutually exclusive styles never stack.

use std::fmt;

use image::Rgba;
use serde::{Deserialize, Serialize};

use crate::render::font::{Face, Glyphs, TextRole};

// ========== Background ==========

/// Card background preset
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum Background {
    #[default]
    Grid,
    Paper,
    Dot,
    Solid,
    Dark,
}

/// Repeating decoration painted over the base colour
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Pattern {
    None,
    /// Square grid lines every `spacing` card pixels
    Grid { spacing: u32, color: Rgba<u8> },
    /// Horizontal rules, like lined paper
    Ruled { spacing: u32, color: Rgba<u8> },
    Dots { spacing: u32, radius: f32, color: Rgba<u8> },
}

/// Everything a background preset decides
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BackgroundStyle {
    pub base: Rgba<u8>,
    pub pattern: Pattern,
    /// Text colour
    pub ink: Rgba<u8>,
    /// Section panel fill, usually translucent
    pub panel: Rgba<u8>,
    /// Placeholder fill
    pub muted: Rgba<u8>,
}

impl Background {
    pub const ALL: [Background; 5] = [
        Background::Grid,
        Background::Paper,
        Background::Dot,
        Background::Solid,
        Background::Dark,
    ];

    pub fn style(self) -> BackgroundStyle {
        let light = BackgroundStyle {
            base: Rgba([250, 250, 247, 255]),
            pattern: Pattern::None,
            ink: Rgba([43, 43, 43, 255]),
            panel: Rgba([255, 255, 255, 200]),
            muted: Rgba([222, 222, 216, 255]),
        };

        match self {
            Background::Grid => BackgroundStyle {
                pattern: Pattern::Grid {
                    spacing: 24,
                    color: Rgba([227, 227, 220, 255]),
                },
                ..light
            },
            Background::Paper => BackgroundStyle {
                base: Rgba([245, 238, 220, 255]),
                pattern: Pattern::Ruled {
                    spacing: 28,
                    color: Rgba([230, 217, 188, 255]),
                },
                muted: Rgba([232, 222, 198, 255]),
                ..light
            },
            Background::Dot => BackgroundStyle {
                base: Rgba([255, 255, 255, 255]),
                pattern: Pattern::Dots {
                    spacing: 20,
                    radius: 1.5,
                    color: Rgba([216, 216, 224, 255]),
                },
                ..light
            },
            Background::Solid => BackgroundStyle {
                base: Rgba([253, 226, 228, 255]),
                muted: Rgba([245, 205, 210, 255]),
                ..light
            },
            Background::Dark => BackgroundStyle {
                base: Rgba([31, 31, 36, 255]),
                pattern: Pattern::None,
                ink: Rgba([240, 240, 240, 255]),
                panel: Rgba([255, 255, 255, 24]),
                muted: Rgba([58, 58, 68, 255]),
            },
        }
    }
}

impl fmt::Display for Background {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Background::Grid => "Grid",
            Background::Paper => "Paper",
            Background::Dot => "Dots",
            Background::Solid => "Solid",
            Background::Dark => "Dark",
        };
        f.write_str(name)
    }
}

// ========== Font theme ==========

/// Card font preset
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum FontTheme {
    #[default]
    Default,
    Serif,
    Cute,
}

/// Glyph sizes for each text role on the card
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextFace {
    pub title: Glyphs,
    pub subtitle: Glyphs,
    pub body: Glyphs,
    pub caption: Glyphs,
}

impl TextFace {
    pub fn glyphs(&self, role: TextRole) -> Glyphs {
        match role {
            TextRole::Title => self.title,
            TextRole::Subtitle => self.subtitle,
            TextRole::Body => self.body,
            TextRole::Caption => self.caption,
        }
    }
}

impl FontTheme {
    pub const ALL: [FontTheme; 3] = [FontTheme::Default, FontTheme::Serif, FontTheme::Cute];

    pub fn face(self) -> TextFace {
        match self {
            FontTheme::Default => TextFace {
                title: Glyphs::new(Face::Large, 1),
                subtitle: Glyphs::new(Face::Medium, 1),
                body: Glyphs::new(Face::Medium, 1),
                caption: Glyphs::new(Face::Small, 1),
            },
            FontTheme::Serif => TextFace {
                title: Glyphs::new(Face::Medium, 2),
                subtitle: Glyphs::new(Face::Large, 1),
                body: Glyphs::new(Face::Medium, 1),
                caption: Glyphs::new(Face::Medium, 1),
            },
            // Chunky pixels: the small face blown up
            FontTheme::Cute => TextFace {
                title: Glyphs::new(Face::Small, 3),
                subtitle: Glyphs::new(Face::Small, 2),
                body: Glyphs::new(Face::Small, 2),
                caption: Glyphs::new(Face::Small, 1),
            },
        }
    }
}

impl fmt::Display for FontTheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            FontTheme::Default => "Default",
            FontTheme::Serif => "Classic",
            FontTheme::Cute => "Cute",
        };
        f.write_str(name)
    }
}

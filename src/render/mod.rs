/// Card rasterization
///
/// This module turns a `Card` into pixels. The same renderer produces the
/// on-screen preview (1x) and the exported PNG (2x by default).
///
/// Architecture:
/// - `layout.rs` - positions sections, text lines and slots
/// - `cache.rs` - fitted slot bitmaps reused across renders
/// - `paint.rs` - pixel blending, fills, patterns, image compositing
/// - `font.rs` - Spleen bitmap text and word wrapping

pub mod cache;
pub mod font;
pub mod layout;
pub mod paint;

use image::RgbaImage;
use tracing::debug;

use crate::error::RenderError;
use crate::slot::fit::{FitDecision, Region};
use crate::slot::ImageSlot;
use crate::state::card::Card;
use crate::state::config::CardConfig;
use crate::state::options::{BackgroundStyle, TextFace};
use cache::FittedCache;
use font::{Glyphs, TextRole};
use layout::{Block, Rect};

/// Largest canvas edge we are willing to allocate
pub const MAX_CANVAS_EDGE: u32 = 16_384;

/// Turns a card into an RGBA bitmap.
///
/// Pixels outside anything the card paints stay fully transparent.
pub trait Rasterizer: Send + Sync + 'static {
    fn rasterize(&self, card: &Card, scale: f32) -> Result<RgbaImage, RenderError>;
}

/// The stock rasterizer: lays the card out and paints it with the image crate
#[derive(Debug)]
pub struct CardRasterizer {
    config: CardConfig,
    fitted: FittedCache,
}

impl CardRasterizer {
    pub fn new(config: CardConfig) -> Self {
        Self {
            config,
            fitted: FittedCache::default(),
        }
    }

    pub fn config(&self) -> &CardConfig {
        &self.config
    }
}

impl Rasterizer for CardRasterizer {
    fn rasterize(&self, card: &Card, scale: f32) -> Result<RgbaImage, RenderError> {
        if !scale.is_finite() || scale <= 0.0 {
            return Err(RenderError::InvalidScale(scale.to_string()));
        }

        let layout = layout::layout(card, &self.config);
        let width = (layout.width as f32 * scale).round() as u32;
        let height = (layout.height as f32 * scale).round() as u32;

        if width == 0 || height == 0 {
            return Err(RenderError::EmptyCanvas { width, height });
        }
        if width > MAX_CANVAS_EDGE || height > MAX_CANVAS_EDGE {
            return Err(RenderError::TooLarge {
                width,
                height,
                limit: MAX_CANVAS_EDGE,
            });
        }

        let style = card.background().style();
        let face = card.font().face();

        let mut canvas = RgbaImage::new(width, height);
        paint::fill_rect(&mut canvas, 0, 0, width, height, style.base);
        paint::paint_pattern(&mut canvas, style.pattern, scale);

        for block in &layout.blocks {
            match block {
                Block::Panel(rect) => {
                    let (x, y, w, h) = rect.scaled(scale);
                    paint::fill_rect(&mut canvas, x, y, w, h, style.panel);
                }
                Block::Text { x, y, text, role } => {
                    let glyphs = face.glyphs(*role).at(scale);
                    let (x, y, _, _) = Rect { x: *x, y: *y, width: 0, height: 0 }.scaled(scale);
                    font::draw_text(&mut canvas, text, x, y, glyphs, style.ink);
                }
                Block::Slot { id, rect } => {
                    paint_slot(&mut canvas, &self.fitted, card.slot(*id), *rect, scale, &style, &face);
                }
            }
        }

        debug!(width, height, blocks = layout.blocks.len(), "rasterized card");
        Ok(canvas)
    }
}

fn paint_slot(
    canvas: &mut RgbaImage,
    fitted: &FittedCache,
    slot: &ImageSlot,
    rect: Rect,
    scale: f32,
    style: &BackgroundStyle,
    face: &TextFace,
) {
    let (x, y, w, h) = rect.scaled(scale);
    let spec = slot.spec();

    match slot.image() {
        Some(image) if slot.image_visible() && (spec.sticker || slot.container_visible()) => {
            let natural = image.natural();
            let region = if spec.sticker {
                Region::whole(natural)
            } else {
                slot.fit()
                    .unwrap_or_else(|| FitDecision::compute(spec.container, natural))
                    .visible_region(spec.container, natural)
            };
            if w == 0 || h == 0 || region.width == 0 || region.height == 0 {
                return;
            }
            let bitmap = fitted.fitted(slot.id(), image.pixels(), region, w, h);
            paint::draw_image(canvas, &bitmap, x, y, w, h);
        }
        _ if slot.placeholder_visible() => {
            paint::fill_rect(canvas, x, y, w, h, style.muted);
            if let Some(label) = &spec.placeholder {
                paint_centered(canvas, label, x, y, w, h, face.glyphs(TextRole::Caption).at(scale), style);
            }
        }
        _ => {}
    }
}

fn paint_centered(canvas: &mut RgbaImage, text: &str, x: i64, y: i64, w: u32, h: u32, glyphs: Glyphs, style: &BackgroundStyle) {
    let text_w = glyphs.text_width(text);
    if text_w > w {
        return;
    }
    let tx = x + (w - text_w) as i64 / 2;
    let ty = y + h.saturating_sub(glyphs.line_height()) as i64 / 2;
    font::draw_text(canvas, text, tx, ty, glyphs, style.ink);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::slot::decode::SlotImage;
    use crate::slot::SlotId;
    use crate::state::card::{Section, TextField};
    use std::sync::Arc;
    use crate::state::options::Background;
    use image::Rgba;

    fn rasterizer() -> CardRasterizer {
        CardRasterizer::new(CardConfig::default())
    }

    #[test]
    fn export_scale_doubles_the_canvas() {
        let rasterizer = rasterizer();
        let card = Card::new(rasterizer.config());

        let one = rasterizer.rasterize(&card, 1.0).unwrap();
        let two = rasterizer.rasterize(&card, 2.0).unwrap();
        assert_eq!(one.width(), 720);
        assert_eq!(two.width(), one.width() * 2);
        assert_eq!(two.height(), one.height() * 2);
    }

    #[test]
    fn base_colour_follows_background() {
        let rasterizer = rasterizer();
        let mut card = Card::new(rasterizer.config());
        card.select_background(Background::Solid);

        let canvas = rasterizer.rasterize(&card, 1.0).unwrap();
        assert_eq!(canvas.get_pixel(2, 2).0, Background::Solid.style().base.0);
    }

    #[test]
    fn applied_image_fills_its_container() {
        let rasterizer = rasterizer();
        let mut card = Card::new(rasterizer.config());
        card.slot_mut(SlotId::Fullbody)
            .apply_image(SlotImage::new(RgbaImage::from_pixel(40, 40, Rgba([200, 10, 10, 255])), "image/png"));

        let canvas = rasterizer.rasterize(&card, 1.0).unwrap();
        let rect = layout::layout(&card, rasterizer.config())
            .slot_rect(SlotId::Fullbody)
            .unwrap();

        let center = canvas.get_pixel(rect.x + rect.width / 2, rect.y + rect.height / 2);
        assert_eq!(center.0, [200, 10, 10, 255]);
        let corner = canvas.get_pixel(rect.x + 1, rect.bottom() - 2);
        assert_eq!(corner.0, [200, 10, 10, 255]);
    }

    #[test]
    fn typing_reuses_fitted_slot_bitmaps() {
        let rasterizer = rasterizer();
        let mut card = Card::new(rasterizer.config());
        card.slot_mut(SlotId::Fullbody)
            .apply_image(SlotImage::new(RgbaImage::from_pixel(1200, 800, Rgba([10, 120, 10, 255])), "image/png"));

        let rect = layout::layout(&card, rasterizer.config())
            .slot_rect(SlotId::Fullbody)
            .unwrap();
        rasterizer.rasterize(&card, 1.0).unwrap();
        let fitted = rasterizer.fitted.get(SlotId::Fullbody, rect.width, rect.height).unwrap();

        for name in ["A", "Ar", "Ari"] {
            card.set_text(TextField::Name, name);
            rasterizer.rasterize(&card, 1.0).unwrap();
            let again = rasterizer.fitted.get(SlotId::Fullbody, rect.width, rect.height).unwrap();
            assert!(Arc::ptr_eq(&fitted, &again));
        }

        card.slot_mut(SlotId::Fullbody)
            .apply_image(SlotImage::new(RgbaImage::from_pixel(800, 1200, Rgba([0, 0, 200, 255])), "image/png"));
        rasterizer.rasterize(&card, 1.0).unwrap();
        let replaced = rasterizer.fitted.get(SlotId::Fullbody, rect.width, rect.height).unwrap();
        assert!(!Arc::ptr_eq(&fitted, &replaced));
        assert_eq!(replaced.get_pixel(0, 0).0, [0, 0, 200, 255]);
    }

    #[test]
    fn export_and_preview_keep_separate_sizes() {
        let rasterizer = rasterizer();
        let mut card = Card::new(rasterizer.config());
        card.slot_mut(SlotId::Headshot)
            .apply_image(SlotImage::new(RgbaImage::from_pixel(300, 300, Rgba([1, 2, 3, 255])), "image/png"));
        let rect = layout::layout(&card, rasterizer.config())
            .slot_rect(SlotId::Headshot)
            .unwrap();

        rasterizer.rasterize(&card, 1.0).unwrap();
        let preview = rasterizer.fitted.get(SlotId::Headshot, rect.width, rect.height).unwrap();
        rasterizer.rasterize(&card, 2.0).unwrap();
        rasterizer.rasterize(&card, 1.0).unwrap();

        let (_, _, w, h) = rect.scaled(2.0);
        assert_eq!(rasterizer.fitted.get(SlotId::Headshot, w, h).unwrap().dimensions(), (w, h));
        let again = rasterizer.fitted.get(SlotId::Headshot, rect.width, rect.height).unwrap();
        assert!(Arc::ptr_eq(&preview, &again));
    }

    #[test]
    fn placeholder_is_painted_until_an_image_arrives() {
        let rasterizer = rasterizer();
        let card = Card::new(rasterizer.config());
        let style = card.background().style();

        let canvas = rasterizer.rasterize(&card, 1.0).unwrap();
        let rect = layout::layout(&card, rasterizer.config())
            .slot_rect(SlotId::Headshot)
            .unwrap();
        assert_eq!(canvas.get_pixel(rect.x + 2, rect.y + 2).0, style.muted.0);
    }

    #[test]
    fn sticker_is_painted_on_top() {
        let rasterizer = rasterizer();
        let mut card = Card::new(rasterizer.config());
        card.slot_mut(SlotId::Sticker)
            .apply_image(SlotImage::new(RgbaImage::from_pixel(20, 20, Rgba([0, 0, 255, 255])), "image/png"));

        let canvas = rasterizer.rasterize(&card, 2.0).unwrap();
        let rect = layout::layout(&card, rasterizer.config())
            .slot_rect(SlotId::Sticker)
            .unwrap();
        let (x, y, w, h) = rect.scaled(2.0);
        assert_eq!(canvas.get_pixel((x + w as i64 / 2) as u32, (y + h as i64 / 2) as u32).0, [0, 0, 255, 255]);

        card.set_visible(Section::Sticker, false);
        assert!(layout::layout(&card, rasterizer.config()).slot_rect(SlotId::Sticker).is_none());
    }

    #[test]
    fn rejects_unusable_scales() {
        let rasterizer = rasterizer();
        let card = Card::new(rasterizer.config());
        assert!(matches!(rasterizer.rasterize(&card, 0.0), Err(RenderError::InvalidScale(_))));
        assert!(matches!(rasterizer.rasterize(&card, f32::NAN), Err(RenderError::InvalidScale(_))));
        assert!(matches!(rasterizer.rasterize(&card, 100.0), Err(RenderError::TooLarge { .. })));
    }

    #[test]
    fn zero_width_card_is_an_error() {
        let mut config = CardConfig::default();
        config.card_width = 0;
        config.padding = 0;
        config.gap = 0;
        config.containers = crate::state::config::SlotContainers {
            fullbody: Default::default(),
            headshot: Default::default(),
            album: Default::default(),
            motif: Default::default(),
        };
        let rasterizer = CardRasterizer::new(config);
        let card = Card::new(rasterizer.config());
        assert!(matches!(rasterizer.rasterize(&card, 1.0), Err(RenderError::EmptyCanvas { .. })));
    }
}

/// Pixel-level painting helpers.

use image::{imageops, imageops::FilterType, Rgba, RgbaImage};

use crate::state::options::Pattern;

/// Source-over blend of one pixel; out-of-bounds coordinates are ignored
pub fn blend_pixel(canvas: &mut RgbaImage, x: i64, y: i64, color: Rgba<u8>) {
    if x < 0 || y < 0 || x >= canvas.width() as i64 || y >= canvas.height() as i64 {
        return;
    }

    let dst = canvas.get_pixel_mut(x as u32, y as u32);
    let src_a = color.0[3] as f32 / 255.0;
    if src_a >= 1.0 {
        *dst = color;
        return;
    }
    if src_a <= 0.0 {
        return;
    }

    let dst_a = dst.0[3] as f32 / 255.0;
    let out_a = src_a + dst_a * (1.0 - src_a);
    for c in 0..3 {
        let src_c = color.0[c] as f32 / 255.0;
        let dst_c = dst.0[c] as f32 / 255.0;
        let out_c = (src_c * src_a + dst_c * dst_a * (1.0 - src_a)) / out_a;
        dst.0[c] = (out_c * 255.0).round() as u8;
    }
    dst.0[3] = (out_a * 255.0).round() as u8;
}

/// Fill a rectangle, blending translucent colours
pub fn fill_rect(canvas: &mut RgbaImage, x: i64, y: i64, width: u32, height: u32, color: Rgba<u8>) {
    let x0 = x.max(0);
    let y0 = y.max(0);
    let x1 = (x + width as i64).min(canvas.width() as i64);
    let y1 = (y + height as i64).min(canvas.height() as i64);

    for py in y0..y1 {
        for px in x0..x1 {
            blend_pixel(canvas, px, py, color);
        }
    }
}

/// Paint a repeating pattern over the whole canvas.
///
/// `scale` converts the pattern's card-pixel spacing to canvas pixels.
pub fn paint_pattern(canvas: &mut RgbaImage, pattern: Pattern, scale: f32) {
    let (width, height) = (canvas.width() as i64, canvas.height() as i64);
    let line = (scale.round() as u32).max(1);

    match pattern {
        Pattern::None => {}
        Pattern::Grid { spacing, color } => {
            let step = scaled_step(spacing, scale);
            for x in (0..width).step_by(step) {
                fill_rect(canvas, x, 0, line, height as u32, color);
            }
            for y in (0..height).step_by(step) {
                fill_rect(canvas, 0, y, width as u32, line, color);
            }
        }
        Pattern::Ruled { spacing, color } => {
            let step = scaled_step(spacing, scale);
            for y in (step as i64..height).step_by(step) {
                fill_rect(canvas, 0, y, width as u32, line, color);
            }
        }
        Pattern::Dots { spacing, radius, color } => {
            let step = scaled_step(spacing, scale);
            let r = radius * scale;
            let reach = r.ceil() as i64;
            let offset = step as i64 / 2;
            for cy in (offset..height).step_by(step) {
                for cx in (offset..width).step_by(step) {
                    for dy in -reach..=reach {
                        for dx in -reach..=reach {
                            if ((dx * dx + dy * dy) as f32) <= r * r {
                                blend_pixel(canvas, cx + dx, cy + dy, color);
                            }
                        }
                    }
                }
            }
        }
    }
}

fn scaled_step(spacing: u32, scale: f32) -> usize {
    ((spacing as f32 * scale).round() as usize).max(2)
}

/// Resize `source` to exactly `width`x`height` and composite it at `(x, y)`
pub fn draw_image(canvas: &mut RgbaImage, source: &RgbaImage, x: i64, y: i64, width: u32, height: u32) {
    if width == 0 || height == 0 || source.width() == 0 || source.height() == 0 {
        return;
    }

    if source.dimensions() == (width, height) {
        imageops::overlay(canvas, source, x, y);
    } else {
        let resized = imageops::resize(source, width, height, FilterType::Triangle);
        imageops::overlay(canvas, &resized, x, y);
    }
}

/// Cover-fit for image slots
///
/// A slot image fills its container on one axis and overflows on the other.
/// The container clips the overflow around the center, so no explicit crop
/// offsets are stored: the decision alone determines what is visible.

use serde::{Deserialize, Serialize};

/// Pixel dimensions of an image or a container
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Dimensions {
    pub width: u32,
    pub height: u32,
}

impl Dimensions {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// True when either axis is zero (not laid out yet, or a degenerate image)
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    fn ratio(&self) -> f64 {
        self.width as f64 / self.height as f64
    }
}

/// How one axis of a displayed image is sized
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Extent {
    /// Scales proportionally with the other axis
    Auto,
    /// 100% of the container on this axis
    Fill,
}

/// Which axis of the container an image fills
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FitDecision {
    pub width: Extent,
    pub height: Extent,
}

/// Source-pixel rectangle of an image that stays visible after clipping
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Region {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl Region {
    /// The entire image
    pub fn whole(natural: Dimensions) -> Self {
        Self {
            x: 0,
            y: 0,
            width: natural.width,
            height: natural.height,
        }
    }
}

impl FitDecision {
    /// Width fills the container, height overflows vertically
    pub const FILL_WIDTH: Self = Self {
        width: Extent::Fill,
        height: Extent::Auto,
    };

    /// Height fills the container, width overflows horizontally
    pub const FILL_HEIGHT: Self = Self {
        width: Extent::Auto,
        height: Extent::Fill,
    };

    /// Decide which axis fills the container.
    ///
    /// An image relatively wider than its container is constrained by
    /// height; everything else is constrained by width. A container or image
    /// with a zero axis always falls back to width-constrained.
    pub fn compute(container: Dimensions, natural: Dimensions) -> Self {
        if container.is_empty() || natural.is_empty() {
            return Self::FILL_WIDTH;
        }

        if natural.ratio() > container.ratio() {
            Self::FILL_HEIGHT
        } else {
            Self::FILL_WIDTH
        }
    }

    pub fn fills_height(&self) -> bool {
        self.height == Extent::Fill
    }

    /// Displayed size of the image in container pixels, before clipping
    pub fn displayed_size(&self, container: Dimensions, natural: Dimensions) -> (f64, f64) {
        if natural.is_empty() {
            return (container.width as f64, container.height as f64);
        }

        let (cw, ch) = (container.width as f64, container.height as f64);
        let (iw, ih) = (natural.width as f64, natural.height as f64);

        if self.fills_height() {
            (iw * ch / ih, ch)
        } else {
            (cw, ih * cw / iw)
        }
    }

    /// The part of the natural image that the container shows, centered on
    /// the overflowing axis.
    pub fn visible_region(&self, container: Dimensions, natural: Dimensions) -> Region {
        if container.is_empty() || natural.is_empty() {
            return Region::whole(natural);
        }

        let (iw, ih) = (natural.width as f64, natural.height as f64);
        let (dw, dh) = self.displayed_size(container, natural);

        let visible_w = (container.width as f64 * iw / dw).min(iw).round().max(1.0) as u32;
        let visible_h = (container.height as f64 * ih / dh).min(ih).round().max(1.0) as u32;

        Region {
            x: (natural.width - visible_w) / 2,
            y: (natural.height - visible_h) / 2,
            width: visible_w,
            height: visible_h,
        }
    }
}

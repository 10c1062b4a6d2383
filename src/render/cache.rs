/// Fitted slot bitmaps
///
/// Cropping a full-resolution photo to its visible region and resizing it to
/// the slot is the expensive part of painting a card. The result depends only
/// on the source bitmap, the region and the target size, so it is kept per
/// slot and reused until one of those changes.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

use image::{imageops, imageops::FilterType, RgbaImage};
use tracing::debug;

use crate::slot::fit::Region;
use crate::slot::SlotId;

#[derive(Debug)]
struct Entry {
    source: Arc<RgbaImage>,
    region: Region,
    fitted: Arc<RgbaImage>,
}

/// Per-slot, per-size cache of fitted bitmaps
#[derive(Debug, Default)]
pub struct FittedCache {
    entries: Mutex<HashMap<(SlotId, u32, u32), Entry>>,
}

impl FittedCache {
    /// `region` of `source` resized to `width`x`height`, built on first use.
    ///
    /// A new source for a slot drops every cached size of its old source.
    pub fn fitted(&self, slot: SlotId, source: &Arc<RgbaImage>, region: Region, width: u32, height: u32) -> Arc<RgbaImage> {
        let key = (slot, width, height);
        if let Some(entry) = self.lock().get(&key) {
            if Arc::ptr_eq(&entry.source, source) && entry.region == region {
                return Arc::clone(&entry.fitted);
            }
        }

        // Build outside the lock
        let fitted = build(source, region, width, height);
        debug!(?slot, width, height, "fitted slot bitmap");

        let mut entries = self.lock();
        entries.retain(|(id, _, _), entry| *id != slot || Arc::ptr_eq(&entry.source, source));
        entries.insert(
            key,
            Entry {
                source: Arc::clone(source),
                region,
                fitted: Arc::clone(&fitted),
            },
        );
        fitted
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<(SlotId, u32, u32), Entry>> {
        // Entries are replaced whole; a poisoned map is still consistent
        self.entries.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    #[cfg(test)]
    pub fn get(&self, slot: SlotId, width: u32, height: u32) -> Option<Arc<RgbaImage>> {
        self.lock().get(&(slot, width, height)).map(|entry| Arc::clone(&entry.fitted))
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.lock().len()
    }
}

fn build(source: &Arc<RgbaImage>, region: Region, width: u32, height: u32) -> Arc<RgbaImage> {
    let whole = region.x == 0
        && region.y == 0
        && (region.width, region.height) == source.dimensions();

    if whole && source.dimensions() == (width, height) {
        return Arc::clone(source);
    }

    let visible = if whole {
        (**source).clone()
    } else {
        imageops::crop_imm(&**source, region.x, region.y, region.width, region.height).to_image()
    };

    if visible.dimensions() == (width, height) {
        Arc::new(visible)
    } else {
        Arc::new(imageops::resize(&visible, width, height, FilterType::Triangle))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::slot::fit::Dimensions;
    use image::Rgba;

    fn source(width: u32, height: u32) -> Arc<RgbaImage> {
        Arc::new(RgbaImage::from_pixel(width, height, Rgba([9, 9, 9, 255])))
    }

    fn whole(image: &RgbaImage) -> Region {
        Region::whole(Dimensions::new(image.width(), image.height()))
    }

    #[test]
    fn same_inputs_reuse_the_bitmap() {
        let cache = FittedCache::default();
        let src = source(400, 200);
        let region = Region { x: 100, y: 0, width: 200, height: 200 };

        let first = cache.fitted(SlotId::Headshot, &src, region, 50, 50);
        let again = cache.fitted(SlotId::Headshot, &src, region, 50, 50);
        assert!(Arc::ptr_eq(&first, &again));
        assert_eq!(first.dimensions(), (50, 50));
    }

    #[test]
    fn new_source_replaces_every_size() {
        let cache = FittedCache::default();
        let old = source(100, 100);
        cache.fitted(SlotId::Album, &old, whole(&old), 10, 10);
        cache.fitted(SlotId::Album, &old, whole(&old), 20, 20);
        cache.fitted(SlotId::Motif1, &old, whole(&old), 10, 10);
        assert_eq!(cache.len(), 3);

        let new = source(100, 100);
        let fitted = cache.fitted(SlotId::Album, &new, whole(&new), 10, 10);
        assert_eq!(cache.len(), 2);
        assert!(cache.get(SlotId::Album, 20, 20).is_none());
        assert!(Arc::ptr_eq(&fitted, &cache.get(SlotId::Album, 10, 10).unwrap()));
        assert!(cache.get(SlotId::Motif1, 10, 10).is_some());
    }

    #[test]
    fn changed_region_rebuilds() {
        let cache = FittedCache::default();
        let src = source(300, 100);
        let left = Region { x: 0, y: 0, width: 100, height: 100 };
        let middle = Region { x: 100, y: 0, width: 100, height: 100 };

        let a = cache.fitted(SlotId::Motif2, &src, left, 100, 100);
        let b = cache.fitted(SlotId::Motif2, &src, middle, 100, 100);
        assert!(!Arc::ptr_eq(&a, &b));
    }

    #[test]
    fn intrinsic_size_shares_the_source() {
        let cache = FittedCache::default();
        let src = source(30, 40);
        let fitted = cache.fitted(SlotId::Sticker, &src, whole(&src), 30, 40);
        assert!(Arc::ptr_eq(&fitted, &src));
    }
}

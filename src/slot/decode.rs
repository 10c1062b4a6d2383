/// Image payload decoding
///
/// Turns raw bytes from a file or the clipboard into a bitmap whose natural
/// dimensions are known. Decoding is CPU-bound and runs on the blocking pool.

use std::sync::Arc;

use image::RgbaImage;
use tokio::task;

use super::fit::Dimensions;
use crate::error::AcquireError;

/// MIME type used when the bytes match no known image signature
const UNKNOWN_MIME: &str = "application/octet-stream";

/// An image payload before decoding, tagged with its sniffed MIME type
#[derive(Debug, Clone)]
pub struct EncodedImage {
    mime: &'static str,
    bytes: Vec<u8>,
}

impl EncodedImage {
    /// Wrap raw bytes, sniffing the MIME type from their magic number
    pub fn sniff(bytes: Vec<u8>) -> Self {
        let mime = image::guess_format(&bytes)
            .map(|format| format.to_mime_type())
            .unwrap_or(UNKNOWN_MIME);
        Self { mime, bytes }
    }

    pub fn mime(&self) -> &'static str {
        self.mime
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    fn decode_blocking(self) -> Result<SlotImage, AcquireError> {
        let decoded = image::load_from_memory(&self.bytes)
            .map_err(|e| AcquireError::Decode(Arc::new(e)))?;
        Ok(SlotImage::new(decoded.to_rgba8(), self.mime))
    }
}

/// A decoded bitmap ready to be shown in a slot
#[derive(Debug, Clone)]
pub struct SlotImage {
    pixels: Arc<RgbaImage>,
    mime: &'static str,
}

impl SlotImage {
    pub fn new(pixels: RgbaImage, mime: &'static str) -> Self {
        Self {
            pixels: Arc::new(pixels),
            mime,
        }
    }

    /// The shared bitmap; clones of this image point at the same one
    pub fn pixels(&self) -> &Arc<RgbaImage> {
        &self.pixels
    }

    pub fn mime(&self) -> &'static str {
        self.mime
    }

    /// Intrinsic size of the bitmap
    pub fn natural(&self) -> Dimensions {
        Dimensions::new(self.pixels.width(), self.pixels.height())
    }

    /// True if both values share the same bitmap
    pub fn same_bitmap(&self, other: &SlotImage) -> bool {
        Arc::ptr_eq(&self.pixels, &other.pixels)
    }
}

/// Decode a payload into a bitmap on the blocking pool
pub async fn decode(encoded: EncodedImage) -> Result<SlotImage, AcquireError> {
    task::spawn_blocking(move || encoded.decode_blocking())
        .await
        .map_err(|e| AcquireError::Join(e.to_string()))?
}

#[cfg(test)]
pub(crate) fn png_bytes(width: u32, height: u32, color: [u8; 4]) -> Vec<u8> {
    use std::io::Cursor;

    let img = RgbaImage::from_pixel(width, height, image::Rgba(color));
    let mut buf = Vec::new();
    img.write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
        .unwrap();
    buf
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sniffs_png_signature() {
        let encoded = EncodedImage::sniff(png_bytes(2, 2, [0, 0, 0, 255]));
        assert_eq!(encoded.mime(), "image/png");
        assert!(encoded.len() > 0);
    }

    #[test]
    fn unknown_bytes_get_generic_mime() {
        let encoded = EncodedImage::sniff(b"definitely not an image".to_vec());
        assert_eq!(encoded.mime(), UNKNOWN_MIME);
    }

    #[tokio::test]
    async fn decodes_natural_dimensions() {
        let image = decode(EncodedImage::sniff(png_bytes(7, 3, [255, 0, 0, 255])))
            .await
            .unwrap();
        assert_eq!(image.natural(), Dimensions::new(7, 3));
        assert_eq!(image.pixels().get_pixel(0, 0).0, [255, 0, 0, 255]);
    }

    #[tokio::test]
    async fn corrupt_payload_is_a_decode_error() {
        let result = decode(EncodedImage::sniff(vec![0x89, b'P', b'N', b'G', 0, 1, 2])).await;
        assert!(matches!(result, Err(AcquireError::Decode(_))));
    }
}

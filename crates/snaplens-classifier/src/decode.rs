//! Image decode boundary
//!
//! Turns raw uploaded or captured bytes (JPEG, PNG, WEBP, TIFF; format is
//! guessed from the content) into a [`CanonicalImage`]: decoded, EXIF
//! orientation applied, converted to RGB8. Everything downstream works on the
//! canonical form only.

use image::{DynamicImage, ImageDecoder, ImageReader};
use snaplens_core::{CanonicalImage, Error, Result};
use std::io::Cursor;

/// Decode image bytes into a canonical RGB image.
///
/// Undecodable bytes yield [`Error::DecodeFailure`]; no prediction is
/// attempted on such input.
pub fn decode_image(bytes: &[u8]) -> Result<CanonicalImage> {
    let reader = ImageReader::new(Cursor::new(bytes))
        .with_guessed_format()
        .map_err(|e| Error::decode_failure(format!("could not sniff image format: {e}")))?;

    let mut decoder = reader
        .into_decoder()
        .map_err(|e| Error::decode_failure(format!("unsupported or corrupt image: {e}")))?;

    // Orientation must be read before the decoder is consumed.
    let orientation = decoder
        .orientation()
        .map_err(|e| Error::decode_failure(format!("could not read image orientation: {e}")))?;

    let mut decoded = DynamicImage::from_decoder(decoder)
        .map_err(|e| Error::decode_failure(format!("could not decode image: {e}")))?;
    decoded.apply_orientation(orientation);

    let rgb = decoded.to_rgb8();
    CanonicalImage::new(rgb.width(), rgb.height(), rgb.into_raw())
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{ImageFormat, Rgb, RgbImage};

    fn encode(img: &RgbImage, format: ImageFormat) -> Vec<u8> {
        let mut buf = Cursor::new(Vec::new());
        img.write_to(&mut buf, format).unwrap();
        buf.into_inner()
    }

    #[test]
    fn decodes_png_to_canonical_rgb() {
        let img = RgbImage::from_pixel(4, 3, Rgb([10, 20, 30]));
        let canonical = decode_image(&encode(&img, ImageFormat::Png)).unwrap();

        assert_eq!(canonical.width(), 4);
        assert_eq!(canonical.height(), 3);
        assert_eq!(&canonical.pixels()[..3], &[10, 20, 30]);
    }

    #[test]
    fn decodes_jpeg() {
        let img = RgbImage::from_pixel(8, 8, Rgb([200, 100, 50]));
        let canonical = decode_image(&encode(&img, ImageFormat::Jpeg)).unwrap();
        assert_eq!(canonical.width(), 8);
        assert_eq!(canonical.height(), 8);
    }

    #[test]
    fn rejects_garbage_bytes() {
        let err = decode_image(b"definitely not an image").unwrap_err();
        assert!(matches!(err, Error::DecodeFailure(_)));
    }

    #[test]
    fn rejects_empty_input() {
        let err = decode_image(&[]).unwrap_err();
        assert!(matches!(err, Error::DecodeFailure(_)));
    }
}

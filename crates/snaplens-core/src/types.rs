//! Shared types for images, labels, and predictions

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};

/// A classification category name from the fixed, classifier-defined vocabulary.
pub type Label = String;

/// A decoded, orientation-corrected, RGB-converted image ready for inference.
///
/// The pixel buffer is tightly packed RGB8, row-major: `width * height * 3` bytes.
/// Decoding, EXIF-orientation correction, and RGB conversion all happen before a
/// `CanonicalImage` is constructed; nothing downstream re-interprets raw bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CanonicalImage {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
}

impl CanonicalImage {
    /// Create a canonical image from an RGB8 pixel buffer.
    pub fn new(width: u32, height: u32, pixels: Vec<u8>) -> Result<Self> {
        let expected = width as usize * height as usize * 3;
        if pixels.len() != expected {
            return Err(Error::invalid_input(format!(
                "pixel buffer length {} does not match {}x{} RGB ({} bytes)",
                pixels.len(),
                width,
                height,
                expected
            )));
        }
        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    /// Image width in pixels
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Image height in pixels
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Packed RGB8 pixel data, row-major
    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    /// Consume the image, returning the pixel buffer
    pub fn into_pixels(self) -> Vec<u8> {
        self.pixels
    }
}

/// The result of one classification call.
///
/// Held only as "last prediction" by callers; overwritten on the next
/// submission and never persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Prediction {
    /// The single most likely label
    pub top_label: Label,

    /// One probability per known label, in the classifier's fixed label order
    pub probabilities: Vec<f32>,
}

impl Prediction {
    /// Create a new prediction
    pub fn new(top_label: impl Into<Label>, probabilities: Vec<f32>) -> Self {
        Self {
            top_label: top_label.into(),
            probabilities,
        }
    }
}

// imgfetch-common/src/model/decoded_image.rs
use std::path::Path;

use image::{DynamicImage, ImageFormat};
use serde::Serialize;

use crate::error::Result;

/// An image decoded in memory, together with the format its bytes were in.
#[derive(Debug, Clone, PartialEq)]
pub struct DecodedImage {
    image: DynamicImage,
    format: ImageFormat,
}

impl DecodedImage {
    pub fn new(image: DynamicImage, format: ImageFormat) -> Self {
        Self { image, format }
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    pub fn format(&self) -> ImageFormat {
        self.format
    }

    pub fn image(&self) -> &DynamicImage {
        &self.image
    }

    /// Format used when writing the image back out: the source format if
    /// there is an encoder for it, PNG otherwise.
    pub fn output_format(&self) -> ImageFormat {
        if self.format.writing_enabled() {
            self.format
        } else {
            ImageFormat::Png
        }
    }

    /// File extension matching [`DecodedImage::output_format`].
    pub fn extension(&self) -> &'static str {
        self.output_format()
            .extensions_str()
            .first()
            .copied()
            .unwrap_or("png")
    }

    /// Re-encodes the image in its output format and writes it to `path`.
    pub fn save(&self, path: &Path) -> Result<()> {
        let format = self.output_format();
        tracing::debug!(
            "Writing {}x{} {:?} image to {}",
            self.width(),
            self.height(),
            format,
            path.display()
        );
        self.image.save_with_format(path, format)?;
        Ok(())
    }

    pub fn summary(&self) -> ImageSummary {
        ImageSummary {
            width: self.width(),
            height: self.height(),
            format: format!("{:?}", self.format).to_lowercase(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ImageSummary {
    pub width: u32,
    pub height: u32,
    pub format: String,
}

// imgfetch-net/src/codec.rs
use imgfetch_common::model::DecodedImage;
use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("image decoding failed: {0}")]
pub struct CodecError(pub String);

impl From<image::ImageError> for CodecError {
    fn from(error: image::ImageError) -> Self {
        Self(error.to_string())
    }
}

/// Turns encoded bytes into an in-memory image.
pub trait ImageCodec: Send + Sync {
    fn decode(&self, bytes: &[u8]) -> Result<DecodedImage, CodecError>;
}

/// Codec backed by the `image` crate; the format is sniffed from the bytes.
#[derive(Debug, Clone, Copy, Default)]
pub struct StandardCodec;

impl ImageCodec for StandardCodec {
    fn decode(&self, bytes: &[u8]) -> Result<DecodedImage, CodecError> {
        let format = image::guess_format(bytes)?;
        let decoded = image::load_from_memory_with_format(bytes, format)?;
        tracing::trace!(
            "Decoded {:?} image ({}x{})",
            format,
            decoded.width(),
            decoded.height()
        );
        Ok(DecodedImage::new(decoded, format))
    }
}

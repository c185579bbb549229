// imgfetch-common/src/error.rs
use std::sync::Arc;

use thiserror::Error;

/// Classified outcome of a failed image fetch.
///
/// Every failure of the validation pipeline maps to exactly one of these
/// kinds. The variants carry no payload; the display text is for humans only.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FetchError {
    #[error("Transport error.")]
    TransportError,

    #[error("Generic error.")]
    GenericError,

    #[error("Bad status code.")]
    BadStatusCode,

    #[error("Bad data, it could not be turned into an image.")]
    BadData,
}

impl FetchError {
    /// Stable machine-readable name for `--json` failure reports.
    pub fn kind(&self) -> &'static str {
        match self {
            FetchError::TransportError => "transport_error",
            FetchError::GenericError => "generic_error",
            FetchError::BadStatusCode => "bad_status_code",
            FetchError::BadData => "bad_data",
        }
    }
}

#[derive(Error, Debug, Clone)]
pub enum ImgfetchError {
    #[error("I/O Error: {0}")]
    Io(#[from] Arc<std::io::Error>),

    #[error("JSON Error: {0}")]
    Json(#[from] Arc<serde_json::Error>),

    #[error("Image Error: {0}")]
    Image(#[from] Arc<image::ImageError>),

    #[error("Fetch failed: {0}")]
    Fetch(#[from] FetchError),

    #[error("Invalid URL '{0}': {1}")]
    InvalidUrl(String, String),

    #[error("Configuration Error: {0}")]
    Config(String),

    #[error("HttpError: {0}")]
    HttpError(String),

    #[error("Generic Error: {0}")]
    Generic(String),
}

impl From<std::io::Error> for ImgfetchError {
    fn from(err: std::io::Error) -> Self {
        ImgfetchError::Io(Arc::new(err))
    }
}

impl From<serde_json::Error> for ImgfetchError {
    fn from(err: serde_json::Error) -> Self {
        ImgfetchError::Json(Arc::new(err))
    }
}

impl From<image::ImageError> for ImgfetchError {
    fn from(err: image::ImageError) -> Self {
        ImgfetchError::Image(Arc::new(err))
    }
}

pub type Result<T> = std::result::Result<T, ImgfetchError>;

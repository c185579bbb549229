// imgfetch-net/src/request.rs
use std::fmt;
use std::str::FromStr;

use imgfetch_common::error::{ImgfetchError, Result};
use reqwest::Method;
use url::Url;

/// An immutable description of one image request. The method is always GET.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ImageRequest {
    url: Url,
}

impl ImageRequest {
    /// Parses `url_str` into a request. Malformed input is rejected here,
    /// before any transport is involved.
    pub fn parse(url_str: &str) -> Result<Self> {
        let url = validate_url(url_str)?;
        Ok(Self { url })
    }

    pub fn url(&self) -> &Url {
        &self.url
    }

    pub fn method(&self) -> Method {
        Method::GET
    }
}

impl TryFrom<Url> for ImageRequest {
    type Error = ImgfetchError;

    fn try_from(url: Url) -> Result<Self> {
        if url.cannot_be_a_base() {
            return Err(ImgfetchError::InvalidUrl(
                url.to_string(),
                "URL has no hierarchical path".to_string(),
            ));
        }
        Ok(Self { url })
    }
}

impl FromStr for ImageRequest {
    type Err = ImgfetchError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl fmt::Display for ImageRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.method(), self.url)
    }
}

/// Validates a URL string, requiring an absolute, hierarchical URL.
pub fn validate_url(url_str: &str) -> Result<Url> {
    let url = Url::parse(url_str.trim())
        .map_err(|e| ImgfetchError::InvalidUrl(url_str.to_string(), e.to_string()))?;
    if url.cannot_be_a_base() {
        return Err(ImgfetchError::InvalidUrl(
            url_str.to_string(),
            "URL has no hierarchical path".to_string(),
        ));
    }
    tracing::trace!("Validated URL: {}", url);
    Ok(url)
}

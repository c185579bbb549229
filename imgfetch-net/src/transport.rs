// imgfetch-net/src/transport.rs
use async_trait::async_trait;
use bytes::Bytes;
use reqwest::StatusCode;
use thiserror::Error;

use crate::request::ImageRequest;

/// What a transport hands back for one completed exchange.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransportResponse {
    /// An HTTP exchange. `body` is `None` when the transport produced no payload.
    Http {
        status: StatusCode,
        body: Option<Bytes>,
    },
    /// Bytes obtained through something that is not HTTP (e.g. a `file:` URL).
    Other { body: Bytes },
}

impl TransportResponse {
    pub fn http(status: StatusCode, body: impl Into<Bytes>) -> Self {
        Self::Http {
            status,
            body: Some(body.into()),
        }
    }
}

/// The exchange itself failed: connectivity, DNS, TLS, reading the body, ...
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("transport failure: {0}")]
pub struct TransportFailure(pub String);

impl TransportFailure {
    pub fn new<S: Into<String>>(msg: S) -> Self {
        Self(msg.into())
    }
}

impl From<reqwest::Error> for TransportFailure {
    fn from(error: reqwest::Error) -> Self {
        Self(error.to_string())
    }
}

#[async_trait]
pub trait Transport: Send + Sync {
    /// Performs exactly one exchange for `request`.
    async fn perform(
        &self,
        request: &ImageRequest,
    ) -> Result<TransportResponse, TransportFailure>;
}

// imgfetch-net/src/http.rs
use async_trait::async_trait;
use bytes::Bytes;
use imgfetch_common::config::Config;
use imgfetch_common::error::{ImgfetchError, Result};
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, USER_AGENT};
use reqwest::Client;
use tracing::debug;

use crate::request::ImageRequest;
use crate::transport::{Transport, TransportFailure, TransportResponse};

const ACCEPT_IMAGES: &str = "image/*,*/*;q=0.8";

/// Default transport: reqwest for `http`/`https`, the local filesystem for
/// `file:` URLs (reported as a non-HTTP response).
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    pub fn new(user_agent: &str) -> Result<Self> {
        Ok(Self {
            client: build_http_client(user_agent)?,
        })
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        Self::new(&config.user_agent)
    }

    async fn perform_http(
        &self,
        request: &ImageRequest,
    ) -> std::result::Result<TransportResponse, TransportFailure> {
        let url = request.url();
        let response = self
            .client
            .request(request.method(), url.clone())
            .send()
            .await
            .map_err(|e| {
                debug!("HTTP request failed for {url}: {e}");
                TransportFailure::from(e)
            })?;
        let status = response.status();
        debug!("Received HTTP status: {} for {}", status, url);

        let body = response.bytes().await.map_err(|e| {
            debug!("Failed to read response body from {url}: {e}");
            TransportFailure::from(e)
        })?;
        debug!("Read {} body bytes from {}", body.len(), url);
        Ok(TransportResponse::Http {
            status,
            body: Some(body),
        })
    }

    async fn perform_file(
        &self,
        request: &ImageRequest,
    ) -> std::result::Result<TransportResponse, TransportFailure> {
        let url = request.url();
        let path = url
            .to_file_path()
            .map_err(|_| TransportFailure::new(format!("'{url}' is not a local file path")))?;
        let body = tokio::fs::read(&path).await.map_err(|e| {
            debug!("Failed to read {}: {}", path.display(), e);
            TransportFailure::new(format!("Failed to read {}: {e}", path.display()))
        })?;
        debug!("Read {} bytes from {}", body.len(), path.display());
        Ok(TransportResponse::Other {
            body: Bytes::from(body),
        })
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn perform(
        &self,
        request: &ImageRequest,
    ) -> std::result::Result<TransportResponse, TransportFailure> {
        match request.url().scheme() {
            "http" | "https" => self.perform_http(request).await,
            "file" => self.perform_file(request).await,
            other => Err(TransportFailure::new(format!(
                "Unsupported URL scheme '{other}'"
            ))),
        }
    }
}

fn build_http_client(user_agent: &str) -> Result<Client> {
    let mut headers = HeaderMap::new();
    let agent = HeaderValue::from_str(user_agent).map_err(|e| {
        ImgfetchError::Config(format!("Invalid user agent '{user_agent}': {e}"))
    })?;
    headers.insert(USER_AGENT, agent);
    headers.insert(ACCEPT, HeaderValue::from_static(ACCEPT_IMAGES));
    Client::builder()
        .default_headers(headers)
        .build()
        .map_err(|e| ImgfetchError::HttpError(format!("Failed to build HTTP client: {e}")))
}

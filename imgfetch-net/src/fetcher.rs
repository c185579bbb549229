// imgfetch-net/src/fetcher.rs
//! Image fetching with two calling conventions over one validation pipeline.
use std::fmt;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;

use futures::FutureExt;
use imgfetch_common::config::Config;
use imgfetch_common::error::{FetchError, Result};
use imgfetch_common::model::DecodedImage;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use crate::codec::{ImageCodec, StandardCodec};
use crate::http::HttpTransport;
use crate::request::ImageRequest;
use crate::transport::Transport;
use crate::validation::validate_response;

/// Fetches and decodes images. Cloning is cheap; clones share the transport
/// and codec but no per-call state.
#[derive(Clone)]
pub struct Fetcher {
    transport: Arc<dyn Transport>,
    codec: Arc<dyn ImageCodec>,
}

impl Fetcher {
    pub fn new(transport: Arc<dyn Transport>, codec: Arc<dyn ImageCodec>) -> Self {
        Self { transport, codec }
    }

    /// Uses `transport` together with the standard `image` codec.
    pub fn with_transport<T: Transport + 'static>(transport: T) -> Self {
        Self::new(Arc::new(transport), Arc::new(StandardCodec))
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        Ok(Self::with_transport(HttpTransport::from_config(config)?))
    }

    /// Issues one request and returns the decoded image or the reason it
    /// could not be produced.
    pub async fn fetch_image(
        &self,
        request: &ImageRequest,
    ) -> std::result::Result<DecodedImage, FetchError> {
        debug!("Fetching image: {}", request);
        let outcome = self.transport.perform(request).await;
        validate_response(outcome, self.codec.as_ref())
    }

    /// Callback flavour of [`Fetcher::fetch_image`]. Returns immediately; the
    /// callback runs exactly once on a runtime worker once the fetch is done.
    /// A panic inside the transport or codec is delivered as
    /// [`FetchError::GenericError`].
    ///
    /// # Panics
    ///
    /// Panics when called outside of a Tokio runtime.
    pub fn fetch_image_with<F>(&self, request: ImageRequest, callback: F) -> JoinHandle<()>
    where
        F: FnOnce(std::result::Result<DecodedImage, FetchError>) + Send + 'static,
    {
        let fetcher = self.clone();
        tokio::spawn(async move {
            let result = AssertUnwindSafe(fetcher.fetch_image(&request))
                .catch_unwind()
                .await
                .unwrap_or_else(|_| {
                    warn!("Fetch of {} panicked", request);
                    Err(FetchError::GenericError)
                });
            callback(result);
        })
    }
}

impl fmt::Debug for Fetcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Fetcher").finish_non_exhaustive()
    }
}

// imgfetch-net/src/validation.rs
use imgfetch_common::error::FetchError;
use imgfetch_common::model::DecodedImage;
use reqwest::StatusCode;

use crate::codec::ImageCodec;
use crate::transport::{TransportFailure, TransportResponse};

/// Turns the raw result of one transport exchange into an image or a
/// classified error. Checks run in order and stop at the first failure:
/// transport, response kind, status, payload.
pub fn validate_response(
    outcome: Result<TransportResponse, TransportFailure>,
    codec: &dyn ImageCodec,
) -> Result<DecodedImage, FetchError> {
    let response = outcome.map_err(|_| FetchError::TransportError)?;

    let (status, body) = match response {
        TransportResponse::Http { status, body } => (status, body),
        TransportResponse::Other { .. } => return Err(FetchError::GenericError),
    };

    if status != StatusCode::OK {
        return Err(FetchError::BadStatusCode);
    }

    let body = body
        .filter(|b| !b.is_empty())
        .ok_or(FetchError::BadData)?;

    codec.decode(&body).map_err(|_| FetchError::BadData)
}

// imgfetch-net/src/lib.rs
pub mod codec;
pub mod fetcher;
pub mod http;
pub mod request;
pub mod transport;
pub mod validation;

pub use codec::{CodecError, ImageCodec, StandardCodec};
pub use fetcher::Fetcher;
pub use http::HttpTransport;
pub use imgfetch_common::{
    error::{FetchError, ImgfetchError, Result},
    Config, DecodedImage,
};
pub use request::{validate_url, ImageRequest};
pub use transport::{Transport, TransportFailure, TransportResponse};
pub use validation::validate_response;
pub use reqwest::StatusCode;
pub use url::Url;

// imgfetch/src/test_support.rs
//! Scripted transport and fixtures shared by the command tests.
use std::collections::VecDeque;
use std::io::Cursor;
use std::path::Path;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use bytes::Bytes;
use image::{DynamicImage, ImageFormat, Rgb, RgbImage};
use imgfetch_common::Config;
use imgfetch_net::{
    Fetcher, ImageRequest, StandardCodec, StatusCode, Transport, TransportFailure,
    TransportResponse,
};

pub type Outcome = Result<TransportResponse, TransportFailure>;

/// Hands out queued outcomes in call order; once the queue runs dry every
/// further call is a transport failure.
pub struct ScriptedTransport {
    outcomes: Mutex<VecDeque<Outcome>>,
}

#[async_trait]
impl Transport for ScriptedTransport {
    async fn perform(&self, _request: &ImageRequest) -> Outcome {
        self.outcomes
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(TransportFailure::new("script exhausted")))
    }
}

pub fn scripted_fetcher(outcomes: Vec<Outcome>) -> Fetcher {
    let transport = ScriptedTransport {
        outcomes: Mutex::new(outcomes.into()),
    };
    Fetcher::new(Arc::new(transport), Arc::new(StandardCodec))
}

pub fn png_ok() -> Outcome {
    let img = DynamicImage::ImageRgb8(RgbImage::from_pixel(4, 3, Rgb([50, 60, 70])));
    let mut buf = Cursor::new(Vec::new());
    img.write_to(&mut buf, ImageFormat::Png).unwrap();
    Ok(TransportResponse::http(StatusCode::OK, Bytes::from(buf.into_inner())))
}

pub fn not_found() -> Outcome {
    Ok(TransportResponse::http(StatusCode::NOT_FOUND, "gone"))
}

pub fn config_in(dir: &Path) -> Config {
    let output_dir = dir.to_string_lossy().into_owned();
    Config::from_lookup(|key| match key {
        "IMGFETCH_OUTPUT_DIR" => Some(output_dir.clone()),
        "IMGFETCH_DEFAULT_URL" => Some("https://images.example.com/pic.png".to_string()),
        _ => None,
    })
    .unwrap()
}

use std::io::Cursor;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use bytes::Bytes;
use image::{DynamicImage, ImageFormat, Rgb, RgbImage};
use imgfetch_net::{
    CodecError, DecodedImage, FetchError, Fetcher, ImageCodec, ImageRequest, ImgfetchError,
    StandardCodec, Transport, TransportFailure, TransportResponse,
};
use reqwest::StatusCode;
use rstest::*;

/// Transport that replays a fixed outcome and records every call.
struct ScriptedTransport {
    outcome: Result<TransportResponse, TransportFailure>,
    calls: AtomicUsize,
    seen: Mutex<Vec<String>>,
}

impl ScriptedTransport {
    fn new(outcome: Result<TransportResponse, TransportFailure>) -> Arc<Self> {
        Arc::new(Self {
            outcome,
            calls: AtomicUsize::new(0),
            seen: Mutex::new(Vec::new()),
        })
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Transport for ScriptedTransport {
    async fn perform(
        &self,
        request: &ImageRequest,
    ) -> Result<TransportResponse, TransportFailure> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.seen.lock().unwrap().push(request.url().to_string());
        self.outcome.clone()
    }
}

fn jpeg_bytes() -> Bytes {
    let img = DynamicImage::ImageRgb8(RgbImage::from_pixel(5, 5, Rgb([1, 2, 3])));
    let mut buf = Cursor::new(Vec::new());
    img.write_to(&mut buf, ImageFormat::Jpeg).unwrap();
    Bytes::from(buf.into_inner())
}

fn fetcher_over(transport: &Arc<ScriptedTransport>) -> Fetcher {
    Fetcher::new(transport.clone(), Arc::new(StandardCodec))
}

fn request() -> ImageRequest {
    ImageRequest::parse("https://images.example.com/pic.jpg").unwrap()
}

async fn via_callback(fetcher: &Fetcher) -> (Result<DecodedImage, FetchError>, usize) {
    let fired = Arc::new(AtomicUsize::new(0));
    let slot = Arc::new(Mutex::new(None));
    let (fired_cb, slot_cb) = (Arc::clone(&fired), Arc::clone(&slot));

    fetcher
        .fetch_image_with(request(), move |result| {
            fired_cb.fetch_add(1, Ordering::SeqCst);
            *slot_cb.lock().unwrap() = Some(result);
        })
        .await
        .unwrap();

    let result = slot.lock().unwrap().take().unwrap();
    (result, fired.load(Ordering::SeqCst))
}

#[rstest]
#[case::transport(Err(TransportFailure::new("connection reset")), FetchError::TransportError)]
#[case::not_http(Ok(TransportResponse::Other { body: jpeg_bytes() }), FetchError::GenericError)]
#[case::not_found(Ok(TransportResponse::http(StatusCode::NOT_FOUND, jpeg_bytes())), FetchError::BadStatusCode)]
#[case::teapot(Ok(TransportResponse::http(StatusCode::IM_A_TEAPOT, Bytes::new())), FetchError::BadStatusCode)]
#[case::no_body(Ok(TransportResponse::Http { status: StatusCode::OK, body: None }), FetchError::BadData)]
#[case::text_body(Ok(TransportResponse::http(StatusCode::OK, "plain text")), FetchError::BadData)]
#[tokio::test]
async fn both_conventions_report_the_same_error(
    #[case] outcome: Result<TransportResponse, TransportFailure>,
    #[case] expected: FetchError,
) {
    let transport = ScriptedTransport::new(outcome);
    let fetcher = fetcher_over(&transport);

    let awaited = fetcher.fetch_image(&request()).await;
    let (delivered, fired) = via_callback(&fetcher).await;

    assert_eq!(awaited.unwrap_err(), expected);
    assert_eq!(delivered.unwrap_err(), expected);
    assert_eq!(fired, 1);
    assert_eq!(transport.calls(), 2);
}

#[tokio::test]
async fn success_matches_direct_decode() {
    let body = jpeg_bytes();
    let transport = ScriptedTransport::new(Ok(TransportResponse::http(StatusCode::OK, body.clone())));
    let fetcher = fetcher_over(&transport);
    let expected = StandardCodec.decode(&body).unwrap();

    let awaited = fetcher.fetch_image(&request()).await.unwrap();
    let (delivered, fired) = via_callback(&fetcher).await;

    assert_eq!(awaited, expected);
    assert_eq!(delivered.unwrap(), expected);
    assert_eq!(fired, 1);
    assert_eq!(
        *transport.seen.lock().unwrap(),
        vec![
            "https://images.example.com/pic.jpg".to_string(),
            "https://images.example.com/pic.jpg".to_string()
        ]
    );
}

#[rstest]
#[case("")]
#[case("::::")]
#[case("https://")]
#[case("no scheme here")]
#[tokio::test]
async fn malformed_url_never_reaches_the_transport(#[case] input: &str) {
    let transport = ScriptedTransport::new(Ok(TransportResponse::http(StatusCode::OK, jpeg_bytes())));
    let _fetcher = fetcher_over(&transport);

    let err = ImageRequest::parse(input).unwrap_err();

    assert!(matches!(err, ImgfetchError::InvalidUrl(..)));
    assert_eq!(transport.calls(), 0);
}

#[tokio::test]
async fn injected_codec_decides_what_counts_as_an_image() {
    struct RejectEverything;

    impl ImageCodec for RejectEverything {
        fn decode(&self, _bytes: &[u8]) -> Result<DecodedImage, CodecError> {
            Err(CodecError("rejected".into()))
        }
    }

    let transport = ScriptedTransport::new(Ok(TransportResponse::http(StatusCode::OK, jpeg_bytes())));
    let fetcher = Fetcher::new(transport.clone(), Arc::new(RejectEverything));

    assert_eq!(
        fetcher.fetch_image(&request()).await.unwrap_err(),
        FetchError::BadData
    );
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn callback_returns_before_the_fetch_completes() {
    let transport = ScriptedTransport::new(Ok(TransportResponse::http(StatusCode::OK, jpeg_bytes())));
    let fetcher = fetcher_over(&transport);
    let (tx, rx) = tokio::sync::oneshot::channel();

    let handle = fetcher.fetch_image_with(request(), move |result| {
        let _ = tx.send(result.map(|img| (img.width(), img.height())));
    });

    assert_eq!(rx.await.unwrap(), Ok((5, 5)));
    handle.await.unwrap();
}

#[tokio::test]
async fn panicking_transport_still_fires_the_callback_once() {
    struct PanickingTransport;

    #[async_trait]
    impl Transport for PanickingTransport {
        async fn perform(
            &self,
            _request: &ImageRequest,
        ) -> Result<TransportResponse, TransportFailure> {
            panic!("transport blew up");
        }
    }

    let fetcher = Fetcher::with_transport(PanickingTransport);
    let (fired, delivered) = (Arc::new(AtomicUsize::new(0)), Arc::new(Mutex::new(None)));
    let (fired_cb, delivered_cb) = (Arc::clone(&fired), Arc::clone(&delivered));

    fetcher
        .fetch_image_with(request(), move |result| {
            fired_cb.fetch_add(1, Ordering::SeqCst);
            *delivered_cb.lock().unwrap() = Some(result);
        })
        .await
        .unwrap();

    assert_eq!(fired.load(Ordering::SeqCst), 1);
    assert_eq!(
        delivered.lock().unwrap().take().unwrap().unwrap_err(),
        FetchError::GenericError
    );
}

// imgfetch/src/presentation.rs
//! Places fetched images into their targets on disk.
use std::fs;
use std::future::Future;
use std::path::Path;

use imgfetch_common::error::{FetchError, ImgfetchError, Result};
use imgfetch_common::DecodedImage;
use imgfetch_net::{Fetcher, ImageRequest};
use tokio::sync::oneshot;

/// Starts a callback-convention fetch right away and hands its result back to
/// the awaiting task, which is where results get placed.
pub fn fetch_via_callback(
    fetcher: &Fetcher,
    request: ImageRequest,
) -> impl Future<Output = Result<std::result::Result<DecodedImage, FetchError>>> {
    let (tx, rx) = oneshot::channel();
    fetcher.fetch_image_with(request, move |result| {
        let _ = tx.send(result);
    });
    async move {
        rx.await.map_err(|_| {
            ImgfetchError::Generic("Fetch task ended without delivering a result".to_string())
        })
    }
}

/// Writes `image` to `target`, creating parent directories as needed. Only
/// `target` is touched.
pub fn place_image(image: &DecodedImage, target: &Path) -> Result<()> {
    if let Some(parent) = target.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| {
            ImgfetchError::Generic(format!(
                "Failed to create output directory {}: {}",
                parent.display(),
                e
            ))
        })?;
    }
    image.save(target)
}

//! Contains the logic for the `demo` command: one request, fetched through
//! the callback convention into `top` and the async convention into `bottom`.
use clap::Args;
use colored::Colorize;
use imgfetch_common::config::Config;
use imgfetch_common::error::{ImgfetchError, Result};
use imgfetch_common::DecodedImage;
use imgfetch_net::{Fetcher, ImageRequest};
use tracing::{debug, warn};

use crate::presentation::{fetch_via_callback, place_image};

#[derive(Args, Debug)]
pub struct Demo {
    /// Image URL; defaults to IMGFETCH_DEFAULT_URL or the built-in demo image
    pub url: Option<String>,
}

impl Demo {
    pub async fn run(&self, config: &Config, fetcher: &Fetcher) -> Result<()> {
        let url = self.url.as_deref().unwrap_or(config.default_url.as_str());
        let request = ImageRequest::parse(url)?;
        debug!("Running demo against {}", request);

        let top = fetch_via_callback(fetcher, request.clone());
        let bottom = fetcher.fetch_image(&request);
        let (top, bottom) = tokio::join!(top, bottom);

        // A side fails independently; only both failing fails the command.
        let top = top.and_then(|outcome| outcome.map_err(ImgfetchError::from));
        let bottom = bottom.map_err(ImgfetchError::from);

        let mut placed = 0;
        for (target, outcome) in [("top", top), ("bottom", bottom)] {
            if place_side(config, target, &outcome) {
                placed += 1;
            }
        }

        if placed == 0 {
            return Err(ImgfetchError::Generic(format!(
                "Neither calling convention produced an image for {url}"
            )));
        }
        Ok(())
    }
}

fn place_side(config: &Config, target: &str, outcome: &Result<DecodedImage>) -> bool {
    let placed = outcome.as_ref().map_err(|e| e.clone()).and_then(|image| {
        let path = config.output_path(target, image.extension());
        place_image(image, &path)?;
        Ok((image, path))
    });

    match placed {
        Ok((image, path)) => {
            println!(
                "{}{} {}x{} -> {}",
                "==> ".bold().blue(),
                target.bold(),
                image.width(),
                image.height(),
                path.display()
            );
            true
        }
        Err(e) => {
            warn!("No image for {}: {}", target, e);
            eprintln!("{} no image for {}: {}", "Warning:".yellow(), target, e);
            false
        }
    }
}

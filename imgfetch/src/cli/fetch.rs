//! Contains the logic for the `fetch` command.
use std::path::{Path, PathBuf};

use clap::Args;
use colored::Colorize;
use imgfetch_common::config::Config;
use imgfetch_common::error::{FetchError, ImgfetchError, Result};
use imgfetch_common::{DecodedImage, ImageSummary};
use imgfetch_net::{Fetcher, ImageRequest};
use serde::Serialize;

use crate::cli::Convention;
use crate::presentation::{fetch_via_callback, place_image};

#[derive(Args, Debug)]
pub struct Fetch {
    /// Image URL; defaults to IMGFETCH_DEFAULT_URL or the built-in demo image
    pub url: Option<String>,

    /// Calling convention used to fetch the image
    #[arg(long, value_enum, default_value_t = Convention::Async)]
    pub mode: Convention,

    /// Where to write the image (default: <output dir>/image.<ext>)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Print a JSON summary instead of a status line
    #[arg(long)]
    pub json: bool,
}

#[derive(Serialize, Debug)]
struct FetchReport<'a> {
    url: &'a str,
    mode: Convention,
    #[serde(flatten)]
    image: ImageSummary,
    path: &'a Path,
}

#[derive(Serialize, Debug)]
struct FailureReport<'a> {
    url: &'a str,
    mode: Convention,
    error: &'static str,
    message: String,
}

impl Fetch {
    pub async fn run(&self, config: &Config, fetcher: &Fetcher) -> Result<()> {
        let url = self.url.as_deref().unwrap_or(config.default_url.as_str());
        let request = ImageRequest::parse(url)?;
        tracing::debug!("Fetching {} using the {:?} convention", request, self.mode);

        match self.fetch_and_place(config, fetcher, &request).await {
            Ok((image, target)) => {
                if self.json {
                    println!("{}", self.success_json(&request, &image, &target)?);
                } else {
                    println!(
                        "{}Saved {}x{} image to {}",
                        "==> ".bold().blue(),
                        image.width(),
                        image.height(),
                        target.display().to_string().bold()
                    );
                }
                Ok(())
            }
            Err(ImgfetchError::Fetch(kind)) if self.json => {
                println!("{}", self.failure_json(&request, kind)?);
                Err(ImgfetchError::Fetch(kind))
            }
            Err(e) => Err(e),
        }
    }

    async fn fetch_and_place(
        &self,
        config: &Config,
        fetcher: &Fetcher,
        request: &ImageRequest,
    ) -> Result<(DecodedImage, PathBuf)> {
        let image = match self.mode {
            Convention::Async => fetcher.fetch_image(request).await?,
            Convention::Callback => fetch_via_callback(fetcher, request.clone()).await??,
        };

        let target = self
            .output
            .clone()
            .unwrap_or_else(|| config.output_path("image", image.extension()));
        place_image(&image, &target)?;
        Ok((image, target))
    }

    fn success_json(
        &self,
        request: &ImageRequest,
        image: &DecodedImage,
        target: &Path,
    ) -> Result<String> {
        let report = FetchReport {
            url: request.url().as_str(),
            mode: self.mode,
            image: image.summary(),
            path: target,
        };
        Ok(serde_json::to_string_pretty(&report)?)
    }

    fn failure_json(&self, request: &ImageRequest, error: FetchError) -> Result<String> {
        let report = FailureReport {
            url: request.url().as_str(),
            mode: self.mode,
            error: error.kind(),
            message: error.to_string(),
        };
        Ok(serde_json::to_string_pretty(&report)?)
    }
}

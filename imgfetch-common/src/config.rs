// imgfetch-common/src/config.rs
use std::env;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use tracing::debug;

use super::error::Result;

pub const DEFAULT_IMAGE_URL: &str = "https://upload.wikimedia.org/wikipedia/en/f/f7/RickRoll.png";
const FALLBACK_LOGS_DIRNAME: &str = ".imgfetch_logs";

#[derive(Debug, Clone)]
pub struct Config {
    pub default_url: String,
    pub output_dir: PathBuf,
    pub user_agent: String,
    pub logs_dir: PathBuf,
}

impl Config {
    pub fn load() -> Result<Self> {
        debug!("Loading imgfetch configuration");
        let config = Self::from_lookup(|key| env::var(key).ok())?;
        debug!("Configuration loaded successfully.");
        Ok(config)
    }

    /// Builds a configuration from an arbitrary variable source. Empty values
    /// count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).filter(|s| !s.trim().is_empty());

        let default_url = var("IMGFETCH_DEFAULT_URL").unwrap_or_else(|| {
            debug!(
                "IMGFETCH_DEFAULT_URL not set, falling back to default: {}",
                DEFAULT_IMAGE_URL
            );
            DEFAULT_IMAGE_URL.to_string()
        });

        let output_dir = var("IMGFETCH_OUTPUT_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("."));
        debug!("Effective output directory: {}", output_dir.display());

        let user_agent = var("IMGFETCH_USER_AGENT")
            .unwrap_or_else(|| format!("imgfetch/{}", env!("CARGO_PKG_VERSION")));

        let logs_dir = ProjectDirs::from("", "", "imgfetch")
            .map(|dirs| dirs.data_dir().join("logs"))
            .unwrap_or_else(|| {
                debug!("No platform data directory found, logging next to output");
                output_dir.join(FALLBACK_LOGS_DIRNAME)
            });

        Ok(Self {
            default_url,
            output_dir,
            user_agent,
            logs_dir,
        })
    }

    pub fn logs_dir(&self) -> &Path {
        &self.logs_dir
    }

    /// Target path for an image written under `stem` with the given extension.
    pub fn output_path(&self, stem: &str, extension: &str) -> PathBuf {
        self.output_dir.join(format!("{stem}.{extension}"))
    }
}

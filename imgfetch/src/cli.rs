// imgfetch/src/cli.rs
//! Defines the command-line argument structure using clap.
use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use imgfetch_common::error::Result;
use imgfetch_common::Config;
use imgfetch_net::Fetcher;
use serde::Serialize;

pub mod demo;
pub mod fetch;

use crate::cli::demo::Demo;
use crate::cli::fetch::Fetch;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None, name = "imgfetch", bin_name = "imgfetch")]
#[command(propagate_version = true)]
pub struct CliArgs {
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Fetch one image and write it to disk
    Fetch(Fetch),
    /// Fetch the same image through both conventions side by side
    Demo(Demo),
}

/// Which entry point of the fetcher to drive.
#[derive(ValueEnum, Serialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Convention {
    Async,
    Callback,
}

impl Command {
    pub async fn run(&self, config: &Config, fetcher: &Fetcher) -> Result<()> {
        match self {
            Self::Fetch(command) => command.run(config, fetcher).await,
            Self::Demo(command) => command.run(config, fetcher).await,
        }
    }
}

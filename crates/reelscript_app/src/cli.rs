use std::path::PathBuf;

use clap::Parser;

use crate::platform::logging::LogDestination;

/// Generate short-video scripts and storyboards from a prompt.
///
/// With `--prompt` the form is submitted once and the program exits.
/// Without it, form fields are read as commands from stdin.
#[derive(Parser, Debug)]
#[command(name = "reelscript", version)]
pub struct Args {
    /// Base URL of the generation backend.
    #[arg(long)]
    pub endpoint: Option<String>,
    /// RON config file. Defaults to ./reelscript.ron when present.
    #[arg(long)]
    pub config: Option<PathBuf>,
    /// Description of the video content.
    #[arg(long)]
    pub prompt: Option<String>,
    /// Video category, e.g. "entertaining" or "educational".
    #[arg(long = "video-type")]
    pub video_type: Option<String>,
    /// Video length in seconds.
    #[arg(long)]
    pub duration: Option<String>,
    /// Also ask for a storyboard.
    #[arg(long)]
    pub storyboard: bool,
    /// Probe the backend's /health endpoint and exit.
    #[arg(long)]
    pub check_health: bool,
    /// Where log output goes.
    #[arg(long, value_enum, default_value_t = LogDestination::File)]
    pub log: LogDestination,
}

//! CLI argument parsing with clap derive macros.

use std::path::PathBuf;

use clap::Parser;
use emojistealer_core::UrlPreference;

pub const DEFAULT_OUTPUT_DIR: &str = "./emoji-downloads";

/// Download emoji from Mastodon/Pleroma/Misskey instances.
///
/// Detects the server software, lists its custom emoji, lets you pick which
/// ones to keep and saves them with a pack.json per category.
#[derive(Debug, Parser)]
#[command(
    name = "emojistealer",
    version,
    after_help = "\
Examples:
  emojistealer mastodon.social                 # Detect, list and select
  emojistealer --original mastodon.social      # Prefer animated originals
  emojistealer -o ~/emoji https://example.org  # Custom output directory"
)]
pub struct Cli {
    /// URL of the instance to download emoji from
    pub url: String,

    /// Download emoji from "original URL" instead of "static URL" (only
    /// makes a difference on Mastodon)
    #[arg(long)]
    pub original: bool,

    /// Output directory to save the emoji to
    #[arg(
        short,
        long,
        value_name = "DIR",
        env = "EMOJISTEALER_OUTPUT",
        default_value = DEFAULT_OUTPUT_DIR
    )]
    pub output: PathBuf,

    /// Always hit the network for metadata instead of reusing responses
    /// fetched in the last few minutes
    #[arg(long)]
    pub no_cache: bool,
}

impl Cli {
    pub fn url_preference(&self) -> UrlPreference {
        if self.original {
            UrlPreference::Original
        } else {
            UrlPreference::Static
        }
    }
}

//! emojistealer entry point.

mod args;
mod logging;
mod prompt;
mod transport;

use std::io;

use clap::Parser;
use emojistealer_core::download::{self, DownloadOptions};
use emojistealer_core::{Catalog, Error, Instance};
use tracing::{error, info};

use crate::args::Cli;
use crate::logging::bold;
use crate::prompt::Outcome;
use crate::transport::{ClientConfig, HttpClient};

fn main() {
    logging::init();

    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        error!("{}", e);
        if let Some(err) = e.downcast_ref::<Error>() {
            info!("hint: {}", err.suggestion());
        }
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    info!("{} {}", bold("emojistealer"), env!("CARGO_PKG_VERSION"));
    info!("===\n");
    info!(
        "Attempting to find instance information for {}...",
        bold(&cli.url)
    );

    let http = HttpClient::new(ClientConfig {
        use_cache: !cli.no_cache,
        ..ClientConfig::default()
    })?;

    let instance = Instance::classify(&cli.url, &http)?;
    info!(
        "Found {} instance: {}\n",
        bold(&instance.software().to_string()),
        bold(instance.base_url())
    );

    info!("Getting emoji list...");
    let catalog = Catalog::new(instance.emoji(&http).to_vec());
    if catalog.is_empty() {
        anyhow::bail!(
            "No emoji found! Either this instance does not have any custom emoji, or it is denying our requests."
        );
    }

    prompt::print_listing(&catalog);
    prompt::print_help();

    let stdin = io::stdin();
    let selection = match prompt::run(&catalog, &mut stdin.lock(), &mut io::stdout())? {
        Outcome::Confirmed(selection) => selection,
        Outcome::Quit => return Ok(()),
    };

    info!("Downloading emoji...");
    let options = DownloadOptions {
        output_dir: cli.output.clone(),
        preference: cli.url_preference(),
        homepage: instance.base_url().to_string(),
    };
    let report = download::download_all(&http, &selection, &options)?;

    info!(
        "{} downloaded, {} already present, {} failed.",
        report.downloaded, report.skipped, report.failed
    );
    info!("Done! Enjoy your emoji!");
    Ok(())
}

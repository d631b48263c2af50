//! Recyclable catalog - container/image catalog and classification manifests
//!
//! A CLI tool that imports container and image records, exports deposit and
//! size manifests, and plans capture batches.

mod cli;
mod commands;
mod output;

use clap::Parser;
use cli::Cli;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

const VERBOSE_FILTER: &str = "recyclable_cli=debug,recyclable_app=debug,recyclable_infra=debug,recyclable_domain=debug";

fn main() {
    let cli = Cli::parse();

    let default_filter = if cli.verbose { VERBOSE_FILTER } else { "warn" };
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| default_filter.into()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    if let Err(e) = commands::execute(cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

//! CLI definition using clap

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use recyclable_domain::model::Jurisdiction;
use recyclable_domain::service::CategoryShare;
use recyclable_types::OutputFormat;

#[derive(Parser)]
#[command(name = "recyclable")]
#[command(version)]
#[command(about = "Recyclable container image catalog and classification manifests")]
#[command(long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Store directory override. Uses config value if not specified.
    #[arg(long, global = true)]
    pub store_dir: Option<PathBuf>,

    /// Output format (json, table). Uses config value if not specified.
    #[arg(long, short = 'f', global = true)]
    pub format: Option<OutputFormat>,

    /// Verbose logging
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum ManifestCommand {
    /// Image URLs by deposit class
    Deposit {
        /// Write the manifest to a file instead of stdout
        #[arg(long, short = 'o')]
        output: Option<PathBuf>,
    },

    /// Image URLs by container size
    Size {
        /// Jurisdiction for the size classes. Uses config value if not specified.
        #[arg(long, short = 'j')]
        jurisdiction: Option<Jurisdiction>,

        /// Write the manifest to a file instead of stdout
        #[arg(long, short = 'o')]
        output: Option<PathBuf>,
    },
}

#[derive(Subcommand)]
pub enum Commands {
    /// Import container.csv and image.csv from a directory
    Import {
        /// Directory holding the CSV files
        dir: PathBuf,
    },

    /// Build a classification manifest
    Manifest {
        #[command(subcommand)]
        kind: ManifestCommand,
    },

    /// List the deposit class of each stored image
    Classify {
        /// Only images of this container
        #[arg(long, short = 'b')]
        barcode: Option<String>,
    },

    /// Split a capture batch into per-category image counts
    Allocate {
        /// Number of images in the batch
        #[arg(long, short = 'n')]
        total: Option<u32>,

        /// Category share as NAME=PERCENT (repeatable)
        #[arg(long = "category", short = 'c', value_parser = parse_share, conflicts_with = "plan")]
        categories: Vec<CategoryShare>,

        /// TOML capture plan
        #[arg(long, short = 'p')]
        plan: Option<PathBuf>,
    },

    /// Store captured image files of a container in plan order
    Capture {
        /// Barcode of the photographed container
        barcode: String,

        /// Number of images in the batch
        #[arg(long, short = 'n')]
        total: Option<u32>,

        /// Category share as NAME=PERCENT (repeatable)
        #[arg(long = "category", short = 'c', value_parser = parse_share, conflicts_with = "plan")]
        categories: Vec<CategoryShare>,

        /// TOML capture plan
        #[arg(long, short = 'p')]
        plan: Option<PathBuf>,

        /// Captured image files, one per plan position
        #[arg(required = true)]
        files: Vec<PathBuf>,
    },

    /// Manage configuration
    Config {
        /// Show current configuration
        #[arg(long)]
        show: bool,

        /// Set object storage bucket
        #[arg(long)]
        set_bucket: Option<String>,

        /// Set object storage region
        #[arg(long)]
        set_region: Option<String>,

        /// Set default size-manifest jurisdiction
        #[arg(long)]
        set_jurisdiction: Option<Jurisdiction>,

        /// Set default output format
        #[arg(long)]
        set_output: Option<OutputFormat>,

        /// Reset to defaults
        #[arg(long)]
        reset: bool,
    },
}

/// Parse `NAME=PERCENT`
fn parse_share(s: &str) -> Result<CategoryShare, String> {
    let (name, pct) = s
        .split_once('=')
        .ok_or_else(|| format!("expected NAME=PERCENT, got '{}'", s))?;
    let name = name.trim();
    if name.is_empty() {
        return Err(format!("missing category name in '{}'", s));
    }
    let percentage = pct
        .trim()
        .trim_end_matches('%')
        .parse::<f64>()
        .map_err(|_| format!("invalid percentage in '{}'", s))?;
    Ok(CategoryShare::new(name, percentage))
}

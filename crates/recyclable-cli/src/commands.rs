//! Command implementations

use std::fs;
use std::path::{Path, PathBuf};

use indicatif::{ProgressBar, ProgressStyle};
use recyclable_app::app::{CaptureOptions, CaptureService, ManifestKind, ManifestService};
use recyclable_app::config::Config;
use recyclable_app::repository::{open_container_repo, open_image_repo, open_object_store};
use recyclable_domain::model::Jurisdiction;
use recyclable_domain::service::{in_capture_order, CaptureRequest, CategoryShare};
use recyclable_infra::{import_directory, CapturePlanFile};
use recyclable_types::{Error, OutputFormat, Result};
use tracing::{debug, info};

use crate::cli::{Cli, Commands, ManifestCommand};
use crate::output::{output_allocation, output_classification, output_import_report};

pub fn execute(cli: Cli) -> Result<()> {
    let stored = Config::load()?;
    let mut config = stored.clone();
    if let Some(ref dir) = cli.store_dir {
        config.store_dir = Some(dir.clone());
    }
    let output_format = cli.format.unwrap_or(config.output_format);

    match &cli.command {
        Commands::Import { dir } => cmd_import(dir, &config, output_format),
        Commands::Manifest { kind } => cmd_manifest(kind, &config),
        Commands::Classify { barcode } => cmd_classify(barcode.as_deref(), &config, output_format),
        Commands::Allocate {
            total,
            categories,
            plan,
        } => cmd_allocate(*total, categories, plan.as_deref(), output_format),
        Commands::Capture {
            barcode,
            total,
            categories,
            plan,
            files,
        } => cmd_capture(barcode, *total, categories, plan.as_deref(), files, &config),
        Commands::Config {
            show,
            set_bucket,
            set_region,
            set_jurisdiction,
            set_output,
            reset,
        } => cmd_config(
            *show,
            set_bucket.clone(),
            set_region.clone(),
            *set_jurisdiction,
            *set_output,
            *reset,
            stored,
        ),
    }
}

fn progress_style() -> ProgressStyle {
    ProgressStyle::default_bar()
        .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}")
        .map(|style| style.progress_chars("#>-"))
        .unwrap_or_else(|_| ProgressStyle::default_bar())
}

fn cmd_import(dir: &Path, config: &Config, output_format: OutputFormat) -> Result<()> {
    if !dir.is_dir() {
        return Err(Error::Import(format!("Not a directory: {}", dir.display())));
    }

    let containers = open_container_repo(config)?;
    let images = open_image_repo(config)?;

    let pb = ProgressBar::new(0);
    pb.set_style(progress_style());
    pb.set_message("importing");

    let report = import_directory(dir, &containers, &images, |done, total| {
        pb.set_length(total as u64);
        pb.set_position(done as u64);
    })?;
    pb.finish_with_message("done");

    info!(
        containers = report.containers_created + report.containers_updated,
        images = report.images_created,
        "import finished"
    );
    output_import_report(output_format, &report)
}

fn cmd_manifest(command: &ManifestCommand, config: &Config) -> Result<()> {
    let containers = open_container_repo(config)?;
    let images = open_image_repo(config)?;
    let service = ManifestService::new(&containers, &images);

    let (kind, output) = match command {
        ManifestCommand::Deposit { output } => (ManifestKind::Deposit, output.as_deref()),
        ManifestCommand::Size { jurisdiction, output } => (
            ManifestKind::Size(jurisdiction.unwrap_or(config.size_jurisdiction)),
            output.as_deref(),
        ),
    };

    match output {
        Some(path) => {
            service.export(kind, path)?;
            eprintln!("Manifest written to {}", path.display());
        }
        None => println!("{}", service.render(kind)?),
    }
    Ok(())
}

fn cmd_classify(barcode: Option<&str>, config: &Config, output_format: OutputFormat) -> Result<()> {
    let containers = open_container_repo(config)?;
    let images = open_image_repo(config)?;
    let service = ManifestService::new(&containers, &images);

    let classified = service.classify(barcode)?;
    output_classification(output_format, &classified)
}

/// Build the allocation request from either a plan file or `--category` flags.
/// Flag categories are put into the standard capture order.
fn capture_request(total: Option<u32>, categories: &[CategoryShare], plan: Option<&Path>) -> Result<CaptureRequest> {
    if let Some(path) = plan {
        debug!(path = %path.display(), "loading capture plan");
        return CapturePlanFile::load_from_file(path)?.to_request(total);
    }
    Ok(CaptureRequest::new(in_capture_order(categories.to_vec()), total.unwrap_or(0))?)
}

fn cmd_allocate(
    total: Option<u32>,
    categories: &[CategoryShare],
    plan: Option<&Path>,
    output_format: OutputFormat,
) -> Result<()> {
    let request = capture_request(total, categories, plan)?;
    let counts = request.allocate();
    output_allocation(output_format, &request, &counts)
}

fn cmd_capture(
    barcode: &str,
    total: Option<u32>,
    categories: &[CategoryShare],
    plan: Option<&Path>,
    files: &[PathBuf],
    config: &Config,
) -> Result<()> {
    let request = capture_request(total, categories, plan)?;
    if files.len() > request.total() as usize {
        return Err(Error::Capture(format!(
            "{} files given but the plan only has {} positions",
            files.len(),
            request.total()
        )));
    }
    if let Some(missing) = files.iter().find(|f| !f.is_file()) {
        return Err(Error::Capture(format!("File not found: {}", missing.display())));
    }

    let containers = open_container_repo(config)?;
    let images = open_image_repo(config)?;
    let objects = open_object_store(config)?;
    let service = CaptureService::new(&containers, &images, &objects, config.storage.clone());
    let capture_plan = service
        .plan(barcode, &request)
        .map_err(|e| Error::Capture(e.to_string()))?;

    for (position, file) in (1..).zip(files) {
        let frame = fs::read(file)?;
        let image = service
            .record(&capture_plan, position, &frame, CaptureOptions::new())
            .map_err(|e| Error::Capture(e.to_string()))?;
        println!(
            "[{}/{}] {} -> #{} {}",
            position,
            capture_plan.total(),
            file.display(),
            image.image_sequence_number,
            image.url()
        );
    }

    if files.len() < capture_plan.total() as usize {
        println!(
            "\n{} of {} positions recorded",
            files.len(),
            capture_plan.total()
        );
    }
    Ok(())
}

fn cmd_config(
    show: bool,
    set_bucket: Option<String>,
    set_region: Option<String>,
    set_jurisdiction: Option<Jurisdiction>,
    set_output: Option<OutputFormat>,
    reset: bool,
    mut config: Config,
) -> Result<()> {
    if reset {
        config = Config::default();
        config.save()?;
        println!("Configuration reset to defaults.");
        println!("{}", config);
        return Ok(());
    }

    let mut modified = false;

    if let Some(bucket) = set_bucket {
        config.storage.bucket_name = bucket;
        modified = true;
    }

    if let Some(region) = set_region {
        config.storage.region_name = region;
        modified = true;
    }

    if let Some(jurisdiction) = set_jurisdiction {
        config.size_jurisdiction = jurisdiction;
        modified = true;
    }

    if let Some(format) = set_output {
        config.output_format = format;
        modified = true;
    }

    if modified {
        config.save()?;
        println!("Configuration updated.");
    }

    if show || !modified {
        println!("{}", config);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use recyclable_domain::model::{Container, MaterialType, PlasticCode};
    use recyclable_domain::repository::{ContainerRepository, ImageRepository};
    use recyclable_types::AllocationError;
    use tempfile::TempDir;

    #[test]
    fn test_capture_request_from_flags() {
        let shares = vec![CategoryShare::new("valid", 60.0), CategoryShare::new("no_label", 40.0)];
        let request = capture_request(Some(5), &shares, None).unwrap();
        let counts: Vec<u32> = request.allocate().iter().map(|c| c.count).collect();
        assert_eq!(counts, vec![3, 2]);
    }

    #[test]
    fn test_capture_request_uses_capture_order() {
        let shares = vec![
            CategoryShare::new("crushed_1", 50.0),
            CategoryShare::new("valid", 50.0),
        ];
        let request = capture_request(Some(3), &shares, None).unwrap();
        let counts: Vec<(String, u32)> = request.allocate().into_iter().map(|c| (c.name, c.count)).collect();
        assert_eq!(counts, vec![("valid".to_string(), 2), ("crushed_1".to_string(), 1)]);
    }

    #[test]
    fn test_capture_request_requires_total() {
        let shares = vec![CategoryShare::new("valid", 100.0)];
        assert!(matches!(
            capture_request(None, &shares, None),
            Err(Error::Allocation(AllocationError::NonPositiveTotal))
        ));
    }

    #[test]
    fn test_capture_request_from_plan_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("plan.toml");
        fs::write(
            &path,
            "total = 4\n\n[[categories]]\nname = \"valid\"\npercentage = 50.0\n\n[[categories]]\nname = \"crushed_1\"\npercentage = 50.0\n",
        )
        .unwrap();

        let request = capture_request(None, &[], Some(&path)).unwrap();
        assert_eq!(request.total(), 4);
        assert_eq!(capture_request(Some(10), &[], Some(&path)).unwrap().total(), 10);
    }

    #[test]
    fn test_capture_stores_file_bytes() {
        let dir = TempDir::new().unwrap();
        let config = Config {
            store_dir: Some(dir.path().join("store")),
            ..Config::default()
        };
        open_container_repo(&config)
            .unwrap()
            .save(&Container::new("0042", MaterialType::Aluminum, PlasticCode::Na))
            .unwrap();

        let first = dir.path().join("first.png");
        let second = dir.path().join("second.png");
        fs::write(&first, b"first frame").unwrap();
        fs::write(&second, b"second frame").unwrap();

        let shares = vec![CategoryShare::new("valid", 50.0), CategoryShare::new("crushed_2", 50.0)];
        cmd_capture("0042", Some(2), &shares, None, &[first, second], &config).unwrap();

        let images = open_image_repo(&config).unwrap().find_by_container("0042").unwrap();
        assert_eq!(images.len(), 2);
        let objects = dir.path().join("store").join("objects");
        assert_eq!(fs::read(objects.join(&images[0].location.object_key)).unwrap(), b"first frame");
        assert_eq!(fs::read(objects.join(&images[1].location.object_key)).unwrap(), b"second frame");
        assert_eq!(images[1].crush_degree, 2);
    }
}

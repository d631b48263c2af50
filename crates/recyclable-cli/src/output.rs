//! Output formatting module

use recyclable_app::app::ClassifiedImage;
use recyclable_domain::service::{CaptureRequest, CategoryCount};
use recyclable_infra::ImportReport;
use recyclable_types::{OutputFormat, Result};
use serde_json::json;

pub fn output_import_report(output_format: OutputFormat, report: &ImportReport) -> Result<()> {
    if output_format == OutputFormat::Json {
        println!("{}", serde_json::to_string_pretty(report)?);
    } else {
        println!("\nImport Result");
        println!("=============");
        println!(
            "Containers: {} created, {} updated, {} skipped",
            report.containers_created, report.containers_updated, report.containers_skipped
        );
        println!(
            "Images:     {} created, {} skipped",
            report.images_created, report.images_skipped
        );
    }
    Ok(())
}

pub fn output_allocation(
    output_format: OutputFormat,
    request: &CaptureRequest,
    counts: &[CategoryCount],
) -> Result<()> {
    if output_format == OutputFormat::Json {
        let value = json!({
            "total": request.total(),
            "categories": counts,
        });
        println!("{}", serde_json::to_string_pretty(&value)?);
        return Ok(());
    }

    println!("\nCapture Allocation ({} images)", request.total());
    println!("{:<20} {:>8} {:>8} {:>11}", "Category", "Percent", "Count", "Positions");
    println!("{}", "-".repeat(50));
    let mut start = 1;
    for (share, count) in request.shares().iter().zip(counts) {
        let positions = match count.count {
            0 => "-".to_string(),
            1 => start.to_string(),
            n => format!("{}-{}", start, start + n - 1),
        };
        println!(
            "{:<20} {:>7.2}% {:>8} {:>11}",
            count.name, share.percentage, count.count, positions
        );
        start += count.count;
    }
    Ok(())
}

pub fn output_classification(output_format: OutputFormat, images: &[ClassifiedImage]) -> Result<()> {
    if output_format == OutputFormat::Json {
        println!("{}", serde_json::to_string_pretty(images)?);
        return Ok(());
    }

    if images.is_empty() {
        println!("No images found.");
        return Ok(());
    }

    println!("{:<16} {:>4}  {:<30} URL", "Barcode", "Seq", "Class");
    println!("{}", "-".repeat(80));
    for image in images {
        println!(
            "{:<16} {:>4}  {:<30} {}",
            image.barcode.as_deref().unwrap_or("Unknown"),
            image.image_sequence_number,
            image.class.as_str(),
            image.url
        );
    }
    println!("\n{} images", images.len());
    Ok(())
}

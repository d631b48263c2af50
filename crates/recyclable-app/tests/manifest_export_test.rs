//! Manifest export over file-backed stores

use std::fs;

use recyclable_app::app::{write_atomic, ManifestKind, ManifestService};
use recyclable_app::repository::open_repos_at;
use recyclable_domain::model::{
    Container, DepositClass, Image, Jurisdiction, MaterialType, PlasticCode, StorageConfig, VisualVolume,
};
use recyclable_domain::repository::{ContainerRepository, ImageRepository};
use serde_json::Value;
use tempfile::TempDir;

fn seed(containers: &impl ContainerRepository, images: &impl ImageRepository) {
    let can = Container::new("can", MaterialType::Aluminum, PlasticCode::Na)
        .with_visual_volume(VisualVolume::Lt24Oz)
        .redeemable_in(Jurisdiction::Ca);
    let jug = Container::new("jug", MaterialType::Plastic, PlasticCode::Hdpe)
        .with_visual_volume(VisualVolume::Gt24Oz)
        .redeemable_in(Jurisdiction::Ca);
    containers.save(&can).unwrap();
    containers.save(&jug).unwrap();

    let storage = StorageConfig::default();
    let shots = [
        (Some("can"), "can-1", 0, true),
        (Some("can"), "can-2", 2, true),
        (Some("jug"), "jug-1", 1, true),
        (Some("jug"), "jug-2", 0, false),
        (None, "orphan", 0, true),
    ];
    for (barcode, tag, crush, valid) in shots {
        let location = storage.location(format!("images/{tag}.png"));
        images
            .save(&Image::new(barcode.map(String::from), tag, location, crush, valid))
            .unwrap();
    }
}

fn url(tag: &str) -> String {
    StorageConfig::default().location(format!("images/{tag}.png")).url()
}

#[test]
fn test_export_deposit_manifest() {
    let dir = TempDir::new().unwrap();
    let (containers, images) = open_repos_at(dir.path()).unwrap();
    seed(&containers, &images);

    let service = ManifestService::new(&containers, &images);
    let out = dir.path().join("out").join("deposit.json");
    service.export(ManifestKind::Deposit, &out).unwrap();

    let json: Value = serde_json::from_str(&fs::read_to_string(&out).unwrap()).unwrap();
    let obj = json.as_object().unwrap();
    assert_eq!(obj.len(), DepositClass::ALL.len());
    assert_eq!(json["alu"], serde_json::json!([url("can-1")]));
    assert_eq!(json["invalid_crushed_alu"], serde_json::json!([url("can-2")]));
    assert_eq!(json["pet"], serde_json::json!([url("jug-1")]));
    assert_eq!(json["invalid_bad_orientation"], serde_json::json!([url("jug-2")]));
    assert_eq!(json["not_classified"], serde_json::json!([url("orphan")]));
    assert_eq!(json["glass"], serde_json::json!([]));

    assert!(!dir.path().join("out").join("deposit.json.tmp").exists());
}

#[test]
fn test_export_size_manifest() {
    let dir = TempDir::new().unwrap();
    let (containers, images) = open_repos_at(dir.path()).unwrap();
    seed(&containers, &images);

    let service = ManifestService::new(&containers, &images);
    let out = dir.path().join("size.json");
    service.export(ManifestKind::Size(Jurisdiction::Ca), &out).unwrap();

    let json: Value = serde_json::from_str(&fs::read_to_string(&out).unwrap()).unwrap();
    assert_eq!(json["lt24oz"], serde_json::json!([url("can-1")]));
    assert_eq!(json["gte24oz"], serde_json::json!([url("jug-1")]));

    let empty = service.size_manifest(Jurisdiction::Vt).unwrap();
    assert_eq!(empty.total(), 0);
}

#[test]
fn test_classify_listing() {
    let dir = TempDir::new().unwrap();
    let (containers, images) = open_repos_at(dir.path()).unwrap();
    seed(&containers, &images);

    let service = ManifestService::new(&containers, &images);
    let all = service.classify(None).unwrap();
    assert_eq!(all.len(), 5);

    let jug = service.classify(Some("jug")).unwrap();
    let classes: Vec<DepositClass> = jug.iter().map(|c| c.class).collect();
    assert_eq!(classes, vec![DepositClass::Pet, DepositClass::InvalidBadOrientation]);
    assert_eq!(jug[1].image_sequence_number, 2);
}

#[test]
fn test_write_atomic_replaces_existing_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("manifest.json");
    fs::write(&path, "old").unwrap();

    write_atomic(&path, b"{}").unwrap();
    assert_eq!(fs::read_to_string(&path).unwrap(), "{}");
    assert!(!dir.path().join("manifest.json.tmp").exists());
}

#[test]
fn test_failed_write_leaves_target_untouched() {
    let dir = TempDir::new().unwrap();
    let target = dir.path().join("blocked");
    fs::create_dir(&target).unwrap();
    fs::write(target.join("keep"), "x").unwrap();

    // renaming a file over a non-empty directory fails
    assert!(write_atomic(&target, b"{}").is_err());
    assert!(target.join("keep").exists());
    assert!(!dir.path().join("blocked.tmp").exists());
}

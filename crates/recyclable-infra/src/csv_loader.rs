//! CSV bulk import of containers and images
//!
//! Reads `container.csv` and then `image.csv` from one directory. Both files
//! carry a header row; cells are trimmed and invalid UTF-8 is replaced rather
//! than rejected. Bad rows are logged and skipped, never fatal.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use chrono::NaiveDateTime;
use recyclable_domain::model::{
    Container, Image, Jurisdiction, LiquidVolumeUnit, MaterialType, PlasticCode, StorageLocation, VisualVolume,
    DATABASE_VERSION, UNMEASURED,
};
use recyclable_domain::repository::{ContainerRepository, ImageRepository};
use recyclable_types::Error;
use serde::Serialize;
use tracing::{error, info, warn};

pub const CONTAINER_FILE: &str = "container.csv";
pub const IMAGE_FILE: &str = "image.csv";

#[derive(thiserror::Error, Debug)]
pub enum CsvLoaderError {
    #[error("Failed to read file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("Missing value in column {0}")]
    MissingValue(&'static str),

    #[error("Container not found: {0}")]
    ContainerNotFound(String),

    #[error(transparent)]
    Domain(#[from] Error),
}

impl From<CsvLoaderError> for Error {
    fn from(err: CsvLoaderError) -> Self {
        match err {
            CsvLoaderError::Domain(e) => e,
            other => Error::Import(other.to_string()),
        }
    }
}

/// Outcome of one import run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ImportReport {
    pub containers_created: usize,
    pub containers_updated: usize,
    pub containers_skipped: usize,
    pub images_created: usize,
    pub images_skipped: usize,
}

/// Header-keyed view of one CSV record
struct Row<'a> {
    index: &'a HashMap<String, usize>,
    record: &'a csv::StringRecord,
}

impl<'a> Row<'a> {
    fn get(&self, column: &str) -> &'a str {
        self.index
            .get(column)
            .and_then(|&i| self.record.get(i))
            .unwrap_or("")
    }

    fn required(&self, column: &'static str) -> Result<&'a str, CsvLoaderError> {
        match self.get(column) {
            "" => Err(CsvLoaderError::MissingValue(column)),
            value => Ok(value),
        }
    }
}

/// Import `container.csv` and `image.csv` from `dir`.
///
/// `progress` is called once per processed row with (rows done, rows total).
pub fn import_directory<C, I, F>(
    dir: &Path,
    containers: &C,
    images: &I,
    mut progress: F,
) -> Result<ImportReport, CsvLoaderError>
where
    C: ContainerRepository + ?Sized,
    I: ImageRepository + ?Sized,
    F: FnMut(usize, usize),
{
    let container_rows = read_rows(&dir.join(CONTAINER_FILE))?;
    let image_rows = read_rows(&dir.join(IMAGE_FILE))?;
    let total = container_rows.1.len() + image_rows.1.len();
    let mut done = 0;
    let mut report = ImportReport::default();

    info!(num_containers = container_rows.1.len(), "reading and saving containers");
    for (line, record) in container_rows.1.iter().enumerate() {
        let row = Row {
            index: &container_rows.0,
            record,
        };
        match parse_container(&row) {
            Ok(container) => {
                if containers.save(&container)? {
                    info!(barcode = %container.barcode, "created container");
                    report.containers_created += 1;
                } else {
                    info!(barcode = %container.barcode, "updated container");
                    report.containers_updated += 1;
                }
            }
            Err(e) => {
                warn!(row = line + 2, file = CONTAINER_FILE, "skipping container: {}", e);
                report.containers_skipped += 1;
            }
        }
        done += 1;
        progress(done, total);
    }

    info!(num_images = image_rows.1.len(), "reading and saving images");
    for (line, record) in image_rows.1.iter().enumerate() {
        let row = Row {
            index: &image_rows.0,
            record,
        };
        let result = parse_image(&row, containers).and_then(|image| {
            images.save(&image)?;
            Ok(image)
        });
        match result {
            Ok(image) => {
                info!(aws_entity_tag = %image.aws_entity_tag, "created image");
                report.images_created += 1;
            }
            Err(CsvLoaderError::Domain(e)) => {
                error!(row = line + 2, file = IMAGE_FILE, "error creating image: {}", e);
                report.images_skipped += 1;
            }
            Err(e) => {
                warn!(row = line + 2, file = IMAGE_FILE, "skipping image: {}", e);
                report.images_skipped += 1;
            }
        }
        done += 1;
        progress(done, total);
    }

    Ok(report)
}

type Rows = (HashMap<String, usize>, Vec<csv::StringRecord>);

fn read_rows(path: &Path) -> Result<Rows, CsvLoaderError> {
    let bytes = fs::read(path).map_err(|source| CsvLoaderError::Io {
        path: path.display().to_string(),
        source,
    })?;
    let decoded = String::from_utf8_lossy(&bytes);

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(decoded.as_bytes());

    let index = reader
        .headers()?
        .iter()
        .enumerate()
        .map(|(i, h)| (h.trim_start_matches('\u{feff}').to_string(), i))
        .collect();
    let records = reader.records().collect::<Result<Vec<_>, _>>()?;
    Ok((index, records))
}

fn parse_container(row: &Row<'_>) -> Result<Container, CsvLoaderError> {
    let barcode = row.required("barcode")?;

    let mut container = Container::new(
        barcode,
        choice_or(row.get("material_type"), MaterialType::Unknown)?,
        choice_or(row.get("plastic_code"), PlasticCode::Na)?,
    )
    .with_product(row.get("brand"), row.get("product_name"))
    .with_liquid_volume(
        float_or_default(row.get("liquid_volume"), UNMEASURED),
        choice_or(row.get("liquid_volume_unit"), LiquidVolumeUnit::Na)?,
    )
    .with_visual_volume(choice_or(row.get("visual_volume"), VisualVolume::Na)?);

    container.mass_gram = float_or_default(row.get("mass_gram"), UNMEASURED);
    container.rigidity = choice_or(row.get("rigidity"), container.rigidity)?;
    container.shape = choice_or(row.get("shape"), container.shape)?;
    container.content_type = choice_or(row.get("content_type"), container.content_type)?;
    container.hazardous = choice_or(row.get("hazardous"), container.hazardous)?;
    container.beverage_type = choice_or(row.get("beverage_type"), container.beverage_type)?;
    container.alcohol_percentage = float_or_default(row.get("alcohol_percentage"), UNMEASURED);
    container.alcoholic = choice_or(row.get("alcoholic"), container.alcoholic)?;
    container.alcoholic_drinks_type = choice_or(row.get("alcoholic_drinks_type"), container.alcoholic_drinks_type)?;
    container.wine_bottle_shape = choice_or(row.get("wine_bottle_shape"), container.wine_bottle_shape)?;
    container.wine_type = choice_or(row.get("wine_type"), container.wine_type)?;
    container.juice_percentage = float_or_default(row.get("juice_percentage"), UNMEASURED);
    container.material_color = choice_or(row.get("material_color"), container.material_color)?;
    container.ribbed = choice_or(row.get("ribbed"), container.ribbed)?;
    container.ringed = choice_or(row.get("ringed"), container.ringed)?;
    let made_in = row.get("made_in");
    if !made_in.is_empty() {
        container.made_in = made_in.to_uppercase();
    }
    for &jurisdiction in Jurisdiction::ALL {
        if str_to_bool(row.get(&jurisdiction.as_str().to_uppercase())) {
            container.redeemable_in.insert(jurisdiction);
        }
    }

    container.validate()?;
    Ok(container)
}

fn parse_image<C>(row: &Row<'_>, containers: &C) -> Result<Image, CsvLoaderError>
where
    C: ContainerRepository + ?Sized,
{
    let barcode = row.required("barcode")?;
    let aws_entity_tag = row.required("aws_entity_tag")?;
    if containers.find_by_barcode(barcode)?.is_none() {
        return Err(CsvLoaderError::ContainerNotFound(barcode.to_string()));
    }

    let location = match (
        row.get("s3_bucket_name"),
        row.get("aws_region_name"),
        row.get("s3_object_key"),
    ) {
        ("", "", "") => StorageLocation::from_object_url(row.required("aws_object_url")?)?,
        (bucket_name, region_name, object_key) => {
            if object_key.is_empty() {
                return Err(CsvLoaderError::MissingValue("s3_object_key"));
            }
            StorageLocation {
                bucket_name: bucket_name.to_string(),
                region_name: region_name.to_string(),
                object_key: object_key.to_string(),
            }
        }
    };

    let mut image = Image::new(
        Some(barcode.to_string()),
        aws_entity_tag,
        location,
        int_or_default(row.get("crush_degree"), 0),
        str_to_bool(row.get("valid_orientation")),
    );
    image.image_id = row.get("image_id").to_string();
    image.lid_cap = choice_or(row.get("lid_cap"), image.lid_cap)?;
    image.label = choice_or(row.get("label"), image.label)?;
    image.orientation_style = choice_or(row.get("orientation_style"), image.orientation_style)?;
    image.image_quality = choice_or(row.get("image_quality"), image.image_quality)?;
    image.container_in_frame = row.get("container_in_frame").parse().ok();
    image.image_width = float_or_default(row.get("image_width"), -1.0);
    image.image_height = float_or_default(row.get("image_height"), -1.0);
    image.hands_in_image = choice_or(row.get("hands_in_image"), image.hands_in_image)?;
    image.count = choice_or(row.get("count"), image.count)?;
    image.deposit_id = row.get("deposit_id").to_string();
    image.timestamp = parse_timestamp(row.get("timestamp"));
    for (column, field) in [
        ("imager_version", &mut image.imager_version),
        ("company_name", &mut image.company_name),
        ("store_name", &mut image.store_name),
        ("cube_sn", &mut image.cube_sn),
    ] {
        text_or_keep(row.get(column), field);
    }
    image.database_version = row.get("database_version").parse().unwrap_or(DATABASE_VERSION);
    Ok(image)
}

/// Empty cells take `default`; anything else must be a known wire string
fn choice_or<T>(value: &str, default: T) -> Result<T, CsvLoaderError>
where
    T: std::str::FromStr<Err = Error>,
{
    if value.is_empty() {
        Ok(default)
    } else {
        Ok(value.parse()?)
    }
}

/// Non-empty cells replace `field`; empty cells keep its default
fn text_or_keep(value: &str, field: &mut String) {
    if !value.is_empty() {
        *field = value.to_string();
    }
}

fn str_to_bool(value: &str) -> bool {
    matches!(value.trim().to_lowercase().as_str(), "true" | "t" | "yes" | "1")
}

fn int_or_default(value: &str, default: i32) -> i32 {
    value.trim().parse().unwrap_or(default)
}

fn float_or_default(value: &str, default: f64) -> f64 {
    value.trim().parse().unwrap_or(default)
}

fn parse_timestamp(value: &str) -> Option<NaiveDateTime> {
    const FORMATS: [&str; 3] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%d-%H-%M-%S"];
    let value = value.trim();
    if value.is_empty() {
        return None;
    }
    FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(value, fmt).ok())
}

#[cfg(test)]
mod tests {
    use super::*;
    use recyclable_domain::model::{
        AlcoholicDrinksType, Answer, BeverageType, Contents, MaterialColor, Ribbed, Ringed, Rigidity, Shape,
        WineBottleShape, WineType,
    };

    fn row_of(headers: &[&str], values: &[&str]) -> (HashMap<String, usize>, csv::StringRecord) {
        let index = headers.iter().enumerate().map(|(i, h)| (h.to_string(), i)).collect();
        (index, csv::StringRecord::from(values.to_vec()))
    }

    #[test]
    fn test_str_to_bool() {
        for value in ["true", "True", "T", "yes", "1", " YES "] {
            assert!(str_to_bool(value), "{value}");
        }
        for value in ["", "false", "0", "no", "y"] {
            assert!(!str_to_bool(value), "{value}");
        }
    }

    #[test]
    fn test_numeric_fallbacks() {
        assert_eq!(int_or_default("3", 0), 3);
        assert_eq!(int_or_default("three", 0), 0);
        assert!((float_or_default("1.25", -1.0) - 1.25).abs() < f64::EPSILON);
        assert!((float_or_default("", -1.0) + 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_parse_container_row() {
        let (index, record) = row_of(
            &["barcode", "brand", "product_name", "material_type", "plastic_code", "liquid_volume", "liquid_volume_unit", "CA", "OR", "made_in"],
            &["00345323", "TRADERJOES", "LEMON MINERAL WATER", "plastic", "1_pet", "1.25", "LITER", "TRUE", "1", ""],
        );
        let container = parse_container(&Row { index: &index, record: &record }).unwrap();
        assert_eq!(container.material_type, MaterialType::Plastic);
        assert_eq!(container.plastic_code, PlasticCode::Pet);
        assert!((container.liquid_volume - 1.25).abs() < f64::EPSILON);
        assert_eq!(container.made_in, "UNK");
        assert!(container.is_redeemable_in(Jurisdiction::Ca));
        assert!(container.is_redeemable_in(Jurisdiction::Or));
        assert!(!container.is_redeemable_in(Jurisdiction::Ny));
        assert!((container.mass_gram - UNMEASURED).abs() < f64::EPSILON);
    }

    #[test]
    fn test_parse_container_descriptive_columns() {
        let (index, record) = row_of(
            &[
                "barcode", "material_type", "plastic_code", "rigidity", "shape", "content_type", "hazardous",
                "beverage_type", "alcohol_percentage", "alcoholic", "alcoholic_drinks_type", "wine_bottle_shape",
                "wine_type", "juice_percentage", "material_color", "ribbed", "ringed",
            ],
            &[
                "750", "glass", "NA", "rigid", "bottle", "beverage", "no", "alcoholic_beverage", "13.5", "yes",
                "wine", "bordeaux", "rosé", "", "emerald_green", "NA", "single_ring",
            ],
        );
        let c = parse_container(&Row { index: &index, record: &record }).unwrap();
        assert_eq!(c.shape, Shape::Bottle);
        assert_eq!(c.content_type, Contents::Beverage);
        assert_eq!(c.hazardous, Answer::No);
        assert_eq!(c.beverage_type, BeverageType::AlcoholicBeverage);
        assert!((c.alcohol_percentage - 13.5).abs() < f64::EPSILON);
        assert_eq!(c.alcoholic, Answer::Yes);
        assert_eq!(c.alcoholic_drinks_type, AlcoholicDrinksType::Wine);
        assert_eq!(c.wine_bottle_shape, WineBottleShape::Bordeaux);
        assert_eq!(c.wine_type, WineType::Rose);
        assert!((c.juice_percentage - UNMEASURED).abs() < f64::EPSILON);
        assert_eq!(c.material_color, MaterialColor::EmeraldGreen);
        assert_eq!(c.ringed, Ringed::SingleRing);
    }

    #[test]
    fn test_missing_descriptive_columns_take_defaults() {
        let (index, record) = row_of(&["barcode", "material_type", "plastic_code"], &["1", "alu", "NA"]);
        let c = parse_container(&Row { index: &index, record: &record }).unwrap();
        assert_eq!(c.rigidity, Rigidity::Rigid);
        assert_eq!(c.alcoholic, Answer::No);
        assert_eq!(c.hazardous, Answer::Unknown);
        assert_eq!(c.ribbed, Ribbed::Na);
    }

    #[test]
    fn test_parse_container_rejects_unknown_unit() {
        let (index, record) = row_of(
            &["barcode", "material_type", "plastic_code", "liquid_volume", "liquid_volume_unit"],
            &["1", "glass", "NA", "12", "pint"],
        );
        let err = parse_container(&Row { index: &index, record: &record }).unwrap_err();
        assert!(matches!(err, CsvLoaderError::Domain(Error::UnknownVolumeUnit(_))));
    }

    #[test]
    fn test_parse_container_rejects_plastic_na() {
        let (index, record) = row_of(&["barcode", "material_type", "plastic_code"], &["1", "plastic", "NA"]);
        let err = parse_container(&Row { index: &index, record: &record }).unwrap_err();
        assert!(matches!(err, CsvLoaderError::Domain(Error::InvalidContainer(_))));
    }

    #[test]
    fn test_parse_timestamp_formats() {
        assert!(parse_timestamp("2023-05-12T15:13:04.123456").is_some());
        assert!(parse_timestamp("2023-05-12 15:13:04").is_some());
        assert!(parse_timestamp("2023-05-12-15-13-04").is_some());
        assert!(parse_timestamp("yesterday").is_none());
        assert!(parse_timestamp("").is_none());
    }
}

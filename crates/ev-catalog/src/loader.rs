//! CSV catalog loader.
//!
//! # CSV format
//!
//! One row per area.  Column names vary between source tables, so every
//! header is normalized (trim, lowercase, spaces and hyphens → `_`) and then
//! matched against an alias list:
//!
//! | Field                 | Accepted headers                                           |
//! |-----------------------|------------------------------------------------------------|
//! | name *(required)*     | `name` `area` `areas` `area_name` `region` `ward_name` `neighbourhood` `neighborhood` |
//! | latitude *(required)* | `latitude` `lat` `y`                                       |
//! | longitude *(required)*| `longitude` `lon` `lng` `x`                                |
//! | flood risk *(required)*| `flood_risk_level` `flood_risk` `risk_level` `risk`       |
//! | ward                  | `ward` `ward_code`                                         |
//! | evacuation priority   | `evacuation_priority` `priority`                           |
//! | population density    | `population_density` `density`                             |
//! | shelter type          | `shelter_type`                                             |
//! | shelter capacity      | `shelter_capacity`                                         |
//!
//! ```csv
//! Ward,Area_Name,Latitude,Longitude,Flood_Risk,Evacuation_Priority,Population_Density
//! A,colaba,18.9151,72.8141,Critical,Immediate,50000
//! C,churchgate,18.9346,72.8284,Medium,Standard,30000
//! ```
//!
//! Empty optional cells are treated as absent.  A missing required column,
//! an unparsable cell, or a validation failure aborts the load.

use std::io::Read;
use std::path::Path;

use csv::{ReaderBuilder, StringRecord, Trim};

use ev_core::{AreaRecord, EvacuationPriority, FloodRisk, GeoPoint};

use crate::{AreaCatalog, CatalogError, CatalogResult};

// ── Column aliasing ───────────────────────────────────────────────────────────

#[derive(Copy, Clone, PartialEq, Eq, Debug)]
enum Field {
    Name,
    Latitude,
    Longitude,
    FloodRisk,
    Ward,
    Priority,
    Density,
    ShelterType,
    ShelterCapacity,
}

const REQUIRED: [(Field, &str); 4] = [
    (Field::Name,      "name"),
    (Field::Latitude,  "latitude"),
    (Field::Longitude, "longitude"),
    (Field::FloodRisk, "flood_risk"),
];

fn normalize_header(h: &str) -> String {
    h.trim().to_lowercase().replace([' ', '-'], "_")
}

fn field_for(header: &str) -> Option<Field> {
    match header {
        "name" | "area" | "areas" | "area_name" | "region" | "ward_name"
        | "neighbourhood" | "neighborhood"                  => Some(Field::Name),
        "latitude" | "lat" | "y"                            => Some(Field::Latitude),
        "longitude" | "lon" | "lng" | "x"                   => Some(Field::Longitude),
        "flood_risk_level" | "flood_risk" | "risk_level"
        | "risk"                                            => Some(Field::FloodRisk),
        "ward" | "ward_code"                                => Some(Field::Ward),
        "evacuation_priority" | "priority"                  => Some(Field::Priority),
        "population_density" | "density"                    => Some(Field::Density),
        "shelter_type"                                      => Some(Field::ShelterType),
        "shelter_capacity"                                  => Some(Field::ShelterCapacity),
        _                                                   => None,
    }
}

/// Column position of every recognised field.  The first header that maps
/// to a field wins; later aliases of the same field are ignored.
#[derive(Default)]
struct ColumnMap {
    cols: [Option<usize>; 9],
}

impl ColumnMap {
    fn from_headers(headers: &StringRecord) -> CatalogResult<Self> {
        let mut map = ColumnMap::default();
        for (i, h) in headers.iter().enumerate() {
            if let Some(field) = field_for(&normalize_header(h)) {
                map.cols[field as usize].get_or_insert(i);
            }
        }

        let missing: Vec<&'static str> = REQUIRED
            .iter()
            .filter(|(f, _)| map.cols[*f as usize].is_none())
            .map(|(_, label)| *label)
            .collect();
        if !missing.is_empty() {
            return Err(CatalogError::MissingColumns {
                missing,
                found: headers.iter().map(normalize_header).collect(),
            });
        }
        Ok(map)
    }

    /// Trimmed cell for `field`, `None` if the column is absent or the cell
    /// is empty.
    fn get<'r>(&self, record: &'r StringRecord, field: Field) -> Option<&'r str> {
        self.cols[field as usize]
            .and_then(|i| record.get(i))
            .map(str::trim)
            .filter(|s| !s.is_empty())
    }
}

// ── Public API ────────────────────────────────────────────────────────────────

/// Load and validate an [`AreaCatalog`] from a CSV file.
pub fn load_catalog_csv(path: &Path) -> CatalogResult<AreaCatalog> {
    let file = std::fs::File::open(path)?;
    log::info!("Reading area catalog from {}", path.display());
    load_catalog_reader(file)
}

/// Like [`load_catalog_csv`] but accepts any `Read` source.
///
/// Useful for testing (pass a byte slice) and for the embedded table.
pub fn load_catalog_reader<R: Read>(reader: R) -> CatalogResult<AreaCatalog> {
    let mut csv_reader = ReaderBuilder::new().trim(Trim::All).from_reader(reader);
    let columns = ColumnMap::from_headers(csv_reader.headers()?)?;

    let mut records = Vec::new();
    for (i, result) in csv_reader.records().enumerate() {
        let row = result?;
        // Row numbers are 1-based and exclude the header line.
        records.push(parse_row(&columns, &row, i + 1)?);
    }

    AreaCatalog::new(records)
}

// ── Helpers ───────────────────────────────────────────────────────────────────

fn parse_row(columns: &ColumnMap, row: &StringRecord, n: usize) -> CatalogResult<AreaRecord> {
    let err = |message: String| CatalogError::Row { row: n, message };

    let name = columns.get(row, Field::Name).ok_or_else(|| err("empty area name".into()))?;
    let lat = parse_number::<f64>(columns.get(row, Field::Latitude), "latitude").map_err(err)?;
    let lon = parse_number::<f64>(columns.get(row, Field::Longitude), "longitude").map_err(err)?;
    let risk: FloodRisk = columns
        .get(row, Field::FloodRisk)
        .ok_or_else(|| err("empty flood risk".into()))?
        .parse()
        .map_err(|e| err(format!("{e}")))?;

    let mut record = AreaRecord::new(
        name,
        columns.get(row, Field::Ward).unwrap_or(""),
        GeoPoint::new(lat, lon),
        risk,
    );

    if let Some(p) = columns.get(row, Field::Priority) {
        let priority: EvacuationPriority = p.parse().map_err(|e| err(format!("{e}")))?;
        record.evacuation_priority = Some(priority);
    }
    if let Some(d) = columns.get(row, Field::Density) {
        record.population_density = Some(parse_count(d, "population density").map_err(err)?);
    }
    record.shelter_type = columns.get(row, Field::ShelterType).map(str::to_owned);
    if let Some(c) = columns.get(row, Field::ShelterCapacity) {
        record.shelter_capacity = Some(parse_count(c, "shelter capacity").map_err(err)?);
    }

    Ok(record)
}

fn parse_number<T: std::str::FromStr>(cell: Option<&str>, what: &str) -> Result<T, String> {
    let cell = cell.ok_or_else(|| format!("empty {what}"))?;
    cell.parse::<T>().map_err(|_| format!("invalid {what} {cell:?}"))
}

/// Non-negative integer counts; tolerates a trailing `.0` from spreadsheet
/// exports.
fn parse_count(cell: &str, what: &str) -> Result<u32, String> {
    let digits = cell.strip_suffix(".0").unwrap_or(cell);
    digits
        .parse::<u32>()
        .map_err(|_| format!("invalid {what} {cell:?}"))
}

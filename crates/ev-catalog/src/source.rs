//! Where the catalog comes from, chosen once at startup.

use std::path::PathBuf;

use crate::{AreaCatalog, CatalogResult, load_catalog_csv, load_catalog_reader};

/// The built-in table of 102 Mumbai localities with ward, risk, priority and
/// density columns.
const MUMBAI_AREAS_CSV: &str = include_str!("../data/mumbai_areas.csv");

/// An explicit catalog source.  Failing to load the selected source is an
/// error; there is no fallback to another source.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum CatalogSource {
    /// The table compiled into this crate.
    #[default]
    Embedded,
    /// A CSV file on disk (see [`crate::loader`] for the accepted headers).
    Csv(PathBuf),
}

impl CatalogSource {
    pub fn load(&self) -> CatalogResult<AreaCatalog> {
        match self {
            CatalogSource::Embedded => {
                log::info!("Using embedded Mumbai area catalog");
                load_catalog_reader(MUMBAI_AREAS_CSV.as_bytes())
            }
            CatalogSource::Csv(path) => load_catalog_csv(path),
        }
    }
}

impl AreaCatalog {
    /// Shorthand for `CatalogSource::Embedded.load()`.
    pub fn mumbai() -> CatalogResult<Self> {
        CatalogSource::Embedded.load()
    }
}

//! Validated, read-only area catalog.

use std::collections::HashMap;
use std::ops::Index;

use ev_core::{AreaId, AreaRecord, BoundingBox, FloodRisk, normalize_name};

use crate::{CatalogError, CatalogResult};

/// The area table, indexed by [`AreaId`] (row order) and by normalized name.
///
/// Construction validates every record; after that the catalog is never
/// mutated, so one instance can be shared by reference across queries.
#[derive(Debug, Clone)]
pub struct AreaCatalog {
    records: Vec<AreaRecord>,
    by_name: HashMap<String, AreaId>,
}

impl AreaCatalog {
    /// Validate `records` against the Mumbai sanity bounds and build the
    /// name index.
    pub fn new(records: Vec<AreaRecord>) -> CatalogResult<Self> {
        Self::with_bounds(records, BoundingBox::MUMBAI)
    }

    /// Like [`new`](Self::new) with a caller-chosen sanity box.
    ///
    /// # Errors
    ///
    /// - [`CatalogError::Empty`] for an empty table.
    /// - [`CatalogError::DuplicateName`] when two records normalize to the
    ///   same name.
    /// - [`CatalogError::InvalidCoordinates`] for non-finite or out-of-range
    ///   coordinates.
    ///
    /// Records that are valid but fall outside `bounds` are kept and logged.
    pub fn with_bounds(mut records: Vec<AreaRecord>, bounds: BoundingBox) -> CatalogResult<Self> {
        if records.is_empty() {
            return Err(CatalogError::Empty);
        }

        let mut by_name = HashMap::with_capacity(records.len());
        let mut out_of_bounds = 0usize;

        for (i, rec) in records.iter_mut().enumerate() {
            rec.name = normalize_name(&rec.name);
            if rec.name.is_empty() {
                return Err(CatalogError::Row { row: i + 1, message: "empty area name".into() });
            }
            if !rec.pos.is_valid() {
                return Err(CatalogError::InvalidCoordinates {
                    name: rec.name.clone(),
                    lat:  rec.pos.lat,
                    lon:  rec.pos.lon,
                });
            }
            if !bounds.contains(rec.pos) {
                log::warn!("area {:?} at {} lies outside the expected region", rec.name, rec.pos);
                out_of_bounds += 1;
            }
            let id = AreaId(i as u32);
            if by_name.insert(rec.name.clone(), id).is_some() {
                return Err(CatalogError::DuplicateName(rec.name.clone()));
            }
        }

        log::info!(
            "Loaded area catalog: {} areas ({} outside expected bounds)",
            records.len(),
            out_of_bounds
        );

        Ok(Self { records, by_name })
    }

    // ── Dimensions ────────────────────────────────────────────────────────

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    // ── Lookup ────────────────────────────────────────────────────────────

    pub fn get(&self, id: AreaId) -> Option<&AreaRecord> {
        self.records.get(id.index())
    }

    /// Exact lookup by name; the argument is normalized first.
    pub fn by_name(&self, name: &str) -> Option<AreaId> {
        self.by_name.get(&normalize_name(name)).copied()
    }

    /// All records in catalog order with their ids.
    pub fn iter(&self) -> impl Iterator<Item = (AreaId, &AreaRecord)> + '_ {
        self.records
            .iter()
            .enumerate()
            .map(|(i, r)| (AreaId(i as u32), r))
    }

    pub fn records(&self) -> &[AreaRecord] {
        &self.records
    }

    /// Normalized names in catalog order.
    pub fn names(&self) -> impl Iterator<Item = &str> + '_ {
        self.records.iter().map(|r| r.name.as_str())
    }

    // ── Risk queries ──────────────────────────────────────────────────────

    /// Areas classified exactly as `level`.
    pub fn by_risk(&self, level: FloodRisk) -> impl Iterator<Item = (AreaId, &AreaRecord)> + '_ {
        self.iter().filter(move |(_, r)| r.flood_risk == level)
    }

    /// Areas whose risk is at or below `ceiling`.
    pub fn safe_areas(&self, ceiling: FloodRisk) -> impl Iterator<Item = (AreaId, &AreaRecord)> + '_ {
        self.iter().filter(move |(_, r)| r.flood_risk <= ceiling)
    }

    /// Number of areas per risk class, indexed in `FloodRisk::ALL` order.
    pub fn risk_counts(&self) -> [usize; 5] {
        let mut counts = [0usize; 5];
        for r in &self.records {
            counts[r.flood_risk as usize] += 1;
        }
        counts
    }
}

impl Index<AreaId> for AreaCatalog {
    type Output = AreaRecord;

    fn index(&self, id: AreaId) -> &AreaRecord {
        &self.records[id.index()]
    }
}

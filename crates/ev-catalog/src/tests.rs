//! Unit tests for ev-catalog.
//!
//! Fixtures are inline CSV strings; only the embedded-table tests touch the
//! bundled data file.

#[cfg(test)]
mod loader {
    use ev_core::{EvacuationPriority, FloodRisk};

    use crate::{CatalogError, load_catalog_reader};

    #[test]
    fn canonical_headers() {
        let csv = "\
Ward,Area_Name,Latitude,Longitude,Flood_Risk,Evacuation_Priority,Population_Density
A,Colaba,18.9151,72.8141,Critical,Immediate,50000
C,churchgate,18.9346,72.8284,Medium,Standard,30000
";
        let cat = load_catalog_reader(csv.as_bytes()).unwrap();
        assert_eq!(cat.len(), 2);

        let colaba = cat.by_name("colaba").unwrap();
        assert_eq!(cat[colaba].name, "colaba");
        assert_eq!(cat[colaba].ward, "A");
        assert_eq!(cat[colaba].flood_risk, FloodRisk::Severe);
        assert_eq!(cat[colaba].evacuation_priority, Some(EvacuationPriority::Immediate));
        assert_eq!(cat[colaba].population_density, Some(50_000));

        let churchgate = cat.by_name("Churchgate").unwrap();
        assert_eq!(cat[churchgate].flood_risk, FloodRisk::Moderate);
    }

    #[test]
    fn header_aliases() {
        // Short-form headers with odd spacing and a hyphenated risk column.
        let csv = "\
 Region , lat , LNG , Flood-risk level , ward_code
Fort,18.9354,72.8354,moderate,A
";
        let cat = load_catalog_reader(csv.as_bytes()).unwrap();
        let fort = cat.by_name("fort").unwrap();
        assert_eq!(cat[fort].pos.lat, 18.9354);
        assert_eq!(cat[fort].pos.lon, 72.8354);
        assert_eq!(cat[fort].flood_risk, FloodRisk::Moderate);
        assert_eq!(cat[fort].ward, "A");
        assert!(cat[fort].evacuation_priority.is_none());
    }

    #[test]
    fn xy_headers() {
        let csv = "name,y,x,risk\nWorli,19.0176,72.8199,high\n";
        let cat = load_catalog_reader(csv.as_bytes()).unwrap();
        let worli = cat.by_name("worli").unwrap();
        assert_eq!(cat[worli].pos.lat, 19.0176);
        assert_eq!(cat[worli].pos.lon, 72.8199);
    }

    #[test]
    fn shelter_columns() {
        let csv = "\
area,latitude,longitude,risk_level,shelter_type,shelter_capacity
Powai,19.1176,72.9060,low,School,1200.0
";
        let cat = load_catalog_reader(csv.as_bytes()).unwrap();
        let powai = &cat.records()[0];
        assert_eq!(powai.shelter_type.as_deref(), Some("School"));
        assert_eq!(powai.shelter_capacity, Some(1_200));
    }

    #[test]
    fn missing_required_column() {
        let csv = "area,latitude,longitude\nColaba,18.9151,72.8141\n";
        match load_catalog_reader(csv.as_bytes()) {
            Err(CatalogError::MissingColumns { missing, found }) => {
                assert_eq!(missing, vec!["flood_risk"]);
                assert_eq!(found, vec!["area", "latitude", "longitude"]);
            }
            other => panic!("expected MissingColumns, got {other:?}"),
        }
    }

    #[test]
    fn bad_cell_reports_row() {
        let csv = "area,lat,lon,risk\nColaba,18.9151,72.8141,high\nFort,north,72.8354,low\n";
        match load_catalog_reader(csv.as_bytes()) {
            Err(CatalogError::Row { row, message }) => {
                assert_eq!(row, 2);
                assert!(message.contains("latitude"), "{message}");
            }
            other => panic!("expected Row error, got {other:?}"),
        }
    }

    #[test]
    fn unknown_risk_is_error() {
        let csv = "area,lat,lon,risk\nColaba,18.9151,72.8141,soggy\n";
        assert!(matches!(
            load_catalog_reader(csv.as_bytes()),
            Err(CatalogError::Row { row: 1, .. })
        ));
    }

    #[test]
    fn header_only_is_empty_error() {
        let csv = "area,lat,lon,risk\n";
        assert!(matches!(load_catalog_reader(csv.as_bytes()), Err(CatalogError::Empty)));
    }
}

#[cfg(test)]
mod catalog {
    use ev_core::{AreaId, AreaRecord, BoundingBox, FloodRisk, GeoPoint};

    use crate::{AreaCatalog, CatalogError};

    fn rec(name: &str, risk: FloodRisk) -> AreaRecord {
        AreaRecord::new(name, "X", GeoPoint::new(19.0, 72.85), risk)
    }

    #[test]
    fn duplicate_names_after_normalization() {
        let result = AreaCatalog::new(vec![
            rec("Dadar", FloodRisk::High),
            rec("  dadar ", FloodRisk::Low),
        ]);
        assert!(matches!(result, Err(CatalogError::DuplicateName(n)) if n == "dadar"));
    }

    #[test]
    fn non_finite_coordinates_rejected() {
        let mut bad = rec("nowhere", FloodRisk::Low);
        bad.pos = GeoPoint::new(f64::NAN, 72.8);
        assert!(matches!(
            AreaCatalog::new(vec![bad]),
            Err(CatalogError::InvalidCoordinates { .. })
        ));
    }

    #[test]
    fn out_of_bounds_is_kept() {
        let mut delhi = rec("delhi", FloodRisk::Low);
        delhi.pos = GeoPoint::new(28.61, 77.21);
        let cat = AreaCatalog::with_bounds(vec![delhi], BoundingBox::MUMBAI).unwrap();
        assert_eq!(cat.len(), 1);
    }

    #[test]
    fn ids_follow_row_order() {
        let cat = AreaCatalog::new(vec![
            rec("a", FloodRisk::High),
            rec("b", FloodRisk::Low),
            rec("c", FloodRisk::Moderate),
        ])
        .unwrap();
        let ids: Vec<AreaId> = cat.iter().map(|(id, _)| id).collect();
        assert_eq!(ids, vec![AreaId(0), AreaId(1), AreaId(2)]);
        assert_eq!(cat.names().collect::<Vec<_>>(), ["a", "b", "c"]);
        assert!(cat.get(AreaId(3)).is_none());
    }

    #[test]
    fn risk_queries() {
        let cat = AreaCatalog::new(vec![
            rec("a", FloodRisk::High),
            rec("b", FloodRisk::Low),
            rec("c", FloodRisk::Moderate),
            rec("d", FloodRisk::Low),
        ])
        .unwrap();
        let low: Vec<_> = cat.by_risk(FloodRisk::Low).map(|(_, r)| r.name.as_str()).collect();
        assert_eq!(low, ["b", "d"]);
        let safe: Vec<_> = cat.safe_areas(FloodRisk::Moderate).map(|(_, r)| r.name.as_str()).collect();
        assert_eq!(safe, ["b", "c", "d"]);
        assert_eq!(cat.risk_counts(), [2, 1, 1, 0, 0]);
    }
}

#[cfg(test)]
mod source {
    use std::io::Write;

    use ev_core::FloodRisk;

    use crate::{AreaCatalog, CatalogError, CatalogSource};

    #[test]
    fn embedded_table_loads() {
        let cat = AreaCatalog::mumbai().unwrap();
        assert_eq!(cat.len(), 102);
        let colaba = cat.by_name("colaba").unwrap();
        assert_eq!(cat[colaba].flood_risk, FloodRisk::Severe);
        assert!(cat.records().iter().all(|r| r.evacuation_priority.is_some()));
    }

    #[test]
    fn csv_file_source() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "area,lat,lon,risk").unwrap();
        writeln!(file, "Churchgate,18.9346,72.8284,low").unwrap();
        let cat = CatalogSource::Csv(file.path().to_path_buf()).load().unwrap();
        assert_eq!(cat.len(), 1);
    }

    #[test]
    fn missing_file_is_io_error() {
        let src = CatalogSource::Csv("/definitely/not/here.csv".into());
        assert!(matches!(src.load(), Err(CatalogError::Io(_))));
    }
}

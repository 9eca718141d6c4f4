mod parser;

use super::listing::ListingRecord;
use std::io::Read;
use std::path::Path;

#[derive(Debug)]
pub enum ListingImportError {
    Io(std::io::Error),
    Csv(csv::Error),
}

impl std::fmt::Display for ListingImportError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ListingImportError::Io(err) => write!(f, "failed to read listing export: {}", err),
            ListingImportError::Csv(err) => write!(f, "invalid listing CSV data: {}", err),
        }
    }
}

impl std::error::Error for ListingImportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ListingImportError::Io(err) => Some(err),
            ListingImportError::Csv(err) => Some(err),
        }
    }
}

impl From<std::io::Error> for ListingImportError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<csv::Error> for ListingImportError {
    fn from(err: csv::Error) -> Self {
        Self::Csv(err)
    }
}

/// Imports live listing records from a CSV feed export.
///
/// Rows missing an address or a usable price are dropped rather than
/// failing the whole import; upstream exports are routinely ragged and
/// a partial feed is still a feed.
pub struct ListingFeedImporter;

impl ListingFeedImporter {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Vec<ListingRecord>, ListingImportError> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(file)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Vec<ListingRecord>, ListingImportError> {
        parser::parse_records(reader).map_err(ListingImportError::from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::markets::listing::{PropertyType, RecordSource};
    use std::io::Cursor;

    const HEADER: &str =
        "Address,City,State,Latitude,Longitude,Price,Square Feet,Bedrooms,Bathrooms,Year Built,Property Type\n";

    #[test]
    fn importer_parses_complete_rows_as_live_records() {
        let csv = format!(
            "{HEADER}1200 Barton Springs Rd,Austin,TX,30.2638,-97.7632,350000,1800,3,2,1998,single_family\n"
        );
        let records = ListingFeedImporter::from_reader(Cursor::new(csv)).expect("import succeeds");

        assert_eq!(records.len(), 1);
        let record = &records[0];
        assert_eq!(record.address, "1200 Barton Springs Rd");
        assert_eq!(record.price, 350_000.0);
        assert_eq!(record.square_feet, 1_800);
        assert_eq!(record.property_type, PropertyType::SingleFamily);
        assert_eq!(record.source, RecordSource::Live);
    }

    #[test]
    fn importer_drops_rows_without_usable_price() {
        let csv = format!(
            "{HEADER}10 Elm St,Austin,TX,30.27,-97.74,,1500,3,2,1990,condo\n\
             20 Elm St,Austin,TX,30.27,-97.74,not-a-price,1500,3,2,1990,condo\n\
             30 Elm St,Austin,TX,30.27,-97.74,410000,1500,3,2,1990,condo\n"
        );
        let records = ListingFeedImporter::from_reader(Cursor::new(csv)).expect("import succeeds");
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].address, "30 Elm St");
    }

    #[test]
    fn importer_defaults_missing_optional_fields() {
        let csv = format!("{HEADER}44 Oak Ave,Austin,TX,,,295000,,,,,\n");
        let records = ListingFeedImporter::from_reader(Cursor::new(csv)).expect("import succeeds");
        let record = &records[0];
        assert_eq!(record.square_feet, 0);
        assert_eq!(record.bedrooms, 0);
        assert_eq!(record.year_built, 0);
        assert_eq!(record.property_type, PropertyType::SingleFamily);
        assert!(!record.has_complete_facts());
    }

    #[test]
    fn importer_from_path_propagates_io_errors() {
        let error = ListingFeedImporter::from_path("./does-not-exist.csv")
            .expect_err("expected io error");
        match error {
            ListingImportError::Io(_) => {}
            other => panic!("expected io error, got {other:?}"),
        }
    }
}

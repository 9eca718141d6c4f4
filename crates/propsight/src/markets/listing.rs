use serde::{Deserialize, Serialize};

/// One housing unit as supplied by a feed or synthesized by the
/// fallback generator. Immutable once scored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListingRecord {
    pub address: String,
    pub city: String,
    pub state: String,
    pub latitude: f64,
    pub longitude: f64,
    pub price: f64,
    pub square_feet: u32,
    pub bedrooms: u8,
    pub bathrooms: f32,
    pub year_built: u16,
    pub property_type: PropertyType,
    pub source: RecordSource,
}

impl ListingRecord {
    pub fn price_per_sqft(&self) -> Option<f64> {
        if self.square_feet == 0 {
            None
        } else {
            Some(self.price / self.square_feet as f64)
        }
    }

    /// True when size, bedroom, and bathroom facts are all present.
    pub fn has_complete_facts(&self) -> bool {
        self.square_feet > 0 && self.bedrooms > 0 && self.bathrooms > 0.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PropertyType {
    SingleFamily,
    Condo,
    Townhouse,
    MultiFamily,
}

impl PropertyType {
    pub const fn label(self) -> &'static str {
        match self {
            Self::SingleFamily => "Single Family",
            Self::Condo => "Condo",
            Self::Townhouse => "Townhouse",
            Self::MultiFamily => "Multi-Family",
        }
    }
}

/// Provenance tag distinguishing feed-supplied records from generated
/// fallbacks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecordSource {
    Live,
    Synthetic,
}

impl RecordSource {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Live => "live",
            Self::Synthetic => "synthetic",
        }
    }
}

/// A listing plus the figures the appreciation model derived for it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PropertyPrediction {
    #[serde(flatten)]
    pub listing: ListingRecord,
    /// Projected appreciation over the requested horizon, percent.
    pub appreciation: f64,
    /// Trust in the projection, 0-100.
    pub confidence: f64,
    /// Downside risk, 0-100.
    pub risk_score: f64,
    pub price_per_sqft: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record() -> ListingRecord {
        ListingRecord {
            address: "1200 Barton Springs Rd".to_string(),
            city: "Austin".to_string(),
            state: "TX".to_string(),
            latitude: 30.26,
            longitude: -97.75,
            price: 350_000.0,
            square_feet: 1_800,
            bedrooms: 3,
            bathrooms: 2.0,
            year_built: 1998,
            property_type: PropertyType::SingleFamily,
            source: RecordSource::Live,
        }
    }

    #[test]
    fn price_per_sqft_guards_zero_size() {
        let mut listing = record();
        assert!((listing.price_per_sqft().expect("ratio") - 194.44).abs() < 0.01);

        listing.square_feet = 0;
        assert!(listing.price_per_sqft().is_none());
    }

    #[test]
    fn complete_facts_require_size_beds_and_baths() {
        let mut listing = record();
        assert!(listing.has_complete_facts());

        listing.bedrooms = 0;
        assert!(!listing.has_complete_facts());
    }

    #[test]
    fn source_tags_serialize_to_wire_labels() {
        assert_eq!(
            serde_json::to_value(RecordSource::Synthetic).expect("serialize"),
            serde_json::json!("synthetic")
        );
        assert_eq!(RecordSource::Live.label(), "live");
    }
}

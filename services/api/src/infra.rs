use metrics_exporter_prometheus::PrometheusHandle;
use propsight::markets::feed::ListingFeedImporter;
use propsight::markets::listing::ListingRecord;
use propsight::markets::predictions::{ListingSource, SortKey, SourceError};
use propsight::markets::signals::{
    PermitCategory, PermitRecord, PermitStatus, RentalMarketSummary,
};
use std::path::PathBuf;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex};

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Listing source backed by a CSV feed export on disk. The file is
/// re-read per fetch so an updated export is picked up without a
/// restart.
pub(crate) struct FeedFileSource {
    path: PathBuf,
}

impl FeedFileSource {
    pub(crate) fn new(path: PathBuf) -> Self {
        Self { path }
    }
}

impl ListingSource for FeedFileSource {
    fn label(&self) -> &'static str {
        "listing_feed"
    }

    fn fetch(
        &self,
        city: &str,
        _state: &str,
        limit: usize,
    ) -> Result<Vec<ListingRecord>, SourceError> {
        let mut records = ListingFeedImporter::from_path(&self.path)?;
        records.retain(|record| record.city.eq_ignore_ascii_case(city));
        records.truncate(limit);
        Ok(records)
    }
}

/// In-memory listing source for demos and tests.
#[derive(Default, Clone)]
pub(crate) struct StaticListingSource {
    records: Arc<Mutex<Vec<ListingRecord>>>,
}

impl StaticListingSource {
    pub(crate) fn seed(&self, records: Vec<ListingRecord>) {
        let mut guard = self.records.lock().expect("listing mutex poisoned");
        guard.extend(records);
    }
}

impl ListingSource for StaticListingSource {
    fn label(&self) -> &'static str {
        "static"
    }

    fn fetch(
        &self,
        city: &str,
        _state: &str,
        limit: usize,
    ) -> Result<Vec<ListingRecord>, SourceError> {
        let guard = self.records.lock().expect("listing mutex poisoned");
        let mut matches: Vec<ListingRecord> = guard
            .iter()
            .filter(|record| record.city.eq_ignore_ascii_case(city))
            .cloned()
            .collect();
        matches.truncate(limit);
        Ok(matches)
    }
}

pub(crate) fn build_sources(listing_feed: Option<PathBuf>) -> Vec<Arc<dyn ListingSource>> {
    match listing_feed {
        Some(path) => vec![Arc::new(FeedFileSource::new(path))],
        None => Vec::new(),
    }
}

pub(crate) fn parse_sort_key(raw: &str) -> Result<SortKey, String> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "appreciation" => Ok(SortKey::Appreciation),
        "relevance" => Ok(SortKey::Relevance),
        "future_score" | "future-score" => Ok(SortKey::FutureScore),
        other => Err(format!(
            "unknown sort key '{other}' (expected appreciation, relevance, or future_score)"
        )),
    }
}

/// Representative permit activity used by the demo scorecard.
pub(crate) fn sample_permits() -> Vec<PermitRecord> {
    vec![
        PermitRecord {
            reference: "2026-014233".to_string(),
            category: PermitCategory::Residential,
            status: PermitStatus::UnderConstruction,
            valuation: 640_000.0,
            impact_score: 74.0,
        },
        PermitRecord {
            reference: "2026-015901".to_string(),
            category: PermitCategory::Luxury,
            status: PermitStatus::Approved,
            valuation: 2_400_000.0,
            impact_score: 82.0,
        },
        PermitRecord {
            reference: "2026-009187".to_string(),
            category: PermitCategory::Transit,
            status: PermitStatus::UnderConstruction,
            valuation: 5_600_000.0,
            impact_score: 91.0,
        },
        PermitRecord {
            reference: "2026-017440".to_string(),
            category: PermitCategory::Commercial,
            status: PermitStatus::Applied,
            valuation: 880_000.0,
            impact_score: 55.0,
        },
    ]
}

/// Representative rental-market conditions used by the demo scorecard.
pub(crate) fn sample_rental() -> RentalMarketSummary {
    RentalMarketSummary {
        average_rent: 1_920.0,
        rent_growth: 4.8,
        vacancy_rate: 0.052,
        investor_interest: 74.0,
        net_yield: Some(5.6),
    }
}

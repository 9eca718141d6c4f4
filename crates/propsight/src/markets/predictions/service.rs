use std::sync::Arc;

use super::ranking::{self, Selection, SelectionStats, SortKey};
use crate::markets::appreciation::{self, DEFAULT_HORIZON_MONTHS};
use crate::markets::baseline::{self, MarketBaseline};
use crate::markets::feed::ListingImportError;
use crate::markets::listing::{ListingRecord, PropertyPrediction, RecordSource};
use crate::markets::synthetic::{self, SYNTHETIC_CONFIDENCE_CEILING};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One attempt in the ordered data-source chain. The pipeline takes
/// the first source returning a non-empty record set and falls through
/// to synthesis when the whole chain yields nothing.
pub trait ListingSource: Send + Sync {
    fn label(&self) -> &'static str;
    fn fetch(
        &self,
        city: &str,
        state: &str,
        limit: usize,
    ) -> Result<Vec<ListingRecord>, SourceError>;
}

/// Error raised by one chain attempt. Never fatal to the pipeline; a
/// failed source is logged and treated as empty.
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    #[error("listing source unavailable: {0}")]
    Unavailable(String),
    #[error(transparent)]
    Import(#[from] ListingImportError),
}

/// Error raised by the prediction pipeline itself.
#[derive(Debug, thiserror::Error)]
pub enum PredictionError {
    #[error("no market data available after synthetic fallback")]
    NoDataAvailable,
    #[error("invalid market query: {0}")]
    InvalidQuery(String),
}

/// Normalized query driving one prediction run.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PredictionRequest {
    pub city: String,
    pub state: String,
    pub limit: Option<i64>,
    pub horizon_months: Option<i64>,
    #[serde(default)]
    pub sort: SortKey,
}

impl PredictionRequest {
    /// Horizon in months with non-positive input defaulted, never zero.
    pub fn horizon(&self) -> u32 {
        match self.horizon_months {
            Some(months) if months > 0 => months as u32,
            _ => DEFAULT_HORIZON_MONTHS,
        }
    }
}

/// Provenance of the records behind one report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DataSourceLabel {
    Live,
    Synthetic,
    Mixed,
}

/// Output envelope: the ranked predictions plus aggregate metadata.
#[derive(Debug, Clone, Serialize)]
pub struct PredictionReport {
    pub city: String,
    pub state: String,
    pub market: &'static str,
    pub horizon_months: u32,
    pub data_source: DataSourceLabel,
    pub generated_at: DateTime<Utc>,
    pub items: Vec<PropertyPrediction>,
    pub stats: SelectionStats,
}

/// Pipeline facade: resolves the baseline, walks the source chain,
/// tops up with synthetic records, scores, and ranks.
pub struct PredictionService {
    sources: Vec<Arc<dyn ListingSource>>,
}

impl PredictionService {
    pub fn new(sources: Vec<Arc<dyn ListingSource>>) -> Self {
        Self { sources }
    }

    /// Run a prediction with the configured source chain.
    pub fn predict(&self, request: &PredictionRequest) -> Result<PredictionReport, PredictionError> {
        self.predict_seeded(request, None)
    }

    /// Run a prediction, letting the caller front-load records (e.g. a
    /// feed export posted with the request) ahead of the chain.
    pub fn predict_seeded(
        &self,
        request: &PredictionRequest,
        seed_records: Option<Vec<ListingRecord>>,
    ) -> Result<PredictionReport, PredictionError> {
        let city = baseline::normalize_key(&request.city);
        if city.is_empty() {
            return Err(PredictionError::InvalidQuery(
                "a city or region is required".to_string(),
            ));
        }
        let state = baseline::normalize_key(&request.state);
        let market_baseline = baseline::resolve(&city, &state);
        let limit = ranking::clamp_limit(request.limit);
        let horizon = request.horizon();

        let mut records = match seed_records {
            Some(seeded) if !seeded.is_empty() => seeded,
            _ => self.fetch_from_chain(&city, &state, limit),
        };
        records.truncate(limit);

        if records.len() < limit {
            let shortfall = limit - records.len();
            tracing::debug!(
                city = %city,
                shortfall,
                "live supply below requested count; synthesizing remainder"
            );
            records.extend(synthetic::generate(
                &market_baseline,
                &city,
                &state,
                shortfall,
                records.len(),
            ));
        }

        if records.is_empty() {
            return Err(PredictionError::NoDataAvailable);
        }

        let data_source = provenance_label(&records);
        let predictions = records
            .into_iter()
            .map(|record| score_record(record, &market_baseline, horizon))
            .collect();

        let Selection { items, stats } = ranking::select(predictions, request.limit, request.sort);

        Ok(PredictionReport {
            city,
            state,
            market: market_baseline.market,
            horizon_months: horizon,
            data_source,
            generated_at: Utc::now(),
            items,
            stats,
        })
    }

    fn fetch_from_chain(&self, city: &str, state: &str, limit: usize) -> Vec<ListingRecord> {
        for source in &self.sources {
            match source.fetch(city, state, limit) {
                Ok(records) if !records.is_empty() => {
                    tracing::debug!(source = source.label(), count = records.len(), "chain hit");
                    return records;
                }
                Ok(_) => continue,
                Err(err) => {
                    tracing::warn!(source = source.label(), error = %err, "listing source failed");
                }
            }
        }
        Vec::new()
    }
}

fn score_record(
    record: ListingRecord,
    market_baseline: &MarketBaseline,
    horizon: u32,
) -> PropertyPrediction {
    let estimate = appreciation::estimate(
        &record,
        market_baseline,
        horizon,
        appreciation::market_noise(),
    );
    let confidence = if record.source == RecordSource::Synthetic {
        estimate.confidence.min(SYNTHETIC_CONFIDENCE_CEILING)
    } else {
        estimate.confidence
    };
    let price_per_sqft = record
        .price_per_sqft()
        .map(crate::markets::normalize::round2)
        .unwrap_or(0.0);

    PropertyPrediction {
        listing: record,
        appreciation: estimate.appreciation,
        confidence,
        risk_score: estimate.risk_score,
        price_per_sqft,
    }
}

fn provenance_label(records: &[ListingRecord]) -> DataSourceLabel {
    let synthetic = records
        .iter()
        .filter(|record| record.source == RecordSource::Synthetic)
        .count();
    if synthetic == 0 {
        DataSourceLabel::Live
    } else if synthetic == records.len() {
        DataSourceLabel::Synthetic
    } else {
        DataSourceLabel::Mixed
    }
}

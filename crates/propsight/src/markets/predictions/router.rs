use std::io::Cursor;
use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
    Router,
};
use serde::{Deserialize, Serialize};
use serde_json::json;

use super::ranking::SortKey;
use super::service::{PredictionRequest, PredictionService};
use crate::markets::baseline::{self, MarketBaseline};
use crate::markets::feed::ListingFeedImporter;
use crate::markets::scoring::{CompositeScoreSet, CompositeScoringEngine};
use crate::markets::signals::{PermitRecord, RentalMarketSummary};

/// Shared state behind the market endpoints.
#[derive(Clone)]
pub struct MarketState {
    pub predictions: Arc<PredictionService>,
    pub scoring: Arc<CompositeScoringEngine>,
}

/// Router builder exposing the prediction and market-score endpoints.
pub fn market_router(state: MarketState) -> Router {
    Router::new()
        .route("/api/v1/markets/predictions", post(predictions_handler))
        .route("/api/v1/markets/score", post(score_handler))
        .with_state(state)
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct PredictionsPayload {
    /// Free-text "City, ST" shorthand; split at the first comma.
    pub(crate) region: Option<String>,
    pub(crate) city: Option<String>,
    pub(crate) state: Option<String>,
    pub(crate) limit: Option<i64>,
    /// Horizon in months.
    pub(crate) timeframe: Option<i64>,
    pub(crate) sort: Option<SortKey>,
    /// Optional listing feed export to run ahead of the source chain.
    pub(crate) listings_csv: Option<String>,
}

impl PredictionsPayload {
    pub(crate) fn into_request(self) -> (PredictionRequest, Option<String>) {
        let (city, state) = match (self.city, self.state) {
            (Some(city), state) => (city, state.unwrap_or_default()),
            (None, state) => {
                let region = self.region.unwrap_or_default();
                let mut parts = region.splitn(2, ',');
                let city = parts.next().unwrap_or_default().trim().to_string();
                let region_state = parts.next().unwrap_or_default().trim().to_string();
                (city, state.unwrap_or(region_state))
            }
        };

        (
            PredictionRequest {
                city,
                state,
                limit: self.limit,
                horizon_months: self.timeframe,
                sort: self.sort.unwrap_or_default(),
            },
            self.listings_csv,
        )
    }
}

pub(crate) async fn predictions_handler(
    State(state): State<MarketState>,
    axum::Json(payload): axum::Json<PredictionsPayload>,
) -> Response {
    let (request, listings_csv) = payload.into_request();

    let seed_records = match listings_csv {
        Some(csv) => match ListingFeedImporter::from_reader(Cursor::new(csv.into_bytes())) {
            Ok(records) => Some(records),
            Err(error) => {
                let payload = json!({ "error": error.to_string() });
                return (StatusCode::UNPROCESSABLE_ENTITY, axum::Json(payload)).into_response();
            }
        },
        None => None,
    };

    match state.predictions.predict_seeded(&request, seed_records) {
        Ok(report) => (StatusCode::OK, axum::Json(report)).into_response(),
        Err(error) => crate::error::AppError::from(error).into_response(),
    }
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct MarketScorePayload {
    pub(crate) region: Option<String>,
    pub(crate) city: Option<String>,
    pub(crate) state: Option<String>,
    #[serde(default)]
    pub(crate) permits: Vec<PermitRecord>,
    pub(crate) rental: Option<RentalMarketSummary>,
}

#[derive(Debug, Serialize)]
pub(crate) struct MarketScoreResponse {
    pub(crate) city: String,
    pub(crate) state: String,
    pub(crate) baseline: MarketBaseline,
    pub(crate) scores: CompositeScoreSet,
}

pub(crate) async fn score_handler(
    State(state): State<MarketState>,
    axum::Json(payload): axum::Json<MarketScorePayload>,
) -> Response {
    let (city_raw, state_raw) = match (payload.city, payload.state) {
        (Some(city), state) => (city, state.unwrap_or_default()),
        (None, state) => {
            let region = payload.region.unwrap_or_default();
            let mut parts = region.splitn(2, ',');
            let city = parts.next().unwrap_or_default().trim().to_string();
            let region_state = parts.next().unwrap_or_default().trim().to_string();
            (city, state.unwrap_or(region_state))
        }
    };

    let city = baseline::normalize_key(&city_raw);
    let state_key = baseline::normalize_key(&state_raw);
    let market_baseline = baseline::resolve(&city, &state_key);
    let scores = state
        .scoring
        .score_market(&market_baseline, &payload.permits, payload.rental.as_ref());

    (
        StatusCode::OK,
        axum::Json(MarketScoreResponse {
            city,
            state: state_key,
            baseline: market_baseline,
            scores,
        }),
    )
        .into_response()
}

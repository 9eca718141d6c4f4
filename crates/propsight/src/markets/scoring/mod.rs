mod investment;
mod outlook;
mod risk;
mod roi;
mod weights;

pub use risk::{RiskAssessment, RiskLevel};
pub use roi::RoiProjections;
pub use weights::InvestmentWeights;

use super::baseline::MarketBaseline;
use super::signals::{PermitRecord, RentalMarketSummary};
use serde::Serialize;

/// Stateless engine combining normalized sub-scores into the city-level
/// composite set.
pub struct CompositeScoringEngine {
    weights: InvestmentWeights,
}

impl CompositeScoringEngine {
    /// Build an engine over a weight vector. Invalid vectors (not
    /// summing to 1.0) are replaced with the documented defaults so a
    /// misconfigured caller degrades to standard weighting instead of
    /// skewing every score.
    pub fn new(weights: InvestmentWeights) -> Self {
        let weights = if weights.validate() {
            weights
        } else {
            tracing::warn!("investment weights do not sum to 1.0; using defaults");
            InvestmentWeights::default()
        };
        Self { weights }
    }

    pub fn score_market(
        &self,
        baseline: &MarketBaseline,
        permits: &[PermitRecord],
        rental: Option<&RentalMarketSummary>,
    ) -> CompositeScoreSet {
        CompositeScoreSet {
            investment_score: investment::investment_score(baseline, permits, &self.weights),
            future_value_score: outlook::future_value_score(baseline, permits),
            market_momentum: outlook::market_momentum(baseline, permits, rental),
            gentrification_risk: outlook::gentrification_risk(permits),
            risk: risk::assess(baseline, permits, rental),
            roi: roi::project(baseline, permits, rental),
        }
    }
}

impl Default for CompositeScoringEngine {
    fn default() -> Self {
        Self::new(InvestmentWeights::default())
    }
}

/// The full set of composite figures for one market. Every scalar is
/// clamped to [0, 100] except the ROI percentages, which are unbounded
/// but rounded to two decimals.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CompositeScoreSet {
    pub investment_score: f64,
    pub future_value_score: f64,
    pub market_momentum: f64,
    pub gentrification_risk: f64,
    pub risk: RiskAssessment,
    pub roi: RoiProjections,
}

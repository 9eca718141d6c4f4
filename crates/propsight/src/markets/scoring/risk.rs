use crate::markets::baseline::MarketBaseline;
use crate::markets::normalize::{clamp_score, round2};
use crate::markets::signals::{PermitProfile, PermitRecord, RentalMarketSummary};
use serde::Serialize;

/// Development risk assumed when no permit history is on file.
const NO_PERMIT_DEVELOPMENT_RISK: f64 = 30.0;

/// Climate risk assumed for markets without an assessed figure.
const UNASSESSED_CLIMATE_RISK: f64 = 30.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

impl RiskLevel {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Low => "LOW",
            Self::Medium => "MEDIUM",
            Self::High => "HIGH",
        }
    }

    fn from_overall(overall: f64) -> Self {
        if overall > 60.0 {
            Self::High
        } else if overall > 30.0 {
            Self::Medium
        } else {
            Self::Low
        }
    }
}

/// Five-dimension risk breakdown plus the overall mean.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RiskAssessment {
    pub overall: f64,
    pub level: RiskLevel,
    pub market: f64,
    pub development: f64,
    pub economic: f64,
    pub climate: f64,
    pub affordability: f64,
}

pub(crate) fn assess(
    baseline: &MarketBaseline,
    permits: &[PermitRecord],
    rental: Option<&RentalMarketSummary>,
) -> RiskAssessment {
    let vacancy = rental
        .map(|summary| summary.vacancy_rate)
        .unwrap_or(baseline.vacancy_rate);

    let market = clamp_score(vacancy * 100.0);
    let development = PermitProfile::from_permits(permits)
        .map(|profile| clamp_score(profile.rejection_ratio() * 100.0))
        .unwrap_or(NO_PERMIT_DEVELOPMENT_RISK);
    let economic = clamp_score((100.0 - baseline.employment_rate) * 2.0);
    let climate = clamp_score(baseline.climate_risk.unwrap_or(UNASSESSED_CLIMATE_RISK));
    let affordability = clamp_score(100.0 - baseline.affordability_index);

    let overall = round2((market + development + economic + climate + affordability) / 5.0);

    RiskAssessment {
        overall,
        level: RiskLevel::from_overall(overall),
        market: round2(market),
        development: round2(development),
        economic: round2(economic),
        climate: round2(climate),
        affordability: round2(affordability),
    }
}

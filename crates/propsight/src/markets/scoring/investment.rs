use super::weights::InvestmentWeights;
use crate::markets::baseline::MarketBaseline;
use crate::markets::normalize::{clamp_score, contribution, round2, Transform};
use crate::markets::signals::PermitRecord;

pub(crate) fn investment_score(
    baseline: &MarketBaseline,
    permits: &[PermitRecord],
    weights: &InvestmentWeights,
) -> f64 {
    let climate_resilience = baseline.climate_risk.map(|risk| 100.0 - risk);

    let base = contribution(
        Some(baseline.appreciation_rate),
        weights.appreciation,
        Transform::Scale(5.0),
    ) + contribution(
        Some(baseline.rental_yield),
        weights.rental_yield,
        Transform::Scale(10.0),
    ) + contribution(
        Some(baseline.employment_rate),
        weights.employment,
        Transform::EmploymentExcess,
    ) + contribution(
        Some(permits.len() as f64),
        weights.permit_volume,
        Transform::Scale(2.0),
    ) + contribution(
        Some(baseline.walkability),
        weights.walkability,
        Transform::Identity,
    ) + contribution(
        Some(baseline.affordability_index),
        weights.affordability,
        Transform::Identity,
    ) + contribution(
        baseline.future_value,
        weights.future_value,
        Transform::Identity,
    ) + contribution(
        climate_resilience,
        weights.climate_resilience,
        Transform::Identity,
    );

    // Price-tier penalty: higher threshold wins, never both.
    let mut score = base;
    if baseline.median_home_price > 800_000.0 {
        score *= 0.85;
    } else if baseline.median_home_price > 500_000.0 {
        score *= 0.95;
    }

    // Emerging-market bonus.
    if baseline.appreciation_rate > 15.0 && baseline.median_home_price < 300_000.0 {
        score *= 1.10;
    }

    if baseline.crime_index > 50.0 {
        score *= 0.90;
    }

    round2(clamp_score(score))
}

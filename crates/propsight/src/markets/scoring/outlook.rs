use crate::markets::baseline::MarketBaseline;
use crate::markets::normalize::{clamp_score, round2};
use crate::markets::signals::{PermitProfile, PermitRecord, RentalMarketSummary};

/// Gentrification figure reported when no permit activity exists.
const QUIET_MARKET_GENTRIFICATION: f64 = 20.0;

/// Neutral approval term used when no permits are on file, so an
/// absent feed neither inflates nor craters momentum.
const NEUTRAL_APPROVAL_TERM: f64 = 50.0;

pub(crate) fn future_value_score(baseline: &MarketBaseline, permits: &[PermitRecord]) -> f64 {
    let mut score = baseline.future_value.unwrap_or(50.0);

    if let Some(profile) = PermitProfile::from_permits(permits) {
        score += (profile.avg_impact - 50.0) * 0.2;
        score += (profile.transit_active as f64 * 2.0).min(15.0);
        score += (profile.infrastructure_active as f64 * 2.0).min(10.0);
    }

    if baseline.appreciation_rate > 10.0 {
        score += 5.0;
    }

    round2(clamp_score(score))
}

pub(crate) fn gentrification_risk(permits: &[PermitRecord]) -> f64 {
    let Some(profile) = PermitProfile::from_permits(permits) else {
        return QUIET_MARKET_GENTRIFICATION;
    };

    let valuation_term = (profile.avg_valuation / 2_000_000.0 * 100.0).min(100.0);
    let score =
        30.0 * profile.luxury_ratio + 30.0 * profile.high_value_ratio + 0.4 * valuation_term;

    round2(clamp_score(score))
}

pub(crate) fn market_momentum(
    baseline: &MarketBaseline,
    permits: &[PermitRecord],
    rental: Option<&RentalMarketSummary>,
) -> f64 {
    let rent_growth = rental
        .map(|summary| summary.rent_growth)
        .unwrap_or(baseline.rent_growth);
    let investor_interest = rental
        .map(|summary| summary.investor_interest)
        .unwrap_or(baseline.investor_interest);
    let approval_term = PermitProfile::from_permits(permits)
        .map(|profile| profile.approval_ratio() * 100.0)
        .unwrap_or(NEUTRAL_APPROVAL_TERM);

    let terms = [
        clamp_score(baseline.appreciation_rate * 5.0),
        clamp_score(rent_growth * 10.0),
        clamp_score(approval_term),
        clamp_score(investor_interest),
        population_tier(baseline.population),
    ];

    round2(clamp_score(terms.iter().sum::<f64>() / terms.len() as f64))
}

fn population_tier(population: u64) -> f64 {
    if population >= 1_000_000 {
        90.0
    } else if population >= 500_000 {
        75.0
    } else if population >= 200_000 {
        60.0
    } else {
        45.0
    }
}

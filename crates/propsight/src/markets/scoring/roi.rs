use crate::markets::baseline::MarketBaseline;
use crate::markets::normalize::round2;
use crate::markets::signals::{PermitProfile, PermitRecord, RentalMarketSummary};
use serde::Serialize;

/// Yield assumed when neither the rental summary nor the baseline
/// carries a net figure.
const FALLBACK_NET_YIELD: f64 = 5.0;

/// Multi-horizon ROI figures, percent. Unbounded but rounded to two
/// decimals.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RoiProjections {
    pub one_year: f64,
    pub three_year: f64,
    pub five_year: f64,
}

pub(crate) fn project(
    baseline: &MarketBaseline,
    permits: &[PermitRecord],
    rental: Option<&RentalMarketSummary>,
) -> RoiProjections {
    let base = rental
        .and_then(|summary| summary.net_yield)
        .or(baseline.net_yield)
        .unwrap_or(FALLBACK_NET_YIELD);

    let (development_boost, transit_boost) = PermitProfile::from_permits(permits)
        .map(|profile| {
            (
                0.3 * profile.high_impact as f64,
                0.2 * profile.transit_under_construction as f64,
            )
        })
        .unwrap_or((0.0, 0.0));

    RoiProjections {
        one_year: round2(base + 0.3 * development_boost),
        three_year: round2(base + 0.7 * development_boost + 0.5 * transit_boost),
        five_year: round2(base + development_boost + transit_boost),
    }
}

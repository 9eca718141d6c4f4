use super::baseline::MarketBaseline;
use super::listing::ListingRecord;
use super::normalize::round2;
use rand::Rng;
use serde::Serialize;

/// Bound on the multiplier perturbation simulating market noise.
pub const MAX_NOISE: f64 = 0.15;

/// Horizon substituted when the caller passes zero months.
pub const DEFAULT_HORIZON_MONTHS: u32 = 12;

/// Figures the model derives for a single property.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PropertyEstimate {
    /// Projected appreciation over the horizon, percent.
    pub appreciation: f64,
    /// Trust in the projection, clamped to [60, 95].
    pub confidence: f64,
    /// Downside risk, clamped to [15, 75].
    pub risk_score: f64,
}

/// Draw the one sanctioned random term in the engine.
pub fn market_noise() -> f64 {
    rand::rng().random_range(-MAX_NOISE..=MAX_NOISE)
}

/// Score one listing against its market baseline.
///
/// Pure given its arguments; callers inject `noise` (usually from
/// [`market_noise`]) so tests can pin the perturbation. The noise term
/// is clamped to the documented band and a zero horizon falls back to
/// [`DEFAULT_HORIZON_MONTHS`] before any division.
pub fn estimate(
    listing: &ListingRecord,
    baseline: &MarketBaseline,
    horizon_months: u32,
    noise: f64,
) -> PropertyEstimate {
    let horizon = if horizon_months == 0 {
        DEFAULT_HORIZON_MONTHS
    } else {
        horizon_months
    };

    let mut multiplier = 1.0;
    // Cheap and luxury tiers are mutually exclusive; the cheap-home
    // bonus wins below 0.8x median.
    if listing.price < baseline.median_home_price * 0.8 {
        multiplier += 0.2;
    } else if listing.price > baseline.median_home_price * 1.5 {
        multiplier += 0.1;
    }
    if listing.square_feet > 2_000 {
        multiplier += 0.1;
    }
    multiplier += noise.clamp(-MAX_NOISE, MAX_NOISE);

    let appreciation =
        round2(baseline.appreciation_rate * multiplier * horizon as f64 / 12.0);

    let mut confidence: f64 = 75.0;
    if baseline.market_strength > 7.0 {
        confidence += 10.0;
    } else if baseline.market_strength < 5.0 {
        confidence -= 10.0;
    }
    if listing.has_complete_facts() {
        confidence += 5.0;
    }
    if let Some(ppsf) = listing.price_per_sqft() {
        if (50.0..=500.0).contains(&ppsf) {
            confidence += 5.0;
        }
    }
    let confidence = confidence.clamp(60.0, 95.0);

    let mut risk_score: f64 = 30.0;
    if baseline.volatility > 0.15 {
        risk_score += 10.0;
    }
    if listing.price > baseline.median_home_price * 2.0 {
        risk_score += 15.0;
    }
    if baseline.inventory_level > 6.0 {
        risk_score += 10.0;
    }
    let risk_score = risk_score.clamp(15.0, 75.0);

    PropertyEstimate {
        appreciation,
        confidence,
        risk_score,
    }
}

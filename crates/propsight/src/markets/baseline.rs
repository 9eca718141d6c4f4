use serde::Serialize;

/// Canonical reference metrics for one housing market.
///
/// Rates are percentages, volatility and vacancy are fractional,
/// inventory is months of supply, and index-style figures
/// (market strength, walkability, affordability, crime, investor
/// interest) live on their documented fixed scales.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MarketBaseline {
    pub market: &'static str,
    pub latitude: f64,
    pub longitude: f64,
    pub median_home_price: f64,
    /// Annual appreciation rate, percent.
    pub appreciation_rate: f64,
    /// Market strength index, 0-10.
    pub market_strength: f64,
    /// Fractional price volatility.
    pub volatility: f64,
    /// Months of housing supply.
    pub inventory_level: f64,
    /// Employment rate, percent.
    pub employment_rate: f64,
    /// Gross rental yield, percent.
    pub rental_yield: f64,
    /// Walkability index, 0-100.
    pub walkability: f64,
    /// Affordability index, 0-100, higher is more affordable.
    pub affordability_index: f64,
    /// Crime index, 0-100.
    pub crime_index: f64,
    /// Fraction of rental stock currently vacant.
    pub vacancy_rate: f64,
    /// Year-over-year rent growth, percent.
    pub rent_growth: f64,
    /// Investor purchase interest, 0-100.
    pub investor_interest: f64,
    pub population: u64,
    /// Forward-looking value figure, 0-100, where modelled.
    pub future_value: Option<f64>,
    /// Climate exposure figure, 0-100, where assessed.
    pub climate_risk: Option<f64>,
    /// Net rental yield after expenses, percent, where modelled.
    pub net_yield: Option<f64>,
}

/// Fallback tuple served for unresolvable market keys.
pub const DEFAULT_BASELINE: MarketBaseline = MarketBaseline {
    market: "Unmapped Market",
    latitude: 39.8283,
    longitude: -98.5795,
    median_home_price: 400_000.0,
    appreciation_rate: 6.0,
    market_strength: 7.0,
    volatility: 0.15,
    inventory_level: 3.5,
    employment_rate: 95.0,
    rental_yield: 6.0,
    walkability: 45.0,
    affordability_index: 55.0,
    crime_index: 40.0,
    vacancy_rate: 0.06,
    rent_growth: 3.5,
    investor_interest: 50.0,
    population: 350_000,
    future_value: None,
    climate_risk: None,
    net_yield: None,
};

const MARKETS: &[(&str, &str, MarketBaseline)] = &[
    (
        "austin",
        "tx",
        MarketBaseline {
            market: "Austin, TX",
            latitude: 30.2672,
            longitude: -97.7431,
            median_home_price: 485_000.0,
            appreciation_rate: 6.5,
            market_strength: 8.0,
            volatility: 0.12,
            inventory_level: 2.8,
            employment_rate: 96.4,
            rental_yield: 6.8,
            walkability: 42.0,
            affordability_index: 48.0,
            crime_index: 38.0,
            vacancy_rate: 0.055,
            rent_growth: 5.2,
            investor_interest: 78.0,
            population: 974_000,
            future_value: Some(72.0),
            climate_risk: Some(34.0),
            net_yield: Some(5.4),
        },
    ),
    (
        "phoenix",
        "az",
        MarketBaseline {
            market: "Phoenix, AZ",
            latitude: 33.4484,
            longitude: -112.074,
            median_home_price: 445_000.0,
            appreciation_rate: 7.2,
            market_strength: 7.0,
            volatility: 0.18,
            inventory_level: 3.1,
            employment_rate: 95.8,
            rental_yield: 7.1,
            walkability: 41.0,
            affordability_index: 52.0,
            crime_index: 46.0,
            vacancy_rate: 0.062,
            rent_growth: 4.8,
            investor_interest: 74.0,
            population: 1_650_000,
            future_value: Some(66.0),
            climate_risk: Some(58.0),
            net_yield: Some(5.7),
        },
    ),
    (
        "miami",
        "fl",
        MarketBaseline {
            market: "Miami, FL",
            latitude: 25.7617,
            longitude: -80.1918,
            median_home_price: 560_000.0,
            appreciation_rate: 8.1,
            market_strength: 8.0,
            volatility: 0.21,
            inventory_level: 3.9,
            employment_rate: 94.9,
            rental_yield: 6.2,
            walkability: 77.0,
            affordability_index: 35.0,
            crime_index: 49.0,
            vacancy_rate: 0.071,
            rent_growth: 6.4,
            investor_interest: 83.0,
            population: 442_000,
            future_value: Some(64.0),
            climate_risk: Some(72.0),
            net_yield: Some(4.8),
        },
    ),
    (
        "tampa",
        "fl",
        MarketBaseline {
            market: "Tampa, FL",
            latitude: 27.9506,
            longitude: -82.4572,
            median_home_price: 389_000.0,
            appreciation_rate: 7.8,
            market_strength: 7.0,
            volatility: 0.17,
            inventory_level: 2.9,
            employment_rate: 95.6,
            rental_yield: 7.4,
            walkability: 50.0,
            affordability_index: 54.0,
            crime_index: 43.0,
            vacancy_rate: 0.058,
            rent_growth: 5.9,
            investor_interest: 76.0,
            population: 398_000,
            future_value: Some(68.0),
            climate_risk: Some(66.0),
            net_yield: Some(5.9),
        },
    ),
    (
        "nashville",
        "tn",
        MarketBaseline {
            market: "Nashville, TN",
            latitude: 36.1627,
            longitude: -86.7816,
            median_home_price: 460_000.0,
            appreciation_rate: 6.9,
            market_strength: 8.0,
            volatility: 0.13,
            inventory_level: 2.6,
            employment_rate: 96.7,
            rental_yield: 6.6,
            walkability: 29.0,
            affordability_index: 49.0,
            crime_index: 47.0,
            vacancy_rate: 0.052,
            rent_growth: 4.6,
            investor_interest: 72.0,
            population: 689_000,
            future_value: Some(70.0),
            climate_risk: Some(38.0),
            net_yield: Some(5.2),
        },
    ),
    (
        "denver",
        "co",
        MarketBaseline {
            market: "Denver, CO",
            latitude: 39.7392,
            longitude: -104.9903,
            median_home_price: 585_000.0,
            appreciation_rate: 5.4,
            market_strength: 7.0,
            volatility: 0.14,
            inventory_level: 3.4,
            employment_rate: 96.2,
            rental_yield: 5.6,
            walkability: 61.0,
            affordability_index: 41.0,
            crime_index: 45.0,
            vacancy_rate: 0.054,
            rent_growth: 3.8,
            investor_interest: 64.0,
            population: 715_000,
            future_value: Some(62.0),
            climate_risk: Some(31.0),
            net_yield: Some(4.5),
        },
    ),
    (
        "raleigh",
        "nc",
        MarketBaseline {
            market: "Raleigh, NC",
            latitude: 35.7796,
            longitude: -78.6382,
            median_home_price: 420_000.0,
            appreciation_rate: 6.7,
            market_strength: 8.0,
            volatility: 0.11,
            inventory_level: 2.5,
            employment_rate: 96.9,
            rental_yield: 6.4,
            walkability: 31.0,
            affordability_index: 56.0,
            crime_index: 33.0,
            vacancy_rate: 0.048,
            rent_growth: 4.4,
            investor_interest: 69.0,
            population: 468_000,
            future_value: Some(71.0),
            climate_risk: Some(36.0),
            net_yield: Some(5.3),
        },
    ),
    (
        "boise",
        "id",
        MarketBaseline {
            market: "Boise, ID",
            latitude: 43.615,
            longitude: -116.2023,
            median_home_price: 465_000.0,
            appreciation_rate: 5.8,
            market_strength: 6.0,
            volatility: 0.22,
            inventory_level: 3.8,
            employment_rate: 96.1,
            rental_yield: 5.9,
            walkability: 38.0,
            affordability_index: 44.0,
            crime_index: 27.0,
            vacancy_rate: 0.05,
            rent_growth: 3.1,
            investor_interest: 58.0,
            population: 235_000,
            future_value: Some(57.0),
            climate_risk: Some(29.0),
            net_yield: Some(4.7),
        },
    ),
    (
        "atlanta",
        "ga",
        MarketBaseline {
            market: "Atlanta, GA",
            latitude: 33.749,
            longitude: -84.388,
            median_home_price: 398_000.0,
            appreciation_rate: 7.0,
            market_strength: 7.0,
            volatility: 0.16,
            inventory_level: 3.0,
            employment_rate: 95.4,
            rental_yield: 7.6,
            walkability: 48.0,
            affordability_index: 53.0,
            crime_index: 52.0,
            vacancy_rate: 0.066,
            rent_growth: 5.1,
            investor_interest: 81.0,
            population: 499_000,
            future_value: Some(67.0),
            climate_risk: Some(41.0),
            net_yield: Some(6.1),
        },
    ),
    (
        "charlotte",
        "nc",
        MarketBaseline {
            market: "Charlotte, NC",
            latitude: 35.2271,
            longitude: -80.8431,
            median_home_price: 405_000.0,
            appreciation_rate: 6.6,
            market_strength: 7.0,
            volatility: 0.13,
            inventory_level: 2.7,
            employment_rate: 96.0,
            rental_yield: 6.9,
            walkability: 26.0,
            affordability_index: 55.0,
            crime_index: 44.0,
            vacancy_rate: 0.057,
            rent_growth: 4.9,
            investor_interest: 73.0,
            population: 874_000,
            future_value: Some(69.0),
            climate_risk: Some(35.0),
            net_yield: Some(5.6),
        },
    ),
    (
        "seattle",
        "wa",
        MarketBaseline {
            market: "Seattle, WA",
            latitude: 47.6062,
            longitude: -122.3321,
            median_home_price: 820_000.0,
            appreciation_rate: 4.9,
            market_strength: 8.0,
            volatility: 0.15,
            inventory_level: 2.2,
            employment_rate: 96.6,
            rental_yield: 4.8,
            walkability: 74.0,
            affordability_index: 28.0,
            crime_index: 48.0,
            vacancy_rate: 0.043,
            rent_growth: 3.6,
            investor_interest: 61.0,
            population: 737_000,
            future_value: Some(65.0),
            climate_risk: Some(26.0),
            net_yield: Some(3.9),
        },
    ),
    (
        "san francisco",
        "ca",
        MarketBaseline {
            market: "San Francisco, CA",
            latitude: 37.7749,
            longitude: -122.4194,
            median_home_price: 1_250_000.0,
            appreciation_rate: 3.8,
            market_strength: 7.0,
            volatility: 0.19,
            inventory_level: 3.6,
            employment_rate: 95.9,
            rental_yield: 3.9,
            walkability: 89.0,
            affordability_index: 14.0,
            crime_index: 56.0,
            vacancy_rate: 0.061,
            rent_growth: 2.4,
            investor_interest: 54.0,
            population: 808_000,
            future_value: Some(58.0),
            climate_risk: Some(44.0),
            net_yield: Some(3.1),
        },
    ),
];

/// Resolve a city/state pair to its baseline metrics.
///
/// Matching is case and whitespace insensitive and ignores anything
/// after the first comma, so "Austin, TX" and " austin " both hit the
/// same row. Unknown keys resolve to [`DEFAULT_BASELINE`]; this lookup
/// never fails.
pub fn resolve(city: &str, state: &str) -> MarketBaseline {
    let city_key = normalize_key(city);
    let state_key = normalize_key(state);

    MARKETS
        .iter()
        .find(|(known_city, known_state, _)| {
            *known_city == city_key && (state_key.is_empty() || *known_state == state_key)
        })
        .map(|(_, _, baseline)| *baseline)
        .unwrap_or(DEFAULT_BASELINE)
}

pub fn normalize_key(raw: &str) -> String {
    raw.split(',')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase()
}

//! Deterministic fallback generator invoked when the live-record
//! supply runs dry. Every field derives from the baseline plus the
//! offset index, so repeated calls with the same arguments reproduce
//! the same records exactly.

use super::baseline::{MarketBaseline, DEFAULT_BASELINE};
use super::listing::{ListingRecord, PropertyType, RecordSource};

/// Synthetic predictions never report confidence above this ceiling.
pub const SYNTHETIC_CONFIDENCE_CEILING: f64 = 85.0;

const STREET_NAMES: &[&str] = &[
    "Oakmont", "Cedar Ridge", "Juniper", "Willow Bend", "Lakeview", "Summit", "Magnolia",
    "Copperfield", "Brookhollow", "Sagebrush", "Pecan Grove", "Hillcrest",
];

const STREET_SUFFIXES: &[&str] = &["St", "Ave", "Dr", "Ln", "Ct"];

const PROPERTY_TYPES: [PropertyType; 4] = [
    PropertyType::SingleFamily,
    PropertyType::Condo,
    PropertyType::Townhouse,
    PropertyType::MultiFamily,
];

/// Generate `count` synthetic records around a market baseline.
///
/// A baseline with a non-positive median price is replaced by the
/// global default before generation, so this never fails and never
/// emits degenerate prices. Coordinate jitter comes from sin/cos of
/// the offset index plus a modulo term; bounded variations come from a
/// hash of the index. No RNG is involved anywhere.
pub fn generate(
    baseline: &MarketBaseline,
    city: &str,
    state: &str,
    count: usize,
    offset_start: usize,
) -> Vec<ListingRecord> {
    let baseline = if baseline.median_home_price > 0.0 {
        *baseline
    } else {
        DEFAULT_BASELINE
    };

    (0..count)
        .map(|slot| {
            let index = offset_start + slot;
            let latitude =
                baseline.latitude + (index as f64).sin() * 0.05 + (index % 7) as f64 * 0.0013;
            let longitude =
                baseline.longitude + (index as f64).cos() * 0.05 + (index % 11) as f64 * 0.0009;

            // Price within [0.7x, 1.3x] of the median; size within
            // [1100, 3200] sqft.
            let price = (baseline.median_home_price * (0.7 + 0.6 * unit_hash(index, 1.0))).round();
            let square_feet = 1_100 + (unit_hash(index, 2.0) * 2_100.0) as u32;

            ListingRecord {
                address: format!(
                    "{} {} {}",
                    100 + (index * 37) % 9_800,
                    STREET_NAMES[index % STREET_NAMES.len()],
                    STREET_SUFFIXES[index % STREET_SUFFIXES.len()],
                ),
                city: city.to_string(),
                state: state.to_string(),
                latitude,
                longitude,
                price,
                square_feet,
                bedrooms: 2 + (index % 4) as u8,
                bathrooms: 1.0 + (index % 3) as f32 * 0.5,
                year_built: 1_955 + ((index * 7) % 70) as u16,
                property_type: PROPERTY_TYPES[index % PROPERTY_TYPES.len()],
                source: RecordSource::Synthetic,
            }
        })
        .collect()
}

/// Deterministic pseudo-uniform in [0, 1) from an index and salt.
fn unit_hash(index: usize, salt: f64) -> f64 {
    let x = (index as f64 + 1.0) * 12.9898 + salt * 78.233;
    (x.sin() * 43_758.5453).fract().abs()
}

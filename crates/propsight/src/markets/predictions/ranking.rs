use crate::markets::listing::PropertyPrediction;
use crate::markets::normalize::round2;
use serde::{Deserialize, Serialize};

/// Result-count ceiling for any selection.
pub const MAX_LIMIT: usize = 500;

/// Substituted for absent, invalid, or non-positive limits.
pub const DEFAULT_LIMIT: usize = 100;

/// Confidence bar a prediction must clear to count as high-confidence
/// in the aggregate stats.
pub const HIGH_CONFIDENCE_THRESHOLD: f64 = 80.0;

/// Numeric key the selection sorts by, descending.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortKey {
    #[default]
    Appreciation,
    /// Appreciation discounted by confidence.
    Relevance,
    /// Appreciation net of a risk haircut.
    FutureScore,
}

impl SortKey {
    fn value(self, prediction: &PropertyPrediction) -> f64 {
        match self {
            SortKey::Appreciation => prediction.appreciation,
            SortKey::Relevance => prediction.appreciation * prediction.confidence / 100.0,
            SortKey::FutureScore => prediction.appreciation - prediction.risk_score / 10.0,
        }
    }
}

/// Aggregates computed over the full candidate set before truncation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SelectionStats {
    pub total_count: usize,
    pub mean_appreciation: f64,
    pub high_confidence_count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Selection {
    pub items: Vec<PropertyPrediction>,
    pub stats: SelectionStats,
}

/// Normalize a requested limit onto [1, MAX_LIMIT], substituting the
/// default for absent or non-positive input.
pub fn clamp_limit(requested: Option<i64>) -> usize {
    match requested {
        Some(limit) if limit > 0 => (limit as usize).min(MAX_LIMIT),
        _ => DEFAULT_LIMIT,
    }
}

/// Sort candidates descending by the requested key and keep the top
/// `limit`.
///
/// Ties preserve input order (the sort is stable), and the stats cover
/// the full candidate set, not the truncated slice.
pub fn select(
    mut candidates: Vec<PropertyPrediction>,
    limit: Option<i64>,
    sort: SortKey,
) -> Selection {
    let total_count = candidates.len();
    let mean_appreciation = if total_count == 0 {
        0.0
    } else {
        round2(
            candidates
                .iter()
                .map(|prediction| prediction.appreciation)
                .sum::<f64>()
                / total_count as f64,
        )
    };
    let high_confidence_count = candidates
        .iter()
        .filter(|prediction| prediction.confidence > HIGH_CONFIDENCE_THRESHOLD)
        .count();

    candidates.sort_by(|a, b| {
        sort.value(b)
            .partial_cmp(&sort.value(a))
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    candidates.truncate(clamp_limit(limit));

    Selection {
        items: candidates,
        stats: SelectionStats {
            total_count,
            mean_appreciation,
            high_confidence_count,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::markets::listing::{ListingRecord, PropertyType, RecordSource};

    fn prediction(address: &str, appreciation: f64, confidence: f64) -> PropertyPrediction {
        PropertyPrediction {
            listing: ListingRecord {
                address: address.to_string(),
                city: "Austin".to_string(),
                state: "TX".to_string(),
                latitude: 30.27,
                longitude: -97.74,
                price: 400_000.0,
                square_feet: 1_700,
                bedrooms: 3,
                bathrooms: 2.0,
                year_built: 2000,
                property_type: PropertyType::SingleFamily,
                source: RecordSource::Live,
            },
            appreciation,
            confidence,
            risk_score: 30.0,
            price_per_sqft: 235.29,
        }
    }

    #[test]
    fn limit_defaults_and_clamps() {
        assert_eq!(clamp_limit(None), 100);
        assert_eq!(clamp_limit(Some(0)), 100);
        assert_eq!(clamp_limit(Some(-4)), 100);
        assert_eq!(clamp_limit(Some(25)), 25);
        assert_eq!(clamp_limit(Some(9_000)), 500);
    }

    #[test]
    fn selection_sorts_descending_and_truncates() {
        let candidates = vec![
            prediction("a", 4.0, 85.0),
            prediction("b", 9.0, 70.0),
            prediction("c", 6.0, 90.0),
        ];
        let selection = select(candidates, Some(2), SortKey::Appreciation);
        assert_eq!(selection.items.len(), 2);
        assert_eq!(selection.items[0].listing.address, "b");
        assert_eq!(selection.items[1].listing.address, "c");
    }

    #[test]
    fn ties_preserve_input_order() {
        let candidates = vec![
            prediction("first", 5.0, 80.0),
            prediction("second", 5.0, 80.0),
            prediction("third", 5.0, 80.0),
        ];
        let selection = select(candidates, None, SortKey::Appreciation);
        let order: Vec<_> = selection
            .items
            .iter()
            .map(|prediction| prediction.listing.address.as_str())
            .collect();
        assert_eq!(order, vec!["first", "second", "third"]);
    }

    #[test]
    fn stats_cover_the_full_set_before_truncation() {
        let candidates: Vec<_> = (0..8)
            .map(|index| prediction(&format!("p{index}"), index as f64, 82.0))
            .collect();
        let selection = select(candidates, Some(3), SortKey::Appreciation);

        assert_eq!(selection.items.len(), 3);
        assert_eq!(selection.stats.total_count, 8);
        assert_eq!(selection.stats.mean_appreciation, 3.5);
        assert_eq!(selection.stats.high_confidence_count, 8);
    }

    #[test]
    fn relevance_key_discounts_low_confidence() {
        let candidates = vec![
            prediction("confident", 6.0, 90.0),
            prediction("shaky", 7.0, 60.0),
        ];
        // 6.0 * 0.9 = 5.4 beats 7.0 * 0.6 = 4.2.
        let selection = select(candidates, None, SortKey::Relevance);
        assert_eq!(selection.items[0].listing.address, "confident");
    }

    #[test]
    fn empty_candidate_set_produces_zeroed_stats() {
        let selection = select(Vec::new(), Some(10), SortKey::Appreciation);
        assert!(selection.items.is_empty());
        assert_eq!(selection.stats.total_count, 0);
        assert_eq!(selection.stats.mean_appreciation, 0.0);
    }
}

use serde::{Deserialize, Serialize};

/// One construction/development permit feeding the market scores.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PermitRecord {
    pub reference: String,
    pub category: PermitCategory,
    pub status: PermitStatus,
    /// Declared project valuation in dollars.
    pub valuation: f64,
    /// Modelled neighborhood impact, 0-100.
    pub impact_score: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PermitCategory {
    Residential,
    Luxury,
    Commercial,
    Transit,
    Infrastructure,
}

impl PermitCategory {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Residential => "Residential",
            Self::Luxury => "Luxury",
            Self::Commercial => "Commercial",
            Self::Transit => "Transit",
            Self::Infrastructure => "Infrastructure",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PermitStatus {
    Applied,
    Approved,
    UnderConstruction,
    Completed,
    Rejected,
}

impl PermitStatus {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Applied => "Applied",
            Self::Approved => "Approved",
            Self::UnderConstruction => "Under Construction",
            Self::Completed => "Completed",
            Self::Rejected => "Rejected",
        }
    }

    /// Statuses counting toward the approval ratio.
    pub const fn counts_as_approved(self) -> bool {
        matches!(
            self,
            Self::Approved | Self::UnderConstruction | Self::Completed
        )
    }

    /// Approved or breaking ground; the boost-eligible window.
    pub const fn is_active_build(self) -> bool {
        matches!(self, Self::Approved | Self::UnderConstruction)
    }
}

/// Rental-market snapshot supplied alongside permits. Absent fields
/// fall back to the baseline figures for the same market.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RentalMarketSummary {
    pub average_rent: f64,
    /// Year-over-year rent growth, percent.
    pub rent_growth: f64,
    /// Fraction of rental stock currently vacant.
    pub vacancy_rate: f64,
    /// Investor purchase interest, 0-100.
    pub investor_interest: f64,
    /// Net rental yield after expenses, percent.
    pub net_yield: Option<f64>,
}

/// Valuation above which a permit counts as high-value for the
/// gentrification ratio.
pub(crate) const HIGH_VALUE_PERMIT_CUTOFF: f64 = 1_000_000.0;

/// Aggregate view over a permit set; `None` for an empty set so each
/// formula can apply its documented empty-case behavior.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct PermitProfile {
    pub(crate) total: usize,
    pub(crate) approved: usize,
    pub(crate) rejected: usize,
    pub(crate) avg_impact: f64,
    pub(crate) avg_valuation: f64,
    pub(crate) luxury_ratio: f64,
    pub(crate) high_value_ratio: f64,
    pub(crate) transit_active: usize,
    pub(crate) infrastructure_active: usize,
    pub(crate) transit_under_construction: usize,
    pub(crate) high_impact: usize,
}

impl PermitProfile {
    pub(crate) fn from_permits(permits: &[PermitRecord]) -> Option<Self> {
        if permits.is_empty() {
            return None;
        }

        let total = permits.len();
        let approved = permits
            .iter()
            .filter(|permit| permit.status.counts_as_approved())
            .count();
        let rejected = permits
            .iter()
            .filter(|permit| permit.status == PermitStatus::Rejected)
            .count();
        let avg_impact =
            permits.iter().map(|permit| permit.impact_score).sum::<f64>() / total as f64;
        let avg_valuation =
            permits.iter().map(|permit| permit.valuation).sum::<f64>() / total as f64;
        let luxury = permits
            .iter()
            .filter(|permit| permit.category == PermitCategory::Luxury)
            .count();
        let high_value = permits
            .iter()
            .filter(|permit| permit.valuation > HIGH_VALUE_PERMIT_CUTOFF)
            .count();
        let transit_active = permits
            .iter()
            .filter(|permit| {
                permit.category == PermitCategory::Transit && permit.status.is_active_build()
            })
            .count();
        let infrastructure_active = permits
            .iter()
            .filter(|permit| {
                permit.category == PermitCategory::Infrastructure && permit.status.is_active_build()
            })
            .count();
        let transit_under_construction = permits
            .iter()
            .filter(|permit| {
                permit.category == PermitCategory::Transit
                    && permit.status == PermitStatus::UnderConstruction
            })
            .count();
        let high_impact = permits
            .iter()
            .filter(|permit| permit.impact_score > 70.0)
            .count();

        Some(Self {
            total,
            approved,
            rejected,
            avg_impact,
            avg_valuation,
            luxury_ratio: luxury as f64 / total as f64,
            high_value_ratio: high_value as f64 / total as f64,
            transit_active,
            infrastructure_active,
            transit_under_construction,
            high_impact,
        })
    }

    pub(crate) fn approval_ratio(&self) -> f64 {
        self.approved as f64 / self.total as f64
    }

    pub(crate) fn rejection_ratio(&self) -> f64 {
        self.rejected as f64 / self.total as f64
    }
}


#[cfg(test)]
mod tests {
    use super::test_support::permit;
    use super::*;

    #[test]
    fn empty_permit_set_yields_no_profile() {
        assert!(PermitProfile::from_permits(&[]).is_none());
    }

    #[test]
    fn profile_aggregates_categories_and_statuses() {
        let permits = vec![
            permit(
                PermitCategory::Luxury,
                PermitStatus::Approved,
                2_400_000.0,
                82.0,
            ),
            permit(
                PermitCategory::Transit,
                PermitStatus::UnderConstruction,
                900_000.0,
                74.0,
            ),
            permit(
                PermitCategory::Residential,
                PermitStatus::Rejected,
                300_000.0,
                40.0,
            ),
            permit(
                PermitCategory::Infrastructure,
                PermitStatus::Applied,
                1_500_000.0,
                60.0,
            ),
        ];

        let profile = PermitProfile::from_permits(&permits).expect("profile");
        assert_eq!(profile.total, 4);
        assert_eq!(profile.approved, 2);
        assert_eq!(profile.rejected, 1);
        assert_eq!(profile.transit_active, 1);
        assert_eq!(profile.transit_under_construction, 1);
        assert_eq!(profile.infrastructure_active, 0);
        assert_eq!(profile.high_impact, 2);
        assert_eq!(profile.luxury_ratio, 0.25);
        assert_eq!(profile.high_value_ratio, 0.5);
        assert_eq!(profile.approval_ratio(), 0.5);
        assert_eq!(profile.rejection_ratio(), 0.25);
        assert_eq!(profile.avg_impact, 64.0);
        assert_eq!(profile.avg_valuation, 1_275_000.0);
    }
}

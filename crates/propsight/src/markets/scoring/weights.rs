use serde::{Deserialize, Serialize};

/// Weight vector for the Investment Score factors.
///
/// Contributions are clamped to [0, 100] before weighting and summed,
/// never averaged, so the vector must sum to 1.0 for the pre-adjustment
/// score to land on the 0-100 scale.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct InvestmentWeights {
    pub appreciation: f64,
    pub rental_yield: f64,
    pub employment: f64,
    pub permit_volume: f64,
    pub walkability: f64,
    pub affordability: f64,
    pub future_value: f64,
    pub climate_resilience: f64,
}

impl Default for InvestmentWeights {
    fn default() -> Self {
        Self {
            appreciation: 0.20,
            rental_yield: 0.20,
            employment: 0.15,
            permit_volume: 0.15,
            walkability: 0.10,
            affordability: 0.10,
            future_value: 0.05,
            climate_resilience: 0.05,
        }
    }
}

impl InvestmentWeights {
    /// True when the weights sum to ~1.0.
    pub fn validate(&self) -> bool {
        let sum = self.appreciation
            + self.rental_yield
            + self.employment
            + self.permit_volume
            + self.walkability
            + self.affordability
            + self.future_value
            + self.climate_resilience;
        (sum - 1.0).abs() < 1e-6
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_weights_sum_to_one() {
        assert!(InvestmentWeights::default().validate());
    }

    #[test]
    fn skewed_weights_fail_validation() {
        let mut weights = InvestmentWeights::default();
        weights.appreciation = 0.5;
        assert!(!weights.validate());
    }
}

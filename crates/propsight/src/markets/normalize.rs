//! Maps raw metrics (percentages, counts, indexes) onto the shared
//! 0-100 score scale before weighting.

/// Rule for mapping a raw metric onto the 0-100 scale.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Transform {
    /// The metric is already on the 0-100 scale.
    Identity,
    /// Multiply by a linear factor before clamping.
    Scale(f64),
    /// Reward employment above the 85% floor: `max(0, (rate - 85) * 6.67)`.
    EmploymentExcess,
}

/// Clamp a score onto the canonical [0, 100] interval.
pub fn clamp_score(value: f64) -> f64 {
    value.clamp(0.0, 100.0)
}

/// Round to two decimals, the precision every reported figure carries.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Apply a transform and clamp the result onto [0, 100].
pub fn apply(value: f64, transform: Transform) -> f64 {
    let mapped = match transform {
        Transform::Identity => value,
        Transform::Scale(factor) => value * factor,
        Transform::EmploymentExcess => ((value - 85.0) * 6.67).max(0.0),
    };
    clamp_score(mapped)
}

/// Weighted contribution of one sub-metric to a composite score.
///
/// The raw value is normalized and clamped *before* the weight is
/// applied; an absent metric contributes zero rather than failing, so
/// composites degrade instead of erroring.
pub fn contribution(value: Option<f64>, weight: f64, transform: Transform) -> f64 {
    match value {
        Some(raw) => apply(raw, transform) * weight,
        None => 0.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identity_clamps_extremes() {
        assert_eq!(apply(-12.0, Transform::Identity), 0.0);
        assert_eq!(apply(55.0, Transform::Identity), 55.0);
        assert_eq!(apply(250.0, Transform::Identity), 100.0);
    }

    #[test]
    fn scale_maps_rates_onto_score_range() {
        assert_eq!(apply(6.5, Transform::Scale(5.0)), 32.5);
        assert_eq!(apply(40.0, Transform::Scale(5.0)), 100.0);
    }

    #[test]
    fn employment_excess_rewards_above_floor_only() {
        assert_eq!(apply(82.0, Transform::EmploymentExcess), 0.0);
        assert_eq!(apply(85.0, Transform::EmploymentExcess), 0.0);
        let strong = apply(96.0, Transform::EmploymentExcess);
        assert!((strong - 73.37).abs() < 0.01);
        assert_eq!(apply(100.0, Transform::EmploymentExcess), 100.0);
    }

    #[test]
    fn missing_metric_contributes_zero() {
        assert_eq!(contribution(None, 0.2, Transform::Identity), 0.0);
        assert_eq!(contribution(Some(50.0), 0.2, Transform::Identity), 10.0);
    }

    #[test]
    fn contribution_clamps_before_weighting() {
        // 300 clamps to 100 first, then 0.1 weight applies.
        assert_eq!(contribution(Some(300.0), 0.1, Transform::Identity), 10.0);
    }

    #[test]
    fn round2_reports_two_decimals() {
        assert_eq!(round2(8.4567), 8.46);
        assert_eq!(round2(5.0), 5.0);
    }
}

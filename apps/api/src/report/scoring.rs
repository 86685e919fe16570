//! Axis score normalization and polarity labels.

use crate::models::personality::AxisScores;

/// Half-range of a raw axis score: 5 questions × ±3 points.
pub const MAX_AXIS_SCORE: f64 = 15.0;

/// Polarity labels per axis, low side first. A percentage below 50 selects
/// the first label, 50 and above the second.
pub const TIME_HORIZON_LABELS: [&str; 2] = ["Short-Term", "Long-Term"];
pub const RISK_TOLERANCE_LABELS: [&str; 2] = ["High Risk", "Low Risk"];
pub const COMPLEXITY_LABELS: [&str; 2] = ["Clarity", "Complex"];
pub const CONSISTENCY_LABELS: [&str; 2] = ["Consistent Yield", "Lump Sum"];

/// The four normalized axis percentages for one request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AxisPercentages {
    pub time_horizon: i64,
    pub risk_tolerance: i64,
    pub complexity: i64,
    pub consistency: i64,
}

impl AxisPercentages {
    pub fn from_scores(scores: &AxisScores) -> Self {
        Self {
            time_horizon: normalize_axis(scores.short_term_vs_long_term),
            risk_tolerance: normalize_axis(scores.high_risk_vs_low_risk),
            complexity: normalize_axis(scores.clarity_vs_complexity),
            consistency: normalize_axis(scores.consistent_vs_lump_sum),
        }
    }
}

/// Maps a raw axis value to a percentage: `round(((v + 15) / 30) * 100)`.
///
/// No clamping — a value outside ±15 produces a percentage outside [0, 100].
/// Callers upstream own the bound; this transform stays linear.
pub fn normalize_axis(value: f64) -> i64 {
    (((value + MAX_AXIS_SCORE) / (MAX_AXIS_SCORE * 2.0)) * 100.0).round() as i64
}

/// Picks the dominant polarity label for a percentage.
/// Exactly 50 resolves to the second (high-side) label.
pub fn dominant_label(pct: i64, labels: [&'static str; 2]) -> &'static str {
    if pct < 50 {
        labels[0]
    } else {
        labels[1]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_axis_endpoints() {
        assert_eq!(normalize_axis(-15.0), 0);
        assert_eq!(normalize_axis(0.0), 50);
        assert_eq!(normalize_axis(15.0), 100);
    }

    #[test]
    fn test_normalize_axis_rounds_to_nearest() {
        // (7 + 15) / 30 * 100 = 73.33 -> 73
        assert_eq!(normalize_axis(7.0), 73);
        // (-4 + 15) / 30 * 100 = 36.67 -> 37
        assert_eq!(normalize_axis(-4.0), 37);
    }

    #[test]
    fn test_normalize_axis_in_range_stays_in_percent_bounds() {
        for v in -15..=15 {
            let pct = normalize_axis(v as f64);
            assert!((0..=100).contains(&pct), "v={v} gave pct={pct}");
        }
    }

    #[test]
    fn test_normalize_axis_does_not_clamp_out_of_range_input() {
        assert_eq!(normalize_axis(20.0), 117);
        assert_eq!(normalize_axis(-20.0), -17);
    }

    #[test]
    fn test_dominant_label_threshold() {
        assert_eq!(dominant_label(49, TIME_HORIZON_LABELS), "Short-Term");
        assert_eq!(dominant_label(50, TIME_HORIZON_LABELS), "Long-Term");
        assert_eq!(dominant_label(51, TIME_HORIZON_LABELS), "Long-Term");
    }

    #[test]
    fn test_dominant_label_boundary_for_every_axis() {
        assert_eq!(dominant_label(50, RISK_TOLERANCE_LABELS), "Low Risk");
        assert_eq!(dominant_label(50, COMPLEXITY_LABELS), "Complex");
        assert_eq!(dominant_label(50, CONSISTENCY_LABELS), "Lump Sum");
    }

    #[test]
    fn test_from_scores_maps_each_axis() {
        let scores = AxisScores {
            short_term_vs_long_term: -15.0,
            high_risk_vs_low_risk: 0.0,
            clarity_vs_complexity: 15.0,
            consistent_vs_lump_sum: 7.0,
        };
        let pcts = AxisPercentages::from_scores(&scores);
        assert_eq!(pcts.time_horizon, 0);
        assert_eq!(pcts.risk_tolerance, 50);
        assert_eq!(pcts.complexity, 100);
        assert_eq!(pcts.consistency, 73);
    }
}

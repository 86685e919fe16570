//! Caller-supplied personality entities. Both arrive pre-computed from the
//! quiz frontend; nothing here is derived locally.

use serde::{Deserialize, Serialize};

/// A personality type as determined upstream (short categorical code plus
/// display metadata). Passed through verbatim into prompts and stored
/// records.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersonalityProfile {
    pub code: String,
    pub name: String,
    pub description: String,
    #[serde(default = "default_color")]
    pub color: String,
}

fn default_color() -> String {
    "#6366f1".to_string()
}

/// Raw scores for the four personality axes, nominally bounded to
/// ±15 (5 questions × ±3 points). The bound is not enforced here.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AxisScores {
    pub short_term_vs_long_term: f64,
    pub high_risk_vs_low_risk: f64,
    pub clarity_vs_complexity: f64,
    pub consistent_vs_lump_sum: f64,
}

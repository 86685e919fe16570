//! Report generation pipeline: normalize → prompt → model call → recovery.
//!
//! The pipeline never invents report content on its own; it either passes
//! model output through (stages 1 and 2) or synthesizes a deterministic
//! fallback (stage 3). Two degraded paths exist and stay distinct:
//! - no API key configured → immediate placeholder report, no call attempted;
//! - call failed → the error propagates to the handler boundary.

use serde_json::{json, Value};
use tracing::{info, warn};

use crate::llm_client::{GeminiClient, LlmError};
use crate::models::personality::{AxisScores, PersonalityProfile};
use crate::report::prompts::build_report_prompt;
use crate::report::scoring::{
    dominant_label, AxisPercentages, COMPLEXITY_LABELS, CONSISTENCY_LABELS,
    RISK_TOLERANCE_LABELS, TIME_HORIZON_LABELS,
};

/// Generates the investor report for one request.
///
/// Model output is returned exactly as it parses — no schema validation is
/// applied to stage-1/stage-2 results, so callers may receive shapes the
/// model got wrong. Only a failed `generate` call surfaces as an error.
pub async fn generate_report(
    llm: Option<&GeminiClient>,
    profile: &PersonalityProfile,
    scores: &AxisScores,
    role: &str,
) -> Result<Value, LlmError> {
    let pcts = AxisPercentages::from_scores(scores);

    let Some(llm) = llm else {
        warn!("Gemini API key not configured; returning placeholder report");
        return Ok(unavailable_report(&pcts));
    };

    let prompt = build_report_prompt(profile, &pcts, role);

    info!(code = %profile.code, role, "requesting investor report from model");
    let raw = llm.generate(&prompt).await?;
    info!("model responded with {} chars", raw.len());

    Ok(recover_report(&raw, &pcts))
}

/// Multi-stage JSON recovery over raw model text.
///
/// Stage 1: strict parse of the whole text.
/// Stage 2: strict parse of the slice between the first `{` and last `}`.
/// Stage 3: deterministic fallback carrying the raw text under `raw`.
pub fn recover_report(raw: &str, pcts: &AxisPercentages) -> Value {
    match serde_json::from_str::<Value>(raw) {
        Ok(parsed) => return parsed,
        Err(e) => warn!("strict parse of model output failed: {e}"),
    }

    if let (Some(first), Some(last)) = (raw.find('{'), raw.rfind('}')) {
        if first < last {
            match serde_json::from_str::<Value>(&raw[first..=last]) {
                Ok(parsed) => return parsed,
                Err(e) => warn!("parse of extracted JSON substring failed: {e}"),
            }
        }
    }

    warn!("all recovery stages failed; synthesizing fallback report");
    fallback_report(raw, pcts)
}

/// Stage-3 fallback: empty top-level lists, threshold-selected dominant
/// labels, and templated descriptions. Pure construction, cannot fail.
/// The raw model text rides along under `raw` for diagnosis.
pub fn fallback_report(raw: &str, pcts: &AxisPercentages) -> Value {
    json!({
        "strengths": [],
        "weaknesses": [],
        "strategies": [],
        "behaviors": [],
        "advisorTips": [],
        "dimensions": {
            "timeHorizon": {
                "dominantLabel": dominant_label(pcts.time_horizon, TIME_HORIZON_LABELS),
                "description": format!(
                    "Fallback: {}% toward long-term vs short-term preferences. \
                     Use this as a placeholder while the AI response is being debugged.",
                    pcts.time_horizon
                ),
            },
            "riskTolerance": {
                "dominantLabel": dominant_label(pcts.risk_tolerance, RISK_TOLERANCE_LABELS),
                "description": format!(
                    "Fallback: {}% toward conservative vs risky preferences.",
                    pcts.risk_tolerance
                ),
            },
            "complexity": {
                "dominantLabel": dominant_label(pcts.complexity, COMPLEXITY_LABELS),
                "description": format!(
                    "Fallback: {}% toward complexity vs clarity preferences.",
                    pcts.complexity
                ),
            },
            "consistency": {
                "dominantLabel": dominant_label(pcts.consistency, CONSISTENCY_LABELS),
                "description": format!(
                    "Fallback: {}% toward lump-sum vs consistent strategies.",
                    pcts.consistency
                ),
            },
        },
        "raw": raw,
    })
}

/// Static report returned when no Gemini key is configured. Shaped like a
/// generated report so clients render it unchanged; no model call is made.
pub fn unavailable_report(pcts: &AxisPercentages) -> Value {
    const PLACEHOLDER: &str = "Report generation is not configured on this server. \
         Set GEMINI_API_KEY to enable personalized insights.";

    json!({
        "strengths": [],
        "weaknesses": [],
        "strategies": [],
        "behaviors": [],
        "advisorTips": [],
        "dimensions": {
            "timeHorizon": {
                "dominantLabel": dominant_label(pcts.time_horizon, TIME_HORIZON_LABELS),
                "description": PLACEHOLDER,
            },
            "riskTolerance": {
                "dominantLabel": dominant_label(pcts.risk_tolerance, RISK_TOLERANCE_LABELS),
                "description": PLACEHOLDER,
            },
            "complexity": {
                "dominantLabel": dominant_label(pcts.complexity, COMPLEXITY_LABELS),
                "description": PLACEHOLDER,
            },
            "consistency": {
                "dominantLabel": dominant_label(pcts.consistency, CONSISTENCY_LABELS),
                "description": PLACEHOLDER,
            },
        },
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const DIMENSION_KEYS: [&str; 4] =
        ["timeHorizon", "riskTolerance", "complexity", "consistency"];

    fn mid_pcts() -> AxisPercentages {
        AxisPercentages {
            time_horizon: 50,
            risk_tolerance: 50,
            complexity: 50,
            consistency: 50,
        }
    }

    #[test]
    fn test_recovery_stage_one_returns_strict_json_verbatim() {
        let out = recover_report("{\"a\":1}", &mid_pcts());
        assert_eq!(out, json!({"a": 1}));
    }

    #[test]
    fn test_recovery_stage_two_extracts_embedded_object() {
        let out = recover_report("noise {\"a\":1} trailing", &mid_pcts());
        assert_eq!(out, json!({"a": 1}));
    }

    #[test]
    fn test_recovery_stage_three_fallback_on_braceless_text() {
        let out = recover_report("no braces here", &mid_pcts());
        let dims = out.get("dimensions").expect("fallback has dimensions");
        for key in DIMENSION_KEYS {
            assert!(dims.get(key).is_some(), "missing dimension {key}");
        }
        assert_eq!(out["raw"], "no braces here");
    }

    #[test]
    fn test_recovery_stage_two_requires_first_brace_before_last() {
        // Only a closing brace before an opening one: both stages fail.
        let out = recover_report("} {", &mid_pcts());
        assert!(out.get("raw").is_some());
    }

    #[test]
    fn test_recovery_falls_back_when_substring_still_invalid() {
        let out = recover_report("before {not json} after", &mid_pcts());
        assert_eq!(out["raw"], "before {not json} after");
        assert_eq!(out["strengths"], json!([]));
    }

    #[test]
    fn test_fallback_labels_follow_threshold() {
        let pcts = AxisPercentages {
            time_horizon: 49,
            risk_tolerance: 50,
            complexity: 0,
            consistency: 100,
        };
        let out = fallback_report("x", &pcts);
        let dims = &out["dimensions"];
        assert_eq!(dims["timeHorizon"]["dominantLabel"], "Short-Term");
        assert_eq!(dims["riskTolerance"]["dominantLabel"], "Low Risk");
        assert_eq!(dims["complexity"]["dominantLabel"], "Clarity");
        assert_eq!(dims["consistency"]["dominantLabel"], "Lump Sum");
    }

    #[test]
    fn test_fallback_description_interpolates_percentage() {
        let pcts = AxisPercentages {
            time_horizon: 73,
            risk_tolerance: 40,
            complexity: 50,
            consistency: 50,
        };
        let out = fallback_report("x", &pcts);
        let desc = out["dimensions"]["timeHorizon"]["description"]
            .as_str()
            .unwrap();
        assert!(desc.starts_with("Fallback: 73%"));
    }

    #[test]
    fn test_unavailable_report_has_exactly_four_dimensions_and_no_raw() {
        let out = unavailable_report(&mid_pcts());
        let dims = out["dimensions"].as_object().unwrap();
        assert_eq!(dims.len(), 4);
        for key in DIMENSION_KEYS {
            assert!(dims.contains_key(key));
        }
        assert!(out.get("raw").is_none());
    }

    #[tokio::test]
    async fn test_generate_report_without_client_skips_model_call() {
        let profile = PersonalityProfile {
            code: "SRCG".to_string(),
            name: "The Sprinter".to_string(),
            description: "Moves quickly.".to_string(),
            color: "#6366f1".to_string(),
        };
        let scores = AxisScores {
            short_term_vs_long_term: -15.0,
            high_risk_vs_low_risk: 0.0,
            clarity_vs_complexity: 15.0,
            consistent_vs_lump_sum: 3.0,
        };

        let report = generate_report(None, &profile, &scores, "investor")
            .await
            .expect("no-credential path never errors");

        let dims = report["dimensions"].as_object().unwrap();
        assert_eq!(dims.len(), 4);
        assert_eq!(dims["timeHorizon"]["dominantLabel"], "Short-Term");
        assert_eq!(dims["complexity"]["dominantLabel"], "Complex");
    }
}

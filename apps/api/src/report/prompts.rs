//! Prompt constants and rendering for the investor report.

use crate::models::personality::PersonalityProfile;
use crate::report::scoring::AxisPercentages;

/// Investor report prompt template. Placeholders are replaced by
/// [`build_report_prompt`]; the JSON schema block is part of the contract —
/// the recovery pipeline assumes the model intends to answer with a single
/// JSON object.
const REPORT_PROMPT_TEMPLATE: &str = r#"Generate a detailed investor personality report based on the following data.

### Personality Code
{code} — {name}

### Description
{description}

### Axis Percentages (0-100%):
- Time Horizon (Short → Long): {time_pct}%
- Risk Tolerance (Risky → Conservative): {risk_pct}%
- Complexity Preference (Simple → Complex): {complexity_pct}%
- Strategy Preference (Gradual → Lump Sum): {strategy_pct}%

### User Role
{role}

### REQUIREMENTS
Produce thoughtful, complete insights. Each "dimensions" entry MUST include:
- "dominantLabel": a clear interpretation of the score
- "description": 3-5 sentences explaining how this trait influences investing
- "strengths": 2-4 strengths specifically tied to that dimension
- "weaknesses": 2-4 weaknesses or vulnerabilities
- "blindSpots": 1-3 potential blind spots or risks caused by that dimension

Descriptions must be specific, behavioral, and investment-focused.

### REQUIRED JSON FORMAT (no markdown):

{
  "strengths": [],
  "weaknesses": [],
  "strategies": [],
  "behaviors": [],
  "advisorTips": [],
  "dimensions": {
    "timeHorizon": {
      "dominantLabel": "",
      "description": "",
      "strengths": [],
      "weaknesses": [],
      "blindSpots": []
    },
    "riskTolerance": {
      "dominantLabel": "",
      "description": "",
      "strengths": [],
      "weaknesses": [],
      "blindSpots": []
    },
    "complexity": {
      "dominantLabel": "",
      "description": "",
      "strengths": [],
      "weaknesses": [],
      "blindSpots": []
    },
    "consistency": {
      "dominantLabel": "",
      "description": "",
      "strengths": [],
      "weaknesses": [],
      "blindSpots": []
    }
  }
}

Return ONLY valid JSON — no notes, no extra text."#;

/// Renders the report prompt. Profile fields are interpolated verbatim:
/// prompt injection through profile text is accepted as out of scope.
pub fn build_report_prompt(
    profile: &PersonalityProfile,
    pcts: &AxisPercentages,
    role: &str,
) -> String {
    REPORT_PROMPT_TEMPLATE
        .replace("{code}", &profile.code)
        .replace("{name}", &profile.name)
        .replace("{description}", &profile.description)
        .replace("{time_pct}", &pcts.time_horizon.to_string())
        .replace("{risk_pct}", &pcts.risk_tolerance.to_string())
        .replace("{complexity_pct}", &pcts.complexity.to_string())
        .replace("{strategy_pct}", &pcts.consistency.to_string())
        .replace("{role}", role)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_profile() -> PersonalityProfile {
        PersonalityProfile {
            code: "LRCG".to_string(),
            name: "The Strategist".to_string(),
            description: "Patient and methodical.".to_string(),
            color: "#6366f1".to_string(),
        }
    }

    fn sample_pcts() -> AxisPercentages {
        AxisPercentages {
            time_horizon: 73,
            risk_tolerance: 40,
            complexity: 50,
            consistency: 0,
        }
    }

    #[test]
    fn test_prompt_interpolates_profile_verbatim() {
        let prompt = build_report_prompt(&sample_profile(), &sample_pcts(), "investor");
        assert!(prompt.contains("LRCG — The Strategist"));
        assert!(prompt.contains("Patient and methodical."));
        assert!(prompt.contains("investor"));
    }

    #[test]
    fn test_prompt_interpolates_all_four_percentages() {
        let prompt = build_report_prompt(&sample_profile(), &sample_pcts(), "advisor");
        assert!(prompt.contains("Time Horizon (Short → Long): 73%"));
        assert!(prompt.contains("Risk Tolerance (Risky → Conservative): 40%"));
        assert!(prompt.contains("Complexity Preference (Simple → Complex): 50%"));
        assert!(prompt.contains("Strategy Preference (Gradual → Lump Sum): 0%"));
    }

    #[test]
    fn test_prompt_contains_schema_with_all_dimension_keys() {
        let prompt = build_report_prompt(&sample_profile(), &sample_pcts(), "investor");
        for key in ["timeHorizon", "riskTolerance", "complexity", "consistency"] {
            assert!(prompt.contains(&format!("\"{key}\"")), "missing {key}");
        }
        assert!(prompt.contains("Return ONLY valid JSON"));
    }

    #[test]
    fn test_prompt_leaves_no_unreplaced_placeholders() {
        let prompt = build_report_prompt(&sample_profile(), &sample_pcts(), "investor");
        for placeholder in [
            "{code}",
            "{name}",
            "{description}",
            "{time_pct}",
            "{risk_pct}",
            "{complexity_pct}",
            "{strategy_pct}",
            "{role}",
        ] {
            assert!(!prompt.contains(placeholder), "unreplaced {placeholder}");
        }
    }
}

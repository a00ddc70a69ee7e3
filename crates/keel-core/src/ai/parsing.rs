//! Parsing the analysis provider's text payload
//!
//! Models are asked for strictly valid JSON but routinely wrap it in code
//! fences or pad it with prose. Parsing strips optional fences, locates
//! the JSON object by brace matching, and only then deserializes.

use crate::error::{Error, Result};
use crate::models::AnalysisResult;

/// Remove surrounding Markdown code-fence markup, if any.
pub fn strip_code_fences(text: &str) -> &str {
    let trimmed = text.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    // Drop the info string ("json", "JSON", ...) on the opening fence line
    let rest = match rest.find('\n') {
        Some(idx) => &rest[idx + 1..],
        None => rest,
    };
    rest.trim().strip_suffix("```").unwrap_or(rest).trim()
}

/// Parse a commentary object from the provider's text payload.
pub fn parse_analysis(response: &str) -> Result<AnalysisResult> {
    let response = strip_code_fences(response);

    let start = response.find('{');
    let end = response.rfind('}');

    match (start, end) {
        (Some(s), Some(e)) if s < e => {
            let json_str = &response[s..=e];
            serde_json::from_str(json_str).map_err(|e| {
                // Truncate long payloads for the error message
                let truncated = if json_str.len() > 200 {
                    format!("{}...", &json_str[..200])
                } else {
                    json_str.to_string()
                };
                Error::InvalidData(format!("Invalid analysis JSON: {} | Raw: {}", e, truncated))
            })
        }
        _ => Err(Error::InvalidData(format!(
            "No JSON found in analysis response | Raw: {}",
            if response.len() > 200 {
                format!("{}...", &response[..200])
            } else {
                response.to_string()
            }
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::InsightKind;

    const VALID: &str = r#"{
        "headline": "Solid month",
        "insights": [
            {"title": "Savings rate on target", "body": "You kept 24% of income.", "type": "celebrate"},
            {"title": "Credit creeping up", "body": "Balance is above your target.", "type": "warning"}
        ],
        "oneMove": "Shift 500 to the credit balance."
    }"#;

    #[test]
    fn test_parse_plain_json() {
        let result = parse_analysis(VALID).unwrap();
        assert_eq!(result.headline, "Solid month");
        assert_eq!(result.insights.len(), 2);
        assert_eq!(result.insights[0].kind, InsightKind::Celebrate);
        assert_eq!(result.insights[1].kind, InsightKind::Warning);
        assert_eq!(result.one_move, "Shift 500 to the credit balance.");
    }

    #[test]
    fn test_parse_fenced_json() {
        let fenced = format!("```json\n{}\n```", VALID);
        let result = parse_analysis(&fenced).unwrap();
        assert_eq!(result.headline, "Solid month");
    }

    #[test]
    fn test_parse_bare_fence() {
        let fenced = format!("```\n{}\n```", VALID);
        assert!(parse_analysis(&fenced).is_ok());
    }

    #[test]
    fn test_parse_with_surrounding_prose() {
        let padded = format!("Here is your commentary:\n{}\nHope that helps!", VALID);
        let result = parse_analysis(&padded).unwrap();
        assert_eq!(result.insights.len(), 2);
    }

    #[test]
    fn test_parse_non_json_fails() {
        let err = parse_analysis("I'd be happy to help, but I need more information.");
        assert!(err.is_err());
    }

    #[test]
    fn test_parse_unknown_insight_type_fails() {
        let bad = r#"{"headline": "x", "insights": [{"title": "t", "body": "b", "type": "panic"}], "oneMove": "m"}"#;
        assert!(parse_analysis(bad).is_err());
    }

    #[test]
    fn test_parse_missing_field_fails() {
        let bad = r#"{"headline": "x", "insights": []}"#;
        assert!(parse_analysis(bad).is_err());
    }

    #[test]
    fn test_strip_code_fences_variants() {
        assert_eq!(strip_code_fences("no fences"), "no fences");
        assert_eq!(strip_code_fences("```json\n{}\n```"), "{}");
        assert_eq!(strip_code_fences("```\n{}\n```"), "{}");
        assert_eq!(strip_code_fences("  ```json\n{\"a\": 1}\n```  "), "{\"a\": 1}");
    }
}

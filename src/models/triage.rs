//! Payload returned by the external AI triage service.
//!
//! The service is an LLM behind an HTTP boundary, so its JSON is parsed
//! defensively: every field is defaulted, and a missing or null field never
//! fails the parse. Level strings outside the known domain are treated as
//! unset rather than rejected.

use serde::{Deserialize, Serialize};

use super::enums::{ConfidenceLevel, TriageLevel};

/// Structured triage assessment as returned by the remote service.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TriageAssessment {
    #[serde(default)]
    pub ai_triage_level: Option<String>,
    #[serde(default)]
    pub ai_summary: Option<String>,
    #[serde(default)]
    pub red_flags: Vec<String>,
    #[serde(default)]
    pub risk_signals: Vec<String>,
    #[serde(default)]
    pub missing_questions: Vec<String>,
    #[serde(default)]
    pub confidence_level: Option<String>,
    #[serde(default)]
    pub triggered_by: Vec<String>,
}

impl TriageAssessment {
    /// Degraded-mode fallback used when the triage service fails or its
    /// response cannot be parsed. Nurses perform manual triage instead.
    pub fn unavailable() -> Self {
        Self {
            ai_triage_level: Some("moderate".into()),
            ai_summary: Some("AI assessment unavailable. Please perform manual triage.".into()),
            red_flags: Vec::new(),
            risk_signals: Vec::new(),
            missing_questions: Vec::new(),
            confidence_level: None,
            triggered_by: Vec::new(),
        }
    }

    /// Typed triage level; unknown or missing strings are unset.
    pub fn level(&self) -> Option<TriageLevel> {
        self.ai_triage_level.as_deref().and_then(|s| s.parse().ok())
    }

    /// Typed confidence level; unknown or missing strings are unset.
    pub fn confidence(&self) -> Option<ConfidenceLevel> {
        self.confidence_level.as_deref().and_then(|s| s.parse().ok())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn full_payload_parses() {
        let json = r#"{
            "ai_triage_level": "high",
            "ai_summary": "High-risk symptom cluster requiring urgent evaluation.",
            "red_flags": ["Chest pain with radiation — triggered by chest_radiation"],
            "risk_signals": ["Hypertension history elevates cardiac concern"],
            "missing_questions": ["Duration of current episode?"],
            "confidence_level": "moderate",
            "triggered_by": ["chest pain", "heart rate"]
        }"#;
        let t: TriageAssessment = serde_json::from_str(json).unwrap();
        assert_eq!(t.level(), Some(TriageLevel::High));
        assert_eq!(t.confidence(), Some(ConfidenceLevel::Moderate));
        assert_eq!(t.red_flags.len(), 1);
        assert_eq!(t.triggered_by.len(), 2);
    }

    #[test]
    fn empty_object_parses_to_unset() {
        let t: TriageAssessment = serde_json::from_str("{}").unwrap();
        assert_eq!(t.level(), None);
        assert_eq!(t.confidence(), None);
        assert!(t.red_flags.is_empty());
        assert!(t.missing_questions.is_empty());
    }

    #[test]
    fn null_fields_parse_to_unset() {
        let json = r#"{"ai_triage_level": null, "confidence_level": null, "red_flags": []}"#;
        let t: TriageAssessment = serde_json::from_str(json).unwrap();
        assert_eq!(t.level(), None);
        assert_eq!(t.confidence(), None);
    }

    #[test]
    fn unknown_level_string_is_unset() {
        let json = r#"{"ai_triage_level": "emergent"}"#;
        let t: TriageAssessment = serde_json::from_str(json).unwrap();
        assert_eq!(t.level(), None);
    }

    #[test]
    fn unavailable_fallback_shape() {
        let t = TriageAssessment::unavailable();
        assert_eq!(t.level(), Some(TriageLevel::Moderate));
        assert_eq!(t.confidence(), None);
        assert!(t.red_flags.is_empty());
        assert!(t.risk_signals.is_empty());
        assert!(t.missing_questions.is_empty());
        assert!(t.ai_summary.unwrap().contains("manual triage"));
    }
}

//! Acuity/risk score derived from the AI triage result.
//!
//! A bounded 0-100 severity summary for the dashboard, computed locally and
//! deterministically from the triage level, the service's confidence, and
//! the three flag-list lengths. Absent inputs contribute zero; there are no
//! error states.
//!
//! The label bands (70/45/20) and the color bands (75/45/20) diverge by five
//! points at the top tier. Both tables are carried from clinical review
//! as-is; see DESIGN.md before changing either.

use serde::{Deserialize, Serialize};

use crate::models::{ConfidenceLevel, Submission, TriageAssessment, TriageLevel};

/// Inputs to the risk score, already reduced to counts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TriageSignals {
    pub level: Option<TriageLevel>,
    pub confidence: Option<ConfidenceLevel>,
    pub red_flag_count: usize,
    pub risk_signal_count: usize,
    pub missing_question_count: usize,
}

impl From<&TriageAssessment> for TriageSignals {
    fn from(t: &TriageAssessment) -> Self {
        Self {
            level: t.level(),
            confidence: t.confidence(),
            red_flag_count: t.red_flags.len(),
            risk_signal_count: t.risk_signals.len(),
            missing_question_count: t.missing_questions.len(),
        }
    }
}

impl From<&Submission> for TriageSignals {
    fn from(s: &Submission) -> Self {
        Self {
            level: s.ai_triage_level,
            confidence: s.confidence_level,
            red_flag_count: s.red_flags.len(),
            risk_signal_count: s.risk_signals.len(),
            missing_question_count: s.missing_questions.len(),
        }
    }
}

/// Qualitative label shown next to the numeric score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RiskLabel {
    Critical,
    High,
    Moderate,
    Low,
}

impl RiskLabel {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Critical => "Critical",
            Self::High => "High",
            Self::Moderate => "Moderate",
            Self::Low => "Low",
        }
    }
}

/// Visual tier for the score badge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskTier {
    Red,
    Orange,
    Yellow,
    Green,
}

/// Compute the bounded 0-100 risk score.
pub fn risk_score(t: &TriageSignals) -> u8 {
    // Base score from triage level: the primary driver
    let mut score: i64 = match t.level {
        Some(TriageLevel::High) => 50,
        Some(TriageLevel::Moderate) => 25,
        Some(TriageLevel::Low) => 5,
        None => 0,
    };

    // Confidence modifies the base score
    score += match t.confidence {
        Some(ConfidenceLevel::High) => 15,
        Some(ConfidenceLevel::Moderate) => 8,
        Some(ConfidenceLevel::Low) => 2,
        None => 0,
    };

    // Red flags: reduced weight, capped
    score += (t.red_flag_count as i64 * 3).min(15);

    // Risk signals: minimal weight
    score += (t.risk_signal_count as i64 * 2).min(10);

    // Missing questions: penalty for incomplete information
    score -= (t.missing_question_count as i64 * 3).min(15);

    score.clamp(0, 100) as u8
}

/// Label band for a score. Thresholds 70/45/20.
pub fn risk_label(score: u8) -> RiskLabel {
    if score >= 70 {
        RiskLabel::Critical
    } else if score >= 45 {
        RiskLabel::High
    } else if score >= 20 {
        RiskLabel::Moderate
    } else {
        RiskLabel::Low
    }
}

/// Color band for a score. Thresholds 75/45/20, intentionally not the
/// label thresholds: a 70-74 score is labeled Critical but tinted Orange.
pub fn risk_tier(score: u8) -> RiskTier {
    if score >= 75 {
        RiskTier::Red
    } else if score >= 45 {
        RiskTier::Orange
    } else if score >= 20 {
        RiskTier::Yellow
    } else {
        RiskTier::Green
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn signals(
        level: Option<TriageLevel>,
        confidence: Option<ConfidenceLevel>,
        red: usize,
        risk: usize,
        missing: usize,
    ) -> TriageSignals {
        TriageSignals {
            level,
            confidence,
            red_flag_count: red,
            risk_signal_count: risk,
            missing_question_count: missing,
        }
    }

    #[test]
    fn worked_example_scores_70_critical() {
        // 50 + 15 + min(6,15) + min(2,10) - min(3,15) = 70
        let t = signals(
            Some(TriageLevel::High),
            Some(ConfidenceLevel::High),
            2,
            1,
            1,
        );
        let score = risk_score(&t);
        assert_eq!(score, 70);
        assert_eq!(risk_label(score), RiskLabel::Critical);
        // ...but still Orange under the 75-point color band
        assert_eq!(risk_tier(score), RiskTier::Orange);
    }

    #[test]
    fn moderate_case_arithmetic() {
        // 25 + 8 + 9 + 4 - 6 = 40
        let t = signals(
            Some(TriageLevel::Moderate),
            Some(ConfidenceLevel::Moderate),
            3,
            2,
            2,
        );
        assert_eq!(risk_score(&t), 40);
        assert_eq!(risk_label(40), RiskLabel::Moderate);
    }

    #[test]
    fn low_with_heavy_penalty_clamps_at_zero() {
        // 5 + 0 + 0 + 0 - 15 would be -10
        let t = signals(Some(TriageLevel::Low), None, 0, 0, 10);
        assert_eq!(risk_score(&t), 0);
        assert_eq!(risk_label(0), RiskLabel::Low);
        assert_eq!(risk_tier(0), RiskTier::Green);
    }

    #[test]
    fn bonus_caps_bound_the_maximum_at_90() {
        // Caps: 50 + 15 + 15 + 10 - 0. The clamp at 100 is a guard only.
        let t = signals(
            Some(TriageLevel::High),
            Some(ConfidenceLevel::High),
            40,
            40,
            0,
        );
        assert_eq!(risk_score(&t), 90);
        assert_eq!(risk_label(90), RiskLabel::Critical);
        assert_eq!(risk_tier(90), RiskTier::Red);
    }

    #[test]
    fn unset_everything_scores_zero() {
        assert_eq!(risk_score(&TriageSignals::default()), 0);
    }

    #[test]
    fn label_band_edges() {
        assert_eq!(risk_label(69), RiskLabel::High);
        assert_eq!(risk_label(70), RiskLabel::Critical);
        assert_eq!(risk_label(44), RiskLabel::Moderate);
        assert_eq!(risk_label(45), RiskLabel::High);
        assert_eq!(risk_label(19), RiskLabel::Low);
        assert_eq!(risk_label(20), RiskLabel::Moderate);
    }

    #[test]
    fn color_band_edges_differ_at_top_tier() {
        assert_eq!(risk_tier(74), RiskTier::Orange);
        assert_eq!(risk_tier(75), RiskTier::Red);
        // Lower edges shared with the label table
        assert_eq!(risk_tier(44), RiskTier::Yellow);
        assert_eq!(risk_tier(45), RiskTier::Orange);
        assert_eq!(risk_tier(19), RiskTier::Green);
    }

    #[test]
    fn signals_from_triage_payload() {
        let t = TriageAssessment {
            ai_triage_level: Some("high".into()),
            confidence_level: Some("low".into()),
            red_flags: vec!["a".into(), "b".into()],
            risk_signals: vec!["c".into()],
            missing_questions: vec![],
            ..Default::default()
        };
        let s = TriageSignals::from(&t);
        assert_eq!(s.level, Some(TriageLevel::High));
        assert_eq!(s.confidence, Some(ConfidenceLevel::Low));
        assert_eq!(s.red_flag_count, 2);
        // 50 + 2 + 6 + 2 - 0 = 60
        assert_eq!(risk_score(&s), 60);
    }
}

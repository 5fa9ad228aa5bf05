use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::enums::{ConfidenceLevel, NurseDecision, SubmissionStatus, TriageLevel};
use super::triage::TriageAssessment;
use crate::assessment::SymptomAssessmentData;

/// A patient intake submission as stored in the queue.
///
/// Created when the patient completes check-in, annotated with AI triage
/// results when the remote call returns, and ordered by `queue_order` while
/// `status` is waiting.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Submission {
    pub id: Uuid,
    pub name: String,
    pub date_of_birth: Option<NaiveDate>,
    pub gender: Option<String>,
    pub chief_complaint: String,
    pub symptom_onset: Option<String>,
    pub pain_score: u8,
    pub symptoms: Vec<String>,
    pub medical_history: Vec<String>,
    pub medications: Option<String>,
    /// Flat follow-up answer map, serialized as submitted.
    pub follow_up_answers: serde_json::Value,
    pub ai_triage_level: Option<TriageLevel>,
    pub confidence_level: Option<ConfidenceLevel>,
    pub ai_summary: Option<String>,
    pub red_flags: Vec<String>,
    pub risk_signals: Vec<String>,
    pub missing_questions: Vec<String>,
    pub triggered_by: Vec<String>,
    pub nurse_decision: Option<NurseDecision>,
    pub status: SubmissionStatus,
    /// Position among waiting submissions (0-based). None until queued.
    pub queue_order: Option<i64>,
    pub created_at: DateTime<Utc>,
}

/// Demographics and history captured on the intake form, before the
/// symptom assessment is attached.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IntakeForm {
    pub name: String,
    pub date_of_birth: Option<NaiveDate>,
    pub gender: Option<String>,
    pub chief_complaint: String,
    pub symptom_onset: Option<String>,
    pub medical_history: Vec<String>,
    pub medications: Option<String>,
}

impl Submission {
    /// Build a new waiting submission from the intake form plus the exported
    /// assessment record. Red flags start as the locally-detected set; the
    /// AI triage call replaces them when it returns.
    pub fn from_intake(
        form: IntakeForm,
        assessment: &SymptomAssessmentData,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: form.name,
            date_of_birth: form.date_of_birth,
            gender: form.gender,
            chief_complaint: form.chief_complaint,
            symptom_onset: form.symptom_onset,
            pain_score: assessment.pain_score,
            symptoms: assessment.selected_symptoms.clone(),
            medical_history: form.medical_history,
            medications: form.medications,
            follow_up_answers: serde_json::to_value(&assessment.follow_up_answers)
                .unwrap_or(serde_json::Value::Null),
            ai_triage_level: None,
            confidence_level: None,
            ai_summary: None,
            red_flags: assessment.red_flags.clone(),
            risk_signals: Vec::new(),
            missing_questions: Vec::new(),
            triggered_by: Vec::new(),
            nurse_decision: None,
            status: SubmissionStatus::Waiting,
            queue_order: None,
            created_at: now,
        }
    }

    /// Fold the remote triage assessment into the record. The AI's flag and
    /// signal lists supersede the locally-detected set.
    pub fn apply_triage(&mut self, triage: &TriageAssessment) {
        self.ai_triage_level = triage.level();
        self.confidence_level = triage.confidence();
        self.ai_summary = triage.ai_summary.clone();
        self.red_flags = triage.red_flags.clone();
        self.risk_signals = triage.risk_signals.clone();
        self.missing_questions = triage.missing_questions.clone();
        self.triggered_by = triage.triggered_by.clone();
    }

    /// Whole minutes this submission has been waiting, floored at zero.
    pub fn wait_minutes(&self, now: DateTime<Utc>) -> i64 {
        (now - self.created_at).num_minutes().max(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn blank_form() -> IntakeForm {
        IntakeForm {
            name: "Ada Byron".into(),
            date_of_birth: None,
            gender: Some("F".into()),
            chief_complaint: "Chest discomfort since this morning".into(),
            symptom_onset: Some("2 hours ago".into()),
            medical_history: vec!["Hypertension".into()],
            medications: None,
        }
    }

    fn blank_assessment() -> SymptomAssessmentData {
        SymptomAssessmentData {
            primary_symptom: "Chest pain".into(),
            selected_symptoms: vec!["Chest pain".into()],
            follow_up_answers: Default::default(),
            pain_score: 6,
            red_flags: vec!["local flag".into()],
        }
    }

    #[test]
    fn from_intake_starts_waiting_and_unordered() {
        let sub = Submission::from_intake(blank_form(), &blank_assessment(), Utc::now());
        assert_eq!(sub.status, SubmissionStatus::Waiting);
        assert_eq!(sub.queue_order, None);
        assert_eq!(sub.nurse_decision, None);
        assert_eq!(sub.ai_triage_level, None);
        assert_eq!(sub.pain_score, 6);
        assert_eq!(sub.red_flags, vec!["local flag".to_string()]);
    }

    #[test]
    fn apply_triage_replaces_flag_lists() {
        let mut sub = Submission::from_intake(blank_form(), &blank_assessment(), Utc::now());
        let triage: TriageAssessment = serde_json::from_str(
            r#"{
                "ai_triage_level": "high",
                "confidence_level": "low",
                "ai_summary": "Concerning vital sign pattern.",
                "red_flags": ["a", "b"],
                "risk_signals": ["c"],
                "missing_questions": ["d", "e", "f"],
                "triggered_by": ["chest pain"]
            }"#,
        )
        .unwrap();
        sub.apply_triage(&triage);
        assert_eq!(sub.ai_triage_level, Some(TriageLevel::High));
        assert_eq!(sub.confidence_level, Some(ConfidenceLevel::Low));
        assert_eq!(sub.red_flags.len(), 2);
        assert_eq!(sub.risk_signals.len(), 1);
        assert_eq!(sub.missing_questions.len(), 3);
    }

    #[test]
    fn wait_minutes_floors_at_zero() {
        let now = Utc::now();
        let mut sub = Submission::from_intake(blank_form(), &blank_assessment(), now);
        assert_eq!(sub.wait_minutes(now), 0);

        sub.created_at = now - Duration::minutes(42);
        assert_eq!(sub.wait_minutes(now), 42);

        // Clock skew: created_at in the future must not go negative
        sub.created_at = now + Duration::minutes(5);
        assert_eq!(sub.wait_minutes(now), 0);
    }
}

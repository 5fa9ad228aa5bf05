//! Symptom assessment session state.
//!
//! Owns the selection list and the flat answer map, recomputes the exported
//! assessment record on every change, and notifies a registered observer
//! (the form UI). All transitions are synchronous; the external triage call
//! happens elsewhere and never blocks assessment.

pub mod answers;
pub mod followup;
pub mod red_flags;

pub use answers::{AnswerMap, AnswerValue};
pub use followup::{default_answer, visible_follow_ups};

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::catalog::{QuestionKind, SymptomCatalog};

/// The exported assessment record, re-emitted on every state change.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SymptomAssessmentData {
    /// First selected symptom, empty if none.
    pub primary_symptom: String,
    /// Selection order preserved; no duplicates.
    pub selected_symptoms: Vec<String>,
    pub follow_up_answers: AnswerMap,
    /// Derived primary pain score, 0 when no pain-scale answer exists.
    pub pain_score: u8,
    /// Triggered red-flag messages in rule definition order. Clinician-facing
    /// only; the patient UI must not render these.
    pub red_flags: Vec<String>,
}

type Observer = Box<dyn FnMut(&SymptomAssessmentData)>;

/// Mutable assessment session for one intake.
pub struct SymptomAssessment {
    catalog: Arc<SymptomCatalog>,
    selected: Vec<String>,
    answers: AnswerMap,
    observer: Option<Observer>,
}

impl SymptomAssessment {
    pub fn new(catalog: Arc<SymptomCatalog>) -> Self {
        Self {
            catalog,
            selected: Vec::new(),
            answers: AnswerMap::new(),
            observer: None,
        }
    }

    /// Register the consumer notified after every state change.
    pub fn set_observer(&mut self, observer: impl FnMut(&SymptomAssessmentData) + 'static) {
        self.observer = Some(Box::new(observer));
    }

    /// Select a symptom. Already-selected names are a no-op. Names without a
    /// catalog category are kept as free-form symptoms: they contribute no
    /// follow-ups and no pain score.
    pub fn add_symptom(&mut self, name: &str) {
        let name = name.trim();
        if name.is_empty() || self.selected.iter().any(|s| s == name) {
            return;
        }
        self.selected.push(name.to_string());
        tracing::debug!(symptom = name, "Symptom selected");
        self.emit();
    }

    /// Deselect a symptom and cascade-delete every answer belonging to its
    /// category's follow-ups. Answers of other categories are untouched.
    pub fn remove_symptom(&mut self, name: &str) {
        let Some(pos) = self.selected.iter().position(|s| s == name) else {
            return;
        };
        self.selected.remove(pos);
        if let Some(cat) = self.catalog.find(name) {
            for fu in &cat.follow_ups {
                self.answers.remove(fu.id);
            }
        }
        tracing::debug!(symptom = name, "Symptom deselected");
        self.emit();
    }

    /// Store an answer, normalized against its spec when the id is known.
    /// Unknown ids are retained raw and ignored by rendering and rules.
    pub fn set_answer(&mut self, id: &str, value: AnswerValue) {
        let value = match self.catalog.find_spec(id) {
            Some(spec) => answers::normalize(spec, value),
            None => value,
        };
        self.answers.insert(id.to_string(), value);
        self.emit();
    }

    /// Toggle one option of a multi-choice question, applying the `"None"`
    /// mutual-exclusion rule. No-op for ids that are not multi-choice.
    pub fn toggle_option(&mut self, id: &str, option: &str) {
        let Some(spec) = self.catalog.find_spec(id) else {
            return;
        };
        if !matches!(spec.question, QuestionKind::MultiChoice { .. }) {
            return;
        }
        let current = self
            .answers
            .get(id)
            .and_then(|a| a.as_selections())
            .unwrap_or(&[]);
        let next = answers::toggle_selection(current, option);
        self.answers
            .insert(id.to_string(), AnswerValue::Selections(next));
        self.emit();
    }

    pub fn selected_symptoms(&self) -> &[String] {
        &self.selected
    }

    pub fn answers(&self) -> &AnswerMap {
        &self.answers
    }

    /// Recompute the full assessment record from current state.
    pub fn snapshot(&self) -> SymptomAssessmentData {
        SymptomAssessmentData {
            primary_symptom: self.selected.first().cloned().unwrap_or_default(),
            selected_symptoms: self.selected.clone(),
            follow_up_answers: self.answers.clone(),
            pain_score: self.pain_score(),
            red_flags: red_flags::evaluate(&self.selected, &self.answers)
                .into_iter()
                .map(String::from)
                .collect(),
        }
    }

    /// Primary pain score: walk selected symptoms in selection order, their
    /// follow-ups in definition order, and take the first pain-scale field
    /// with a present numeric answer. First match wins; a later symptom's
    /// answered scale is shadowed only by an *answered* earlier one.
    fn pain_score(&self) -> u8 {
        for name in &self.selected {
            let Some(cat) = self.catalog.find(name) else {
                continue;
            };
            for fu in &cat.follow_ups {
                if !fu.is_pain_scale {
                    continue;
                }
                if let Some(n) = self.answers.get(fu.id).and_then(|a| a.as_number()) {
                    return n.round().clamp(0.0, u8::MAX as f64) as u8;
                }
            }
        }
        0
    }

    fn emit(&mut self) {
        if self.observer.is_none() {
            return;
        }
        let data = self.snapshot();
        if let Some(observer) = self.observer.as_mut() {
            observer(&data);
        }
    }
}

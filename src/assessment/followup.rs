//! Follow-up visibility engine.
//!
//! A `show_when` guard can hide a question, never reorder one. Visibility is
//! re-derived from the current answers on every render.

use crate::catalog::{FollowUpSpec, QuestionKind, ShowWhen, SymptomCategory};

use super::answers::{AnswerMap, AnswerValue};

/// The category's follow-ups currently visible, in definition order.
pub fn visible_follow_ups<'a>(
    category: &'a SymptomCategory,
    answers: &AnswerMap,
) -> Vec<&'a FollowUpSpec> {
    category
        .follow_ups
        .iter()
        .filter(|fu| match &fu.show_when {
            None => true,
            Some(guard) => guard_satisfied(guard, answers),
        })
        .collect()
}

/// A guard is satisfied only by a single-string answer contained in its
/// accepted values. List and numeric answers never satisfy a guard.
fn guard_satisfied(guard: &ShowWhen, answers: &AnswerMap) -> bool {
    answers
        .get(guard.key)
        .and_then(|v| v.as_str())
        .is_some_and(|s| guard.values.iter().any(|accepted| *accepted == s))
}

/// Initial render value for a question before the user interacts.
///
/// Sliders render at `min`; the answer map itself stays unanswered until
/// the user moves the control.
pub fn default_answer(spec: &FollowUpSpec) -> Option<AnswerValue> {
    match spec.question {
        QuestionKind::Slider { min, .. } => Some(AnswerValue::Number(min)),
        _ => None,
    }
}

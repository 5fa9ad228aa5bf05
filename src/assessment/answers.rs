//! Typed answer values and per-kind normalization.
//!
//! The intake form stores every follow-up answer in one flat map. Values
//! come in three shapes: a number (sliders), a single string (choices,
//! checks, free text), or a string list (multi-choice). Absence means
//! unanswered; there are no implicit defaults.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::catalog::{FollowUpSpec, QuestionKind};

/// Flat map from follow-up id to its answer.
pub type AnswerMap = HashMap<String, AnswerValue>;

/// One follow-up answer. Untagged so the serialized form matches the raw
/// intake JSON: number, string, or array of strings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AnswerValue {
    Number(f64),
    Text(String),
    Selections(Vec<String>),
}

impl AnswerValue {
    /// Numeric reading of the answer, for sliders and threshold rules.
    ///
    /// Text parses its leading numeric prefix ("39.5 F" reads as 39.5, as
    /// the intake UI accepted); a selection list reads its first element.
    /// Unparsable values are None, which rule evaluation treats as zero.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            AnswerValue::Number(n) => Some(*n),
            AnswerValue::Text(s) => parse_leading_number(s),
            AnswerValue::Selections(v) => v.first().and_then(|s| parse_leading_number(s)),
        }
    }

    /// The answer as a single string, when it is one.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            AnswerValue::Text(s) => Some(s),
            _ => None,
        }
    }

    /// The answer as a selection list, when it is one.
    pub fn as_selections(&self) -> Option<&[String]> {
        match self {
            AnswerValue::Selections(v) => Some(v),
            _ => None,
        }
    }
}

/// Longest numeric prefix of the trimmed input, if any.
fn parse_leading_number(s: &str) -> Option<f64> {
    let trimmed = s.trim();
    let mut end = 0;
    let mut seen_digit = false;
    let mut seen_dot = false;
    for (i, c) in trimmed.char_indices() {
        match c {
            '+' | '-' if i == 0 => end = i + 1,
            '.' if !seen_dot => {
                seen_dot = true;
                end = i + 1;
            }
            '0'..='9' => {
                seen_digit = true;
                end = i + 1;
            }
            _ => break,
        }
    }
    if !seen_digit {
        return None;
    }
    trimmed[..end].parse().ok()
}

/// Normalize a raw answer against its question spec.
///
/// Slider values are clamped to `[min, max]` and snapped to `step`
/// increments. Everything else is stored as given: unrecognized option
/// strings never match any option during rendering or rule evaluation but
/// are harmlessly retained, matching the form's behavior for programmatic
/// writes.
pub fn normalize(spec: &FollowUpSpec, value: AnswerValue) -> AnswerValue {
    match spec.question {
        QuestionKind::Slider { min, max, step } => match value.as_number() {
            Some(n) => AnswerValue::Number(snap(n, min, max, step)),
            None => value,
        },
        _ => value,
    }
}

fn snap(n: f64, min: f64, max: f64, step: f64) -> f64 {
    let clamped = n.clamp(min, max);
    if step > 0.0 {
        let stepped = min + ((clamped - min) / step).round() * step;
        stepped.clamp(min, max)
    } else {
        clamped
    }
}

/// Toggle one option of a multi-choice answer.
///
/// The literal option `"None"` is mutually exclusive with every other
/// selection: toggling it on clears the rest, and selecting any other
/// option clears `"None"`. This is the only cross-option interaction in
/// the question model, a data-quality guard against contradictory answers.
pub fn toggle_selection(current: &[String], option: &str) -> Vec<String> {
    if option == "None" {
        return if current.iter().any(|s| s == "None") {
            Vec::new()
        } else {
            vec!["None".to_string()]
        };
    }
    if current.iter().any(|s| s == option) {
        current.iter().filter(|s| *s != option).cloned().collect()
    } else {
        let mut next: Vec<String> = current.iter().filter(|s| *s != "None").cloned().collect();
        next.push(option.to_string());
        next
    }
}

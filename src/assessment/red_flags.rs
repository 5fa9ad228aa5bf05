//! Red-flag rule engine.
//!
//! Detects high-risk symptom patterns over the selected symptoms and the
//! collected answers. Messages annotate the clinician-facing record only and
//! are never shown to the patient; the consumer decides visibility.
//!
//! Rules are independent and order-insensitive. Every matching rule fires on
//! every evaluation; there is no short-circuiting and no mutual exclusion.
//! Thresholds are clinically meaningful, not tunable constants.

use super::answers::AnswerMap;

/// A hard-coded red-flag rule.
struct RedFlagRule {
    /// Clinician-facing warning, pattern language only.
    message: &'static str,
    /// Condition: when does this rule fire?
    condition: RedFlagCondition,
}

/// Condition under which a red-flag rule fires.
enum RedFlagCondition {
    /// Every listed symptom is selected.
    AllSelected(&'static [&'static str]),
    /// `required` is selected together with at least one of `any_of`.
    SelectedWithAny {
        required: &'static str,
        any_of: &'static [&'static str],
    },
    /// The answer under `key` is exactly `value`.
    AnswerIs {
        key: &'static str,
        value: &'static str,
    },
    /// `symptom` is selected and the multi-choice answer under `key`
    /// includes at least one of `any_of`.
    SelectionsInclude {
        symptom: &'static str,
        key: &'static str,
        any_of: &'static [&'static str],
    },
    /// `symptom` is selected and the numeric reading of the answer under
    /// `key` is at least `threshold`. Missing or unparsable reads as zero.
    NumericAtLeast {
        symptom: &'static str,
        key: &'static str,
        threshold: f64,
    },
}

fn rules() -> Vec<RedFlagRule> {
    vec![
        RedFlagRule {
            message: "Chest pain + shortness of breath — potential cardiac event",
            condition: RedFlagCondition::AllSelected(&["Chest pain", "Shortness of breath"]),
        },
        RedFlagRule {
            message: "Sudden numbness + difficulty speaking — possible stroke",
            condition: RedFlagCondition::SelectedWithAny {
                required: "Numbness",
                any_of: &["Difficulty speaking", "Slurred speech"],
            },
        },
        RedFlagRule {
            message: "Worst headache of life — rule out subarachnoid hemorrhage",
            condition: RedFlagCondition::AnswerIs {
                key: "headache_worst",
                value: "Yes",
            },
        },
        RedFlagRule {
            message: "Chest pain with radiation to arm/jaw — possible MI",
            condition: RedFlagCondition::SelectionsInclude {
                symptom: "Chest pain",
                key: "chest_radiation",
                any_of: &["Left arm", "Jaw"],
            },
        },
        RedFlagRule {
            message: "High fever with altered mental status — potential sepsis",
            condition: RedFlagCondition::NumericAtLeast {
                symptom: "Fever",
                key: "fever_temp",
                threshold: 39.0,
            },
        },
        RedFlagRule {
            message: "Severe abdominal pain — possible surgical emergency",
            condition: RedFlagCondition::NumericAtLeast {
                symptom: "Abdominal pain",
                key: "abdominal_pain_score",
                threshold: 8.0,
            },
        },
    ]
}

/// Evaluate every rule; triggered messages in rule definition order.
pub fn evaluate(selected: &[String], answers: &AnswerMap) -> Vec<&'static str> {
    let mut triggered = Vec::new();
    for rule in &rules() {
        if rule.condition.matches(selected, answers) {
            tracing::debug!(message = rule.message, "Red-flag rule fired");
            triggered.push(rule.message);
        }
    }
    triggered
}

impl RedFlagCondition {
    fn matches(&self, selected: &[String], answers: &AnswerMap) -> bool {
        let has = |name: &str| selected.iter().any(|s| s == name);
        match self {
            Self::AllSelected(names) => names.iter().all(|n| has(n)),
            Self::SelectedWithAny { required, any_of } => {
                has(required) && any_of.iter().any(|n| has(n))
            }
            Self::AnswerIs { key, value } => {
                answers.get(*key).and_then(|a| a.as_str()) == Some(*value)
            }
            Self::SelectionsInclude { symptom, key, any_of } => {
                has(symptom)
                    && answers
                        .get(*key)
                        .and_then(|a| a.as_selections())
                        .is_some_and(|sel| any_of.iter().any(|o| sel.iter().any(|s| s == o)))
            }
            Self::NumericAtLeast { symptom, key, threshold } => {
                let value = answers
                    .get(*key)
                    .and_then(|a| a.as_number())
                    .unwrap_or(0.0);
                has(symptom) && value >= *threshold
            }
        }
    }
}

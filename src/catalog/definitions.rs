//! The built-in clinical catalog: ten symptom categories with their search
//! aliases and follow-up questionnaires.
//!
//! Content is clinically reviewed. Ids are load-bearing: red-flag rules and
//! stored answer maps reference them by name. Do not rename casually.

use super::{FollowUpSpec, QuestionKind, ShowWhen, SymptomCategory};

fn pain_slider(id: &'static str) -> FollowUpSpec {
    FollowUpSpec {
        id,
        label: "Pain intensity",
        question: QuestionKind::Slider { min: 0.0, max: 10.0, step: 1.0 },
        is_pain_scale: true,
        show_when: None,
    }
}

fn choice(
    id: &'static str,
    label: &'static str,
    options: &'static [&'static str],
) -> FollowUpSpec {
    FollowUpSpec {
        id,
        label,
        question: QuestionKind::SingleChoice { options },
        is_pain_scale: false,
        show_when: None,
    }
}

fn multi(
    id: &'static str,
    label: &'static str,
    options: &'static [&'static str],
) -> FollowUpSpec {
    FollowUpSpec {
        id,
        label,
        question: QuestionKind::MultiChoice { options },
        is_pain_scale: false,
        show_when: None,
    }
}

fn text(id: &'static str, label: &'static str) -> FollowUpSpec {
    FollowUpSpec {
        id,
        label,
        question: QuestionKind::FreeText,
        is_pain_scale: false,
        show_when: None,
    }
}

pub(super) fn categories() -> Vec<SymptomCategory> {
    vec![
        SymptomCategory {
            name: "Chest pain",
            aliases: &["chest tightness", "heart pain", "chest pressure", "angina"],
            involves_pain: true,
            follow_ups: vec![
                pain_slider("chest_pain_score"),
                choice("chest_type", "Type of pain", &["Pressure", "Sharp", "Burning", "Tightness", "Aching"]),
                multi("chest_radiation", "Does pain radiate to?", &["Left arm", "Right arm", "Jaw", "Back", "Neck", "None"]),
                choice("chest_breathing", "Worse with breathing?", &["Yes", "No"]),
                choice("chest_onset", "Onset", &["Sudden", "Gradual", "Intermittent"]),
            ],
        },
        SymptomCategory {
            name: "Headache",
            aliases: &["migraine", "head pain", "head pressure"],
            involves_pain: true,
            follow_ups: vec![
                pain_slider("headache_pain_score"),
                choice("headache_onset", "Onset type", &["Sudden (thunderclap)", "Gradual", "Chronic / recurring"]),
                choice("headache_worst", "Worst headache of your life?", &["Yes", "No"]),
                choice("headache_visual", "Visual changes?", &["Yes", "No"]),
                choice("headache_nausea", "Nausea or vomiting?", &["Yes", "No"]),
                choice("headache_stiff_neck", "Stiff neck?", &["Yes", "No"]),
            ],
        },
        SymptomCategory {
            name: "Shortness of breath",
            aliases: &["difficulty breathing", "dyspnea", "can't breathe", "breathless", "sob"],
            involves_pain: false,
            follow_ups: vec![
                choice("sob_severity", "Severity", &["Mild", "Moderate", "Severe"]),
                choice("sob_trigger", "When does it occur?", &["At rest", "With exertion", "Both"]),
                choice("sob_history", "History of asthma/COPD?", &["Yes", "No"]),
                choice("sob_chest_tight", "Chest tightness?", &["Yes", "No"]),
                FollowUpSpec {
                    id: "sob_chest_pain_score",
                    label: "Chest pain intensity",
                    question: QuestionKind::Slider { min: 0.0, max: 10.0, step: 1.0 },
                    is_pain_scale: true,
                    show_when: Some(ShowWhen { key: "sob_chest_tight", values: &["Yes"] }),
                },
                choice("sob_onset", "How quickly did it start?", &["Suddenly", "Over hours", "Over days"]),
            ],
        },
        SymptomCategory {
            name: "Fever",
            aliases: &["high temperature", "feel hot", "chills", "feverish"],
            involves_pain: false,
            follow_ups: vec![
                text("fever_temp", "Measured temperature (°F)"),
                choice("fever_duration", "How long?", &["< 24 hours", "1–3 days", "3–7 days", "> 1 week"]),
                choice("fever_chills", "Chills or rigors?", &["Yes", "No"]),
                choice("fever_exposure", "Recent infection exposure?", &["Yes", "No", "Not sure"]),
                choice("fever_rash", "Associated rash?", &["Yes", "No"]),
            ],
        },
        SymptomCategory {
            name: "Abdominal pain",
            aliases: &["stomach pain", "belly pain", "stomach ache", "cramps", "abdominal cramps"],
            involves_pain: true,
            follow_ups: vec![
                pain_slider("abdominal_pain_score"),
                choice("abdominal_location", "Location", &["Upper right", "Upper left", "Lower right", "Lower left", "Diffuse / all over", "Around navel"]),
                choice("abdominal_type", "Type", &["Cramping", "Sharp", "Burning", "Dull / aching"]),
                choice("abdominal_nausea", "Nausea or vomiting?", &["Yes", "No"]),
                choice("abdominal_bowel", "Changes in bowel movements?", &["Diarrhea", "Constipation", "Blood in stool", "Normal"]),
            ],
        },
        SymptomCategory {
            name: "Dizziness",
            aliases: &["vertigo", "lightheaded", "faint", "feeling faint", "room spinning"],
            involves_pain: false,
            follow_ups: vec![
                choice("dizzy_type", "What does it feel like?", &["Room spinning (vertigo)", "Lightheaded / faint", "Off balance", "Foggy"]),
                choice("dizzy_position", "Related to position changes?", &["Yes", "No"]),
                choice("dizzy_hearing", "Hearing loss or ringing?", &["Yes", "No"]),
                choice("dizzy_fainted", "Did you faint / lose consciousness?", &["Yes", "No"]),
            ],
        },
        SymptomCategory {
            name: "Numbness",
            aliases: &["tingling", "pins and needles", "weakness", "can't feel"],
            involves_pain: false,
            follow_ups: vec![
                multi("numb_location", "Where?", &["Face", "Left arm", "Right arm", "Left leg", "Right leg", "Both sides"]),
                choice("numb_onset", "Onset", &["Sudden (minutes)", "Gradual (hours)", "Days / weeks"]),
                choice("numb_speech", "Difficulty speaking or slurred speech?", &["Yes", "No"]),
                choice("numb_vision", "Vision changes?", &["Yes", "No"]),
            ],
        },
        SymptomCategory {
            name: "Trauma",
            aliases: &["injury", "fall", "accident", "hurt", "wound", "cut", "fracture", "broken"],
            involves_pain: true,
            follow_ups: vec![
                pain_slider("trauma_pain_score"),
                choice("trauma_mechanism", "How did it happen?", &["Fall", "Motor vehicle accident", "Assault", "Sports injury", "Other"]),
                multi("trauma_location", "Body area affected", &["Head", "Neck / spine", "Chest", "Abdomen", "Arm / hand", "Leg / foot"]),
                choice("trauma_bleeding", "Active bleeding?", &["Yes, severe", "Yes, minor", "No"]),
                choice("trauma_consciousness", "Lost consciousness?", &["Yes", "No"]),
            ],
        },
        SymptomCategory {
            name: "Vomiting",
            aliases: &["throwing up", "nausea", "feeling sick", "emesis"],
            involves_pain: false,
            follow_ups: vec![
                choice("vomit_frequency", "How often?", &["Once", "Several times", "Can't keep anything down"]),
                choice("vomit_blood", "Blood in vomit?", &["Yes", "No"]),
                choice("vomit_duration", "How long?", &["< 6 hours", "6–24 hours", "> 24 hours"]),
                choice("vomit_diarrhea", "Diarrhea as well?", &["Yes", "No"]),
            ],
        },
        SymptomCategory {
            name: "Pain",
            aliases: &["ache", "soreness", "hurting", "pain", "sore", "general pain"],
            involves_pain: true,
            follow_ups: vec![
                pain_slider("pain_score"),
                text("pain_location", "Where is the pain?"),
                choice("pain_type", "Type of pain", &["Sharp", "Dull / aching", "Burning", "Throbbing", "Cramping"]),
                choice("pain_onset", "When did it start?", &["Today", "1–3 days ago", "This week", "> 1 week"]),
                choice("pain_constant", "Is it constant or intermittent?", &["Constant", "Comes and goes"]),
            ],
        },
    ]
}

use std::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc};
use rusqlite::{params, Connection};
use uuid::Uuid;

use super::DatabaseError;
use crate::models::enums::*;
use crate::models::{Submission, TriageAssessment};

const SUBMISSION_COLUMNS: &str = "id, name, date_of_birth, gender, chief_complaint, symptom_onset,
     pain_score, symptoms, medical_history, medications, follow_up_answers,
     ai_triage_level, confidence_level, ai_summary, red_flags, risk_signals,
     missing_questions, triggered_by, nurse_decision, status, queue_order, created_at";

// ═══════════════════════════════════════════
// Submission Repository
// ═══════════════════════════════════════════

pub fn insert_submission(conn: &Connection, sub: &Submission) -> Result<(), DatabaseError> {
    conn.execute(
        "INSERT INTO submissions (id, name, date_of_birth, gender, chief_complaint, symptom_onset,
         pain_score, symptoms, medical_history, medications, follow_up_answers,
         ai_triage_level, confidence_level, ai_summary, red_flags, risk_signals,
         missing_questions, triggered_by, nurse_decision, status, queue_order, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15, ?16, ?17,
                 ?18, ?19, ?20, ?21, ?22)",
        params![
            sub.id.to_string(),
            sub.name,
            sub.date_of_birth.map(|d| d.to_string()),
            sub.gender,
            sub.chief_complaint,
            sub.symptom_onset,
            sub.pain_score as i64,
            to_json_column(&sub.symptoms, "symptoms")?,
            to_json_column(&sub.medical_history, "medical_history")?,
            sub.medications,
            to_json_column(&sub.follow_up_answers, "follow_up_answers")?,
            sub.ai_triage_level.map(|l| l.as_str()),
            sub.confidence_level.map(|c| c.as_str()),
            sub.ai_summary,
            to_json_column(&sub.red_flags, "red_flags")?,
            to_json_column(&sub.risk_signals, "risk_signals")?,
            to_json_column(&sub.missing_questions, "missing_questions")?,
            to_json_column(&sub.triggered_by, "triggered_by")?,
            sub.nurse_decision.map(|d| d.as_str()),
            sub.status.as_str(),
            sub.queue_order,
            sub.created_at.to_rfc3339(),
        ],
    )?;
    Ok(())
}

pub fn get_submission(conn: &Connection, id: &Uuid) -> Result<Option<Submission>, DatabaseError> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {SUBMISSION_COLUMNS} FROM submissions WHERE id = ?1"
    ))?;

    let result = stmt.query_row(params![id.to_string()], read_row);

    match result {
        Ok(row) => Ok(Some(submission_from_row(row)?)),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

/// All waiting submissions, ordered by queue position. Rows that have never
/// been queued (NULL order) sort last, oldest first.
pub fn list_waiting(conn: &Connection) -> Result<Vec<Submission>, DatabaseError> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {SUBMISSION_COLUMNS} FROM submissions
         WHERE status = 'waiting'
         ORDER BY queue_order IS NULL, queue_order ASC, created_at ASC"
    ))?;

    let rows = stmt.query_map([], read_row)?;
    let mut subs = Vec::new();
    for row in rows {
        subs.push(submission_from_row(row?)?);
    }
    Ok(subs)
}

/// Persist a full queue renumbering atomically. Every write is `(id, order)`
/// and idempotent; the transaction makes the renumbering all-or-nothing.
pub fn update_queue_orders(
    conn: &Connection,
    orders: &[(Uuid, i64)],
) -> Result<(), DatabaseError> {
    let tx = conn.unchecked_transaction()?;
    for (id, order) in orders {
        tx.execute(
            "UPDATE submissions SET queue_order = ?1 WHERE id = ?2",
            params![order, id.to_string()],
        )?;
    }
    tx.commit()?;
    tracing::debug!(rows = orders.len(), "Queue order persisted");
    Ok(())
}

/// Record the nurse decision and move the submission out of the waiting
/// queue. Irreversible from this crate's perspective.
pub fn set_nurse_decision(
    conn: &Connection,
    id: &Uuid,
    decision: NurseDecision,
) -> Result<(), DatabaseError> {
    let changed = conn.execute(
        "UPDATE submissions
         SET nurse_decision = ?1, status = ?2, queue_order = NULL
         WHERE id = ?3",
        params![
            decision.as_str(),
            SubmissionStatus::InTreatment.as_str(),
            id.to_string()
        ],
    )?;
    if changed == 0 {
        return Err(DatabaseError::NotFound {
            entity_type: "submission".into(),
            id: id.to_string(),
        });
    }
    Ok(())
}

/// Write the remote triage assessment onto the stored submission.
pub fn update_triage_results(
    conn: &Connection,
    id: &Uuid,
    triage: &TriageAssessment,
) -> Result<(), DatabaseError> {
    let changed = conn.execute(
        "UPDATE submissions
         SET ai_triage_level = ?1, confidence_level = ?2, ai_summary = ?3,
             red_flags = ?4, risk_signals = ?5, missing_questions = ?6, triggered_by = ?7
         WHERE id = ?8",
        params![
            triage.level().map(|l| l.as_str()),
            triage.confidence().map(|c| c.as_str()),
            triage.ai_summary,
            to_json_column(&triage.red_flags, "red_flags")?,
            to_json_column(&triage.risk_signals, "risk_signals")?,
            to_json_column(&triage.missing_questions, "missing_questions")?,
            to_json_column(&triage.triggered_by, "triggered_by")?,
            id.to_string(),
        ],
    )?;
    if changed == 0 {
        return Err(DatabaseError::NotFound {
            entity_type: "submission".into(),
            id: id.to_string(),
        });
    }
    Ok(())
}

// Internal row type for Submission mapping
struct SubmissionRow {
    id: String,
    name: String,
    date_of_birth: Option<String>,
    gender: Option<String>,
    chief_complaint: String,
    symptom_onset: Option<String>,
    pain_score: i64,
    symptoms: String,
    medical_history: String,
    medications: Option<String>,
    follow_up_answers: String,
    ai_triage_level: Option<String>,
    confidence_level: Option<String>,
    ai_summary: Option<String>,
    red_flags: String,
    risk_signals: String,
    missing_questions: String,
    triggered_by: String,
    nurse_decision: Option<String>,
    status: String,
    queue_order: Option<i64>,
    created_at: String,
}

fn read_row(row: &rusqlite::Row<'_>) -> Result<SubmissionRow, rusqlite::Error> {
    Ok(SubmissionRow {
        id: row.get(0)?,
        name: row.get(1)?,
        date_of_birth: row.get(2)?,
        gender: row.get(3)?,
        chief_complaint: row.get(4)?,
        symptom_onset: row.get(5)?,
        pain_score: row.get(6)?,
        symptoms: row.get(7)?,
        medical_history: row.get(8)?,
        medications: row.get(9)?,
        follow_up_answers: row.get(10)?,
        ai_triage_level: row.get(11)?,
        confidence_level: row.get(12)?,
        ai_summary: row.get(13)?,
        red_flags: row.get(14)?,
        risk_signals: row.get(15)?,
        missing_questions: row.get(16)?,
        triggered_by: row.get(17)?,
        nurse_decision: row.get(18)?,
        status: row.get(19)?,
        queue_order: row.get(20)?,
        created_at: row.get(21)?,
    })
}

fn submission_from_row(row: SubmissionRow) -> Result<Submission, DatabaseError> {
    Ok(Submission {
        id: Uuid::parse_str(&row.id).map_err(|_| DatabaseError::NotFound {
            entity_type: "submission".into(),
            id: row.id.clone(),
        })?,
        name: row.name,
        date_of_birth: row
            .date_of_birth
            .and_then(|d| NaiveDate::parse_from_str(&d, "%Y-%m-%d").ok()),
        gender: row.gender,
        chief_complaint: row.chief_complaint,
        symptom_onset: row.symptom_onset,
        pain_score: row.pain_score.clamp(0, u8::MAX as i64) as u8,
        symptoms: from_json_column(&row.symptoms, "symptoms")?,
        medical_history: from_json_column(&row.medical_history, "medical_history")?,
        medications: row.medications,
        follow_up_answers: serde_json::from_str(&row.follow_up_answers).map_err(|e| {
            DatabaseError::InvalidJson {
                column: "follow_up_answers".into(),
                reason: e.to_string(),
            }
        })?,
        ai_triage_level: parse_opt_enum(row.ai_triage_level.as_deref())?,
        confidence_level: parse_opt_enum(row.confidence_level.as_deref())?,
        ai_summary: row.ai_summary,
        red_flags: from_json_column(&row.red_flags, "red_flags")?,
        risk_signals: from_json_column(&row.risk_signals, "risk_signals")?,
        missing_questions: from_json_column(&row.missing_questions, "missing_questions")?,
        triggered_by: from_json_column(&row.triggered_by, "triggered_by")?,
        nurse_decision: parse_opt_enum(row.nurse_decision.as_deref())?,
        status: SubmissionStatus::from_str(&row.status)?,
        queue_order: row.queue_order,
        created_at: DateTime::parse_from_rfc3339(&row.created_at)
            .map(|t| t.with_timezone(&Utc))
            .map_err(|_| DatabaseError::InvalidTimestamp {
                value: row.created_at.clone(),
            })?,
    })
}

fn parse_opt_enum<T: FromStr<Err = DatabaseError>>(
    value: Option<&str>,
) -> Result<Option<T>, DatabaseError> {
    value.map(T::from_str).transpose()
}

fn to_json_column<T: serde::Serialize>(value: &T, column: &str) -> Result<String, DatabaseError> {
    serde_json::to_string(value).map_err(|e| DatabaseError::InvalidJson {
        column: column.into(),
        reason: e.to_string(),
    })
}

fn from_json_column(raw: &str, column: &str) -> Result<Vec<String>, DatabaseError> {
    serde_json::from_str(raw).map_err(|e| DatabaseError::InvalidJson {
        column: column.into(),
        reason: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::sqlite::open_memory_database;
    use chrono::TimeZone;

    fn sample(name: &str, minutes_ago: i64) -> Submission {
        let created = Utc.with_ymd_and_hms(2026, 8, 1, 9, 0, 0).unwrap()
            - chrono::Duration::minutes(minutes_ago);
        Submission {
            id: Uuid::new_v4(),
            name: name.into(),
            date_of_birth: NaiveDate::from_ymd_opt(1984, 3, 11),
            gender: Some("F".into()),
            chief_complaint: "Chest discomfort".into(),
            symptom_onset: Some("2 hours ago".into()),
            pain_score: 6,
            symptoms: vec!["Chest pain".into()],
            medical_history: vec!["Hypertension".into()],
            medications: None,
            follow_up_answers: serde_json::json!({"chest_pain_score": 6}),
            ai_triage_level: Some(TriageLevel::High),
            confidence_level: Some(ConfidenceLevel::Moderate),
            ai_summary: Some("High-risk symptom cluster.".into()),
            red_flags: vec!["flag one".into(), "flag two".into()],
            risk_signals: vec!["signal".into()],
            missing_questions: vec![],
            triggered_by: vec!["chest pain".into()],
            nurse_decision: None,
            status: SubmissionStatus::Waiting,
            queue_order: None,
            created_at: created,
        }
    }

    #[test]
    fn insert_and_get_round_trip() {
        let conn = open_memory_database().unwrap();
        let sub = sample("Ada Byron", 30);
        insert_submission(&conn, &sub).unwrap();

        let loaded = get_submission(&conn, &sub.id).unwrap().unwrap();
        assert_eq!(loaded.name, "Ada Byron");
        assert_eq!(loaded.date_of_birth, NaiveDate::from_ymd_opt(1984, 3, 11));
        assert_eq!(loaded.pain_score, 6);
        assert_eq!(loaded.symptoms, vec!["Chest pain".to_string()]);
        assert_eq!(loaded.ai_triage_level, Some(TriageLevel::High));
        assert_eq!(loaded.red_flags.len(), 2);
        assert_eq!(loaded.status, SubmissionStatus::Waiting);
        assert_eq!(loaded.created_at, sub.created_at);
        assert_eq!(
            loaded.follow_up_answers,
            serde_json::json!({"chest_pain_score": 6})
        );
    }

    #[test]
    fn get_missing_returns_none() {
        let conn = open_memory_database().unwrap();
        assert!(get_submission(&conn, &Uuid::new_v4()).unwrap().is_none());
    }

    #[test]
    fn list_waiting_orders_by_queue_then_age() {
        let conn = open_memory_database().unwrap();

        let mut a = sample("A", 10);
        a.queue_order = Some(1);
        let mut b = sample("B", 50);
        b.queue_order = Some(0);
        let c = sample("C", 40); // never queued
        let d = sample("D", 90); // never queued, older

        for s in [&a, &b, &c, &d] {
            insert_submission(&conn, s).unwrap();
        }

        let names: Vec<String> = list_waiting(&conn)
            .unwrap()
            .into_iter()
            .map(|s| s.name)
            .collect();
        assert_eq!(names, vec!["B", "A", "D", "C"]);
    }

    #[test]
    fn list_waiting_excludes_in_treatment() {
        let conn = open_memory_database().unwrap();
        let sub = sample("A", 5);
        insert_submission(&conn, &sub).unwrap();
        set_nurse_decision(&conn, &sub.id, NurseDecision::Accept).unwrap();

        assert!(list_waiting(&conn).unwrap().is_empty());
        let loaded = get_submission(&conn, &sub.id).unwrap().unwrap();
        assert_eq!(loaded.status, SubmissionStatus::InTreatment);
        assert_eq!(loaded.nurse_decision, Some(NurseDecision::Accept));
        assert_eq!(loaded.queue_order, None);
    }

    #[test]
    fn set_decision_on_missing_submission_is_not_found() {
        let conn = open_memory_database().unwrap();
        let err = set_nurse_decision(&conn, &Uuid::new_v4(), NurseDecision::Override).unwrap_err();
        assert!(matches!(err, DatabaseError::NotFound { .. }));
    }

    #[test]
    fn update_queue_orders_is_atomic_batch() {
        let conn = open_memory_database().unwrap();
        let subs: Vec<Submission> = (0..4).map(|i| sample(&format!("P{i}"), i * 10)).collect();
        for s in &subs {
            insert_submission(&conn, s).unwrap();
        }

        let orders: Vec<(Uuid, i64)> = subs
            .iter()
            .rev()
            .enumerate()
            .map(|(i, s)| (s.id, i as i64))
            .collect();
        update_queue_orders(&conn, &orders).unwrap();

        let names: Vec<String> = list_waiting(&conn)
            .unwrap()
            .into_iter()
            .map(|s| s.name)
            .collect();
        assert_eq!(names, vec!["P3", "P2", "P1", "P0"]);
    }

    #[test]
    fn triage_results_written_onto_row() {
        let conn = open_memory_database().unwrap();
        let mut sub = sample("A", 5);
        sub.ai_triage_level = None;
        sub.confidence_level = None;
        sub.red_flags = vec![];
        insert_submission(&conn, &sub).unwrap();

        let triage: TriageAssessment = serde_json::from_str(
            r#"{"ai_triage_level":"moderate","confidence_level":"high",
                "ai_summary":"Symptom combination requiring evaluation.",
                "red_flags":["x"],"risk_signals":["y","z"],"missing_questions":["q"]}"#,
        )
        .unwrap();
        update_triage_results(&conn, &sub.id, &triage).unwrap();

        let loaded = get_submission(&conn, &sub.id).unwrap().unwrap();
        assert_eq!(loaded.ai_triage_level, Some(TriageLevel::Moderate));
        assert_eq!(loaded.confidence_level, Some(ConfidenceLevel::High));
        assert_eq!(loaded.red_flags, vec!["x".to_string()]);
        assert_eq!(loaded.risk_signals.len(), 2);
    }

    #[test]
    fn corrupt_enum_value_surfaces_as_invalid_enum() {
        let conn = open_memory_database().unwrap();
        let sub = sample("A", 5);
        insert_submission(&conn, &sub).unwrap();
        conn.execute(
            "UPDATE submissions SET ai_triage_level = 'urgent' WHERE id = ?1",
            params![sub.id.to_string()],
        )
        .unwrap();
        let err = get_submission(&conn, &sub.id).unwrap_err();
        assert!(matches!(err, DatabaseError::InvalidEnum { .. }));
    }
}

//! Loading issue snapshots from JSON.
//!
//! Records are validated one at a time so that a bad record is reported by
//! position and id. An unrecognized `status` or `priority` rejects the whole
//! snapshot; it is never sorted as a lowest or highest rank.

use std::collections::HashSet;

use civic_core::entities::Issue;
use serde_json::Value;

use crate::error::QueryError;

/// Parse a JSON array of issue records.
///
/// # Errors
///
/// Returns `QueryError::MalformedSnapshot` if the input is not a JSON array,
/// or `QueryError::InvalidRecord` for the first record that fails to parse or
/// repeats an earlier id.
pub fn load_snapshot(json: &str) -> Result<Vec<Issue>, QueryError> {
    let records: Vec<Value> =
        serde_json::from_str(json).map_err(|e| QueryError::MalformedSnapshot(e.to_string()))?;

    let mut seen = HashSet::with_capacity(records.len());
    let mut issues = Vec::with_capacity(records.len());
    for (index, record) in records.into_iter().enumerate() {
        let id = record_id(&record);
        let issue: Issue = serde_json::from_value(record).map_err(|e| QueryError::InvalidRecord {
            index,
            id: id.clone(),
            reason: e.to_string(),
        })?;
        if !seen.insert(issue.id.clone()) {
            return Err(QueryError::InvalidRecord {
                index,
                id,
                reason: "duplicate id".into(),
            });
        }
        issues.push(issue);
    }
    tracing::debug!(count = issues.len(), "loaded issue snapshot");
    Ok(issues)
}

fn record_id(record: &Value) -> String {
    match record.get("id") {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) => n.to_string(),
        _ => String::from("<missing>"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn loads_valid_records_in_order() {
        let json = r#"[
            {"id": "1", "title": "a", "description": "d", "category": "Bug",
             "status": "open", "priority": "low", "createdDate": "2024-01-15"},
            {"id": "2", "title": "b", "description": "d", "category": "Bug",
             "status": "in-progress", "priority": "high", "createdDate": "2024-01-14"}
        ]"#;
        let issues = load_snapshot(json).unwrap();
        assert_eq!(issues.len(), 2);
        assert_eq!(issues[0].id, "1");
        assert_eq!(issues[1].id, "2");
    }

    #[test]
    fn unknown_status_fails_closed_with_position() {
        let json = r#"[
            {"id": "1", "title": "a", "description": "d", "category": "Bug",
             "status": "open", "priority": "low", "createdDate": "2024-01-15"},
            {"id": "2", "title": "b", "description": "d", "category": "Bug",
             "status": "pending", "priority": "high", "createdDate": "2024-01-14"}
        ]"#;
        let err = load_snapshot(json).unwrap_err();
        match err {
            QueryError::InvalidRecord { index, id, reason } => {
                assert_eq!(index, 1);
                assert_eq!(id, "2");
                assert!(reason.contains("pending"), "{reason}");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn unknown_priority_fails_closed() {
        let json = r#"[{"id": "9", "title": "a", "description": "d", "category": "Bug",
             "status": "open", "priority": "blocker", "createdDate": "2024-01-15"}]"#;
        assert!(matches!(
            load_snapshot(json),
            Err(QueryError::InvalidRecord { index: 0, .. })
        ));
    }

    #[test]
    fn duplicate_ids_are_rejected() {
        let json = r#"[
            {"id": "1", "title": "a", "description": "d", "category": "Bug",
             "status": "open", "priority": "low", "createdDate": "2024-01-15"},
            {"id": "1", "title": "b", "description": "d", "category": "Bug",
             "status": "open", "priority": "low", "createdDate": "2024-01-16"}
        ]"#;
        let err = load_snapshot(json).unwrap_err();
        assert!(err.to_string().contains("duplicate id"));
    }

    #[test]
    fn non_array_is_malformed() {
        assert!(matches!(
            load_snapshot(r#"{"id": "1"}"#),
            Err(QueryError::MalformedSnapshot(_))
        ));
    }
}

//! Serde roundtrip and JsonSchema validation tests for wire types.

use chrono::{TimeZone, Utc};
use civic_core::entities::*;
use civic_core::enums::*;
use civic_core::identity::AuthIdentity;
use civic_core::responses::MessageResponse;
use schemars::schema_for;

/// Validate a JSON value against a schemars-generated schema.
fn validate_against_schema(
    schema: &serde_json::Value,
    instance: &serde_json::Value,
) -> Vec<String> {
    let validator = jsonschema::validator_for(schema).expect("schema should be valid");
    validator
        .iter_errors(instance)
        .map(|e| format!("{e}"))
        .collect()
}

macro_rules! roundtrip_and_validate {
    ($name:ident, $ty:ty, $instance:expr) => {
        #[test]
        fn $name() {
            let val: $ty = $instance;

            let json_str = serde_json::to_string_pretty(&val).unwrap();
            let recovered: $ty = serde_json::from_str(&json_str).unwrap();
            assert_eq!(
                recovered,
                val,
                "serde roundtrip failed for {}",
                stringify!($ty)
            );

            let schema = serde_json::to_value(schema_for!($ty)).unwrap();
            let instance = serde_json::to_value(&val).unwrap();
            let errors = validate_against_schema(&schema, &instance);
            assert!(
                errors.is_empty(),
                "Schema validation failed for {}: {:?}",
                stringify!($ty),
                errors
            );
        }
    };
}

roundtrip_and_validate!(
    issue_with_comments_roundtrip,
    Issue,
    Issue {
        id: "iss-a3f8b2c1".into(),
        title: "Streetlight out".into(),
        description: "Lamp at the corner of 5th and Pine is dark".into(),
        category: "Streetlight".into(),
        status: IssueStatus::InProgress,
        priority: Priority::High,
        location: Some("5th & Pine".into()),
        latitude: Some(47.61),
        longitude: Some(-122.33),
        image: Some("file:///photos/lamp.jpg".into()),
        owner_id: Some("u1".into()),
        comments: vec![Comment {
            id: "cmt-0badf00d".into(),
            user_id: "u2".into(),
            text: "Still dark tonight".into(),
            created_at: Utc.with_ymd_and_hms(2026, 1, 2, 20, 0, 0).unwrap(),
        }],
        created_at: Utc.with_ymd_and_hms(2026, 1, 1, 9, 0, 0).unwrap(),
        updated_at: Some(Utc.with_ymd_and_hms(2026, 1, 2, 20, 0, 0).unwrap()),
    }
);

roundtrip_and_validate!(
    new_issue_roundtrip,
    NewIssue,
    NewIssue {
        title: "Garbage not collected".into(),
        description: "Bins on Elm St skipped twice".into(),
        category: "Garbage".into(),
        priority: Some(Priority::Low),
        ..Default::default()
    }
);

roundtrip_and_validate!(
    identity_roundtrip,
    AuthIdentity,
    AuthIdentity {
        user_id: "u1".into(),
        role: Role::Admin,
        name: Some("Dana".into()),
    }
);

roundtrip_and_validate!(
    message_roundtrip,
    MessageResponse,
    MessageResponse::new("Issue deleted")
);

#[test]
fn issue_status_schema_rejects_unknown_value() {
    let schema = serde_json::to_value(schema_for!(IssueStatus)).unwrap();
    let errors = validate_against_schema(&schema, &serde_json::json!("pending"));
    assert!(!errors.is_empty());
}

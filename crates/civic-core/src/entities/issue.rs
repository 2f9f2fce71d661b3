use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::entities::Comment;
use crate::enums::{IssueStatus, Priority};
use crate::errors::CoreError;

/// A reported civic problem.
///
/// `owner_id` is the user who created the record. Client-side snapshots may
/// omit it; every record written by the server has it.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct Issue {
    pub id: String,
    pub title: String,
    pub description: String,
    pub category: String,
    pub status: IssueStatus,
    pub priority: Priority,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub latitude: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub longitude: Option<f64>,
    /// URI of the photo attached at report time.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(default, alias = "userId", alias = "ownerId")]
    pub owner_id: Option<String>,
    #[serde(default)]
    pub comments: Vec<Comment>,
    #[serde(alias = "createdDate", deserialize_with = "crate::timestamps::deserialize")]
    #[schemars(with = "DateTime<Utc>")]
    pub created_at: DateTime<Utc>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "crate::timestamps::deserialize_optional"
    )]
    #[schemars(with = "Option<DateTime<Utc>>")]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Payload for reporting a new issue. The owner is always the caller.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct NewIssue {
    pub title: String,
    pub description: String,
    pub category: String,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub latitude: Option<f64>,
    #[serde(default)]
    pub longitude: Option<f64>,
    #[serde(default)]
    pub image: Option<String>,
    /// Defaults to `medium` when absent.
    #[serde(default)]
    pub priority: Option<Priority>,
}

impl NewIssue {
    /// Check required fields and coordinate ranges.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::Validation` naming the first offending field.
    pub fn validate(&self) -> Result<(), CoreError> {
        for (field, value) in [
            ("title", &self.title),
            ("description", &self.description),
            ("category", &self.category),
        ] {
            if value.trim().is_empty() {
                return Err(CoreError::Validation(format!("{field} is required")));
            }
        }
        validate_coordinates(self.latitude, self.longitude)
    }
}

/// Latitude must lie in [-90, 90] and longitude in [-180, 180].
///
/// # Errors
///
/// Returns `CoreError::Validation` for out-of-range or non-finite values.
pub fn validate_coordinates(latitude: Option<f64>, longitude: Option<f64>) -> Result<(), CoreError> {
    if let Some(lat) = latitude {
        if !lat.is_finite() || !(-90.0..=90.0).contains(&lat) {
            return Err(CoreError::Validation(format!("latitude {lat} out of range")));
        }
    }
    if let Some(lon) = longitude {
        if !lon.is_finite() || !(-180.0..=180.0).contains(&lon) {
            return Err(CoreError::Validation(format!("longitude {lon} out of range")));
        }
    }
    Ok(())
}

impl Issue {
    /// Build the record for a freshly reported issue.
    #[must_use]
    pub fn from_new(id: String, owner_id: &str, new: NewIssue, now: DateTime<Utc>) -> Self {
        Self {
            id,
            title: new.title,
            description: new.description,
            category: new.category,
            status: IssueStatus::Open,
            priority: new.priority.unwrap_or_default(),
            location: new.location,
            latitude: new.latitude,
            longitude: new.longitude,
            image: new.image,
            owner_id: Some(owner_id.to_string()),
            comments: Vec::new(),
            created_at: now,
            updated_at: Some(now),
        }
    }
}

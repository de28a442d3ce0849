//! Request types for the account service.

use chrono::{DateTime, Utc};
use serde::Serialize;

/// Profile fields to update
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserBody {
    /// Display name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Client qualification flag
    #[serde(skip_serializing_if = "Option::is_none")]
    pub should_do_client_qualification: Option<bool>,
}

impl UserBody {
    /// Change the display name
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }
}

/// Notification settings to change; unset fields keep their value
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EmailNotificationSettingsOptional {
    /// Email on every commit
    #[serde(skip_serializing_if = "Option::is_none")]
    pub per_commit: Option<bool>,
    /// Email on every pull request
    #[serde(skip_serializing_if = "Option::is_none")]
    pub per_pull_request: Option<bool>,
    /// Only notify about the user's own activity
    #[serde(skip_serializing_if = "Option::is_none")]
    pub only_my_activity: Option<bool>,
}

/// Options for a new API token
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiTokenCreateRequest {
    /// Expiry; the token never expires when unset
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<DateTime<Utc>>,
}

//! Response types for the account service.

use crate::types::{DataResponse, ListResponse, Provider};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The authenticated user
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// User id
    pub id: i64,
    /// Display name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Primary email
    pub main_email: String,
    /// Other emails
    #[serde(default)]
    pub other_emails: Vec<String>,
    /// Codacy administrator
    pub is_admin: bool,
    /// Account active
    pub is_active: bool,
    /// Sign-up time
    pub created: DateTime<Utc>,
    /// Intercom identity hash
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub intercom_hash: Option<String>,
    /// Zendesk identity hash
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub zendesk_hash: Option<String>,
    /// Client qualification flag
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub should_do_client_qualification: Option<bool>,
}

/// An email address of the user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserEmail {
    /// Address
    pub email: String,
    /// Hidden from other users
    pub is_private: bool,
}

/// All emails of the user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserEmails {
    /// Primary address
    pub main_email: UserEmail,
    /// Other addresses
    #[serde(default)]
    pub other_emails: Vec<UserEmail>,
}

/// Email notification settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmailNotificationSettings {
    /// Email on every commit
    pub per_commit: bool,
    /// Email on every pull request
    pub per_pull_request: bool,
    /// Only notify about the user's own activity
    pub only_my_activity: bool,
}

/// A Git provider integration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Integration {
    /// Provider
    pub provider: Provider,
    /// Provider host
    pub host: String,
    /// Last successful authentication
    pub last_authenticated: DateTime<Utc>,
}

/// An API token of the user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiToken {
    /// Token id
    pub id: i64,
    /// Token value
    pub token: String,
    /// Expiry
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<DateTime<Utc>>,
}

/// Response from `GET /user` and `PATCH /user`
pub type UserResponse = DataResponse<User>;
/// Response from `GET /user/emails`
pub type UserEmailsResponse = DataResponse<UserEmails>;
/// Response from `GET /user/emails/settings`
pub type EmailNotificationSettingsResponse = DataResponse<EmailNotificationSettings>;
/// Paginated integrations
pub type IntegrationListResponse = ListResponse<Integration>;
/// Paginated API tokens
pub type ApiTokenListResponse = ListResponse<ApiToken>;

//! Organization and people types.

use super::{DataResponse, JoinMode, JoinStatus, ListResponse, OrganizationType, Provider};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// An organization on a Git provider
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Organization {
    /// Codacy identifier
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub identifier: Option<i64>,
    /// Identifier on the provider
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub remote_identifier: Option<String>,
    /// Name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Avatar URL
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
    /// Creation time
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created: Option<DateTime<Utc>>,
    /// Provider
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub provider: Option<Provider>,
    /// Join mode
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub join_mode: Option<JoinMode>,
    /// Account or organization
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub organization_type: Option<OrganizationType>,
    /// Caller's membership state
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub join_status: Option<JoinStatus>,
    /// Whether login is restricted to this provider
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub single_provider_login: Option<bool>,
    /// DAST availability
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub has_dast_access: Option<bool>,
    /// SCA availability
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub has_sca_enabled: Option<bool>,
}

/// A person (member or committer) in an organization
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrganizationPerson {
    /// Display name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Primary email
    pub email: String,
    /// All known emails
    #[serde(default)]
    pub emails: Vec<String>,
    /// Codacy user id, for members
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<i64>,
    /// Committer id, for committers
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub committer_id: Option<i64>,
    /// Last login
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_login: Option<DateTime<Utc>>,
    /// Last analysed commit by this person
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_analysis: Option<DateTime<Utc>>,
    /// Whether the person counts as active
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
    /// Whether the caller may remove this person
    #[serde(default)]
    pub can_be_removed: bool,
}

/// People to remove from an organization
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrganizationRemovePeopleBody {
    /// Emails of the people to remove
    pub emails: Vec<String>,
}

impl OrganizationRemovePeopleBody {
    /// Remove the given emails
    pub fn new<I, S>(emails: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            emails: emails.into_iter().map(Into::into).collect(),
        }
    }
}

/// Per-email outcome of a removal
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemovePeopleEmailStatus {
    /// Email
    pub email: String,
    /// Failure reason
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Result of removing people
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrganizationRemovePeopleResponse {
    /// Removed emails
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub success: Option<Vec<RemovePeopleEmailStatus>>,
    /// Emails that could not be removed
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub failed: Option<Vec<RemovePeopleEmailStatus>>,
}

/// A commit author suggested for linking to a person
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SuggestedAuthor {
    /// Author name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Author email
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    /// Number of commits
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub commit_count: Option<i32>,
}

/// Filters for listing people
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListPeopleParams {
    /// Cursor from a previous page
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cursor: Option<String>,
    /// Page size
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<i32>,
    /// Name or email filter
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
    /// Only Codacy members, excluding committers
    #[serde(skip_serializing_if = "Option::is_none")]
    pub only_members: Option<bool>,
}

/// Filters for author suggestions
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SuggestedAuthorsParams {
    /// Cursor from a previous page
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cursor: Option<String>,
    /// Page size
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<i32>,
    /// Name or email filter
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
}

/// A single organization
pub type OrganizationResponse = DataResponse<Organization>;
/// Paginated organizations
pub type OrganizationListResponse = ListResponse<Organization>;
/// Paginated people
pub type PeopleListResponse = ListResponse<OrganizationPerson>;
/// Paginated author suggestions
pub type SuggestedAuthorListResponse = ListResponse<SuggestedAuthor>;

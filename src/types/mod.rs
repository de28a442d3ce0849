//! Common types for the Codacy API.
//!
//! Defines the wire enums, pagination envelopes and data structures shared
//! across services. Service-specific payloads live next to their service.

use crate::errors::ConfigurationError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub mod analysis;
pub mod issue;
pub mod organization;
pub mod repository;

pub use analysis::*;
pub use issue::*;
pub use organization::*;
pub use repository::*;

/// Git provider hosting an organization
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Provider {
    /// GitHub
    #[serde(rename = "gh")]
    GitHub,
    /// GitLab
    #[serde(rename = "gl")]
    GitLab,
    /// Bitbucket
    #[serde(rename = "bb")]
    Bitbucket,
    /// GitHub Enterprise
    #[serde(rename = "ghe")]
    GitHubEnterprise,
    /// GitLab Enterprise
    #[serde(rename = "gle")]
    GitLabEnterprise,
    /// Bitbucket Server
    #[serde(rename = "bbs")]
    BitbucketServer,
}

impl Provider {
    /// Short code used in URLs and payloads
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::GitHub => "gh",
            Self::GitLab => "gl",
            Self::Bitbucket => "bb",
            Self::GitHubEnterprise => "ghe",
            Self::GitLabEnterprise => "gle",
            Self::BitbucketServer => "bbs",
        }
    }
}

impl fmt::Display for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Provider {
    type Err = ConfigurationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "gh" => Ok(Self::GitHub),
            "gl" => Ok(Self::GitLab),
            "bb" => Ok(Self::Bitbucket),
            "ghe" => Ok(Self::GitHubEnterprise),
            "gle" => Ok(Self::GitLabEnterprise),
            "bbs" => Ok(Self::BitbucketServer),
            other => Err(ConfigurationError::invalid(
                "provider",
                format!("unknown provider `{}`", other),
            )),
        }
    }
}

/// Repository visibility
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Visibility {
    /// Public repository
    Public,
    /// Private repository
    Private,
    /// Visible to logged-in users
    LoginPublic,
}

/// Repository permission level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Permission {
    /// Administrator
    Admin,
    /// Write access
    Write,
    /// Read access
    Read,
}

/// Issue severity level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SeverityLevel {
    /// Informational
    Info,
    /// Warning
    Warning,
    /// High
    High,
    /// Error
    Error,
}

/// How users join an organization
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum JoinMode {
    /// Anyone may join
    Auto,
    /// Joins are approved automatically for admins
    AdminAuto,
    /// Joins must be requested
    Request,
}

/// Caller's membership state in an organization
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum JoinStatus {
    /// Full member
    Member,
    /// Join request pending
    PendingMember,
    /// Member on the provider but not on Codacy
    RemoteMember,
}

/// Kind of organization
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OrganizationType {
    /// Personal account
    Account,
    /// Organization
    Organization,
}

/// Role of a person in an organization
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    /// Administrator
    Admin,
    /// Manager
    Manager,
    /// Member
    Member,
}

/// Whether a repository is added to Codacy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AddedState {
    /// Not added
    NotAdded,
    /// Added
    Added,
    /// Added and followed by the caller
    Following,
}

/// Whether an issue was introduced or fixed by a change
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DeltaType {
    /// Introduced
    Added,
    /// Fixed
    Fixed,
}

/// Cursor pagination metadata
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginationInfo {
    /// Cursor for the next page
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cursor: Option<String>,
    /// Page size
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit: Option<i32>,
    /// Total number of items
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total: Option<i32>,
}

/// Paginated list envelope
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListResponse<T> {
    /// Pagination metadata
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pagination: Option<PaginationInfo>,
    /// Items
    #[serde(default = "Vec::new")]
    pub data: Vec<T>,
}

impl<T> ListResponse<T> {
    /// Cursor for the next page, if there is one
    pub fn next_cursor(&self) -> Option<&str> {
        self.pagination
            .as_ref()
            .and_then(|p| p.cursor.as_deref())
            .filter(|c| !c.is_empty())
    }
}

/// Single-item envelope
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataResponse<T> {
    /// Payload
    pub data: T,
}

/// Cursor and page size
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PageParams {
    /// Cursor from a previous page
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cursor: Option<String>,
    /// Page size
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<i32>,
}

impl PageParams {
    /// First page with the server's default size
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the page size
    pub fn limit(mut self, limit: i32) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Continue from a cursor
    pub fn cursor(mut self, cursor: impl Into<String>) -> Self {
        self.cursor = Some(cursor.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use test_case::test_case;

    #[test_case(Provider::GitHub, "gh")]
    #[test_case(Provider::GitLab, "gl")]
    #[test_case(Provider::Bitbucket, "bb")]
    #[test_case(Provider::GitHubEnterprise, "ghe")]
    #[test_case(Provider::GitLabEnterprise, "gle")]
    #[test_case(Provider::BitbucketServer, "bbs")]
    fn test_provider_wire_form(provider: Provider, wire: &str) {
        assert_eq!(provider.to_string(), wire);
        assert_eq!(serde_json::to_value(provider).unwrap(), wire);
        assert_eq!(wire.parse::<Provider>().unwrap(), provider);
    }

    #[test]
    fn test_unknown_provider_rejected() {
        assert!("github".parse::<Provider>().is_err());
    }

    #[test]
    fn test_enum_wire_strings() {
        assert_eq!(serde_json::to_value(Permission::Admin).unwrap(), "admin");
        assert_eq!(serde_json::to_value(JoinMode::AdminAuto).unwrap(), "adminAuto");
        assert_eq!(serde_json::to_value(JoinStatus::PendingMember).unwrap(), "pendingMember");
        assert_eq!(serde_json::to_value(UserRole::Manager).unwrap(), "manager");
        assert_eq!(serde_json::to_value(Visibility::LoginPublic).unwrap(), "LoginPublic");
        assert_eq!(serde_json::to_value(AddedState::NotAdded).unwrap(), "NotAdded");
        assert_eq!(serde_json::to_value(SeverityLevel::High).unwrap(), "High");
    }

    #[test]
    fn test_list_response_next_cursor() {
        let page: ListResponse<String> = serde_json::from_str(
            r#"{"pagination":{"cursor":"abc","limit":10,"total":42},"data":["a","b"]}"#,
        )
        .unwrap();
        assert_eq!(page.next_cursor(), Some("abc"));
        assert_eq!(page.data.len(), 2);

        let last: ListResponse<String> =
            serde_json::from_str(r#"{"pagination":{"cursor":""},"data":[]}"#).unwrap();
        assert_eq!(last.next_cursor(), None);
    }

    #[test]
    fn test_page_params_encoding() {
        let params = PageParams::new().cursor("next token").limit(50);
        assert_eq!(
            serde_urlencoded::to_string(&params).unwrap(),
            "cursor=next+token&limit=50"
        );
        assert_eq!(serde_urlencoded::to_string(PageParams::new()).unwrap(), "");
    }
}

//! Repository types.

use super::{AddedState, Permission, Provider, Visibility};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Identifying fields of a repository
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RepositorySummary {
    /// Codacy repository id
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub repository_id: Option<i64>,
    /// Provider
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub provider: Option<Provider>,
    /// Owning organization
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owner: Option<String>,
    /// Repository name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

/// A repository known to Codacy
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Repository {
    /// Identifying fields
    #[serde(flatten)]
    pub summary: RepositorySummary,
    /// `owner/name`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub full_path: Option<String>,
    /// Visibility
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub visibility: Option<Visibility>,
    /// Identifier on the provider
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub remote_identifier: Option<String>,
    /// Last update
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_updated: Option<DateTime<Utc>>,
    /// Caller's permission
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub permission: Option<Permission>,
    /// Setup problems
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub problems: Option<Vec<RepositoryProblem>>,
    /// Detected languages
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub languages: Option<Vec<String>>,
    /// Default branch
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_branch: Option<Branch>,
    /// Badge URLs
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub badges: Option<Badges>,
    /// Applied coding standards
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub standards: Option<Vec<CodingStandardInfo>>,
    /// Whether the repository is added/followed
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub added_state: Option<AddedState>,
    /// Gate policy id
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gate_policy_id: Option<i64>,
    /// Gate policy name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gate_policy_name: Option<String>,
}

impl Repository {
    /// Repository name, if present
    pub fn name(&self) -> Option<&str> {
        self.summary.name.as_deref()
    }
}

/// A setup problem preventing analysis
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RepositoryProblem {
    /// Description
    pub message: String,
    /// Suggested fixes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub actions: Option<Vec<ProblemLink>>,
    /// Problem code
    pub code: String,
    /// Severity
    pub severity: String,
}

/// A link attached to a problem
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProblemLink {
    /// Label
    pub name: String,
    /// Target
    pub url: String,
}

/// A branch
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Branch {
    /// Branch id
    pub id: i64,
    /// Branch name
    pub name: String,
    /// Whether this is the default branch
    #[serde(default)]
    pub is_default: bool,
    /// Whether analysis is enabled
    #[serde(default)]
    pub is_enabled: bool,
    /// Last update
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_updated: Option<DateTime<Utc>>,
    /// Branch type
    #[serde(default)]
    pub branch_type: String,
    /// Last commit SHA
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_commit: Option<String>,
}

/// Badge URLs
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Badges {
    /// Grade badge
    pub grade: String,
    /// Coverage badge
    pub coverage: String,
}

/// Reference to a coding standard
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CodingStandardInfo {
    /// Id
    pub id: i64,
    /// Name
    pub name: String,
}

//! Request types for the analysis service.

use crate::types::Visibility;
use serde::Serialize;

/// Default window for commit statistics, in days
pub const DEFAULT_COMMIT_STATISTICS_DAYS: i32 = 31;

/// Filters for listing repositories with analysis
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListRepositoriesWithAnalysisParams {
    /// Cursor from a previous page
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cursor: Option<String>,
    /// Page size
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<i32>,
    /// Name filter
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
    /// Comma-separated repository names
    #[serde(skip_serializing_if = "Option::is_none")]
    pub repositories: Option<String>,
    /// Comma-separated segment ids
    #[serde(skip_serializing_if = "Option::is_none")]
    pub segments: Option<String>,
}

/// Search body for repositories with analysis
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchOrganizationRepositoriesRequest {
    /// Free-text query
    #[serde(skip_serializing_if = "Option::is_none")]
    pub query: Option<String>,
    /// Repository names
    #[serde(skip_serializing_if = "Option::is_none")]
    pub repositories: Option<Vec<String>>,
    /// Segment ids
    #[serde(skip_serializing_if = "Option::is_none")]
    pub segments: Option<Vec<String>>,
    /// Languages
    #[serde(skip_serializing_if = "Option::is_none")]
    pub languages: Option<Vec<String>>,
    /// Visibility
    #[serde(skip_serializing_if = "Option::is_none")]
    pub visibility: Option<Vec<Visibility>>,
}

/// Branch selector
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BranchParams {
    /// Branch; the default branch when unset
    #[serde(skip_serializing_if = "Option::is_none")]
    pub branch: Option<String>,
}

impl BranchParams {
    /// Select a branch
    pub fn branch(branch: impl Into<String>) -> Self {
        Self {
            branch: Some(branch.into()),
        }
    }
}

/// Enable or disable patterns of a tool
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigureToolBody {
    /// Patterns to enable
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enable_patterns: Option<Vec<String>>,
    /// Patterns to disable
    #[serde(skip_serializing_if = "Option::is_none")]
    pub disable_patterns: Option<Vec<String>>,
}

/// Filters for listing a repository's pull requests
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListPullRequestsParams {
    /// Page size
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<i32>,
    /// Cursor from a previous page
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cursor: Option<String>,
    /// Title filter
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
    /// Include pull requests without analysis
    pub include_not_analyzed: bool,
}

/// Filters for an organization's pull requests
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListOrganizationPullRequestsParams {
    /// Page size
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<i32>,
    /// Cursor from a previous page
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cursor: Option<String>,
    /// Title filter
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
    /// Comma-separated repository names
    #[serde(skip_serializing_if = "Option::is_none")]
    pub repositories: Option<String>,
}

/// Window for commit statistics
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CommitStatisticsParams {
    /// Branch; the default branch when unset
    #[serde(skip_serializing_if = "Option::is_none")]
    pub branch: Option<String>,
    /// Number of days to cover
    pub days: i32,
}

impl Default for CommitStatisticsParams {
    fn default() -> Self {
        Self {
            branch: None,
            days: DEFAULT_COMMIT_STATISTICS_DAYS,
        }
    }
}

/// Filters for listing commits
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ListCommitsParams {
    /// Branch; the default branch when unset
    #[serde(skip_serializing_if = "Option::is_none")]
    pub branch: Option<String>,
    /// Cursor from a previous page
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cursor: Option<String>,
    /// Page size
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<i32>,
}

/// Filters for issues between two commits
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CommitDeltaIssuesParams {
    /// Commit to compare against; the parent when unset
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_commit_uuid: Option<String>,
    /// `new` or `fixed`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    /// Only potential issues
    #[serde(skip_serializing_if = "Option::is_none")]
    pub only_potential: Option<bool>,
    /// Cursor from a previous page
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cursor: Option<String>,
    /// Page size
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<i32>,
}

/// Filters for a commit's files
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListCommitFilesParams {
    /// Branch
    #[serde(skip_serializing_if = "Option::is_none")]
    pub branch: Option<String>,
    /// `withCoverageChanges` and similar server-side filters
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filter: Option<String>,
    /// Cursor from a previous page
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cursor: Option<String>,
    /// Page size
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<i32>,
    /// Path filter
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
    /// Sort column
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort_column: Option<String>,
    /// `asc` or `desc`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub column_order: Option<String>,
}

/// Filters for a pull request's files
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListPullRequestFilesParams {
    /// Cursor from a previous page
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cursor: Option<String>,
    /// Page size
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<i32>,
    /// Sort column
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort_column: Option<String>,
    /// `asc` or `desc`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub column_order: Option<String>,
}

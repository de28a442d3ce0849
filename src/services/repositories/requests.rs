//! Request types for the repositories service.

use crate::types::{Provider, SeverityLevel};
use serde::{Deserialize, Serialize};

/// Add a repository to Codacy
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AddRepositoryBody {
    /// `organization/repository`
    pub repository_full_path: String,
    /// Provider hosting the repository
    pub provider: Provider,
}

impl AddRepositoryBody {
    /// Add `full_path` from `provider`
    pub fn new(provider: Provider, full_path: impl Into<String>) -> Self {
        Self {
            repository_full_path: full_path.into(),
            provider,
        }
    }
}

/// Branch settings to change
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateRepositoryBranchConfigurationBody {
    /// Enable or disable analysis of the branch
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_enabled: Option<bool>,
}

/// Filters for listing branches
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListBranchesParams {
    /// Only enabled (or disabled) branches
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,
    /// Cursor from a previous page
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cursor: Option<String>,
    /// Page size
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<i32>,
    /// Name filter
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
    /// Sort column
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort: Option<String>,
    /// `asc` or `desc`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub direction: Option<String>,
}

/// Filters for listing files
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListFilesParams {
    /// Branch; the default branch when unset
    #[serde(skip_serializing_if = "Option::is_none")]
    pub branch: Option<String>,
    /// Path filter
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
    /// Sort column
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort: Option<String>,
    /// `asc` or `desc`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub direction: Option<String>,
    /// Cursor from a previous page
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cursor: Option<String>,
    /// Page size
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<i32>,
}

#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ReanalyzeParams {
    pub clean_cache: bool,
}

/// Repository-level quality thresholds
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RepositoryQualitySettings {
    /// Maximum issue percentage
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_issue_percentage: Option<i32>,
    /// Maximum duplicated files percentage
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_duplicated_files_percentage: Option<i32>,
    /// Minimum coverage percentage
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_coverage_percentage: Option<i32>,
    /// Maximum complex files percentage
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_complex_files_percentage: Option<i32>,
    /// Clone blocks above which a file counts as duplicated
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_duplication_block_threshold: Option<i32>,
    /// Complexity above which a file counts as complex
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_complexity_value_threshold: Option<i32>,
}

/// Quality gate applied to commits or pull requests
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QualityGate {
    /// New issues threshold
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub issue_threshold: Option<IssueThreshold>,
    /// New security issues threshold
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub security_issue_threshold: Option<i32>,
    /// Minimum severity counted for security issues
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub security_issue_minimum_severity: Option<SeverityLevel>,
    /// Duplication threshold
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duplication_threshold: Option<i32>,
    /// Coverage variation threshold
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub coverage_threshold_with_decimals: Option<f64>,
    /// Diff coverage threshold
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub diff_coverage_threshold: Option<i32>,
    /// Complexity threshold
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub complexity_threshold: Option<i32>,
}

/// Issue count gate
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IssueThreshold {
    /// Maximum new issues
    pub threshold: i32,
    /// Minimum severity counted
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub minimum_severity: Option<SeverityLevel>,
}

//! Response types for the repositories service.

use super::{QualityGate, RepositoryQualitySettings};
use crate::types::{AddedState, Branch, DataResponse, ListResponse, Repository};
use serde::{Deserialize, Serialize};

/// Quality gate plus the gate policy it comes from
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QualitySettingsWithGatePolicy {
    /// Effective gate
    pub quality_gate: QualityGate,
    /// Policy applied to the repository
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub repository_gate_policy_info: Option<RepositoryGatePolicy>,
}

/// Gate policy reference
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepositoryGatePolicy {
    /// Policy id
    pub id: i64,
    /// Policy name
    pub name: String,
}

/// A file with summary analysis metrics
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileWithAnalysisInfo {
    /// File id
    pub file_id: i64,
    /// Branch id
    pub branch_id: i64,
    /// Path
    pub path: String,
    /// Issue count
    pub total_issues: i32,
    /// Method count
    pub number_of_methods: i32,
    /// Numeric grade
    pub grade: i32,
    /// Letter grade
    pub grade_letter: String,
    /// Complexity
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub complexity: Option<i32>,
    /// Coverage
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub coverage_with_decimals: Option<f64>,
    /// Lines of code
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lines_of_code: Option<i32>,
}

/// Full analysis of one file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileInformationWithAnalysis {
    /// File metadata
    pub file: FileMetadata,
    /// Size metrics
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metrics: Option<FileMetrics>,
    /// Coverage
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub coverage: Option<FileCoverageAnalysis>,
    /// Quality
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quality: Option<FileQualityInfo>,
}

/// File metadata
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileMetadata {
    /// Branch id
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub branch_id: Option<i64>,
    /// Commit id
    pub commit_id: i64,
    /// Commit SHA
    pub commit_sha: String,
    /// File id
    pub file_id: i64,
    /// File data id
    pub file_data_id: i64,
    /// Path
    pub path: String,
    /// Language
    pub language: String,
    /// Link on the provider
    pub git_provider_url: String,
    /// Excluded from analysis
    pub ignored: bool,
}

/// File size metrics
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileMetrics {
    /// Lines of code
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lines_of_code: Option<i32>,
    /// Commented lines
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub commented_lines_of_code: Option<i64>,
    /// Methods
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub number_of_methods: Option<i32>,
    /// Classes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub number_of_classes: Option<i32>,
}

/// File coverage
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileCoverageAnalysis {
    /// Coverage percentage
    pub coverage: f64,
    /// Coverable lines
    pub coverable_lines: i64,
    /// Covered lines
    pub covered_lines: i64,
}

/// File quality
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileQualityInfo {
    /// Issue count
    pub total_issues: i32,
    /// Numeric grade
    pub grade: i32,
    /// Letter grade
    pub grade_letter: String,
    /// Complexity
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub complexity: Option<i32>,
    /// Duplicated blocks
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duplication: Option<i32>,
    /// Duplicated lines
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duplicated_lines_of_code: Option<i32>,
}

/// A single repository
pub type RepositoryResponse = DataResponse<Repository>;
/// Follow state after following a repository
pub type AddedStateResponse = DataResponse<AddedState>;
/// Paginated branches
pub type BranchListResponse = ListResponse<Branch>;
/// Repository quality settings
pub type RepositoryQualitySettingsResponse = DataResponse<RepositoryQualitySettings>;
/// Commit or pull request quality gate
pub type QualitySettingsResponse = DataResponse<QualitySettingsWithGatePolicy>;
/// Paginated files
pub type FileListResponse = ListResponse<FileWithAnalysisInfo>;

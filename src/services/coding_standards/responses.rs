//! Response types for the coding standards service.

use crate::types::{DataResponse, ListResponse, Provider, SeverityLevel};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A coding standard
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CodingStandard {
    /// Id
    pub id: i64,
    /// Name
    pub name: String,
    /// Description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Organization default
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_default: Option<bool>,
    /// Draft not yet promoted
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_draft: Option<bool>,
    /// Creation time
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    /// Last update
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
    /// Creator
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_by: Option<String>,
    /// Repositories using it
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub repository_count: Option<i32>,
    /// Languages covered
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub languages: Option<Vec<String>>,
}

/// A tool within a coding standard
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CodingStandardTool {
    /// Tool UUID
    pub uuid: String,
    /// Tool name
    pub name: String,
    /// Enabled
    pub is_enabled: bool,
    /// Language
    pub language: String,
    /// Available patterns
    pub total_patterns: i32,
    /// Enabled patterns
    pub enabled_patterns: i32,
}

/// A pattern with its configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfiguredPattern {
    /// Pattern id
    pub pattern_id: String,
    /// Title
    pub title: String,
    /// Description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Category
    pub category: String,
    /// Severity
    pub level: SeverityLevel,
    /// Languages
    #[serde(default)]
    pub languages: Vec<String>,
    /// Enabled
    pub is_enabled: bool,
    /// Recommended by Codacy
    pub is_recommended: bool,
    /// Pattern parameters
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parameters: Option<HashMap<String, serde_json::Value>>,
    /// Tags
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
}

/// A repository using a coding standard
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CodingStandardRepository {
    /// Repository id
    pub repository_id: i64,
    /// Repository name
    pub repository_name: String,
    /// Provider
    pub provider: Provider,
    /// Organization
    pub organization_name: String,
    /// When the standard was applied
    pub applied_at: DateTime<Utc>,
}

/// Outcome of applying a coding standard
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplyCodingStandardResult {
    /// Repositories attempted
    pub total_repositories: i32,
    /// Succeeded
    pub success_count: i32,
    /// Failed
    pub failed_count: i32,
    /// Skipped
    pub skipped_count: i32,
    /// Per-repository results
    #[serde(default)]
    pub results: Vec<RepositoryApplicationResult>,
}

/// Outcome for one repository
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RepositoryApplicationResult {
    /// Repository id
    pub repository_id: i64,
    /// Repository name
    pub repository_name: String,
    /// `success`, `failed` or `skipped`
    pub status: String,
    /// Failure reason
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
}

/// Coding standards of an organization
pub type CodingStandardsListResponse = DataResponse<Vec<CodingStandard>>;
/// Single coding standard
pub type CodingStandardResponse = DataResponse<CodingStandard>;
/// Tools of a coding standard
pub type CodingStandardToolsListResponse = DataResponse<Vec<CodingStandardTool>>;
/// Paginated patterns
pub type ConfiguredPatternsListResponse = ListResponse<ConfiguredPattern>;
/// Paginated repositories using a coding standard
pub type CodingStandardRepositoriesListResponse = ListResponse<CodingStandardRepository>;
/// Apply/promote outcome
pub type ApplyCodingStandardToRepositoriesResultResponse = DataResponse<ApplyCodingStandardResult>;

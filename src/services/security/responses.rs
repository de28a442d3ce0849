//! Response types for the security service.

use crate::types::{DataResponse, ListResponse};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use uuid::Uuid;

/// A security finding
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SrmItem {
    /// Finding id
    pub id: Uuid,
    /// Title
    pub title: String,
    /// Description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Severity
    pub severity: String,
    /// Category
    pub category: String,
    /// Repository
    pub repository: String,
    /// File path
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_path: Option<String>,
    /// Line
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub line_number: Option<i32>,
    /// Status
    pub status: String,
    /// Ignored
    pub is_ignored: bool,
    /// Why it was ignored
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ignored_reason: Option<String>,
    /// Who ignored it
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ignored_by: Option<String>,
    /// When it was ignored
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ignored_at: Option<DateTime<Utc>>,
    /// First detection
    pub first_detected: DateTime<Utc>,
    /// Latest detection
    pub last_detected: DateTime<Utc>,
    /// CVSS score
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cvss_score: Option<f64>,
    /// CWE id
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cwe_id: Option<String>,
    /// CVE id
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cve_id: Option<String>,
    /// Vulnerable package
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub package_name: Option<String>,
    /// Vulnerable version
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub package_version: Option<String>,
    /// First fixed version
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fixed_version: Option<String>,
}

/// Security overview of an organization
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SrmDashboard {
    /// All findings
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_items: Option<i32>,
    /// Critical findings
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub critical_items: Option<i32>,
    /// High findings
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub high_items: Option<i32>,
    /// Medium findings
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub medium_items: Option<i32>,
    /// Low findings
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub low_items: Option<i32>,
    /// Findings per category
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub items_by_category: Option<HashMap<String, i32>>,
    /// Counts over time
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trend: Option<Vec<SrmTrendData>>,
}

/// One point of a trend
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SrmTrendData {
    /// Day
    pub date: DateTime<Utc>,
    /// Findings
    pub count: i32,
}

/// Finding counts for a repository
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SecurityRepositorySummary {
    /// Repository name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub repository: Option<String>,
    /// All findings
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_items: Option<i32>,
    /// Critical findings
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub critical_items: Option<i32>,
    /// High findings
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub high_items: Option<i32>,
}

/// Finding counts at a point in time
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SrmDashboardHistoryPoint {
    /// Day
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<DateTime<Utc>>,
    /// All findings
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_items: Option<i32>,
    /// Critical findings
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub critical_items: Option<i32>,
    /// High findings
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub high_items: Option<i32>,
}

/// Findings in a category
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SecurityCategory {
    /// Category
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    /// Findings
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub count: Option<i32>,
    /// Description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// A user with security manager rights
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SecurityManager {
    /// User id
    pub user_id: i64,
    /// Username
    pub username: String,
    /// Email
    pub email: String,
    /// Granted at
    pub added_at: DateTime<Utc>,
}

/// Result of a DAST upload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DastUploadResult {
    /// Report id
    pub report_id: Uuid,
    /// Upload time
    pub uploaded_at: DateTime<Utc>,
    /// Findings in the report
    pub items_found: i32,
}

/// An uploaded DAST report
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DastReport {
    /// Report id
    pub report_id: Uuid,
    /// Scanner
    pub tool_name: String,
    /// Upload time
    pub uploaded_at: DateTime<Utc>,
    /// Findings in the report
    pub items_found: i32,
    /// Scanned target
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scan_target: Option<String>,
}

/// SLA thresholds
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SlaConfig {
    /// SLA tracking enabled
    pub is_enabled: bool,
    /// Days to fix critical findings
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub critical_threshold_days: Option<i32>,
    /// Days to fix high findings
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub high_threshold_days: Option<i32>,
    /// Days to fix medium findings
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub medium_threshold_days: Option<i32>,
    /// Days to fix low findings
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub low_threshold_days: Option<i32>,
}

/// SLA configuration; `data` is absent when none is set
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlaConfigResponse {
    /// Configuration
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<SlaConfig>,
}

/// OSSF scorecard of a repository
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OssfScorecard {
    /// Repository URL
    pub repository_url: String,
    /// Aggregate score
    pub score: f64,
    /// Scorecard version
    pub scorecard_version: String,
    /// Individual checks
    #[serde(default)]
    pub checks: Vec<OssfScorecardCheck>,
}

/// One scorecard check
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OssfScorecardCheck {
    /// Check name
    pub name: String,
    /// Score
    pub score: f64,
    /// Explanation
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    /// Documentation link
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub documentation: Option<String>,
}

/// Paginated findings
pub type SrmItemsResponse = ListResponse<SrmItem>;
/// Single finding
pub type SrmItemResponse = DataResponse<SrmItem>;
/// Dashboard
pub type SrmDashboardResponse = DataResponse<SrmDashboard>;
/// Per-repository dashboard
pub type SrmDashboardRepositoriesResponse = DataResponse<Vec<SecurityRepositorySummary>>;
/// Dashboard history
pub type SrmDashboardHistoryResponse = DataResponse<Vec<SrmDashboardHistoryPoint>>;
/// Per-category dashboard
pub type SrmDashboardCategoriesResponse = DataResponse<Vec<SecurityCategory>>;
/// Paginated security managers
pub type SecurityManagersResponse = ListResponse<SecurityManager>;
/// Paginated per-repository counts
pub type SecurityRepositoriesResponse = ListResponse<SecurityRepositorySummary>;
/// Paginated categories
pub type SecurityCategoriesResponse = ListResponse<SecurityCategory>;
/// DAST upload result
pub type DastReportUploadResponse = DataResponse<DastUploadResult>;
/// Paginated DAST reports
pub type DastReportsResponse = ListResponse<DastReport>;
/// Scorecard
pub type OssfScorecardResponse = DataResponse<OssfScorecard>;

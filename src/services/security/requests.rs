//! Request types for the security service.

use crate::transport::{FileUpload, MultipartForm};
use bytes::Bytes;
use chrono::{DateTime, Utc};
use serde::Serialize;

/// Finding search filters
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchSrmItems {
    /// Free-text query
    #[serde(skip_serializing_if = "Option::is_none")]
    pub query: Option<String>,
    /// Severities
    #[serde(skip_serializing_if = "Option::is_none")]
    pub severities: Option<Vec<String>>,
    /// Categories
    #[serde(skip_serializing_if = "Option::is_none")]
    pub categories: Option<Vec<String>>,
    /// Statuses
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<Vec<String>>,
    /// Repository names
    #[serde(skip_serializing_if = "Option::is_none")]
    pub repositories: Option<Vec<String>>,
    /// Include ignored findings
    #[serde(skip_serializing_if = "Option::is_none")]
    pub include_ignored: Option<bool>,
    /// Detected on or after
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_from: Option<DateTime<Utc>>,
    /// Detected on or before
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_to: Option<DateTime<Utc>>,
}

/// Paging and ordering for finding searches
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SearchSrmItemsParams {
    /// Cursor from a previous page
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cursor: Option<String>,
    /// Page size
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<i32>,
    /// Sort column
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort: Option<String>,
    /// `asc` or `desc`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub direction: Option<String>,
}

/// Ignore a finding
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IgnoreSrmItemBody {
    /// Reason
    pub reason: String,
    /// Notes
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl IgnoreSrmItemBody {
    /// Body with just a reason
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
            notes: None,
        }
    }
}

/// Dashboard and history filters
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchSrmDashboard {
    /// Repository names
    #[serde(skip_serializing_if = "Option::is_none")]
    pub repositories: Option<Vec<String>>,
    /// From
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_from: Option<DateTime<Utc>>,
    /// To
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_to: Option<DateTime<Utc>>,
}

/// Repository filter for dashboard breakdowns
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SearchSrmDashboardRepositories {
    /// Repository names
    #[serde(skip_serializing_if = "Option::is_none")]
    pub repositories: Option<Vec<String>>,
}

/// Filters for listing security repositories
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ListSecurityRepositoriesParams {
    /// Cursor from a previous page
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cursor: Option<String>,
    /// Page size
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<i32>,
    /// Comma-separated segment ids
    #[serde(skip_serializing_if = "Option::is_none")]
    pub segments: Option<String>,
}

/// Grant security manager rights
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SecurityManagerBody {
    /// User id
    pub user_id: i64,
}

/// SLA thresholds
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SlaConfigBody {
    /// Enable SLA tracking
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_enabled: Option<bool>,
    /// Days to fix critical findings
    #[serde(skip_serializing_if = "Option::is_none")]
    pub critical_threshold_days: Option<i32>,
    /// Days to fix high findings
    #[serde(skip_serializing_if = "Option::is_none")]
    pub high_threshold_days: Option<i32>,
    /// Days to fix medium findings
    #[serde(skip_serializing_if = "Option::is_none")]
    pub medium_threshold_days: Option<i32>,
    /// Days to fix low findings
    #[serde(skip_serializing_if = "Option::is_none")]
    pub low_threshold_days: Option<i32>,
}

/// Repository to score
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OssfScorecardUrlRequest {
    /// Public repository URL
    pub repository_url: String,
}

/// A DAST scanner report to upload
#[derive(Debug, Clone)]
pub struct DastReportUpload {
    /// File name sent with the report
    pub file_name: String,
    /// Report contents
    pub content: Bytes,
    /// Report format, e.g. `json`
    pub report_format: String,
}

impl DastReportUpload {
    /// Create an upload
    pub fn new(file_name: impl Into<String>, content: impl Into<Bytes>, report_format: impl Into<String>) -> Self {
        Self {
            file_name: file_name.into(),
            content: content.into(),
            report_format: report_format.into(),
        }
    }

    pub(crate) fn into_form(self) -> MultipartForm {
        MultipartForm::new()
            .file(FileUpload::new("file", self.file_name, self.content))
            .field("reportFormat", self.report_format)
    }
}

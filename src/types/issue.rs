//! Issue types shared by the analysis and issues services.

use super::{DataResponse, DeltaType, ListResponse, PaginationInfo, SeverityLevel};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A static analysis issue
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Issue {
    /// Issue id
    pub issue_id: String,
    /// Result data id (used to fetch a single issue)
    pub result_data_id: i64,
    /// File path
    pub file_path: String,
    /// File id
    pub file_id: i64,
    /// Pattern that raised the issue
    pub pattern_info: PatternDetails,
    /// Tool that raised the issue
    pub tool_info: ToolReference,
    /// Line number
    pub line_number: i64,
    /// Message
    pub message: String,
    /// Suggested fix
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<String>,
    /// Language
    pub language: String,
    /// Source line
    #[serde(default)]
    pub line_text: String,
    /// Commit that introduced the issue
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub commit_info: Option<CommitReference>,
    /// Probability of being a false positive
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub false_positive_probability: Option<i32>,
    /// False positive explanation
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub false_positive_reason: Option<String>,
    /// Threshold above which the issue counts as a potential false positive
    #[serde(default)]
    pub false_positive_threshold: i32,
}

/// Pattern details
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PatternDetails {
    /// Pattern id
    pub id: String,
    /// Title
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Category
    pub category: String,
    /// Sub-category
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sub_category: Option<String>,
    /// Severity
    pub severity_level: SeverityLevel,
}

/// Tool reference
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolReference {
    /// Tool UUID
    pub uuid: String,
    /// Tool name
    pub name: String,
}

/// Commit reference
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommitReference {
    /// Commit SHA
    pub sha: String,
    /// Committer email
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub commiter: Option<String>,
    /// Committer name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub commiter_name: Option<String>,
    /// Commit time
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<DateTime<Utc>>,
}

/// Issue search filters
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchRepositoryIssuesBody {
    /// Branch
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub branch_name: Option<String>,
    /// Pattern ids
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pattern_ids: Option<Vec<String>>,
    /// Languages
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub languages: Option<Vec<String>>,
    /// Categories
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub categories: Option<Vec<String>>,
    /// Severity levels
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub levels: Option<Vec<SeverityLevel>>,
    /// Tags
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
    /// Author emails
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author_emails: Option<Vec<String>>,
}

/// Ignore or un-ignore an issue
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IssueStateBody {
    /// New ignored state
    pub ignored: bool,
    /// Reason
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    /// Comment
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
}

/// Ignore several issues at once
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BulkIgnoreIssuesBody {
    /// Issue ids
    pub issue_ids: Vec<String>,
    /// Reason
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    /// Comment
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
}

/// Issue counts grouped several ways
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IssuesOverview {
    /// Counts
    pub counts: IssuesOverviewCounts,
}

/// Issue counts by dimension
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct IssuesOverviewCounts {
    /// By category
    pub categories: Vec<Count>,
    /// By language
    pub languages: Vec<Count>,
    /// By severity
    pub levels: Vec<Count>,
    /// By tag
    pub tags: Vec<Count>,
    /// By pattern
    pub patterns: Vec<PatternsCount>,
    /// By author
    pub authors: Vec<Count>,
}

/// A named count
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Count {
    /// Name
    pub name: String,
    /// Total
    pub total: i32,
}

/// Count for one pattern
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PatternsCount {
    /// Pattern id
    pub id: String,
    /// Pattern title
    pub title: String,
    /// Total
    pub total: i32,
}

/// An ignored issue
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IgnoredIssue {
    /// Issue id
    pub issue_id: String,
    /// Ignore reason
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    /// Ignore comment
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
    /// Who ignored it
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ignored_by_name: Option<String>,
    /// When it was ignored
    pub ignored_timestamp: DateTime<Utc>,
    /// File path
    pub file_path: String,
    /// File id
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_id: Option<i64>,
    /// Pattern
    pub pattern_info: PatternDetails,
    /// Tool
    pub tool_info: ToolReference,
    /// Line number
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub line_number: Option<i64>,
    /// Message
    pub message: String,
    /// Language
    pub language: String,
    /// Source line
    #[serde(default)]
    pub line_text: String,
    /// Commit that introduced the issue
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub commit_info: Option<CommitReference>,
    /// Probability of being a false positive
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub false_positive_probability: Option<i32>,
    /// False positive explanation
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub false_positive_reason: Option<String>,
    /// False positive threshold
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub false_positive_threshold: Option<i32>,
}

/// An issue introduced or fixed by a change
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommitDeltaIssue {
    /// The issue
    pub commit_issue: Issue,
    /// Added or fixed
    pub delta_type: DeltaType,
}

/// Issues of a pull request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PullRequestIssuesResponse {
    /// Whether the pull request has been analysed
    pub analyzed: bool,
    /// Pagination metadata
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pagination: Option<PaginationInfo>,
    /// Issues
    #[serde(default)]
    pub data: Vec<CommitDeltaIssue>,
}

/// Filters for delta issue and clone listings
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeltaIssuesParams {
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

/// Paginated issue search results
pub type SearchRepositoryIssuesListResponse = ListResponse<Issue>;
/// Paginated ignored issue search results
pub type IgnoredIssuesListResponse = ListResponse<IgnoredIssue>;
/// Single issue
pub type GetIssueResponse = DataResponse<Issue>;
/// Issue overview
pub type IssuesOverviewResponse = DataResponse<IssuesOverview>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_issue_deserializes() {
        let issue: Issue = serde_json::from_value(serde_json::json!({
            "issueId": "abc",
            "resultDataId": 99,
            "filePath": "src/main.rs",
            "fileId": 5,
            "patternInfo": {"id": "unused", "category": "CodeStyle", "severityLevel": "Warning"},
            "toolInfo": {"uuid": "t-1", "name": "clippy"},
            "lineNumber": 12,
            "message": "unused variable",
            "language": "Rust",
            "lineText": "let x = 1;",
            "falsePositiveThreshold": 50
        }))
        .unwrap();

        assert_eq!(issue.result_data_id, 99);
        assert_eq!(issue.pattern_info.severity_level, SeverityLevel::Warning);
        assert!(issue.commit_info.is_none());
    }

    #[test]
    fn test_search_body_omits_unset_filters() {
        let body = SearchRepositoryIssuesBody {
            branch_name: Some("main".into()),
            levels: Some(vec![SeverityLevel::Error]),
            ..Default::default()
        };
        assert_eq!(
            serde_json::to_value(&body).unwrap(),
            serde_json::json!({"branchName": "main", "levels": ["Error"]})
        );
    }

    #[test]
    fn test_delta_params_encoding() {
        let params = DeltaIssuesParams {
            status: Some("new".into()),
            only_potential: Some(false),
            ..Default::default()
        };
        assert_eq!(
            serde_urlencoded::to_string(&params).unwrap(),
            "status=new&onlyPotential=false"
        );
    }
}

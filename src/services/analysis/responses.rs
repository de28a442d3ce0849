//! Response types for the analysis service.

use crate::types::{
    AnalysisMeta, AnalysisResultReason, Branch, CodingStandardInfo, DataResponse, ListResponse,
    PaginationInfo, QualityAnalysis, Repository, SeverityLevel,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A commit
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Commit {
    /// SHA
    pub sha: String,
    /// Codacy commit id
    pub id: i64,
    /// Commit time
    pub commit_timestamp: DateTime<Utc>,
    /// Author name
    pub author_name: String,
    /// Author email
    pub author_email: String,
    /// Message
    pub message: String,
    /// When analysis started
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub started_analysis: Option<DateTime<Utc>>,
    /// When analysis ended
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ended_analysis: Option<DateTime<Utc>>,
    /// Merge commit
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_merge_commit: Option<bool>,
    /// Link on the provider
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub git_href: Option<String>,
    /// Parent SHAs
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parents: Option<Vec<String>>,
}

/// A commit with its analysis results
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommitWithAnalysis {
    /// The commit
    pub commit: Commit,
    /// Coverage results
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub coverage: Option<CoverageAnalysis>,
    /// Quality results
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quality: Option<QualityAnalysis>,
    /// Analysability
    pub meta: AnalysisMeta,
}

/// Coverage results of a commit
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CoverageAnalysis {
    /// Total coverage
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_coverage_percentage: Option<f64>,
    /// Change in coverage
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delta_coverage_percentage: Option<f64>,
    /// Gate result
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_up_to_standards: Option<bool>,
    /// Per-gate results
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result_reasons: Option<Vec<AnalysisResultReason>>,
}

/// A repository with its latest analysis
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RepositoryWithAnalysis {
    /// Last analysed commit
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_analysed_commit: Option<Commit>,
    /// Numeric grade
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub grade: Option<i32>,
    /// Letter grade
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub grade_letter: Option<String>,
    /// Issues per line of code, as a percentage
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub issues_percentage: Option<i64>,
    /// Issue count
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub issues_count: Option<i64>,
    /// Lines of code
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub loc: Option<i64>,
    /// Share of complex files
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub complex_files_percentage: Option<i64>,
    /// Complex file count
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub complex_files_count: Option<i64>,
    /// Duplication
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duplication_percentage: Option<i64>,
    /// The repository
    pub repository: Repository,
    /// Branch the figures refer to
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub selected_branch: Option<Branch>,
    /// Coverage summary
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub coverage: Option<Coverage>,
}

/// Repository coverage summary
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Coverage {
    /// Files without coverage
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub files_uncovered: Option<i64>,
    /// Files below the coverage threshold
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub files_with_low_coverage: Option<i64>,
    /// Rounded coverage
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub coverage_percentage: Option<i64>,
    /// Coverage
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub coverage_percentage_with_decimals: Option<f64>,
    /// File count
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub number_total_files: Option<i32>,
    /// Covered lines
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub number_covered_lines: Option<i32>,
    /// Coverable lines
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub number_coverable_lines: Option<i32>,
}

/// An analysis tool configured on a repository
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisTool {
    /// Tool UUID
    pub uuid: String,
    /// Tool name
    pub name: String,
    /// Runs on the client side
    pub is_client_side: bool,
    /// Settings
    pub settings: AnalysisToolSettings,
}

/// Tool settings on a repository
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisToolSettings {
    /// Enabled
    pub is_enabled: bool,
    /// Settings come from a coding standard
    pub follows_standard: bool,
    /// Settings were customised
    pub is_custom: bool,
    /// The repository has a configuration file for the tool
    pub has_configuration_file: bool,
    /// The configuration file is used
    pub uses_configuration_file: bool,
    /// Coding standards enabling the tool
    #[serde(default)]
    pub enabled_by: Vec<CodingStandardInfo>,
}

/// Tools whose settings conflict with the coding standard
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolConflict {
    /// Tool UUID
    pub tool_uuid: String,
    /// Tool name
    pub tool_name: String,
    /// Number of conflicting patterns
    pub conflicts_count: i32,
}

/// Progress of a repository's first analysis
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FirstAnalysisOverview {
    /// Still the first analysis
    pub is_first_analysis: bool,
    /// Analysis in progress
    pub is_analyzing: bool,
    /// Start time
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub started_at: Option<DateTime<Utc>>,
    /// Percentage done
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub progress: Option<i32>,
}

/// A duplicated code block
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CodeClone {
    /// Clone id
    pub clone_id: String,
    /// Content hash
    pub clone_hash: String,
    /// Duplicated lines
    pub lines_of_code: i32,
    /// Duplicated tokens
    pub number_of_tokens: i32,
    /// Occurrences
    #[serde(default)]
    pub clone_fragments: Vec<CloneFragment>,
}

/// One occurrence of a clone
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CloneFragment {
    /// File path
    pub file_path: String,
    /// First line
    pub start_line: i32,
    /// Last line
    pub end_line: i32,
}

/// Paginated clones
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClonesResponse {
    /// Clones
    #[serde(default)]
    pub data: Vec<CodeClone>,
    /// Pagination metadata
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pagination: Option<PaginationInfo>,
}

/// An analysis log line
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LogEntry {
    /// Time
    pub timestamp: DateTime<Utc>,
    /// Level
    pub level: String,
    /// Message
    pub message: String,
    /// Tool that logged it
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tool_name: Option<String>,
}

/// Quality figures of one commit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommitAnalysisStats {
    /// Repository id
    pub repository_id: i64,
    /// Commit id
    pub commit_id: i64,
    /// Issue count
    pub number_issues: i64,
    /// Lines of code
    pub number_loc: i64,
    /// Issues per line of code, as a percentage
    pub issue_percentage: i64,
    /// Rounded coverage
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub coverage_percentage: Option<i64>,
    /// Coverage
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub coverage_percentage_with_decimals: Option<f64>,
    /// Commit time
    pub commit_timestamp: DateTime<Utc>,
    /// Author name
    pub commit_author_name: String,
    /// Short commit id
    #[serde(rename = "commitShortUUID")]
    pub commit_short_uuid: String,
}

/// Issue and file counts for a category
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryOverview {
    /// Category
    pub category: String,
    /// Issues
    pub issue_count: i32,
    /// Affected files
    pub file_count: i32,
}

/// What a commit changed relative to its parent
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommitDeltaStatistics {
    /// Commit UUID
    pub commit_uuid: String,
    /// New issues
    pub new_issues: i32,
    /// Fixed issues
    pub fixed_issues: i32,
    /// Complexity change
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delta_complexity: Option<i32>,
    /// Rounded coverage change
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delta_coverage: Option<i32>,
    /// Coverage change
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delta_coverage_with_decimals: Option<f64>,
    /// Clone count change
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delta_clones_count: Option<i32>,
    /// Analysis finished
    pub analyzed: bool,
}

/// An issue in a commit delta
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeltaIssue {
    /// Issue id
    pub issue_id: i64,
    /// File path
    pub file_path: String,
    /// Line
    pub line_number: i32,
    /// Message
    pub message: String,
    /// Pattern id
    pub pattern_id: String,
    /// Category
    pub category: String,
    /// Severity
    pub level: SeverityLevel,
}

/// Paginated delta issues
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommitDeltaIssuesResponse {
    /// Issues
    #[serde(default)]
    pub data: Vec<DeltaIssue>,
    /// Pagination metadata
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pagination: Option<PaginationInfo>,
}

/// Per-file analysis of a commit or pull request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileAnalysis {
    /// File path
    pub file_path: String,
    /// Coverage
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub coverage_percentage: Option<f64>,
    /// Coverage change
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delta_coverage_percentage: Option<f64>,
    /// New issues
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub new_issues_count: Option<i32>,
    /// Fixed issues
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fixed_issues_count: Option<i32>,
    /// All issues
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_issues_count: Option<i32>,
}

/// A pull request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PullRequest {
    /// Codacy id
    pub id: i64,
    /// Number on the provider
    pub number: i32,
    /// Last update
    pub updated: DateTime<Utc>,
    /// `open`, `closed` or `merged`
    pub status: String,
    /// Repository name
    pub repository: String,
    /// Title
    pub title: String,
    /// Author
    pub owner: PullRequestOwner,
    /// Head commit
    pub head_commit_sha: String,
    /// Merge base
    pub common_ancestor_commit_sha: String,
    /// Source branch
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub origin_branch: Option<String>,
    /// Target branch
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_branch: Option<String>,
    /// Link on the provider
    pub git_href: String,
}

/// Pull request author
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PullRequestOwner {
    /// Display name
    pub name: String,
    /// Avatar
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,
    /// Username
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    /// Email
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

/// A pull request with its analysis results
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PullRequestWithAnalysis {
    /// Gate result
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_up_to_standards: Option<bool>,
    /// Analysis in progress
    pub is_analysing: bool,
    /// The pull request
    pub pull_request: PullRequest,
    /// New issues
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub new_issues: Option<i32>,
    /// Fixed issues
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fixed_issues: Option<i32>,
    /// Complexity change
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delta_complexity: Option<i32>,
    /// Clone count change
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delta_clones_count: Option<i32>,
    /// Coverage results
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub coverage: Option<PullRequestAnalysisCoverage>,
    /// Quality results
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quality: Option<QualityAnalysis>,
    /// Analysability
    pub meta: AnalysisMeta,
}

/// Coverage results of a pull request
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PullRequestAnalysisCoverage {
    /// Coverage change
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delta_coverage: Option<f64>,
    /// Coverage of changed lines
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub diff_coverage: Option<DiffCoverage>,
    /// Gate result
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_up_to_standards: Option<bool>,
    /// Per-gate results
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result_reasons: Option<Vec<AnalysisResultReason>>,
}

/// Coverage of the lines a pull request changes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiffCoverage {
    /// Coverage
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<f64>,
    /// Covered lines
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub covered_lines: Option<i32>,
    /// Coverable lines
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub coverable_lines: Option<i32>,
    /// Why the value is what it is
    pub cause: String,
}

/// Paginated repositories with analysis
pub type RepositoryWithAnalysisListResponse = ListResponse<RepositoryWithAnalysis>;
/// Single repository with analysis
pub type RepositoryWithAnalysisResponse = DataResponse<RepositoryWithAnalysis>;
/// Tools of a repository
pub type AnalysisToolsResponse = DataResponse<Vec<AnalysisTool>>;
/// Tool conflicts of a repository
pub type RepositoryConflictsResponse = DataResponse<Vec<ToolConflict>>;
/// First-analysis progress
pub type FirstAnalysisOverviewResponse = DataResponse<FirstAnalysisOverview>;
/// Analysis logs
pub type LogsResponse = DataResponse<Vec<LogEntry>>;
/// Commit statistics
pub type CommitAnalysisStatsListResponse = DataResponse<Vec<CommitAnalysisStats>>;
/// Category overviews
pub type CategoryOverviewListResponse = DataResponse<Vec<CategoryOverview>>;
/// Paginated commits with analysis
pub type CommitWithAnalysisListResponse = ListResponse<CommitWithAnalysis>;
/// Paginated pull requests with analysis
pub type PullRequestWithAnalysisListResponse = ListResponse<PullRequestWithAnalysis>;
/// Paginated file analyses
pub type FileAnalysisListResponse = ListResponse<FileAnalysis>;

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_commit_stats_short_uuid_field() {
        let stats: CommitAnalysisStats = serde_json::from_value(serde_json::json!({
            "repositoryId": 1,
            "commitId": 2,
            "numberIssues": 3,
            "numberLoc": 400,
            "issuePercentage": 1,
            "commitTimestamp": "2024-03-01T10:00:00Z",
            "commitAuthorName": "Dana",
            "commitShortUUID": "abc1234"
        }))
        .unwrap();

        assert_eq!(stats.commit_short_uuid, "abc1234");
        assert_eq!(
            serde_json::to_value(&stats).unwrap()["commitShortUUID"],
            serde_json::json!("abc1234")
        );
    }

    #[test]
    fn test_pull_request_with_analysis_deserializes() {
        let pr: PullRequestWithAnalysis = serde_json::from_value(serde_json::json!({
            "isAnalysing": false,
            "isUpToStandards": true,
            "pullRequest": {
                "id": 10,
                "number": 42,
                "updated": "2024-03-01T10:00:00Z",
                "status": "open",
                "repository": "api",
                "title": "Add login",
                "owner": {"name": "Dana"},
                "headCommitSha": "aaa",
                "commonAncestorCommitSha": "bbb",
                "gitHref": "https://github.com/acme/api/pull/42"
            },
            "coverage": {"deltaCoverage": 1.5, "diffCoverage": {"value": 80.0, "cause": "ValueIsPresent"}},
            "meta": {"analyzable": true}
        }))
        .unwrap();

        assert_eq!(pr.pull_request.number, 42);
        assert_eq!(pr.is_up_to_standards, Some(true));
        let coverage = pr.coverage.unwrap();
        assert_eq!(coverage.diff_coverage.unwrap().cause, "ValueIsPresent");
    }
}

//! Quality gate results shared by analysis and coverage payloads.

use super::SeverityLevel;
use serde::{Deserialize, Serialize};

/// Outcome of one quality gate rule
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResultReason {
    /// Gate name
    pub gate: String,
    /// Threshold the gate checks against
    pub expected_threshold: AnalysisExpectedThreshold,
    /// Whether the gate passed
    pub is_up_to_standards: bool,
}

/// Gate threshold
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisExpectedThreshold {
    /// Threshold value
    pub threshold: f64,
    /// Minimum severity counted
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub minimum_severity: Option<SeverityLevel>,
}

/// Whether an item could be analysed
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisMeta {
    /// Analysable
    pub analyzable: bool,
    /// Reason when not analysable
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

/// Quality deltas of a commit or pull request
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QualityAnalysis {
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
    /// Overall gate result
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_up_to_standards: Option<bool>,
    /// Per-gate results
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result_reasons: Option<Vec<AnalysisResultReason>>,
}

//! Request types for the coding standards service.

use serde::Serialize;

/// Create an empty coding standard
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateCodingStandardBody {
    /// Name
    pub name: String,
    /// Description
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Create as a draft
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_draft: Option<bool>,
}

impl CreateCodingStandardBody {
    /// Body with just a name
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
            is_draft: None,
        }
    }

    /// Mark the new standard as a draft
    pub fn draft(mut self) -> Self {
        self.is_draft = Some(true);
        self
    }
}

/// Where a new coding standard copies its configuration from
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateCodingStandardParams {
    /// Repository to copy settings from
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_repository: Option<String>,
    /// Coding standard to copy settings from
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_coding_standard: Option<i64>,
}

/// Create a coding standard from a preset
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateCodingStandardPresetBody {
    /// Name
    pub name: String,
    /// Description
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Preset to start from
    pub preset_name: String,
    /// Languages to cover
    pub languages: Vec<String>,
}

/// Make a coding standard the default
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SetDefaultCodingStandardBody {
    /// Apply to every repository
    #[serde(skip_serializing_if = "Option::is_none")]
    pub apply_to_all_repositories: Option<bool>,
    /// Apply to these repositories
    #[serde(skip_serializing_if = "Option::is_none")]
    pub repository_ids: Option<Vec<i64>>,
}

/// Pattern filters shared by listing and bulk updates
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PatternFilters {
    /// Comma-separated languages
    #[serde(skip_serializing_if = "Option::is_none")]
    pub languages: Option<String>,
    /// Comma-separated categories
    #[serde(skip_serializing_if = "Option::is_none")]
    pub categories: Option<String>,
    /// Comma-separated severity levels
    #[serde(skip_serializing_if = "Option::is_none")]
    pub severity_levels: Option<String>,
    /// Comma-separated tags
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<String>,
    /// Title filter
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
    /// Only recommended patterns
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recommended: Option<bool>,
}

/// Filters for listing a tool's patterns
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ListPatternsParams {
    /// Shared filters
    #[serde(flatten)]
    pub filters: PatternFilters,
    /// Only enabled or disabled patterns
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,
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

/// What a bulk pattern update does
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PatternAction {
    /// Enable the patterns
    Enable,
    /// Disable the patterns
    Disable,
}

/// Enable or disable patterns in bulk
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePatternsBody {
    /// Action
    pub action: PatternAction,
    /// Patterns to update
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pattern_ids: Option<Vec<String>>,
    /// Update every pattern matching the filters instead
    #[serde(skip_serializing_if = "Option::is_none")]
    pub update_all_matching_filters: Option<bool>,
}

/// Tool settings within a coding standard
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolConfiguration {
    /// Enable the tool
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_enabled: Option<bool>,
    /// Prefer the repository's configuration file
    #[serde(skip_serializing_if = "Option::is_none")]
    pub use_configuration_file: Option<bool>,
}

/// Apply a coding standard to repositories
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplyCodingStandardToRepositoriesBody {
    /// Repositories
    pub repository_ids: Vec<i64>,
    /// Replace a standard already applied
    #[serde(skip_serializing_if = "Option::is_none")]
    pub force_apply: Option<bool>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_list_patterns_params_flatten_filters() {
        let params = ListPatternsParams {
            filters: PatternFilters {
                languages: Some("Rust,Go".into()),
                severity_levels: Some("Error".into()),
                ..Default::default()
            },
            enabled: Some(true),
            limit: Some(100),
            ..Default::default()
        };
        assert_eq!(
            serde_urlencoded::to_string(&params).unwrap(),
            "languages=Rust%2CGo&severityLevels=Error&enabled=true&limit=100"
        );
    }

    #[test]
    fn test_update_patterns_body() {
        let body = UpdatePatternsBody {
            action: PatternAction::Disable,
            pattern_ids: Some(vec!["p1".into()]),
            update_all_matching_filters: None,
        };
        assert_eq!(
            serde_json::to_value(&body).unwrap(),
            serde_json::json!({"action": "disable", "patternIds": ["p1"]})
        );
    }
}

//! Request types for the organizations service.

use serde::Serialize;

/// Filters for listing an organization's repositories
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListOrganizationRepositoriesParams {
    /// Cursor from a previous page
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cursor: Option<String>,
    /// Page size
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<i32>,
    /// Name filter
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
    /// `Synced`, `NotSynced` or `AllSynced`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filter: Option<String>,
    /// Comma-separated languages
    #[serde(skip_serializing_if = "Option::is_none")]
    pub languages: Option<String>,
    /// Comma-separated segment ids
    #[serde(skip_serializing_if = "Option::is_none")]
    pub segments: Option<String>,
}

impl ListOrganizationRepositoriesParams {
    /// Unfiltered first page
    pub fn new() -> Self {
        Self::default()
    }

    /// Continue from a cursor
    pub fn cursor(mut self, cursor: impl Into<String>) -> Self {
        self.cursor = Some(cursor.into());
        self
    }

    /// Set the page size
    pub fn limit(mut self, limit: i32) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Filter by name
    pub fn search(mut self, search: impl Into<String>) -> Self {
        self.search = Some(search.into());
        self
    }
}

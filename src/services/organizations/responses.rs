//! Response types for the organizations service.

use crate::types::{DataResponse, JoinStatus, ListResponse, Repository};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Seat and pricing information
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrganizationBillingInformation {
    /// Seats in use
    pub number_of_seats: i32,
    /// Seats paid for
    pub number_of_purchased_seats: i32,
    /// Total price in cents
    pub price_in_cents: i32,
    /// Price per seat in cents
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price_per_seat_in_cents: Option<i32>,
    /// Next charge
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_payment_date: Option<DateTime<Utc>>,
}

/// Result of joining an organization
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JoinResponse {
    /// Codacy organization id
    pub organization_identifier: i64,
    /// Membership state after the join
    pub join_status: JoinStatus,
}

/// Result of syncing an organization's name from its provider
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyncProviderSettingOrganizationResponse {
    /// Current name
    pub name: String,
}

/// Response from the billing endpoint
pub type OrganizationBillingInformationResponse = DataResponse<OrganizationBillingInformation>;
/// Paginated repositories
pub type RepositoryListResponse = ListResponse<Repository>;

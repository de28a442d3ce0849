//! Security and risk management service for the Codacy API.
//!
//! Findings, dashboards, security managers, DAST report uploads, SLA
//! configuration and OSSF scorecards.

mod requests;
mod responses;
mod service;

pub use requests::*;
pub use responses::*;
pub use service::*;

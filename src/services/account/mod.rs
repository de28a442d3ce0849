//! Account service for the Codacy API.
//!
//! Covers the authenticated user: profile, emails, notification settings,
//! provider integrations and API tokens.

mod requests;
mod responses;
mod service;

pub use requests::*;
pub use responses::*;
pub use service::*;

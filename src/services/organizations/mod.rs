//! Organizations service for the Codacy API.
//!
//! Provides organization lookup and administration: repositories, billing,
//! membership and provider synchronisation.

mod requests;
mod responses;
mod service;

pub use requests::*;
pub use responses::*;
pub use service::*;

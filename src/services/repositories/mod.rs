//! Repositories service for the Codacy API.
//!
//! Repository lifecycle, branches, quality settings and per-file analysis.

mod requests;
mod responses;
mod service;

pub use requests::*;
pub use responses::*;
pub use service::*;

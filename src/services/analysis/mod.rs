//! Analysis service for the Codacy API.
//!
//! Repository, commit and pull request analysis results: tools, issues,
//! clones, logs, statistics and file-level deltas.

mod requests;
mod responses;
mod service;

pub use requests::*;
pub use responses::*;
pub use service::*;

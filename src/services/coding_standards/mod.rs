//! Coding standards service for the Codacy API.
//!
//! Organization-level tool and pattern configurations applied to
//! repositories.

mod requests;
mod responses;
mod service;

pub use requests::*;
pub use responses::*;
pub use service::*;

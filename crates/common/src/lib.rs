//! Shared types and helpers used by the data-service crates.

pub mod types;
pub mod utils;

/// Header carrying the acting user of a request.
pub const USER_HEADER: &str = "x-user-name";
/// Header carrying the request id used to correlate log lines.
pub const REQUEST_ID_HEADER: &str = "x-request-id";

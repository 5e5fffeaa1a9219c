//! Shared response envelope types for API handlers.
//!
//! All API responses use a `{ "data": ... }` envelope. Moderation actions
//! additionally carry an optional `warning` for benign-but-noteworthy
//! outcomes (re-approving an already-approved entry).

use serde::Serialize;

/// Standard `{ "data": T }` response envelope.
#[derive(Debug, Serialize)]
pub struct DataResponse<T: Serialize> {
    pub data: T,
}

/// `{ "data": T, "warning": ... }` envelope for moderation actions.
///
/// `warning` is omitted from the body entirely when absent.
#[derive(Debug, Serialize)]
pub struct ModerationResponse<T: Serialize> {
    pub data: T,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub warning: Option<String>,
}

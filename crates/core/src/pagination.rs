//! Pagination defaults and clamp helpers.
//!
//! This module lives in `core` (zero internal deps) so the repository and
//! API layers share one set of limits.

/// Default number of items per page for list and pending-queue endpoints.
pub const DEFAULT_PAGE_SIZE: i64 = 15;

/// Maximum number of items per page.
pub const MAX_PAGE_SIZE: i64 = 100;

/// Default number of items on the moderation dashboard previews.
pub const DASHBOARD_PREVIEW_SIZE: i64 = 10;

/// Clamp a requested limit into `[1, max]`, applying `default` when absent
/// or non-positive.
pub fn clamp_limit(limit: Option<i64>, default: i64, max: i64) -> i64 {
    match limit {
        Some(l) if l > 0 => l.min(max),
        _ => default,
    }
}

/// Clamp a requested offset to be non-negative.
pub fn clamp_offset(offset: Option<i64>) -> i64 {
    offset.unwrap_or(0).max(0)
}

//! Moderation lifecycle constants shared by verses and annotations.
//!
//! Both entity types carry the same approval metadata and move through the
//! same two states: pending (initial) and approved. Rejection and significant
//! edits send an entry back to pending; there is no terminal state.

use crate::error::CoreError;

/// List-filter value selecting approved entries.
pub const STATUS_APPROVED: &str = "approved";

/// List-filter value selecting pending entries.
pub const STATUS_PENDING: &str = "pending";

/// All valid status filter values.
pub const VALID_STATUS_FILTERS: &[&str] = &[STATUS_APPROVED, STATUS_PENDING];

/// Parsed `?status=` filter for list endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusFilter {
    Approved,
    Pending,
}

impl StatusFilter {
    /// Parse an optional `?status=` query value. `None` means no filter.
    pub fn parse(value: Option<&str>) -> Result<Option<Self>, CoreError> {
        match value {
            None => Ok(None),
            Some(STATUS_APPROVED) => Ok(Some(Self::Approved)),
            Some(STATUS_PENDING) => Ok(Some(Self::Pending)),
            Some(other) => Err(CoreError::Validation(format!(
                "Invalid status '{other}'. Must be one of: {}",
                VALID_STATUS_FILTERS.join(", ")
            ))),
        }
    }

    /// The `approved` column value this filter selects.
    pub fn approved_value(&self) -> bool {
        matches!(self, Self::Approved)
    }
}

/// Warning returned when an approver re-approves an already-approved entry.
///
/// This is a benign outcome, not an error: the stored state is left exactly
/// as it was and no new transition is recorded.
pub fn already_approved_warning(entity: &str) -> String {
    format!("{entity} is already approved.")
}

//! User roles and the capabilities derived from them.
//!
//! Roles form a closed set stored as strings in the `users` table (enforced
//! there by a CHECK constraint). All authorization questions are answered by
//! the capability functions here; call sites never compare role strings.

use serde::Serialize;

use crate::error::CoreError;
use crate::types::DbId;

/// The four platform roles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Full access: manage users, enter data, approve, export.
    Admin,
    /// Enters verses (the fixed, canonical units). May also enter Q&A pairs.
    FixedEntry,
    /// Enters Q&A pairs only.
    VariableEntry,
    /// Reviews and publishes pending entries.
    Approver,
}

/// All valid role name strings, as stored in the database.
pub const VALID_ROLE_NAMES: &[&str] = &["admin", "fixed_entry", "variable_entry", "approver"];

impl Role {
    /// Return the role name as stored in the `users.role` column.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::FixedEntry => "fixed_entry",
            Self::VariableEntry => "variable_entry",
            Self::Approver => "approver",
        }
    }

    /// Parse a stored role name.
    pub fn from_name(name: &str) -> Result<Self, CoreError> {
        match name {
            "admin" => Ok(Self::Admin),
            "fixed_entry" => Ok(Self::FixedEntry),
            "variable_entry" => Ok(Self::VariableEntry),
            "approver" => Ok(Self::Approver),
            other => Err(CoreError::Validation(format!(
                "Unknown role '{other}'. Must be one of: {}",
                VALID_ROLE_NAMES.join(", ")
            ))),
        }
    }
}

/// May this role approve or reject pending entries?
pub fn can_approve(role: Role) -> bool {
    matches!(role, Role::Admin | Role::Approver)
}

/// May this role create verses?
pub fn can_create_verses(role: Role) -> bool {
    matches!(role, Role::Admin | Role::FixedEntry)
}

/// May this role create Q&A annotations?
pub fn can_create_annotations(role: Role) -> bool {
    matches!(role, Role::Admin | Role::FixedEntry | Role::VariableEntry)
}

/// May this user edit an entity created by `creator_id`?
///
/// Admins edit anything; everyone else only their own entries.
pub fn can_edit(role: Role, user_id: DbId, creator_id: DbId) -> bool {
    role == Role::Admin || user_id == creator_id
}

/// May this user delete an entity created by `creator_id`?
///
/// Same rule as editing. Deletion is permanent (verses cascade to their
/// annotations) so there is deliberately no broader grant.
pub fn can_delete(role: Role, user_id: DbId, creator_id: DbId) -> bool {
    can_edit(role, user_id, creator_id)
}

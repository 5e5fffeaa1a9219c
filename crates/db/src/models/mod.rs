//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` + `Serialize` entity struct matching the database row
//! - A create DTO for inserts
//! - An update DTO (all `Option` fields) for patches
//!
//! Create and update DTOs deliberately carry no approval fields: the only
//! writers of approval state are the approve/reject repository methods and
//! the re-review demotion inside `update`.

pub mod annotation;
pub mod moderation;
pub mod user;
pub mod verse;

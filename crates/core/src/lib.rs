//! Domain logic for the shloka curation platform.
//!
//! This crate has no internal dependencies and no database access. It holds
//! the rules shared by the repository and API layers: roles and capabilities,
//! the moderation lifecycle contract, the change-detection policy that sends
//! edited entries back to review, script conversion utilities, and the export
//! document shape.

pub mod change_detection;
pub mod error;
pub mod export;
pub mod moderation;
pub mod pagination;
pub mod roles;
pub mod transliteration;
pub mod types;
pub mod unicode;
pub mod validation;

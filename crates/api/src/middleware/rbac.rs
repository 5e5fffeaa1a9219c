//! Role-based access control extractors.
//!
//! Each extractor wraps [`AuthUser`] and rejects requests whose role lacks
//! the required capability (looked up in `shloka_core::roles`, never by
//! comparing role strings here). Use these in route handlers to enforce
//! authorization at the type level, before any state is touched.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use shloka_core::error::CoreError;
use shloka_core::roles::{self, Role};

use super::auth::AuthUser;
use crate::error::AppError;
use crate::state::AppState;

/// Requires the admin role. Rejects with 403 Forbidden otherwise.
pub struct RequireAdmin(pub AuthUser);

impl FromRequestParts<AppState> for RequireAdmin {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let user = AuthUser::from_request_parts(parts, state).await?;
        if user.role != Role::Admin {
            return Err(AppError::Core(CoreError::Forbidden(
                "Admin role required".into(),
            )));
        }
        Ok(RequireAdmin(user))
    }
}

/// Requires approve-capability (admin or approver role).
pub struct RequireApprover(pub AuthUser);

impl FromRequestParts<AppState> for RequireApprover {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let user = AuthUser::from_request_parts(parts, state).await?;
        if !roles::can_approve(user.role) {
            return Err(AppError::Core(CoreError::Forbidden(
                "Approver or Admin role required".into(),
            )));
        }
        Ok(RequireApprover(user))
    }
}

/// Requires verse-entry capability (admin or fixed-entry role).
pub struct RequireVerseEditor(pub AuthUser);

impl FromRequestParts<AppState> for RequireVerseEditor {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let user = AuthUser::from_request_parts(parts, state).await?;
        if !roles::can_create_verses(user.role) {
            return Err(AppError::Core(CoreError::Forbidden(
                "Fixed Data Entry or Admin role required".into(),
            )));
        }
        Ok(RequireVerseEditor(user))
    }
}

/// Requires annotation-entry capability (admin, fixed-entry, or
/// variable-entry role).
pub struct RequireAnnotationEditor(pub AuthUser);

impl FromRequestParts<AppState> for RequireAnnotationEditor {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let user = AuthUser::from_request_parts(parts, state).await?;
        if !roles::can_create_annotations(user.role) {
            return Err(AppError::Core(CoreError::Forbidden(
                "Data Entry or Admin role required".into(),
            )));
        }
        Ok(RequireAnnotationEditor(user))
    }
}

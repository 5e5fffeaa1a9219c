//! Script conversion tool endpoints.
//!
//! Entry forms call these to pre-fill the derived unicode and
//! transliteration fields while a contributor types.

use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};

use shloka_core::transliteration::Scheme;
use shloka_core::unicode::to_unicode_escape;
use shloka_core::validation::validate_required_text;

use crate::error::AppResult;
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// Request body for `POST /tools/transliterate`.
#[derive(Debug, Deserialize)]
pub struct TransliterateRequest {
    pub text: String,
    pub from: String,
    pub to: String,
}

#[derive(Debug, Serialize)]
pub struct TransliterateResponse {
    pub transliterated: String,
}

/// POST /api/v1/tools/transliterate
///
/// Convert text between transliteration schemes. Degrades to returning the
/// input unchanged when no backend can map the pair; never errors on content.
pub async fn transliterate(
    _auth: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<TransliterateRequest>,
) -> AppResult<Json<DataResponse<TransliterateResponse>>> {
    validate_required_text("text", &input.text)?;
    let from = Scheme::from_name(&input.from)?;
    let to = Scheme::from_name(&input.to)?;

    let transliterated = state.transliterator.transliterate(&input.text, from, to);

    Ok(Json(DataResponse {
        data: TransliterateResponse { transliterated },
    }))
}

/// Request body for `POST /tools/unicode`.
#[derive(Debug, Deserialize)]
pub struct UnicodeRequest {
    pub text: String,
}

#[derive(Debug, Serialize)]
pub struct UnicodeResponse {
    pub unicode: String,
}

/// POST /api/v1/tools/unicode
///
/// Encode text into the Unicode-escape form stored alongside each verse.
pub async fn unicode(
    _auth: AuthUser,
    Json(input): Json<UnicodeRequest>,
) -> AppResult<Json<DataResponse<UnicodeResponse>>> {
    validate_required_text("text", &input.text)?;

    Ok(Json(DataResponse {
        data: UnicodeResponse {
            unicode: to_unicode_escape(&input.text),
        },
    }))
}

/// One supported scheme, as `{name, label}`.
#[derive(Debug, Serialize)]
pub struct SchemeInfo {
    pub name: &'static str,
    pub label: &'static str,
}

/// GET /api/v1/tools/schemes
///
/// List the transliteration schemes accepted by the transliterate endpoint.
pub async fn schemes(_auth: AuthUser) -> Json<DataResponse<Vec<SchemeInfo>>> {
    let schemes = [
        Scheme::Devanagari,
        Scheme::Iast,
        Scheme::HarvardKyoto,
        Scheme::Itrans,
        Scheme::Slp1,
        Scheme::Velthuis,
    ]
    .iter()
    .map(|s| SchemeInfo {
        name: s.as_str(),
        label: s.label(),
    })
    .collect();

    Json(DataResponse { data: schemes })
}

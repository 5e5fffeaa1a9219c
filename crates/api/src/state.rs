use std::sync::Arc;

use shloka_core::transliteration::TransliterationEngine;

use crate::config::ServerConfig;
use crate::export_store::ExportStore;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: shloka_db::DbPool,
    /// Server configuration (accessed by middleware and handlers).
    pub config: Arc<ServerConfig>,
    /// Transliteration backend chain, fixed at startup.
    pub transliterator: Arc<TransliterationEngine>,
    /// Blob store export documents pass through on their way to the client.
    pub export_store: Arc<ExportStore>,
}

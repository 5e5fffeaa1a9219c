//! Moderation workflow DTOs: dashboard counts, bulk approval, export stats.

use serde::{Deserialize, Serialize};

use shloka_core::types::DbId;

/// Pending/approved totals per entity type, recomputed per dashboard view.
#[derive(Debug, Clone, Serialize)]
pub struct ModerationStats {
    pub pending_verses: i64,
    pub pending_annotations: i64,
    pub approved_verses: i64,
    pub approved_annotations: i64,
}

/// Corpus totals shown on the export page.
#[derive(Debug, Clone, Serialize)]
pub struct CorpusStats {
    pub total_verses: i64,
    pub approved_verses: i64,
    pub total_annotations: i64,
    pub approved_annotations: i64,
}

/// Request body for bulk approval endpoints.
#[derive(Debug, Clone, Deserialize)]
pub struct BulkApproveRequest {
    pub ids: Vec<DbId>,
}

/// Result of a bulk approval: how many entities actually transitioned.
/// Ids that were missing or already approved are skipped, not counted.
#[derive(Debug, Clone, Serialize)]
pub struct BulkApproveResult {
    pub approved_count: u64,
}

/// Distinct filter values offered on the export page.
#[derive(Debug, Clone, Serialize)]
pub struct ExportFilterOptions {
    pub sources: Vec<String>,
    pub categories: Vec<String>,
}

//! Shared query/body parameter types for API handlers.
//!
//! Common structs that appear across multiple handler modules are extracted
//! here to avoid duplication.

use serde::Deserialize;

/// Query parameters for the pending review queues
/// (`?search=&limit=&offset=`).
#[derive(Debug, Default, Deserialize)]
pub struct PendingQueueParams {
    pub search: Option<String>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

/// Keyword/commentary input: either a JSON list or a comma-separated string.
///
/// Contributors paste comma-separated keywords into forms; API clients send
/// proper lists. Normalizing the former into the latter is a boundary
/// concern, so it happens here and the core model only ever sees lists.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum ListInput {
    List(Vec<String>),
    Csv(String),
}

impl ListInput {
    /// Normalize into a list; blank input yields `None`.
    pub fn into_list(self) -> Option<Vec<String>> {
        let items: Vec<String> = match self {
            Self::List(items) => items
                .into_iter()
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect(),
            Self::Csv(text) => text
                .split(',')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect(),
        };
        if items.is_empty() {
            None
        } else {
            Some(items)
        }
    }
}

/// Normalize an optional [`ListInput`] field.
pub fn normalize_list(input: Option<ListInput>) -> Option<Vec<String>> {
    input.and_then(ListInput::into_list)
}

use serde::{Deserialize, Serialize};

/// A document template as served by `GET /api/get-templates`.
///
/// Immutable once fetched. Names are not guaranteed unique across (or even
/// within) a load; lookups by name resolve to the first position.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Template {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub content: String,
}

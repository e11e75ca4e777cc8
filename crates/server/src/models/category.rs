//! Category domain type.

use serde::Serialize;

use vendora_core::CategoryId;

/// A product category. Categories form a tree via `parent_id`.
#[derive(Debug, Clone, Serialize)]
pub struct Category {
    pub id: CategoryId,
    pub name: String,
    /// URL slug, unique.
    pub slug: String,
    pub parent_id: Option<CategoryId>,
    pub description: String,
}

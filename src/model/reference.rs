use serde::{Deserialize, Serialize};

/// One selectable entry in a filter dropdown. Used for both the platform and
/// genre reference lists; `id` is unique within a list and display order
/// follows the server's response order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReferenceOption {
    pub id: i64,
    pub name: String,
}

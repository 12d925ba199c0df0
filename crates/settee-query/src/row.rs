use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One row of a view result.
///
/// `id` is absent on reduce rows. Row order is the server's native key
/// collation; nothing downstream re-sorts.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ViewRow {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default)]
    pub key: Value,
    #[serde(default)]
    pub value: Value,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub doc: Option<Value>,
}

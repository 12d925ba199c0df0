use serde::{Deserialize, Serialize};
use serde_json::Value;

/// The standard view query options.
///
/// Everything here is passed through to the server as-is; the paging engine
/// only ever touches `limit`, `skip`, `startkey` and `startkey_docid`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ViewOptions {
    pub key: Option<Value>,
    pub keys: Option<Vec<Value>>,
    pub startkey: Option<Value>,
    pub startkey_docid: Option<String>,
    pub endkey: Option<Value>,
    pub endkey_docid: Option<String>,
    pub limit: Option<usize>,
    pub skip: Option<usize>,
    pub descending: Option<bool>,
    pub include_docs: Option<bool>,
    pub reduce: Option<bool>,
    pub group: Option<bool>,
    pub group_level: Option<u64>,
    pub inclusive_end: Option<bool>,
    pub stale: Option<String>,
}

impl ViewOptions {
    /// Render the set options as request query pairs.
    ///
    /// JSON-typed options (`key`, `keys`, `startkey`, `endkey`) are encoded
    /// as compact JSON; doc ids and scalars go out literally.
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();

        if let Some(v) = &self.key {
            pairs.push(("key", v.to_string()));
        }
        if let Some(v) = &self.keys {
            pairs.push(("keys", Value::Array(v.clone()).to_string()));
        }
        if let Some(v) = &self.startkey {
            pairs.push(("startkey", v.to_string()));
        }
        if let Some(v) = &self.startkey_docid {
            pairs.push(("startkey_docid", v.clone()));
        }
        if let Some(v) = &self.endkey {
            pairs.push(("endkey", v.to_string()));
        }
        if let Some(v) = &self.endkey_docid {
            pairs.push(("endkey_docid", v.clone()));
        }
        if let Some(v) = self.limit {
            pairs.push(("limit", v.to_string()));
        }
        if let Some(v) = self.skip {
            pairs.push(("skip", v.to_string()));
        }
        if let Some(v) = self.descending {
            pairs.push(("descending", v.to_string()));
        }
        if let Some(v) = self.include_docs {
            pairs.push(("include_docs", v.to_string()));
        }
        if let Some(v) = self.reduce {
            pairs.push(("reduce", v.to_string()));
        }
        if let Some(v) = self.group {
            pairs.push(("group", v.to_string()));
        }
        if let Some(v) = self.group_level {
            pairs.push(("group_level", v.to_string()));
        }
        if let Some(v) = self.inclusive_end {
            pairs.push(("inclusive_end", v.to_string()));
        }
        if let Some(v) = &self.stale {
            pairs.push(("stale", v.clone()));
        }

        pairs
    }
}

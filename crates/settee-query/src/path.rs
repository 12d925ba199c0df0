use crate::error::QueryError;

/// A view identifier resolved to the request path the server expects.
///
/// `_all_docs` and `_all_docs_by_seq` pass through unchanged; anything else
/// is `designname/viewname` (the view name may itself contain slashes) and
/// resolves to `_design/<designname>/_view/<viewname>`. A leading `/` on the
/// identifier is stripped, so already-resolved paths can be passed back in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewPath(String);

const BUILTIN_VIEWS: [&str; 2] = ["_all_docs", "_all_docs_by_seq"];

impl ViewPath {
    pub fn resolve(view_name: &str) -> Result<Self, QueryError> {
        let name = view_name.strip_prefix('/').unwrap_or(view_name);

        if BUILTIN_VIEWS.contains(&name) {
            return Ok(Self(name.to_string()));
        }

        let (design, view) = name
            .split_once('/')
            .ok_or_else(|| QueryError::MalformedView(view_name.to_string()))?;
        if design.is_empty() || view.is_empty() {
            return Err(QueryError::MalformedView(view_name.to_string()));
        }

        Ok(Self(format!("_design/{design}/_view/{view}")))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ViewPath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

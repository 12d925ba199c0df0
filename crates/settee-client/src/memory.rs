use std::cmp::Ordering;
use std::collections::HashMap;

use serde_json::Value;
use settee_query::{ViewOptions, ViewPath, ViewRow};

use crate::error::ClientError;
use crate::fetch::PageFetch;

/// In-process [`PageFetch`] implementation holding named views as row
/// vectors, for testing upper layers without a server.
///
/// Honors `startkey`/`startkey_docid` (inclusive), `limit`, `skip` and
/// `descending`. Rows are kept in collation order on insert; fetches never
/// re-sort, matching the real server.
#[derive(Debug, Default)]
pub struct MemoryViews {
    views: HashMap<String, Vec<ViewRow>>,
}

impl MemoryViews {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert_view(&mut self, path: &str, mut rows: Vec<ViewRow>) {
        rows.sort_by(|a, b| collate(&a.key, &b.key).then_with(|| a.id.cmp(&b.id)));
        self.views.insert(path.to_string(), rows);
    }
}

impl PageFetch for MemoryViews {
    fn fetch_page(
        &self,
        path: &ViewPath,
        options: &ViewOptions,
    ) -> Result<Vec<ViewRow>, ClientError> {
        let rows = self.views.get(path.as_str()).ok_or(ClientError::Status {
            status: 404,
            error: Some("not_found".into()),
            reason: Some("missing".into()),
        })?;

        let descending = options.descending.unwrap_or(false);
        let rows: Vec<&ViewRow> = if descending {
            rows.iter().rev().collect()
        } else {
            rows.iter().collect()
        };

        let start = match &options.startkey {
            Some(key) => {
                let docid = options.startkey_docid.as_deref();
                rows.iter()
                    .position(|r| at_or_after(r, key, docid, descending))
                    .unwrap_or(rows.len())
            }
            None => 0,
        };

        let skip = options.skip.unwrap_or(0);
        let limit = options.limit.unwrap_or(usize::MAX);
        Ok(rows
            .into_iter()
            .skip(start)
            .skip(skip)
            .take(limit)
            .cloned()
            .collect())
    }
}

/// Is `row` at or past the (key, docid) continuation point, inclusive?
fn at_or_after(row: &ViewRow, key: &Value, docid: Option<&str>, descending: bool) -> bool {
    let ord = collate(&row.key, key);
    let ord = if descending { ord.reverse() } else { ord };
    match ord {
        Ordering::Greater => true,
        Ordering::Less => false,
        Ordering::Equal => match docid {
            Some(docid) => match row.id.as_deref() {
                Some(id) if descending => id <= docid,
                Some(id) => id >= docid,
                None => true,
            },
            None => true,
        },
    }
}

fn type_rank(v: &Value) -> u8 {
    match v {
        Value::Null => 0,
        Value::Bool(_) => 1,
        Value::Number(_) => 2,
        Value::String(_) => 3,
        Value::Array(_) => 4,
        Value::Object(_) => 5,
    }
}

/// Simplified server key collation: null < bool < number < string < array
/// < object, arrays element-wise, strings by code point (no ICU tailoring).
pub fn collate(a: &Value, b: &Value) -> Ordering {
    match (a, b) {
        (Value::Bool(x), Value::Bool(y)) => x.cmp(y),
        (Value::Number(x), Value::Number(y)) => x
            .as_f64()
            .partial_cmp(&y.as_f64())
            .unwrap_or(Ordering::Equal),
        (Value::String(x), Value::String(y)) => x.cmp(y),
        (Value::Array(x), Value::Array(y)) => {
            for (xv, yv) in x.iter().zip(y) {
                let ord = collate(xv, yv);
                if ord != Ordering::Equal {
                    return ord;
                }
            }
            x.len().cmp(&y.len())
        }
        (Value::Object(x), Value::Object(y)) => {
            for ((xk, xv), (yk, yv)) in x.iter().zip(y) {
                let ord = xk.cmp(yk).then_with(|| collate(xv, yv));
                if ord != Ordering::Equal {
                    return ord;
                }
            }
            x.len().cmp(&y.len())
        }
        _ => type_rank(a).cmp(&type_rank(b)),
    }
}

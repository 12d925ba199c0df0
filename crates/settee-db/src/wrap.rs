use std::marker::PhantomData;

use serde::de::DeserializeOwned;
use serde_json::Value;
use settee_query::ViewRow;

use crate::error::DbError;

/// How each fetched row becomes an output element.
///
/// Two implementations exist on purpose: [`RawRows`] passes rows through
/// untouched, [`DocOf`] deserializes them into a document type and keeps the
/// view key alongside it.
pub trait RowWrap {
    type Out;

    fn wrap(&self, row: ViewRow) -> Result<Self::Out, DbError>;
}

/// Pass-through mode: yields [`ViewRow`]s unchanged.
#[derive(Debug, Clone, Copy, Default)]
pub struct RawRows;

impl RowWrap for RawRows {
    type Out = ViewRow;

    fn wrap(&self, row: ViewRow) -> Result<ViewRow, DbError> {
        Ok(row)
    }
}

/// A deserialized document together with the view key that produced it.
///
/// Plain deserialization keeps only the document body; the key a row sorted
/// under in the view would be gone. Carrying it in an explicit wrapper beats
/// smuggling it into the document as a pseudo-field.
#[derive(Debug, Clone, PartialEq)]
pub struct Keyed<T> {
    pub key: Value,
    pub doc: T,
}

/// Typed mode: deserializes `row.doc` (or `row.value` when docs were not
/// included, as in reduce views) into `T` and yields [`Keyed<T>`].
pub struct DocOf<T> {
    _marker: PhantomData<fn() -> T>,
}

impl<T> DocOf<T> {
    pub fn new() -> Self {
        Self {
            _marker: PhantomData,
        }
    }
}

impl<T> Default for DocOf<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: DeserializeOwned> RowWrap for DocOf<T> {
    type Out = Keyed<T>;

    fn wrap(&self, row: ViewRow) -> Result<Keyed<T>, DbError> {
        let body = match row.doc {
            Some(doc) => doc,
            None => row.value,
        };
        let doc = serde_json::from_value(body).map_err(|e| DbError::Decode {
            id: row.id,
            message: e.to_string(),
        })?;
        Ok(Keyed { key: row.key, doc })
    }
}

use std::marker::PhantomData;

use settee_client::Database;
use settee_db::{DbError, DocOf, Paged, PagedQuery, RawRows};
use settee_query::ViewOptions;

use crate::document::Document;
use crate::error::DocsError;

pub const DEFAULT_PAGE_SIZE: usize = 1000;

/// A view query bound to a document type.
///
/// Pages at [`DEFAULT_PAGE_SIZE`] unless told otherwise and yields
/// [`Keyed<T>`](settee_db::Keyed) results; `include_docs` is forced on for
/// the typed iteration so there is a document body to deserialize. Set
/// `limit` in the options to cap the overall result count.
pub struct TypedQuery<'a, T> {
    db: &'a Database,
    query: PagedQuery,
    _marker: PhantomData<fn() -> T>,
}

impl<'a, T: Document> TypedQuery<'a, T> {
    pub(crate) fn new(db: &'a Database, view_name: &str) -> Result<Self, DocsError> {
        let query = PagedQuery::new(view_name)
            .map_err(DocsError::Db)?
            .page_size(DEFAULT_PAGE_SIZE);
        Ok(Self {
            db,
            query,
            _marker: PhantomData,
        })
    }

    pub fn page_size(mut self, page_size: usize) -> Self {
        self.query = self.query.page_size(page_size);
        self
    }

    pub fn options(mut self, options: ViewOptions) -> Self {
        self.query = self.query.options(options);
        self
    }

    pub fn options_mut(&mut self) -> &mut ViewOptions {
        self.query.options_mut()
    }

    /// Lazily iterate the view as `Keyed<T>`.
    pub fn iter(&self) -> Paged<'a, Database, DocOf<T>> {
        let mut query = self.query.clone();
        query.options_mut().include_docs = Some(true);
        query.docs(self.db)
    }

    /// Lazily iterate raw rows, options untouched. For reduce views and
    /// other queries where there is no document to wrap.
    pub fn rows(&self) -> Paged<'a, Database, RawRows> {
        self.query.clone().rows(self.db)
    }
}

/// Every non-system document of a database, via `_all_docs`.
///
/// Rows whose id starts with `_` (design documents and friends) are skipped.
/// The key of `_all_docs` is the id itself, so results are plain `T` with no
/// key wrapper.
pub struct AllDocs<'a, T> {
    inner: Paged<'a, Database, RawRows>,
    _marker: PhantomData<fn() -> T>,
}

impl<'a, T: Document> AllDocs<'a, T> {
    pub(crate) fn new(db: &'a Database, limit: Option<usize>) -> Result<Self, DocsError> {
        let mut query = PagedQuery::new("_all_docs")
            .map_err(DocsError::Db)?
            .page_size(DEFAULT_PAGE_SIZE);
        query.options_mut().include_docs = Some(true);
        query.options_mut().limit = limit;
        Ok(Self {
            inner: query.rows(db),
            _marker: PhantomData,
        })
    }
}

impl<T: Document> Iterator for AllDocs<'_, T> {
    type Item = Result<T, DbError>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let row = match self.inner.next()? {
                Ok(row) => row,
                Err(e) => return Some(Err(e)),
            };
            if row.id.as_deref().is_some_and(|id| id.starts_with('_')) {
                continue;
            }
            let body = match row.doc {
                Some(doc) => doc,
                None => row.value,
            };
            return Some(serde_json::from_value(body).map_err(|e| DbError::Decode {
                id: row.id,
                message: e.to_string(),
            }));
        }
    }
}

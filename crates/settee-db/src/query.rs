use serde::de::DeserializeOwned;
use settee_client::PageFetch;
use settee_query::{ViewOptions, ViewPath};

use crate::error::DbError;
use crate::paged::Paged;
use crate::wrap::{DocOf, RawRows};

/// A prepared view query.
///
/// Resolves the view path up front (a malformed identifier fails here, not
/// mid-iteration) and captures the options and page size. `.rows()` /
/// `.docs()` hand it to a fetcher and produce the lazy iterator.
///
/// With a page size, the caller's `limit` option is the *overall* result
/// limit; the per-request limit belongs to the paging engine. Without one,
/// the query runs as a single unbounded fetch with the options verbatim.
#[derive(Debug, Clone)]
pub struct PagedQuery {
    path: ViewPath,
    options: ViewOptions,
    page_size: Option<usize>,
}

impl PagedQuery {
    pub fn new(view_name: &str) -> Result<Self, DbError> {
        Ok(Self {
            path: ViewPath::resolve(view_name)?,
            options: ViewOptions::default(),
            page_size: None,
        })
    }

    pub fn options(mut self, options: ViewOptions) -> Self {
        self.options = options;
        self
    }

    pub fn options_mut(&mut self) -> &mut ViewOptions {
        &mut self.options
    }

    /// Page size 0 means unpaged, same as never setting one.
    pub fn page_size(mut self, page_size: usize) -> Self {
        self.page_size = Some(page_size);
        self
    }

    pub fn path(&self) -> &ViewPath {
        &self.path
    }

    /// Iterate raw view rows.
    pub fn rows<F: PageFetch + ?Sized>(self, fetcher: &F) -> Paged<'_, F, RawRows> {
        Paged::new(fetcher, self.path, self.options, self.page_size, RawRows)
    }

    /// Iterate rows deserialized as `T`, each carrying its view key.
    pub fn docs<T, F>(self, fetcher: &F) -> Paged<'_, F, DocOf<T>>
    where
        T: DeserializeOwned,
        F: PageFetch + ?Sized,
    {
        Paged::new(
            fetcher,
            self.path,
            self.options,
            self.page_size,
            DocOf::new(),
        )
    }
}

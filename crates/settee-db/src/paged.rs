use serde_json::Value;
use settee_client::PageFetch;
use settee_query::{ViewOptions, ViewPath, ViewRow};
use tracing::debug;

use crate::error::DbError;
use crate::wrap::RowWrap;

/// A lazy, page-at-a-time traversal of a view.
///
/// Each fetch asks for `page_size + 1` rows; the extra row is never emitted
/// and only tells us whether another page exists. When it arrives, it is
/// withheld as the continuation cursor and the next fetch resumes at it via
/// the inclusive `startkey`/`startkey_docid` seek, so the traversal is
/// gap-free and duplicate-free over a static result set. There is no
/// isolation across fetches: rows written near the cursor between pages may
/// or may not appear, the usual tradeoff of key-based pagination.
///
/// A fetch error ends the iteration at that point. Rows already emitted
/// stand; there is no automatic resume.
pub struct Paged<'a, F: ?Sized, W> {
    fetcher: &'a F,
    path: ViewPath,
    options: ViewOptions,
    wrap: W,
    /// `None` means unpaged: one unbounded fetch with the options verbatim.
    page_size: Option<usize>,
    overall_limit: Option<usize>,
    yielded: usize,
    started: bool,
    done: bool,
    cursor: Option<(Value, String)>,
    buffer: std::vec::IntoIter<ViewRow>,
}

impl<'a, F, W> Paged<'a, F, W>
where
    F: PageFetch + ?Sized,
    W: RowWrap,
{
    pub(crate) fn new(
        fetcher: &'a F,
        path: ViewPath,
        mut options: ViewOptions,
        page_size: Option<usize>,
        wrap: W,
    ) -> Self {
        let page_size = page_size.filter(|&n| n > 0);
        // In paged mode the caller's `limit` is the overall result limit;
        // the engine owns the wire limit from here on.
        let overall_limit = match page_size {
            Some(_) => options.limit.take(),
            None => None,
        };
        Self {
            fetcher,
            path,
            options,
            wrap,
            page_size,
            overall_limit,
            yielded: 0,
            started: false,
            done: false,
            cursor: None,
            buffer: Vec::new().into_iter(),
        }
    }

    fn turn_page(&mut self) -> Result<(), DbError> {
        let Some(page_size) = self.page_size else {
            let rows = self.fetcher.fetch_page(&self.path, &self.options)?;
            self.done = true;
            self.buffer = rows.into_iter();
            return Ok(());
        };

        let lookahead = page_size + 1;
        let request = match self.overall_limit {
            Some(limit) => {
                let remaining = limit - self.yielded;
                if remaining == 0 {
                    // Limit exhausted exactly at a page boundary.
                    self.done = true;
                    return Ok(());
                }
                lookahead.min(remaining + 1)
            }
            None => lookahead,
        };

        let mut options = self.options.clone();
        options.limit = Some(request);
        if self.started {
            // `skip` applies to the first fetch only; re-sending it would
            // drop rows inside every page.
            options.skip = None;
            if let Some((key, id)) = &self.cursor {
                options.startkey = Some(key.clone());
                options.startkey_docid = Some(id.clone());
            }
        }
        self.started = true;

        debug!(path = %self.path, limit = request, yielded = self.yielded, "fetching page");
        let mut batch = self.fetcher.fetch_page(&self.path, &options)?;

        if batch.len() == lookahead && request == lookahead {
            // Full page plus lookahead row: withhold the extra row as the
            // next cursor. The inclusive seek re-fetches it as the first
            // row of the next page.
            if let Some(last) = batch.pop() {
                let id = last.id.ok_or(DbError::MissingDocId)?;
                self.cursor = Some((last.key, id));
            }
        } else {
            // Short batch. Either the view is exhausted, or a request
            // clamped by the overall limit came back full — both mean no
            // further fetch. A clamped-but-full batch never counts as a
            // lookahead signal.
            self.done = true;
        }

        if let Some(limit) = self.overall_limit {
            batch.truncate(limit - self.yielded);
        }
        self.buffer = batch.into_iter();
        Ok(())
    }

    /// First element, if any.
    pub fn first(mut self) -> Result<Option<W::Out>, DbError> {
        self.next().transpose()
    }

    /// Exactly one element, or [`DbError::NoResult`] / [`DbError::MultipleResults`].
    pub fn one(mut self) -> Result<W::Out, DbError> {
        let first = self.next().transpose()?.ok_or(DbError::NoResult)?;
        match self.next() {
            None => Ok(first),
            Some(Ok(_)) => Err(DbError::MultipleResults),
            Some(Err(e)) => Err(e),
        }
    }

    /// Materialize the whole sequence.
    pub fn all(self) -> Result<Vec<W::Out>, DbError> {
        self.collect()
    }

    /// Count the remaining elements. Forces full materialization: every
    /// remaining page is fetched.
    pub fn count(self) -> Result<usize, DbError> {
        let mut n = 0;
        for item in self {
            item?;
            n += 1;
        }
        Ok(n)
    }

    /// Whether the sequence has any element. Forces the first fetch.
    pub fn is_empty(mut self) -> Result<bool, DbError> {
        Ok(self.next().transpose()?.is_none())
    }
}

impl<F, W> Iterator for Paged<'_, F, W>
where
    F: PageFetch + ?Sized,
    W: RowWrap,
{
    type Item = Result<W::Out, DbError>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(row) = self.buffer.next() {
                self.yielded += 1;
                return Some(self.wrap.wrap(row));
            }
            if self.done {
                return None;
            }
            if let Err(e) = self.turn_page() {
                self.done = true;
                self.buffer = Vec::new().into_iter();
                return Some(Err(e));
            }
        }
    }
}

use settee_query::{ViewOptions, ViewPath, ViewRow};

use crate::error::ClientError;

/// One bounded view request.
///
/// A single round trip: no retry, no interpretation of the options, errors
/// propagate unchanged. The paging engine in `settee-db` drives this seam;
/// [`Database`](crate::Database) is the HTTP implementation and
/// `MemoryViews` (feature `memory`) the in-process one for tests.
pub trait PageFetch {
    fn fetch_page(
        &self,
        path: &ViewPath,
        options: &ViewOptions,
    ) -> Result<Vec<ViewRow>, ClientError>;
}

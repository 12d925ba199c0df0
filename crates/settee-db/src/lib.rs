mod error;
mod paged;
mod query;
mod wrap;

pub use error::DbError;
pub use paged::Paged;
pub use query::PagedQuery;
pub use wrap::{DocOf, Keyed, RawRows, RowWrap};

mod error;
mod options;
mod path;
mod row;

pub use error::QueryError;
pub use options::ViewOptions;
pub use path::ViewPath;
pub use row::ViewRow;

mod document;
mod error;
mod registry;
mod settings;
mod typed;

pub use document::Document;
pub use error::{DocsError, SettingsError};
pub use registry::Registry;
pub use settings::{AppSettings, DatabaseSettings, UriSetting};
pub use typed::{AllDocs, DEFAULT_PAGE_SIZE, TypedQuery};

use std::fmt;

use settee_db::DbError;

/// Bad connection settings. Fatal at registry construction, never later.
#[derive(Debug)]
pub enum SettingsError {
    /// A single-string uri with no `/` to split the database name off.
    InvalidUri { app: String, uri: String },
    InvalidUrl { app: String, message: String },
}

impl fmt::Display for SettingsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SettingsError::InvalidUri { app, uri } => {
                write!(f, "invalid database uri for {app}: {uri}")
            }
            SettingsError::InvalidUrl { app, message } => {
                write!(f, "invalid server url for {app}: {message}")
            }
        }
    }
}

impl std::error::Error for SettingsError {}

#[derive(Debug)]
pub enum DocsError {
    /// No database is registered under this application label.
    UnknownApp(String),
    Db(DbError),
}

impl fmt::Display for DocsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DocsError::UnknownApp(app) => write!(f, "unknown application: {app}"),
            DocsError::Db(e) => write!(f, "{e}"),
        }
    }
}

impl std::error::Error for DocsError {}

impl From<DbError> for DocsError {
    fn from(e: DbError) -> Self {
        DocsError::Db(e)
    }
}

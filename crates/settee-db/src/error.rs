use std::fmt;

use settee_client::ClientError;
use settee_query::QueryError;

#[derive(Debug)]
pub enum DbError {
    Client(ClientError),
    Query(QueryError),
    Decode {
        id: Option<String>,
        message: String,
    },
    /// A continuation needed the last row's doc id, but the row had none
    /// (reduce output). The scan cannot resume past it.
    MissingDocId,
    NoResult,
    MultipleResults,
}

impl fmt::Display for DbError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DbError::Client(e) => write!(f, "client error: {e}"),
            DbError::Query(e) => write!(f, "query error: {e}"),
            DbError::Decode { id: Some(id), message } => {
                write!(f, "decode error for row {id}: {message}")
            }
            DbError::Decode { id: None, message } => write!(f, "decode error: {message}"),
            DbError::MissingDocId => {
                write!(f, "cannot continue paging: last row has no doc id")
            }
            DbError::NoResult => write!(f, "no result found"),
            DbError::MultipleResults => write!(f, "multiple results found"),
        }
    }
}

impl std::error::Error for DbError {}

impl From<ClientError> for DbError {
    fn from(e: ClientError) -> Self {
        DbError::Client(e)
    }
}

impl From<QueryError> for DbError {
    fn from(e: QueryError) -> Self {
        DbError::Query(e)
    }
}

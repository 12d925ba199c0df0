use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryError {
    MalformedView(String),
}

impl fmt::Display for QueryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QueryError::MalformedView(name) => {
                write!(f, "malformed view identifier: {name}")
            }
        }
    }
}

impl std::error::Error for QueryError {}

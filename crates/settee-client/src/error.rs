use std::fmt;

#[derive(Debug)]
pub enum ClientError {
    /// Transport-level failure: connect, timeout, bad URL.
    Http(String),
    /// The server answered with a non-2xx status.
    Status {
        status: u16,
        error: Option<String>,
        reason: Option<String>,
    },
    /// The response body did not decode as the expected shape.
    Decode(String),
}

impl fmt::Display for ClientError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ClientError::Http(msg) => write!(f, "http error: {msg}"),
            ClientError::Status {
                status,
                error,
                reason,
            } => {
                write!(f, "server returned {status}")?;
                if let Some(error) = error {
                    write!(f, ": {error}")?;
                }
                if let Some(reason) = reason {
                    write!(f, " ({reason})")?;
                }
                Ok(())
            }
            ClientError::Decode(msg) => write!(f, "decode error: {msg}"),
        }
    }
}

impl std::error::Error for ClientError {}

impl From<reqwest::Error> for ClientError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_decode() {
            ClientError::Decode(e.to_string())
        } else {
            ClientError::Http(e.to_string())
        }
    }
}

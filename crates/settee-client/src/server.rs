use std::time::Duration;

use reqwest::Url;
use reqwest::blocking::Client;

use crate::database::Database;
use crate::error::ClientError;

/// Basic-auth credentials. Blank user and password are valid — the server's
/// "admin party" mode — and are represented by passing no credentials at all.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    pub user: String,
    pub password: String,
}

#[derive(Debug, Clone)]
pub struct ClientOptions {
    pub timeout: Duration,
}

impl ClientOptions {
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(300);
}

impl Default for ClientOptions {
    fn default() -> Self {
        Self {
            timeout: Self::DEFAULT_TIMEOUT,
        }
    }
}

/// A handle on one server. Cheap to clone; the underlying HTTP client pools
/// connections and is shared by every [`Database`] produced from here.
#[derive(Debug, Clone)]
pub struct Server {
    base: Url,
    http: Client,
    credentials: Option<Credentials>,
}

impl Server {
    pub fn new(
        url: &str,
        credentials: Option<Credentials>,
        options: ClientOptions,
    ) -> Result<Self, ClientError> {
        let base = Url::parse(url).map_err(|e| ClientError::Http(e.to_string()))?;
        if base.host_str().is_none() {
            return Err(ClientError::Http(format!("server url has no host: {url}")));
        }
        let http = Client::builder()
            .timeout(options.timeout)
            .build()
            .map_err(|e| ClientError::Http(e.to_string()))?;
        Ok(Self {
            base,
            http,
            credentials,
        })
    }

    /// A handle on one database of this server.
    pub fn database(&self, name: &str) -> Result<Database, ClientError> {
        // The trailing slash keeps later joins relative to the database.
        let url = self
            .base
            .join(&format!("{name}/"))
            .map_err(|e| ClientError::Http(e.to_string()))?;
        Ok(Database::new(
            self.http.clone(),
            url,
            self.credentials.clone(),
        ))
    }
}

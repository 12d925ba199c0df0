use reqwest::Url;
use reqwest::blocking::Client;
use serde::Deserialize;
use settee_query::{ViewOptions, ViewPath, ViewRow};
use tracing::debug;

use crate::error::ClientError;
use crate::fetch::PageFetch;
use crate::server::Credentials;

/// A handle on one database. Produced by [`Server::database`](crate::Server::database).
#[derive(Debug, Clone)]
pub struct Database {
    http: Client,
    url: Url,
    credentials: Option<Credentials>,
}

#[derive(Debug, Deserialize)]
struct ViewEnvelope {
    #[serde(default)]
    rows: Vec<ViewRow>,
}

#[derive(Debug, Default, Deserialize)]
struct ErrorBody {
    error: Option<String>,
    reason: Option<String>,
}

impl Database {
    pub(crate) fn new(http: Client, url: Url, credentials: Option<Credentials>) -> Self {
        Self {
            http,
            url,
            credentials,
        }
    }

    pub fn url(&self) -> &Url {
        &self.url
    }
}

impl PageFetch for Database {
    fn fetch_page(
        &self,
        path: &ViewPath,
        options: &ViewOptions,
    ) -> Result<Vec<ViewRow>, ClientError> {
        let url = self
            .url
            .join(path.as_str())
            .map_err(|e| ClientError::Http(e.to_string()))?;

        debug!(url = %url, limit = ?options.limit, "issuing view request");

        let mut request = self.http.get(url).query(&options.query_pairs());
        if let Some(credentials) = &self.credentials {
            request = request.basic_auth(&credentials.user, Some(&credentials.password));
        }

        let response = request.send()?;
        let status = response.status();
        if !status.is_success() {
            let body: ErrorBody = response.json().unwrap_or_default();
            return Err(ClientError::Status {
                status: status.as_u16(),
                error: body.error,
                reason: body.reason,
            });
        }

        let envelope: ViewEnvelope = response.json()?;
        debug!(rows = envelope.rows.len(), "view response decoded");
        Ok(envelope.rows)
    }
}

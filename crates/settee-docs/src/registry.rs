use std::collections::HashMap;
use std::sync::OnceLock;

use settee_client::{ClientOptions, Database, Server};
use settee_db::DbError;

use crate::document::Document;
use crate::error::{DocsError, SettingsError};
use crate::settings::DatabaseSettings;
use crate::typed::{AllDocs, TypedQuery};

struct Entry {
    server: Server,
    dbname: String,
    handle: OnceLock<Database>,
}

/// The connection registry: one server binding per application label.
///
/// Built once from settings and immutable afterwards; pass it by reference
/// wherever queries are issued. Settings are validated eagerly so every
/// configuration failure happens here, not on first use. `Database` handles
/// are created lazily per application and cached; reads are safe from any
/// thread once construction returns.
pub struct Registry {
    apps: HashMap<String, Entry>,
}

impl Registry {
    pub fn new(settings: DatabaseSettings) -> Result<Self, SettingsError> {
        Self::with_options(settings, ClientOptions::default())
    }

    pub fn with_options(
        settings: DatabaseSettings,
        options: ClientOptions,
    ) -> Result<Self, SettingsError> {
        let mut apps = HashMap::new();
        for binding in settings.into_bindings()? {
            let server = Server::new(&binding.server_url, binding.credentials, options.clone())
                .map_err(|e| SettingsError::InvalidUrl {
                    app: binding.label.clone(),
                    message: e.to_string(),
                })?;
            // Probe the database join now so db() cannot fail on a bad name.
            server
                .database(&binding.dbname)
                .map_err(|e| SettingsError::InvalidUrl {
                    app: binding.label.clone(),
                    message: e.to_string(),
                })?;
            apps.insert(
                binding.label,
                Entry {
                    server,
                    dbname: binding.dbname,
                    handle: OnceLock::new(),
                },
            );
        }
        Ok(Self { apps })
    }

    /// The database handle for an application label, created on first use.
    pub fn db(&self, app: &str) -> Result<&Database, DocsError> {
        let entry = self
            .apps
            .get(app)
            .ok_or_else(|| DocsError::UnknownApp(app.to_string()))?;
        if let Some(db) = entry.handle.get() {
            return Ok(db);
        }
        let db = entry
            .server
            .database(&entry.dbname)
            .map_err(|e| DocsError::Db(DbError::Client(e)))?;
        // A racing initializer wins harmlessly; both built the same handle.
        Ok(entry.handle.get_or_init(|| db))
    }

    /// A typed view query against `T`'s database.
    pub fn query<T: Document>(&self, view_name: &str) -> Result<TypedQuery<'_, T>, DocsError> {
        TypedQuery::new(self.db(T::APP)?, view_name)
    }

    /// Every non-system document in `T`'s database, in id order.
    pub fn all_docs<T: Document>(&self, limit: Option<usize>) -> Result<AllDocs<'_, T>, DocsError> {
        AllDocs::new(self.db(T::APP)?, limit)
    }
}

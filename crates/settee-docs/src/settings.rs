use serde::Deserialize;
use settee_client::Credentials;
use std::collections::BTreeMap;

use crate::error::SettingsError;

/// Declarative database settings.
///
/// Two accepted shapes: a map of application name to [`AppSettings`], or the
/// legacy list of `(name, uri)` pairs. Application names may be dotted
/// module paths; only the final segment is used as the registry label.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum DatabaseSettings {
    Map(BTreeMap<String, AppSettings>),
    Pairs(Vec<(String, UriSetting)>),
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppSettings {
    #[serde(alias = "URL")]
    pub url: UriSetting,
    #[serde(default, alias = "USER")]
    pub user: Option<String>,
    #[serde(default, alias = "PASSWORD")]
    pub password: Option<String>,
}

/// A database location: either an explicit `(server_url, database_name)`
/// pair (useful when the server is proxied under a path), or a single
/// string split on its last `/`.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum UriSetting {
    Split(String, String),
    Single(String),
}

#[derive(Debug, Clone)]
pub(crate) struct Binding {
    pub label: String,
    pub server_url: String,
    pub dbname: String,
    pub credentials: Option<Credentials>,
}

impl DatabaseSettings {
    pub(crate) fn into_bindings(self) -> Result<Vec<Binding>, SettingsError> {
        match self {
            DatabaseSettings::Map(map) => map
                .into_iter()
                .map(|(app, settings)| {
                    binding(app, settings.url, settings.user, settings.password)
                })
                .collect(),
            DatabaseSettings::Pairs(pairs) => pairs
                .into_iter()
                .map(|(app, uri)| binding(app, uri, None, None))
                .collect(),
        }
    }
}

fn binding(
    app: String,
    uri: UriSetting,
    user: Option<String>,
    password: Option<String>,
) -> Result<Binding, SettingsError> {
    let (server_url, dbname) = match uri {
        UriSetting::Split(server, dbname) => (server, dbname),
        UriSetting::Single(uri) => match uri.rsplit_once('/') {
            Some((server, dbname)) => (server.to_string(), dbname.to_string()),
            None => return Err(SettingsError::InvalidUri { app, uri }),
        },
    };

    // Blank credentials mean the admin party: no auth header at all.
    let user = user.unwrap_or_default();
    let password = password.unwrap_or_default();
    let credentials = if user.is_empty() && password.is_empty() {
        None
    } else {
        Some(Credentials { user, password })
    };

    let label = app.rsplit('.').next().unwrap_or(&app).to_string();
    Ok(Binding {
        label,
        server_url,
        dbname,
        credentials,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn parse(value: serde_json::Value) -> Vec<Binding> {
        let settings: DatabaseSettings = serde_json::from_value(value).unwrap();
        settings.into_bindings().unwrap()
    }

    #[test]
    fn map_form_with_credentials() {
        let bindings = parse(json!({
            "tasks": {
                "url": "http://localhost:5984/taskdb",
                "user": "admin",
                "password": "hunter2"
            }
        }));
        assert_eq!(bindings.len(), 1);
        assert_eq!(bindings[0].label, "tasks");
        assert_eq!(bindings[0].server_url, "http://localhost:5984");
        assert_eq!(bindings[0].dbname, "taskdb");
        assert_eq!(
            bindings[0].credentials,
            Some(Credentials {
                user: "admin".into(),
                password: "hunter2".into()
            })
        );
    }

    #[test]
    fn legacy_uppercase_keys_are_accepted() {
        let bindings = parse(json!({
            "tasks": { "URL": "http://localhost:5984/taskdb", "USER": "admin" }
        }));
        assert_eq!(bindings[0].dbname, "taskdb");
        assert_eq!(
            bindings[0].credentials.as_ref().map(|c| c.user.as_str()),
            Some("admin")
        );
    }

    #[test]
    fn blank_credentials_are_admin_party() {
        let bindings = parse(json!({
            "tasks": { "url": "http://localhost:5984/taskdb", "user": "", "password": "" }
        }));
        assert!(bindings[0].credentials.is_none());
    }

    #[test]
    fn pair_form_with_single_string_uri() {
        let bindings = parse(json!([["tasks", "http://localhost:5984/taskdb"]]));
        assert_eq!(bindings[0].server_url, "http://localhost:5984");
        assert_eq!(bindings[0].dbname, "taskdb");
        assert!(bindings[0].credentials.is_none());
    }

    #[test]
    fn pair_form_with_split_uri() {
        let bindings = parse(json!([
            ["tasks", ["http://proxy.example.com/couch", "taskdb"]]
        ]));
        assert_eq!(bindings[0].server_url, "http://proxy.example.com/couch");
        assert_eq!(bindings[0].dbname, "taskdb");
    }

    #[test]
    fn dotted_app_name_registers_under_its_last_segment() {
        let bindings = parse(json!({
            "myproj.apps.tasks": { "url": "http://localhost:5984/taskdb" }
        }));
        assert_eq!(bindings[0].label, "tasks");
    }

    #[test]
    fn uri_without_slash_is_invalid() {
        let settings: DatabaseSettings =
            serde_json::from_value(json!([["tasks", "nodatabase"]])).unwrap();
        match settings.into_bindings() {
            Err(SettingsError::InvalidUri { app, uri }) => {
                assert_eq!(app, "tasks");
                assert_eq!(uri, "nodatabase");
            }
            other => panic!("expected invalid uri, got {other:?}"),
        }
    }
}

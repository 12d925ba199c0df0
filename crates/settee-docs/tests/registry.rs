use std::io::{Read, Write};
use std::net::TcpListener;
use std::sync::mpsc;
use std::thread;

use serde::Deserialize;
use serde_json::json;
use settee_docs::{DatabaseSettings, Document, DocsError, Registry, SettingsError};

#[derive(Debug, Deserialize)]
struct Task {
    name: String,
}

impl Document for Task {
    const APP: &'static str = "tasks";
}

fn serve_once(body: String) -> (String, mpsc::Receiver<String>) {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    let (tx, rx) = mpsc::channel();

    thread::spawn(move || {
        let (mut stream, _) = listener.accept().unwrap();
        let mut request = Vec::new();
        let mut buf = [0u8; 1024];
        loop {
            let n = stream.read(&mut buf).unwrap();
            request.extend_from_slice(&buf[..n]);
            if n == 0 || request.windows(4).any(|w| w == b"\r\n\r\n") {
                break;
            }
        }
        tx.send(String::from_utf8_lossy(&request).to_string())
            .unwrap();

        let response = format!(
            "HTTP/1.1 200 OK\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{body}",
            body.len()
        );
        stream.write_all(response.as_bytes()).unwrap();
    });

    (format!("http://{addr}"), rx)
}

fn settings_for(url: &str) -> DatabaseSettings {
    serde_json::from_value(json!({
        "myproj.apps.tasks": { "url": format!("{url}/taskdb") }
    }))
    .unwrap()
}

// ── Construction ────────────────────────────────────────────────

#[test]
fn bad_uri_fails_at_construction() {
    let settings: DatabaseSettings =
        serde_json::from_value(json!([["tasks", "nodatabase"]])).unwrap();
    assert!(matches!(
        Registry::new(settings),
        Err(SettingsError::InvalidUri { .. })
    ));
}

#[test]
fn bad_url_fails_at_construction() {
    let settings: DatabaseSettings =
        serde_json::from_value(json!({ "tasks": { "url": "not a url/db" } })).unwrap();
    assert!(matches!(
        Registry::new(settings),
        Err(SettingsError::InvalidUrl { .. })
    ));
}

#[test]
fn unknown_app_is_an_error() {
    let registry = Registry::new(settings_for("http://localhost:5984")).unwrap();
    assert!(matches!(
        registry.db("crm"),
        Err(DocsError::UnknownApp(_))
    ));
}

#[test]
fn handles_are_cached_per_app() {
    let registry = Registry::new(settings_for("http://localhost:5984")).unwrap();
    let first = registry.db("tasks").unwrap();
    let second = registry.db("tasks").unwrap();
    assert!(std::ptr::eq(first, second));
}

// ── Typed queries end to end ────────────────────────────────────

#[test]
fn typed_query_yields_keyed_documents() {
    let body = json!({
        "total_rows": 2,
        "offset": 0,
        "rows": [
            { "id": "doc-1", "key": "alpha", "value": null, "doc": { "name": "first" } },
            { "id": "doc-2", "key": "bravo", "value": null, "doc": { "name": "second" } },
        ]
    })
    .to_string();
    let (url, rx) = serve_once(body);

    let registry = Registry::new(settings_for(&url)).unwrap();
    let results = registry
        .query::<Task>("tasks/by_name")
        .unwrap()
        .iter()
        .all()
        .unwrap();

    assert_eq!(results.len(), 2);
    assert_eq!(results[0].key, json!("alpha"));
    assert_eq!(results[0].doc.name, "first");
    assert_eq!(results[1].doc.name, "second");

    let request = rx.recv().unwrap();
    let request_line = request.lines().next().unwrap().to_string();
    // Dotted app label, resolved view path, forced include_docs, default
    // page size plus the lookahead row.
    assert!(request_line.starts_with("GET /taskdb/_design/tasks/_view/by_name"));
    assert!(request_line.contains("include_docs=true"));
    assert!(request_line.contains("limit=1001"));
}

#[test]
fn malformed_view_name_fails_before_any_request() {
    let registry = Registry::new(settings_for("http://localhost:5984")).unwrap();
    assert!(registry.query::<Task>("bareword").is_err());
}

// ── all_docs ────────────────────────────────────────────────────

#[test]
fn all_docs_skips_system_rows() {
    let body = json!({
        "total_rows": 3,
        "offset": 0,
        "rows": [
            { "id": "_design/tasks", "key": "_design/tasks", "value": { "rev": "1-a" },
              "doc": { "views": {} } },
            { "id": "doc-1", "key": "doc-1", "value": { "rev": "1-b" },
              "doc": { "name": "first" } },
            { "id": "doc-2", "key": "doc-2", "value": { "rev": "1-c" },
              "doc": { "name": "second" } },
        ]
    })
    .to_string();
    let (url, rx) = serve_once(body);

    let registry = Registry::new(settings_for(&url)).unwrap();
    let docs: Vec<Task> = registry
        .all_docs::<Task>(None)
        .unwrap()
        .collect::<Result<_, _>>()
        .unwrap();

    assert_eq!(docs.len(), 2);
    assert_eq!(docs[0].name, "first");
    assert_eq!(docs[1].name, "second");

    let request = rx.recv().unwrap();
    assert!(request.starts_with("GET /taskdb/_all_docs"));
    assert!(request.lines().next().unwrap().contains("include_docs=true"));
}

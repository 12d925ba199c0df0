use serde::de::DeserializeOwned;

/// Binds a document type to the application label its database is
/// registered under.
///
/// ```
/// use serde::Deserialize;
/// use settee_docs::Document;
///
/// #[derive(Deserialize)]
/// struct Task {
///     name: String,
/// }
///
/// impl Document for Task {
///     const APP: &'static str = "tasks";
/// }
/// ```
pub trait Document: DeserializeOwned {
    const APP: &'static str;
}

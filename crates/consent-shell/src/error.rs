//! Error types for page shell composition.

use thiserror::Error;

/// Malformed or missing page configuration.
///
/// Reported synchronously by [`crate::compose::render`]; no partial document
/// is produced when one is returned.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("page title must not be empty")]
    EmptyTitle,

    #[error("head script {index} has no source: URL and inline payload are both empty")]
    MissingScriptSource { index: usize },

    #[error("head script {index} sets both a URL and an inline payload")]
    AmbiguousScriptSource { index: usize },

    #[error("head script {index} has invalid URL '{url}': {reason}")]
    InvalidScriptUrl {
        index: usize,
        url: String,
        reason: String,
    },

    #[error("head script {index} has invalid attribute name '{name}'")]
    InvalidAttributeName { index: usize, name: String },

    #[error("head script {index} sets reserved attribute '{name}'; use the source or load timing instead")]
    ReservedAttribute { index: usize, name: String },

    #[error("body widget {index} has an empty kind")]
    EmptyWidgetKind { index: usize },

    #[error("body widget {index} ('{kind}') registers a callback with an empty event name")]
    EmptyEventName { index: usize, kind: String },

    #[error("body widget {index} ('{kind}') lists event '{event}' more than once")]
    DuplicateEvent {
        index: usize,
        kind: String,
        event: String,
    },

    #[error("invalid locale '{0}'")]
    InvalidLocale(String),
}

/// Failure to load a JSON page manifest.
#[derive(Debug, Error)]
pub enum ManifestError {
    #[error("failed to read manifest {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse manifest: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

pub type Result<T> = std::result::Result<T, ConfigError>;

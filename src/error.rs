use thiserror::Error;

// ---------------------------------------------------------------------------
// StoreError
// ---------------------------------------------------------------------------

/// Failures reported by the remote document store collaborator.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The backend could not be reached at all.
    #[error("Transport error: {0}")]
    Transport(String),

    /// The backend was reached but rejected the operation.
    #[error("Backend error: {message}")]
    Backend {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// No document stored under the given key.
    #[error("Document not found: {collection}/{key}")]
    NotFound { collection: String, key: String },

    /// A stored document could not be decoded into the expected shape.
    #[error("Failed to decode document {collection}/{key}")]
    Decode {
        collection: String,
        key: String,
        #[source]
        source: serde_json::Error,
    },
}

// ---------------------------------------------------------------------------
// ConfigError
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing required environment variable {0}")]
    Missing(&'static str),

    #[error("Invalid value for {name}: {value:?} ({reason})")]
    Invalid {
        name: &'static str,
        value: String,
        reason: String,
    },
}

// ---------------------------------------------------------------------------
// WaypostError — top-level rollup
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum WaypostError {
    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The external map library failed to load. Terminal for the session.
    #[error("Map library failed to load: {0}")]
    MapLoad(String),
}

/// Convenience alias — the default error type is `WaypostError`.
pub type Result<T, E = WaypostError> = std::result::Result<T, E>;

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

use thiserror::Error;

#[derive(Debug, Error)]
pub enum IngestError {
    #[error("failed to read listings from {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed JSON document in {context}: {source}")]
    Malformed {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("{context} is not valid UTF-8: {source}")]
    Encoding {
        context: String,
        #[source]
        source: std::str::Utf8Error,
    },
}

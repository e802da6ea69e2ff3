use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    /// Only one-term queries reach the ranker.
    #[error("only one-word queries are supported (got {terms} terms)")]
    UnsupportedQueryShape { terms: usize },

    #[error("{0}")]
    Syntax(String),

    #[error("document {0} already exists")]
    DocumentExists(String),

    #[error("document {0} not found")]
    DocumentNotFound(String),

    #[error("document {0} is not valid UTF-8 text")]
    UnreadableDocument(String),

    #[error("invalid document id {0:?}, expected <name>.txt")]
    InvalidDocumentId(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

use thiserror::Error;

#[derive(Error, Debug)]
pub enum SnapzError {
    #[error("Document with id \"{0}\" does not exist")]
    DocumentNotFound(String),

    #[error("Parse error at position {position}: {message}")]
    Parse { position: usize, message: String },

    #[error(
        "Unable to soft set tag \"{name}\" holding [{}] with [{}]; use \"{name}:=\" to overwrite",
        .existing.join(" "),
        .incoming.join(" ")
    )]
    SoftSetConflict {
        name: String,
        existing: Vec<String>,
        incoming: Vec<String>,
    },

    #[error("\"{0}\" is not defined as a secondary index in .snapz-config")]
    ConfigInconsistency(String),

    #[error("Invalid id format: \"{0}\"")]
    InvalidId(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Store error: {0}")]
    Store(String),

    #[error("Api Error: {0}")]
    Api(String),
}

impl SnapzError {
    /// Builds a parse error for a grammar position where something
    /// specific was expected.
    pub fn expected(position: usize, what: impl AsRef<str>) -> Self {
        SnapzError::Parse {
            position,
            message: format!("expected {}", what.as_ref()),
        }
    }
}

pub type Result<T> = std::result::Result<T, SnapzError>;

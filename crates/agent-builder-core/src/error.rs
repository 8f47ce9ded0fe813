use thiserror::Error;

/// Errors surfaced by wizard operations
#[derive(Debug, Error)]
pub enum BuilderError {
    /// Website input could not be parsed as a URL
    #[error("invalid website URL '{input}': {source}")]
    InvalidUrl {
        input: String,
        #[source]
        source: url::ParseError,
    },

    #[error("unknown tool '{0}'")]
    UnknownTool(String),

    /// Settings can only be edited for tools that are switched on
    #[error("tool '{0}' is not selected")]
    ToolNotSelected(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("config error: {0}")]
    Config(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, BuilderError>;

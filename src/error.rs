use thiserror::Error;

#[derive(Error, Debug)]
pub enum TreevolveError {
    #[error("Grammar error: {0}")]
    Grammar(String),

    #[error("Operator error: {0}")]
    Operator(String),

    #[error("Selection error: {0}")]
    Selection(String),

    #[error("Population error: {0}")]
    Population(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Export error: {0}")]
    Export(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serde error: {0}")]
    Serde(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, TreevolveError>;

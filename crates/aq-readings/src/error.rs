use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    #[error("Unauthorized")]
    Unauthorized,

    #[error("Missing required field: {field}")]
    MissingField { field: &'static str },
}

pub type StoreResult<T> = Result<T, StoreError>;

#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Analysis process exited with status {code}: {stderr}")]
    NonZeroExit { code: i32, stderr: String },

    #[error("Invalid analysis output: {0}")]
    MalformedOutput(#[from] serde_json::Error),
}

pub type AnalysisResult<T> = Result<T, AnalysisError>;

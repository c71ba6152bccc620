use thiserror::Error;

#[derive(Error, Debug)]
pub enum CoConError {
    #[error("IO Error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV Error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON Parsing Error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Configuration Error: {0}")]
    Config(String),

    #[error("Unknown response selection mode '{0}' (expected 'None' or 'Conditional')")]
    UnknownMode(String),

    #[error(
        "Unsupported block: response_selection={response_selection}, inhibition={inhibition}, conflict={conflict}"
    )]
    UnsupportedBlock {
        response_selection: String,
        inhibition: bool,
        conflict: bool,
    },

    #[error("Data Validation Error: {0}")]
    Validation(String),
}

pub type CcResult<T> = Result<T, CoConError>;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum TeaError {
    #[error("source unreachable: {0}")]
    Transport(String),

    #[error("source {url} returned status {status}")]
    HttpStatus { url: String, status: u16 },

    #[error("catalogue has not been loaded yet")]
    NotLoaded,

    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    #[error("missing required column: {0}")]
    MissingColumn(String),

    #[error("config parse error: {0}")]
    ConfigParse(String),

    #[error("invalid preference profile: {0}")]
    InvalidProfile(String),

    #[error("invalid answer: {0}")]
    InvalidAnswer(String),

    #[error("cannot {action} while quiz is at {step}")]
    InvalidTransition { step: String, action: String },

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, TeaError>;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("unknown language: {0}")]
    UnknownLanguage(String),

    #[error("unknown route: {0}")]
    UnknownRoute(String),

    #[error("a translation is already in progress")]
    Busy,

    #[error("configuration error: {0}")]
    Config(String),

    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("HTTP {status}: {message}")]
    Http { status: u16, message: String },

    #[error("invalid translation response: {0}")]
    InvalidResponse(String),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

pub type CoreResult<T> = Result<T, CoreError>;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("service unavailable: {0}")]
    Unavailable(String),
    #[error("command failed: {0}")]
    Command(String),
    #[error("parse error: {0}")]
    Parse(String),
    #[cfg(feature = "http-service")]
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),
    #[cfg(feature = "http-service")]
    #[error("url error: {0}")]
    Url(#[from] url::ParseError),
}

pub type Result<T> = std::result::Result<T, ServiceError>;

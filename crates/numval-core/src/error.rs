use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("phone number pattern did not compile: {pattern}: {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },
    #[error("failed to serialize result: {0}")]
    Serialize(#[from] serde_json::Error),
}

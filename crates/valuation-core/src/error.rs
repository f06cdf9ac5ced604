use thiserror::Error;

#[derive(Error, Debug)]
pub enum SanitizeError {
    #[error("Malformed payload: {0}")]
    MalformedPayload(String),

    #[error("Missing scenarios: {0}")]
    MissingScenarios(String),

    #[error("Invalid record: {0}")]
    InvalidRecord(String),
}

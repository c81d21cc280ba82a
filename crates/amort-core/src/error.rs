use thiserror::Error;

#[derive(Debug, Error)]
pub enum AmortError {
    #[error("Invalid input: {field}: {reason}")]
    InvalidInput { field: String, reason: String },

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl From<serde_json::Error> for AmortError {
    fn from(e: serde_json::Error) -> Self {
        AmortError::SerializationError(e.to_string())
    }
}

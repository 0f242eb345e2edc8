use thiserror::Error;

/// All the ways things can go wrong in foliodeck
///
/// We use thiserror here because it generates the boilerplate for us.
/// Life's too short to manually implement Display and Error traits.
#[derive(Error, Debug)]
pub enum Error {
    #[error("API request failed: {0}")]
    ApiError(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Network error: {0}")]
    NetworkError(#[from] reqwest::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

impl From<foliodeck_api::ApiError> for Error {
    fn from(err: foliodeck_api::ApiError) -> Self {
        use foliodeck_api::ApiError;
        match err {
            ApiError::NotFound(what) => Error::NotFound(what),
            ApiError::Network(e) => Error::NetworkError(e),
            ApiError::Decode(e) => Error::SerializationError(e),
            other => Error::ApiError(other.to_string()),
        }
    }
}

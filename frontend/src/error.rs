use thiserror::Error;

/// Everything that can go wrong talking to the finance API.
///
/// Domain failures reported by the server (a JSON body carrying an `error`
/// field) and transport failures share this one type, so callers branch on a
/// single `Result` instead of checking response bodies by hand.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ApiError {
    #[error("{0}")]
    Rejected(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Could not read the server response: {0}")]
    Decode(String),
}

impl ApiError {
    /// The text shown inline on the auth screens.
    pub fn user_message(&self) -> String {
        match self {
            ApiError::Rejected(message) => message.clone(),
            _ => "An error occurred. Please try again.".to_string(),
        }
    }
}

impl From<gloo_net::Error> for ApiError {
    fn from(error: gloo_net::Error) -> Self {
        match error {
            gloo_net::Error::SerdeError(e) => ApiError::Decode(e.to_string()),
            other => ApiError::Network(other.to_string()),
        }
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(error: serde_json::Error) -> Self {
        ApiError::Decode(error.to_string())
    }
}

pub type ApiResult<T> = Result<T, ApiError>;

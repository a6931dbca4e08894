use thiserror::Error;

#[derive(Debug, Error)]
pub enum QueryError {
    #[error("Unknown category key: {0}")]
    UnknownCategoryKey(String),
    #[error("Invalid entity ID: {0}")]
    InvalidEntityId(String),
    #[error("No entity ID found in URI: {0}")]
    NoEntityIdInUri(String),
    #[error("Missing field {field} in binding {index}")]
    MissingField { field: String, index: usize },
    #[error("Invalid header value: {0}")]
    InvalidHeader(String),
    #[error("Invalid language code: {0}")]
    InvalidLanguage(String),
    #[error("Invalid endpoint URL: {0}")]
    UrlParse(#[from] url::ParseError),
    #[error("{0}")]
    Reqwest(#[from] reqwest::Error),
    #[error("{status} {status_text} / {body}")]
    ApiError {
        status: reqwest::StatusCode,
        status_text: String,
        body: String,
    },
    #[error("{0}")]
    SerdeJson(#[from] serde_json::Error),
    #[error("{0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid config file: {0}")]
    ConfigFile(#[from] toml::de::Error),
}

/// Maximum number of response body characters kept in an `ApiError`.
const MAX_ERROR_BODY_CHARS: usize = 500;

impl QueryError {
    /// Builds an `ApiError` from a non-success response.
    pub async fn from_response(response: reqwest::Response) -> Self {
        let status = response.status();
        let status_text = status.canonical_reason().unwrap_or_default().to_owned();
        let body = response
            .text()
            .await
            .unwrap_or_default()
            .chars()
            .take(MAX_ERROR_BODY_CHARS)
            .collect();
        QueryError::ApiError {
            status,
            status_text,
            body,
        }
    }

    /// Returns the HTTP status if this error came from a non-success response.
    pub const fn status(&self) -> Option<reqwest::StatusCode> {
        match self {
            QueryError::ApiError { status, .. } => Some(*status),
            _ => None,
        }
    }
}

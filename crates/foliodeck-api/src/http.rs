// Shared HTTP plumbing for the blog and portfolio clients
use serde::de::DeserializeOwned;
use thiserror::Error;
use tracing::debug;

/// Default API namespace of the backend.
pub const DEFAULT_API_BASE: &str = "http://localhost:8000/api/v1";

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("API request failed with status {status}: {body}")]
    RequestFailed { status: u16, body: String },

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("JSON decoding failed: {0}")]
    Decode(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, ApiError>;

/// Build the reqwest client both API clients share.
pub(crate) fn build_client() -> reqwest::Client {
    let mut headers = reqwest::header::HeaderMap::new();
    headers.insert(
        reqwest::header::USER_AGENT,
        reqwest::header::HeaderValue::from_static("foliodeck/0.1.0"),
    );
    headers.insert(
        reqwest::header::ACCEPT,
        reqwest::header::HeaderValue::from_static("application/json"),
    );

    reqwest::Client::builder()
        .default_headers(headers)
        .build()
        .expect("Failed to build HTTP client")
}

/// Map a response to a decoded body.
///
/// The body is read as text and decoded separately so a malformed payload
/// surfaces as `Decode`, not as a transport error. 404 is its own variant
/// because detail views treat it as terminal rather than retryable.
pub(crate) async fn read_json<T: DeserializeOwned>(
    response: reqwest::Response,
    what: &str,
) -> Result<T> {
    let status = response.status();

    if status == reqwest::StatusCode::NOT_FOUND {
        return Err(ApiError::NotFound(what.to_string()));
    }

    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(ApiError::RequestFailed {
            status: status.as_u16(),
            body,
        });
    }

    let body = response.text().await?;
    debug!(what, bytes = body.len(), "decoding response body");
    Ok(serde_json::from_str(&body)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_base_has_no_trailing_slash() {
        // URLs are assembled as "{base}/blog/posts/"
        assert!(!DEFAULT_API_BASE.ends_with('/'));
    }

    #[test]
    fn decode_error_from_serde() {
        let err = serde_json::from_str::<u32>("not json").unwrap_err();
        let api_err = ApiError::from(err);
        assert!(matches!(api_err, ApiError::Decode(_)));
        assert!(api_err.to_string().starts_with("JSON decoding failed"));
    }
}

use reqwest::header::HeaderMap;
use thiserror::Error;

/// Maximum length for error response bodies in error messages
const MAX_ERROR_BODY_LENGTH: usize = 500;

/// Truncate a response body to avoid logging excessive data.
/// The full body stays available on the error itself.
fn truncate_body(body: &str) -> String {
    if body.len() <= MAX_ERROR_BODY_LENGTH {
        body.to_string()
    } else {
        format!(
            "{}... (truncated, {} total bytes)",
            &body[..MAX_ERROR_BODY_LENGTH],
            body.len()
        )
    }
}

#[derive(Error, Debug)]
pub enum ApiError {
    /// Non-2xx response from the service
    #[error("request failed with status {status}: {}", truncate_body(.body))]
    Status {
        status: u16,
        body: String,
        headers: HeaderMap,
    },

    /// Transport-level failure; no response was received
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    /// 2xx response whose body could not be parsed
    #[error("invalid response: {0}")]
    InvalidResponse(String),
}

impl ApiError {
    /// The HTTP status code, if a response was received
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Response headers, if a response was received
    pub fn headers(&self) -> Option<&HeaderMap> {
        match self {
            ApiError::Status { headers, .. } => Some(headers),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_accessor() {
        let err = ApiError::Status {
            status: 401,
            body: r#"{"message":"invalid token"}"#.to_string(),
            headers: HeaderMap::new(),
        };
        assert_eq!(err.status(), Some(401));

        let err = ApiError::InvalidResponse("not json".to_string());
        assert_eq!(err.status(), None);
        assert!(err.headers().is_none());
    }

    #[test]
    fn test_long_bodies_are_truncated_in_display() {
        let err = ApiError::Status {
            status: 500,
            body: "x".repeat(2000),
            headers: HeaderMap::new(),
        };
        let msg = err.to_string();
        assert!(msg.contains("truncated, 2000 total bytes"));
        assert!(msg.len() < 700);
    }
}

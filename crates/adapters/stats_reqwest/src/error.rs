//! Stats client error types.

use kwhboard_domain::error::FetchError;

/// Errors specific to the HTTP stats adapter.
#[derive(Debug, thiserror::Error)]
pub enum StatsClientError {
    /// The configured base URL cannot be parsed.
    #[error("invalid controller URL")]
    InvalidUrl(#[from] url::ParseError),

    /// Building the client, connecting, or reading the body failed.
    #[error("HTTP transport error")]
    Transport(#[from] reqwest::Error),

    /// The controller answered with a non-2xx status.
    #[error("controller answered HTTP {0}")]
    HttpStatus(u16),

    /// The body is not a JSON command envelope.
    #[error("failed to decode stats body")]
    Decode(#[source] serde_json::Error),
}

impl StatsClientError {
    /// Convert into a [`FetchError`] for propagation across the port boundary.
    #[must_use]
    pub fn into_domain(self) -> FetchError {
        match self {
            Self::Decode(err) => FetchError::Malformed(err.to_string()),
            other => FetchError::Transport(Box::new(other)),
        }
    }
}

impl From<StatsClientError> for FetchError {
    fn from(err: StatsClientError) -> Self {
        err.into_domain()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_display_http_status_error() {
        let err = StatsClientError::HttpStatus(503);
        assert_eq!(err.to_string(), "controller answered HTTP 503");
    }

    #[test]
    fn should_convert_http_status_to_transport_error() {
        let err: FetchError = StatsClientError::HttpStatus(500).into();
        assert!(matches!(err, FetchError::Transport(_)));
        assert_eq!(err.reason_code(), "fetch.transport");
    }

    #[test]
    fn should_convert_decode_error_to_malformed() {
        let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err: FetchError = StatsClientError::Decode(json_err).into();
        assert!(matches!(err, FetchError::Malformed(_)));
    }

    #[test]
    fn should_convert_invalid_url_to_transport_error() {
        let parse_err = url::Url::parse("not a url").unwrap_err();
        let err: FetchError = StatsClientError::InvalidUrl(parse_err).into();
        assert!(matches!(err, FetchError::Transport(_)));
    }
}

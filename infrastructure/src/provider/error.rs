//! Error types for the model provider adapter

use jobchat_application::GatewayError;
use thiserror::Error;

/// Errors that can occur when talking to the chat-completions endpoint
#[derive(Error, Debug)]
pub enum ProviderError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("Failed to parse response: {0}")]
    Parse(String),

    #[error("Stream ended before completion")]
    StreamTruncated,

    #[error("Missing API key: set {0}")]
    MissingApiKey(String),
}

/// Map provider failures onto the gateway taxonomy the orchestrator
/// retries against.
///
/// | Provider failure | Gateway error | Retryable |
/// |---|---|---|
/// | timeout / connect error | `Timeout` / `ConnectionError` | yes |
/// | HTTP 429, 5xx | `ServiceUnavailable` | yes |
/// | HTTP 401, 403 | `AuthenticationFailed` | no |
/// | HTTP 402, 429 + quota wording | `QuotaExceeded` | no |
/// | unparseable body, truncated stream | `MalformedResponse` | no |
impl From<ProviderError> for GatewayError {
    fn from(err: ProviderError) -> Self {
        match err {
            ProviderError::Http(e) => {
                if e.is_timeout() {
                    GatewayError::Timeout
                } else {
                    GatewayError::ConnectionError(e.to_string())
                }
            }
            ProviderError::Api { status, message } => match status {
                401 | 403 => GatewayError::AuthenticationFailed(message),
                402 => GatewayError::QuotaExceeded(message),
                429 => {
                    let lowered = message.to_lowercase();
                    if lowered.contains("quota") || lowered.contains("billing") {
                        GatewayError::QuotaExceeded(message)
                    } else {
                        GatewayError::ServiceUnavailable(message)
                    }
                }
                s if s >= 500 => GatewayError::ServiceUnavailable(message),
                _ => GatewayError::RequestFailed(message),
            },
            ProviderError::Parse(msg) => GatewayError::MalformedResponse(msg),
            ProviderError::StreamTruncated => {
                GatewayError::MalformedResponse("stream ended before completion".to_string())
            }
            ProviderError::MissingApiKey(var) => {
                GatewayError::AuthenticationFailed(format!("missing API key ({})", var))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gateway(err: ProviderError) -> GatewayError {
        err.into()
    }

    #[test]
    fn auth_errors_are_permanent() {
        let err = gateway(ProviderError::Api {
            status: 401,
            message: "invalid key".into(),
        });
        assert!(matches!(err, GatewayError::AuthenticationFailed(_)));
        assert!(!err.is_transient());
    }

    #[test]
    fn rate_limit_is_transient_but_quota_is_not() {
        let rate = gateway(ProviderError::Api {
            status: 429,
            message: "Rate limit reached, retry soon".into(),
        });
        assert!(rate.is_transient());

        let quota = gateway(ProviderError::Api {
            status: 429,
            message: "You exceeded your current quota".into(),
        });
        assert!(matches!(quota, GatewayError::QuotaExceeded(_)));
        assert!(!quota.is_transient());
    }

    #[test]
    fn server_errors_are_transient() {
        let err = gateway(ProviderError::Api {
            status: 503,
            message: "overloaded".into(),
        });
        assert!(matches!(err, GatewayError::ServiceUnavailable(_)));
        assert!(err.is_transient());
    }

    #[test]
    fn parse_errors_are_permanent() {
        let err = gateway(ProviderError::Parse("unexpected token".into()));
        assert!(matches!(err, GatewayError::MalformedResponse(_)));
        assert!(!err.is_transient());
    }

    #[test]
    fn truncated_stream_is_permanent() {
        let err = gateway(ProviderError::StreamTruncated);
        assert!(matches!(err, GatewayError::MalformedResponse(_)));
    }
}

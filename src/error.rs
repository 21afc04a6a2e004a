use serde_json::Value;

/// Everything that can go wrong when talking to the API.
///
/// Locally detectable problems ([`Error::Configuration`], [`Error::Validation`])
/// are raised before a single byte leaves the process. The remaining variants
/// keep remote rejection ([`Error::Api`]), transport failure ([`Error::Network`])
/// and an unintelligible 2xx body ([`Error::Parse`]) apart, so callers can decide
/// what is worth retrying. The library itself never retries.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("configuration error: {0}")]
    Configuration(String),
    #[error("invalid request: {0}")]
    Validation(String),
    #[error(transparent)]
    Network(#[from] reqwest::Error),
    #[error(transparent)]
    Api(#[from] ApiError),
    #[error("unexpected response from the api: {source}")]
    Parse {
        #[source]
        source: serde_json::Error,
        body: String,
    },
}

impl Error {
    /// HTTP status attached to this error, when one exists.
    pub fn status(&self) -> Option<u16> {
        match self {
            Error::Api(api) => Some(api.status),
            Error::Network(network) => network.status().map(|status| status.as_u16()),
            _ => None,
        }
    }
}

/// A non-2xx answer from the backend.
#[derive(Debug, Clone, thiserror::Error)]
#[error("api error ({status}): {message}")]
pub struct ApiError {
    pub status: u16,
    /// Machine-readable code, when the payload carries one.
    pub code: Option<String>,
    pub message: String,
    /// The body exactly as it came off the wire.
    pub raw: String,
}

impl ApiError {
    /// Builds the error from whatever the backend sent. Known payload shapes
    /// (`{"error": "..."}`, `{"error": {"message", "code"}}`, `{"detail": "..."}`,
    /// `{"message": "..."}`) yield their message; anything else falls back to
    /// the raw text.
    pub(crate) fn from_body(status: u16, body: &str) -> Self {
        let mut code = None;
        let message = match serde_json::from_str::<Value>(body) {
            Ok(payload) => {
                code = payload
                    .get("error")
                    .and_then(|error| error.get("code"))
                    .or_else(|| payload.get("code"))
                    .and_then(Value::as_str)
                    .map(str::to_owned);
                extract_message(&payload).unwrap_or_else(|| body.trim().to_owned())
            }
            Err(_) => body.trim().to_owned(),
        };

        Self {
            status,
            code,
            message,
            raw: body.to_owned(),
        }
    }

    pub fn is_authentication(&self) -> bool {
        self.status == 401
    }

    pub fn is_permission_denied(&self) -> bool {
        self.status == 403
    }

    pub fn is_not_found(&self) -> bool {
        self.status == 404
    }
}

fn extract_message(payload: &Value) -> Option<String> {
    let from_error = match payload.get("error") {
        Some(Value::String(message)) => Some(message.clone()),
        Some(Value::Object(error)) => error
            .get("message")
            .and_then(Value::as_str)
            .map(str::to_owned),
        _ => None,
    };

    from_error
        .or_else(|| {
            payload
                .get("detail")
                .and_then(Value::as_str)
                .map(str::to_owned)
        })
        .or_else(|| {
            payload
                .get("message")
                .and_then(Value::as_str)
                .map(str::to_owned)
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn message_comes_from_the_error_key() {
        let error = ApiError::from_body(401, r#"{"error": "invalid_key"}"#);
        assert_eq!(error.status, 401);
        assert_eq!(error.message, "invalid_key");
        assert_eq!(error.code, None);
        assert!(error.is_authentication());
        assert!(!error.is_not_found());
    }

    #[test]
    fn structured_error_objects_surface_message_and_code() {
        let error = ApiError::from_body(
            403,
            r#"{"error": {"message": "account blocked", "code": "blocked"}}"#,
        );
        assert_eq!(error.message, "account blocked");
        assert_eq!(error.code.as_deref(), Some("blocked"));
        assert!(error.is_permission_denied());
    }

    #[test]
    fn detail_bodies_are_understood() {
        let error = ApiError::from_body(404, r#"{"detail": "model not found"}"#);
        assert_eq!(error.message, "model not found");
        assert!(error.is_not_found());
    }

    #[test]
    fn unparseable_bodies_fall_back_to_raw_text() {
        let error = ApiError::from_body(502, "Bad Gateway\n");
        assert_eq!(error.message, "Bad Gateway");
        assert_eq!(error.raw, "Bad Gateway\n");
    }

    #[test]
    fn status_is_reachable_through_the_top_level_error() {
        let error = Error::from(ApiError::from_body(401, "{}"));
        assert_eq!(error.status(), Some(401));
        assert_eq!(Error::Validation("nope".into()).status(), None);
    }
}

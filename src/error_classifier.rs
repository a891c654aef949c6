use crate::backend::error::BackendError;
use crate::logging::LogLevel;

#[derive(Debug, Clone)]
pub struct ErrorClassifier;

impl ErrorClassifier {
    pub fn new() -> Self {
        Self
    }

    /// Picks the level a failed backend call is logged at.
    pub fn classify(&self, error: &BackendError) -> LogLevel {
        match error {
            // Non-critical: Temporary server issues
            BackendError::Http { status, .. } if *status == 429 => LogLevel::Debug,
            BackendError::Http { status, .. } if (500..=599).contains(status) => LogLevel::Warn,

            // Critical: Auth, malformed responses
            BackendError::Http { status, .. } if *status == 401 => LogLevel::Error,
            BackendError::Http { status, .. } if *status == 403 => LogLevel::Error,
            BackendError::Decode(_) => LogLevel::Error,

            // Network issues - usually temporary
            _ => LogLevel::Warn,
        }
    }
}

impl Default for ErrorClassifier {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn http(status: u16) -> BackendError {
        BackendError::Http {
            status,
            message: String::new(),
        }
    }

    #[test]
    fn classifies_http_statuses() {
        let classifier = ErrorClassifier::new();
        assert_eq!(classifier.classify(&http(429)), LogLevel::Debug);
        assert_eq!(classifier.classify(&http(503)), LogLevel::Warn);
        assert_eq!(classifier.classify(&http(401)), LogLevel::Error);
        assert_eq!(classifier.classify(&http(404)), LogLevel::Warn);
    }

    #[test]
    fn malformed_bodies_are_errors() {
        let decode = serde_json::from_str::<u8>("nope").unwrap_err();
        assert_eq!(
            ErrorClassifier::new().classify(&BackendError::Decode(decode)),
            LogLevel::Error
        );
    }
}

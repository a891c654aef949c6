//! One-shot commands: each issues its requests, prints the outcome and returns the route the
//! user should continue from.

pub mod auth;
pub mod tasks;
pub mod upload;

use crate::backend::error::BackendError;
use crate::config::Session;
use crate::routes::Route;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CommandError {
    /// No bearer token is stored.
    #[error("Not logged in")]
    NotLoggedIn,

    /// A request failed. `message` is the user-facing text.
    #[error("{message}")]
    Backend {
        message: String,
        #[source]
        source: BackendError,
    },

    /// The backend answered but declined the request.
    #[error("{0}")]
    Rejected(String),

    /// The session file could not be read or written.
    #[error("Session storage error: {0}")]
    Session(#[from] std::io::Error),

    /// The file selected for upload could not be read.
    #[error("Could not read {path}: {source}")]
    File {
        path: String,
        source: std::io::Error,
    },

    /// An upload was requested without a file.
    #[error("Please select a file first.")]
    NoFileSelected,
}

impl CommandError {
    pub fn backend(message: impl Into<String>, source: BackendError) -> Self {
        CommandError::Backend {
            message: message.into(),
            source,
        }
    }

    /// Screen the user is sent to after this failure, if any.
    pub fn route(&self) -> Option<Route> {
        match self {
            CommandError::NotLoggedIn => Some(Route::Login),
            CommandError::Backend { source, .. } if source.is_auth_failure() => Some(Route::Login),
            CommandError::NoFileSelected => Some(Route::Uploads),
            _ => None,
        }
    }

    /// Backend detail worth showing below the generic message.
    pub fn details(&self) -> Option<String> {
        match self {
            CommandError::Backend { source, .. } => {
                Some(source.to_pretty().unwrap_or_else(|| source.to_string()))
            }
            _ => None,
        }
    }
}

/// Returns the stored bearer token, or `NotLoggedIn`.
pub fn require_token(session: &Session) -> Result<&str, CommandError> {
    session.token().ok_or(CommandError::NotLoggedIn)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn auth_failures_route_to_login() {
        let err = CommandError::backend(
            "Failed to fetch groups",
            BackendError::Http {
                status: 401,
                message: String::new(),
            },
        );
        assert_eq!(err.route(), Some(Route::Login));
        assert_eq!(CommandError::NotLoggedIn.route(), Some(Route::Login));
        assert_eq!(CommandError::NoFileSelected.route(), Some(Route::Uploads));
        assert_eq!(CommandError::Rejected("no".to_string()).route(), None);
    }

    #[test]
    fn missing_token_is_not_logged_in() {
        assert!(matches!(
            require_token(&Session::default()),
            Err(CommandError::NotLoggedIn)
        ));
        assert_eq!(require_token(&Session::with_token("jwt")).unwrap(), "jwt");
    }
}

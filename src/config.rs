//! Persisted session.
//!
//! The dashboard keeps three values between runs, under the same keys the web dashboard used in
//! local storage: the bearer token, the linked phone number and the organization id.

use crate::consts::cli_consts::storage;
use serde::{Deserialize, Serialize};
use std::{fs, path::Path, path::PathBuf};

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct Session {
    #[serde(rename = "org_jwt", default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
    #[serde(
        rename = "telegram_phone",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub phone: Option<String>,
    #[serde(
        rename = "organization_id",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub organization_id: Option<String>,
}

impl Session {
    /// Create a Session holding only a bearer token.
    #[cfg(test)]
    pub fn with_token(token: impl Into<String>) -> Self {
        Session {
            token: Some(token.into()),
            ..Default::default()
        }
    }

    /// Returns the bearer token if one is stored and non-empty.
    pub fn token(&self) -> Option<&str> {
        self.token.as_deref().filter(|t| !t.is_empty())
    }

    /// Loads the session from a JSON file at the given path.
    ///
    /// # Errors
    /// Returns an `std::io::Error` if reading from file fails or JSON is invalid.
    pub fn load_from_file(path: &Path) -> Result<Self, std::io::Error> {
        let buf = fs::read(path)?;
        let session: Session = serde_json::from_slice(&buf)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;
        Ok(session)
    }

    /// Loads the session, treating a missing file as an empty session.
    pub fn load_or_default(path: &Path) -> Result<Self, std::io::Error> {
        if !path.exists() {
            return Ok(Session::default());
        }
        Self::load_from_file(path)
    }

    /// Saves the session to a JSON file at the given path.
    ///
    /// Directories will be created if they don't exist. This method overwrites existing files.
    ///
    /// # Errors
    /// Returns an `std::io::Error` if writing to file fails or serialization fails.
    pub fn save(&self, path: &Path) -> Result<(), std::io::Error> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(self).map_err(|e| {
            std::io::Error::new(
                std::io::ErrorKind::InvalidData,
                format!("Serialization failed: {}", e),
            )
        })?;
        fs::write(path, json)?;
        Ok(())
    }

    /// Removes every session key by deleting the session file.
    pub fn clear(path: &Path) -> Result<(), std::io::Error> {
        if !path.ends_with(storage::SESSION_FILE) {
            return Err(std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                format!("Path must end with {}", storage::SESSION_FILE),
            ));
        }
        if !path.exists() {
            return Ok(());
        }
        fs::remove_file(path)
    }
}

/// Path of the session file: `$HOME/.sentiment-dashboard/session.json`.
pub fn get_session_path() -> Result<PathBuf, std::io::Error> {
    let home = home::home_dir().ok_or_else(|| {
        std::io::Error::new(
            std::io::ErrorKind::NotFound,
            "Could not determine the home directory",
        )
    })?;
    Ok(home.join(storage::CONFIG_DIR).join(storage::SESSION_FILE))
}

/// Path of the log file the terminal UI writes to, next to the session file.
pub fn get_log_path(session_path: &Path) -> PathBuf {
    session_path.with_file_name(storage::LOG_FILE)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;
    use std::io::Write;
    use tempfile::tempdir;

    #[test]
    // Loading a saved session file should return the same session.
    fn test_load_recovers_saved_session() {
        let dir = tempdir().unwrap();
        let path = dir.path().join(storage::SESSION_FILE);

        let session = Session {
            token: Some("jwt".to_string()),
            phone: Some("+15550100".to_string()),
            organization_id: Some("org-1".to_string()),
        };
        session.save(&path).unwrap();

        let loaded = Session::load_from_file(&path).unwrap();
        assert_eq!(session, loaded);
    }

    #[test]
    // The file uses the web dashboard's storage keys.
    fn test_serializes_with_storage_keys() {
        let session = Session {
            token: Some("jwt".to_string()),
            phone: Some("+15550100".to_string()),
            organization_id: None,
        };
        let json = serde_json::to_value(&session).unwrap();
        assert_eq!(json["org_jwt"], "jwt");
        assert_eq!(json["telegram_phone"], "+15550100");
        assert!(json.get("organization_id").is_none());
    }

    #[test]
    // Saving a session should create directories if they don't exist.
    fn test_save_creates_directories() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nonexistent_dir").join(storage::SESSION_FILE);

        let result = Session::with_token("jwt").save(&path);

        assert!(result.is_ok(), "Failed to save session");
        assert!(path.parent().unwrap().exists());
    }

    #[test]
    // Saving a session should overwrite an existing file.
    fn test_save_overwrites_existing_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join(storage::SESSION_FILE);

        Session::with_token("first").save(&path).unwrap();
        Session::with_token("second").save(&path).unwrap();

        let loaded = Session::load_from_file(&path).unwrap();
        assert_eq!(loaded.token(), Some("second"));
    }

    #[test]
    // Loading an invalid JSON file should return an error.
    fn test_load_rejects_invalid_json() {
        let dir = tempdir().unwrap();
        let path = dir.path().join(storage::SESSION_FILE);

        let mut file = File::create(&path).unwrap();
        writeln!(file, "invalid json").unwrap();

        assert!(Session::load_from_file(&path).is_err());
    }

    #[test]
    fn test_missing_file_loads_empty_session() {
        let dir = tempdir().unwrap();
        let path = dir.path().join(storage::SESSION_FILE);
        assert_eq!(Session::load_or_default(&path).unwrap(), Session::default());
    }

    #[test]
    fn test_clear_removes_file_and_tolerates_absence() {
        let dir = tempdir().unwrap();
        let path = dir.path().join(storage::SESSION_FILE);
        Session::with_token("jwt").save(&path).unwrap();

        Session::clear(&path).unwrap();
        assert!(!path.exists());
        Session::clear(&path).unwrap();
    }

    #[test]
    fn test_clear_refuses_foreign_paths() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("notes.txt");
        assert!(Session::clear(&path).is_err());
    }

    #[test]
    fn test_empty_token_counts_as_missing() {
        assert_eq!(Session::with_token("").token(), None);
    }
}

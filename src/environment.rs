use std::fmt::{Debug, Display, Formatter};
use std::str::FromStr;

/// Backend used when neither the build nor the command line picks one.
const PRODUCTION_BACKEND_URL: &str = "https://telegram-group-sentiment-analysis.onrender.com";

/// Backend started by `uvicorn` on a developer machine.
const LOCAL_BACKEND_URL: &str = "http://localhost:8000";

/// Represents the different backends the dashboard can talk to.
#[derive(Clone, Default, PartialEq, Eq)]
pub enum Environment {
    /// The hosted backend (or the URL baked in with `DASHBOARD_BACKEND_URL` at build time).
    #[default]
    Production,
    /// A backend running on localhost.
    Local,
    /// Any other backend, addressed by its base URL.
    Custom { backend_url: String },
}

impl Environment {
    /// Returns the backend base URL associated with the environment.
    pub fn backend_url(&self) -> String {
        match self {
            Environment::Production => option_env!("DASHBOARD_BACKEND_URL")
                .unwrap_or(PRODUCTION_BACKEND_URL)
                .to_string(),
            Environment::Local => LOCAL_BACKEND_URL.to_string(),
            Environment::Custom { backend_url } => backend_url.clone(),
        }
    }

    /// Picks the environment from an explicit URL, then a named environment, then the default.
    pub fn resolve(backend_url: Option<String>, name: Option<&str>) -> Self {
        if let Some(backend_url) = backend_url.filter(|url| !url.trim().is_empty()) {
            return Environment::Custom { backend_url };
        }
        name.and_then(|n| n.parse().ok()).unwrap_or_default()
    }
}

impl FromStr for Environment {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "production" | "prod" => Ok(Environment::Production),
            "local" => Ok(Environment::Local),
            other if other.starts_with("http://") || other.starts_with("https://") => {
                Ok(Environment::Custom {
                    backend_url: s.to_string(),
                })
            }
            _ => Err(()),
        }
    }
}

impl Display for Environment {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Production => write!(f, "Production"),
            Environment::Local => write!(f, "Local"),
            Environment::Custom { .. } => write!(f, "Custom"),
        }
    }
}

impl Debug for Environment {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "Environment::{}, URL: {}", self, self.backend_url())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_named_environments() {
        assert_eq!("local".parse::<Environment>(), Ok(Environment::Local));
        assert_eq!("PROD".parse::<Environment>(), Ok(Environment::Production));
        assert!("staging".parse::<Environment>().is_err());
    }

    #[test]
    fn parses_urls_as_custom() {
        let env: Environment = "http://10.0.0.5:8000".parse().unwrap();
        assert_eq!(env.backend_url(), "http://10.0.0.5:8000");
    }

    #[test]
    /// An explicit URL wins over the named environment.
    fn resolve_prefers_explicit_url() {
        let env = Environment::resolve(Some("http://example.test".to_string()), Some("local"));
        assert_eq!(
            env,
            Environment::Custom {
                backend_url: "http://example.test".to_string()
            }
        );
        assert_eq!(Environment::resolve(None, Some("local")), Environment::Local);
        assert_eq!(Environment::resolve(Some("  ".into()), None), Environment::Production);
    }
}

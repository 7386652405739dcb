//! Duke Data Service client configuration.

use serde::Deserialize;
use url::Url;

use crate::domain::AppError;

/// Connection settings for the Duke Data Service API.
///
/// Deserialized from the `ddsclient` YAML file, which carries more keys than
/// this client uses; unknown keys are ignored.
#[derive(Debug, Clone, Deserialize)]
pub struct DdsConfig {
    /// API root, e.g. `https://api.dataservice.duke.edu/api/v1`.
    #[serde(default = "default_url")]
    pub url: Url,
    /// Software agent key.
    #[serde(default)]
    pub agent_key: Option<String>,
    /// User key paired with the agent key.
    #[serde(default)]
    pub user_key: Option<String>,
    /// Pre-issued API token; only ever set from the environment.
    #[serde(skip)]
    pub api_token: Option<String>,
    /// Request timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

/// How the client authenticates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DdsCredentials {
    /// Use this token as-is.
    Token(String),
    /// Exchange the key pair for a token.
    AgentKeys { agent_key: String, user_key: String },
}

impl Default for DdsConfig {
    fn default() -> Self {
        Self {
            url: default_url(),
            agent_key: None,
            user_key: None,
            api_token: None,
            timeout_secs: default_timeout(),
        }
    }
}

impl DdsConfig {
    /// Resolve credentials, preferring an explicit API token.
    pub fn credentials(&self) -> Result<DdsCredentials, AppError> {
        if let Some(token) = non_empty(&self.api_token) {
            return Ok(DdsCredentials::Token(token.to_string()));
        }

        match (non_empty(&self.agent_key), non_empty(&self.user_key)) {
            (Some(agent_key), Some(user_key)) => Ok(DdsCredentials::AgentKeys {
                agent_key: agent_key.to_string(),
                user_key: user_key.to_string(),
            }),
            _ => Err(AppError::config_error(
                "Duke Data Service credentials missing: set DUKE_DATA_SERVICE_AUTH or add \
                 agent_key and user_key to ~/.ddsclient",
            )),
        }
    }

    pub fn validate(&self) -> Result<(), AppError> {
        if self.timeout_secs == 0 {
            return Err(AppError::config_error("timeout_secs must be greater than 0"));
        }
        self.credentials().map(|_| ())
    }

    /// Absolute URL for an API path such as `projects` or `files/{id}/url`.
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.url.as_str().trim_end_matches('/'), path.trim_start_matches('/'))
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

fn default_url() -> Url {
    Url::parse("https://api.dataservice.duke.edu/api/v1").expect("Default API URL must be valid")
}

fn default_timeout() -> u64 {
    60
}

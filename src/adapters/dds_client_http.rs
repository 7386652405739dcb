//! Duke Data Service client implementation using reqwest.

use std::cell::RefCell;
use std::collections::HashMap;
use std::fs::{self, File};
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

use reqwest::blocking::{Client, Response};
use reqwest::header::AUTHORIZATION;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::domain::{AppError, DdsConfig, DdsCredentials};
use crate::ports::ObjectStore;

const KIND_FILE: &str = "dds-file";
const KIND_FOLDER: &str = "dds-folder";
const DEFAULT_STATUS_MESSAGE: &str = "Duke Data Service request failed";

/// HTTP transport for the Duke Data Service API.
///
/// One API token is obtained per client and reused. Project lookups are
/// cached so a manifest of many files resolves its project once.
pub struct HttpDdsClient {
    config: DdsConfig,
    credentials: DdsCredentials,
    api: Client,
    transfer: Client,
    token: RefCell<Option<String>>,
    projects: RefCell<HashMap<String, String>>,
}

impl std::fmt::Debug for HttpDdsClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpDdsClient")
            .field("url", &self.config.url)
            .field("credentials", &"[REDACTED]")
            .finish()
    }
}

impl HttpDdsClient {
    /// Create a client for the given configuration.
    ///
    /// Fails without network access when no usable credentials are configured.
    pub fn new(config: &DdsConfig) -> Result<Self, AppError> {
        config.validate()?;
        let credentials = config.credentials()?;
        let timeout = Duration::from_secs(config.timeout_secs);

        let api = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| AppError::api(format!("Failed to create HTTP client: {}", e), None))?;

        // Dataset files are large; only connecting is bounded.
        let transfer = Client::builder()
            .connect_timeout(timeout)
            .timeout(None::<Duration>)
            .build()
            .map_err(|e| AppError::api(format!("Failed to create HTTP client: {}", e), None))?;

        Ok(Self {
            config: config.clone(),
            credentials,
            api,
            transfer,
            token: RefCell::new(None),
            projects: RefCell::new(HashMap::new()),
        })
    }

    fn api_token(&self) -> Result<String, AppError> {
        if let Some(token) = self.token.borrow().as_ref() {
            return Ok(token.clone());
        }

        let token = match &self.credentials {
            DdsCredentials::Token(token) => token.clone(),
            DdsCredentials::AgentKeys { agent_key, user_key } => {
                self.exchange_keys(agent_key, user_key)?
            }
        };

        *self.token.borrow_mut() = Some(token.clone());
        Ok(token)
    }

    fn exchange_keys(&self, agent_key: &str, user_key: &str) -> Result<String, AppError> {
        let url = self.config.endpoint("software_agents/api_token");
        tracing::debug!(%url, "requesting api token");

        let response = self
            .api
            .post(&url)
            .json(&TokenRequest { agent_key, user_key })
            .send()
            .map_err(|e| AppError::api(format!("HTTP request failed: {}", e), None))?;

        let token: TokenResponse = parse_json(check_status(response)?)?;
        Ok(token.api_token)
    }

    fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, &str)],
    ) -> Result<T, AppError> {
        let url = self.config.endpoint(path);
        tracing::debug!(%url, ?query, "GET");

        let response = self
            .api
            .get(&url)
            .header(AUTHORIZATION, self.api_token()?)
            .query(query)
            .send()
            .map_err(|e| AppError::api(format!("HTTP request failed: {}", e), None))?;

        parse_json(check_status(response)?)
    }

    fn project_id(&self, name: &str) -> Result<String, AppError> {
        if let Some(id) = self.projects.borrow().get(name) {
            return Ok(id.clone());
        }

        let listing: Listing = self.get_json("projects", &[("name", name)])?;
        let id = listing
            .results
            .into_iter()
            .find(|item| item.name == name && !item.is_deleted)
            .map(|item| item.id)
            .ok_or_else(|| AppError::CollectionNotFound(name.to_string()))?;

        self.projects.borrow_mut().insert(name.to_string(), id.clone());
        Ok(id)
    }

    /// Walk `key` segment by segment from the project root to a file ID.
    fn file_id(&self, collection: &str, project_id: &str, key: &str) -> Result<String, AppError> {
        let not_found = || AppError::ObjectNotFound {
            collection: collection.to_string(),
            key: key.to_string(),
        };

        let segments: Vec<&str> = key.split('/').filter(|s| !s.is_empty()).collect();
        let Some((file_name, folders)) = segments.split_last() else {
            return Err(not_found());
        };

        let mut parent = format!("projects/{}", project_id);
        for folder in folders {
            let id = self.child_id(&parent, folder, KIND_FOLDER)?.ok_or_else(not_found)?;
            parent = format!("folders/{}", id);
        }

        self.child_id(&parent, file_name, KIND_FILE)?.ok_or_else(not_found)
    }

    fn child_id(&self, parent: &str, name: &str, kind: &str) -> Result<Option<String>, AppError> {
        let listing: Listing =
            self.get_json(&format!("{}/children", parent), &[("name_contains", name)])?;

        Ok(listing
            .results
            .into_iter()
            .find(|item| {
                item.name == name && item.kind.as_deref() == Some(kind) && !item.is_deleted
            })
            .map(|item| item.id))
    }

    fn download(&self, file_id: &str, destination: &Path) -> Result<(), AppError> {
        let location: FileUrl = self.get_json(&format!("files/{}/url", file_id), &[])?;

        match location.http_verb.as_deref() {
            Some(verb) if !verb.eq_ignore_ascii_case("GET") => {
                return Err(AppError::api(format!("Unsupported download method '{}'", verb), None));
            }
            _ => {}
        }

        let url = format!("{}{}", location.host.trim_end_matches('/'), location.url);
        tracing::debug!(%url, destination = %destination.display(), "downloading");

        let response = self
            .transfer
            .get(&url)
            .send()
            .map_err(|e| AppError::api(format!("HTTP request failed: {}", e), None))?;
        let response = check_status(response)?;

        write_atomically(response, destination)
    }
}

impl ObjectStore for HttpDdsClient {
    fn fetch(&self, collection: &str, key: &str, destination: &Path) -> Result<(), AppError> {
        let project_id = self.project_id(collection)?;
        let file_id = self.file_id(collection, &project_id, key)?;
        self.download(&file_id, destination)
    }
}

/// Stream `response` into `<destination>.part`, then move it into place.
fn write_atomically(mut response: Response, destination: &Path) -> Result<(), AppError> {
    let partial = partial_path(destination);

    let result = (|| -> io::Result<()> {
        let mut file = File::create(&partial)?;
        io::copy(&mut response, &mut file)?;
        file.sync_all()?;
        fs::rename(&partial, destination)
    })();

    if let Err(err) = result {
        let _ = fs::remove_file(&partial);
        return Err(err.into());
    }
    Ok(())
}

fn partial_path(destination: &Path) -> PathBuf {
    let mut name = destination.as_os_str().to_owned();
    name.push(".part");
    PathBuf::from(name)
}

fn check_status(response: Response) -> Result<Response, AppError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let url = response.url().path().to_string();
    let body_text = response.text().unwrap_or_default();
    let detail = extract_error_message(&body_text).unwrap_or_else(|| {
        if !body_text.trim().is_empty() {
            body_text.trim().to_string()
        } else {
            DEFAULT_STATUS_MESSAGE.to_string()
        }
    });

    Err(AppError::api(
        format!("{} (HTTP {} from {})", detail, status.as_u16(), url),
        Some(status.as_u16()),
    ))
}

fn parse_json<T: DeserializeOwned>(response: Response) -> Result<T, AppError> {
    let status = response.status().as_u16();
    let body_text = response
        .text()
        .map_err(|e| AppError::api(format!("Failed to read response: {}", e), Some(status)))?;

    serde_json::from_str(&body_text)
        .map_err(|e| AppError::api(format!("Failed to parse response: {}", e), Some(status)))
}

/// DukeDS errors carry `reason` and `suggestion`; other proxies use `message`.
fn extract_error_message(body: &str) -> Option<String> {
    if body.trim().is_empty() {
        return None;
    }

    let parsed = serde_json::from_str::<serde_json::Value>(body).ok()?;
    let field = |name: &str| parsed.get(name).and_then(|v| v.as_str()).map(ToOwned::to_owned);

    match (field("reason"), field("suggestion")) {
        (Some(reason), Some(suggestion)) => Some(format!("{}: {}", reason, suggestion)),
        (Some(reason), None) => Some(reason),
        (None, _) => field("message").or_else(|| field("error")),
    }
}

#[derive(Debug, Serialize)]
struct TokenRequest<'a> {
    agent_key: &'a str,
    user_key: &'a str,
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    api_token: String,
}

#[derive(Debug, Deserialize)]
struct Listing {
    #[serde(default)]
    results: Vec<Item>,
}

#[derive(Debug, Deserialize)]
struct Item {
    id: String,
    name: String,
    #[serde(default)]
    kind: Option<String>,
    #[serde(default)]
    is_deleted: bool,
}

#[derive(Debug, Deserialize)]
struct FileUrl {
    host: String,
    url: String,
    #[serde(default)]
    http_verb: Option<String>,
}

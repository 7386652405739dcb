//! Shared testing utilities for ddh-fetch CLI tests.

use assert_cmd::Command;
use mockito::{Matcher, Mock, Server, ServerGuard};
use serde_json::json;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Manifest names for a quarter, in download order.
#[allow(dead_code)]
pub fn manifest_names(quarter: &str) -> Vec<String> {
    vec![
        "gene_summary.Rds".to_string(),
        format!("{}_achilles.Rds", quarter),
        format!("{}_expression_join.Rds", quarter),
        "sd_threshold.Rds".to_string(),
        "achilles_lower.Rds".to_string(),
        "achilles_upper.Rds".to_string(),
        "mean_virtual_achilles.Rds".to_string(),
        "sd_virtual_achilles.Rds".to_string(),
        "master_bottom_table.Rds".to_string(),
        "master_top_table.Rds".to_string(),
        "master_positive.Rds".to_string(),
        "master_negative.Rds".to_string(),
    ]
}

/// Body served for a file.
#[allow(dead_code)]
pub fn file_body(name: &str) -> String {
    format!("contents of {}", name)
}

/// Stand-in Duke Data Service holding a `ddh-data` project.
#[allow(dead_code)]
pub struct FakeDataService {
    server: ServerGuard,
    mocks: Vec<Mock>,
}

#[allow(dead_code)]
impl FakeDataService {
    pub const TOKEN: &'static str = "test-token";

    /// Serve every file in `names`.
    pub fn with_files(names: &[String]) -> Self {
        let mut server = Server::new();
        let mut mocks = Vec::new();

        mocks.push(
            server
                .mock("GET", "/projects")
                .match_query(Matcher::UrlEncoded("name".into(), "ddh-data".into()))
                .match_header("authorization", Self::TOKEN)
                .with_status(200)
                .with_header("content-type", "application/json")
                .with_body(json!({"results": [{"id": "p1", "name": "ddh-data"}]}).to_string())
                .create(),
        );

        let children: Vec<_> = names
            .iter()
            .enumerate()
            .map(|(i, name)| json!({"id": format!("f{}", i), "name": name, "kind": "dds-file"}))
            .collect();
        mocks.push(
            server
                .mock("GET", "/projects/p1/children")
                .match_query(Matcher::Any)
                .match_header("authorization", Self::TOKEN)
                .with_status(200)
                .with_header("content-type", "application/json")
                .with_body(json!({ "results": children }).to_string())
                .create(),
        );

        let host = server.url();
        for (i, name) in names.iter().enumerate() {
            mocks.push(
                server
                    .mock("GET", format!("/files/f{}/url", i).as_str())
                    .match_query(Matcher::Any)
                    .with_status(200)
                    .with_header("content-type", "application/json")
                    .with_body(
                        json!({"http_verb": "GET", "host": host, "url": format!("/blob/f{}", i)})
                            .to_string(),
                    )
                    .create(),
            );
            mocks.push(
                server
                    .mock("GET", format!("/blob/f{}", i).as_str())
                    .with_status(200)
                    .with_body(file_body(name))
                    .create(),
            );
        }

        Self { server, mocks }
    }

    /// Accept the given agent/user key pair in exchange for [`Self::TOKEN`].
    pub fn accept_agent_keys(&mut self, agent_key: &str, user_key: &str) -> &mut Self {
        let mock = self
            .server
            .mock("POST", "/software_agents/api_token")
            .match_body(Matcher::Json(json!({"agent_key": agent_key, "user_key": user_key})))
            .with_status(201)
            .with_header("content-type", "application/json")
            .with_body(json!({"api_token": Self::TOKEN, "expires_on": 1_600_000_000}).to_string())
            .expect(1)
            .create();
        self.mocks.push(mock);
        self
    }

    pub fn url(&self) -> String {
        self.server.url()
    }
}

/// Testing harness providing an isolated environment for CLI exercises.
#[allow(dead_code)]
pub struct TestContext {
    root: TempDir,
    work_dir: PathBuf,
}

#[allow(dead_code)]
impl TestContext {
    /// Create a new isolated environment.
    pub fn new() -> Self {
        let root = TempDir::new().expect("Failed to create temp directory for tests");
        let work_dir = root.path().join("work");
        fs::create_dir_all(&work_dir).expect("Failed to create test work directory");

        Self { root, work_dir }
    }

    /// Absolute path to the emulated `$HOME` directory.
    pub fn home(&self) -> &Path {
        self.root.path()
    }

    /// Directory the CLI runs in.
    pub fn work_dir(&self) -> &Path {
        &self.work_dir
    }

    /// Where downloads land.
    pub fn data_dir(&self) -> PathBuf {
        self.work_dir.join("data")
    }

    /// Write `~/.ddsclient` pointing at `url`, with optional agent keys.
    pub fn write_ddsclient(&self, url: &str, keys: Option<(&str, &str)>) {
        let mut content = format!("url: {}\n", url);
        if let Some((agent_key, user_key)) = keys {
            content.push_str(&format!("agent_key: {}\nuser_key: {}\n", agent_key, user_key));
        }
        fs::write(self.home().join(".ddsclient"), content).expect("Failed to write .ddsclient");
    }

    /// Build a command for invoking the compiled binary with a scrubbed environment.
    pub fn cli(&self) -> Command {
        let mut cmd = Command::cargo_bin("ddh-fetch").expect("Failed to locate ddh-fetch binary");
        cmd.current_dir(&self.work_dir)
            .env("HOME", self.home())
            .env_remove("DDH_QUARTER")
            .env_remove("DDSCLIENT_CONF")
            .env_remove("DUKE_DATA_SERVICE_AUTH")
            .env_remove("RUST_LOG");
        cmd
    }

    /// Like [`Self::cli`], authenticated with the fake service's token.
    pub fn cli_with_token(&self) -> Command {
        let mut cmd = self.cli();
        cmd.env("DUKE_DATA_SERVICE_AUTH", FakeDataService::TOKEN);
        cmd
    }

    /// Names of files present in the data directory, sorted.
    pub fn downloaded(&self) -> Vec<String> {
        let Ok(entries) = fs::read_dir(self.data_dir()) else {
            return Vec::new();
        };
        let mut names: Vec<String> = entries
            .filter_map(|e| e.ok())
            .map(|e| e.file_name().to_string_lossy().into_owned())
            .collect();
        names.sort();
        names
    }

    pub fn read_data_file(&self, name: &str) -> String {
        fs::read_to_string(self.data_dir().join(name))
            .unwrap_or_else(|e| panic!("data/{} should be readable: {}", name, e))
    }
}

//! ddh-fetch: download the quarterly DDH dataset files from the Duke Data Service.

pub mod adapters;
pub mod app;
pub mod domain;
pub mod ports;

#[cfg(test)]
pub(crate) mod testing;

use std::io;

use adapters::HttpDdsClient;
use app::commands::{fetch as fetch_cmd, list as list_cmd};
use domain::configuration::load_dds_config;

pub use domain::{AppError, FetchConfig, Manifest, ManifestEntry, Quarter};
pub use ports::ObjectStore;

/// Download every manifest file into `data/`.
///
/// `quarter` overrides `DDH_QUARTER`. Each file name is printed to stdout
/// immediately before its download starts.
pub fn fetch(quarter: Option<String>) -> Result<(), AppError> {
    let config = FetchConfig::from_env(quarter);
    let client = HttpDdsClient::new(&load_dds_config()?)?;

    fetch_cmd::execute(&client, &config, &mut io::stdout().lock())
}

/// Download every manifest file through a caller-supplied object store.
pub fn fetch_with<S>(store: &S, config: &FetchConfig) -> Result<(), AppError>
where
    S: ObjectStore + ?Sized,
{
    fetch_cmd::execute(store, config, &mut io::stdout().lock())
}

/// Print the manifest for a quarter without downloading anything.
pub fn list(quarter: Option<String>) -> Result<Manifest, AppError> {
    let config = FetchConfig::from_env(quarter);
    list_cmd::execute(&config, &mut io::stdout().lock())
}

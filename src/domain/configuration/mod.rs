pub mod dds_config;
pub mod fetch_config;
pub mod loader;

pub use dds_config::{DdsConfig, DdsCredentials};
pub use fetch_config::FetchConfig;
pub use loader::{load_dds_config, load_from, parse_config_content};

use std::path::PathBuf;

use crate::domain::{DATA_DIR, Quarter};

/// Inputs to one fetch run, resolved once at process start.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchConfig {
    pub quarter: Quarter,
    pub data_dir: PathBuf,
}

impl FetchConfig {
    /// Resolve from the environment; an explicit quarter takes precedence over `DDH_QUARTER`.
    pub fn from_env(quarter: Option<String>) -> Self {
        let quarter = quarter.map(Quarter::new).unwrap_or_else(Quarter::from_env);
        Self { quarter, data_dir: PathBuf::from(DATA_DIR) }
    }
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self { quarter: Quarter::default(), data_dir: PathBuf::from(DATA_DIR) }
    }
}

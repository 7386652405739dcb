pub mod configuration;
pub mod error;
pub mod manifest;
pub mod quarter;

pub use configuration::{DdsConfig, DdsCredentials, FetchConfig};
pub use error::AppError;
pub use manifest::{DATA_DIR, DDH_COLLECTION, Manifest, ManifestEntry};
pub use quarter::{DEFAULT_QUARTER, QUARTER_ENV, Quarter};

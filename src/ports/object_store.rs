//! Remote object store port definition.

use std::path::Path;

use crate::domain::AppError;

/// Port for downloading named objects from a remote collection.
pub trait ObjectStore {
    /// Download `key` from `collection` into the local file `destination`.
    ///
    /// Blocks until the object is fully written or the download fails.
    fn fetch(&self, collection: &str, key: &str, destination: &Path) -> Result<(), AppError>;
}

use std::fs;
use std::io::Write;

use crate::domain::{AppError, DDH_COLLECTION, FetchConfig, Manifest};
use crate::ports::ObjectStore;

/// Execute the fetch command.
///
/// Downloads every manifest entry in order, writing the entry's name to `out`
/// before requesting it. The first failure stops the run and is returned as-is.
pub fn execute<S, W>(store: &S, config: &FetchConfig, out: &mut W) -> Result<(), AppError>
where
    S: ObjectStore + ?Sized,
    W: Write + ?Sized,
{
    let manifest = Manifest::for_quarter(&config.quarter);

    if !config.data_dir.exists() {
        tracing::info!(path = %config.data_dir.display(), "creating data directory");
        fs::create_dir_all(&config.data_dir)?;
    }

    for entry in manifest.entries() {
        writeln!(out, "{}", entry.name())?;
        out.flush()?;

        store.fetch(DDH_COLLECTION, entry.name(), &entry.local_path(&config.data_dir))?;
    }

    Ok(())
}

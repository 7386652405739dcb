use std::io::Write;

use crate::domain::{AppError, FetchConfig, Manifest};

/// Execute the list command: print the manifest without touching the network.
pub fn execute<W: Write + ?Sized>(config: &FetchConfig, out: &mut W) -> Result<Manifest, AppError> {
    let manifest = Manifest::for_quarter(&config.quarter);
    for name in manifest.names() {
        writeln!(out, "{}", name)?;
    }
    Ok(manifest)
}

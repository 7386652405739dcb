//! The fixed list of DDH dataset files.

use std::path::{Path, PathBuf};

use super::Quarter;

/// Project on the Duke Data Service holding every manifest file.
pub const DDH_COLLECTION: &str = "ddh-data";

/// Local directory, relative to the working directory, receiving the files.
pub const DATA_DIR: &str = "data";

/// Manifest slots in declared order.
enum Slot {
    Fixed(&'static str),
    Quarterly(&'static str),
}

const SLOTS: [Slot; 12] = [
    Slot::Fixed("gene_summary.Rds"),
    Slot::Quarterly("achilles.Rds"),
    Slot::Quarterly("expression_join.Rds"),
    Slot::Fixed("sd_threshold.Rds"),
    Slot::Fixed("achilles_lower.Rds"),
    Slot::Fixed("achilles_upper.Rds"),
    Slot::Fixed("mean_virtual_achilles.Rds"),
    Slot::Fixed("sd_virtual_achilles.Rds"),
    Slot::Fixed("master_bottom_table.Rds"),
    Slot::Fixed("master_top_table.Rds"),
    Slot::Fixed("master_positive.Rds"),
    Slot::Fixed("master_negative.Rds"),
];

/// A single logical filename; also the remote key and the local file name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManifestEntry {
    name: String,
}

impl ManifestEntry {
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Destination of this entry under `data_dir`.
    pub fn local_path(&self, data_dir: &Path) -> PathBuf {
        data_dir.join(&self.name)
    }
}

/// Ordered list of files fetched for one quarter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Manifest {
    entries: Vec<ManifestEntry>,
}

impl Manifest {
    pub fn for_quarter(quarter: &Quarter) -> Self {
        let entries = SLOTS
            .iter()
            .map(|slot| {
                let name = match slot {
                    Slot::Fixed(name) => (*name).to_string(),
                    Slot::Quarterly(suffix) => format!("{}_{}", quarter, suffix),
                };
                ManifestEntry { name }
            })
            .collect();
        Self { entries }
    }

    pub fn entries(&self) -> &[ManifestEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(ManifestEntry::name)
    }
}

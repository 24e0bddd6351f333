//! File-backed pack size registry.
//!
//! Text format: one decimal pack size per line, ascending. Blank lines and
//! surrounding whitespace are ignored. A missing file reads as
//! [`DEFAULT_PACK_SIZES`].

use std::fs::{self, File};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use log::debug;

use crate::packs::{PackSize, DEFAULT_PACK_SIZES};
use crate::registry::{sorted_sizes, PackSizeRegistry, RegistryError};

/// Store path used when none is configured.
pub const DEFAULT_STORE: &str = "pack_sizes.txt";

#[derive(Debug, Clone)]
pub struct FileRegistry {
    path: PathBuf,
}

impl FileRegistry {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Sibling file a replacement is written to before the rename.
    ///
    /// Always the store path plus a `.tmp` suffix, so it never equals the store.
    fn staging_path(&self) -> PathBuf {
        let mut staging = self.path.clone().into_os_string();
        staging.push(".tmp");
        PathBuf::from(staging)
    }
}

impl PackSizeRegistry for FileRegistry {
    fn find_all(&self) -> Result<Vec<PackSize>, RegistryError> {
        match fs::read_to_string(&self.path) {
            Ok(text) => parse_sizes(&text),
            Err(err) if err.kind() == ErrorKind::NotFound => {
                debug!("{} not found, using default pack sizes", self.path.display());
                Ok(DEFAULT_PACK_SIZES.to_vec())
            }
            Err(err) => Err(err.into()),
        }
    }

    /// Writes a sibling temp file and renames it over the store, so readers
    /// see either the old list or the new one.
    fn replace_all(&self, sizes: &[PackSize]) -> Result<(), RegistryError> {
        let sorted = sorted_sizes(sizes)?;

        let staging = self.staging_path();
        {
            let mut file = File::create(&staging)?;
            for size in &sorted {
                writeln!(file, "{}", size)?;
            }
            file.sync_all()?;
        }
        fs::rename(&staging, &self.path)?;

        debug!("stored {} pack sizes in {}", sorted.len(), self.path.display());
        Ok(())
    }
}

/// Parses the store's text format into an ascending size list.
fn parse_sizes(text: &str) -> Result<Vec<PackSize>, RegistryError> {
    let mut sizes = Vec::new();
    for (index, line) in text.lines().enumerate() {
        let value = line.trim();
        if value.is_empty() {
            continue;
        }
        let size: PackSize = value.parse().map_err(|_| RegistryError::Parse {
            line: index + 1,
            value: value.to_string(),
        })?;
        if size == 0 {
            return Err(RegistryError::InvalidPackSize(size));
        }
        sizes.push(size);
    }
    sizes.sort_unstable();
    Ok(sizes)
}

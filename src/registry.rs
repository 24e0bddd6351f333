//! Storage of the currently configured pack sizes.

use std::sync::RwLock;

use thiserror::Error;

use crate::packs::{PackSize, DEFAULT_PACK_SIZES};

#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("pack size store I/O failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid pack size {value:?} on line {line}")]
    Parse { line: usize, value: String },
    #[error("pack sizes must be positive (got {0})")]
    InvalidPackSize(PackSize),
    #[error("pack size store lock poisoned")]
    Poisoned,
}

/// Source of the pack sizes used for calculations.
pub trait PackSizeRegistry {
    /// Returns a copy of all sizes, sorted ascending.
    fn find_all(&self) -> Result<Vec<PackSize>, RegistryError>;

    /// Replaces every stored size with `sizes`, kept sorted ascending.
    ///
    /// Zero sizes are rejected and leave the stored sizes unchanged.
    fn replace_all(&self, sizes: &[PackSize]) -> Result<(), RegistryError>;
}

/// Validates and sorts a replacement size list.
pub(crate) fn sorted_sizes(sizes: &[PackSize]) -> Result<Vec<PackSize>, RegistryError> {
    if sizes.contains(&0) {
        return Err(RegistryError::InvalidPackSize(0));
    }
    let mut sorted = sizes.to_vec();
    sorted.sort_unstable();
    Ok(sorted)
}

/// Process-local registry guarded by a read-write lock.
#[derive(Debug)]
pub struct InMemoryRegistry {
    sizes: RwLock<Vec<PackSize>>,
}

impl InMemoryRegistry {
    /// Creates a registry seeded with [`DEFAULT_PACK_SIZES`].
    pub fn new() -> Self {
        Self::with_sizes(DEFAULT_PACK_SIZES)
    }

    pub fn with_sizes(sizes: &[PackSize]) -> Self {
        let mut sizes = sizes.to_vec();
        sizes.sort_unstable();
        Self {
            sizes: RwLock::new(sizes),
        }
    }
}

impl Default for InMemoryRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl PackSizeRegistry for InMemoryRegistry {
    fn find_all(&self) -> Result<Vec<PackSize>, RegistryError> {
        let sizes = self.sizes.read().map_err(|_| RegistryError::Poisoned)?;
        Ok(sizes.clone())
    }

    fn replace_all(&self, sizes: &[PackSize]) -> Result<(), RegistryError> {
        let sorted = sorted_sizes(sizes)?;
        let mut stored = self.sizes.write().map_err(|_| RegistryError::Poisoned)?;
        *stored = sorted;
        Ok(())
    }
}

//! Save-slot persistence channel.
//!
//! This module provides:
//! - `SlotStore`: the interface the host exposes for per-slot data files
//! - `FileSlotStore`: `<save_dir>/<slot>/<file>.json` with atomic writes
//! - `MemorySlotStore`: in-memory store for tests and the demo binary

use std::collections::HashMap;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::error::{HostError, HostResult};

/// Per-slot opaque data files.
pub trait SlotStore {
    /// Read a data file from a slot. `None` when it does not exist.
    fn load_slot_blob(&self, slot: &str, file: &str) -> HostResult<Option<String>>;

    /// Write a data file into a slot.
    fn save_slot_blob(&mut self, slot: &str, file: &str, data: &str) -> HostResult<()>;
}

/// Validates a slot or file name.
fn validate_name(name: &str) -> HostResult<()> {
    if name.is_empty() {
        return Err(HostError::InvalidSlotName("Empty slot name".to_string()));
    }

    let invalid_chars = ['/', '\\', ':', '*', '?', '"', '<', '>', '|'];
    for c in invalid_chars {
        if name.contains(c) {
            return Err(HostError::InvalidSlotName(format!(
                "Invalid character '{c}' in slot name"
            )));
        }
    }

    if name == "." || name == ".." {
        return Err(HostError::InvalidSlotName(name.to_string()));
    }

    Ok(())
}

/// Slot store backed by a directory tree.
#[derive(Debug, Clone)]
pub struct FileSlotStore {
    save_dir: PathBuf,
}

impl FileSlotStore {
    /// Create a store rooted at `save_dir`.
    #[must_use]
    pub fn new(save_dir: impl AsRef<Path>) -> Self {
        Self {
            save_dir: save_dir.as_ref().to_path_buf(),
        }
    }

    /// Root directory.
    #[must_use]
    pub fn save_dir(&self) -> &Path {
        &self.save_dir
    }

    fn blob_path(&self, slot: &str, file: &str) -> PathBuf {
        self.save_dir.join(slot).join(format!("{file}.json"))
    }

    fn temp_path(&self, slot: &str, file: &str) -> PathBuf {
        self.save_dir.join(slot).join(format!("{file}.tmp"))
    }
}

impl SlotStore for FileSlotStore {
    fn load_slot_blob(&self, slot: &str, file: &str) -> HostResult<Option<String>> {
        validate_name(slot)?;
        validate_name(file)?;

        let path = self.blob_path(slot, file);
        if !path.exists() {
            debug!("No {} data in slot {}", file, slot);
            return Ok(None);
        }

        let data = fs::read_to_string(&path)?;
        debug!("Loaded {} from slot {}", file, slot);
        Ok(Some(data))
    }

    fn save_slot_blob(&mut self, slot: &str, file: &str, data: &str) -> HostResult<()> {
        validate_name(slot)?;
        validate_name(file)?;

        let final_path = self.blob_path(slot, file);
        let temp_path = self.temp_path(slot, file);
        if let Some(parent) = final_path.parent() {
            fs::create_dir_all(parent)?;
        }

        {
            let file = File::create(&temp_path)?;
            let mut writer = BufWriter::new(file);
            writer.write_all(data.as_bytes())?;
            writer.flush()?;
        }

        fs::rename(&temp_path, &final_path).map_err(|e| {
            let _ = fs::remove_file(&temp_path);
            HostError::Io(e)
        })?;

        info!("Saved {} to slot {}", file, slot);
        Ok(())
    }
}

/// Slot store kept in memory.
#[derive(Debug, Clone, Default)]
pub struct MemorySlotStore {
    blobs: HashMap<(String, String), String>,
}

impl MemorySlotStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored blobs.
    #[must_use]
    pub fn len(&self) -> usize {
        self.blobs.len()
    }

    /// Whether nothing has been stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.blobs.is_empty()
    }
}

impl SlotStore for MemorySlotStore {
    fn load_slot_blob(&self, slot: &str, file: &str) -> HostResult<Option<String>> {
        validate_name(slot)?;
        Ok(self
            .blobs
            .get(&(slot.to_string(), file.to_string()))
            .cloned())
    }

    fn save_slot_blob(&mut self, slot: &str, file: &str, data: &str) -> HostResult<()> {
        validate_name(slot)?;
        self.blobs
            .insert((slot.to_string(), file.to_string()), data.to_string());
        Ok(())
    }
}

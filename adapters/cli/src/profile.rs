use std::{fs, path::Path};

use anyhow::{Context, Result};
use battery_grid_system_progression::SaveData;

/// Loads persisted progression from `path`. A missing file yields a fresh
/// profile rather than an error.
pub(crate) fn load(path: &Path) -> Result<SaveData> {
    match fs::read_to_string(path) {
        Ok(contents) => serde_json::from_str(&contents)
            .with_context(|| format!("failed to parse profile at {}", path.display())),
        Err(error) if error.kind() == std::io::ErrorKind::NotFound => Ok(SaveData::default()),
        Err(error) => {
            Err(error).with_context(|| format!("failed to read profile at {}", path.display()))
        }
    }
}

/// Writes the profile to `path`, creating parent directories as needed.
pub(crate) fn store(path: &Path, save: &SaveData) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).with_context(|| {
                format!("failed to create profile directory {}", parent.display())
            })?;
        }
    }
    let json =
        serde_json::to_string_pretty(save).context("failed to serialize profile save data")?;
    fs::write(path, json).with_context(|| format!("failed to write profile at {}", path.display()))
}

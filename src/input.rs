use std::fs;

use anyhow::{Context, Result};
use camino::Utf8Path;

use crate::error::DiceError;

/// Fail unless `path` names an existing regular file.
pub fn ensure_input_file(path: &Utf8Path) -> Result<(), DiceError> {
    if !path.is_file() {
        return Err(DiceError::FileNotFound {
            path: path.to_owned(),
        });
    }
    Ok(())
}

/// Ensure a directory exists, creating it recursively if needed.
pub fn ensure_dir(path: &Utf8Path) -> Result<()> {
    if !path.is_dir() {
        fs::create_dir_all(path).with_context(|| format!("creating directory {}", path))?;
    }
    Ok(())
}

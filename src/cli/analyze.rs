use std::fs;
use std::path::Path;

use anyhow::{Context, Error, Result};

use crate::analysis;
use crate::core::AssistError;

/// Read a file from disk, returning its file name and raw bytes.
pub fn read_upload(path: &Path) -> Result<(String, Vec<u8>), Error> {
    let filename = path
        .file_name()
        .and_then(|name| name.to_str())
        .with_context(|| format!("Not a file: {}", path.display()))?
        .to_string();
    let bytes = fs::read(path).with_context(|| format!("Failed to read {}", path.display()))?;
    Ok((filename, bytes))
}

/// Kind and summary of the file at `path`.
pub fn describe(path: &Path) -> Result<String, Error> {
    let (filename, bytes) = read_upload(path)?;
    let content = std::str::from_utf8(&bytes).map_err(|source| AssistError::Decode {
        filename: filename.clone(),
        source,
    })?;
    let kind = analysis::classify(&filename, content);
    Ok(format!(
        "Detected: {}\n\n{}",
        kind,
        analysis::summarize(&filename, content)
    ))
}

pub fn run(path: &Path) -> Result<()> {
    println!("{}", describe(path)?);
    Ok(())
}

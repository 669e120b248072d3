//! File and stdin helpers for loading source text.

pub mod unicode;

use std::fs;
use std::io::{self, Read};
use std::path::Path;

use anyhow::{bail, Context, Result};

/// Largest source file accepted from disk or stdin.
const MAX_SOURCE_BYTES: u64 = 1024 * 1024;

/// Read a source file as UTF-8 text.
pub fn read_source_file(path: &Path) -> Result<String> {
    if !path.exists() {
        bail!("Source file '{}' does not exist", path.display());
    }
    if !path.is_file() {
        bail!("'{}' is not a file", path.display());
    }
    let len = fs::metadata(path)?.len();
    if len > MAX_SOURCE_BYTES {
        bail!(
            "'{}' is {} bytes; files larger than {} bytes are not supported",
            path.display(),
            len,
            MAX_SOURCE_BYTES
        );
    }
    fs::read_to_string(path).with_context(|| format!("Failed to read file '{}'", path.display()))
}

/// Read all of stdin (used when source is piped in).
pub fn read_stdin() -> Result<String> {
    let mut buf = String::new();
    io::stdin()
        .take(MAX_SOURCE_BYTES + 1)
        .read_to_string(&mut buf)
        .context("Failed to read source from stdin")?;
    if buf.len() as u64 > MAX_SOURCE_BYTES {
        bail!("stdin input exceeds {} bytes", MAX_SOURCE_BYTES);
    }
    Ok(buf)
}

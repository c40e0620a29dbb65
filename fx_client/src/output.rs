//! Output file handling.
//!
//! The formatted line is written to a temporary sibling first and then renamed over
//! the destination, so a reader never observes a partially written file.
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use fx_common::{Quote, Result};
use log::debug;

/// Writes `Dólar: <bid>` for `quote` to `path`, replacing any previous content.
///
/// The temporary sibling is removed on every failure path.
pub fn write_dollar_file(path: &Path, quote: &Quote) -> Result<()> {
    let tmp = temp_sibling(path);
    let written = write_synced(&tmp, quote.dollar_line().as_bytes())
        .and_then(|()| fs::rename(&tmp, path));
    if let Err(e) = written {
        discard(&tmp);
        return Err(e.into());
    }
    Ok(())
}

fn write_synced(path: &Path, bytes: &[u8]) -> io::Result<()> {
    let mut file = fs::File::create(path)?;
    file.write_all(bytes)?;
    file.sync_all()
}

fn discard(tmp: &Path) {
    match fs::remove_file(tmp) {
        Ok(()) => {}
        Err(e) if e.kind() == io::ErrorKind::NotFound => {}
        Err(e) => debug!("Failed to remove {}: {}", tmp.display(), e),
    }
}

fn temp_sibling(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}

/// Normalize a CLI-provided path string by trimming whitespace and matching quotes.
///
/// This allows passing Windows paths in quotes without breaking parsing.
pub fn normalize_path(raw: &str) -> PathBuf {
    let trimmed = raw.trim();
    let no_quotes = trimmed
        .strip_prefix('"')
        .and_then(|s| s.strip_suffix('"'))
        .unwrap_or(trimmed);
    PathBuf::from(no_quotes)
}

use std::fs;
use std::io::{self, Write};
use std::path::Path;

use tempfile::NamedTempFile;

/// Replaces `path` with `bytes` via a sibling temp file and a rename, so readers
/// observe either the previous contents or the new ones, never a partial file.
///
/// Parent directories are created as needed.
pub fn write_atomically(path: &Path, bytes: &[u8]) -> io::Result<()> {
    staged(path, bytes)?.persist(path).map_err(|e| e.error)?;
    Ok(())
}

/// Like [`write_atomically`], but never replaces an existing file.
///
/// Returns `false`, leaving the existing file untouched, when `path` is
/// already taken.
pub fn write_new_atomically(path: &Path, bytes: &[u8]) -> io::Result<bool> {
    match staged(path, bytes)?.persist_noclobber(path) {
        Ok(_) => Ok(true),
        Err(e) if e.error.kind() == io::ErrorKind::AlreadyExists => Ok(false),
        Err(e) => Err(e.error),
    }
}

/// Synced temp file next to `path`, ready to be renamed into place.
fn staged(path: &Path, bytes: &[u8]) -> io::Result<NamedTempFile> {
    let dir = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    fs::create_dir_all(dir)?;

    let mut tmp = NamedTempFile::new_in(dir)?;
    tmp.write_all(bytes)?;
    tmp.as_file().sync_all()?;
    Ok(tmp)
}

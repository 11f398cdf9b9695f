use std::fs::{self, File, OpenOptions};
use std::io::{self, Read, Seek};
use std::path::Path;

use crate::entry::{Entry, EntryKind, ExtractReport};
use crate::error::{Error, Result};
use crate::sanitize::sanitize_path;

/// Open the archive at `path` and extract it into `destination`.
pub fn extract_file(path: &Path, destination: &Path) -> Result<ExtractReport> {
    let file = File::open(path).map_err(|e| Error::OpenFile {
        path: path.to_path_buf(),
        source: e,
    })?;
    extract(file, destination)
}

/// Extract a ZIP archive into `destination`.
///
/// The destination is created if absent and canonicalized to form the
/// extraction root. Entries are processed in stored order; every entry
/// path is sanitized before any write, and the first failure aborts the
/// remainder of the archive.
pub fn extract<R: Read + Seek>(reader: R, destination: &Path) -> Result<ExtractReport> {
    let mut archive = zip::ZipArchive::new(reader).map_err(|e| Error::Open { source: e })?;

    fs::create_dir_all(destination).map_err(|e| Error::Root {
        path: destination.to_path_buf(),
        source: e,
    })?;
    let root = destination.canonicalize().map_err(|e| Error::Root {
        path: destination.to_path_buf(),
        source: e,
    })?;

    let mut entries = Vec::with_capacity(archive.len());
    let mut total_bytes = 0u64;

    for index in 0..archive.len() {
        let mut file = archive
            .by_index(index)
            .map_err(|e| Error::Entry { index, source: e })?;

        // Non-conforming writers store backslash separators.
        let name = file.name().replace('\\', "/");
        let sanitized = sanitize_path(&name, &root)?;
        let mode = file.unix_mode().map(|m| m & 0o777);

        let entry = if file.is_dir() {
            ensure_directory(&sanitized.resolved, mode.unwrap_or(0o755))?;
            Entry {
                original_path: sanitized.original,
                target_path: sanitized.resolved,
                size: 0,
                mode,
                kind: EntryKind::Directory,
            }
        } else {
            let written = write_file(&mut file, &sanitized.resolved, mode.unwrap_or(0o644))?;
            total_bytes += written;
            Entry {
                original_path: sanitized.original,
                target_path: sanitized.resolved,
                size: written,
                mode,
                kind: EntryKind::File,
            }
        };

        entries.push(entry);
    }

    Ok(ExtractReport {
        entry_count: entries.len(),
        total_bytes,
        entries,
    })
}

fn write_file<R: Read>(reader: &mut R, target: &Path, mode: u32) -> Result<u64> {
    if let Some(parent) = target.parent() {
        if !parent.exists() {
            fs::create_dir_all(parent).map_err(|e| Error::DirectoryCreation {
                path: parent.to_path_buf(),
                source: e,
            })?;
        }
    }

    let extraction_failed = |e: io::Error| Error::Extraction {
        entry: target.to_path_buf(),
        source: e,
    };

    let mut out = OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .open(target)
        .map_err(extraction_failed)?;
    let written = io::copy(reader, &mut out).map_err(extraction_failed)?;
    apply_mode(target, mode).map_err(extraction_failed)?;

    Ok(written)
}

fn ensure_directory(path: &Path, mode: u32) -> Result<()> {
    let creation_failed = |e: io::Error| Error::DirectoryCreation {
        path: path.to_path_buf(),
        source: e,
    };

    if !path.exists() {
        fs::create_dir_all(path).map_err(creation_failed)?;
    }
    apply_mode(path, mode).map_err(creation_failed)
}

#[cfg(unix)]
fn apply_mode(path: &Path, mode: u32) -> io::Result<()> {
    use std::os::unix::fs::PermissionsExt;
    fs::set_permissions(path, fs::Permissions::from_mode(mode))
}

#[cfg(not(unix))]
fn apply_mode(_path: &Path, _mode: u32) -> io::Result<()> {
    Ok(())
}

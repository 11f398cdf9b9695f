use std::path::{Component, Path, PathBuf};

use crate::error::{Error, Result};

/// Result of sanitizing an archive entry path.
#[derive(Clone, Debug)]
pub struct SanitizedPath {
    pub original: PathBuf,
    pub resolved: PathBuf,
}

/// Sanitize an archive entry path against an extraction root.
///
/// Joins the declared entry name onto `root`, resolves `.`/`..` segments
/// lexically, and verifies the result is `root` itself or a strict
/// descendant of it. The check runs before any filesystem write; `root`
/// must already be absolute and normalized.
pub fn sanitize_path<P: AsRef<Path>, B: AsRef<Path>>(
    entry_path: P,
    root: B,
) -> Result<SanitizedPath> {
    let entry_path = entry_path.as_ref();
    let root = root.as_ref();

    // Absolute entry names never come from a well-formed archive.
    if entry_path.is_absolute() {
        return Err(Error::Traversal {
            entry: entry_path.to_path_buf(),
            resolved: normalize_path(entry_path),
        });
    }

    // Normalize after joining so leading `..` segments walk out of the
    // root and fail the containment check instead of being swallowed.
    let resolved = normalize_path(&root.join(entry_path));

    if !resolved.starts_with(root) {
        return Err(Error::Traversal {
            entry: entry_path.to_path_buf(),
            resolved,
        });
    }

    Ok(SanitizedPath {
        original: entry_path.to_path_buf(),
        resolved,
    })
}

/// Resolve relative components without touching the filesystem.
fn normalize_path(path: &Path) -> PathBuf {
    let mut result = PathBuf::new();

    for component in path.components() {
        match component {
            Component::ParentDir => {
                result.pop();
            }
            Component::Normal(part) => result.push(part),
            Component::RootDir => result.push(Component::RootDir),
            Component::Prefix(prefix) => result.push(prefix.as_os_str()),
            Component::CurDir => {}
        }
    }

    result
}

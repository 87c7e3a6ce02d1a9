//! Access control for dump files.
//!
//! This crate provides the [`DownloadPolicy`] deciding which artifact kinds
//! may be handed out, and [`resolve_contained`], which maps a caller-supplied
//! file name onto a path that is guaranteed to stay inside a dump directory.
//!
//! Containment is decided on canonical paths with [`Path::starts_with`],
//! which compares whole components. A sibling directory whose name merely
//! starts with the dump directory's name (`dump1` vs `dump10`) is outside.

use dumpstore_core::ArtifactKind;
use serde::{Deserialize, Serialize};
use std::path::{Component, Path, PathBuf};
use thiserror::Error;

/// Controls whether primary dump files may be downloaded.
///
/// All other artifact kinds are always downloadable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DownloadPolicy {
    /// Primary dumps can be downloaded.
    AllowPrimaryDumps,
    /// Primary dumps stay on the server.
    DenyPrimaryDumps,
}

impl Default for DownloadPolicy {
    fn default() -> Self {
        DownloadPolicy::DenyPrimaryDumps
    }
}

impl DownloadPolicy {
    /// Policy from the global dump-downloadable flag.
    pub fn from_flag(dump_downloadable: bool) -> Self {
        if dump_downloadable {
            DownloadPolicy::AllowPrimaryDumps
        } else {
            DownloadPolicy::DenyPrimaryDumps
        }
    }

    /// Whether a file of this kind may be handed out.
    pub fn permits(&self, kind: ArtifactKind) -> bool {
        kind != ArtifactKind::PrimaryDump || *self == DownloadPolicy::AllowPrimaryDumps
    }
}

/// Access refused by the containment check.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("access denied for '{requested}': {reason}")]
pub struct AccessDenied {
    /// Name the caller asked for
    pub requested: String,
    /// Why it was refused
    pub reason: &'static str,
}

impl AccessDenied {
    fn new(requested: &str, reason: &'static str) -> Self {
        Self {
            requested: requested.to_string(),
            reason,
        }
    }
}

/// Whether a requested name contains a parent-directory component.
///
/// Both `/` and `\` count as separators so Windows-style names are caught
/// on every platform.
pub fn has_traversal_token(requested: &str) -> bool {
    requested.split(['/', '\\']).any(|segment| segment == "..")
}

/// Resolve `requested` against `root`, refusing anything that escapes it.
///
/// Checks, in order:
/// 1. no `..` component
/// 2. not an absolute path
/// 3. the canonical result lies strictly inside the canonical `root`
///
/// Neither the file nor its parent directories have to exist.
pub fn resolve_contained(root: &Path, requested: &str) -> Result<PathBuf, AccessDenied> {
    if has_traversal_token(requested) {
        return Err(AccessDenied::new(requested, "path traversal"));
    }

    let relative = Path::new(requested);
    if relative
        .components()
        .any(|c| matches!(c, Component::RootDir | Component::Prefix(_)))
    {
        return Err(AccessDenied::new(requested, "absolute path"));
    }

    let canonical_root = root
        .canonicalize()
        .map_err(|_| AccessDenied::new(requested, "dump directory cannot be resolved"))?;
    let candidate = canonical_root.join(relative);
    let resolved = canonicalize_lenient(&candidate)
        .ok_or_else(|| AccessDenied::new(requested, "path cannot be resolved"))?;

    if resolved == canonical_root || !resolved.starts_with(&canonical_root) {
        return Err(AccessDenied::new(requested, "outside of dump directory"));
    }
    Ok(resolved)
}

/// Canonicalize a path that may not exist yet.
///
/// The deepest existing ancestor is canonicalized and the missing
/// components are appended to it, so symlinked ancestors are still resolved.
fn canonicalize_lenient(path: &Path) -> Option<PathBuf> {
    let mut existing = path;
    let mut missing = Vec::new();
    loop {
        match existing.canonicalize() {
            Ok(mut resolved) => {
                resolved.extend(missing.iter().rev());
                return Some(resolved);
            }
            Err(_) => {
                missing.push(existing.file_name()?);
                existing = existing.parent()?;
            }
        }
    }
}

//! Streaming directory walker for plugin content roots
//!
//! Yields every regular file below a directory as a base-relative key using
//! `/` separators. Symbolic links are resolved and must stay inside the base
//! directory: a link that escapes it aborts the walk with
//! [`Error::PathEscape`]. Links to regular files are reported under the
//! link's own path; links to directories are not descended into.
//!
//! The walk is lazy: directory handles are opened as the iterator advances
//! and released when it is dropped, so large trees are never loaded whole.

use std::path::{Component, Path, PathBuf};

use tracing::{debug, trace};
use walkdir::{DirEntry, WalkDir};

use crate::error::{Error, Result};

/// Depth-first iterator over the regular files of a content directory
pub struct PluginWalker {
    /// Canonical base directory all keys are relative to
    base: PathBuf,
    inner: walkdir::IntoIter,
    /// Set once an error has been yielded; the walk is not resumed after that
    finished: bool,
}

impl PluginWalker {
    /// Walk `dir`, producing keys relative to `base`
    ///
    /// `dir` must be `base` or lie below it.
    pub fn new(dir: &Path, base: &Path) -> Result<Self> {
        let base = base.canonicalize().map_err(|e| Error::io(base, e))?;
        let dir = dir.canonicalize().map_err(|e| Error::io(dir, e))?;

        if !dir.starts_with(&base) {
            return Err(Error::path_escape(dir.display().to_string(), base));
        }

        let inner = WalkDir::new(&dir)
            .min_depth(1)
            .follow_links(false)
            .into_iter();

        Ok(Self {
            base,
            inner,
            finished: false,
        })
    }

    /// Canonical base directory used for containment checks
    pub fn base(&self) -> &Path {
        &self.base
    }

    fn relative_key(&self, path: &Path) -> Result<String> {
        let relative = path
            .strip_prefix(&self.base)
            .map_err(|_| Error::path_escape(path.display().to_string(), &self.base))?;
        to_manifest_key(relative)
    }

    /// Classify one entry; `Ok(None)` means the entry is not part of the manifest
    fn visit(&self, entry: &DirEntry) -> Result<Option<String>> {
        let file_type = entry.file_type();

        if file_type.is_file() {
            return self.relative_key(entry.path()).map(Some);
        }

        if file_type.is_symlink() {
            return self.visit_symlink(entry);
        }

        // Directories are descended by walkdir; sockets, fifos and devices are ignored
        Ok(None)
    }

    fn visit_symlink(&self, entry: &DirEntry) -> Result<Option<String>> {
        let key = self.relative_key(entry.path())?;

        let target = match std::fs::canonicalize(entry.path()) {
            Ok(target) => target,
            Err(e) => {
                debug!(link = %key, error = %e, "Skipping unresolvable symbolic link");
                return Ok(None);
            }
        };

        if !target.starts_with(&self.base) {
            return Err(Error::path_escape(key, &self.base));
        }

        match std::fs::metadata(&target) {
            Ok(meta) if meta.is_file() => Ok(Some(key)),
            Ok(meta) if meta.is_dir() => {
                debug!(link = %key, "Not descending into symbolic link to directory");
                Ok(None)
            }
            _ => Ok(None),
        }
    }
}

impl Iterator for PluginWalker {
    type Item = Result<String>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }

        loop {
            let entry = match self.inner.next()? {
                Ok(entry) => entry,
                Err(e) => {
                    self.finished = true;
                    return Some(Err(Error::Walk(e)));
                }
            };

            match self.visit(&entry) {
                Ok(Some(key)) => {
                    trace!(key = %key, "Discovered file");
                    return Some(Ok(key));
                }
                Ok(None) => continue,
                Err(e) => {
                    self.finished = true;
                    return Some(Err(e));
                }
            }
        }
    }
}

impl std::iter::FusedIterator for PluginWalker {}

/// Walk `dir` with keys relative to `base`
pub fn walk_files(dir: &Path, base: &Path) -> Result<PluginWalker> {
    PluginWalker::new(dir, base)
}

/// Join the normal components of a relative path with `/`
pub fn to_manifest_key(relative: &Path) -> Result<String> {
    let mut parts = Vec::new();
    for component in relative.components() {
        match component {
            Component::Normal(part) => {
                let part = part
                    .to_str()
                    .ok_or_else(|| Error::NonUtf8Path(relative.to_path_buf()))?;
                parts.push(part);
            }
            Component::CurDir => {}
            _ => return Err(Error::path_escape(relative.display().to_string(), "")),
        }
    }
    Ok(parts.join("/"))
}

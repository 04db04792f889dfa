//! Staging directory with canonically named links to the processed files.

use std::path::{Path, PathBuf};

use crate::err::Error;

/// Default name of the staging directory.
pub const DEFAULT_STAGING_DIR: &str = "out";

/// Writes symbolic links into a staging directory.
#[derive(Debug, Clone)]
pub struct StagingWriter {
    dir: PathBuf,
}

impl StagingWriter {
    /// Create the staging directory at `dir` unless it exists already.
    pub fn create<P: Into<PathBuf>>(dir: P) -> Result<Self, Error> {
        let dir = dir.into();
        std::fs::create_dir_all(&dir).map_err(|e| Error::io(&dir, e))?;
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Link `dir/canonical_name` to the absolute path of `original`.
    ///
    /// An existing link to the same target is accepted; any other existing entry is a
    /// collision.
    pub fn link<P: AsRef<Path>>(&self, canonical_name: &str, original: P) -> Result<PathBuf, Error> {
        let original = original.as_ref();
        let target = absolute(original)?;
        let link = self.dir.join(canonical_name);

        match std::fs::symlink_metadata(&link) {
            Ok(meta) => {
                let existing = if meta.file_type().is_symlink() {
                    Some(std::fs::read_link(&link).map_err(|e| Error::io(&link, e))?)
                } else {
                    None
                };
                if existing.as_deref() == Some(target.as_path()) {
                    tracing::warn!("{:?} already links to {:?}, keeping it", &link, &target);
                    return Ok(link);
                }
                return Err(Error::StagingCollision { link, target });
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => (),
            Err(e) => return Err(Error::io(&link, e)),
        }

        tracing::debug!("Linking {:?} -> {:?}", &link, &target);
        symlink(&target, &link).map_err(|e| Error::io(&link, e))?;
        Ok(link)
    }
}

/// Make `path` absolute against the current working directory without resolving links.
fn absolute(path: &Path) -> Result<PathBuf, Error> {
    if path.is_absolute() {
        Ok(path.to_path_buf())
    } else {
        let cwd = std::env::current_dir().map_err(|e| Error::io(path, e))?;
        Ok(cwd.join(path))
    }
}

#[cfg(unix)]
fn symlink(target: &Path, link: &Path) -> std::io::Result<()> {
    std::os::unix::fs::symlink(target, link)
}

#[cfg(windows)]
fn symlink(target: &Path, link: &Path) -> std::io::Result<()> {
    std::os::windows::fs::symlink_file(target, link)
}

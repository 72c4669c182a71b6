//! Directory-rooted filesystem handle.
//!
//! [`DirFs`] exposes one directory tree through [`TemplateFs`]. Paths handed to
//! it are relative to the root and use `/` on every platform; anything that
//! would escape the root is refused before touching the disk.

use std::path::{Path, PathBuf};

use crate::{validate_path, FsError, TemplateFs};

/// A filesystem handle rooted at a directory.
///
/// The tree is walked on every [`files`](TemplateFs::files) call, so files
/// added after construction are picked up by later registrations.
///
/// ```rust,ignore
/// use viewkit_vfs::DirFs;
///
/// let fs = DirFs::new("./views")?;
/// let pages = fs.glob("pages/*.html")?;
/// ```
#[derive(Debug, Clone)]
pub struct DirFs {
    root: PathBuf,
}

impl DirFs {
    /// Creates a handle rooted at `root`.
    ///
    /// # Errors
    ///
    /// Returns [`FsError::DirectoryNotFound`] if `root` is not a directory.
    pub fn new(root: impl AsRef<Path>) -> Result<Self, FsError> {
        let root = root.as_ref();
        if !root.is_dir() {
            return Err(FsError::DirectoryNotFound {
                path: root.display().to_string(),
            });
        }
        Ok(Self {
            root: root.to_path_buf(),
        })
    }

    /// Returns the root directory.
    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl TemplateFs for DirFs {
    fn files(&self) -> Result<Vec<String>, FsError> {
        let mut files = Vec::new();
        walk_dir_recursive(&self.root, &self.root, &mut files)?;
        files.sort();
        Ok(files)
    }

    fn read_to_string(&self, path: &str) -> Result<String, FsError> {
        validate_path(path)?;

        let full = self.root.join(path);
        std::fs::read_to_string(&full).map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => FsError::NotFound {
                path: path.to_string(),
            },
            _ => FsError::Io {
                path: path.to_string(),
                source: e,
            },
        })
    }
}

fn walk_dir_recursive(current: &Path, root: &Path, files: &mut Vec<String>) -> Result<(), FsError> {
    let io_err = |e: std::io::Error| FsError::Io {
        path: current.display().to_string(),
        source: e,
    };

    for entry in std::fs::read_dir(current).map_err(io_err)? {
        let path = entry.map_err(io_err)?.path();

        if path.is_dir() {
            walk_dir_recursive(&path, root, files)?;
        } else if path.is_file() {
            if let Ok(relative) = path.strip_prefix(root) {
                files.push(relative.to_string_lossy().replace(std::path::MAIN_SEPARATOR, "/"));
            }
        }
    }

    Ok(())
}

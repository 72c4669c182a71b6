//! # Viewkit VFS - Template Filesystem Handles
//!
//! `viewkit-vfs` provides the filesystem side of template registration: a small
//! [`TemplateFs`] trait that can list files, glob them with shell patterns, and
//! read their contents. The registry in `viewkit` never touches the disk itself;
//! everything it compiles comes through one of these handles.
//!
//! ## Implementations
//!
//! | Type | Backing | Typical use |
//! |------|---------|-------------|
//! | [`MemoryFs`] | Ordered in-memory map | Tests, `include_str!`-embedded templates |
//! | [`DirFs`] | A directory on disk | Development, templates shipped next to the binary |
//!
//! ## Paths and Patterns
//!
//! Paths are always `/`-separated and relative to the handle's root, whatever
//! the host platform. Patterns follow shell globbing per path segment:
//!
//! ```text
//! pages/*.html      matches pages/index.html, not pages/admin/index.html
//! includes/?.html   matches includes/a.html
//! layout.html       matches exactly that file
//! ```
//!
//! Matches come back sorted, so registration order is deterministic.
//!
//! ## Example
//!
//! ```rust
//! use viewkit_vfs::{MemoryFs, TemplateFs};
//!
//! let fs = MemoryFs::new()
//!     .with_file("layout.html", "<main>{% block content %}{% endblock %}</main>")
//!     .with_file("pages/index.html", "{% block content %}hello{% endblock %}");
//!
//! assert_eq!(fs.glob("pages/*.html").unwrap(), vec!["pages/index.html"]);
//! ```

mod dir;
mod error;
mod memory;
mod path;

use std::sync::Arc;

pub use dir::DirFs;
pub use error::FsError;
pub use memory::MemoryFs;
pub use path::{base_name, validate_path};

/// A read-only view of a tree of template files.
///
/// Implementors provide listing and reading; globbing is derived from the
/// listing so every implementation matches patterns the same way.
pub trait TemplateFs: Send + Sync {
    /// Returns every regular file under the root as a `/`-separated relative path.
    fn files(&self) -> Result<Vec<String>, FsError>;

    /// Reads a file's full contents.
    fn read_to_string(&self, path: &str) -> Result<String, FsError>;

    /// Returns the files matching a shell pattern, sorted lexically.
    ///
    /// An empty result is not an error here; callers decide whether a pattern
    /// that matches nothing is a problem.
    ///
    /// # Errors
    ///
    /// Returns [`FsError::BadPattern`] for malformed patterns (e.g. an unclosed
    /// `[`), or whatever [`files`](Self::files) fails with.
    fn glob(&self, pattern: &str) -> Result<Vec<String>, FsError> {
        let compiled = glob::Pattern::new(pattern).map_err(|e| FsError::BadPattern {
            pattern: pattern.to_string(),
            message: e.msg.to_string(),
        })?;

        let options = glob::MatchOptions {
            case_sensitive: true,
            require_literal_separator: true,
            require_literal_leading_dot: false,
        };

        let mut matches: Vec<String> = self
            .files()?
            .into_iter()
            .filter(|path| compiled.matches_with(path, options))
            .collect();
        matches.sort();
        Ok(matches)
    }
}

impl<T: TemplateFs + ?Sized> TemplateFs for &T {
    fn files(&self) -> Result<Vec<String>, FsError> {
        (**self).files()
    }

    fn read_to_string(&self, path: &str) -> Result<String, FsError> {
        (**self).read_to_string(path)
    }

    fn glob(&self, pattern: &str) -> Result<Vec<String>, FsError> {
        (**self).glob(pattern)
    }
}

impl<T: TemplateFs + ?Sized> TemplateFs for Box<T> {
    fn files(&self) -> Result<Vec<String>, FsError> {
        (**self).files()
    }

    fn read_to_string(&self, path: &str) -> Result<String, FsError> {
        (**self).read_to_string(path)
    }

    fn glob(&self, pattern: &str) -> Result<Vec<String>, FsError> {
        (**self).glob(pattern)
    }
}

impl<T: TemplateFs + ?Sized> TemplateFs for Arc<T> {
    fn files(&self) -> Result<Vec<String>, FsError> {
        (**self).files()
    }

    fn read_to_string(&self, path: &str) -> Result<String, FsError> {
        (**self).read_to_string(path)
    }

    fn glob(&self, pattern: &str) -> Result<Vec<String>, FsError> {
        (**self).glob(pattern)
    }
}

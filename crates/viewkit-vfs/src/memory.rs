//! In-memory filesystem handle.

use std::collections::BTreeMap;

use crate::{FsError, TemplateFs};

/// A filesystem held entirely in memory.
///
/// Useful for tests and for templates embedded with `include_str!`:
///
/// ```rust
/// use viewkit_vfs::{MemoryFs, TemplateFs};
///
/// let fs = MemoryFs::from_entries(&[
///     ("layout.html", "<body>{% block content %}{% endblock %}</body>"),
///     ("pages/index.html", "{% block content %}hi{% endblock %}"),
/// ]);
/// assert_eq!(fs.files().unwrap().len(), 2);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemoryFs {
    files: BTreeMap<String, String>,
}

impl MemoryFs {
    /// Creates an empty filesystem.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a filesystem from `(path, content)` pairs.
    ///
    /// Later entries replace earlier ones with the same path.
    pub fn from_entries(entries: &[(&str, &str)]) -> Self {
        let mut fs = Self::new();
        for (path, content) in entries {
            fs.insert(*path, *content);
        }
        fs
    }

    /// Adds a file, builder style.
    pub fn with_file(mut self, path: impl Into<String>, content: impl Into<String>) -> Self {
        self.insert(path, content);
        self
    }

    /// Adds or replaces a file.
    pub fn insert(&mut self, path: impl Into<String>, content: impl Into<String>) {
        self.files.insert(path.into(), content.into());
    }

    /// Returns the number of files.
    pub fn len(&self) -> usize {
        self.files.len()
    }

    /// Returns true if the filesystem holds no files.
    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}

impl TemplateFs for MemoryFs {
    fn files(&self) -> Result<Vec<String>, FsError> {
        Ok(self.files.keys().cloned().collect())
    }

    fn read_to_string(&self, path: &str) -> Result<String, FsError> {
        self.files
            .get(path)
            .cloned()
            .ok_or_else(|| FsError::NotFound {
                path: path.to_string(),
            })
    }
}

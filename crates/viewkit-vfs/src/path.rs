//! Path helpers shared by the filesystem handles and the registry.

use crate::FsError;

/// Returns the last `/`-separated segment of a path, extension included.
///
/// Trailing slashes are ignored. This is the name a registered template is
/// known by: `pages/index.html` registers as `index.html`.
///
/// ```rust
/// use viewkit_vfs::base_name;
///
/// assert_eq!(base_name("pages/index.html"), "index.html");
/// assert_eq!(base_name("layout.html"), "layout.html");
/// ```
pub fn base_name(path: &str) -> &str {
    let trimmed = path.trim_end_matches('/');
    match trimmed.rfind('/') {
        Some(idx) => &trimmed[idx + 1..],
        None => trimmed,
    }
}

/// Checks that a path is relative and stays inside the root.
///
/// # Errors
///
/// Returns [`FsError::InvalidPath`] for empty paths, absolute paths, and paths
/// with a `..` segment.
pub fn validate_path(path: &str) -> Result<(), FsError> {
    let invalid = path.is_empty()
        || path.starts_with('/')
        || path.starts_with('\\')
        || path.split(['/', '\\']).any(|segment| segment == "..");

    if invalid {
        return Err(FsError::InvalidPath {
            path: path.to_string(),
        });
    }
    Ok(())
}

//! Error types for template registration and rendering.
//!
//! Registration and rendering fail in different ways and at different times,
//! so they get separate types:
//!
//! - [`RegistryError`]: start-up problems (no matching files, unreadable files,
//!   syntax errors). The application is not usable with these and should exit.
//! - [`RenderError`]: per-request problems (unknown template name, runtime
//!   template failure). They affect only the call that raised them.

use viewkit_vfs::FsError;

/// Error raised while registering templates.
#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
    /// A glob pattern matched no files.
    #[error("template: pattern matches no files: `{pattern}`")]
    NoMatches { pattern: String },

    /// A glob pattern could not be evaluated.
    #[error("failed to list files using pattern: {0}")]
    Glob(#[source] FsError),

    /// A matched file, the layout, or an include could not be read.
    #[error("failed to read template {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: FsError,
    },

    /// A template failed to parse.
    #[error("failed to parse template {file}: {source}")]
    Compile {
        file: String,
        #[source]
        source: minijinja::Error,
    },

    /// Two files compiled into one unit share a base filename.
    #[error("template {file} conflicts with {existing}: both are named {name}")]
    NameConflict {
        name: String,
        file: String,
        existing: String,
    },
}

/// Error raised while rendering a registered template.
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    /// No unit is registered under the requested name.
    #[error("template not found: {name}")]
    TemplateNotFound { name: String },

    /// The template failed while executing, e.g. a missing field on the data.
    ///
    /// Part of the output may already have been written.
    #[error("render template {name} failed: {source}")]
    Execution {
        name: String,
        layout: Option<String>,
        #[source]
        source: minijinja::Error,
    },
}

impl RenderError {
    /// Returns true for [`RenderError::TemplateNotFound`].
    pub fn is_not_found(&self) -> bool {
        matches!(self, RenderError::TemplateNotFound { .. })
    }
}

//! # Viewkit - HTML Views for Web Handlers
//!
//! `viewkit` registers HTML templates, optionally composed with a shared layout
//! and reusable include fragments, and renders them by name at request time.
//! It is the view layer a web framework calls into; it does not route, cache,
//! or read the disk on its own.
//!
//! ## Core Concepts
//!
//! - [`TemplateRegistry`]: name → compiled [`TemplateUnit`] map with
//!   registration and [`render`](TemplateRegistry::render)
//! - [`TemplateFs`](viewkit_vfs::TemplateFs): where template files come from
//!   (re-exported from `viewkit-vfs` along with [`MemoryFs`] and [`DirFs`])
//! - [`FunctionSet`]: functions callable inside templates, fixed at construction
//! - [`RegistryConfig`]: functions plus engine options (undefined handling, escaping)
//! - [`RenderContext`]: request-scoped `tracing` span for render diagnostics
//!
//! Templates use Jinja syntax via [minijinja](https://docs.rs/minijinja).
//!
//! ## Quick Start
//!
//! ```rust
//! use serde::Serialize;
//! use viewkit::{MemoryFs, RequestContext, TemplateRegistry};
//!
//! #[derive(Serialize)]
//! struct Page {
//!     title: String,
//! }
//!
//! let views = MemoryFs::new()
//!     .with_file("layout.html", "<h1>{{ title }}</h1>{% block content %}{% endblock %}")
//!     .with_file("pages/index.html", "{% block content %}<p>welcome</p>{% endblock %}");
//!
//! let mut registry = TemplateRegistry::new();
//! registry.add_with_layout(&views, "layout.html", &["pages/*.html"]).unwrap();
//!
//! let ctx = RequestContext::new("req-42", "GET", "/");
//! let mut out = Vec::new();
//! registry
//!     .render(&mut out, "index.html", &Page { title: "Home".into() }, &ctx)
//!     .unwrap();
//!
//! assert_eq!(String::from_utf8(out).unwrap(), "<h1>Home</h1><p>welcome</p>");
//! ```
//!
//! ## Errors
//!
//! Registration failures ([`RegistryError`]) are start-up failures: a glob that
//! matches nothing, an unreadable file, a syntax error. Render failures
//! ([`RenderError`]) are per call; an unknown name is
//! [`RenderError::TemplateNotFound`] so the caller picks the HTTP response.
//! With the `axum` feature every `RenderError` converts into a 500 response.

pub mod config;
pub mod context;
pub mod error;
pub mod functions;
mod registry;
mod unit;

#[cfg(feature = "axum")]
mod http;

pub use config::{Escape, RegistryConfig, RegistryOptions, Undefined};
pub use context::{RenderContext, RequestContext};
pub use error::{RegistryError, RenderError};
pub use functions::{FunctionSet, TIME_FORMAT};
pub use registry::TemplateRegistry;
pub use unit::TemplateUnit;

pub use viewkit_vfs::{base_name, DirFs, FsError, MemoryFs, TemplateFs};

//! Template registry and renderer.
//!
//! [`TemplateRegistry`] maps template names to compiled [`TemplateUnit`]s and
//! renders them on request. Templates are discovered by glob patterns inside a
//! [`TemplateFs`] and keyed by their base filename.
//!
//! # Registration
//!
//! Three registration flavors cover the usual view layouts:
//!
//! | Method | Compiles each matched page with |
//! |--------|---------------------------------|
//! | [`add`](TemplateRegistry::add) | Nothing: the page stands alone |
//! | [`add_with_layout`](TemplateRegistry::add_with_layout) | A layout |
//! | [`add_with_layout_and_includes`](TemplateRegistry::add_with_layout_and_includes) | A layout plus every include fragment |
//!
//! Registration walks the patterns in order and stops at the first failure.
//! Units registered before the failure stay registered. Registering a base
//! filename that already exists replaces the earlier unit.
//!
//! # Layouts
//!
//! A layout defines the page frame and leaves blocks for pages to fill:
//!
//! ```text
//! layout.html:        {% include "header.html" %} {% block content %}{% endblock %} {% include "footer.html" %}
//! pages/index.html:   {% block content %}index{% endblock %}
//! ```
//!
//! Pages registered with a layout are compiled as children of it, so rendering
//! `index.html` starts at the layout's body and produces
//! `header index footer`. Pages may spell out `{% extends "layout.html" %}`
//! themselves; otherwise it is implied.
//!
//! # Directory Convention
//!
//! ```text
//! views/
//! ├── layout.html
//! ├── includes/
//! │   ├── header.html
//! │   └── footer.html
//! └── pages/
//!     ├── index.html
//!     └── about.html
//! ```
//!
//! ```rust
//! use viewkit::TemplateRegistry;
//! use viewkit_vfs::MemoryFs;
//!
//! let views = MemoryFs::from_entries(&[
//!     ("layout.html", r#"{% include "header.html" %} {% block content %}{% endblock %}"#),
//!     ("includes/header.html", "header"),
//!     ("pages/index.html", "{% block content %}index{% endblock %}"),
//! ]);
//!
//! let mut registry = TemplateRegistry::new();
//! registry
//!     .add_with_layout_and_includes(&views, "layout.html", "includes/*.html", &["pages/*.html"])
//!     .unwrap();
//!
//! let html = registry.render_to_string("index.html", &(), &()).unwrap();
//! assert_eq!(html, "header index");
//! ```
//!
//! # Concurrency
//!
//! Registration takes `&mut self` and rendering takes `&self`. Finish
//! registering at start-up, then share the registry (for example in an `Arc`);
//! concurrent renders never contend because units are immutable.

use std::collections::HashMap;
use std::io;
use std::time::Instant;

use serde::Serialize;
use tracing::{debug, error};
use viewkit_vfs::{base_name, TemplateFs};

use crate::config::RegistryConfig;
use crate::context::RenderContext;
use crate::error::{RegistryError, RenderError};
use crate::functions::FunctionSet;
use crate::unit::TemplateUnit;

/// A template source read from the filesystem, ready to compile.
struct Source {
    path: String,
    name: String,
    content: String,
}

impl Source {
    fn read<F: TemplateFs + ?Sized>(fs: &F, path: &str) -> Result<Self, RegistryError> {
        let content = fs.read_to_string(path).map_err(|source| RegistryError::Read {
            path: path.to_string(),
            source,
        })?;
        Ok(Self {
            path: path.to_string(),
            name: base_name(path).to_string(),
            content,
        })
    }
}

/// Layout and include sources shared by every page of one registration call.
#[derive(Default)]
struct Frame {
    layout: Option<Source>,
    includes: Vec<Source>,
}

/// Registry of compiled HTML templates, keyed by base filename.
#[derive(Debug, Default)]
pub struct TemplateRegistry {
    units: HashMap<String, TemplateUnit>,
    config: RegistryConfig,
}

impl TemplateRegistry {
    /// Creates an empty registry with the default functions and options.
    pub fn new() -> Self {
        Self::with_config(RegistryConfig::new())
    }

    /// Creates an empty registry whose templates see exactly `functions`.
    ///
    /// The defaults are not merged in; add them with
    /// [`FunctionSet::defaults`] if wanted.
    pub fn with_functions(functions: FunctionSet) -> Self {
        Self::with_config(RegistryConfig::new().functions(functions))
    }

    /// Creates an empty registry from a full configuration.
    pub fn with_config(config: RegistryConfig) -> Self {
        Self {
            units: HashMap::new(),
            config,
        }
    }

    /// Registers every file matching `patterns` as a standalone template.
    ///
    /// # Errors
    ///
    /// - [`RegistryError::NoMatches`] if a pattern matches no files
    /// - [`RegistryError::Glob`] if a pattern is malformed
    /// - [`RegistryError::Read`] if a matched file cannot be read
    /// - [`RegistryError::Compile`] if a matched file fails to parse
    pub fn add<F>(&mut self, fs: &F, patterns: &[&str]) -> Result<(), RegistryError>
    where
        F: TemplateFs + ?Sized,
    {
        self.register(fs, &Frame::default(), patterns)
    }

    /// Registers every file matching `patterns`, each compiled with `layout`.
    ///
    /// Rendering such a unit runs the layout with the page's blocks filled in.
    ///
    /// # Errors
    ///
    /// Same as [`add`](Self::add); the layout failing to read or parse is
    /// reported against the layout's path. A page sharing the layout's base
    /// filename is [`RegistryError::NameConflict`].
    pub fn add_with_layout<F>(
        &mut self,
        fs: &F,
        layout: &str,
        patterns: &[&str],
    ) -> Result<(), RegistryError>
    where
        F: TemplateFs + ?Sized,
    {
        let frame = Frame {
            layout: Some(Source::read(fs, layout)?),
            includes: Vec::new(),
        };
        self.register(fs, &frame, patterns)
    }

    /// Registers every file matching `patterns`, each compiled with `layout`
    /// and every file matching `includes`.
    ///
    /// Includes are addressed by base filename, e.g. `{% include "header.html" %}`.
    ///
    /// # Errors
    ///
    /// Same as [`add_with_layout`](Self::add_with_layout), plus
    /// [`RegistryError::NoMatches`] if `includes` matches no files.
    pub fn add_with_layout_and_includes<F>(
        &mut self,
        fs: &F,
        layout: &str,
        includes: &str,
        patterns: &[&str],
    ) -> Result<(), RegistryError>
    where
        F: TemplateFs + ?Sized,
    {
        let includes = glob_nonempty(fs, includes)?
            .iter()
            .map(|path| Source::read(fs, path))
            .collect::<Result<Vec<_>, _>>()?;

        let frame = Frame {
            layout: Some(Source::read(fs, layout)?),
            includes,
        };
        self.register(fs, &frame, patterns)
    }

    /// Renders the template registered as `name` into `out`.
    ///
    /// `ctx` only scopes the diagnostics logged for this call.
    ///
    /// # Errors
    ///
    /// - [`RenderError::TemplateNotFound`] if nothing is registered as `name`;
    ///   nothing is written
    /// - [`RenderError::Execution`] if the template fails at runtime; part of
    ///   the output may already be written and should be discarded
    pub fn render<W, S, C>(&self, out: W, name: &str, data: &S, ctx: &C) -> Result<(), RenderError>
    where
        W: io::Write,
        S: Serialize + ?Sized,
        C: RenderContext + ?Sized,
    {
        let span = ctx.span();
        let _enter = span.enter();

        debug!(name, "render");

        let Some(unit) = self.units.get(name) else {
            error!(name, "template not found");
            return Err(RenderError::TemplateNotFound {
                name: name.to_string(),
            });
        };

        let layout = unit.layout().unwrap_or_default();
        let start = Instant::now();

        if let Err(source) = unit.execute(out, data) {
            error!(name = unit.name(), layout, error = %source, "render template failed");
            return Err(RenderError::Execution {
                name: unit.name().to_string(),
                layout: unit.layout().map(str::to_string),
                source,
            });
        }

        debug!(name = unit.name(), layout, dur = ?start.elapsed(), "execute template");
        Ok(())
    }

    /// Renders into a new string. See [`render`](Self::render).
    pub fn render_to_string<S, C>(&self, name: &str, data: &S, ctx: &C) -> Result<String, RenderError>
    where
        S: Serialize + ?Sized,
        C: RenderContext + ?Sized,
    {
        let mut buf = Vec::new();
        self.render(&mut buf, name, data, ctx)?;
        Ok(String::from_utf8_lossy(&buf).into_owned())
    }

    /// Looks up a registered unit.
    pub fn get(&self, name: &str) -> Option<&TemplateUnit> {
        self.units.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.units.contains_key(name)
    }

    /// Returns the registered names in sorted order.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.units.keys().map(|s| s.as_str()).collect();
        names.sort_unstable();
        names
    }

    pub fn len(&self) -> usize {
        self.units.len()
    }

    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }

    /// The functions installed into every compiled unit.
    pub fn functions(&self) -> &FunctionSet {
        &self.config.functions
    }

    pub fn config(&self) -> &RegistryConfig {
        &self.config
    }

    fn register<F>(&mut self, fs: &F, frame: &Frame, patterns: &[&str]) -> Result<(), RegistryError>
    where
        F: TemplateFs + ?Sized,
    {
        for pattern in patterns {
            for path in glob_nonempty(fs, pattern)? {
                let page = Source::read(fs, &path)?;
                let layout = frame.layout.as_ref().map(|l| l.name.as_str());

                debug!(filename = %page.name, layout = layout.unwrap_or_default(), "register template");

                let unit = self.compile(page, frame).inspect_err(|e| {
                    debug!(filename = %path, error = %e, "register template failed");
                })?;
                self.units.insert(unit.name().to_string(), unit);
            }
        }
        Ok(())
    }

    fn compile(&self, page: Source, frame: &Frame) -> Result<TemplateUnit, RegistryError> {
        check_unique_names(frame.includes.iter().chain(&frame.layout).chain([&page]))?;

        let mut env = self.config.environment();

        for include in &frame.includes {
            env.add_template_owned(include.name.clone(), include.content.clone())
                .map_err(|source| RegistryError::Compile {
                    file: include.path.clone(),
                    source,
                })?;
        }

        let page_source = match &frame.layout {
            Some(layout) => {
                env.add_template_owned(layout.name.clone(), layout.content.clone())
                    .map_err(|source| RegistryError::Compile {
                        file: layout.path.clone(),
                        source,
                    })?;
                extend_layout(&layout.name, page.content)
            }
            None => page.content,
        };

        env.add_template_owned(page.name.clone(), page_source)
            .map_err(|source| RegistryError::Compile {
                file: page.path,
                source,
            })?;

        let layout = frame.layout.as_ref().map(|l| l.name.clone());
        Ok(TemplateUnit::new(page.name, layout, env))
    }
}

/// Globs `pattern`, treating zero matches as an error.
fn glob_nonempty<F: TemplateFs + ?Sized>(fs: &F, pattern: &str) -> Result<Vec<String>, RegistryError> {
    let matches = fs.glob(pattern).map_err(RegistryError::Glob)?;
    if matches.is_empty() {
        return Err(RegistryError::NoMatches {
            pattern: pattern.to_string(),
        });
    }
    Ok(matches)
}

/// Fails if two sources of one unit would register under the same name.
fn check_unique_names<'a>(sources: impl Iterator<Item = &'a Source>) -> Result<(), RegistryError> {
    let mut seen: HashMap<&str, &str> = HashMap::new();
    for source in sources {
        if let Some(existing) = seen.insert(&source.name, &source.path) {
            return Err(RegistryError::NameConflict {
                name: source.name.clone(),
                file: source.path.clone(),
                existing: existing.to_string(),
            });
        }
    }
    Ok(())
}

/// Makes `source` a child of `layout` unless it already extends something.
fn extend_layout(layout: &str, source: String) -> String {
    if declares_parent(&source) {
        return source;
    }
    format!("{{% extends {:?} %}}{}", layout, source)
}

/// Returns true if the first tag of `source`, after whitespace and comments,
/// is an `extends` tag (`{% extends`, `{%- extends`, `{%+extends`, ...).
fn declares_parent(source: &str) -> bool {
    let mut rest = source.trim_start();
    while let Some(comment) = rest.strip_prefix("{#") {
        match comment.find("#}") {
            Some(end) => rest = comment[end + 2..].trim_start(),
            None => return false,
        }
    }

    let Some(tag) = rest.strip_prefix("{%") else {
        return false;
    };
    let tag = tag.strip_prefix(['-', '+']).unwrap_or(tag).trim_start();
    tag.strip_prefix("extends")
        .is_some_and(|after| !after.starts_with(|c: char| c.is_alphanumeric() || c == '_'))
}

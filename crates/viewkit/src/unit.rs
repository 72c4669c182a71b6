//! Compiled template units.

use std::fmt;
use std::io;

use minijinja::Environment;
use serde::Serialize;

/// One compiled, named template, optionally tied to a layout.
///
/// A unit owns its own environment holding the page and, when registered with
/// a layout, the layout and include sources it was compiled with. The
/// environment is never modified after registration, so a unit can be
/// executed from any number of threads at once.
pub struct TemplateUnit {
    name: String,
    layout: Option<String>,
    env: Environment<'static>,
}

impl TemplateUnit {
    pub(crate) fn new(name: String, layout: Option<String>, env: Environment<'static>) -> Self {
        Self { name, layout, env }
    }

    /// The registry key: the base filename of the page, extension included.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Base filename of the layout this unit was compiled with, if any.
    pub fn layout(&self) -> Option<&str> {
        self.layout.as_deref()
    }

    /// Renders the unit into `out`.
    ///
    /// For layout units the page is compiled as a child of the layout, so the
    /// layout's body drives execution and pulls in the page's blocks.
    pub(crate) fn execute<W, S>(&self, out: W, data: &S) -> Result<(), minijinja::Error>
    where
        W: io::Write,
        S: Serialize + ?Sized,
    {
        let template = self.env.get_template(&self.name)?;
        template.render_captured_to(data, out)?;
        Ok(())
    }
}

impl fmt::Debug for TemplateUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TemplateUnit")
            .field("name", &self.name)
            .field("layout", &self.layout)
            .finish_non_exhaustive()
    }
}

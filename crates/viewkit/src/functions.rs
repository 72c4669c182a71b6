//! Function extensions callable from template expressions.
//!
//! A [`FunctionSet`] is fixed when the registry is constructed and installed
//! into every template compiled afterwards:
//!
//! ```rust
//! use viewkit::{FunctionSet, TemplateRegistry};
//!
//! let functions = FunctionSet::new()
//!     .add("shout", |s: String| s.to_uppercase())
//!     .add("version", || "1.2.0");
//!
//! let registry = TemplateRegistry::with_functions(functions);
//! assert!(registry.functions().contains("shout"));
//! ```
//!
//! ## Defaults
//!
//! [`FunctionSet::defaults`] (used by [`TemplateRegistry::new`](crate::TemplateRegistry::new)):
//!
//! | Function | Returns |
//! |----------|---------|
//! | `get_time()` | Local wall-clock time as `HH:MM:SS` |

use std::collections::BTreeMap;
use std::fmt;

use minijinja::functions::Function;
use minijinja::value::{FunctionArgs, FunctionResult, Value};
use minijinja::Environment;

/// Format used by `get_time()`.
pub const TIME_FORMAT: &str = "%H:%M:%S";

/// A named table of functions exposed inside templates.
#[derive(Clone, Default)]
pub struct FunctionSet {
    functions: BTreeMap<String, Value>,
}

impl FunctionSet {
    /// Creates an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates the default set (see the module docs).
    pub fn defaults() -> Self {
        Self::new().add("get_time", get_time)
    }

    /// Adds a function under `name`, replacing any previous one.
    ///
    /// Any closure or fn minijinja accepts as a function works here; arguments
    /// and return values convert through minijinja's value layer.
    pub fn add<F, Rv, Args>(mut self, name: impl Into<String>, f: F) -> Self
    where
        F: Function<Rv, Args> + for<'a> Function<Rv, <Args as FunctionArgs<'a>>::Output>,
        Rv: FunctionResult,
        Args: for<'a> FunctionArgs<'a>,
    {
        self.functions.insert(name.into(), Value::from_function::<F, Rv, Args>(f));
        self
    }

    /// Returns true if a function named `name` is in the set.
    pub fn contains(&self, name: &str) -> bool {
        self.functions.contains_key(name)
    }

    /// Returns the function names in sorted order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.functions.keys().map(|s| s.as_str())
    }

    pub fn len(&self) -> usize {
        self.functions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.functions.is_empty()
    }

    /// Registers every function as a global of `env`.
    pub(crate) fn install(&self, env: &mut Environment<'static>) {
        for (name, function) in &self.functions {
            env.add_global(name.clone(), function.clone());
        }
    }
}

impl fmt::Debug for FunctionSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.names()).finish()
    }
}

fn get_time() -> String {
    chrono::Local::now().format(TIME_FORMAT).to_string()
}

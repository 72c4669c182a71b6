//! Registry configuration.
//!
//! [`RegistryConfig`] is chosen once when the registry is constructed and
//! applies to every unit compiled afterwards. It has two parts:
//!
//! - a [`FunctionSet`] of template functions, and
//! - [`RegistryOptions`], plain engine settings that can be deserialized from
//!   a host application's own config file.
//!
//! ```rust
//! use viewkit::{RegistryConfig, RegistryOptions, TemplateRegistry, Undefined};
//!
//! let options: RegistryOptions =
//!     serde_json::from_str(r#"{ "undefined": "lenient" }"#).unwrap();
//!
//! let registry = TemplateRegistry::with_config(RegistryConfig::new().options(options));
//! assert_eq!(registry.config().options.undefined, Undefined::Lenient);
//! ```

use minijinja::{AutoEscape, Environment, UndefinedBehavior};
use serde::Deserialize;

use crate::functions::FunctionSet;

/// How templates treat values missing from the render data.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Undefined {
    /// Any use of an undefined value is an execution error.
    #[default]
    Strict,
    /// Undefined values render as empty; attribute access on them fails.
    Lenient,
    /// Undefined values render as empty, attribute access included.
    Chainable,
}

impl From<Undefined> for UndefinedBehavior {
    fn from(value: Undefined) -> Self {
        match value {
            Undefined::Strict => UndefinedBehavior::Strict,
            Undefined::Lenient => UndefinedBehavior::Lenient,
            Undefined::Chainable => UndefinedBehavior::Chainable,
        }
    }
}

/// Output escaping applied to interpolated values.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Escape {
    /// HTML-escape every interpolated value.
    #[default]
    Html,
    /// Emit values verbatim.
    None,
}

/// Engine settings for compiled units.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct RegistryOptions {
    pub undefined: Undefined,
    pub auto_escape: Escape,
    /// Keep the final newline of template files in the output (default on,
    /// so a file renders exactly as written).
    pub keep_trailing_newline: bool,
}

impl Default for RegistryOptions {
    fn default() -> Self {
        Self {
            undefined: Undefined::default(),
            auto_escape: Escape::default(),
            keep_trailing_newline: true,
        }
    }
}

/// Full configuration for a [`TemplateRegistry`](crate::TemplateRegistry).
#[derive(Debug, Clone)]
pub struct RegistryConfig {
    pub functions: FunctionSet,
    pub options: RegistryOptions,
}

impl RegistryConfig {
    /// Default functions and default options.
    pub fn new() -> Self {
        Self {
            functions: FunctionSet::defaults(),
            options: RegistryOptions::default(),
        }
    }

    /// Replaces the function set.
    pub fn functions(mut self, functions: FunctionSet) -> Self {
        self.functions = functions;
        self
    }

    /// Replaces the engine options.
    pub fn options(mut self, options: RegistryOptions) -> Self {
        self.options = options;
        self
    }

    /// Builds a fresh environment for one unit.
    pub(crate) fn environment(&self) -> Environment<'static> {
        let mut env = Environment::new();
        env.set_undefined_behavior(self.options.undefined.into());
        env.set_keep_trailing_newline(self.options.keep_trailing_newline);

        let escape = self.options.auto_escape;
        env.set_auto_escape_callback(move |_name| match escape {
            Escape::Html => AutoEscape::Html,
            Escape::None => AutoEscape::None,
        });

        self.functions.install(&mut env);
        env
    }
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self::new()
    }
}

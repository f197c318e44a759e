//! In-memory probe with a declared environment.
//!
//! `StaticProbe` answers from data set up front, which makes it the probe of
//! choice for tests and for embedding callers that already know their
//! environment. Function and class lookups are case-insensitive, matching
//! PHP's own symbol tables.
//!
//! # Example
//!
//! ```
//! use phpreqs::probe::{PlatformProbe, StaticProbe};
//! use phpreqs::requirements::OsFamily;
//!
//! let probe = StaticProbe::new()
//!     .with_version("8.2.12")
//!     .with_os(OsFamily::Unix)
//!     .with_functions(["sprintf", "mb_strlen"])
//!     .with_ini("memory_limit", "-1");
//!
//! assert!(probe.function_exists("SPRINTF"));
//! assert_eq!(probe.current_version().as_deref(), Some("8.2.12"));
//! ```

use super::{IniValue, PlatformProbe};
use crate::requirements::OsFamily;
use std::collections::{HashMap, HashSet};

/// Probe backed by declared values.
#[derive(Debug, Clone, Default)]
pub struct StaticProbe {
    version: Option<String>,
    os: Option<OsFamily>,
    functions: HashSet<String>,
    classes: HashSet<String>,
    ini: HashMap<String, IniValue>,
}

impl StaticProbe {
    /// Create a probe that knows nothing: no version, no OS, no symbols.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the runtime version.
    pub fn with_version(mut self, version: &str) -> Self {
        self.version = Some(version.to_string());
        self
    }

    /// Set the OS family.
    pub fn with_os(mut self, os: OsFamily) -> Self {
        self.os = Some(os);
        self
    }

    /// Declare existing functions.
    pub fn with_functions<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.functions
            .extend(names.into_iter().map(|n| n.as_ref().to_ascii_lowercase()));
        self
    }

    /// Declare existing classes.
    pub fn with_classes<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.classes
            .extend(names.into_iter().map(|n| n.as_ref().to_ascii_lowercase()));
        self
    }

    /// Declare an ini directive's current value.
    pub fn with_ini(mut self, directive: &str, value: impl Into<IniValue>) -> Self {
        self.set_ini(directive, value);
        self
    }

    /// Change the runtime version after construction.
    pub fn set_version(&mut self, version: Option<&str>) {
        self.version = version.map(str::to_string);
    }

    /// Change an ini directive after construction.
    pub fn set_ini(&mut self, directive: &str, value: impl Into<IniValue>) {
        self.ini.insert(directive.to_string(), value.into());
    }

    /// Make an ini directive unknown.
    pub fn remove_ini(&mut self, directive: &str) {
        self.ini.remove(directive);
    }

    /// Make a function unknown.
    pub fn remove_function(&mut self, name: &str) {
        self.functions.remove(&name.to_ascii_lowercase());
    }
}

impl PlatformProbe for StaticProbe {
    fn function_exists(&self, name: &str) -> bool {
        let name = name.trim();
        !name.is_empty() && self.functions.contains(&name.to_ascii_lowercase())
    }

    fn class_exists(&self, name: &str) -> bool {
        let name = name.trim().trim_start_matches('\\');
        !name.is_empty() && self.classes.contains(&name.to_ascii_lowercase())
    }

    fn ini_value(&self, directive: &str) -> Option<IniValue> {
        self.ini.get(directive).cloned()
    }

    fn current_version(&self) -> Option<String> {
        self.version.clone()
    }

    fn current_os_family(&self) -> Option<OsFamily> {
        self.os
    }
}

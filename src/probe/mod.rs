//! Platform probes: the environment queries requirements are checked against.
//!
//! The evaluator never inspects the environment directly. It asks a
//! [`PlatformProbe`], which answers existence and current-value questions.
//! Every answer tolerates "don't know": a missing function, an unset
//! directive, or an interpreter that cannot be started all read as absent.
//!
//! # Modules
//!
//! - [`php`] - Live probe that queries a PHP interpreter binary
//! - [`fixed`] - In-memory probe with a declared environment

pub mod fixed;
pub mod php;

pub use fixed::StaticProbe;
pub use php::PhpProbe;

use crate::requirements::OsFamily;
use serde::Serialize;
use std::borrow::Cow;

/// Current value of an ini directive.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum IniValue {
    /// Raw string form, as `ini_get` returns it.
    Text(String),
    /// Boolean reported directly by the probe.
    Flag(bool),
}

impl IniValue {
    /// String form. Flags render the way PHP stringifies booleans.
    pub fn as_text(&self) -> Cow<'_, str> {
        match self {
            IniValue::Text(s) => Cow::Borrowed(s),
            IniValue::Flag(true) => Cow::Borrowed("1"),
            IniValue::Flag(false) => Cow::Borrowed(""),
        }
    }
}

impl From<&str> for IniValue {
    fn from(value: &str) -> Self {
        IniValue::Text(value.to_string())
    }
}

impl From<String> for IniValue {
    fn from(value: String) -> Self {
        IniValue::Text(value)
    }
}

impl From<bool> for IniValue {
    fn from(value: bool) -> Self {
        IniValue::Flag(value)
    }
}

/// Answers environment questions for the evaluator.
///
/// Implementations must never panic on unknown names; "not found" is the
/// answer for anything they cannot determine.
pub trait PlatformProbe {
    /// Whether a function with this name is callable.
    fn function_exists(&self, name: &str) -> bool;

    /// Whether a class with this name is loadable.
    fn class_exists(&self, name: &str) -> bool;

    /// Current value of an ini directive, `None` if it does not exist.
    fn ini_value(&self, directive: &str) -> Option<IniValue>;

    /// Current runtime version string, `None` if it cannot be determined.
    fn current_version(&self) -> Option<String>;

    /// Current OS family, `None` if it cannot be determined.
    fn current_os_family(&self) -> Option<OsFamily>;
}

impl<T: PlatformProbe + ?Sized> PlatformProbe for &T {
    fn function_exists(&self, name: &str) -> bool {
        (**self).function_exists(name)
    }

    fn class_exists(&self, name: &str) -> bool {
        (**self).class_exists(name)
    }

    fn ini_value(&self, directive: &str) -> Option<IniValue> {
        (**self).ini_value(directive)
    }

    fn current_version(&self) -> Option<String> {
        (**self).current_version()
    }

    fn current_os_family(&self) -> Option<OsFamily> {
        (**self).current_os_family()
    }
}

impl<T: PlatformProbe + ?Sized> PlatformProbe for Box<T> {
    fn function_exists(&self, name: &str) -> bool {
        (**self).function_exists(name)
    }

    fn class_exists(&self, name: &str) -> bool {
        (**self).class_exists(name)
    }

    fn ini_value(&self, directive: &str) -> Option<IniValue> {
        (**self).ini_value(directive)
    }

    fn current_version(&self) -> Option<String> {
        (**self).current_version()
    }

    fn current_os_family(&self) -> Option<OsFamily> {
        (**self).current_os_family()
    }
}

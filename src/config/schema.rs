//! Requirements file schema.
//!
//! Maps `phpreqs.yml` onto [`RequirementsConfig`] and registers the
//! declared requirements on a [`Checker`].

use crate::error::{PhpReqsError, Result};
use crate::probe::PlatformProbe;
use crate::requirements::{Checker, Constraint, IniExpectation, OsFamily};
use serde::{Deserialize, Deserializer, Serialize};
use serde_yaml::{Mapping, Value};
use std::path::{Path, PathBuf};

/// Root structure of `phpreqs.yml`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RequirementsConfig {
    /// Interpreter settings
    pub php: PhpSettings,

    /// Version constraints, each registered separately
    #[serde(
        deserialize_with = "scalar_or_list",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub php_version: Vec<String>,

    /// Required OS family tags
    #[serde(
        deserialize_with = "scalar_or_list",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub os: Vec<String>,

    /// Function alternatives groups
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub functions: Vec<String>,

    /// Class alternatives groups
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub classes: Vec<String>,

    /// Directive to expected value
    #[serde(skip_serializing_if = "Mapping::is_empty")]
    pub ini: Mapping,
}

/// The `php:` section.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PhpSettings {
    /// Interpreter to probe
    #[serde(skip_serializing_if = "Option::is_none")]
    pub binary: Option<PathBuf>,
}

impl RequirementsConfig {
    /// Whether the file declares no requirements at all.
    pub fn is_empty(&self) -> bool {
        self.php_version.is_empty()
            && self.os.is_empty()
            && self.functions.is_empty()
            && self.classes.is_empty()
            && self.ini.is_empty()
    }

    /// Interpreter to probe: an explicit override wins over `php.binary`,
    /// which wins over `php` on PATH.
    pub fn php_binary(&self, override_binary: Option<&Path>) -> PathBuf {
        override_binary
            .map(Path::to_path_buf)
            .or_else(|| self.php.binary.clone())
            .unwrap_or_else(|| PathBuf::from(crate::probe::php::DEFAULT_BINARY))
    }

    /// Register every declared requirement on `checker`.
    ///
    /// Order: php_version, os, functions, classes, ini. Empty sections
    /// register nothing. Every OS tag and ini entry is validated first, so
    /// on error `checker` is left exactly as it was.
    pub fn register<P: PlatformProbe>(&self, checker: &mut Checker<P>) -> Result<()> {
        let os = self
            .os
            .iter()
            .map(|tag| tag.parse::<OsFamily>())
            .collect::<Result<Vec<_>>>()?;
        let ini = self
            .ini
            .iter()
            .map(|(key, value)| ini_entry(key, value))
            .collect::<Result<Vec<_>>>()?;

        for constraint in &self.php_version {
            checker.require_php_version(constraint);
        }
        for family in os {
            checker.require_os(family);
        }
        if !self.functions.is_empty() {
            checker.require_functions(&self.functions);
        }
        if !self.classes.is_empty() {
            checker.require_classes(&self.classes);
        }
        if !ini.is_empty() {
            checker.require_ini_values(ini)?;
        }
        Ok(())
    }
}

fn ini_entry(key: &Value, value: &Value) -> Result<(String, IniExpectation)> {
    let directive = match key {
        Value::String(s) if !s.trim().is_empty() => s.trim().to_string(),
        Value::String(_) => {
            return Err(PhpReqsError::InvalidArgument {
                message: "ini directive names must not be empty".to_string(),
            })
        }
        other => {
            return Err(PhpReqsError::InvalidArgument {
                message: format!("ini directive names must be strings, got {:?}", other),
            })
        }
    };

    let expected = match value {
        Value::Bool(b) => IniExpectation::from(*b),
        Value::Number(n) => match n.as_i64() {
            Some(i) => IniExpectation::from(i),
            None => IniExpectation::from(Constraint::parse(&n.to_string())),
        },
        Value::String(s) => IniExpectation::from(s.as_str()),
        other => {
            return Err(PhpReqsError::InvalidArgument {
                message: format!(
                    "ini '{}' must be a boolean, number or string, got {:?}",
                    directive, other
                ),
            })
        }
    };

    Ok((directive, expected))
}

/// Accept either one scalar or a list of scalars.
fn scalar_or_list<'de, D>(deserializer: D) -> std::result::Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    fn scalar<E: serde::de::Error>(value: &Value) -> std::result::Result<String, E> {
        match value {
            Value::String(s) => Ok(s.clone()),
            Value::Number(n) => Ok(n.to_string()),
            other => Err(E::custom(format!("expected a string, got {:?}", other))),
        }
    }

    match Value::deserialize(deserializer)? {
        Value::Null => Ok(Vec::new()),
        Value::Sequence(items) => items.iter().map(scalar::<D::Error>).collect(),
        other => Ok(vec![scalar::<D::Error>(&other)?]),
    }
}

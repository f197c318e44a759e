//! Requirement descriptors.
//!
//! A [`RequirementDescriptor`] is one declared precondition awaiting
//! evaluation. Descriptors are plain data: they never query the environment
//! themselves.

use crate::error::{PhpReqsError, Result};
use crate::requirements::comparator::{normalize_bool, Constraint};
use serde::{Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Operating-system family of the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum OsFamily {
    /// Any `/`-separated platform (Linux, macOS, the BSDs, Solaris).
    Unix,
    /// Windows.
    Dos,
}

impl OsFamily {
    /// Every supported family, for error messages and completions.
    pub const ALL: &'static [OsFamily] = &[OsFamily::Unix, OsFamily::Dos];

    /// The family this binary was built for.
    pub fn host() -> Self {
        if cfg!(windows) {
            OsFamily::Dos
        } else {
            OsFamily::Unix
        }
    }

    /// Lowercase tag used in config files.
    pub fn as_str(&self) -> &'static str {
        match self {
            OsFamily::Unix => "unix",
            OsFamily::Dos => "dos",
        }
    }
}

impl fmt::Display for OsFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OsFamily {
    type Err = PhpReqsError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "unix" => Ok(OsFamily::Unix),
            "dos" | "windows" => Ok(OsFamily::Dos),
            other => Err(PhpReqsError::InvalidArgument {
                message: format!(
                    "unsupported OS family '{}' (expected one of: {})",
                    other,
                    OsFamily::ALL
                        .iter()
                        .map(|os| os.as_str())
                        .collect::<Vec<_>>()
                        .join(", ")
                ),
            }),
        }
    }
}

/// A set of names where any one existing name satisfies the group.
///
/// Written as a pipe-delimited string: `"ucfirst|ucwords"`. Blank
/// alternatives are dropped, so a group can end up empty; an empty group is
/// never satisfied.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AlternativesGroup {
    names: Vec<String>,
}

impl AlternativesGroup {
    /// Parse a pipe-delimited group.
    pub fn parse(spec: &str) -> Self {
        let names = spec
            .split('|')
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .map(str::to_string)
            .collect();
        Self { names }
    }

    /// The alternatives, in the order written.
    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// Whether the group has no usable alternatives.
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

impl fmt::Display for AlternativesGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.names.join("|"))
    }
}

impl Serialize for AlternativesGroup {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Expected value of an ini directive.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum IniExpectation {
    /// Compared after boolean normalization of the current value.
    Flag(bool),
    /// Evaluated with the comparator (`">=64M"`, `"30"`).
    Constraint(Constraint),
    /// Compared by plain string equality.
    Literal(String),
}

impl From<bool> for IniExpectation {
    fn from(value: bool) -> Self {
        IniExpectation::Flag(value)
    }
}

impl From<&str> for IniExpectation {
    /// Operator-prefixed strings become constraints, boolean ini forms
    /// (`On`, `off`, `"1"`, `""`) become flags, anything else a literal.
    fn from(value: &str) -> Self {
        if Constraint::has_operator(value) {
            IniExpectation::Constraint(Constraint::parse(value))
        } else if let Some(flag) = normalize_bool(value) {
            IniExpectation::Flag(flag)
        } else {
            IniExpectation::Literal(value.to_string())
        }
    }
}

impl From<String> for IniExpectation {
    fn from(value: String) -> Self {
        IniExpectation::from(value.as_str())
    }
}

impl From<i64> for IniExpectation {
    fn from(value: i64) -> Self {
        IniExpectation::Constraint(Constraint::parse(&value.to_string()))
    }
}

impl From<Constraint> for IniExpectation {
    fn from(value: Constraint) -> Self {
        IniExpectation::Constraint(value)
    }
}

impl fmt::Display for IniExpectation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IniExpectation::Flag(true) => f.write_str("On"),
            IniExpectation::Flag(false) => f.write_str("Off"),
            IniExpectation::Constraint(c) => write!(f, "{}", c),
            IniExpectation::Literal(s) => write!(f, "\"{}\"", s),
        }
    }
}

/// One directive/expectation pair of an ini requirement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IniEntry {
    pub directive: String,
    pub expected: IniExpectation,
}

/// Kind tag of a descriptor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RequirementKind {
    Version,
    Os,
    Functions,
    Classes,
    IniValues,
}

/// A single declared precondition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "expected", rename_all = "snake_case")]
pub enum RequirementDescriptor {
    /// PHP runtime version constraint.
    Version(Constraint),
    /// Exact OS family.
    Os(OsFamily),
    /// Every group must have at least one existing function.
    Functions(Vec<AlternativesGroup>),
    /// Every group must have at least one existing class.
    Classes(Vec<AlternativesGroup>),
    /// Every directive must match its expectation.
    IniValues(Vec<IniEntry>),
}

impl RequirementDescriptor {
    /// The kind tag of this descriptor.
    pub fn kind(&self) -> RequirementKind {
        match self {
            RequirementDescriptor::Version(_) => RequirementKind::Version,
            RequirementDescriptor::Os(_) => RequirementKind::Os,
            RequirementDescriptor::Functions(_) => RequirementKind::Functions,
            RequirementDescriptor::Classes(_) => RequirementKind::Classes,
            RequirementDescriptor::IniValues(_) => RequirementKind::IniValues,
        }
    }
}

impl fmt::Display for RequirementDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let join_groups = |groups: &[AlternativesGroup]| {
            groups
                .iter()
                .map(|g| g.to_string())
                .collect::<Vec<_>>()
                .join(", ")
        };

        match self {
            RequirementDescriptor::Version(c) => write!(f, "PHP version {}", c),
            RequirementDescriptor::Os(os) => write!(f, "OS family {}", os),
            RequirementDescriptor::Functions(groups) => {
                write!(f, "functions [{}]", join_groups(groups))
            }
            RequirementDescriptor::Classes(groups) => {
                write!(f, "classes [{}]", join_groups(groups))
            }
            RequirementDescriptor::IniValues(entries) => {
                let list = entries
                    .iter()
                    .map(|e| format!("{} {}", e.directive, e.expected))
                    .collect::<Vec<_>>()
                    .join(", ");
                write!(f, "ini [{}]", list)
            }
        }
    }
}

//! Constraint parsing and comparison.
//!
//! A constraint string is an optional relational operator followed by a
//! value token: `">=7.2"`, `"<128M"`, `"=5.4"`, or a bare `"8.1"` meaning
//! exact equality. Both sides of a comparison are normalized into a
//! [`Magnitude`] before the operator is applied:
//!
//! - `-1` is [`Magnitude::Unlimited`] and orders above every finite value
//! - `64M`, `512k`, `2G` are sizes, converted to bytes
//! - `7`, `7.4`, `8.1.2` are dotted versions compared component-wise
//!
//! Tokens that are none of the above fall back to string equality, with
//! boolean-ish ini forms (`On`, `Off`, `1`, `""`) normalized first.
//!
//! # Example
//!
//! ```
//! use phpreqs::requirements::comparator::evaluate;
//!
//! assert!(evaluate(">=7.2", "8.1"));
//! assert!(evaluate(">=64M", "-1"));
//! assert!(evaluate("=<5", "4.9"));
//! assert!(!evaluate("<128M", "256M"));
//! ```

use regex::Regex;
use serde::{Serialize, Serializer};
use std::cmp::Ordering;
use std::fmt;
use std::sync::LazyLock;

/// Size token: an integer followed by a K/M/G multiplier.
static SIZE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^(\d+)([kmg])$").expect("SIZE_REGEX must compile"));

/// Plain number or dotted version, nothing else.
static VERSION_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d+(?:\.\d+)*$").expect("VERSION_REGEX must compile"));

/// Leading dotted version of a runtime version string (`8.1.2-1ubuntu2`).
static VERSION_PREFIX_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^v?(\d+(?:\.\d+)*)").expect("VERSION_PREFIX_REGEX must compile")
});

/// Relational operator of a constraint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Operator {
    Eq,
    Gt,
    Gte,
    Lt,
    Lte,
}

impl Operator {
    /// Recognized prefixes, two-character forms first. `=<` is the legacy
    /// spelling of `<=`.
    const PREFIXES: &'static [(&'static str, Operator)] = &[
        (">=", Operator::Gte),
        ("<=", Operator::Lte),
        ("=<", Operator::Lte),
        ("==", Operator::Eq),
        (">", Operator::Gt),
        ("<", Operator::Lt),
        ("=", Operator::Eq),
    ];

    /// Canonical symbol for display.
    pub fn symbol(&self) -> &'static str {
        match self {
            Operator::Eq => "=",
            Operator::Gt => ">",
            Operator::Gte => ">=",
            Operator::Lt => "<",
            Operator::Lte => "<=",
        }
    }

    /// Whether `actual.cmp(expected) == ordering` satisfies this operator.
    pub fn holds(&self, ordering: Ordering) -> bool {
        match self {
            Operator::Eq => ordering == Ordering::Equal,
            Operator::Gt => ordering == Ordering::Greater,
            Operator::Gte => ordering != Ordering::Less,
            Operator::Lt => ordering == Ordering::Less,
            Operator::Lte => ordering != Ordering::Greater,
        }
    }

    /// Split a leading operator off `input`, if there is one.
    fn split_prefix(input: &str) -> Option<(Operator, &str)> {
        Self::PREFIXES
            .iter()
            .find_map(|(prefix, op)| input.strip_prefix(*prefix).map(|rest| (*op, rest)))
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// A comparable quantity: a version, a plain number, or a byte size.
///
/// Finite values are sequences of integer components; shorter sequences are
/// padded with zeros, so `8.1` equals `8.1.0`.
#[derive(Debug, Clone)]
pub enum Magnitude {
    /// The `-1` sentinel. Greater than any finite value.
    Unlimited,
    /// Integer components, most significant first.
    Finite(Vec<u64>),
}

impl Magnitude {
    /// Parse a value token. Returns `None` for anything that is not
    /// `-1`, a size, or a dotted number.
    pub fn parse(token: &str) -> Option<Self> {
        let token = token.trim();
        if token == "-1" {
            return Some(Magnitude::Unlimited);
        }

        if let Some(caps) = SIZE_REGEX.captures(token) {
            let base: u64 = caps[1].parse().ok()?;
            let multiplier: u64 = match caps[2].to_ascii_uppercase().as_str() {
                "K" => 1024,
                "M" => 1024 * 1024,
                _ => 1024 * 1024 * 1024,
            };
            return base.checked_mul(multiplier).map(|b| Magnitude::Finite(vec![b]));
        }

        if VERSION_REGEX.is_match(token) {
            return Self::components(token);
        }

        None
    }

    /// Parse the leading dotted version of a runtime version string,
    /// ignoring any vendor suffix (`8.1.2-1ubuntu2.14` reads as `8.1.2`).
    pub fn parse_version(version: &str) -> Option<Self> {
        let caps = VERSION_PREFIX_REGEX.captures(version.trim())?;
        Self::components(&caps[1])
    }

    fn components(dotted: &str) -> Option<Self> {
        dotted
            .split('.')
            .map(|part| part.parse::<u64>().ok())
            .collect::<Option<Vec<_>>>()
            .map(Magnitude::Finite)
    }
}

impl Ord for Magnitude {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Magnitude::Unlimited, Magnitude::Unlimited) => Ordering::Equal,
            (Magnitude::Unlimited, Magnitude::Finite(_)) => Ordering::Greater,
            (Magnitude::Finite(_), Magnitude::Unlimited) => Ordering::Less,
            (Magnitude::Finite(a), Magnitude::Finite(b)) => {
                let len = a.len().max(b.len());
                (0..len)
                    .map(|i| {
                        let x = a.get(i).copied().unwrap_or(0);
                        let y = b.get(i).copied().unwrap_or(0);
                        x.cmp(&y)
                    })
                    .find(|ord| *ord != Ordering::Equal)
                    .unwrap_or(Ordering::Equal)
            }
        }
    }
}

impl PartialOrd for Magnitude {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for Magnitude {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Magnitude {}

/// Normalize an ini-style boolean string.
///
/// | input (case-insensitive)           | result        |
/// |------------------------------------|---------------|
/// | `1`, `on`, `yes`, `true`           | `Some(true)`  |
/// | `0`, `off`, `no`, `false`, `none`, `""` | `Some(false)` |
/// | anything else                      | `None`        |
pub fn normalize_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "on" | "yes" | "true" => Some(true),
        "" | "0" | "off" | "no" | "false" | "none" => Some(false),
        _ => None,
    }
}

/// String equality, treating two boolean-ish forms of the same truth value
/// as equal.
fn loose_equals(expected: &str, actual: &str) -> bool {
    if expected.trim() == actual.trim() {
        return true;
    }
    match (normalize_bool(expected), normalize_bool(actual)) {
        (Some(e), Some(a)) => e == a,
        _ => false,
    }
}

/// A parsed constraint string.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Constraint {
    operator: Operator,
    value: String,
    explicit: bool,
    raw: String,
}

impl Constraint {
    /// Parse a constraint. Never fails: input without an operator means
    /// equality, and malformed input degrades to equality on the raw string
    /// when it is evaluated.
    pub fn parse(raw: &str) -> Self {
        let trimmed = raw.trim();
        match Operator::split_prefix(trimmed) {
            Some((operator, rest)) => Self {
                operator,
                value: rest.trim().to_string(),
                explicit: true,
                raw: trimmed.to_string(),
            },
            None => Self {
                operator: Operator::Eq,
                value: trimmed.to_string(),
                explicit: false,
                raw: trimmed.to_string(),
            },
        }
    }

    /// Whether `input` starts with a relational operator.
    pub fn has_operator(input: &str) -> bool {
        Operator::split_prefix(input.trim()).is_some()
    }

    /// The relational operator (`Eq` when none was given).
    pub fn operator(&self) -> Operator {
        self.operator
    }

    /// The value token, without the operator.
    pub fn value(&self) -> &str {
        &self.value
    }

    /// The constraint as it was written (trimmed).
    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// Evaluate the constraint against an actual value.
    pub fn matches(&self, actual: &str) -> bool {
        self.compare(Magnitude::parse(&self.value), Magnitude::parse(actual), actual)
    }

    /// Evaluate against a runtime version string. The actual side is always
    /// read as a dotted version, and so is a constraint value carrying a
    /// vendor suffix (`>=8.1.2-1ubuntu2.14`).
    pub fn matches_version(&self, actual: &str) -> bool {
        let expected =
            Magnitude::parse(&self.value).or_else(|| Magnitude::parse_version(&self.value));
        self.compare(expected, Magnitude::parse_version(actual), actual)
    }

    fn compare(
        &self,
        expected: Option<Magnitude>,
        actual: Option<Magnitude>,
        actual_raw: &str,
    ) -> bool {
        match (expected, actual) {
            (Some(expected), Some(actual)) => self.operator.holds(actual.cmp(&expected)),
            (Some(_), None) => self.operator == Operator::Eq && loose_equals(&self.value, actual_raw),
            (None, _) if self.operator == Operator::Eq => {
                loose_equals(&self.value, actual_raw) || self.raw == actual_raw.trim()
            }
            (None, _) => self.raw == actual_raw.trim(),
        }
    }
}

impl fmt::Display for Constraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.explicit {
            write!(f, "{}{}", self.operator, self.value)
        } else {
            f.write_str(&self.value)
        }
    }
}

impl Serialize for Constraint {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Evaluate `constraint` against `actual` in one call.
pub fn evaluate(constraint: &str, actual: &str) -> bool {
    Constraint::parse(constraint).matches(actual)
}

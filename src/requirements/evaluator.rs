//! Requirement evaluation.
//!
//! The `Evaluator` resolves each descriptor against a [`PlatformProbe`] and
//! produces one [`RequirementResult`] per descriptor. It never mutates the
//! descriptors, and it never fails: anything the probe cannot answer counts
//! as unsatisfied.

use crate::probe::{IniValue, PlatformProbe};
use crate::requirements::comparator::{normalize_bool, Constraint};
use crate::requirements::descriptor::{
    AlternativesGroup, IniEntry, IniExpectation, OsFamily, RequirementDescriptor,
};
use crate::requirements::set::RequirementSet;
use crate::requirements::status::RequirementResult;

/// Evaluates descriptors against a probe.
pub struct Evaluator<'a, P: PlatformProbe + ?Sized> {
    probe: &'a P,
}

/// Outcome of one descriptor before it is paired with the descriptor.
type Verdict = (bool, String);

impl<'a, P: PlatformProbe + ?Sized> Evaluator<'a, P> {
    /// Create an evaluator over the given probe.
    pub fn new(probe: &'a P) -> Self {
        Self { probe }
    }

    /// Evaluate every descriptor, in registration order.
    pub fn evaluate_all(&self, requirements: &RequirementSet) -> Vec<RequirementResult> {
        requirements.iter().map(|d| self.evaluate(d)).collect()
    }

    /// Evaluate a single descriptor.
    pub fn evaluate(&self, descriptor: &RequirementDescriptor) -> RequirementResult {
        let (satisfied, reason) = match descriptor {
            RequirementDescriptor::Version(constraint) => self.evaluate_version(constraint),
            RequirementDescriptor::Os(os) => self.evaluate_os(*os),
            RequirementDescriptor::Functions(groups) => {
                evaluate_groups("function", groups, |name| self.probe.function_exists(name))
            }
            RequirementDescriptor::Classes(groups) => {
                evaluate_groups("class", groups, |name| self.probe.class_exists(name))
            }
            RequirementDescriptor::IniValues(entries) => self.evaluate_ini(entries),
        };

        tracing::debug!(
            "{} -> {} ({})",
            descriptor,
            if satisfied { "satisfied" } else { "unsatisfied" },
            reason
        );

        if satisfied {
            RequirementResult::satisfied(descriptor.clone(), reason)
        } else {
            RequirementResult::unsatisfied(descriptor.clone(), reason)
        }
    }

    fn evaluate_version(&self, constraint: &Constraint) -> Verdict {
        let Some(current) = self.probe.current_version() else {
            return (false, "PHP version could not be determined".to_string());
        };

        if constraint.matches_version(&current) {
            (true, format!("PHP {} satisfies {}", current, constraint))
        } else {
            (false, format!("PHP {} does not satisfy {}", current, constraint))
        }
    }

    fn evaluate_os(&self, required: OsFamily) -> Verdict {
        match self.probe.current_os_family() {
            Some(current) if current == required => (true, format!("host OS family is {}", current)),
            Some(current) => (
                false,
                format!("host OS family is {}, {} required", current, required),
            ),
            None => (false, "host OS family could not be determined".to_string()),
        }
    }

    fn evaluate_ini(&self, entries: &[IniEntry]) -> Verdict {
        let failures: Vec<String> = entries
            .iter()
            .filter_map(|entry| {
                let current = self.probe.ini_value(&entry.directive);
                check_ini(&entry.expected, current.as_ref())
                    .err()
                    .map(|why| format!("{} {}", entry.directive, why))
            })
            .collect();

        if failures.is_empty() {
            (true, format!("{} ini directive(s) match", entries.len()))
        } else {
            (false, failures.join("; "))
        }
    }
}

/// AND over groups, OR within each group.
fn evaluate_groups<F>(label: &str, groups: &[AlternativesGroup], exists: F) -> Verdict
where
    F: Fn(&str) -> bool,
{
    let missing: Vec<String> = groups
        .iter()
        .filter(|group| !group.names().iter().any(|name| exists(name.as_str())))
        .map(|group| {
            if group.is_empty() {
                "(empty group)".to_string()
            } else {
                group.to_string()
            }
        })
        .collect();

    if missing.is_empty() {
        (true, format!("all {} {} group(s) available", groups.len(), label))
    } else {
        (false, format!("missing {}: {}", label, missing.join(", ")))
    }
}

/// Compare one directive. `Err` carries the mismatch description.
fn check_ini(expected: &IniExpectation, current: Option<&IniValue>) -> Result<(), String> {
    let Some(current) = current else {
        return Err(format!("is not set, expected {}", expected));
    };

    let matched = match expected {
        IniExpectation::Flag(want) => {
            let have = match current {
                IniValue::Flag(b) => Some(*b),
                IniValue::Text(s) => normalize_bool(s),
            };
            have == Some(*want)
        }
        IniExpectation::Constraint(constraint) => constraint.matches(&current.as_text()),
        IniExpectation::Literal(literal) => current.as_text() == literal.as_str(),
    };

    if matched {
        Ok(())
    } else {
        Err(format!("is \"{}\", expected {}", current.as_text(), expected))
    }
}
